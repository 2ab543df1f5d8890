//! Preset wall layouts

use glam::Vec2;

/// Selectable arena layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    /// Open board, no walls
    #[default]
    Freedom,
    /// Three horizontal walls across the middle half of the board
    Alleyway,
    /// A grid of alternating short wall pieces
    Boxy,
}

/// Wall endpoints for a layout on a `board`-sized arena.
pub fn wall_segments(level: Level, board: Vec2) -> Vec<(Vec2, Vec2)> {
    match level {
        Level::Freedom => Vec::new(),

        Level::Alleyway => [0.25, 0.50, 0.75]
            .iter()
            .map(|frac| {
                let y = board.y * frac;
                (
                    Vec2::new(board.x * 0.25, y),
                    Vec2::new(board.x * 0.75, y),
                )
            })
            .collect(),

        Level::Boxy => {
            const PIECES: usize = 10;
            let cell_w = board.x / PIECES as f32;
            let cell_h = board.y / PIECES as f32;
            let x_ofs = cell_w * 0.5;
            let y_ofs = cell_h * 0.5;

            let mut walls = Vec::new();
            for i in (1..PIECES).step_by(2) {
                for j in (1..PIECES).step_by(2) {
                    if i != PIECES - 1 {
                        walls.push((
                            Vec2::new(x_ofs + cell_w * i as f32, cell_h * j as f32),
                            Vec2::new(x_ofs + cell_w * (i + 1) as f32, cell_h * j as f32),
                        ));
                    }
                    if j != PIECES - 1 {
                        walls.push((
                            Vec2::new(cell_w * i as f32, y_ofs + cell_h * j as f32),
                            Vec2::new(cell_w * i as f32, y_ofs + cell_h * (j + 1) as f32),
                        ));
                    }
                }
            }
            walls
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD: Vec2 = Vec2::new(40.0, 40.0);

    #[test]
    fn test_freedom_is_open() {
        assert!(wall_segments(Level::Freedom, BOARD).is_empty());
    }

    #[test]
    fn test_alleyway_layout() {
        let walls = wall_segments(Level::Alleyway, BOARD);
        assert_eq!(walls.len(), 3);
        let (a, b) = walls[0];
        assert_eq!(a, Vec2::new(10.0, 10.0));
        assert_eq!(b, Vec2::new(30.0, 10.0));
        // All spans are horizontal and centered
        for (a, b) in walls {
            assert_eq!(a.y, b.y);
            assert_eq!(b.x - a.x, 20.0);
        }
    }

    #[test]
    fn test_boxy_layout() {
        let walls = wall_segments(Level::Boxy, BOARD);
        // 5x5 grid cells; the last column drops its horizontal piece and the
        // last row its vertical piece
        assert_eq!(walls.len(), 40);
        // No degenerate pieces
        for (a, b) in walls {
            assert!(a.distance(b) > 1.0);
        }
    }
}
