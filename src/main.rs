//! Headless demo session
//!
//! Runs the simulation for a few seconds with scripted input fed from a
//! second thread, the same way a platform input callback would, and logs
//! what happened. No windowing or graphics.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use torus_arena::consts::SIM_DT;
use torus_arena::{Level, Tuning, World};

const TICKS: u64 = 360; // six seconds

fn main() {
    env_logger::init();

    let mut world = World::new(0x7041, Tuning::default());
    world
        .load_level(Level::Alleyway)
        .expect("preset layouts have no degenerate walls");

    for slot in 0..2 {
        let id = world
            .spawn_actor(slot)
            .expect("slots are free at startup");
        world.activate_actor(id);
    }

    // Scripted input from a second thread, through the same critical
    // section a device-capture thread would use.
    let hub = world.input();
    let running = Arc::new(AtomicBool::new(true));
    let driver = {
        let running = Arc::clone(&running);
        thread::spawn(move || {
            let mut step = 0u32;
            while running.load(Ordering::Relaxed) {
                // Ship 0 circles the board, firing in bursts
                let angle = step as f32 * 0.02;
                hub.set_move_stick(0, angle.cos(), angle.sin());
                hub.set_fire_held(0, step % 120 < 30);
                // Ship 1 strafes and aims across the alley
                hub.set_move_stick(1, if step % 240 < 120 { 0.8 } else { -0.8 }, 0.3);
                hub.set_aim_stick(1, 0.0, -1.0);
                step += 1;
                thread::sleep(Duration::from_millis(4));
            }
        })
    };

    for tick in 0..TICKS {
        world.tick();
        if tick % 60 == 0 {
            let projectiles = world
                .frame()
                .iter()
                .filter(|c| c.model.vertex_count() == 3)
                .count();
            log::info!(
                "t={:.1}s live={} frame_commands={} projectiles={}",
                world.now(),
                world.live_count(),
                world.frame().len(),
                projectiles,
            );
        }
        thread::sleep(Duration::from_secs_f32(SIM_DT));
    }

    running.store(false, Ordering::Relaxed);
    let _ = driver.join();

    let ships_alive = world
        .frame()
        .iter()
        .filter(|c| c.model.vertex_count() == 6)
        .count();
    log::info!(
        "session over after {TICKS} ticks: {} entities live, {ships_alive} ships rendered",
        world.live_count(),
    );
}
