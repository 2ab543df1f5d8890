//! World / scene manager
//!
//! Owns the authoritative live set and runs the per-frame tick:
//! drain pending removals, drain pending additions, update every entity
//! against one input snapshot, emit render commands. Additions and removals
//! requested mid-frame (including from collision handling) land in pending
//! queues and commit at the next tick's drain phase, so the live set is
//! never mutated while it is being iterated.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{MAX_PLAYERS, SIM_DT};
use crate::input::{InputHub, PadState};
use crate::render::{FrameQueue, Model, RenderCommand, models, models::colors};
use crate::sim::actor::{Actor, ActorPhase, resolve_controls};
use crate::sim::entity::{Body, CollisionPolicy, EntityId, EntityKind, SpawnError};
use crate::sim::level::{self, Level};
use crate::sim::projectile::Projectile;
use crate::sim::wall::Wall;
use crate::stick_heading;
use crate::tuning::Tuning;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Queue contents are plain data; a panic mid-append can't corrupt them.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Deferred-mutation queues, append-only from any caller.
#[derive(Debug, Default)]
struct PendingQueue {
    add: Mutex<Vec<Body>>,
    remove: Mutex<HashSet<EntityId>>,
    next_id: AtomicU32,
}

impl PendingQueue {
    fn allocate_id(&self) -> EntityId {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn enqueue_add(&self, body: Body) {
        lock(&self.add).push(body);
    }

    /// Idempotent: a second request for the same id is a no-op.
    fn enqueue_remove(&self, id: EntityId) {
        lock(&self.remove).insert(id);
    }

    fn take_additions(&self) -> Vec<Body> {
        std::mem::take(&mut lock(&self.add))
    }

    fn take_removals(&self) -> HashSet<EntityId> {
        std::mem::take(&mut lock(&self.remove))
    }

    fn has_actor_for_slot(&self, slot: u8) -> bool {
        lock(&self.add)
            .iter()
            .any(|b| b.as_actor().is_some_and(|a| a.slot == slot))
    }

    fn activate(&self, id: EntityId, pos: Vec2, rotation: f32) -> bool {
        lock(&self.add)
            .iter_mut()
            .find(|b| b.id == id)
            .is_some_and(|b| activate_body(b, pos, rotation))
    }
}

/// Cloneable handle for enqueuing lifecycle requests from outside the world,
/// e.g. another thread or a caller holding no `&mut World`.
#[derive(Debug, Clone)]
pub struct WorldHandle {
    pending: Arc<PendingQueue>,
}

impl WorldHandle {
    /// Queue a fully built entity for addition at the next tick.
    pub fn enqueue_add(&self, body: Body) {
        self.pending.enqueue_add(body);
    }

    /// Queue an entity for removal at the next tick. Safe to call twice.
    pub fn enqueue_remove(&self, id: EntityId) {
        self.pending.enqueue_remove(id);
    }

    /// Reserve an id for an entity to be built by the caller.
    pub fn allocate_id(&self) -> EntityId {
        self.pending.allocate_id()
    }
}

/// The arena: authoritative entity set, tick loop, collision queries.
#[derive(Debug)]
pub struct World {
    tuning: Tuning,
    entities: Vec<Body>,
    pending: Arc<PendingQueue>,
    input: Arc<InputHub>,
    frames: FrameQueue,
    rng: Pcg32,
    ship_model: Arc<Model>,
    projectile_model: Arc<Model>,
    time_ticks: u64,
}

impl World {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            tuning,
            entities: Vec::new(),
            pending: Arc::new(PendingQueue::default()),
            input: Arc::new(InputHub::new()),
            frames: FrameQueue::new(),
            rng: Pcg32::seed_from_u64(seed),
            ship_model: Arc::new(models::ship()),
            projectile_model: Arc::new(models::projectile()),
            time_ticks: 0,
        }
    }

    /// The input hub shared with the input-producing thread.
    pub fn input(&self) -> Arc<InputHub> {
        Arc::clone(&self.input)
    }

    /// A handle for external add/remove requests.
    pub fn handle(&self) -> WorldHandle {
        WorldHandle {
            pending: Arc::clone(&self.pending),
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Simulation time in seconds.
    pub fn now(&self) -> f32 {
        self.time_ticks as f32 * SIM_DT
    }

    pub fn live_count(&self) -> usize {
        self.entities.len()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.iter().any(|b| b.id == id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Body> {
        self.entities.iter().find(|b| b.id == id)
    }

    /// The most recently presented render frame.
    pub fn frame(&self) -> &[RenderCommand] {
        self.frames.frame()
    }

    // =========================================================================
    // Spawning
    // =========================================================================

    /// Spawn the preset wall layout for a level.
    pub fn load_level(&self, level: Level) -> Result<(), SpawnError> {
        let segments = level::wall_segments(level, self.tuning.board());
        log::info!("loading level {level:?}: {} walls", segments.len());
        for (a, b) in segments {
            self.spawn_wall(a, b)?;
        }
        Ok(())
    }

    /// Register a wall from `a` to `b` for addition at the next tick.
    pub fn spawn_wall(&self, a: Vec2, b: Vec2) -> Result<EntityId, SpawnError> {
        let wall = Wall::new(a, b)?;
        let id = self.pending.allocate_id();
        let body = Body::new(
            id,
            Vec2::ZERO,
            0.0,
            Wall::RADIUS,
            Arc::new(models::wall(a, b)),
            EntityKind::Wall(wall),
        )?;
        self.pending.enqueue_add(body);
        Ok(id)
    }

    /// Register a new ship for an owner slot, uninitialized until
    /// [`activate_actor`](Self::activate_actor) places it on the board.
    ///
    /// At most one non-dead ship may exist per slot; a dead ship in the slot
    /// is scheduled for removal to make room.
    pub fn spawn_actor(&self, slot: u8) -> Result<EntityId, SpawnError> {
        if slot as usize >= MAX_PLAYERS {
            return Err(SpawnError::SlotOutOfRange(slot));
        }
        for body in &self.entities {
            if let Some(actor) = body.as_actor().filter(|a| a.slot == slot) {
                if actor.phase == ActorPhase::Dead {
                    self.pending.enqueue_remove(body.id);
                } else {
                    return Err(SpawnError::SlotOccupied(slot));
                }
            }
        }
        if self.pending.has_actor_for_slot(slot) {
            return Err(SpawnError::SlotOccupied(slot));
        }

        let id = self.pending.allocate_id();
        let body = Body::new(
            id,
            Vec2::ZERO,
            0.0,
            self.tuning.player_radius,
            Arc::clone(&self.ship_model),
            EntityKind::Actor(Actor::new(slot)),
        )?;
        self.pending.enqueue_add(body);
        log::debug!("ship {id} registered for slot {slot}");
        Ok(id)
    }

    /// Place an uninitialized ship at a random board position and make it
    /// controllable. Returns false if the id is unknown or already placed.
    pub fn activate_actor(&mut self, id: EntityId) -> bool {
        let live_idx = self.entities.iter().position(|b| b.id == id);
        if live_idx.is_none() && !self.pending_contains(id) {
            return false;
        }

        let board = self.tuning.board();
        let pos = Vec2::new(
            self.rng.random_range(1.0..board.x),
            self.rng.random_range(1.0..board.y),
        );
        let rotation = self.rng.random_range(0.0..360.0);

        let activated = match live_idx {
            Some(idx) => activate_body(&mut self.entities[idx], pos, rotation),
            None => self.pending.activate(id, pos, rotation),
        };
        if activated {
            log::info!("ship {id} joined at ({:.1}, {:.1})", pos.x, pos.y);
        }
        activated
    }

    fn pending_contains(&self, id: EntityId) -> bool {
        lock(&self.pending.add).iter().any(|b| b.id == id)
    }

    fn spawn_projectile(
        &self,
        owner: EntityId,
        origin: Vec2,
        heading: f32,
        now: f32,
    ) -> Result<EntityId, SpawnError> {
        let id = self.pending.allocate_id();
        let body = Body::new(
            id,
            origin,
            heading,
            self.tuning.projectile_radius,
            Arc::clone(&self.projectile_model),
            EntityKind::Projectile(Projectile::new(owner, now)),
        )?;
        self.pending.enqueue_add(body);
        Ok(id)
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Advance the simulation by one frame. Single authority: only this
    /// method commits pending additions/removals or mutates the live set.
    pub fn tick(&mut self) {
        self.drain_removals();
        self.drain_additions();

        // Input-fenced phase: one lock hold copies every pad, so all
        // entities in this frame read the same snapshot while writers wait.
        let pads = self.input.snapshot();
        self.time_ticks += 1;
        let now = self.now();
        for idx in 0..self.entities.len() {
            self.update_entity(idx, &pads, now);
        }

        self.render();
    }

    fn drain_removals(&mut self) {
        let remove = self.pending.take_removals();
        if !remove.is_empty() {
            self.entities.retain(|b| !remove.contains(&b.id));
        }
    }

    fn drain_additions(&mut self) {
        let mut add = self.pending.take_additions();
        self.entities.append(&mut add);
    }

    fn update_entity(&mut self, idx: usize, pads: &[PadState; MAX_PLAYERS], now: f32) {
        if self.entities[idx].is_wall() {
            return;
        }
        if self.entities[idx].is_actor() {
            self.update_actor(idx, pads, now);
        } else {
            self.update_projectile(idx, now);
        }
    }

    fn update_actor(&mut self, idx: usize, pads: &[PadState; MAX_PLAYERS], now: f32) {
        let (slot, active, rotation) = match self.entities[idx].as_actor() {
            Some(a) if a.on_board() => (a.slot, a.is_active(), self.entities[idx].rotation),
            _ => return,
        };

        let controls = resolve_controls(&pads[slot as usize], rotation, &self.tuning);

        if let Some(heading) = controls.heading {
            self.entities[idx].set_rotation(heading);
            if active && controls.forward != 0.0 {
                self.move_entity(idx, controls.forward);
            }
        }

        if !active {
            return;
        }
        let Some(dir) = controls.fire_dir else {
            return;
        };
        let cooldown = self.tuning.fire_cooldown;
        let ready = self.entities[idx]
            .as_actor()
            .is_some_and(|a| a.can_fire(now, cooldown));
        if !ready {
            return;
        }
        if let Some(actor) = self.entities[idx].as_actor_mut() {
            actor.last_fire_time = Some(now);
        }
        let origin = self.entities[idx].pos;
        let owner = self.entities[idx].id;
        match self.spawn_projectile(owner, origin, stick_heading(dir), now) {
            Ok(id) => log::debug!("ship {owner} fired projectile {id}"),
            Err(err) => log::error!("projectile spawn failed: {err}"),
        }
    }

    fn update_projectile(&mut self, idx: usize, now: f32) {
        self.move_entity(idx, self.tuning.projectile_speed);

        let body = &self.entities[idx];
        if let EntityKind::Projectile(p) = &body.kind {
            if p.expired(now, self.tuning.projectile_lifetime) {
                log::debug!("projectile {} expired", body.id);
                self.pending.enqueue_remove(body.id);
            }
        }
    }

    /// Step an entity forward, then resolve whatever it ran into.
    fn move_entity(&mut self, idx: usize, amount: f32) {
        let board = self.tuning.board();
        let prev = self.entities[idx].advance(amount, board);
        let Some(policy) = self.entities[idx].policy() else {
            return;
        };
        if let Some(other_idx) = self.find_collision(idx) {
            self.resolve_collision(policy, prev, idx, other_idx);
        }
    }

    /// First colliding entity, walls before everything else.
    fn find_collision(&self, idx: usize) -> Option<usize> {
        let mover = &self.entities[idx];
        self.entities
            .iter()
            .enumerate()
            .find(|(i, cand)| *i != idx && cand.is_wall() && collides(cand, mover))
            .or_else(|| {
                self.entities
                    .iter()
                    .enumerate()
                    .find(|(i, cand)| *i != idx && !cand.is_wall() && collides(cand, mover))
            })
            .map(|(i, _)| i)
    }

    /// Public collision query by id. An id not currently in the live set
    /// reports no collision.
    pub fn query_collision(&self, id: EntityId) -> Option<EntityId> {
        let idx = self.entities.iter().position(|b| b.id == id)?;
        self.find_collision(idx).map(|i| self.entities[i].id)
    }

    fn resolve_collision(
        &mut self,
        policy: CollisionPolicy,
        prev: Vec2,
        mover_idx: usize,
        other_idx: usize,
    ) {
        match policy {
            CollisionPolicy::SlideAlongWall => {
                let (mover, other) = pair_mut(&mut self.entities, mover_idx, other_idx);
                if let EntityKind::Wall(wall) = &mut other.kind {
                    mover.pos = wall.slide_against(prev, mover.pos, mover.radius);
                }
            }
            CollisionPolicy::KillOnPlayerHit => {
                let mover_id = self.entities[mover_idx].id;
                let owner = match &self.entities[mover_idx].kind {
                    EntityKind::Projectile(p) => p.owner,
                    _ => return,
                };
                let other_id = self.entities[other_idx].id;
                match &mut self.entities[other_idx].kind {
                    EntityKind::Actor(actor) if other_id != owner => {
                        if actor.phase != ActorPhase::Dead {
                            actor.phase = ActorPhase::Dead;
                            log::info!("ship {other_id} destroyed by projectile {mover_id}");
                        }
                        self.pending.enqueue_remove(mover_id);
                    }
                    EntityKind::Wall(_) => {
                        self.pending.enqueue_remove(mover_id);
                    }
                    _ => {}
                }
            }
        }
    }

    // =========================================================================
    // Render
    // =========================================================================

    /// Emit one command per visible entity into the back buffer and swap.
    fn render(&mut self) {
        let buf = self.frames.begin();
        for body in &self.entities {
            let color = match &body.kind {
                EntityKind::Actor(a) => match a.phase {
                    ActorPhase::Uninitialized => continue,
                    ActorPhase::Active => colors::PLAYERS[a.slot as usize % colors::PLAYERS.len()],
                    ActorPhase::Dead => colors::DEAD,
                },
                EntityKind::Projectile(_) => colors::PROJECTILE,
                EntityKind::Wall(_) => colors::WALL,
            };
            buf.push(RenderCommand {
                model: Arc::clone(&body.model),
                translation: body.pos,
                rotation: body.rotation,
                color,
            });
        }
        self.frames.present();
    }
}

fn activate_body(body: &mut Body, pos: Vec2, rotation: f32) -> bool {
    let Some(actor) = body.as_actor_mut() else {
        return false;
    };
    if actor.phase != ActorPhase::Uninitialized {
        return false;
    }
    actor.phase = ActorPhase::Active;
    body.pos = pos;
    body.rotation = rotation;
    true
}

/// Collision test against a candidate, mirroring the per-kind rules:
/// walls test the mover's circle against their segment, ships never collide
/// with other ships, everything else is circle-vs-circle.
fn collides(candidate: &Body, mover: &Body) -> bool {
    match &candidate.kind {
        EntityKind::Wall(w) => w.collides_with_circle(mover.pos, mover.radius),
        EntityKind::Actor(a) => {
            if mover.is_actor() || !a.on_board() {
                return false;
            }
            circles_overlap(candidate, mover)
        }
        EntityKind::Projectile(_) => circles_overlap(candidate, mover),
    }
}

fn circles_overlap(a: &Body, b: &Body) -> bool {
    let radii = a.radius + b.radius;
    a.pos.distance_squared(b.pos) <= radii * radii
}

fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Primitive;

    fn world() -> World {
        World::new(42, Tuning::default())
    }

    /// Spawn, activate and drain a ship, then pin it to a known pose.
    fn place_actor(world: &mut World, slot: u8, pos: Vec2, rotation: f32) -> EntityId {
        let id = world.spawn_actor(slot).unwrap();
        assert!(world.activate_actor(id));
        world.tick();
        let body = world
            .entities
            .iter_mut()
            .find(|b| b.id == id)
            .expect("ship should be live after a tick");
        body.pos = pos;
        body.rotation = rotation;
        id
    }

    fn live_projectiles(world: &World) -> Vec<EntityId> {
        world
            .entities
            .iter()
            .filter(|b| matches!(b.kind, EntityKind::Projectile(_)))
            .map(|b| b.id)
            .collect()
    }

    fn fire_pulse(world: &mut World, slot: usize) {
        let hub = world.input();
        hub.set_fire_held(slot, true);
        world.tick();
        hub.set_fire_held(slot, false);
    }

    #[test]
    fn test_add_visible_after_tick_remove_after_next() {
        let mut world = world();
        let id = world.spawn_actor(0).unwrap();
        assert!(!world.contains(id));

        world.tick();
        assert!(world.contains(id));

        world.handle().enqueue_remove(id);
        // Still live for the rest of the frame; gone after the next drain
        assert!(world.contains(id));
        world.tick();
        assert!(!world.contains(id));
    }

    #[test]
    fn test_double_removal_is_idempotent() {
        let mut world = world();
        let a = world.spawn_actor(0).unwrap();
        let b = world.spawn_actor(1).unwrap();
        world.tick();
        assert_eq!(world.live_count(), 2);

        let handle = world.handle();
        handle.enqueue_remove(a);
        handle.enqueue_remove(a);
        world.tick();

        assert!(!world.contains(a));
        assert!(world.contains(b));
        assert_eq!(world.live_count(), 1);
    }

    #[test]
    fn test_removal_of_unknown_id_is_noop() {
        let mut world = world();
        world.spawn_actor(0).unwrap();
        world.handle().enqueue_remove(9999);
        world.tick();
        assert_eq!(world.live_count(), 1);
    }

    #[test]
    fn test_wall_precedence_in_collision_query() {
        let mut world = world();
        let wall_id = world
            .spawn_wall(Vec2::new(5.0, 0.0), Vec2::new(5.0, 10.0))
            .unwrap();
        let victim = place_actor(&mut world, 0, Vec2::new(5.2, 5.0), 0.0);
        // A projectile overlapping both the wall and the ship
        let proj = world
            .spawn_projectile(999, Vec2::new(5.2, 5.0), 0.0, 0.0)
            .unwrap();
        world.tick();

        // The ship overlaps both the wall and the projectile; walls are
        // checked first, so the wall wins
        assert!(world.contains(proj));
        assert_eq!(world.query_collision(victim), Some(wall_id));
    }

    #[test]
    fn test_ships_pass_through_each_other() {
        let mut world = world();
        let a = place_actor(&mut world, 0, Vec2::new(20.0, 20.0), 0.0);
        let b = place_actor(&mut world, 1, Vec2::new(20.0, 20.0), 0.0);
        assert_eq!(world.query_collision(a), None);
        assert_eq!(world.query_collision(b), None);
    }

    #[test]
    fn test_query_on_absent_entity_reports_none() {
        let mut world = world();
        place_actor(&mut world, 0, Vec2::new(20.0, 20.0), 0.0);
        assert_eq!(world.query_collision(4242), None);
    }

    #[test]
    fn test_uninitialized_ship_is_not_a_collision_target() {
        let mut world = world();
        let ghost = world.spawn_actor(0).unwrap();
        // Unplaced ships sit at the origin; a projectile there must not hit
        let proj = world
            .spawn_projectile(999, Vec2::new(0.0, 0.0), 0.0, 0.0)
            .unwrap();
        world.tick();
        assert!(world.contains(ghost));
        assert_eq!(world.query_collision(proj), None);
    }

    #[test]
    fn test_ship_slides_along_wall() {
        let mut world = world();
        world
            .spawn_wall(Vec2::new(5.0, 0.0), Vec2::new(5.0, 10.0))
            .unwrap();
        let ship = place_actor(&mut world, 0, Vec2::new(4.9, 5.0), 0.0);

        // Full deflection straight toward the wall
        world.input().set_move_stick(0, 1.0, 0.0);
        world.tick();

        let body = world.entity(ship).unwrap();
        assert!((body.pos.x - 4.4).abs() < 1e-3, "x = {}", body.pos.x);
        assert!((body.pos.y - 5.0).abs() < 1e-3, "y = {}", body.pos.y);
        // The ship survives; walls never kill
        assert!(body.as_actor().unwrap().is_active());
    }

    #[test]
    fn test_fire_rate_gating() {
        let mut world = world();
        place_actor(&mut world, 0, Vec2::new(20.0, 20.0), 0.0);

        // First request always fires
        fire_pulse(&mut world, 0);
        world.tick();
        assert_eq!(live_projectiles(&world).len(), 1);

        // Second request 50 ms after the first: still inside the 100 ms
        // cooldown, no shot. One idle tick already passed above.
        world.tick();
        fire_pulse(&mut world, 0);
        world.tick();
        assert_eq!(live_projectiles(&world).len(), 1);

        // Third request 150 ms after the first: fires
        for _ in 0..4 {
            world.tick();
        }
        fire_pulse(&mut world, 0);
        world.tick();
        assert_eq!(live_projectiles(&world).len(), 2);
    }

    #[test]
    fn test_projectile_lifetime() {
        let mut world = world();
        place_actor(&mut world, 0, Vec2::new(20.0, 20.0), 0.0);

        fire_pulse(&mut world, 0);
        world.tick();
        let projectiles = live_projectiles(&world);
        assert_eq!(projectiles.len(), 1);
        let proj = projectiles[0];

        // Still live at 0.9 s of age
        for _ in 0..52 {
            world.tick();
        }
        assert!(world.contains(proj));

        // Gone by 1.1 s
        for _ in 0..14 {
            world.tick();
        }
        assert!(!world.contains(proj));
    }

    #[test]
    fn test_projectile_kills_enemy_and_destroys_itself() {
        let mut world = world();
        let shooter = place_actor(&mut world, 0, Vec2::new(20.0, 20.0), 0.0);
        let target = place_actor(&mut world, 1, Vec2::new(20.0, 22.0), 0.0);

        // Heading 0 fires along +y, straight at the target
        fire_pulse(&mut world, 0);
        for _ in 0..10 {
            world.tick();
        }

        let target_body = world.entity(target).unwrap();
        assert_eq!(target_body.as_actor().unwrap().phase, ActorPhase::Dead);
        // The dead ship stays on the board; the projectile does not
        assert!(live_projectiles(&world).is_empty());
        // The shooter was never hit by its own shot
        assert!(world.entity(shooter).unwrap().as_actor().unwrap().is_active());
    }

    #[test]
    fn test_projectile_destroyed_by_wall() {
        let mut world = world();
        let wall_id = world
            .spawn_wall(Vec2::new(15.0, 21.0), Vec2::new(25.0, 21.0))
            .unwrap();
        place_actor(&mut world, 0, Vec2::new(20.0, 20.0), 0.0);

        fire_pulse(&mut world, 0);
        for _ in 0..8 {
            world.tick();
        }

        assert!(live_projectiles(&world).is_empty());
        assert!(world.contains(wall_id));
    }

    #[test]
    fn test_slot_occupancy_and_respawn() {
        let mut world = world();
        let first = world.spawn_actor(0).unwrap();
        // Same slot while the first is still pending
        assert_eq!(world.spawn_actor(0), Err(SpawnError::SlotOccupied(0)));
        world.tick();
        // ... and while it is live
        assert_eq!(world.spawn_actor(0), Err(SpawnError::SlotOccupied(0)));

        // A dead ship makes room and is cleared by the respawn
        world
            .entities
            .iter_mut()
            .find(|b| b.id == first)
            .and_then(|b| b.as_actor_mut())
            .unwrap()
            .phase = ActorPhase::Dead;
        let second = world.spawn_actor(0).unwrap();
        world.tick();
        assert!(!world.contains(first));
        assert!(world.contains(second));
    }

    #[test]
    fn test_slot_out_of_range() {
        let world = world();
        assert_eq!(
            world.spawn_actor(MAX_PLAYERS as u8),
            Err(SpawnError::SlotOutOfRange(MAX_PLAYERS as u8))
        );
    }

    #[test]
    fn test_activation_places_ship_on_board() {
        let mut world = world();
        let id = world.spawn_actor(2).unwrap();

        // Not placed yet: invisible to the renderer
        world.tick();
        assert!(world.frame().is_empty());

        assert!(world.activate_actor(id));
        // Second activation is a no-op
        assert!(!world.activate_actor(id));
        world.tick();

        let body = world.entity(id).unwrap();
        let board = world.tuning().board();
        assert!(body.pos.x >= 1.0 && body.pos.x < board.x);
        assert!(body.pos.y >= 1.0 && body.pos.y < board.y);
        assert!(body.as_actor().unwrap().is_active());
        assert_eq!(world.frame().len(), 1);
    }

    #[test]
    fn test_activation_of_unknown_id() {
        let mut world = world();
        assert!(!world.activate_actor(777));
    }

    #[test]
    fn test_render_frame_contents() {
        let mut world = world();
        world.load_level(Level::Alleyway).unwrap();
        let ship = place_actor(&mut world, 1, Vec2::new(20.0, 5.0), 45.0);
        world.tick();

        let frame = world.frame();
        assert_eq!(frame.len(), 4); // 3 walls + 1 ship

        let walls: Vec<_> = frame
            .iter()
            .filter(|c| c.model.primitive == Primitive::LineStrip)
            .collect();
        assert_eq!(walls.len(), 3);
        for wall in &walls {
            assert_eq!(wall.translation, Vec2::ZERO);
            assert_eq!(wall.color, colors::WALL);
        }

        let ships: Vec<_> = frame
            .iter()
            .filter(|c| c.model.primitive == Primitive::TriangleList)
            .collect();
        assert_eq!(ships.len(), 1);
        assert_eq!(ships[0].color, colors::PLAYERS[1]);
        assert_eq!(ships[0].translation, world.entity(ship).unwrap().pos);
    }

    #[test]
    fn test_dead_ship_renders_distinct() {
        let mut world = world();
        let id = place_actor(&mut world, 0, Vec2::new(20.0, 20.0), 0.0);
        world
            .entities
            .iter_mut()
            .find(|b| b.id == id)
            .and_then(|b| b.as_actor_mut())
            .unwrap()
            .phase = ActorPhase::Dead;
        world.tick();

        let frame = world.frame();
        assert_eq!(frame.len(), 1);
        assert_eq!(frame[0].color, colors::DEAD);
    }

    #[test]
    fn test_dead_ship_neither_moves_nor_fires() {
        let mut world = world();
        let id = place_actor(&mut world, 0, Vec2::new(20.0, 20.0), 45.0);
        world
            .entities
            .iter_mut()
            .find(|b| b.id == id)
            .and_then(|b| b.as_actor_mut())
            .unwrap()
            .phase = ActorPhase::Dead;

        let hub = world.input();
        hub.set_move_stick(0, 0.0, 1.0);
        hub.set_fire_held(0, true);
        world.tick();
        world.tick();

        let body = world.entity(id).unwrap();
        assert_eq!(body.pos, Vec2::new(20.0, 20.0));
        assert!(live_projectiles(&world).is_empty());
        // The heading snap still applies to a dead ship
        assert!((body.rotation - 0.0).abs() < 1e-4);
    }

    #[test]
    fn test_movement_wraps_around_the_board() {
        let mut world = world();
        let id = place_actor(&mut world, 0, Vec2::new(0.05, 20.0), 0.0);

        // Full deflection toward -x
        world.input().set_move_stick(0, -1.0, 0.0);
        world.tick();

        let body = world.entity(id).unwrap();
        assert!(
            body.pos.x > 39.9,
            "expected wrap to the far edge, got {}",
            body.pos.x
        );
    }

    #[test]
    fn test_seeded_worlds_agree() {
        let mut w1 = World::new(7, Tuning::default());
        let mut w2 = World::new(7, Tuning::default());
        for world in [&mut w1, &mut w2] {
            let a = world.spawn_actor(0).unwrap();
            world.activate_actor(a);
            let b = world.spawn_actor(1).unwrap();
            world.activate_actor(b);
            world.tick();
        }
        for (b1, b2) in w1.entities.iter().zip(w2.entities.iter()) {
            assert_eq!(b1.pos, b2.pos);
            assert_eq!(b1.rotation, b2.rotation);
        }
    }
}
