use tw_core::{EntityId, Movable, Registry, Vec2};

use crate::context::SimContext;
use crate::event::SimEventKind;
use crate::task::{Task, TaskStatus};

/// Move `position` toward `target` by `speed * delta`, landing exactly on the
/// target when the step would reach or pass it.
///
/// A negative `delta` (time running backward) produces no motion.
pub fn advance(position: Vec2, target: Vec2, speed: f64, delta: f64) -> Vec2 {
    let dx = target.x - position.x;
    let dy = target.y - position.y;
    let remaining_sq = dx * dx + dy * dy;
    let step = delta.max(0.0) * speed;

    if step * step >= remaining_sq {
        return target;
    }

    let heading = dy.atan2(dx);
    Vec2::new(
        position.x + heading.cos() * step,
        position.y + heading.sin() * step,
    )
}

/// Advance every movable entity by one tick of `delta` milliseconds.
///
/// Movers are processed in ascending ID order, and entity targets are
/// resolved against positions already updated earlier in the same pass.
/// Movers whose followed entity no longer exists are left in place.
/// Returns the entities that landed on their target during this call.
pub fn integrate(registry: &mut Registry, delta: f64) -> Vec<EntityId> {
    let movers: Vec<(EntityId, Movable)> = registry
        .movables()
        .filter_map(|e| e.mover.map(|m| (e.id, m)))
        .collect();

    let mut arrived = Vec::new();
    for (id, mover) in movers {
        let Some(target) = registry.resolve_target(&mover.target) else {
            log::debug!("{id} has no resolvable target ({})", mover.target);
            continue;
        };
        let Some(entity) = registry.get_mut(id) else {
            continue;
        };
        let before = entity.position;
        entity.position = advance(before, target, mover.speed, delta);
        if before != target && entity.position == target {
            arrived.push(id);
        }
    }
    arrived
}

/// Scheduled task running the motion integrator every tick.
#[derive(Debug, Default)]
pub struct MotionTask {
    arrivals: u64,
}

impl MotionTask {
    /// Create the task.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total arrivals observed since the task started.
    pub fn arrivals(&self) -> u64 {
        self.arrivals
    }
}

impl Task for MotionTask {
    fn name(&self) -> &str {
        "motion"
    }

    fn step(&mut self, ctx: &mut SimContext<'_>) -> TaskStatus {
        let delta = ctx.delta();
        for id in integrate(ctx.registry, delta) {
            self.arrivals += 1;
            log::info!("{id} arrived at its target");
            ctx.emit(
                SimEventKind::Arrived { entity: id },
                format!("{id} arrived"),
            );
        }
        TaskStatus::Continue
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
