use tw_core::{Entity, EntityId, Registry, Shape, Vec2};

use crate::context::SimContext;
use crate::event::SimEventKind;
use crate::task::{Task, TaskStatus};

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Whether two shapes centred at the given positions overlap.
///
/// All tests are strict: shapes that only touch do not overlap. The result
/// does not depend on argument order.
pub fn overlaps(a_pos: Vec2, a: &Shape, b_pos: Vec2, b: &Shape) -> bool {
    match (a, b) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            let dx = b_pos.x - a_pos.x;
            let dy = b_pos.y - a_pos.y;
            let radii = ra + rb;
            dx * dx + dy * dy < radii * radii
        }
        (Shape::Rect { half_extents: ha }, Shape::Rect { half_extents: hb }) => {
            (b_pos.x - a_pos.x).abs() < ha.x + hb.x && (b_pos.y - a_pos.y).abs() < ha.y + hb.y
        }
        (Shape::Circle { radius }, Shape::Rect { half_extents }) => {
            circle_rect_overlap(a_pos, *radius, b_pos, *half_extents)
        }
        (Shape::Rect { half_extents }, Shape::Circle { radius }) => {
            circle_rect_overlap(b_pos, *radius, a_pos, *half_extents)
        }
    }
}

fn circle_rect_overlap(center: Vec2, radius: f64, rect_pos: Vec2, half_extents: Vec2) -> bool {
    let closest = center.clamp(rect_pos - half_extents, rect_pos + half_extents);
    center.distance_squared(closest) < radius * radius
}

/// Whether two entities overlap. Entities without a collider never do.
pub fn entities_overlap(a: &Entity, b: &Entity) -> bool {
    match (a.shape(), b.shape()) {
        (Some(sa), Some(sb)) => overlaps(a.position, sa, b.position, sb),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Pair enumeration
// ---------------------------------------------------------------------------

/// Lazily yields every unordered pair of distinct collidable entities once.
///
/// Pairs come out as `(a, b)` with `a.id < b.id`, in lexicographic ID order.
#[derive(Debug, Clone)]
pub struct CandidatePairs<'a> {
    items: Vec<&'a Entity>,
    i: usize,
    j: usize,
}

impl<'a> Iterator for CandidatePairs<'a> {
    type Item = (&'a Entity, &'a Entity);

    fn next(&mut self) -> Option<Self::Item> {
        while self.i < self.items.len() {
            if self.j < self.items.len() {
                let pair = (self.items[self.i], self.items[self.j]);
                self.j += 1;
                debug_assert!(pair.0.id < pair.1.id);
                return Some(pair);
            }
            self.i += 1;
            self.j = self.i + 1;
        }
        None
    }
}

/// Every unordered pair of collidable entities. Non-collidables are dropped
/// before pairing, so `n` collidables give exactly `n * (n - 1) / 2` pairs.
pub fn candidate_pairs(registry: &Registry) -> CandidatePairs<'_> {
    CandidatePairs {
        items: registry.collidables().collect(),
        i: 0,
        j: 1,
    }
}

/// IDs of the overlapping pairs among the current collidables.
pub fn colliding_pairs(registry: &Registry) -> impl Iterator<Item = (EntityId, EntityId)> + '_ {
    candidate_pairs(registry)
        .filter(|(a, b)| entities_overlap(a, b))
        .map(|(a, b)| (a.id, b.id))
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// Scheduled task reporting every overlapping pair, every tick.
///
/// Detection only: entity state is never touched. Each hit becomes a
/// [`SimEventKind::Collision`] event, and the pairs from the latest tick stay
/// readable through [`CollisionTask::last_pairs`].
#[derive(Debug, Default)]
pub struct CollisionTask {
    last_pairs: Vec<(EntityId, EntityId)>,
    total_hits: u64,
}

impl CollisionTask {
    /// Create the task.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs found during the most recent tick.
    pub fn last_pairs(&self) -> &[(EntityId, EntityId)] {
        &self.last_pairs
    }

    /// Pairs reported across all ticks, counting repeats.
    pub fn total_hits(&self) -> u64 {
        self.total_hits
    }
}

impl Task for CollisionTask {
    fn name(&self) -> &str {
        "collision"
    }

    fn step(&mut self, ctx: &mut SimContext<'_>) -> TaskStatus {
        self.last_pairs = colliding_pairs(ctx.registry).collect();
        self.total_hits += self.last_pairs.len() as u64;
        for &(a, b) in &self.last_pairs {
            log::info!("{a} hit {b}");
            ctx.emit(SimEventKind::Collision { a, b }, format!("{a} hit {b}"));
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

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use tw_core::EntitySpec;

    use super::*;

    fn circle(r: f64) -> Shape {
        Shape::circle(r)
    }

    #[test]
    fn circles_overlap_strictly() {
        let a = Vec2::ZERO;
        assert!(overlaps(a, &circle(5.0), Vec2::new(9.9, 0.0), &circle(5.0)));
        // Exactly touching is not a collision.
        assert!(!overlaps(a, &circle(5.0), Vec2::new(10.0, 0.0), &circle(5.0)));
        assert!(!overlaps(a, &circle(5.0), Vec2::new(10.0, 10.0), &circle(5.0)));
    }

    #[test]
    fn rects_overlap_on_both_axes() {
        let r = Shape::rect(70.0, 95.0);
        assert!(overlaps(Vec2::new(100.0, 100.0), &r, Vec2::new(150.0, 150.0), &r));
        assert!(!overlaps(Vec2::new(100.0, 100.0), &r, Vec2::new(300.0, 300.0), &r));
        // Overlap on x only.
        assert!(!overlaps(Vec2::ZERO, &r, Vec2::new(10.0, 190.0), &r));
        // Edges touching.
        assert!(!overlaps(Vec2::ZERO, &r, Vec2::new(140.0, 0.0), &r));
    }

    #[test]
    fn circle_against_rect() {
        let rect = Shape::rect(2.0, 2.0);
        // Circle near the corner but outside it.
        assert!(!overlaps(Vec2::new(3.0, 3.0), &circle(1.0), Vec2::ZERO, &rect));
        assert!(overlaps(Vec2::new(2.5, 0.0), &circle(1.0), Vec2::ZERO, &rect));
        assert!(overlaps(Vec2::ZERO, &rect, Vec2::new(2.5, 0.0), &circle(1.0)));
        // Circle centre inside the rect.
        assert!(overlaps(Vec2::new(0.5, 0.5), &circle(0.1), Vec2::ZERO, &rect));
        // Touching an edge.
        assert!(!overlaps(Vec2::new(3.0, 0.0), &circle(1.0), Vec2::ZERO, &rect));
    }

    #[test]
    fn non_collidables_are_excluded_before_pairing() {
        let mut reg = Registry::new();
        reg.spawn(EntitySpec::at(0.0, 0.0).circle(5.0)).unwrap();
        reg.spawn(EntitySpec::at(0.0, 0.0)).unwrap();
        reg.spawn(EntitySpec::at(1.0, 0.0).circle(5.0)).unwrap();

        let pairs: Vec<_> = candidate_pairs(&reg).map(|(a, b)| (a.id.0, b.id.0)).collect();
        assert_eq!(pairs, vec![(0, 2)]);
        let hits: Vec<_> = colliding_pairs(&reg).collect();
        assert_eq!(hits, vec![(EntityId(0), EntityId(2))]);
    }

    #[test]
    fn pairs_come_out_in_canonical_order() {
        let mut reg = Registry::new();
        for _ in 0..4 {
            reg.spawn(EntitySpec::at(0.0, 0.0).circle(1.0)).unwrap();
        }
        let pairs: Vec<_> = candidate_pairs(&reg).map(|(a, b)| (a.id.0, b.id.0)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn empty_and_single_registries_have_no_pairs() {
        let mut reg = Registry::new();
        assert_eq!(candidate_pairs(&reg).count(), 0);
        reg.spawn(EntitySpec::at(0.0, 0.0).circle(1.0)).unwrap();
        assert_eq!(candidate_pairs(&reg).count(), 0);
    }

    #[test]
    fn detection_leaves_positions_alone() {
        let mut reg = Registry::new();
        reg.spawn(EntitySpec::at(0.0, 0.0).circle(5.0)).unwrap();
        reg.spawn(EntitySpec::at(1.0, 1.0).circle(5.0)).unwrap();
        let before: Vec<_> = reg.iter().cloned().collect();
        let _ = colliding_pairs(&reg).count();
        let after: Vec<_> = reg.iter().cloned().collect();
        assert_eq!(before, after);
    }

    fn shape_strategy() -> impl Strategy<Value = Shape> {
        prop_oneof![
            (0.1f64..50.0).prop_map(Shape::circle),
            (0.1f64..50.0, 0.1f64..50.0).prop_map(|(w, h)| Shape::rect(w, h)),
        ]
    }

    proptest! {
        #[test]
        fn pair_enumeration_is_unique_and_complete(
            collidable in proptest::collection::vec(any::<bool>(), 0..24),
        ) {
            let mut reg = Registry::new();
            for &c in &collidable {
                let spec = EntitySpec::at(0.0, 0.0);
                reg.spawn(if c { spec.circle(1.0) } else { spec }).unwrap();
            }
            let n = collidable.iter().filter(|c| **c).count();

            let pairs: Vec<_> = candidate_pairs(&reg).map(|(a, b)| (a.id, b.id)).collect();
            prop_assert_eq!(pairs.len(), n * n.saturating_sub(1) / 2);

            let mut seen = HashSet::new();
            for (a, b) in pairs {
                prop_assert!(a < b);
                prop_assert!(seen.insert((a, b)));
            }
        }

        #[test]
        fn overlap_is_symmetric(
            ax in -100.0f64..100.0,
            ay in -100.0f64..100.0,
            bx in -100.0f64..100.0,
            by in -100.0f64..100.0,
            sa in shape_strategy(),
            sb in shape_strategy(),
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(overlaps(a, &sa, b, &sb), overlaps(b, &sb, a, &sa));
        }
    }
}
