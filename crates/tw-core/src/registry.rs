use crate::Vec2;
use crate::component::TargetRef;
use crate::entity::{DEFAULT_SPEED, Entity, EntityId, EntitySpec};
use crate::error::{CoreError, CoreResult};

/// The live set of simulated entities.
///
/// Entities are stored in ascending ID order. IDs come from a monotonic
/// counter and are never handed out twice, even after a despawn.
#[derive(Debug, Clone)]
pub struct Registry {
    entities: Vec<Entity>,
    next_id: u64,
    default_speed: f64,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry using [`DEFAULT_SPEED`] for movers without a speed.
    pub fn new() -> Self {
        Self::with_default_speed(DEFAULT_SPEED)
    }

    /// Create an empty registry with a custom fallback speed.
    pub fn with_default_speed(default_speed: f64) -> Self {
        Self {
            entities: Vec::new(),
            next_id: 0,
            default_speed,
        }
    }

    /// Speed assigned to movers spawned without one.
    pub fn default_speed(&self) -> f64 {
        self.default_speed
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Validate and add an entity. Returns the freshly assigned ID.
    ///
    /// A spec that targets another entity must name one that is currently live.
    pub fn spawn(&mut self, spec: EntitySpec) -> CoreResult<EntityId> {
        spec.validate()?;
        if let Some(TargetRef::Entity(target)) = spec.target
            && !self.contains(target)
        {
            return Err(CoreError::Validation(format!(
                "target entity {target} does not exist"
            )));
        }

        let id = EntityId(self.next_id);
        self.next_id += 1;
        let entity = spec.into_entity(id, self.default_speed);
        log::debug!(
            "spawned {id} at ({:.2}, {:.2}) collidable={} movable={}",
            entity.position.x,
            entity.position.y,
            entity.is_collidable(),
            entity.is_movable()
        );
        self.entities.push(entity);
        Ok(id)
    }

    /// Remove an entity. Movers following it stop until retargeted.
    pub fn despawn(&mut self, id: EntityId) -> CoreResult<Entity> {
        let index = self.index_of(id).ok_or(CoreError::EntityNotFound(id))?;
        log::debug!("despawned {id}");
        Ok(self.entities.remove(index))
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|i| &self.entities[i])
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.index_of(id).map(|i| &mut self.entities[i])
    }

    /// Whether an entity with this ID is live.
    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_some()
    }

    /// Current position of an entity.
    pub fn position(&self, id: EntityId) -> Option<Vec2> {
        self.get(id).map(|e| e.position)
    }

    /// Resolve a target to a coordinate. `None` when the followed entity is gone.
    pub fn resolve_target(&self, target: &TargetRef) -> Option<Vec2> {
        match target {
            TargetRef::Point(p) => Some(*p),
            TargetRef::Entity(id) => self.position(*id),
        }
    }

    /// Move an entity to a new position.
    pub fn set_position(&mut self, id: EntityId, position: Vec2) -> CoreResult<()> {
        let entity = self.get_mut(id).ok_or(CoreError::EntityNotFound(id))?;
        entity.position = position;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Iteration
    // -----------------------------------------------------------------------

    /// All entities in ascending ID order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Entities carrying a collider, in ascending ID order.
    pub fn collidables(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_collidable())
    }

    /// Entities carrying a mover, in ascending ID order.
    pub fn movables(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_movable())
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the registry holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_from_zero() {
        let mut reg = Registry::new();
        let a = reg.spawn(EntitySpec::at(0.0, 0.0)).unwrap();
        let b = reg.spawn(EntitySpec::at(1.0, 1.0)).unwrap();
        let c = reg.spawn(EntitySpec::at(2.0, 2.0)).unwrap();
        assert_eq!((a, b, c), (EntityId(0), EntityId(1), EntityId(2)));
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn ids_are_not_reused_after_despawn() {
        let mut reg = Registry::new();
        let a = reg.spawn(EntitySpec::at(0.0, 0.0)).unwrap();
        let b = reg.spawn(EntitySpec::at(0.0, 0.0)).unwrap();
        reg.despawn(b).unwrap();
        let c = reg.spawn(EntitySpec::at(0.0, 0.0)).unwrap();
        assert_eq!(a, EntityId(0));
        assert_eq!(c, EntityId(2));
        assert!(!reg.contains(b));
        let ids: Vec<_> = reg.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EntityId(0), EntityId(2)]);
    }

    #[test]
    fn despawn_missing_entity_fails() {
        let mut reg = Registry::new();
        assert_eq!(
            reg.despawn(EntityId(9)).unwrap_err(),
            CoreError::EntityNotFound(EntityId(9))
        );
    }

    #[test]
    fn spawn_rejects_invalid_spec() {
        let mut reg = Registry::new();
        let err = reg.spawn(EntitySpec::at(0.0, 0.0).circle(-1.0)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        // Rejected specs do not consume an ID.
        assert_eq!(reg.spawn(EntitySpec::at(0.0, 0.0)).unwrap(), EntityId(0));
    }

    #[test]
    fn spawn_rejects_dangling_entity_target() {
        let mut reg = Registry::new();
        let err = reg
            .spawn(EntitySpec::at(0.0, 0.0).following(EntityId(5)))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn resolve_target_tracks_live_position() {
        let mut reg = Registry::new();
        let leader = reg.spawn(EntitySpec::at(1.0, 2.0)).unwrap();
        let target = TargetRef::Entity(leader);
        assert_eq!(reg.resolve_target(&target), Some(Vec2::new(1.0, 2.0)));

        reg.set_position(leader, Vec2::new(5.0, 6.0)).unwrap();
        assert_eq!(reg.resolve_target(&target), Some(Vec2::new(5.0, 6.0)));

        reg.despawn(leader).unwrap();
        assert_eq!(reg.resolve_target(&target), None);
        assert_eq!(
            reg.resolve_target(&TargetRef::Point(Vec2::ONE)),
            Some(Vec2::ONE)
        );
    }

    #[test]
    fn component_filters() {
        let mut reg = Registry::new();
        reg.spawn(EntitySpec::at(0.0, 0.0).circle(1.0)).unwrap();
        reg.spawn(EntitySpec::at(0.0, 0.0).toward(1.0, 1.0)).unwrap();
        reg.spawn(EntitySpec::at(0.0, 0.0)).unwrap();
        reg.spawn(EntitySpec::at(0.0, 0.0).circle(1.0).toward(2.0, 2.0))
            .unwrap();

        let collidable: Vec<_> = reg.collidables().map(|e| e.id.0).collect();
        let movable: Vec<_> = reg.movables().map(|e| e.id.0).collect();
        assert_eq!(collidable, vec![0, 3]);
        assert_eq!(movable, vec![1, 3]);
    }

    #[test]
    fn custom_default_speed_applies() {
        let mut reg = Registry::with_default_speed(0.25);
        let id = reg.spawn(EntitySpec::at(0.0, 0.0).toward(1.0, 0.0)).unwrap();
        assert_eq!(reg.get(id).unwrap().mover.unwrap().speed, 0.25);
    }
}
