use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Vec2;
use crate::component::{Collidable, Movable, Shape, TargetRef};
use crate::error::{CoreError, CoreResult};

/// Speed given to movers created without an explicit one (distance per ms).
pub const DEFAULT_SPEED: f64 = 0.005;

/// Unique identifier for every entity in a registry.
///
/// Assigned in strictly increasing creation order and never reused, so the
/// natural ordering doubles as the canonical order for pair enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A simulated entity: a position plus optional capability components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Registry-assigned identifier.
    pub id: EntityId,
    /// Current centre, advanced by the motion integrator.
    pub position: Vec2,
    /// Present when the entity takes part in collision tests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collider: Option<Collidable>,
    /// Present when the entity moves toward a target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mover: Option<Movable>,
}

impl Entity {
    /// Whether this entity is considered for collision tests.
    pub fn is_collidable(&self) -> bool {
        self.collider.is_some()
    }

    /// Whether this entity is moved each tick.
    pub fn is_movable(&self) -> bool {
        self.mover.is_some()
    }

    /// The collision shape, if any.
    pub fn shape(&self) -> Option<&Shape> {
        self.collider.as_ref().map(|c| &c.shape)
    }
}

/// A request to create an entity. The registry assigns the ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpec {
    /// Starting position.
    pub position: Vec2,
    /// Collision shape; omit for a non-collidable entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,
    /// Movement target; omit for a stationary entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetRef>,
    /// Movement speed; falls back to the registry default when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl EntitySpec {
    /// Start a spec at the given position with no components.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Vec2::new(x, y),
            shape: None,
            target: None,
            speed: None,
        }
    }

    /// Attach a circular collider.
    pub fn circle(self, radius: f64) -> Self {
        self.shape(Shape::circle(radius))
    }

    /// Attach a collider with the given shape.
    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Move toward a fixed point.
    pub fn toward(mut self, x: f64, y: f64) -> Self {
        self.target = Some(TargetRef::Point(Vec2::new(x, y)));
        self
    }

    /// Follow another entity's position.
    pub fn following(mut self, id: EntityId) -> Self {
        self.target = Some(TargetRef::Entity(id));
        self
    }

    /// Set the movement speed (distance per millisecond).
    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Check the spec's own values. Entity references are checked by the registry.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.position.is_finite() {
            return Err(CoreError::Validation(format!(
                "position must be finite, got ({}, {})",
                self.position.x, self.position.y
            )));
        }
        if let Some(shape) = &self.shape {
            shape.validate()?;
        }
        if let Some(TargetRef::Point(p)) = &self.target
            && !p.is_finite()
        {
            return Err(CoreError::Validation(format!(
                "target must be finite, got ({}, {})",
                p.x, p.y
            )));
        }
        if let Some(speed) = self.speed
            && (!speed.is_finite() || speed < 0.0)
        {
            return Err(CoreError::Validation(format!(
                "speed must be non-negative and finite, got {speed}"
            )));
        }
        Ok(())
    }

    /// Build the entity with the given ID, filling in the default speed.
    pub(crate) fn into_entity(self, id: EntityId, default_speed: f64) -> Entity {
        Entity {
            id,
            position: self.position,
            collider: self.shape.map(|shape| Collidable { shape }),
            mover: self.target.map(|target| Movable {
                target,
                speed: self.speed.unwrap_or(default_speed),
            }),
        }
    }
}
