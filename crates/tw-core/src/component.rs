use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Vec2;
use crate::entity::EntityId;
use crate::error::{CoreError, CoreResult};

// ---------------------------------------------------------------------------
// Collidable
// ---------------------------------------------------------------------------

/// Geometric extent of a collidable entity, centred on its position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// A circle with the given radius.
    Circle {
        /// Distance from the centre to the edge.
        radius: f64,
    },
    /// An axis-aligned rectangle.
    Rect {
        /// Half the width (`x`) and half the height (`y`).
        half_extents: Vec2,
    },
}

impl Shape {
    /// Shorthand for a circle.
    pub fn circle(radius: f64) -> Self {
        Self::Circle { radius }
    }

    /// Shorthand for a rectangle given its half width and half height.
    pub fn rect(half_width: f64, half_height: f64) -> Self {
        Self::Rect {
            half_extents: Vec2::new(half_width, half_height),
        }
    }

    /// Reject negative, zero, or non-finite extents.
    pub fn validate(&self) -> CoreResult<()> {
        match self {
            Self::Circle { radius } => {
                if !radius.is_finite() || *radius <= 0.0 {
                    return Err(CoreError::Validation(format!(
                        "circle radius must be positive and finite, got {radius}"
                    )));
                }
            }
            Self::Rect { half_extents } => {
                if !half_extents.is_finite() || half_extents.min_element() <= 0.0 {
                    return Err(CoreError::Validation(format!(
                        "rect half extents must be positive and finite, got ({}, {})",
                        half_extents.x, half_extents.y
                    )));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circle { radius } => write!(f, "circle r={radius}"),
            Self::Rect { half_extents } => {
                write!(f, "rect {}x{}", half_extents.x * 2.0, half_extents.y * 2.0)
            }
        }
    }
}

/// Marks an entity as eligible for overlap testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collidable {
    /// The entity's collision geometry.
    pub shape: Shape,
}

// ---------------------------------------------------------------------------
// Movable
// ---------------------------------------------------------------------------

/// Where a movable entity is heading.
///
/// `Entity` is a live, non-owning reference: the target is looked up in the
/// registry every tick, so the mover follows the other entity as it moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetRef {
    /// A fixed coordinate.
    Point(Vec2),
    /// Another entity's current position.
    Entity(EntityId),
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point(p) => write!(f, "({:.2}, {:.2})", p.x, p.y),
            Self::Entity(id) => write!(f, "follow {id}"),
        }
    }
}

/// Marks an entity as moving toward a target each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Movable {
    /// Where the entity is heading.
    pub target: TargetRef,
    /// Distance covered per millisecond of simulated time.
    pub speed: f64,
}
