//! Core types for Tickwork: entities, components, and the entity registry.
//!
//! This crate defines the data model the simulation operates on. It knows
//! nothing about time or scheduling; you can build a [`Registry`]
//! programmatically or deserialize [`EntitySpec`]s from JSON and spawn them.

/// Optional capability components: collision shapes and movement targets.
pub mod component;
/// Entity identifiers, entities, and creation requests.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// The registry that owns every live entity.
pub mod registry;

/// Re-export of [`glam::DVec2`] as the crate's 2D coordinate type.
pub use glam::DVec2 as Vec2;

/// Re-export component types.
pub use component::{Collidable, Movable, Shape, TargetRef};
/// Re-export core entity types.
pub use entity::{DEFAULT_SPEED, Entity, EntityId, EntitySpec};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the registry.
pub use registry::Registry;
