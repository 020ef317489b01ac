//! Narrow-phase collision detection between convex 2D hitboxes.
//!
//! Overlap is decided with GJK over the Minkowski difference of two shapes,
//! penetration depth and the minimum translation vector with EPA.
//! `Cosmos` wires hitbox providers together with brute-force pairwise queries.

pub mod body;
pub mod config;
pub mod cosmos;
pub mod error;
pub mod narrow;

#[cfg(not(feature = "f64"))]
pub type Fp = f32;
#[cfg(not(feature = "f64"))]
pub type Vec2 = glam::Vec2;

#[cfg(feature = "f64")]
pub type Fp = f64;
#[cfg(feature = "f64")]
pub type Vec2 = glam::DVec2;

pub use body::{Body, Hitbox, ObjectKind, WorldObject};
pub use config::CollideConfig;
pub use cosmos::{BodyId, Contact, Cosmos, Other};
pub use error::{ConfigError, ShapeError};
pub use narrow::{check_collision, check_collision_with, collide, Aabb, Intersection, Shape};
