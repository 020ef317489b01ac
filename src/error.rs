use crate::Fp;
use thiserror::Error;

/// Reasons a `Shape` cannot be built from the given geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("polygon hitbox requires at least one vertex")]
    EmptyPolygon,
    #[error("polygon vertex {index} is not finite")]
    NonFiniteVertex { index: usize },
    #[error("ellipse center is not finite")]
    NonFiniteCenter,
    #[error("ellipse radii ({x}, {y}) must be finite and non-negative")]
    InvalidRadii { x: Fp, y: Fp },
}

/// Reasons a `CollideConfig` is unusable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial search direction must be finite and non-zero")]
    ZeroDirection,
    #[error("{name} must be at least {min}, got {value}")]
    CapTooSmall { name: &'static str, min: usize, value: usize },
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidTolerance { name: &'static str, value: Fp },
}
