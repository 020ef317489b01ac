//! Runtime tuning for the GJK and EPA loops.

use crate::{error::ConfigError, Fp, Vec2};

/// GJK's hard iteration cap. Exceeding it is an invariant violation.
pub const GJK_MAX_ITERATIONS: usize = 64;
/// Minimum progress, per unit of search direction, a GJK support point must make.
pub const GJK_TOLERANCE: Fp = 1e-5;
/// EPA convergence threshold on the distance between the closest edge and the new support point.
pub const EPA_TOLERANCE: Fp = 1e-4;
/// EPA polytope size cap. Reaching it returns the best estimate found so far.
pub const EPA_MAX_VERTICES: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollideConfig {
    /// First GJK search direction. Changes the iteration count, not the outcome.
    pub initial_direction: Vec2,
    pub gjk_max_iterations: usize,
    pub gjk_tolerance: Fp,
    pub epa_tolerance: Fp,
    pub epa_max_vertices: usize,
}

impl Default for CollideConfig {
    fn default() -> Self {
        CollideConfig {
            initial_direction: Vec2::new(-1.0, 0.0),
            gjk_max_iterations: GJK_MAX_ITERATIONS,
            gjk_tolerance: GJK_TOLERANCE,
            epa_tolerance: EPA_TOLERANCE,
            epa_max_vertices: EPA_MAX_VERTICES,
        }
    }
}

impl CollideConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dir = self.initial_direction;
        if !dir.is_finite() || dir.length_squared() == 0.0 {
            return Err(ConfigError::ZeroDirection);
        }
        if self.gjk_max_iterations < 1 {
            return Err(ConfigError::CapTooSmall {
                name: "gjk_max_iterations",
                min: 1,
                value: self.gjk_max_iterations,
            });
        }
        // the seed triangle already holds three vertices
        if self.epa_max_vertices < 3 {
            return Err(ConfigError::CapTooSmall {
                name: "epa_max_vertices",
                min: 3,
                value: self.epa_max_vertices,
            });
        }
        let tolerances = [
            ("gjk_tolerance", self.gjk_tolerance),
            ("epa_tolerance", self.epa_tolerance),
        ];
        for &(name, value) in &tolerances {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTolerance { name, value });
            }
        }
        Ok(())
    }

    pub fn with_initial_direction(mut self, dir: Vec2) -> Self {
        self.initial_direction = dir;
        self
    }
    pub fn with_gjk_max_iterations(mut self, cap: usize) -> Self {
        self.gjk_max_iterations = cap;
        self
    }
    pub fn with_epa_tolerance(mut self, tolerance: Fp) -> Self {
        self.epa_tolerance = tolerance;
        self
    }
    pub fn with_epa_max_vertices(mut self, cap: usize) -> Self {
        self.epa_max_vertices = cap;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(CollideConfig::default().validate(), Ok(()));
        assert_eq!(CollideConfig::default().initial_direction, Vec2::new(-1.0, 0.0));
        assert_eq!(CollideConfig::default().epa_max_vertices, 50);
    }

    #[test]
    fn rejects_bad_values() {
        let zero_dir = CollideConfig::default().with_initial_direction(Vec2::ZERO);
        assert_eq!(zero_dir.validate(), Err(ConfigError::ZeroDirection));

        let tiny_cap = CollideConfig::default().with_epa_max_vertices(2);
        assert!(matches!(
            tiny_cap.validate(),
            Err(ConfigError::CapTooSmall { name: "epa_max_vertices", min: 3, value: 2 })
        ));

        let no_iterations = CollideConfig::default().with_gjk_max_iterations(0);
        assert_eq!(
            no_iterations.validate(),
            Err(ConfigError::CapTooSmall { name: "gjk_max_iterations", min: 1, value: 0 })
        );
        assert_eq!(CollideConfig::default().with_gjk_max_iterations(1).validate(), Ok(()));

        let negative = CollideConfig::default().with_epa_tolerance(-1.0);
        assert!(matches!(
            negative.validate(),
            Err(ConfigError::InvalidTolerance { name: "epa_tolerance", .. })
        ));

        let nan = CollideConfig::default().with_epa_tolerance(Fp::NAN);
        assert!(nan.validate().is_err());
    }
}
