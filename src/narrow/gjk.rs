//! GJK overlap test over the Minkowski difference of two shapes.

use super::Shape;
use crate::{config::CollideConfig, Vec2};
use tracing::{debug, error, trace};

#[inline]
pub fn triple_product(a: Vec2, b: Vec2, c: Vec2) -> Vec2 {
    //! Returns `(a × b) × c`, with the operands lifted onto the z = 0 plane.
    c.perp() * a.perp_dot(b)
}

#[inline]
pub fn minkowski_support(a: &Shape, b: &Shape, dir: Vec2) -> Vec2 {
    //! Returns the point of the Minkowski difference `a - b` farthest along `dir`.
    a.support(dir) - b.support(-dir)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The origin lies outside the Minkowski difference, or within tolerance of its boundary.
    Separated,
    /// The origin lies exactly on the boundary of the Minkowski difference.
    Touching,
    /// A triangle of Minkowski points, oldest first, enclosing the origin.
    Enclosed([Vec2; 3]),
}

/// Ordered Minkowski points, oldest first. Never exceeds three.
#[derive(Debug, Clone)]
struct Simplex {
    points: Vec<Vec2>,
}

enum Step {
    Continue,
    Touching,
    Enclosed([Vec2; 3]),
}

impl Simplex {
    fn new(first: Vec2) -> Simplex {
        let mut points = Vec::with_capacity(3);
        points.push(first);
        Simplex { points }
    }

    #[inline]
    fn len(&self) -> usize {
        self.points.len()
    }
    #[inline]
    fn newest(&self) -> Vec2 {
        self.points[self.points.len() - 1]
    }

    fn push_and_evolve(&mut self, point: Vec2, dir: &mut Vec2) -> Step {
        //! Appends `point`, then either prunes the simplex to the feature nearest the origin and
        //! points `dir` at the origin from it, or reports the origin as enclosed.
        self.points.push(point);
        match self.points.len() {
            2 => {
                let a = self.points[1];
                let ab = self.points[0] - a;
                let ao = -a;
                if ab == Vec2::ZERO {
                    return Step::Touching;
                }

                let perp = triple_product(ab, ao, ab);
                *dir = if perp == Vec2::ZERO {
                    // origin on the segment, search off either side of it
                    ab.perp()
                } else {
                    perp
                };
                Step::Continue
            }
            3 => {
                let (c, b, a) = (self.points[0], self.points[1], self.points[2]);
                let ab = b - a;
                let ac = c - a;
                let ao = -a;
                if ab.perp_dot(ac) == 0.0 {
                    return Step::Touching;
                }

                let ab_perp = triple_product(ac, ab, ab);
                let ac_perp = triple_product(ab, ac, ac);
                if ab_perp.dot(ao) > 0.0 {
                    self.points.remove(0);
                    *dir = ab_perp;
                    Step::Continue
                } else if ac_perp.dot(ao) > 0.0 {
                    self.points.remove(1);
                    *dir = ac_perp;
                    Step::Continue
                } else {
                    Step::Enclosed([c, b, a])
                }
            }
            n => unreachable!("gjk simplex grew to {} points", n),
        }
    }
}

pub fn gjk(config: &CollideConfig, a: &Shape, b: &Shape) -> Outcome {
    //! Decides whether the Minkowski difference of `a` and `b` contains the origin.
    //!
    //! # Panics
    //! If no decision is reached within `config.gjk_max_iterations`.
    let mut dir = config.initial_direction;
    let first = minkowski_support(a, b, dir);
    if first == Vec2::ZERO {
        debug!("gjk: origin is a support point of the minkowski difference");
        return Outcome::Touching;
    }

    let mut simplex = Simplex::new(first);
    dir = -first;

    for iteration in 0..config.gjk_max_iterations {
        let point = minkowski_support(a, b, dir);
        trace!(iteration, simplex = simplex.len(), ?dir, ?point, "gjk step");

        if point.dot(dir) < 0.0 {
            return Outcome::Separated; // origin cannot be enclosed
        }
        if (point - simplex.newest()).dot(dir) <= config.gjk_tolerance * dir.length() {
            debug!(iteration, ?point, "gjk: no progress toward the origin, treating as separated");
            return Outcome::Separated;
        }

        match simplex.push_and_evolve(point, &mut dir) {
            Step::Continue => {}
            Step::Touching => {
                debug!(iteration, "gjk: degenerate simplex through the origin");
                return Outcome::Touching;
            }
            Step::Enclosed(tri) => return Outcome::Enclosed(tri),
        }
    }

    error!(iterations = config.gjk_max_iterations, ?a, ?b, "gjk failed to terminate");
    panic!("gjk did not terminate within {} iterations", config.gjk_max_iterations);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{narrow::Aabb, Fp};

    fn encloses_origin(tri: [Vec2; 3]) -> bool {
        let sides = [
            (tri[1] - tri[0]).perp_dot(-tri[0]),
            (tri[2] - tri[1]).perp_dot(-tri[1]),
            (tri[0] - tri[2]).perp_dot(-tri[2]),
        ];
        sides.iter().all(|&s| s >= 0.0) || sides.iter().all(|&s| s <= 0.0)
    }

    #[test]
    fn triple_product_is_perpendicular() {
        let ab = Vec2::new(2.0, 1.0);
        let ao = Vec2::new(-1.0, 3.0);
        let p = triple_product(ab, ao, ab);
        assert_eq!(p.dot(ab), 0.0);
        assert!(p.dot(ao) > 0.0);

        let (x, y) = (Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0));
        assert_eq!(triple_product(x, y, x), y);
        // collinear operands have no perpendicular
        assert_eq!(triple_product(x * -2.0, -x, x * -2.0), Vec2::ZERO);
    }

    #[test]
    fn minkowski_sample() {
        let a = Shape::rect(Aabb::new(0.0, 0.0, 1.0, 1.0));
        let b = Shape::circle(Vec2::new(3.0, 0.0), 1.0);
        let x = Vec2::new(1.0, 0.0);
        assert_eq!(minkowski_support(&a, &b, x), Vec2::new(1.0, 0.0) - Vec2::new(2.0, 0.0));
        assert_eq!(minkowski_support(&b, &a, x), Vec2::new(4.0, 0.0) - Vec2::new(0.0, 0.0));
    }

    #[test]
    fn encloses_on_overlap() {
        let config = CollideConfig::default();
        let a = Shape::rect(Aabb::new(-1.0, -1.0, 1.0, 1.0));
        let b = Shape::polygon(vec![
            Vec2::new(0.5, 0.0),
            Vec2::new(2.0, 0.5),
            Vec2::new(2.0, -0.5),
        ]);
        match gjk(&config, &a, &b) {
            Outcome::Enclosed(tri) => assert!(encloses_origin(tri)),
            o => panic!("expected enclosure, got {:?}", o),
        }

        // deep overlap with the origin lying on the first simplex segment
        match gjk(&config, &a, &a) {
            Outcome::Enclosed(tri) => assert!(encloses_origin(tri)),
            o => panic!("expected enclosure, got {:?}", o),
        }
    }

    #[test]
    fn separates() {
        let config = CollideConfig::default();
        let a = Shape::rect(Aabb::new(-1.0, -1.0, 1.0, 1.0));
        let offsets = [
            Vec2::new(10.0, 0.0),
            Vec2::new(-3.0, 0.5),
            Vec2::new(2.1, 2.1),
            Vec2::new(0.0, -4.0),
        ];
        for &offset in &offsets {
            assert_eq!(gjk(&config, &a, &a.translate(offset)), Outcome::Separated);
        }
        let c = Shape::circle(Vec2::ZERO, 1.0);
        assert_eq!(gjk(&config, &c, &c.translate(Vec2::new(1.5, 1.5))), Outcome::Separated);
    }

    #[test]
    fn seed_direction_only_changes_the_path() {
        let a = Shape::oriented_box(Vec2::ZERO, Vec2::new(2.0, 1.0), 15.0);
        let b = Shape::ellipse(Vec2::new(1.2, 0.4), Vec2::new(0.5, 0.8));
        let far = b.translate(Vec2::new(5.0, 0.0));
        for i in 0..8 {
            let angle = i as Fp * 0.785;
            let seed = Vec2::new(angle.cos(), angle.sin());
            let config = CollideConfig::default().with_initial_direction(seed);
            assert!(matches!(gjk(&config, &a, &b), Outcome::Enclosed(_)));
            assert_eq!(gjk(&config, &a, &far), Outcome::Separated);
        }
    }

    #[test]
    #[should_panic(expected = "gjk did not terminate")]
    fn iteration_cap_is_fatal() {
        let config = CollideConfig::default().with_gjk_max_iterations(1);
        let a = Shape::rect(Aabb::new(-1.0, -1.0, 1.0, 1.0));
        let _ = gjk(&config, &a, &a.translate(Vec2::new(0.3, 0.9)));
    }

    #[test]
    fn coincident_points_touch() {
        let p = Shape::point(Vec2::new(2.0, 3.0));
        assert_eq!(gjk(&CollideConfig::default(), &p, &p.clone()), Outcome::Touching);
    }

    #[test]
    fn tangent_circles_terminate() {
        let config = CollideConfig::default();
        let a = Shape::circle(Vec2::ZERO, 1.0);
        let b = Shape::circle(Vec2::new(2.0, 0.0), 1.0);
        // origin sits on the boundary: any outcome, but no runaway loop
        let _ = gjk(&config, &a, &b);
        let _ = gjk(&config, &b, &a);
    }
}
