//! Narrowphase data and logic module.

pub mod epa;
pub mod gjk;

use crate::{config::CollideConfig, error::ShapeError, Fp, Vec2};
use tracing::trace;

// ---------- Aabb ---------- //

/// Axis-aligned rectangle. Describes rectangular hitboxes and the bounds ellipses are inscribed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}
impl Aabb {
    #[inline]
    pub fn new(minx: Fp, miny: Fp, maxx: Fp, maxy: Fp) -> Aabb {
        assert!(minx <= maxx);
        assert!(miny <= maxy);

        Aabb {
            min: Vec2::new(minx, miny),
            max: Vec2::new(maxx, maxy),
        }
    }
    pub fn new_safe(ax: Fp, by: Fp, cx: Fp, dy: Fp) -> Aabb {
        //! Orders minimum and maximum values.
        Aabb::new(Fp::min(ax, cx), Fp::min(by, dy), Fp::max(ax, cx), Fp::max(by, dy))
    }
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Aabb {
        //! Builds the box spanned from `origin` by `size`, which may be negative on either axis.
        let far = origin + size;
        Aabb::new_safe(origin.x, origin.y, far.x, far.y)
    }

    #[inline]
    pub fn minx_maxy(self) -> Vec2 {
        Vec2::new(self.min.x, self.max.y)
    }
    #[inline]
    pub fn maxx_miny(self) -> Vec2 {
        Vec2::new(self.max.x, self.min.y)
    }
    #[inline]
    pub fn center(self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
    #[inline]
    pub fn half_extents(self) -> Vec2 {
        (self.max - self.min) * 0.5
    }
    #[inline]
    pub fn translate(self, offset: Vec2) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

// ---------- Shape ---------- //

/// A convex hitbox.
///
/// Polygon vertices may be wound either way, and need not be closed. One vertex makes a point
/// query, two a segment query.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Polygon(Vec<Vec2>),
    /// Axis-aligned ellipse. `radii` are the semi-axis lengths.
    Ellipse { center: Vec2, radii: Vec2 },
}
impl Shape {
    pub fn try_polygon(verts: Vec<Vec2>) -> Result<Shape, ShapeError> {
        if verts.is_empty() {
            return Err(ShapeError::EmptyPolygon);
        }
        if let Some(index) = verts.iter().position(|v| !v.is_finite()) {
            return Err(ShapeError::NonFiniteVertex { index });
        }
        Ok(Shape::Polygon(verts))
    }
    pub fn try_ellipse(center: Vec2, radii: Vec2) -> Result<Shape, ShapeError> {
        if !center.is_finite() {
            return Err(ShapeError::NonFiniteCenter);
        }
        if !radii.is_finite() || radii.x < 0.0 || radii.y < 0.0 {
            return Err(ShapeError::InvalidRadii { x: radii.x, y: radii.y });
        }
        Ok(Shape::Ellipse { center, radii })
    }

    /// `verts` must be non-empty, finite and describe a convex region.
    pub fn polygon(verts: Vec<Vec2>) -> Shape {
        match Shape::try_polygon(verts) {
            Ok(shape) => shape,
            Err(e) => panic!("invalid polygon hitbox: {}", e),
        }
    }
    /// `radii` must be finite and non-negative.
    pub fn ellipse(center: Vec2, radii: Vec2) -> Shape {
        match Shape::try_ellipse(center, radii) {
            Ok(shape) => shape,
            Err(e) => panic!("invalid ellipse hitbox: {}", e),
        }
    }
    #[inline]
    pub fn circle(center: Vec2, rad: Fp) -> Shape {
        Shape::ellipse(center, Vec2::splat(rad.abs()))
    }
    #[inline]
    pub fn point(loc: Vec2) -> Shape {
        Shape::Polygon(vec![loc])
    }
    pub fn rect(aabb: Aabb) -> Shape {
        //! Counter-clockwise rectangle from `aabb.min`.
        Shape::Polygon(vec![aabb.min, aabb.maxx_miny(), aabb.max, aabb.minx_maxy()])
    }
    pub fn ellipse_in(aabb: Aabb) -> Shape {
        //! The ellipse inscribed in `aabb`.
        Shape::Ellipse { center: aabb.center(), radii: aabb.half_extents() }
    }
    pub fn oriented_box(center: Vec2, size: Vec2, degrees: Fp) -> Shape {
        //! Rectangle of `size` about `center`, rotated counter-clockwise by `degrees`.
        let (sin, cos) = degrees.to_radians().sin_cos();
        let half = size * 0.5;
        let corner = |x: Fp, y: Fp| center + Vec2::new(x * cos - y * sin, x * sin + y * cos);
        Shape::Polygon(vec![
            corner(-half.x, -half.y),
            corner(half.x, -half.y),
            corner(half.x, half.y),
            corner(-half.x, half.y),
        ])
    }

    pub fn translate(&self, offset: Vec2) -> Shape {
        match self {
            Shape::Polygon(verts) => Shape::Polygon(verts.iter().map(|&v| v + offset).collect()),
            Shape::Ellipse { center, radii } => Shape::Ellipse {
                center: *center + offset,
                radii: *radii,
            },
        }
    }

    pub fn center(&self) -> Vec2 {
        //! The ellipse's center, or the mean of the polygon's vertices.
        match self {
            Shape::Polygon(verts) => {
                verts.iter().fold(Vec2::ZERO, |acc, &v| acc + v) / verts.len() as Fp
            }
            Shape::Ellipse { center, .. } => *center,
        }
    }

    pub fn support(&self, dir: Vec2) -> Vec2 {
        //! Returns the point of the shape farthest along `dir`.
        //!
        //! Polygon ties resolve to the earliest vertex in stored order. A zero `dir` is a
        //! caller error; ellipses fall back to `(1, 0)` for it.
        match self {
            Shape::Polygon(verts) => {
                assert!(!verts.is_empty(), "support queried on an empty polygon hitbox");
                let mut best = verts[0];
                let mut best_dot = best.dot(dir);
                for &v in &verts[1..] {
                    let dot = v.dot(dir);
                    if dot > best_dot {
                        best = v;
                        best_dot = dot;
                    }
                }
                best
            }
            Shape::Ellipse { center, radii } => {
                let dir = if dir.length_squared() == 0.0 { Vec2::new(1.0, 0.0) } else { dir };
                // in the ellipse's unit-circle space, the support normal is parallel to dir
                let scaled = *radii * dir;
                let len = scaled.length();
                if len == 0.0 {
                    *center
                } else {
                    *center + *radii * scaled / len
                }
            }
        }
    }

    pub fn contains_point(&self, loc: Vec2) -> bool {
        //! Point query through a degenerate single-vertex hitbox, as cursor hit-testing does it.
        check_collision(self, &Shape::point(loc), &mut Intersection::default())
    }
}

// ---------- Intersection ---------- //

/// The result of an overlapping `check_collision`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Intersection {
    /// Translation that separates the first shape from the second when added to its position.
    pub mtv: Vec2,
    pub penetration_depth: Fp,
}
impl Intersection {
    pub fn normal(&self) -> Vec2 {
        //! Unit direction of the `mtv`, zero for touching contacts.
        if self.penetration_depth > 0.0 {
            self.mtv / self.penetration_depth
        } else {
            Vec2::ZERO
        }
    }
    #[inline]
    pub fn is_touching(&self) -> bool {
        self.penetration_depth == 0.0
    }
}

// ---------- Collide ---------- //

pub fn check_collision(a: &Shape, b: &Shape, intersection: &mut Intersection) -> bool {
    //! Returns whether `a` and `b` overlap, writing the separating data into `intersection` if so.
    //! `intersection` is left untouched otherwise.
    check_collision_with(&CollideConfig::default(), a, b, intersection)
}

pub fn check_collision_with(
    config: &CollideConfig,
    a: &Shape,
    b: &Shape,
    intersection: &mut Intersection,
) -> bool {
    debug_assert!(config.validate().is_ok(), "invalid collide config: {:?}", config);

    match gjk::gjk(config, a, b) {
        gjk::Outcome::Separated => false,
        gjk::Outcome::Touching => {
            trace!("touching contact, zero translation");
            *intersection = Intersection::default();
            true
        }
        gjk::Outcome::Enclosed(simplex) => {
            *intersection = epa::epa(config, simplex, a, b);
            true
        }
    }
}

#[inline]
pub fn collide(a: &Shape, b: &Shape) -> Option<Intersection> {
    let mut intersection = Intersection::default();
    if check_collision(a, b, &mut intersection) {
        Some(intersection)
    } else {
        None
    }
}
