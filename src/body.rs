//! Hitbox providers: entities and static world objects.

use crate::{
    narrow::{Aabb, Shape},
    Fp, Vec2,
};

/// Anything that can produce a hitbox on demand.
pub trait Hitbox {
    fn hitbox(&self) -> Shape;
}

impl Hitbox for Shape {
    #[inline]
    fn hitbox(&self) -> Shape {
        self.clone()
    }
}

/// A moving entity. Its hitbox is a box of `hitbox_scale` about `position`, rotated by `rotation`.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// World position, the hitbox center
    pub position: Vec2,
    /// Hitbox width and height
    pub hitbox_scale: Vec2,
    /// Counter-clockwise, in degrees
    pub rotation: Fp,
}
impl Body {
    pub fn new(position: Vec2) -> Body {
        Body { position, hitbox_scale: Vec2::new(1.0, 1.0), rotation: 0.0 }
    }
    pub fn with_hitbox_scale(mut self, scale: Vec2) -> Body {
        self.hitbox_scale = scale;
        self
    }
    pub fn with_rotation(mut self, degrees: Fp) -> Body {
        self.rotation = degrees;
        self
    }

    pub fn translate(&mut self, offset: Vec2) {
        //! Teleports the body. Pass an `Intersection::mtv` to resolve that overlap.
        self.position += offset;
    }
}
impl Hitbox for Body {
    fn hitbox(&self) -> Shape {
        Shape::oriented_box(self.position, self.hitbox_scale, self.rotation)
    }
}

/// The outline of a static world object, relative to its origin and size.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    /// The box spanned from the origin by the size.
    Rect,
    /// The ellipse inscribed in the object's box.
    Ellipse,
    /// The origin alone.
    Point,
    /// Vertices offset from the origin.
    Polygon(Vec<Vec2>),
}

/// A static object placed in the world, such as a wall or a trigger zone.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldObject {
    pub name: String,
    pub origin: Vec2,
    pub size: Vec2,
    pub kind: ObjectKind,
    hitbox: Shape,
}
impl WorldObject {
    pub fn new(name: impl Into<String>, origin: Vec2, size: Vec2, kind: ObjectKind) -> WorldObject {
        //! Builds the object's hitbox once. Panics if a polygon object has no vertices.
        let hitbox = match &kind {
            ObjectKind::Rect => Shape::rect(Aabb::from_origin_size(origin, size)),
            ObjectKind::Ellipse => Shape::ellipse_in(Aabb::from_origin_size(origin, size)),
            ObjectKind::Point => Shape::point(origin),
            ObjectKind::Polygon(offsets) => {
                Shape::polygon(offsets.iter().map(|&v| v + origin).collect())
            }
        };
        WorldObject { name: name.into(), origin, size, kind, hitbox }
    }
}
impl Hitbox for WorldObject {
    #[inline]
    fn hitbox(&self) -> Shape {
        self.hitbox.clone()
    }
}
