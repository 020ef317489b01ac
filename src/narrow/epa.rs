//! Expanding polytope penetration depth, seeded by GJK's enclosing triangle.

use super::{gjk::minkowski_support, Intersection, Shape};
use crate::{config::CollideConfig, Fp, Vec2};
use tracing::{debug, trace, warn};

/// The polytope edge nearest the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Edge {
    /// Index of the edge's start vertex. The edge ends at the next vertex, cyclically.
    index: usize,
    /// Unit normal facing away from the polytope's interior.
    normal: Vec2,
    distance: Fp,
}
impl Edge {
    #[inline]
    fn into_intersection(self) -> Intersection {
        Intersection { mtv: -self.normal * self.distance, penetration_depth: self.distance }
    }
}

/// Cyclic, consistently wound convex polygon of Minkowski points enclosing the origin.
#[derive(Debug, Clone)]
struct Polytope {
    verts: Vec<Vec2>,
    /// `1` for clockwise winding, `-1` for counter-clockwise.
    /// Outward normals are `edge.perp() * winding`.
    winding: Fp,
}

impl Polytope {
    fn new(simplex: [Vec2; 3], capacity: usize) -> Option<Polytope> {
        //! Returns `None` for a zero-area seed triangle.
        let area = (simplex[1] - simplex[0]).perp_dot(simplex[2] - simplex[0]);
        if area == 0.0 {
            return None;
        }

        let mut verts = Vec::with_capacity(capacity.max(3));
        verts.extend_from_slice(&simplex);
        Some(Polytope { verts, winding: if area > 0.0 { -1.0 } else { 1.0 } })
    }

    #[inline]
    fn len(&self) -> usize {
        self.verts.len()
    }

    fn closest_edge(&self) -> Option<Edge> {
        //! Scans every edge, keeping the first found at the least distance from the origin.
        let len = self.verts.len();
        let mut closest: Option<Edge> = None;
        for i in 0..len {
            let start = self.verts[i];
            let edge = self.verts[(i + 1) % len] - start;
            let len_sq = edge.length_squared();
            if len_sq == 0.0 {
                continue; // coincident vertices
            }

            let normal = edge.perp() * (self.winding / len_sq.sqrt());
            // negative only through rounding, when the origin sits on the edge
            let distance = normal.dot(start).max(0.0);
            if closest.map_or(true, |c| distance < c.distance) {
                closest = Some(Edge { index: i, normal, distance });
            }
        }
        closest
    }

    #[inline]
    fn insert_after(&mut self, index: usize, point: Vec2) {
        self.verts.insert(index + 1, point);
    }
}

pub fn epa(config: &CollideConfig, simplex: [Vec2; 3], a: &Shape, b: &Shape) -> Intersection {
    //! Expands `simplex` toward the boundary of the Minkowski difference of `a` and `b`, returning
    //! the penetration depth and the translation that separates `a` from `b`.
    //!
    //! Returns the best estimate so far if the polytope reaches `config.epa_max_vertices`.
    let mut polytope = match Polytope::new(simplex, config.epa_max_vertices) {
        Some(p) => p,
        None => {
            debug!(?simplex, "epa: zero-area seed triangle, treating as touching");
            return Intersection::default();
        }
    };

    loop {
        let edge = match polytope.closest_edge() {
            Some(e) => e,
            None => return Intersection::default(),
        };
        let support = minkowski_support(a, b, edge.normal);
        let reach = edge.normal.dot(support);
        trace!(
            vertices = polytope.len(),
            edge = edge.index,
            distance = edge.distance,
            reach,
            "epa step"
        );

        if (reach - edge.distance).abs() < config.epa_tolerance {
            if edge.distance == 0.0 {
                debug!(normal = ?edge.normal, "epa: origin on the boundary, touching contact");
                return Intersection::default();
            }
            return edge.into_intersection();
        }
        if polytope.len() >= config.epa_max_vertices {
            warn!(
                vertices = polytope.len(),
                distance = edge.distance,
                gap = reach - edge.distance,
                "epa did not converge, returning best estimate"
            );
            return edge.into_intersection();
        }

        polytope.insert_after(edge.index, support);
    }
}
