//! Brute-force world queries over bodies and static objects.

use crate::{
    body::{Body, Hitbox, WorldObject},
    config::CollideConfig,
    narrow::{check_collision_with, Intersection, Shape},
    Vec2,
};
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use tracing::{debug, trace};

/// Handle to a body in a `Cosmos`. Never reused after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(usize);

/// What a body collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Other {
    Body(BodyId),
    /// Index into `Cosmos::objects`.
    Object(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub other: Other,
    /// Separates the queried body from `other`.
    pub intersection: Intersection,
}

#[derive(Debug, Clone)]
pub struct Cosmos {
    bodies: IndexMap<BodyId, Body, FnvBuildHasher>,
    objects: Vec<WorldObject>,
    next_id: usize,
    pub config: CollideConfig,
}

impl Default for Cosmos {
    fn default() -> Self {
        Cosmos::new(CollideConfig::default())
    }
}

impl Cosmos {
    pub fn new(config: CollideConfig) -> Cosmos {
        Cosmos {
            bodies: IndexMap::with_hasher(FnvBuildHasher::default()),
            objects: Vec::new(),
            next_id: 0,
            config,
        }
    }

    // ---------- Bodies & Objects ---------- //

    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.insert(id, body);
        id
    }
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        //! Preserves the insertion order of the remaining bodies.
        self.bodies.shift_remove(&id)
    }
    #[inline]
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(&id)
    }
    #[inline]
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(&id)
    }
    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter().map(|(&id, b)| (id, b))
    }

    pub fn add_object(&mut self, object: WorldObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }
    #[inline]
    pub fn objects(&self) -> &[WorldObject] {
        &self.objects
    }

    // ---------- Queries ---------- //

    pub fn intersections(&self, id: BodyId) -> Vec<Contact> {
        //! Tests the body against every other body, then every object, in insertion order.
        //! Unknown ids have no contacts.
        let hitbox = match self.bodies.get(&id) {
            Some(b) => b.hitbox(),
            None => {
                debug!(?id, "intersections queried for an unknown body");
                return Vec::new();
            }
        };
        let others = self.bodies.iter().map(|(&other, b)| (other, b.hitbox())).collect::<Vec<_>>();

        let mut contacts = Vec::new();
        self.collect_contacts(Some(id), &hitbox, &others, &mut contacts);
        contacts
    }

    pub fn overlapping(&self, probe: &impl Hitbox) -> Vec<Contact> {
        //! Tests any hitbox, such as an attack area, against every body, then every object.
        let bodies = self.bodies.iter().map(|(&id, b)| (id, b.hitbox())).collect::<Vec<_>>();

        let mut contacts = Vec::new();
        self.collect_contacts(None, &probe.hitbox(), &bodies, &mut contacts);
        contacts
    }

    pub fn all_contacts(&self) -> Vec<(BodyId, Contact)> {
        //! Every body's `intersections`, in body insertion order. Each overlapping body pair
        //! appears twice, once from either side.
        let hitboxes = self.bodies.iter().map(|(&id, b)| (id, b.hitbox())).collect::<Vec<_>>();

        let mut all = Vec::new();
        let mut contacts = Vec::new();
        for (id, hitbox) in hitboxes.iter() {
            self.collect_contacts(Some(*id), hitbox, &hitboxes, &mut contacts);
            all.extend(contacts.drain(..).map(|c| (*id, c)));
        }
        all
    }

    pub fn is_cursor_over(&self, id: BodyId, point: Vec2) -> bool {
        //! Point query against the body's hitbox. False for unknown ids.
        let cursor = Shape::point(point);
        let mut intersection = Intersection::default();
        match self.bodies.get(&id) {
            Some(b) => check_collision_with(&self.config, &b.hitbox(), &cursor, &mut intersection),
            None => false,
        }
    }

    fn collect_contacts(
        &self,
        skip: Option<BodyId>,
        hitbox: &Shape,
        bodies: &[(BodyId, Shape)],
        out: &mut Vec<Contact>,
    ) {
        let mut intersection = Intersection::default();
        for (other, shape) in bodies.iter().filter(|(other, _)| Some(*other) != skip) {
            if check_collision_with(&self.config, hitbox, shape, &mut intersection) {
                out.push(Contact { other: Other::Body(*other), intersection });
            }
        }
        for (index, object) in self.objects.iter().enumerate() {
            if check_collision_with(&self.config, hitbox, &object.hitbox(), &mut intersection) {
                out.push(Contact { other: Other::Object(index), intersection });
            }
        }
        trace!(?skip, contacts = out.len(), "contacts collected");
    }
}
