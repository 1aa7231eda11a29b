//! Sphere-vs-sphere collision queries.
//!
//! Every body carries an *instance* bounding sphere that is re-centred on its
//! position whenever it moves.  Queries here operate on snapshots of those
//! spheres, `(Entity, BoundingSphere)` pairs, so a system can collect the
//! candidates once and then mutate bodies while it walks them.
//!
//! Nothing here is spatially partitioned: the arena rarely holds more than a
//! few dozen bodies, and brute force over that is cheaper than a grid rebuild.

use bevy::prelude::*;

/// A sphere in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Touching counts as intersecting.
    #[inline]
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) <= reach * reach
    }

    /// Smallest sphere enclosing both `self` and `other`.
    pub fn merged(&self, other: &BoundingSphere) -> BoundingSphere {
        let offset = other.center - self.center;
        let distance = offset.length();
        if distance + other.radius <= self.radius {
            return *self;
        }
        if distance + self.radius <= other.radius {
            return *other;
        }
        let radius = (distance + self.radius + other.radius) * 0.5;
        let center = self.center + offset * ((radius - self.radius) / distance);
        BoundingSphere { center, radius }
    }

    /// Same radius, centred on `center`.
    #[inline]
    pub fn recentered(&self, center: Vec3) -> BoundingSphere {
        BoundingSphere {
            center,
            radius: self.radius,
        }
    }

    /// Same centre, radius multiplied by `factor`.
    #[inline]
    pub fn scaled(&self, factor: f32) -> BoundingSphere {
        BoundingSphere {
            center: self.center,
            radius: self.radius * factor,
        }
    }
}

/// Whether two instance spheres overlap.
#[inline]
pub fn collides(a: &BoundingSphere, b: &BoundingSphere) -> bool {
    a.intersects(b)
}

/// Every candidate whose sphere overlaps `subject`'s, in candidate order.
///
/// The subject itself is never reported even when it is one of the
/// candidates; every sphere trivially overlaps itself.
pub fn list_collides(
    subject: Entity,
    sphere: &BoundingSphere,
    candidates: &[(Entity, BoundingSphere)],
) -> Vec<Entity> {
    candidates
        .iter()
        .filter(|(entity, other)| *entity != subject && sphere.intersects(other))
        .map(|(entity, _)| *entity)
        .collect()
}

/// The candidate closest to `origin` by Euclidean distance between centres.
///
/// Returns `None` for an empty list.  Ties resolve to the earliest candidate.
pub fn find_nearest(origin: Vec3, candidates: &[(Entity, BoundingSphere)]) -> Option<Entity> {
    let mut best: Option<(Entity, f32)> = None;
    for (entity, sphere) in candidates {
        let distance = origin.distance_squared(sphere.center);
        match best {
            Some((_, best_distance)) if best_distance <= distance => {}
            _ => best = Some((*entity, distance)),
        }
    }
    best.map(|(entity, _)| entity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(x: f32, radius: f32) -> BoundingSphere {
        BoundingSphere::new(Vec3::new(x, 0.0, 0.0), radius)
    }

    fn entities(count: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..count).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn touching_spheres_intersect() {
        assert!(sphere(0.0, 1.0).intersects(&sphere(2.0, 1.0)));
        assert!(!sphere(0.0, 1.0).intersects(&sphere(2.01, 1.0)));
        assert!(collides(&sphere(0.0, 1.0), &sphere(-2.0, 1.0)));
        assert!(!collides(&sphere(0.0, 1.0), &sphere(-2.01, 1.0)));
    }

    #[test]
    fn list_collides_never_reports_the_subject() {
        let ids = entities(3);
        let candidates = vec![
            (ids[0], sphere(0.0, 5.0)),
            (ids[1], sphere(3.0, 5.0)),
            (ids[2], sphere(100.0, 5.0)),
        ];
        let hits = list_collides(ids[0], &candidates[0].1, &candidates);
        assert_eq!(hits, vec![ids[1]]);

        for (subject, own) in &candidates {
            let hits = list_collides(*subject, own, &candidates);
            assert!(!hits.contains(subject));
        }
    }

    #[test]
    fn list_collides_keeps_candidate_order() {
        let ids = entities(4);
        let candidates = vec![
            (ids[1], sphere(-2.0, 1.0)),
            (ids[2], sphere(2.0, 1.0)),
            (ids[3], sphere(1.0, 1.0)),
        ];
        let hits = list_collides(ids[0], &sphere(0.0, 1.5), &candidates);
        assert_eq!(hits, vec![ids[1], ids[2], ids[3]]);
    }

    #[test]
    fn find_nearest_picks_closest_and_none_for_empty() {
        let ids = entities(3);
        let candidates = vec![
            (ids[0], sphere(10.0, 1.0)),
            (ids[1], sphere(-3.0, 1.0)),
            (ids[2], sphere(4.0, 1.0)),
        ];
        assert_eq!(find_nearest(Vec3::ZERO, &candidates), Some(ids[1]));
        assert_eq!(find_nearest(Vec3::ZERO, &[]), None);
    }

    #[test]
    fn merged_sphere_encloses_both() {
        let a = sphere(0.0, 1.0);
        let b = sphere(10.0, 2.0);
        let m = a.merged(&b);
        assert!((m.radius - 6.5).abs() < 1e-5);
        // Spans x ∈ [-1, 12].
        assert!((m.center.x - 5.5).abs() < 1e-5);

        let inner = sphere(0.5, 0.5);
        assert_eq!(sphere(0.0, 5.0).merged(&inner), sphere(0.0, 5.0));
    }
}
