//! Model catalog: one shared shape and bounding sphere per kind of body.
//!
//! Every body type (craft, mine, orbiter, bullet, terrain) is drawn with a
//! single model shared by all its instances.  [`ModelCatalog`] is the Bevy
//! [`Resource`] that owns those definitions; systems that spawn bodies read the
//! reference sphere from it and the render shell turns the parts into meshes.
//!
//! A model is a list of primitive [`ModelPart`]s.  Its reference bounding
//! sphere is the merge of every part's sphere, with the vertical centre then
//! forced to zero so the sphere sits on the body's own altitude.

use crate::collision::BoundingSphere;
use crate::constants::BOUNDARY_WALL;
use bevy::prelude::*;
use std::collections::HashMap;

/// Which shared model a body is drawn with.
///
/// Bullets skip any target sharing their own model, which in practice means
/// bullets never hit other bullets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Craft,
    Mine,
    Orbiter,
    Bullet,
    Terrain,
}

/// Primitive geometry a model is assembled from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartShape {
    /// Axis-aligned box.
    Box { half_extents: Vec3 },
    Sphere { radius: f32 },
    /// Torus lying in the XZ plane.
    Ring { minor_radius: f32, major_radius: f32 },
    /// Swept-wing hull pointing along −Z.
    Dart { length: f32, span: f32, height: f32 },
}

/// A shape placed at an offset from the model origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPart {
    pub shape: PartShape,
    pub offset: Vec3,
}

impl ModelPart {
    pub const fn at(shape: PartShape, offset: Vec3) -> Self {
        Self { shape, offset }
    }

    pub const fn centered(shape: PartShape) -> Self {
        Self {
            shape,
            offset: Vec3::ZERO,
        }
    }

    /// Tight-enough sphere around this part, in model space.
    pub fn bounding_sphere(&self) -> BoundingSphere {
        let radius = match self.shape {
            PartShape::Box { half_extents } => half_extents.length(),
            PartShape::Sphere { radius } => radius,
            PartShape::Ring {
                minor_radius,
                major_radius,
            } => minor_radius + major_radius,
            PartShape::Dart {
                length,
                span,
                height,
            } => dart_vertices(length, span, height)
                .iter()
                .map(|v| v.length())
                .fold(0.0, f32::max),
        };
        BoundingSphere::new(self.offset, radius)
    }
}

/// Corner points of a dart hull: nose, left tail, right tail, dorsal fin, keel.
pub fn dart_vertices(length: f32, span: f32, height: f32) -> [Vec3; 5] {
    let half = length * 0.5;
    [
        Vec3::new(0.0, 0.0, -half),
        Vec3::new(-span * 0.5, 0.0, half),
        Vec3::new(span * 0.5, 0.0, half),
        Vec3::new(0.0, height, half * 0.6),
        Vec3::new(0.0, -height * 0.5, half * 0.6),
    ]
}

/// Merge every part's sphere, then drop the centre onto `y = 0`.
///
/// An empty part list yields a zero-radius sphere at the origin.
pub fn merged_bounds(parts: &[ModelPart]) -> BoundingSphere {
    let mut spheres = parts.iter().map(ModelPart::bounding_sphere);
    let Some(first) = spheres.next() else {
        return BoundingSphere::default();
    };
    let mut merged = spheres.fold(first, |acc, s| acc.merged(&s));
    merged.center.y = 0.0;
    merged
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEntry {
    pub parts: Vec<ModelPart>,
    pub bounds: BoundingSphere,
}

impl ModelEntry {
    fn new(parts: Vec<ModelPart>) -> Self {
        let bounds = merged_bounds(&parts);
        Self { parts, bounds }
    }
}

/// Shared shape and reference sphere for every [`ModelKind`].
#[derive(Resource, Debug, Clone)]
pub struct ModelCatalog {
    entries: HashMap<ModelKind, ModelEntry>,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::with_arena(BOUNDARY_WALL)
    }
}

impl ModelCatalog {
    /// Build the standard models; the terrain is sized to cover the arena floor.
    pub fn with_arena(wall: f32) -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            ModelKind::Craft,
            ModelEntry::new(vec![
                ModelPart::centered(PartShape::Dart {
                    length: 24.0,
                    span: 22.0,
                    height: 4.0,
                }),
                ModelPart::at(
                    PartShape::Box {
                        half_extents: Vec3::new(1.5, 1.5, 4.0),
                    },
                    Vec3::new(0.0, 2.0, 1.0),
                ),
            ]),
        );
        entries.insert(
            ModelKind::Mine,
            ModelEntry::new(vec![
                ModelPart::centered(PartShape::Sphere { radius: 6.0 }),
                ModelPart::centered(PartShape::Box {
                    half_extents: Vec3::new(9.0, 0.8, 0.8),
                }),
                ModelPart::centered(PartShape::Box {
                    half_extents: Vec3::new(0.8, 9.0, 0.8),
                }),
                ModelPart::centered(PartShape::Box {
                    half_extents: Vec3::new(0.8, 0.8, 9.0),
                }),
            ]),
        );
        entries.insert(
            ModelKind::Orbiter,
            ModelEntry::new(vec![
                ModelPart::centered(PartShape::Sphere { radius: 7.0 }),
                ModelPart::centered(PartShape::Ring {
                    minor_radius: 2.5,
                    major_radius: 15.0,
                }),
            ]),
        );
        entries.insert(
            ModelKind::Bullet,
            ModelEntry::new(vec![ModelPart::centered(PartShape::Box {
                half_extents: Vec3::splat(1.5),
            })]),
        );
        entries.insert(
            ModelKind::Terrain,
            ModelEntry::new(vec![ModelPart::at(
                PartShape::Box {
                    half_extents: Vec3::new(wall, 1.0, wall),
                },
                Vec3::new(0.0, -1.0, 0.0),
            )]),
        );
        Self { entries }
    }

    /// Reference sphere for a kind, centred on the model origin.
    pub fn bounds(&self, kind: ModelKind) -> BoundingSphere {
        self.entries
            .get(&kind)
            .map(|entry| entry.bounds)
            .unwrap_or_default()
    }

    pub fn parts(&self, kind: ModelKind) -> &[ModelPart] {
        self.entries
            .get(&kind)
            .map(|entry| entry.parts.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_bounds_forces_vertical_centre_to_zero() {
        let parts = [
            ModelPart::at(PartShape::Sphere { radius: 2.0 }, Vec3::new(0.0, 10.0, 0.0)),
            ModelPart::at(PartShape::Sphere { radius: 2.0 }, Vec3::new(0.0, 14.0, 0.0)),
        ];
        let bounds = merged_bounds(&parts);
        assert_eq!(bounds.center.y, 0.0);
        assert!((bounds.radius - 4.0).abs() < 1e-5);
    }

    #[test]
    fn every_body_kind_has_a_positive_sphere() {
        let catalog = ModelCatalog::default();
        for kind in [
            ModelKind::Craft,
            ModelKind::Mine,
            ModelKind::Orbiter,
            ModelKind::Bullet,
            ModelKind::Terrain,
        ] {
            assert!(catalog.bounds(kind).radius > 0.0, "{kind:?}");
            assert!(!catalog.parts(kind).is_empty(), "{kind:?}");
        }
    }

    #[test]
    fn dart_sphere_reaches_the_wing_tips() {
        let part = ModelPart::centered(PartShape::Dart {
            length: 24.0,
            span: 22.0,
            height: 4.0,
        });
        let expected = Vec3::new(11.0, 0.0, 12.0).length();
        assert!((part.bounding_sphere().radius - expected).abs() < 1e-4);
    }

    #[test]
    fn empty_part_list_is_a_point() {
        assert_eq!(merged_bounds(&[]), BoundingSphere::default());
    }
}
