//! Procedural stand-in for the baked portal scene.
//!
//! Every static part is a flat-shaded triangle list tagged with the material
//! the renderer should use. The axe lives here too so the shipped asset and
//! the tests share one definition of its shape.

use crate::error::AssetError;
use crate::pick::{cuboid_triangles, ObjectId, PickMesh, SceneObject, Transform};
use glam::{Vec2, Vec3};
use std::f32::consts::TAU;

pub const AXE_ID: ObjectId = ObjectId(1);
pub const AXE_NAME: &str = "axe";
pub const AXE_REST_POSITION: Vec3 = Vec3::new(0.9, 0.3, 0.9);

const PORTAL_CENTER: Vec3 = Vec3::new(0.0, 0.85, -1.2);
const PORTAL_RADIUS: f32 = 0.55;
const PORTAL_SEGMENTS: usize = 48;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaterialKind {
    /// Flat colour (sRGB hex) with simple directional shading.
    Baked(&'static str),
    PoleLight,
    PortalLight,
}

#[derive(Clone, Debug)]
pub struct StaticPart {
    pub name: &'static str,
    pub material: MaterialKind,
    pub vertices: Vec<MeshVertex>,
}

/// One vertex per corner with the face normal; no UVs.
pub fn flat_vertices(triangles: &[[Vec3; 3]]) -> Vec<MeshVertex> {
    triangles
        .iter()
        .flat_map(|[a, b, c]| {
            let n = (*b - *a).cross(*c - *a).normalize_or_zero().to_array();
            [*a, *b, *c].map(|p| MeshVertex {
                position: p.to_array(),
                normal: n,
                uv: [0.0; 2],
            })
        })
        .collect()
}

fn cuboid(name: &'static str, material: MaterialKind, center: Vec3, half: Vec3) -> StaticPart {
    StaticPart {
        name,
        material,
        vertices: flat_vertices(&cuboid_triangles(center, half)),
    }
}

/// Triangle fan facing +Z with UVs spanning the unit square.
fn portal_disc(center: Vec3, radius: f32, segments: usize) -> StaticPart {
    let ring = |i: usize| {
        let a = TAU * i as f32 / segments as f32;
        Vec2::new(a.cos(), a.sin())
    };
    let vertex = |d: Vec2| MeshVertex {
        position: (center + (d * radius).extend(0.0)).to_array(),
        normal: [0.0, 0.0, 1.0],
        uv: (d * 0.5 + Vec2::splat(0.5)).to_array(),
    };
    let vertices = (0..segments)
        .flat_map(|i| [vertex(Vec2::ZERO), vertex(ring(i)), vertex(ring(i + 1))])
        .collect();
    StaticPart {
        name: "portallight",
        material: MaterialKind::PortalLight,
        vertices,
    }
}

/// Ground, portal frame, portal surface, two pole lights and the chopping log.
pub fn static_parts() -> Vec<StaticPart> {
    use MaterialKind::*;
    let stone = Baked("#6f6a64");
    let wood = Baked("#5a3b24");
    let pole = Baked("#2b2b2e");
    vec![
        cuboid(
            "ground",
            Baked("#3c5a2e"),
            Vec3::new(0.0, -0.05, 0.0),
            Vec3::new(2.0, 0.05, 2.0),
        ),
        cuboid(
            "portal_left",
            stone,
            Vec3::new(-0.75, 0.7, -1.2),
            Vec3::new(0.15, 0.7, 0.15),
        ),
        cuboid(
            "portal_right",
            stone,
            Vec3::new(0.75, 0.7, -1.2),
            Vec3::new(0.15, 0.7, 0.15),
        ),
        cuboid(
            "portal_top",
            stone,
            Vec3::new(0.0, 1.5, -1.2),
            Vec3::new(0.9, 0.1, 0.15),
        ),
        portal_disc(PORTAL_CENTER, PORTAL_RADIUS, PORTAL_SEGMENTS),
        cuboid(
            "poleA",
            pole,
            Vec3::new(-1.5, 0.5, 0.2),
            Vec3::new(0.04, 0.5, 0.04),
        ),
        cuboid(
            "polelightA",
            PoleLight,
            Vec3::new(-1.5, 1.05, 0.2),
            Vec3::splat(0.08),
        ),
        cuboid(
            "poleB",
            pole,
            Vec3::new(1.5, 0.5, -0.4),
            Vec3::new(0.04, 0.5, 0.04),
        ),
        cuboid(
            "polelightB",
            PoleLight,
            Vec3::new(1.5, 1.05, -0.4),
            Vec3::splat(0.08),
        ),
        cuboid(
            "log",
            wood,
            Vec3::new(0.9, 0.15, 0.9),
            Vec3::new(0.2, 0.15, 0.2),
        ),
    ]
}

/// Handle along +Y from the local origin with the blade near the top.
pub fn axe_triangles() -> Vec<[Vec3; 3]> {
    let mut tris = cuboid_triangles(Vec3::new(0.0, 0.3, 0.0), Vec3::new(0.03, 0.3, 0.03));
    tris.extend(cuboid_triangles(
        Vec3::new(0.1, 0.52, 0.0),
        Vec3::new(0.1, 0.08, 0.015),
    ));
    tris
}

pub fn default_axe_mesh() -> Result<PickMesh, AssetError> {
    PickMesh::from_triangles(axe_triangles())
}

/// The interactive object resting on the log.
pub fn axe_object(mesh: PickMesh) -> SceneObject {
    SceneObject::new(
        AXE_ID,
        AXE_NAME,
        Transform::from_position(AXE_REST_POSITION),
        mesh,
    )
}
