//! Ray casting against pickable meshes.
//!
//! Objects carry their triangles in local space. A pick transforms the world
//! ray into the object's local frame instead of transforming every triangle;
//! the local direction is left unnormalized so the ray parameter stays equal
//! to world-space distance.

use crate::error::AssetError;
use glam::{EulerRot, Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let (min, max) = it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Slab test; returns the entry parameter, clamped to 0 when the origin
    /// is inside the box. `dir` need not be normalized.
    pub fn ray_hit(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let inv = dir.recip();
        let t0 = (self.min - origin) * inv;
        let t1 = (self.max - origin) * inv;
        // NaN from 0 * inf (origin on a slab plane, axis-parallel ray) is
        // dropped by min/max, which keep the other operand.
        let t_near = t0.min(t1).max_element();
        let t_far = t0.max(t1).min_element();
        if t_far < t_near.max(0.0) {
            return None;
        }
        Some(t_near.max(0.0))
    }
}

/// Möller–Trumbore, two-sided. `dir` need not be normalized.
#[inline]
pub fn ray_triangle(origin: Vec3, dir: Vec3, tri: &[Vec3; 3]) -> Option<f32> {
    const EPS: f32 = 1e-7;
    let e1 = tri[1] - tri[0];
    let e2 = tri[2] - tri[0];
    let p = dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPS {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = origin - tri[0];
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

/// Local-space triangle soup with a cached bounding box.
#[derive(Clone, Debug)]
pub struct PickMesh {
    triangles: Vec<[Vec3; 3]>,
    bounds: Aabb,
}

impl PickMesh {
    pub fn from_triangles(triangles: Vec<[Vec3; 3]>) -> Result<Self, AssetError> {
        let bounds =
            Aabb::from_points(triangles.iter().flatten().copied()).ok_or(AssetError::Empty)?;
        Ok(Self { triangles, bounds })
    }

    /// Axis-aligned box centered on the origin.
    pub fn cuboid(half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            triangles: cuboid_triangles(Vec3::ZERO, half),
            bounds: Aabb {
                min: -half,
                max: half,
            },
        }
    }

    pub fn triangles(&self) -> &[[Vec3; 3]] {
        &self.triangles
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Nearest hit parameter for a ray given in this mesh's local space.
    pub fn ray_hit(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        self.bounds.ray_hit(origin, dir)?;
        self.triangles
            .iter()
            .filter_map(|tri| ray_triangle(origin, dir, tri))
            .min_by(f32::total_cmp)
    }
}

/// Twelve outward-wound triangles of a box.
pub fn cuboid_triangles(center: Vec3, half: Vec3) -> Vec<[Vec3; 3]> {
    let c = |sx: f32, sy: f32, sz: f32| center + half * Vec3::new(sx, sy, sz);
    let quads = [
        // +x, -x
        [c(1., -1., -1.), c(1., 1., -1.), c(1., 1., 1.), c(1., -1., 1.)],
        [c(-1., -1., 1.), c(-1., 1., 1.), c(-1., 1., -1.), c(-1., -1., -1.)],
        // +y, -y
        [c(-1., 1., -1.), c(-1., 1., 1.), c(1., 1., 1.), c(1., 1., -1.)],
        [c(-1., -1., 1.), c(-1., -1., -1.), c(1., -1., -1.), c(1., -1., 1.)],
        // +z, -z
        [c(-1., -1., 1.), c(1., -1., 1.), c(1., 1., 1.), c(-1., 1., 1.)],
        [c(1., -1., -1.), c(-1., -1., -1.), c(-1., 1., -1.), c(1., 1., -1.)],
    ];
    quads
        .iter()
        .flat_map(|q| [[q[0], q[1], q[2]], [q[0], q[2], q[3]]])
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u32);

/// Position, Euler rotation (XYZ order, radians) and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let rot = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rot, self.position)
    }
}

#[derive(Clone, Debug)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub transform: Transform,
    pub mesh: PickMesh,
}

impl SceneObject {
    pub fn new(id: ObjectId, name: impl Into<String>, transform: Transform, mesh: PickMesh) -> Self {
        Self {
            id,
            name: name.into(),
            transform,
            mesh,
        }
    }

    /// World-space distance to the nearest hit, if any. A transform with a
    /// zero scale axis has no volume and is never hit.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        if self.transform.scale.cmpeq(Vec3::ZERO).any() {
            return None;
        }
        let inv = self.transform.matrix().inverse();
        if !inv.is_finite() {
            return None;
        }
        let origin = inv.transform_point3(ray.origin);
        let dir = inv.transform_vector3(ray.dir);
        self.mesh.ray_hit(origin, dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_at(position: Vec3) -> SceneObject {
        SceneObject::new(
            ObjectId(1),
            "box",
            Transform::from_position(position),
            PickMesh::cuboid(Vec3::splat(0.5)),
        )
    }

    #[test]
    fn triangle_hit_and_miss() {
        let tri = [
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let origin = Vec3::new(0.0, 0.0, 3.0);
        assert_eq!(ray_triangle(origin, Vec3::NEG_Z, &tri), Some(3.0));
        // Back side is still a hit.
        assert_eq!(ray_triangle(-origin, Vec3::Z, &tri), Some(3.0));
        // Behind the origin.
        assert!(ray_triangle(origin, Vec3::Z, &tri).is_none());
        // Outside the edges.
        assert!(ray_triangle(Vec3::new(2.0, 0.0, 3.0), Vec3::NEG_Z, &tri).is_none());
        // Parallel.
        assert!(ray_triangle(origin, Vec3::X, &tri).is_none());
    }

    #[test]
    fn aabb_slab_test_handles_inside_and_axis_parallel_rays() {
        let b = Aabb {
            min: Vec3::splat(-1.0),
            max: Vec3::splat(1.0),
        };
        assert_eq!(b.ray_hit(Vec3::new(0.0, 0.0, -5.0), Vec3::Z), Some(4.0));
        assert_eq!(b.ray_hit(Vec3::ZERO, Vec3::X), Some(0.0));
        assert!(b.ray_hit(Vec3::new(0.0, 2.0, -5.0), Vec3::Z).is_none());
        assert!(b.ray_hit(Vec3::new(0.0, 0.0, 5.0), Vec3::Z).is_none());
    }

    #[test]
    fn object_hit_distance_is_world_space() {
        let obj = unit_box_at(Vec3::new(0.0, 0.0, -3.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let t = obj.intersect(&ray).unwrap();
        assert!((t - 2.5).abs() < 1e-5);
    }

    #[test]
    fn scaled_and_rotated_object_is_hit_where_it_appears() {
        let mut obj = unit_box_at(Vec3::new(0.0, 0.0, -5.0));
        obj.transform.scale = Vec3::new(4.0, 1.0, 1.0);
        // Ray that would miss the unscaled box.
        let ray = Ray::new(Vec3::new(1.5, 0.0, 0.0), Vec3::NEG_Z);
        assert!(obj.intersect(&ray).is_some());
        // Quarter turn about Z moves the long axis to Y.
        obj.transform.rotation.z = std::f32::consts::FRAC_PI_2;
        assert!(obj.intersect(&ray).is_none());
        let ray_up = Ray::new(Vec3::new(0.0, 1.5, 0.0), Vec3::NEG_Z);
        let t = obj.intersect(&ray_up).unwrap();
        assert!((t - 4.5).abs() < 1e-4);
    }

    #[test]
    fn tiny_scale_object_is_still_hit() {
        // Centimetre-authored mesh shrunk to 0.4 world units.
        let mut obj = SceneObject::new(
            ObjectId(2),
            "small",
            Transform::default(),
            PickMesh::cuboid(Vec3::splat(50.0)),
        );
        obj.transform.scale = Vec3::splat(0.004);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let t = obj.intersect(&ray).unwrap();
        assert!((t - 4.8).abs() < 1e-4);
    }

    #[test]
    fn flattened_object_is_never_hit() {
        let mut obj = unit_box_at(Vec3::ZERO);
        obj.transform.scale = Vec3::new(1.0, 0.0, 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(obj.intersect(&ray).is_none());
    }

    #[test]
    fn empty_mesh_is_rejected() {
        assert_eq!(
            PickMesh::from_triangles(Vec::new()).err(),
            Some(AssetError::Empty)
        );
    }

    #[test]
    fn zero_scale_object_is_never_hit() {
        let mut obj = unit_box_at(Vec3::ZERO);
        obj.transform.scale = Vec3::ZERO;
        assert!(obj
            .intersect(&Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z))
            .is_none());
    }
}
