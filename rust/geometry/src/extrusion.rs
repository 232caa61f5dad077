// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion operations - converting 2D profiles to 3D meshes

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::profile::{create_rectangle, Profile2D, Triangulation};
use crate::types::Vec3;
use nalgebra::{Matrix4, Point2, Point3, Rotation3, Vector3};
use std::f64::consts::FRAC_PI_2;

/// Extrude a 2D profile along the Z axis
#[inline]
pub fn extrude_profile(
    profile: &Profile2D,
    depth: f64,
    transform: Option<Matrix4<f64>>,
) -> Result<Mesh> {
    if depth <= 0.0 {
        return Err(Error::InvalidExtrusion(
            "Depth must be positive".to_string(),
        ));
    }

    let triangulation = profile.triangulate()?;

    let total_vertices = triangulation.points.len() * 2 + profile.outer.len() * 4;
    let mut mesh = Mesh::with_capacity(
        total_vertices,
        triangulation.indices.len() * 2 + profile.outer.len() * 6,
    );

    create_cap_mesh(&triangulation, 0.0, Vector3::new(0.0, 0.0, -1.0), &mut mesh);
    create_cap_mesh(&triangulation, depth, Vector3::new(0.0, 0.0, 1.0), &mut mesh);
    create_side_walls(&profile.outer, depth, &mut mesh);

    if let Some(mat) = transform {
        apply_transform(&mut mesh, &mat);
    }

    Ok(mesh)
}

/// Build an axis-aligned box mesh centered at the origin
///
/// `size.x` and `size.z` span the footprint, `size.y` is the vertical extent.
/// The footprint is extruded along local Z and then turned upright so the
/// extrusion runs along +Y.
pub fn box_mesh(size: Vec3) -> Result<Mesh> {
    if size.x <= 0.0 || size.z <= 0.0 {
        return Err(Error::InvalidProfile(format!(
            "Box footprint must be positive, got {} x {}",
            size.x, size.z
        )));
    }

    let footprint = create_rectangle(size.x, size.z);

    // Local Z becomes world +Y, local Y becomes world -Z
    let upright = Rotation3::from_axis_angle(&Vector3::x_axis(), -FRAC_PI_2).to_homogeneous();
    let recenter = Matrix4::new_translation(&Vector3::new(0.0, -size.y / 2.0, 0.0));

    extrude_profile(&footprint, size.y, Some(recenter * upright))
}

/// Build a box mesh placed in the world
///
/// The box from [`box_mesh`] is turned by `yaw` about +Y, so its local X axis
/// points along `(cos yaw, 0, -sin yaw)`, and then moved to `center`.
pub fn posed_box_mesh(size: Vec3, yaw: f64, center: Point3<f64>) -> Result<Mesh> {
    let mut mesh = box_mesh(size)?;

    let rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), yaw).to_homogeneous();
    let translation = Matrix4::new_translation(&center.coords);
    apply_transform(&mut mesh, &(translation * rotation));

    Ok(mesh)
}

/// Create a cap (top or bottom) mesh
#[inline]
fn create_cap_mesh(triangulation: &Triangulation, z: f64, normal: Vector3<f64>, mesh: &mut Mesh) {
    let base_index = mesh.vertex_count() as u32;

    for point in &triangulation.points {
        mesh.add_vertex(Point3::new(point.x, point.y, z), normal);
    }

    for i in (0..triangulation.indices.len()).step_by(3) {
        let i0 = base_index + triangulation.indices[i] as u32;
        let i1 = base_index + triangulation.indices[i + 1] as u32;
        let i2 = base_index + triangulation.indices[i + 2] as u32;

        // Reverse winding for bottom cap
        if z == 0.0 {
            mesh.add_triangle(i0, i2, i1);
        } else {
            mesh.add_triangle(i0, i1, i2);
        }
    }
}

/// Create side walls for a profile boundary
#[inline]
fn create_side_walls(boundary: &[Point2<f64>], depth: f64, mesh: &mut Mesh) {
    let base_index = mesh.vertex_count() as u32;
    let mut quad_count = 0u32;

    for i in 0..boundary.len() {
        let j = (i + 1) % boundary.len();

        let p0 = &boundary[i];
        let p1 = &boundary[j];

        let edge = Vector3::new(p1.x - p0.x, p1.y - p0.y, 0.0);
        let normal = match Vector3::new(edge.y, -edge.x, 0.0).try_normalize(1e-10) {
            Some(n) => n,
            None => continue, // duplicate consecutive points
        };

        let idx = base_index + (quad_count * 4);
        mesh.add_vertex(Point3::new(p0.x, p0.y, 0.0), normal);
        mesh.add_vertex(Point3::new(p1.x, p1.y, 0.0), normal);
        mesh.add_vertex(Point3::new(p1.x, p1.y, depth), normal);
        mesh.add_vertex(Point3::new(p0.x, p0.y, depth), normal);

        mesh.add_triangle(idx, idx + 1, idx + 2);
        mesh.add_triangle(idx, idx + 2, idx + 3);

        quad_count += 1;
    }
}

/// Apply transformation matrix to mesh
#[inline]
pub fn apply_transform(mesh: &mut Mesh, transform: &Matrix4<f64>) {
    mesh.positions.chunks_exact_mut(3).for_each(|chunk| {
        let point = Point3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let transformed = transform.transform_point(&point);
        chunk[0] = transformed.x as f32;
        chunk[1] = transformed.y as f32;
        chunk[2] = transformed.z as f32;
    });

    // Inverse transpose keeps normals perpendicular under non-uniform scale
    let normal_matrix = transform.try_inverse().unwrap_or(*transform).transpose();

    mesh.normals.chunks_exact_mut(3).for_each(|chunk| {
        let normal = Vector3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let transformed = (normal_matrix * normal.to_homogeneous()).xyz().normalize();
        chunk[0] = transformed.x as f32;
        chunk[1] = transformed.y as f32;
        chunk[2] = transformed.z as f32;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_extrude_rectangle() {
        let profile = create_rectangle(10.0, 5.0);
        let mesh = extrude_profile(&profile, 20.0, None).unwrap();

        assert_eq!(mesh.vertex_count(), 4 * 2 + 4 * 4);
        assert_eq!(mesh.triangle_count(), 2 * 2 + 4 * 2);

        let (min, max) = mesh.bounds();
        assert_abs_diff_eq!(min.x, -5.0, epsilon = 1e-4);
        assert_abs_diff_eq!(max.x, 5.0, epsilon = 1e-4);
        assert_abs_diff_eq!(min.y, -2.5, epsilon = 1e-4);
        assert_abs_diff_eq!(max.y, 2.5, epsilon = 1e-4);
        assert_abs_diff_eq!(min.z, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(max.z, 20.0, epsilon = 1e-4);
    }

    #[test]
    fn test_extrude_with_transform() {
        let profile = create_rectangle(10.0, 5.0);
        let transform = Matrix4::new_translation(&Vector3::new(100.0, 200.0, 300.0));

        let mesh = extrude_profile(&profile, 20.0, Some(transform)).unwrap();

        let (min, max) = mesh.bounds();
        assert_abs_diff_eq!(min.x, 95.0, epsilon = 1e-3);
        assert_abs_diff_eq!(max.x, 105.0, epsilon = 1e-3);
        assert_abs_diff_eq!(min.z, 300.0, epsilon = 1e-3);
        assert_abs_diff_eq!(max.z, 320.0, epsilon = 1e-3);
    }

    #[test]
    fn test_box_mesh_is_centered() {
        let mesh = box_mesh(Vec3::new(5.0, 3.0, 0.2)).unwrap();

        let (min, max) = mesh.bounds();
        assert_abs_diff_eq!(min.x, -2.5, epsilon = 1e-5);
        assert_abs_diff_eq!(max.x, 2.5, epsilon = 1e-5);
        assert_abs_diff_eq!(min.y, -1.5, epsilon = 1e-5);
        assert_abs_diff_eq!(max.y, 1.5, epsilon = 1e-5);
        assert_abs_diff_eq!(min.z, -0.1, epsilon = 1e-5);
        assert_abs_diff_eq!(max.z, 0.1, epsilon = 1e-5);
    }

    #[test]
    fn test_box_mesh_normals_stay_unit() {
        let mesh = box_mesh(Vec3::new(4.0, 0.2, 3.0)).unwrap();

        for n in mesh.normals.chunks_exact(3) {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert_abs_diff_eq!(len, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_posed_box_follows_yaw_and_center() {
        // Quarter turn clockwise seen from above: local X runs along +Z
        let mesh = posed_box_mesh(Vec3::new(5.0, 3.0, 0.2), -FRAC_PI_2, Point3::new(10.0, 1.5, 12.5)).unwrap();

        let (min, max) = mesh.bounds();
        assert_abs_diff_eq!(min.x, 9.9, epsilon = 1e-5);
        assert_abs_diff_eq!(max.x, 10.1, epsilon = 1e-5);
        assert_abs_diff_eq!(min.y, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(max.y, 3.0, epsilon = 1e-5);
        assert_abs_diff_eq!(min.z, 10.0, epsilon = 1e-5);
        assert_abs_diff_eq!(max.z, 15.0, epsilon = 1e-5);
    }

    #[test]
    fn test_invalid_depth() {
        let profile = create_rectangle(10.0, 5.0);
        assert!(extrude_profile(&profile, -1.0, None).is_err());
        assert!(box_mesh(Vec3::new(1.0, 0.0, 1.0)).is_err());
    }
}
