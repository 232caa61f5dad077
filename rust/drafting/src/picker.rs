// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ground picking: turning pointer input into a point on the drafting plane.

use blueprint_geometry::Point2D;
use nalgebra::{Point3, Vector3};

/// Maps host pointer input to a ground point, or `None` when it misses the plane.
pub trait GroundPicker {
    type Input;

    fn ground_point(&self, input: &Self::Input) -> Option<Point2D>;
}

/// A world-space pointer ray, as produced by unprojecting through a camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self { origin, direction }
    }
}

/// Horizontal picking plane at a fixed height (y = 0 for the ground).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroundPlane {
    pub height: f64,
}

impl GroundPlane {
    pub fn new(height: f64) -> Self {
        Self { height }
    }
}

impl GroundPicker for GroundPlane {
    type Input = Ray;

    fn ground_point(&self, ray: &Ray) -> Option<Point2D> {
        let dy = ray.direction.y;
        if dy.abs() < 1e-12 {
            return None;
        }

        let t = (self.height - ray.origin.y) / dy;
        if !t.is_finite() || t < 0.0 {
            return None;
        }

        let hit = ray.origin + ray.direction * t;
        Some(Point2D::new(hit.x, hit.z))
    }
}
