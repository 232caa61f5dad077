// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plan-level checks that combine classification, crossing and box meshing.

use approx::assert_relative_eq;
use blueprint_geometry::{
    box_mesh, intersects, is_segment_aligned, snap_bearing, BoundingBox, Point2D, Segment, SegmentId, Vec3,
    DEFAULT_ANGLE_TOLERANCE_DEG,
};

fn seg(id: u64, from: (f64, f64), to: (f64, f64)) -> Segment {
    Segment::new(SegmentId(id), Point2D::new(from.0, from.1), Point2D::new(to.0, to.1)).unwrap()
}

#[test]
fn test_square_outline_is_fully_aligned() {
    let corners = [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
    let outline: Vec<Segment> = (0..4)
        .map(|i| seg(i as u64, corners[i], corners[(i + 1) % 4]))
        .collect();

    assert!(outline.iter().all(|s| is_segment_aligned(s, DEFAULT_ANGLE_TOLERANCE_DEG)));
    let bearings: Vec<Option<f64>> = outline
        .iter()
        .map(|s| snap_bearing(s.bearing_deg(), DEFAULT_ANGLE_TOLERANCE_DEG))
        .collect();
    assert_eq!(bearings, vec![Some(0.0), Some(90.0), Some(180.0), Some(-90.0)]);
}

#[test]
fn test_diagonal_through_square_crosses() {
    let outline = [seg(0, (0.0, 0.0), (4.0, 0.0)), seg(1, (4.0, 0.0), (4.0, 4.0))];
    let diagonal = seg(2, (-1.0, 2.0), (5.0, 2.0));
    let inside = seg(3, (1.0, 1.0), (3.0, 3.0));

    assert!(intersects(&diagonal, &outline));
    assert!(!intersects(&inside, &outline));
    assert!(is_segment_aligned(&inside, DEFAULT_ANGLE_TOLERANCE_DEG));
}

#[test]
fn test_wall_box_bounds() {
    let mesh = box_mesh(Vec3::new(7.5, 2.8, 0.25)).unwrap();
    let bbox = BoundingBox::from_mesh(&mesh);

    assert_eq!(mesh.triangle_count(), 12);
    assert_relative_eq!(bbox.size.x, 7.5);
    assert_relative_eq!(bbox.size.y, 2.8);
    assert_relative_eq!(bbox.size.z, 0.25);
    assert_eq!(bbox.center, Vec3::ZERO);
}
