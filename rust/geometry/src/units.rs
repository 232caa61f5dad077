// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit rounding for emitted geometry
//!
//! World units are metres. Emitted extents are kept to millimetre precision.

use crate::types::Vec3;

/// Millimetres per metre
pub const MILLIMETRES_PER_METRE: f64 = 1000.0;

/// Round a length in metres to millimetre precision (3 decimal places)
#[inline]
pub fn round3(value: f64) -> f64 {
    let rounded = (value * MILLIMETRES_PER_METRE).round() / MILLIMETRES_PER_METRE;
    // Avoid emitting -0.0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Round every component of a vector to millimetre precision
#[inline]
pub fn round3_vec(v: Vec3) -> Vec3 {
    Vec3::new(round3(v.x), round3(v.y), round3(v.z))
}

/// Format a length for preview labels, e.g. `4.00m`
pub fn format_metres(value: f64) -> String {
    format!("{:.2}m", value)
}
