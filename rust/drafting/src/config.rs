// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Drafting configuration.
//!
//! Defaults match the fixed constants of the drafting tool; any of them can be
//! overridden from `BLUEPRINT_*` environment variables or a JSON document.

use blueprint_geometry::DEFAULT_ANGLE_TOLERANCE_DEG;
use serde::{Deserialize, Serialize};

use crate::error::{DraftError, Result};

/// Drafting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftingConfig {
    /// Angular tolerance for canonical bearings, in degrees.
    pub angle_tolerance_deg: f64,
    /// Wall thickness in metres.
    pub wall_thickness: f64,
    /// Height of walls drawn in line mode, in metres.
    pub wall_height: f64,
    /// Default room height, in metres.
    pub room_height: f64,
    /// Room width (X extent) used by "generate room", in metres.
    pub room_width: f64,
    /// Room length (Z extent) used by "generate room", in metres.
    pub room_length: f64,
    /// Vertical distance between building levels, in metres.
    pub level_height: f64,
    /// Price per metre of freehand wall.
    pub price_per_unit_length: f64,
    /// Price per square metre of floor slab.
    pub price_per_area: f64,
    /// Flat price of each perimeter wall emitted in room mode.
    pub room_wall_price: f64,
    /// Factor applied to emitted positions for the consuming renderer.
    pub world_to_output_scale: f64,
    /// Height at which previews float above the ground plane.
    pub preview_height: f64,
    /// Color tags cycled per building level.
    pub level_colors: Vec<String>,
}

impl Default for DraftingConfig {
    fn default() -> Self {
        Self {
            angle_tolerance_deg: DEFAULT_ANGLE_TOLERANCE_DEG,
            wall_thickness: 0.2,
            wall_height: 3.0,
            room_height: 3.0,
            room_width: 5.0,
            room_length: 4.0,
            level_height: 3.0,
            price_per_unit_length: 10.0,
            price_per_area: 50.0,
            room_wall_price: 10.0,
            world_to_output_scale: 0.5,
            preview_height: 0.01,
            level_colors: ["#d9d4c7", "#c7d4d9", "#d9c7cf", "#cfd9c7"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Read a float from the environment, keeping `fallback` when unset or malformed.
fn env_f64(name: &str, fallback: f64) -> f64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(fallback)
}

impl DraftingConfig {
    /// Load configuration from environment variables on top of the defaults.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Overlay `BLUEPRINT_*` environment variables on this configuration.
    pub fn with_env_overrides(self) -> Self {
        Self {
            angle_tolerance_deg: env_f64("BLUEPRINT_ANGLE_TOLERANCE_DEG", self.angle_tolerance_deg),
            wall_thickness: env_f64("BLUEPRINT_WALL_THICKNESS", self.wall_thickness),
            wall_height: env_f64("BLUEPRINT_WALL_HEIGHT", self.wall_height),
            room_height: env_f64("BLUEPRINT_ROOM_HEIGHT", self.room_height),
            room_width: env_f64("BLUEPRINT_ROOM_WIDTH", self.room_width),
            room_length: env_f64("BLUEPRINT_ROOM_LENGTH", self.room_length),
            level_height: env_f64("BLUEPRINT_LEVEL_HEIGHT", self.level_height),
            price_per_unit_length: env_f64("BLUEPRINT_PRICE_PER_UNIT_LENGTH", self.price_per_unit_length),
            price_per_area: env_f64("BLUEPRINT_PRICE_PER_AREA", self.price_per_area),
            room_wall_price: env_f64("BLUEPRINT_ROOM_WALL_PRICE", self.room_wall_price),
            world_to_output_scale: env_f64("BLUEPRINT_WORLD_TO_OUTPUT_SCALE", self.world_to_output_scale),
            preview_height: env_f64("BLUEPRINT_PREVIEW_HEIGHT", self.preview_height),
            level_colors: std::env::var("BLUEPRINT_LEVEL_COLORS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect::<Vec<_>>()
                })
                .ok()
                .filter(|colors| !colors.is_empty())
                .unwrap_or(self.level_colors),
        }
    }

    /// Check that every dimension and rate is usable.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("angle_tolerance_deg", self.angle_tolerance_deg),
            ("wall_thickness", self.wall_thickness),
            ("wall_height", self.wall_height),
            ("room_height", self.room_height),
            ("room_width", self.room_width),
            ("room_length", self.room_length),
            ("level_height", self.level_height),
            ("world_to_output_scale", self.world_to_output_scale),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(DraftError::Config(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("price_per_unit_length", self.price_per_unit_length),
            ("price_per_area", self.price_per_area),
            ("room_wall_price", self.room_wall_price),
            ("preview_height", self.preview_height),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(DraftError::Config(format!("{name} must not be negative, got {value}")));
            }
        }

        if self.wall_thickness >= self.room_width.min(self.room_length) {
            return Err(DraftError::Config(format!(
                "wall_thickness {} leaves no room inside a {} x {} footprint",
                self.wall_thickness, self.room_width, self.room_length
            )));
        }

        Ok(())
    }

    /// Color tag for a building level, cycling through the palette.
    pub fn level_color(&self, index: u32) -> String {
        if self.level_colors.is_empty() {
            return String::new();
        }
        self.level_colors[index as usize % self.level_colors.len()].clone()
    }
}
