// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tunable constants shared by the pushbuttons.

use archforge_model::Color;

/// Feet to meters.
pub const FEET_TO_METERS: f64 = 0.3048;

/// Settings a pushbutton session runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Projection line color for flagged elements.
    pub highlight_color: Color,
    /// Projection line color for checked elements that are not flagged.
    pub default_color: Color,
    /// Tolerance on the unit direction components used to classify grids
    /// as vertical or horizontal.
    pub orientation_tolerance: f64,
    /// Marker appended to names during the first renaming pass.
    pub temp_marker: String,
    pub ceiling_bands: CeilingBands,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            highlight_color: Color::RED,
            default_color: Color::BLACK,
            orientation_tolerance: 0.01,
            temp_marker: "_temp".into(),
            ceiling_bands: CeilingBands::default(),
        }
    }
}

/// Color bands for ceiling heights, in meters.
#[derive(Debug, Clone, PartialEq)]
pub struct CeilingBands {
    /// Heights below this use `low_color`.
    pub low: f64,
    /// Heights above this use `high_color`.
    pub high: f64,
    /// Height covered by one palette entry.
    pub step: f64,
    pub low_color: Color,
    pub high_color: Color,
    /// Colors cycled through between `low` and `high`.
    pub palette: Vec<Color>,
}

impl Default for CeilingBands {
    fn default() -> Self {
        Self {
            low: 1.5,
            high: 5.0,
            step: 0.1,
            low_color: Color::WHITE,
            high_color: Color::BLACK,
            palette: vec![
                Color::new(255, 0, 0),
                Color::new(0, 255, 0),
                Color::new(0, 0, 255),
                Color::new(255, 255, 0),
                Color::new(0, 255, 255),
                Color::new(255, 0, 255),
                Color::new(128, 0, 0),
                Color::new(0, 128, 0),
                Color::new(0, 0, 128),
                Color::new(128, 128, 0),
            ],
        }
    }
}

impl CeilingBands {
    /// Color for a ceiling height given in meters.
    pub fn color_for(&self, height: f64) -> Color {
        if height < self.low {
            return self.low_color;
        }
        if height > self.high || self.palette.is_empty() || self.step <= 0.0 {
            return self.high_color;
        }
        let band = ((height - self.low) / self.step) as usize;
        self.palette[band % self.palette.len()]
    }
}
