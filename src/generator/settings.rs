/*
settings.rs

Copyright 2026 The Delvekit Authors

This file is part of Delvekit.

Delvekit is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Delvekit is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Delvekit. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Dungeon generator parameters.
//!
//! The [`GeneratorSettings`] object groups all the tunable parameters.
//! It can be built from a [`Preset`], loaded from a JSON file (see [`crate::saver::settings`]),
//! or assembled field by field.
//! [`GeneratorSettings::validate`] must succeed before the settings are used; the
//! [`super::dungeon_generator::DungeonGenerator`] object calls it when it is created.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default maximum number of passes over the leaf regions while splitting.
pub const DEFAULT_MAX_SPLIT_PASSES: usize = 100;

/// Invalid generator parameter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("dungeon size must be positive (got {width}x{height})")]
    EmptyDungeon { width: u32, height: u32 },

    #[error("minimum area to split a region cannot be less than 1 (got {0})")]
    MinSplitArea(f32),

    #[error("minimum region length cannot be less than 1 (got {0})")]
    MinLength(f32),

    #[error("maximum area for stopping the splits early cannot be negative (got {0})")]
    MaxAreaForStop(f32),

    #[error("chance to stop splitting must be between 0 and 1 (got {0})")]
    StopChance(f32),

    #[error("corridor width cannot be less than 1")]
    CorridorWidth,

    #[error("room occupancy must be greater than 0 and at most 1 (got {0})")]
    Occupancy(f32),

    #[error("maximum room occupancy ({max}) cannot be less than the minimum ({min})")]
    OccupancyOrder { min: f32, max: f32 },

    #[error("scale factor cannot be less than 1")]
    Scale,

    #[error("maximum number of split passes cannot be less than 1")]
    MaxSplitPasses,
}

/// Parameters of the dungeon generation process.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Width of the dungeon, in tiles.
    pub width: u32,

    /// Height of the dungeon, in tiles.
    pub height: u32,

    /// A region with a smaller area stops splitting.
    /// Both halves of a split must also have at least this area.
    pub min_split_area: f32,

    /// A region side must be at least twice this length to be split along that axis.
    /// Both halves of a split must also have sides at least this long.
    pub min_length: f32,

    /// Regions smaller than this area may randomly stop splitting, which adds variety in room
    /// sizes.
    pub max_area_for_stop: f32,

    /// Chance, between 0 and 1, that a region eligible for early stopping becomes a leaf.
    pub stop_chance: f32,

    /// Regions must be deeper than this in the tree before early stopping is considered.
    pub min_depth_to_stop: u32,

    /// Corridor width, also used as the margin between a corridor and the room corners.
    pub corridor_width: u32,

    /// Minimum fraction of each region side that its room occupies after shrinking.
    pub min_occupancy: f32,

    /// Maximum fraction of each region side that its room occupies after shrinking.
    pub max_occupancy: f32,

    /// Uniform scale factor applied to the whole dungeon after generation.
    pub scale: u32,

    /// Safety bound on the number of split passes over the leaf regions.
    pub max_split_passes: usize,

    /// Join the parts of the dungeon that the sibling corridors left disconnected.
    pub repair_connectivity: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Preset::default().settings()
    }
}

impl GeneratorSettings {
    /// Verify that all the parameters are in range.
    ///
    /// # Errors
    ///
    /// Return the first out-of-range parameter. NaN values are always rejected.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width == 0 || self.height == 0 {
            return Err(SettingsError::EmptyDungeon {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.min_split_area >= 1.0) {
            return Err(SettingsError::MinSplitArea(self.min_split_area));
        }
        if !(self.min_length >= 1.0) {
            return Err(SettingsError::MinLength(self.min_length));
        }
        if !(self.max_area_for_stop >= 0.0) {
            return Err(SettingsError::MaxAreaForStop(self.max_area_for_stop));
        }
        if !(0.0..=1.0).contains(&self.stop_chance) {
            return Err(SettingsError::StopChance(self.stop_chance));
        }
        if self.corridor_width < 1 {
            return Err(SettingsError::CorridorWidth);
        }
        for occupancy in [self.min_occupancy, self.max_occupancy] {
            if !(occupancy > 0.0 && occupancy <= 1.0) {
                return Err(SettingsError::Occupancy(occupancy));
            }
        }
        if self.min_occupancy > self.max_occupancy {
            return Err(SettingsError::OccupancyOrder {
                min: self.min_occupancy,
                max: self.max_occupancy,
            });
        }
        if self.scale < 1 {
            return Err(SettingsError::Scale);
        }
        if self.max_split_passes < 1 {
            return Err(SettingsError::MaxSplitPasses);
        }
        Ok(())
    }
}

/// Built-in parameter sets.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, Default,
)]
pub enum Preset {
    /// Small dungeon with a handful of rooms.
    Compact,
    #[default]
    Standard,
    /// Wide dungeon with many rooms of varied sizes.
    Sprawling,
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Preset::Compact => write!(f, "compact"),
            Preset::Standard => write!(f, "standard"),
            Preset::Sprawling => write!(f, "sprawling"),
        }
    }
}

impl Preset {
    /// Return the generator parameters for the preset.
    pub fn settings(&self) -> GeneratorSettings {
        match self {
            Preset::Compact => GeneratorSettings {
                width: 48,
                height: 48,
                min_split_area: 100.0,
                min_length: 8.0,
                max_area_for_stop: 400.0,
                stop_chance: 0.2,
                min_depth_to_stop: 2,
                corridor_width: 1,
                min_occupancy: 0.7,
                max_occupancy: 0.9,
                scale: 1,
                max_split_passes: DEFAULT_MAX_SPLIT_PASSES,
                repair_connectivity: true,
            },
            Preset::Standard => GeneratorSettings {
                width: 96,
                height: 96,
                min_split_area: 256.0,
                min_length: 10.0,
                max_area_for_stop: 1024.0,
                stop_chance: 0.25,
                min_depth_to_stop: 2,
                corridor_width: 1,
                min_occupancy: 0.7,
                max_occupancy: 0.9,
                scale: 1,
                max_split_passes: DEFAULT_MAX_SPLIT_PASSES,
                repair_connectivity: true,
            },
            Preset::Sprawling => GeneratorSettings {
                width: 160,
                height: 120,
                min_split_area: 400.0,
                min_length: 14.0,
                max_area_for_stop: 2500.0,
                stop_chance: 0.3,
                min_depth_to_stop: 3,
                corridor_width: 2,
                min_occupancy: 0.7,
                max_occupancy: 0.9,
                scale: 1,
                max_split_passes: DEFAULT_MAX_SPLIT_PASSES,
                repair_connectivity: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for preset in [Preset::Compact, Preset::Standard, Preset::Sprawling] {
            assert_eq!(preset.settings().validate(), Ok(()), "preset {preset}");
        }
        assert_eq!(GeneratorSettings::default(), Preset::Standard.settings());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let base = GeneratorSettings::default();

        let s = GeneratorSettings {
            width: 0,
            ..base.clone()
        };
        assert!(matches!(
            s.validate(),
            Err(SettingsError::EmptyDungeon { .. })
        ));

        let s = GeneratorSettings {
            min_split_area: 0.5,
            ..base.clone()
        };
        assert_eq!(s.validate(), Err(SettingsError::MinSplitArea(0.5)));

        let s = GeneratorSettings {
            min_length: 0.0,
            ..base.clone()
        };
        assert_eq!(s.validate(), Err(SettingsError::MinLength(0.0)));

        let s = GeneratorSettings {
            max_area_for_stop: -1.0,
            ..base.clone()
        };
        assert_eq!(s.validate(), Err(SettingsError::MaxAreaForStop(-1.0)));

        let s = GeneratorSettings {
            stop_chance: 1.5,
            ..base.clone()
        };
        assert_eq!(s.validate(), Err(SettingsError::StopChance(1.5)));

        let s = GeneratorSettings {
            corridor_width: 0,
            ..base.clone()
        };
        assert_eq!(s.validate(), Err(SettingsError::CorridorWidth));

        let s = GeneratorSettings {
            max_occupancy: 1.2,
            ..base.clone()
        };
        assert_eq!(s.validate(), Err(SettingsError::Occupancy(1.2)));

        let s = GeneratorSettings {
            min_occupancy: 0.9,
            max_occupancy: 0.6,
            ..base.clone()
        };
        assert_eq!(
            s.validate(),
            Err(SettingsError::OccupancyOrder { min: 0.9, max: 0.6 })
        );

        let s = GeneratorSettings {
            scale: 0,
            ..base.clone()
        };
        assert_eq!(s.validate(), Err(SettingsError::Scale));

        let s = GeneratorSettings {
            max_split_passes: 0,
            ..base
        };
        assert_eq!(s.validate(), Err(SettingsError::MaxSplitPasses));
    }

    #[test]
    fn test_rejects_nan() {
        let s = GeneratorSettings {
            min_length: f32::NAN,
            ..GeneratorSettings::default()
        };
        assert!(matches!(s.validate(), Err(SettingsError::MinLength(_))));

        let s = GeneratorSettings {
            stop_chance: f32::NAN,
            ..GeneratorSettings::default()
        };
        assert!(matches!(s.validate(), Err(SettingsError::StopChance(_))));
    }

    #[test]
    fn test_missing_json_fields_use_defaults() {
        let s: GeneratorSettings =
            serde_json::from_str(r#"{"width": 30, "height": 20, "scale": 2}"#).unwrap();
        assert_eq!(s.width, 30);
        assert_eq!(s.height, 20);
        assert_eq!(s.scale, 2);
        assert_eq!(s.min_length, GeneratorSettings::default().min_length);
    }
}
