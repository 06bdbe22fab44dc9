/*
dungeon_generator.rs

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

//! Generate a random dungeon.

use log::{Level, debug, info, log_enabled, warn};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;
use thiserror::Error;

use super::adjacency;
use super::connections::Connections;
use super::corridors;
use super::dungeon::Dungeon;
use super::regions::RegionSplitter;
use super::rooms;
use super::settings::{GeneratorSettings, SettingsError};
use super::tiles::TileGrid;
use super::validator;

/// Type of errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    /// The generator parameters are out of range.
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),

    /// No generated dungeon passed the checks.
    #[error("no valid dungeon after {attempts} attempts")]
    ValidationFailed { attempts: usize },
}

/// [`DungeonGenerator`] object.
pub struct DungeonGenerator {
    /// Validated parameters.
    settings: GeneratorSettings,

    /// Number of split passes for the last generated dungeon.
    pub passes: usize,

    /// Number of dungeons generated by the last [`DungeonGenerator::generate_checked`] call.
    pub attempts: usize,

    /// Corridors created by the sibling pass for the last generated dungeon.
    pub sibling_corridors: usize,

    /// Corridors added by the connectivity repair for the last generated dungeon.
    pub repair_corridors: usize,

    /// Result of the checks on the last generated dungeon.
    pub valid: bool,

    /// Duration in seconds it took to generate the last dungeon.
    pub duration: f32,

    /// Time when the generation started. Used to compute the [`DungeonGenerator::duration`].
    start: Instant,
}

impl DungeonGenerator {
    /// Create the object.
    ///
    /// # Errors
    ///
    /// The method returns an error if a parameter is out of range.
    pub fn new(settings: GeneratorSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            settings,
            passes: 0,
            attempts: 0,
            sibling_corridors: 0,
            repair_corridors: 0,
            valid: false,
            duration: 0.0,
            start: Instant::now(),
        })
    }

    /// Return the generator parameters.
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Generate and return a dungeon.
    ///
    /// The dungeon is checked after generation, but it is returned even when the checks fail.
    /// The result is available in [`DungeonGenerator::valid`].
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Dungeon {
        self.start = Instant::now();
        let settings: &GeneratorSettings = &self.settings;

        debug!(
            "Generating a {}x{} dungeon",
            settings.width, settings.height
        );
        let mut dungeon: Dungeon = Dungeon::new(settings.width, settings.height);

        let mut splitter: RegionSplitter = RegionSplitter::new(settings);
        splitter.split_until_stable(&mut dungeon, rng);
        self.passes = splitter.passes;

        rooms::place_rooms(&mut dungeon);
        adjacency::compute_adjacency(&mut dungeon);
        rooms::shrink_rooms(
            &mut dungeon,
            settings.min_occupancy,
            settings.max_occupancy,
            rng,
        );

        self.sibling_corridors =
            corridors::connect_sibling_regions(&mut dungeon, settings.corridor_width, rng);
        self.repair_corridors = if settings.repair_connectivity {
            corridors::repair_connectivity(&mut dungeon, settings.corridor_width, rng)
        } else {
            0
        };

        if let Err(e) = dungeon.scale_up(settings.scale) {
            warn!("Cannot scale the dungeon: {e}");
        }

        self.valid = validator::check_dungeon(&dungeon);
        self.duration = self.start.elapsed().as_secs_f32();

        info!(
            "Dungeon generated in {:.3}s: {} regions, {} rooms, {} corridors, valid = {}",
            self.duration,
            dungeon.regions().len(),
            dungeon.rooms().len(),
            dungeon.corridors().len(),
            self.valid
        );
        if log_enabled!(Level::Debug) {
            debug!("Corridor graph:");
            Connections::from_dungeon(&dungeon).debug();
            for line in TileGrid::from_dungeon(&dungeon).to_string().lines() {
                debug!("{line}");
            }
        }
        dungeon
    }

    /// Generate dungeons until one passes the checks and is fully connected.
    ///
    /// # Errors
    ///
    /// The method returns an error if no dungeon is valid after `max_attempts` attempts.
    pub fn generate_checked<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        max_attempts: usize,
    ) -> Result<Dungeon, GeneratorError> {
        self.attempts = 0;

        while self.attempts < max_attempts {
            self.attempts += 1;
            let dungeon: Dungeon = self.generate(rng);
            if self.valid && validator::is_fully_connected(&dungeon) {
                return Ok(dungeon);
            }
            debug!("Attempt {} rejected", self.attempts);
        }
        warn!("No valid dungeon after {} attempts", self.attempts);
        Err(GeneratorError::ValidationFailed {
            attempts: self.attempts,
        })
    }
}

/// Generate a dungeon from the given settings and seed.
///
/// # Errors
///
/// The function returns an error if a parameter is out of range.
pub fn generate_seeded(settings: GeneratorSettings, seed: u64) -> Result<Dungeon, GeneratorError> {
    let mut generator: DungeonGenerator = DungeonGenerator::new(settings)?;
    let mut rng: StdRng = StdRng::seed_from_u64(seed);
    Ok(generator.generate(&mut rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::settings::Preset;

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = GeneratorSettings {
            corridor_width: 0,
            ..GeneratorSettings::default()
        };
        assert!(matches!(
            DungeonGenerator::new(settings.clone()),
            Err(SettingsError::CorridorWidth)
        ));
        assert_eq!(
            generate_seeded(settings, 1),
            Err(GeneratorError::Settings(SettingsError::CorridorWidth))
        );
    }

    #[test]
    fn test_generate_records_statistics() {
        let mut generator = DungeonGenerator::new(Preset::Compact.settings()).unwrap();
        let mut rng = StdRng::seed_from_u64(17);
        let dungeon = generator.generate(&mut rng);

        assert!(generator.passes >= 1);
        assert_eq!(
            generator.sibling_corridors + generator.repair_corridors,
            dungeon.corridors().len()
        );
        assert_eq!(generator.valid, validator::check_dungeon(&dungeon));
        assert!(generator.duration >= 0.0);
    }

    #[test]
    fn test_scale_is_applied() {
        let settings = GeneratorSettings {
            scale: 2,
            ..Preset::Compact.settings()
        };
        let small = generate_seeded(Preset::Compact.settings(), 4).unwrap();
        let large = generate_seeded(settings, 4).unwrap();

        assert_eq!(large.scale, 2);
        assert_eq!(large.rooms().len(), small.rooms().len());
        for (a, b) in small.rooms().iter().zip(large.rooms()) {
            assert_eq!(a.footprint.scaled(2.0), b.footprint);
        }
    }

    #[test]
    fn test_generate_checked_gives_up() {
        // Two rooms that never get a corridor: regions too narrow for the margins
        let settings = GeneratorSettings {
            width: 8,
            height: 4,
            min_split_area: 1.0,
            min_length: 4.0,
            stop_chance: 0.0,
            corridor_width: 3,
            min_occupancy: 0.5,
            max_occupancy: 0.5,
            repair_connectivity: false,
            ..GeneratorSettings::default()
        };
        let mut generator = DungeonGenerator::new(settings).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            generator.generate_checked(&mut rng, 3),
            Err(GeneratorError::ValidationFailed { attempts: 3 })
        );
        assert_eq!(generator.attempts, 3);
    }
}
