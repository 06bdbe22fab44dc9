/*
lib.rs

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

//! Delvekit builds procedural dungeons made of rectangular rooms joined by corridors.
//!
//! ```
//! use delvekit::{GeneratorSettings, generate_seeded, is_fully_connected};
//!
//! let settings = GeneratorSettings::default();
//! let dungeon = generate_seeded(settings, 42).unwrap();
//! println!("{} rooms", dungeon.rooms().len());
//! # let _ = is_fully_connected(&dungeon);
//! ```

pub mod generator;
pub mod saver;

pub use generator::corridors::{Axis, Corridor, CorridorError, CorridorId};
pub use generator::dungeon::{Dungeon, DungeonError};
pub use generator::dungeon_generator::{DungeonGenerator, GeneratorError, generate_seeded};
pub use generator::rect::Rect;
pub use generator::regions::{Region, RegionId, RegionState};
pub use generator::rooms::{Room, RoomId};
pub use generator::settings::{GeneratorSettings, Preset, SettingsError};
pub use generator::tiles::{CellType, TileGrid};
pub use generator::validator::{Violation, check_dungeon, find_violation, is_fully_connected};
