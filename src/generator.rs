/*
generator.rs

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

//! Generate random dungeons by binary space partitioning.
//!
//! A [`dungeon::Dungeon`] object is built in several stages:
//!
//! * The root region, which covers the whole dungeon, is recursively split into two sub-regions
//!   by a [`regions::RegionSplitter`] object, until the regions are too small or randomly stop.
//!
//! * Each leaf region receives a room that covers the region ([`rooms::place_rooms`]).
//!   Because these rooms tile the dungeon, the rooms that touch each other are recorded at that
//!   point ([`adjacency::compute_adjacency`]).
//!   The rooms are then shrunk inside their regions ([`rooms::shrink_rooms`]).
//!
//! * Corridors join the rooms of sibling regions ([`corridors::connect_sibling_regions`]).
//!   Because staggered rooms cannot always be joined, a repair pass adds corridors between the
//!   groups of rooms that remain separated ([`corridors::repair_connectivity`]).
//!
//! * Finally the dungeon is scaled and checked ([`validator::check_dungeon`]).
//!
//! The [`dungeon_generator::DungeonGenerator`] object runs all these stages from a
//! [`settings::GeneratorSettings`] object and a random number generator.
//! Given the same settings and the same seed, the generated dungeons are identical.

pub mod adjacency;
pub mod connections;
pub mod corridors;
pub mod dungeon;
pub mod dungeon_generator;
pub mod rect;
pub mod regions;
pub mod rooms;
pub mod settings;
pub mod tiles;
pub mod validator;
