/*
dungeon.rs

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

//! The dungeon aggregate.
//!
//! A [`Dungeon`] owns all its regions, rooms, and corridors.
//! They are stored in vectors and reference each other through their index
//! ([`RegionId`], [`RoomId`], [`CorridorId`]).
//! The region at index 0 is the root of the binary space partitioning tree. All the other regions
//! form the flat list of sub-regions, in the order they were created.

use log::error;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::corridors::{Corridor, CorridorId};
use super::rect::Rect;
use super::regions::{Region, RegionId, RegionState};
use super::rooms::{Room, RoomId};

/// Type of errors.
#[derive(Error, Debug, PartialEq)]
pub enum DungeonError {
    /// Scale factors start at 1.
    #[error("scale factor cannot be less than 1")]
    InvalidScale,

    /// The operation is not implemented.
    #[error("{0} is not supported")]
    Unsupported(&'static str),
}

/// Rooms connected by corridors, inside a tree of regions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Dungeon {
    /// Width of the dungeon, in tiles, before scaling.
    pub width: u32,

    /// Height of the dungeon, in tiles, before scaling.
    pub height: u32,

    /// Scale factor applied to all the footprints so far.
    pub scale: u32,

    /// All the regions. Index 0 is the root region.
    pub(crate) regions: Vec<Region>,

    /// All the rooms. Each leaf region hosts one room.
    pub(crate) rooms: Vec<Room>,

    /// All the corridors.
    pub(crate) corridors: Vec<Corridor>,
}

impl Dungeon {
    /// Create a [`Dungeon`] object with only a root region.
    ///
    /// The root region covers the whole dungeon and is centered on the origin. Odd sizes put the
    /// extra tile on the positive side so that all the coordinates stay integers.
    pub fn new(width: u32, height: u32) -> Self {
        let root_footprint: Rect = Rect::new(
            -((width / 2) as f32),
            -((height / 2) as f32),
            width as f32,
            height as f32,
        );
        Self {
            width,
            height,
            scale: 1,
            regions: vec![Region::new(root_footprint, 0, None)],
            rooms: Vec::new(),
            corridors: Vec::new(),
        }
    }

    /// Return the root region.
    pub fn root(&self) -> &Region {
        &self.regions[0]
    }

    /// Return the ID of the root region.
    pub fn root_id(&self) -> RegionId {
        RegionId(0)
    }

    /// Return the region with the given ID.
    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.0)
    }

    /// Return all the regions, starting with the root region.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Iterate over all the regions except the root, in creation order.
    pub fn sub_regions(&self) -> impl Iterator<Item = (RegionId, &Region)> {
        self.regions
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, r)| (RegionId(i), r))
    }

    /// Return the room with the given ID.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    /// Return all the rooms.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Return the corridor with the given ID.
    pub fn corridor(&self, id: CorridorId) -> Option<&Corridor> {
        self.corridors.get(id.0)
    }

    /// Return all the corridors.
    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    /// Return the other child of the parent region.
    ///
    /// The root region has no sibling.
    pub fn sibling(&self, id: RegionId) -> Option<RegionId> {
        let parent: RegionId = self.region(id)?.parent?;
        match self.region(parent)?.state {
            RegionState::Internal { children } => {
                if children[0] == id {
                    Some(children[1])
                } else {
                    Some(children[0])
                }
            }
            _ => None,
        }
    }

    /// Return the childless regions under the given region, in depth-first order.
    ///
    /// The region itself is returned when it has no children.
    pub fn leaf_regions(&self, id: RegionId) -> Vec<RegionId> {
        let mut leaves: Vec<RegionId> = Vec::new();
        self.collect_leaf_regions(id, &mut leaves);
        leaves
    }

    /// Recursively collect the childless regions.
    fn collect_leaf_regions(&self, id: RegionId, leaves: &mut Vec<RegionId>) {
        match self.region(id).map(|r| r.state) {
            Some(RegionState::Internal { children }) => {
                self.collect_leaf_regions(children[0], leaves);
                self.collect_leaf_regions(children[1], leaves);
            }
            Some(_) => leaves.push(id),
            None => (),
        }
    }

    /// Return all the rooms under the given region, in depth-first order.
    pub fn rooms_in_region(&self, id: RegionId) -> Vec<RoomId> {
        self.leaf_regions(id)
            .iter()
            .filter_map(|leaf| self.region(*leaf).and_then(|r| r.room()))
            .collect()
    }

    /// Depth of the deepest region in the tree.
    pub fn depth(&self) -> u32 {
        self.regions.iter().map(|r| r.depth).max().unwrap_or(0)
    }

    /// Whether a corridor already joins the two rooms.
    pub fn are_connected(&self, room1: RoomId, room2: RoomId) -> bool {
        match self.room(room1) {
            Some(r) => r.corridors.iter().any(|c| match self.corridor(*c) {
                Some(corridor) => corridor.connects(room1, room2),
                None => false,
            }),
            None => false,
        }
    }

    /// Whether the two rooms were found adjacent before they were shrunk.
    pub fn are_adjacent(&self, room1: RoomId, room2: RoomId) -> bool {
        let in_first: bool = self
            .room(room1)
            .is_some_and(|r| r.adjacent_rooms.contains(&room2));
        let in_second: bool = self
            .room(room2)
            .is_some_and(|r| r.adjacent_rooms.contains(&room1));
        in_first || in_second
    }

    /// Multiply the position and the size of every footprint by the given factor.
    ///
    /// # Errors
    ///
    /// The method returns an error if the factor is 0.
    pub fn scale_up(&mut self, factor: u32) -> Result<(), DungeonError> {
        if factor < 1 {
            return Err(DungeonError::InvalidScale);
        }
        let f: f32 = factor as f32;
        for region in &mut self.regions {
            region.footprint = region.footprint.scaled(f);
        }
        for room in &mut self.rooms {
            room.footprint = room.footprint.scaled(f);
        }
        for corridor in &mut self.corridors {
            corridor.footprint = corridor.footprint.scaled(f);
        }
        self.scale *= factor;
        Ok(())
    }

    /// Rescale the dungeon with a different factor on each axis.
    ///
    /// # Errors
    ///
    /// Non-uniform rescaling is not implemented: the method always returns an error.
    pub fn rescale(&mut self, x_factor: f32, y_factor: f32) -> Result<(), DungeonError> {
        error!("Cannot rescale the dungeon by ({x_factor}, {y_factor}): not implemented");
        Err(DungeonError::Unsupported("non-uniform rescaling"))
    }
}
