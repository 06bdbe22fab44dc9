/*
rooms.rs

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

//! Room placement.
//!
//! Each leaf region receives one room that initially covers the whole region.
//! Once the room adjacency is known, the rooms are shrunk so that walls separate them.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::corridors::CorridorId;
use super::dungeon::Dungeon;
use super::rect::Rect;
use super::regions::{RegionId, RegionState};

/// Index of a room in [`Dungeon::rooms()`].
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub usize);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Playable rectangle inside a leaf region.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Room {
    pub footprint: Rect,

    /// Leaf region that hosts the room.
    pub region: RegionId,

    /// Rooms that touched this room before the rooms were shrunk.
    pub adjacent_rooms: Vec<RoomId>,

    /// Corridors that lead to the room.
    pub corridors: Vec<CorridorId>,
}

impl Room {
    /// Create a [`Room`] object that covers the given region footprint.
    pub fn new(footprint: Rect, region: RegionId) -> Self {
        Self {
            footprint,
            region,
            adjacent_rooms: Vec::new(),
            corridors: Vec::new(),
        }
    }

    /// Record a corridor, once.
    pub(crate) fn add_corridor(&mut self, corridor: CorridorId) {
        if !self.corridors.contains(&corridor) {
            self.corridors.push(corridor);
        }
    }
}

/// Create one room for each leaf region, in depth-first order.
///
/// Return the number of rooms created. Leaf regions that already have a room are skipped.
pub fn place_rooms(dungeon: &mut Dungeon) -> usize {
    let mut count: usize = 0;

    for id in dungeon.leaf_regions(dungeon.root_id()) {
        let region = &dungeon.regions[id.0];
        if region.room().is_some() {
            continue;
        }
        let footprint: Rect = region.footprint;
        let room_id: RoomId = RoomId(dungeon.rooms.len());
        dungeon.rooms.push(Room::new(footprint, id));
        dungeon.regions[id.0].state = RegionState::Leaf {
            room: Some(room_id),
        };
        count += 1;
    }
    debug!("Placed {count} rooms");
    count
}

/// Shrink every room inside its region.
///
/// For each axis, the room keeps a random fraction of the region side, between `min_occupancy` and
/// `max_occupancy`. The freed space is then randomly distributed between the two sides.
/// Position and size are floored to stay on the tile grid. A side never drops below one tile.
pub fn shrink_rooms<R: Rng + ?Sized>(
    dungeon: &mut Dungeon,
    min_occupancy: f32,
    max_occupancy: f32,
    rng: &mut R,
) {
    for room in &mut dungeon.rooms {
        let fx: f32 = random_between(rng, min_occupancy, max_occupancy);
        let fy: f32 = random_between(rng, min_occupancy, max_occupancy);
        let x_split: f32 = rng.random::<f32>();
        let y_split: f32 = rng.random::<f32>();

        let region: Rect = room.footprint;
        let dx: f32 = region.width * (1.0 - fx);
        let dy: f32 = region.height * (1.0 - fy);

        let shrunk: Rect = Rect::from_corners(
            region.x_min() + dx * (1.0 - x_split),
            region.y_min() + dy * (1.0 - y_split),
            region.x_max() - dx * x_split,
            region.y_max() - dy * y_split,
        );
        let (x, width) = floor_side(shrunk.x, shrunk.width, region.x_min(), region.x_max());
        let (y, height) = floor_side(shrunk.y, shrunk.height, region.y_min(), region.y_max());
        room.footprint = Rect::new(x, y, width, height);
    }
}

/// Floor the start and the length of one room side that lies in `[low, high]`.
///
/// A side shorter than one tile is widened to one tile, kept off the `high` wall when the region
/// is at least two tiles long.
fn floor_side(start: f32, length: f32, low: f32, high: f32) -> (f32, f32) {
    let start: f32 = start.floor();
    let length: f32 = length.floor();
    if length >= 1.0 {
        return (start, length);
    }
    (start.min(high - 2.0).max(low), 1.0)
}

/// Draw a value in `[low, high]`.
pub(crate) fn random_between<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if low >= high {
        return low;
    }
    rng.random_range(low..=high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::rect::ROOM_EPSILON;
    use crate::generator::regions::RegionSplitter;
    use crate::generator::settings::GeneratorSettings;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn split_dungeon(seed: u64) -> Dungeon {
        let settings = GeneratorSettings {
            width: 64,
            height: 48,
            min_split_area: 64.0,
            min_length: 6.0,
            stop_chance: 0.0,
            ..GeneratorSettings::default()
        };
        let mut dungeon = Dungeon::new(settings.width, settings.height);
        let mut rng = StdRng::seed_from_u64(seed);
        RegionSplitter::new(&settings).split_until_stable(&mut dungeon, &mut rng);
        dungeon
    }

    #[test]
    fn test_one_room_per_leaf() {
        let mut dungeon = split_dungeon(9);
        let leaves = dungeon.leaf_regions(dungeon.root_id());

        assert_eq!(place_rooms(&mut dungeon), leaves.len());
        assert_eq!(dungeon.rooms().len(), leaves.len());
        for (i, leaf) in leaves.iter().enumerate() {
            let region = dungeon.region(*leaf).unwrap();
            assert_eq!(region.room(), Some(RoomId(i)));
            assert_eq!(dungeon.rooms()[i].footprint, region.footprint);
            assert_eq!(dungeon.rooms()[i].region, *leaf);
        }

        // Running again does not duplicate the rooms
        assert_eq!(place_rooms(&mut dungeon), 0);
    }

    #[test]
    fn test_internal_regions_have_no_room() {
        let mut dungeon = split_dungeon(4);
        place_rooms(&mut dungeon);

        for region in dungeon.regions() {
            if region.children().is_some() {
                assert_eq!(region.room(), None);
            }
        }
    }

    #[test]
    fn test_shrunk_rooms_stay_in_region() {
        let mut dungeon = split_dungeon(21);
        place_rooms(&mut dungeon);
        let mut rng = StdRng::seed_from_u64(21);
        shrink_rooms(&mut dungeon, 0.6, 0.9, &mut rng);

        for room in dungeon.rooms() {
            let region = dungeon.region(room.region).unwrap();
            assert!(region.footprint.contains_rect(&room.footprint));
            assert!(room.footprint.area() > 0.0);
            assert_eq!(room.footprint, room.footprint.floored());
            assert!(room.footprint.width < region.footprint.width);
        }
    }

    #[test]
    fn test_tiny_occupancy_keeps_one_tile() {
        let mut dungeon = split_dungeon(5);
        place_rooms(&mut dungeon);
        let mut rng = StdRng::seed_from_u64(5);
        shrink_rooms(&mut dungeon, 0.01, 0.1, &mut rng);

        for room in dungeon.rooms() {
            let region = dungeon.region(room.region).unwrap();
            assert_eq!(room.footprint.width, 1.0);
            assert_eq!(room.footprint.height, 1.0);
            assert!(region.footprint.contains_rect(&room.footprint));
            assert!(room.footprint.x_max() < region.footprint.x_max());
            assert!(room.footprint.y_max() < region.footprint.y_max());
        }
        let rooms = dungeon.rooms();
        for (i, a) in rooms.iter().enumerate() {
            for b in &rooms[i + 1..] {
                assert!(!a.footprint.touches(&b.footprint, ROOM_EPSILON));
            }
        }
    }

    #[test]
    fn test_floor_side() {
        assert_eq!(floor_side(2.6, 3.7, 0.0, 10.0), (2.0, 3.0));
        assert_eq!(floor_side(2.6, 0.4, 0.0, 10.0), (2.0, 1.0));
        // Near the far wall, the tile moves back inside
        assert_eq!(floor_side(9.3, 0.5, 0.0, 10.0), (8.0, 1.0));
        // A one-tile region is filled
        assert_eq!(floor_side(4.2, 0.3, 4.0, 5.0), (4.0, 1.0));
    }

    #[test]
    fn test_full_occupancy_keeps_region_size() {
        let mut dungeon = split_dungeon(2);
        place_rooms(&mut dungeon);
        let mut rng = StdRng::seed_from_u64(2);
        shrink_rooms(&mut dungeon, 1.0, 1.0, &mut rng);

        for room in dungeon.rooms() {
            let region = dungeon.region(room.region).unwrap();
            assert_eq!(room.footprint, region.footprint);
        }
    }
}
