/*
corridors.rs

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

//! Corridors between rooms.
//!
//! Corridors are axis-aligned rectangles that join the facing walls of two rooms located in
//! touching regions.
//! The [`connect_sibling_regions`] pass joins each pair of sibling regions with one corridor.
//! When that is not enough to link all the rooms together, [`repair_connectivity`] joins the
//! remaining groups of rooms.

use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::connections::Connections;
use super::dungeon::Dungeon;
use super::rect::{ROOM_EPSILON, Rect};
use super::regions::RegionId;
use super::rooms::{RoomId, random_between};

/// Smallest usable wall length, between the corridor margins, for a regular corridor.
const MIN_USABLE_RANGE: f32 = 2.0;

/// Type of errors.
#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum CorridorError {
    /// The regions of the two rooms do not share a wall.
    #[error("rooms {0} and {1} are not in touching regions")]
    NotAdjacent(RoomId, RoomId),

    /// The facing walls of the two rooms do not overlap enough to hold a corridor.
    #[error("walls of rooms {0} and {1} do not overlap enough for a corridor")]
    InsufficientOverlap(RoomId, RoomId),
}

/// Index of a corridor in [`Dungeon::corridors()`].
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CorridorId(pub usize);

impl fmt::Display for CorridorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// Direction in which a corridor runs.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, strum_macros::Display)]
pub enum Axis {
    /// Runs along X, between side-by-side rooms.
    Horizontal,
    /// Runs along Y, between stacked rooms.
    Vertical,
}

/// Passage between two rooms.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Corridor {
    pub footprint: Rect,

    /// Connected rooms. The first room has the smaller coordinate along the corridor axis.
    pub rooms: [RoomId; 2],

    pub axis: Axis,
}

impl Corridor {
    /// Whether the corridor joins the two given rooms, in any order.
    pub fn connects(&self, room1: RoomId, room2: RoomId) -> bool {
        (self.rooms[0] == room1 && self.rooms[1] == room2)
            || (self.rooms[0] == room2 && self.rooms[1] == room1)
    }

    /// Return the room at the other end of the corridor.
    pub fn other(&self, room: RoomId) -> Option<RoomId> {
        if self.rooms[0] == room {
            Some(self.rooms[1])
        } else if self.rooms[1] == room {
            Some(self.rooms[0])
        } else {
            None
        }
    }
}

/// How much of the facing walls a corridor must leave free.
#[derive(Debug, Copy, Clone, PartialEq)]
enum Fit {
    /// Keep a corridor-width margin on both sides, and at least [`MIN_USABLE_RANGE`] between them.
    Standard,
    /// The corridor only has to lie along both walls.
    Relaxed,
}

/// Create a corridor between the two rooms.
///
/// The rooms must be in regions that share a wall, and their facing walls must overlap enough to
/// hold the corridor plus a margin of `width` on each side.
///
/// # Errors
///
/// The function returns an error when the regions do not touch or when the overlap is too short.
/// The dungeon is not modified in that case.
pub fn create_corridor_between_rooms<R: Rng + ?Sized>(
    dungeon: &mut Dungeon,
    room1: RoomId,
    room2: RoomId,
    width: u32,
    rng: &mut R,
) -> Result<CorridorId, CorridorError> {
    build_corridor(dungeon, room1, room2, width, Fit::Standard, rng)
}

fn build_corridor<R: Rng + ?Sized>(
    dungeon: &mut Dungeon,
    room1: RoomId,
    room2: RoomId,
    width: u32,
    fit: Fit,
    rng: &mut R,
) -> Result<CorridorId, CorridorError> {
    if room1 == room2 {
        return Err(CorridorError::NotAdjacent(room1, room2));
    }
    let (r1, r2) = match (dungeon.room(room1), dungeon.room(room2)) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(CorridorError::NotAdjacent(room1, room2)),
    };
    let (region1, region2) = match (dungeon.region(r1.region), dungeon.region(r2.region)) {
        (Some(a), Some(b)) => (a.footprint, b.footprint),
        _ => return Err(CorridorError::NotAdjacent(room1, room2)),
    };
    let (f1, f2): (Rect, Rect) = (r1.footprint, r2.footprint);
    let w: f32 = width as f32;

    let axis: Axis = if region1.touches_in_x(&region2, ROOM_EPSILON) {
        Axis::Horizontal
    } else if region1.touches_in_y(&region2, ROOM_EPSILON) {
        Axis::Vertical
    } else {
        debug!("    {room1} and {room2}: regions do not touch");
        return Err(CorridorError::NotAdjacent(room1, room2));
    };

    // Range of positions, across the corridor axis, for the corridor edge
    let (low, high): (f32, f32) = match axis {
        Axis::Horizontal => (f1.y_min().max(f2.y_min()), f1.y_max().min(f2.y_max())),
        Axis::Vertical => (f1.x_min().max(f2.x_min()), f1.x_max().min(f2.x_max())),
    };
    let (min_pos, max_pos): (f32, f32) = match (fit, axis) {
        (Fit::Standard, _) => (low + w, high - w),
        // A horizontal corridor occupies [y - w, y], a vertical one [x, x + w]
        (Fit::Relaxed, Axis::Horizontal) => (low + w, high),
        (Fit::Relaxed, Axis::Vertical) => (low, high - w),
    };
    let min_range: f32 = match fit {
        Fit::Standard => MIN_USABLE_RANGE,
        Fit::Relaxed => 0.0,
    };
    if !(max_pos - min_pos >= min_range) {
        return Err(CorridorError::InsufficientOverlap(room1, room2));
    }
    let pos: f32 = random_between(rng, min_pos, max_pos).round();

    let (first, second): (RoomId, RoomId) = match axis {
        Axis::Horizontal if f1.x > f2.x => (room2, room1),
        Axis::Vertical if f1.y > f2.y => (room2, room1),
        _ => (room1, room2),
    };
    let (near, far): (Rect, Rect) = if first == room1 { (f1, f2) } else { (f2, f1) };

    let footprint: Rect = match axis {
        Axis::Horizontal => Rect::from_corners(near.x_max(), pos - w, far.x_min(), pos),
        Axis::Vertical => Rect::from_corners(pos, near.y_max(), pos + w, far.y_min()),
    }
    .floored();

    let id: CorridorId = CorridorId(dungeon.corridors.len());
    dungeon.corridors.push(Corridor {
        footprint,
        rooms: [first, second],
        axis,
    });
    dungeon.rooms[first.0].add_corridor(id);
    dungeon.rooms[second.0].add_corridor(id);

    debug!("    {id}: {axis} corridor between {first} and {second} at {pos}");
    Ok(id)
}

/// Join each pair of sibling regions with one corridor.
///
/// For every pair, the rooms under the first region are tried against the rooms under the second
/// region, and the first corridor that can be built is kept. Pairs of rooms that cannot hold a
/// corridor are skipped. Return the number of corridors created.
pub fn connect_sibling_regions<R: Rng + ?Sized>(
    dungeon: &mut Dungeon,
    width: u32,
    rng: &mut R,
) -> usize {
    let pairs: Vec<(RegionId, RegionId)> = dungeon
        .sub_regions()
        .filter_map(|(id, _)| dungeon.sibling(id).map(|s| (id, s)))
        .filter(|(id, sibling)| id < sibling)
        .collect();
    let mut count: usize = 0;

    for (region1, region2) in pairs {
        let rooms1: Vec<RoomId> = dungeon.rooms_in_region(region1);
        let rooms2: Vec<RoomId> = dungeon.rooms_in_region(region2);

        'pair: for &room1 in &rooms1 {
            for &room2 in &rooms2 {
                if !dungeon.are_adjacent(room1, room2) || dungeon.are_connected(room1, room2) {
                    continue;
                }
                match create_corridor_between_rooms(dungeon, room1, room2, width, rng) {
                    Ok(_) => {
                        count += 1;
                        break 'pair;
                    }
                    Err(e) => debug!("    {region1}/{region2}: {e}"),
                }
            }
        }
    }
    info!("Sibling regions connected with {count} corridors");
    count
}

/// Add corridors until all the rooms are linked together, or until no more corridor can be built.
///
/// Only adjacent rooms in different groups are joined. A regular corridor is tried first, and
/// then a corridor without margins. Return the number of corridors created.
pub fn repair_connectivity<R: Rng + ?Sized>(
    dungeon: &mut Dungeon,
    width: u32,
    rng: &mut R,
) -> usize {
    let mut count: usize = 0;

    loop {
        let components: Vec<Vec<RoomId>> = Connections::from_dungeon(dungeon).components();
        if components.len() <= 1 {
            break;
        }

        let mut group: Vec<usize> = vec![0; dungeon.rooms.len()];
        for (i, component) in components.iter().enumerate() {
            for room in component {
                group[room.0] = i;
            }
        }

        let candidates: Vec<(RoomId, RoomId)> = dungeon
            .rooms
            .iter()
            .enumerate()
            .flat_map(|(i, room)| {
                room.adjacent_rooms
                    .iter()
                    .filter(move |other| other.0 > i)
                    .map(move |other| (RoomId(i), *other))
            })
            .filter(|(a, b)| b.0 < group.len() && group[a.0] != group[b.0])
            .collect();

        let mut joined: bool = false;
        'search: for (room1, room2) in candidates {
            for fit in [Fit::Standard, Fit::Relaxed] {
                if build_corridor(dungeon, room1, room2, width, fit, rng).is_ok() {
                    joined = true;
                    break 'search;
                }
            }
        }
        if !joined {
            warn!(
                "Cannot link all the rooms: {} separate groups remain",
                components.len()
            );
            break;
        }
        count += 1;
    }

    if count > 0 {
        info!("Connectivity repair added {count} corridors");
    }
    count
}
