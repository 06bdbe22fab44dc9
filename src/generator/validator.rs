/*
validator.rs

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

//! Integrity checks for generated dungeons.
//!
//! The checks never modify the dungeon. They report the first problem found.

use log::warn;
use thiserror::Error;

use super::connections::Connections;
use super::corridors::CorridorId;
use super::dungeon::Dungeon;
use super::rect::{CORRIDOR_EPSILON, ROOM_EPSILON};
use super::rooms::RoomId;

/// Problem found in a dungeon.
#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum Violation {
    #[error("rooms {0} and {1} touch")]
    RoomsTouch(RoomId, RoomId),

    #[error("room {0} lists corridor {1}, but the corridor does not lead to the room")]
    RoomCorridorMismatch(RoomId, CorridorId),

    #[error("room {0} has no corridor")]
    IsolatedRoom(RoomId),

    #[error("corridor {0} leads to room {1}, but the room does not list the corridor")]
    CorridorRoomMismatch(CorridorId, RoomId),

    #[error("corridor {0} does not reach the wall of room {1}")]
    DetachedCorridor(CorridorId, RoomId),

    #[error("corridor {0} leads to room {1}, which does not exist")]
    MissingRoom(CorridorId, RoomId),
}

/// Return the first problem found in the dungeon, if any.
pub fn find_violation(dungeon: &Dungeon) -> Option<Violation> {
    let rooms = dungeon.rooms();
    let single_room: bool = rooms.len() == 1;

    for (i, room) in rooms.iter().enumerate() {
        let room_id: RoomId = RoomId(i);

        for (j, other) in rooms.iter().enumerate().skip(i + 1) {
            if room.footprint.touches(&other.footprint, ROOM_EPSILON) {
                return Some(Violation::RoomsTouch(room_id, RoomId(j)));
            }
        }

        for corridor_id in &room.corridors {
            let leads_to_room: bool = dungeon
                .corridor(*corridor_id)
                .is_some_and(|c| c.rooms.contains(&room_id));
            if !leads_to_room {
                return Some(Violation::RoomCorridorMismatch(room_id, *corridor_id));
            }
        }

        // A dungeon made of a single room cannot have corridors
        if room.corridors.is_empty() && !single_room {
            return Some(Violation::IsolatedRoom(room_id));
        }
    }

    for (i, corridor) in dungeon.corridors().iter().enumerate() {
        let corridor_id: CorridorId = CorridorId(i);

        for room_id in corridor.rooms {
            let room = match dungeon.room(room_id) {
                Some(r) => r,
                None => return Some(Violation::MissingRoom(corridor_id, room_id)),
            };
            if !room.corridors.contains(&corridor_id) {
                return Some(Violation::CorridorRoomMismatch(corridor_id, room_id));
            }
            if !room.footprint.touches(&corridor.footprint, CORRIDOR_EPSILON) {
                return Some(Violation::DetachedCorridor(corridor_id, room_id));
            }
        }
    }
    None
}

/// Verify the dungeon. Problems are logged as warnings.
///
/// The function does not modify the dungeon, so calling it again gives the same result.
pub fn check_dungeon(dungeon: &Dungeon) -> bool {
    match find_violation(dungeon) {
        Some(v) => {
            warn!("Dungeon check failed: {v}");
            false
        }
        None => true,
    }
}

/// Whether every room can be reached from the first room through corridors.
pub fn is_fully_connected(dungeon: &Dungeon) -> bool {
    let count: usize = dungeon.rooms().len();
    if count == 0 {
        return true;
    }
    let connections: Connections = Connections::from_dungeon(dungeon);
    connections.reachable_from(RoomId(0)).len() == count
}
