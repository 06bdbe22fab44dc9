/*
adjacency.rs

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

use log::{Level, debug, log_enabled};

use super::dungeon::Dungeon;
use super::rect::ROOM_EPSILON;
use super::rooms::RoomId;

/// Record which rooms touch each other.
///
/// Must run before the rooms are shrunk, while each room still covers its whole region.
/// The relation is symmetric and has no duplicates. Return the number of adjacent pairs.
pub fn compute_adjacency(dungeon: &mut Dungeon) -> usize {
    let mut pairs: usize = 0;
    let count: usize = dungeon.rooms.len();

    for i in 0..count {
        for j in (i + 1)..count {
            let touching: bool = dungeon.rooms[i]
                .footprint
                .touches(&dungeon.rooms[j].footprint, ROOM_EPSILON);
            if !touching {
                continue;
            }
            let mut added: bool = false;
            if !dungeon.rooms[i].adjacent_rooms.contains(&RoomId(j)) {
                dungeon.rooms[i].adjacent_rooms.push(RoomId(j));
                added = true;
            }
            if !dungeon.rooms[j].adjacent_rooms.contains(&RoomId(i)) {
                dungeon.rooms[j].adjacent_rooms.push(RoomId(i));
                added = true;
            }
            if added {
                pairs += 1;
            }
        }
    }

    if log_enabled!(Level::Debug) {
        debug!("Room adjacency ({pairs} pairs):");
        for (i, room) in dungeon.rooms.iter().enumerate() {
            let neighbors: Vec<String> =
                room.adjacent_rooms.iter().map(|r| r.to_string()).collect();
            debug!("    {} -> {}", RoomId(i), neighbors.join(" "));
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::rect::Rect;
    use crate::generator::regions::RegionId;
    use crate::generator::rooms::Room;

    fn dungeon_with_rooms(footprints: &[Rect]) -> Dungeon {
        let mut dungeon = Dungeon::new(40, 40);
        for footprint in footprints {
            dungeon.rooms.push(Room::new(*footprint, RegionId(0)));
        }
        dungeon
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let mut dungeon = dungeon_with_rooms(&[
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(10.0, 0.0, 10.0, 10.0),
            Rect::new(0.0, 10.0, 20.0, 5.0),
            Rect::new(30.0, 30.0, 5.0, 5.0),
        ]);

        assert_eq!(compute_adjacency(&mut dungeon), 3);
        assert!(dungeon.are_adjacent(RoomId(0), RoomId(1)));
        assert!(dungeon.are_adjacent(RoomId(1), RoomId(0)));
        assert!(dungeon.are_adjacent(RoomId(0), RoomId(2)));
        assert!(dungeon.are_adjacent(RoomId(1), RoomId(2)));
        assert!(!dungeon.are_adjacent(RoomId(0), RoomId(3)));
        assert!(dungeon.rooms()[3].adjacent_rooms.is_empty());
        for (i, room) in dungeon.rooms().iter().enumerate() {
            for other in &room.adjacent_rooms {
                let back = &dungeon.room(*other).unwrap().adjacent_rooms;
                assert!(back.contains(&RoomId(i)));
            }
        }
    }

    #[test]
    fn test_no_duplicates_on_second_run() {
        let mut dungeon = dungeon_with_rooms(&[
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(10.0, 0.0, 10.0, 10.0),
        ]);

        assert_eq!(compute_adjacency(&mut dungeon), 1);
        assert_eq!(compute_adjacency(&mut dungeon), 0);
        assert_eq!(dungeon.rooms()[0].adjacent_rooms, vec![RoomId(1)]);
        assert_eq!(dungeon.rooms()[1].adjacent_rooms, vec![RoomId(0)]);
    }

    #[test]
    fn test_corner_contact_is_not_adjacency() {
        let mut dungeon = dungeon_with_rooms(&[
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(10.0, 10.0, 10.0, 10.0),
        ]);

        assert_eq!(compute_adjacency(&mut dungeon), 0);
    }
}
