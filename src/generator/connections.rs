/*
connections.rs

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

//! Graph of the rooms linked by corridors.

use log::debug;
use std::collections::{HashMap, HashSet, VecDeque};

use super::dungeon::Dungeon;
use super::rooms::RoomId;

/// Represent the corridors as edges between rooms.
#[derive(Debug, Clone, Default)]
pub struct Connections {
    /// For each room, the [`std::collections::HashMap`] stores the list of the rooms that a
    /// corridor leads to.
    edges: HashMap<RoomId, Vec<RoomId>>,
}

impl Connections {
    /// Build the graph from the corridors of the dungeon.
    ///
    /// Every room is a vertex, even without any corridor. Corridors that reference rooms that do
    /// not exist are ignored.
    pub fn from_dungeon(dungeon: &Dungeon) -> Self {
        let mut edges: HashMap<RoomId, Vec<RoomId>> = (0..dungeon.rooms().len())
            .map(|i| (RoomId(i), Vec::new()))
            .collect();

        for corridor in dungeon.corridors() {
            let [room1, room2] = corridor.rooms;
            if !edges.contains_key(&room1) || !edges.contains_key(&room2) {
                continue;
            }
            for (from, to) in [(room1, room2), (room2, room1)] {
                if let Some(a) = edges.get_mut(&from) {
                    if !a.contains(&to) {
                        a.push(to);
                    }
                }
            }
        }
        Self { edges }
    }

    /// Number of rooms in the graph.
    pub fn num_rooms(&self) -> usize {
        self.edges.len()
    }

    /// For the given room, return the rooms that a corridor leads to.
    pub fn get_rooms(&self, room: RoomId) -> Vec<RoomId> {
        match self.edges.get(&room) {
            Some(a) => a.clone(),
            None => Vec::new(),
        }
    }

    /// Return the rooms that can be reached from the given room, including the room itself, in
    /// breadth-first order.
    pub fn reachable_from(&self, room: RoomId) -> Vec<RoomId> {
        if !self.edges.contains_key(&room) {
            return Vec::new();
        }

        let mut visited: Vec<RoomId> = vec![room];
        let mut seen: HashSet<RoomId> = HashSet::from([room]);
        let mut queue: VecDeque<RoomId> = VecDeque::from([room]);

        while let Some(r) = queue.pop_front() {
            if let Some(rooms) = self.edges.get(&r) {
                for next in rooms {
                    if seen.insert(*next) {
                        visited.push(*next);
                        queue.push_back(*next);
                    }
                }
            }
        }
        visited
    }

    /// Group the rooms into connected components.
    ///
    /// The components are ordered by their lowest room ID, and the rooms in each component are
    /// sorted.
    pub fn components(&self) -> Vec<Vec<RoomId>> {
        let mut keys: Vec<RoomId> = self.edges.keys().copied().collect();
        keys.sort();

        let mut assigned: HashMap<RoomId, usize> = HashMap::new();
        let mut components: Vec<Vec<RoomId>> = Vec::new();

        for room in keys {
            if assigned.contains_key(&room) {
                continue;
            }
            let mut component: Vec<RoomId> = self.reachable_from(room);
            component.sort();
            for r in &component {
                assigned.insert(*r, components.len());
            }
            components.push(component);
        }
        components
    }

    /// Number of connected components. An empty dungeon has none.
    pub fn num_components(&self) -> usize {
        self.components().len()
    }

    /// Print the edges.
    pub fn debug(&self) {
        let mut v: Vec<_> = self.edges.iter().collect();

        v.sort_by_key(|a| a.0);
        for (room, rooms) in v {
            let mut s: String = format!("{room:>4} -->");
            for r in rooms {
                s.push_str(&format!(" {r}"));
            }
            debug!("{s}");
        }
    }
}
