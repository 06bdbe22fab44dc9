/*
tiles.rs

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

//! Tile grid for drawing a dungeon.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::corridors::CorridorId;
use super::dungeon::Dungeon;
use super::rect::Rect;
use super::rooms::RoomId;

/// Content of a tile.
///
/// - A `Background` tile is solid rock, outside any room or corridor.
/// - A `Room` tile is part of the room with the given ID.
/// - A `Corridor` tile is part of the corridor with the given ID. Corridors are drawn over rooms.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq)]
pub enum CellType {
    #[default]
    Background,
    Room(RoomId),
    Corridor(CorridorId),
}

impl CellType {
    /// Character used for the "ASCII art" representation.
    pub fn to_char(&self) -> char {
        match self {
            CellType::Background => '.',
            CellType::Room(_) => '#',
            CellType::Corridor(_) => '+',
        }
    }
}

/// One tile per unit of the dungeon area.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TileGrid {
    /// Coordinates of the lower-left tile.
    pub x_min: i32,
    pub y_min: i32,

    pub width: usize,
    pub height: usize,

    /// Tiles, row by row, starting with the bottom row.
    cells: Vec<CellType>,
}

impl TileGrid {
    /// Create a [`TileGrid`] object covering the root region of the dungeon.
    pub fn from_dungeon(dungeon: &Dungeon) -> Self {
        let area: Rect = dungeon.root().footprint.floored();
        let width: usize = area.width.max(0.0) as usize;
        let height: usize = area.height.max(0.0) as usize;
        let mut grid: TileGrid = Self {
            x_min: area.x as i32,
            y_min: area.y as i32,
            width,
            height,
            cells: vec![CellType::Background; width * height],
        };

        for (i, room) in dungeon.rooms().iter().enumerate() {
            grid.fill(&room.footprint, CellType::Room(RoomId(i)));
        }
        for (i, corridor) in dungeon.corridors().iter().enumerate() {
            grid.fill(&corridor.footprint, CellType::Corridor(CorridorId(i)));
        }
        grid
    }

    /// Paint the tiles covered by the footprint. Parts outside the grid are ignored.
    fn fill(&mut self, footprint: &Rect, cell: CellType) {
        let f: Rect = footprint.floored();
        let x_start: i32 = (f.x_min() as i32).max(self.x_min);
        let x_end: i32 = (f.x_max() as i32).min(self.x_min + self.width as i32);
        let y_start: i32 = (f.y_min() as i32).max(self.y_min);
        let y_end: i32 = (f.y_max() as i32).min(self.y_min + self.height as i32);

        for y in y_start..y_end {
            for x in x_start..x_end {
                if let Some(i) = self.index(x, y) {
                    self.cells[i] = cell;
                }
            }
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let col: i32 = x - self.x_min;
        let row: i32 = y - self.y_min;
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    /// Return the tile at the given dungeon coordinates.
    pub fn get_cell(&self, x: i32, y: i32) -> Option<CellType> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Iterate over the tiles as `(x, y, cell)`, starting with the bottom row.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, CellType)> + '_ {
        self.cells.iter().enumerate().map(|(i, cell)| {
            (
                self.x_min + (i % self.width) as i32,
                self.y_min + (i / self.width) as i32,
                *cell,
            )
        })
    }

    /// Number of tiles of each kind: background, room, and corridor.
    pub fn count(&self) -> (usize, usize, usize) {
        self.cells
            .iter()
            .fold((0, 0, 0), |(b, r, c), cell| match cell {
                CellType::Background => (b + 1, r, c),
                CellType::Room(_) => (b, r + 1, c),
                CellType::Corridor(_) => (b, r, c + 1),
            })
    }
}

/// "ASCII art" representation, with the top row first.
impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.height).rev() {
            let line: String = self.cells[row * self.width..(row + 1) * self.width]
                .iter()
                .map(|c| c.to_char())
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
