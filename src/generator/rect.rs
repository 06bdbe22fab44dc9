/*
rect.rs

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

//! Axis-aligned rectangles used as footprints for regions, rooms, and corridors.
//!
//! The Y axis points up: [`Rect::y_min`] is the bottom wall and [`Rect::y_max`] the top wall.

use serde::{Deserialize, Serialize};

/// Tolerance used to decide whether two room footprints touch.
pub const ROOM_EPSILON: f32 = 0.01;

/// Looser tolerance used to decide whether a corridor reaches the walls of its rooms.
pub const CORRIDOR_EPSILON: f32 = 0.1;

/// Footprint of a dungeon element: position of the lower-left corner and size.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a [`Rect`] object from its position and size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a [`Rect`] object from two opposite corners.
    ///
    /// The corners do not need to be ordered; the result always has a non-negative size.
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(x1, y1, x2 - x1, y2 - y1).normalized()
    }

    pub fn x_min(&self) -> f32 {
        self.x
    }

    pub fn x_max(&self) -> f32 {
        self.x + self.width
    }

    pub fn y_min(&self) -> f32 {
        self.y
    }

    pub fn y_max(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Whether the interiors of the two rectangles intersect.
    ///
    /// Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        other.x_max() > self.x_min()
            && other.x_min() < self.x_max()
            && other.y_max() > self.y_min()
            && other.y_min() < self.y_max()
    }

    /// Whether the given rectangle lies completely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x_min() >= self.x_min()
            && other.x_max() <= self.x_max()
            && other.y_min() >= self.y_min()
            && other.y_max() <= self.y_max()
    }

    /// Whether the rectangles touch along a vertical edge (side by side), within `epsilon`.
    ///
    /// Both rectangles are widened by `epsilon` (and shifted by half of it), and then tested for
    /// overlap. Corners touching diagonally do not count.
    pub fn touches_in_x(&self, other: &Rect, epsilon: f32) -> bool {
        let a: Rect = Rect::new(
            self.x - epsilon * 0.5,
            self.y,
            self.width + epsilon,
            self.height,
        );
        let b: Rect = Rect::new(
            other.x - epsilon * 0.5,
            other.y,
            other.width + epsilon,
            other.height,
        );
        a.overlaps(&b) || b.overlaps(&a)
    }

    /// Whether the rectangles touch along a horizontal edge (stacked), within `epsilon`.
    pub fn touches_in_y(&self, other: &Rect, epsilon: f32) -> bool {
        let a: Rect = Rect::new(
            self.x,
            self.y - epsilon * 0.5,
            self.width,
            self.height + epsilon,
        );
        let b: Rect = Rect::new(
            other.x,
            other.y - epsilon * 0.5,
            other.width,
            other.height + epsilon,
        );
        a.overlaps(&b) || b.overlaps(&a)
    }

    /// Whether the rectangles touch (or overlap) along either axis, within `epsilon`.
    pub fn touches(&self, other: &Rect, epsilon: f32) -> bool {
        self.touches_in_x(other, epsilon) || self.touches_in_y(other, epsilon)
    }

    /// Return the rectangle with the minimum corner first, so that the size is never negative.
    pub fn normalized(&self) -> Rect {
        let (x_min, x_max) = if self.width < 0.0 {
            (self.x_max(), self.x_min())
        } else {
            (self.x_min(), self.x_max())
        };
        let (y_min, y_max) = if self.height < 0.0 {
            (self.y_max(), self.y_min())
        } else {
            (self.y_min(), self.y_max())
        };
        Rect::new(x_min, y_min, x_max - x_min, y_max - y_min)
    }

    /// Floor the position and the size to integer values, for tile-grid rendering.
    pub fn floored(&self) -> Rect {
        Rect::new(
            self.x.floor(),
            self.y.floor(),
            self.width.floor(),
            self.height.floor(),
        )
    }

    /// Multiply the position and the size by the given factor.
    pub fn scaled(&self, factor: f32) -> Rect {
        Rect::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }
}
