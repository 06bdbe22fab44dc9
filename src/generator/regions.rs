/*
regions.rs

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

//! Binary space partitioning of the dungeon into regions.
//!
//! Starting from the root region, which covers the whole dungeon, the [`RegionSplitter`] cuts
//! each region into two sub-regions that exactly tile it, until the regions are too small or
//! randomly decide to stop.
//! Each remaining leaf region later hosts one room.

use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::dungeon::Dungeon;
use super::rect::Rect;
use super::rooms::RoomId;
use super::settings::GeneratorSettings;

/// Index of a region in [`Dungeon::regions()`].
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub usize);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// Splitting state of a region.
///
/// - an `Unsplit` region has not been split yet, and might still be.
/// - a `Leaf` region will never be split. It receives a room once the splitting is over.
/// - an `Internal` region has been split into two sub-regions.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum RegionState {
    Unsplit,
    Leaf { room: Option<RoomId> },
    Internal { children: [RegionId; 2] },
}

/// Node of the binary space partitioning tree.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Region {
    /// Area covered by the region.
    pub footprint: Rect,

    /// Number of splits between the root region and this region.
    pub depth: u32,

    /// Parent region. Only the root region has no parent.
    pub parent: Option<RegionId>,

    /// Splitting state, with the children or the room.
    pub state: RegionState,
}

impl Region {
    /// Create an unsplit [`Region`] object.
    pub fn new(footprint: Rect, depth: u32, parent: Option<RegionId>) -> Self {
        Self {
            footprint,
            depth,
            parent,
            state: RegionState::Unsplit,
        }
    }

    /// Whether the region has no children.
    pub fn is_leaf(&self) -> bool {
        !matches!(self.state, RegionState::Internal { .. })
    }

    /// Return the two sub-regions, if the region has been split.
    pub fn children(&self) -> Option<[RegionId; 2]> {
        match self.state {
            RegionState::Internal { children } => Some(children),
            _ => None,
        }
    }

    /// Return the room hosted by the region.
    pub fn room(&self) -> Option<RoomId> {
        match self.state {
            RegionState::Leaf { room } => room,
            _ => None,
        }
    }
}

/// Axis along which a region is cut.
#[derive(Debug, Copy, Clone, PartialEq, strum_macros::Display)]
pub enum SplitAxis {
    /// The cut is a vertical line: the sub-regions are side by side.
    X,
    /// The cut is a horizontal line: the sub-regions are stacked.
    Y,
}

/// [`RegionSplitter`] object.
pub struct RegionSplitter<'a> {
    /// Generator parameters.
    settings: &'a GeneratorSettings,

    /// Number of passes over the leaf regions during the last split.
    pub passes: usize,

    /// Number of successful splits.
    pub splits: usize,
}

impl<'a> RegionSplitter<'a> {
    /// Create the object.
    pub fn new(settings: &'a GeneratorSettings) -> Self {
        Self {
            settings,
            passes: 0,
            splits: 0,
        }
    }

    /// Split the leaf regions of the dungeon until no more splits happen.
    ///
    /// Each pass collects the current leaf regions and tries to split them. The loop stops after a
    /// pass without any split, or after [`GeneratorSettings::max_split_passes`] passes.
    pub fn split_until_stable<R: Rng + ?Sized>(&mut self, dungeon: &mut Dungeon, rng: &mut R) {
        self.passes = 0;
        let mut did_split: bool = true;

        while did_split {
            if self.passes >= self.settings.max_split_passes {
                warn!(
                    "Regions still splitting after {} passes. Stopping with {} regions",
                    self.passes,
                    dungeon.regions.len()
                );
                break;
            }
            self.passes += 1;
            did_split = false;

            for id in dungeon.leaf_regions(dungeon.root_id()) {
                if self.split_region(dungeon, id, rng) {
                    did_split = true;
                }
            }
        }

        info!(
            "Splitting completed in {} passes. Total regions: {}",
            self.passes,
            dungeon.regions.len()
        );
    }

    /// Try to split the given region in two.
    ///
    /// Return `true` if the region has been split. Otherwise, the region is marked as a leaf,
    /// unless it was already split.
    pub fn split_region<R: Rng + ?Sized>(
        &mut self,
        dungeon: &mut Dungeon,
        id: RegionId,
        rng: &mut R,
    ) -> bool {
        let region: &Region = match dungeon.region(id) {
            Some(r) => r,
            None => return false,
        };
        if region.state != RegionState::Unsplit {
            return false;
        }

        let footprint: Rect = region.footprint;
        let depth: u32 = region.depth;
        let area: f32 = footprint.area();

        // Deep, small regions may randomly stop splitting
        if depth > self.settings.min_depth_to_stop
            && area < self.settings.max_area_for_stop
            && rng.random::<f32>() < self.settings.stop_chance
        {
            debug!("    {id}: random stop at depth {depth}");
            return Self::make_leaf(dungeon, id);
        }

        if area < self.settings.min_split_area {
            return Self::make_leaf(dungeon, id);
        }

        let min_length: f32 = self.settings.min_length;
        let can_split_x: bool = footprint.width >= min_length * 2.0;
        let can_split_y: bool = footprint.height >= min_length * 2.0;

        let axis: SplitAxis = match (can_split_x, can_split_y) {
            (false, false) => return Self::make_leaf(dungeon, id),
            (true, false) => SplitAxis::X,
            (false, true) => SplitAxis::Y,
            (true, true) => {
                if rng.random::<f32>() < 0.5 {
                    SplitAxis::X
                } else {
                    SplitAxis::Y
                }
            }
        };

        let extent: f32 = match axis {
            SplitAxis::X => footprint.width,
            SplitAxis::Y => footprint.height,
        };
        let offset: f32 = rng.random_range(min_length..=extent - min_length).round();

        let (first, second): (Rect, Rect) = match axis {
            SplitAxis::X => (
                Rect::new(footprint.x, footprint.y, offset, footprint.height),
                Rect::new(
                    footprint.x + offset,
                    footprint.y,
                    footprint.width - offset,
                    footprint.height,
                ),
            ),
            SplitAxis::Y => (
                Rect::new(footprint.x, footprint.y, footprint.width, offset),
                Rect::new(
                    footprint.x,
                    footprint.y + offset,
                    footprint.width,
                    footprint.height - offset,
                ),
            ),
        };

        // Rounding the offset might produce a sub-region that is too small
        if self.is_too_small(&first) || self.is_too_small(&second) {
            debug!("    {id}: split along {axis} at {offset} gives a too small region");
            return Self::make_leaf(dungeon, id);
        }

        let first_id: RegionId = RegionId(dungeon.regions.len());
        let second_id: RegionId = RegionId(first_id.0 + 1);
        dungeon
            .regions
            .push(Region::new(first, depth + 1, Some(id)));
        dungeon
            .regions
            .push(Region::new(second, depth + 1, Some(id)));
        dungeon.regions[id.0].state = RegionState::Internal {
            children: [first_id, second_id],
        };
        self.splits += 1;

        debug!("    {id}: split along {axis} at {offset} into {first_id} and {second_id}");
        true
    }

    /// Whether the footprint cannot be a region.
    fn is_too_small(&self, footprint: &Rect) -> bool {
        footprint.width < self.settings.min_length
            || footprint.height < self.settings.min_length
            || footprint.area() < self.settings.min_split_area
    }

    /// Give up splitting the region.
    fn make_leaf(dungeon: &mut Dungeon, id: RegionId) -> bool {
        dungeon.regions[id.0].state = RegionState::Leaf { room: None };
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn settings() -> GeneratorSettings {
        GeneratorSettings {
            width: 64,
            height: 64,
            min_split_area: 64.0,
            min_length: 4.0,
            max_area_for_stop: 256.0,
            stop_chance: 0.0,
            min_depth_to_stop: 2,
            corridor_width: 2,
            min_occupancy: 0.6,
            max_occupancy: 0.9,
            scale: 1,
            max_split_passes: 100,
            repair_connectivity: true,
        }
    }

    #[test]
    fn test_split_tiles_parent() {
        let settings = settings();
        let mut dungeon = Dungeon::new(64, 64);
        let mut rng = StdRng::seed_from_u64(7);
        let mut splitter = RegionSplitter::new(&settings);

        assert!({ let root = dungeon.root_id(); splitter.split_region(&mut dungeon, root, &mut rng) });
        let [a, b] = dungeon.root().children().unwrap();
        let fa = dungeon.region(a).unwrap().footprint;
        let fb = dungeon.region(b).unwrap().footprint;

        assert_eq!(fa.area() + fb.area(), 64.0 * 64.0);
        assert!(!fa.overlaps(&fb));
        assert!(dungeon.root().footprint.contains_rect(&fa));
        assert!(dungeon.root().footprint.contains_rect(&fb));
        assert_eq!(fa.x.fract(), 0.0);
        assert_eq!(fb.y.fract(), 0.0);
        assert_eq!(dungeon.sibling(a), Some(b));
        assert_eq!(dungeon.sibling(b), Some(a));
        assert_eq!(dungeon.region(a).unwrap().depth, 1);

        // A split region cannot be split again
        assert!(!{ let root = dungeon.root_id(); splitter.split_region(&mut dungeon, root, &mut rng) });
    }

    #[test]
    fn test_small_region_becomes_leaf() {
        let settings = GeneratorSettings {
            min_split_area: 10_000.0,
            ..settings()
        };
        let mut dungeon = Dungeon::new(64, 64);
        let mut rng = StdRng::seed_from_u64(1);
        let mut splitter = RegionSplitter::new(&settings);

        assert!(!{ let root = dungeon.root_id(); splitter.split_region(&mut dungeon, root, &mut rng) });
        assert_eq!(dungeon.root().state, RegionState::Leaf { room: None });
        // Leaves are never split
        assert!(!{ let root = dungeon.root_id(); splitter.split_region(&mut dungeon, root, &mut rng) });
    }

    #[test]
    fn test_narrow_region_splits_along_long_axis() {
        let settings = GeneratorSettings {
            min_split_area: 1.0,
            min_length: 4.0,
            ..settings()
        };
        let mut dungeon = Dungeon::new(6, 40);
        let mut rng = StdRng::seed_from_u64(3);
        let mut splitter = RegionSplitter::new(&settings);

        assert!({ let root = dungeon.root_id(); splitter.split_region(&mut dungeon, root, &mut rng) });
        let [a, b] = dungeon.root().children().unwrap();
        assert_eq!(dungeon.region(a).unwrap().footprint.width, 6.0);
        assert_eq!(dungeon.region(b).unwrap().footprint.width, 6.0);
    }

    #[test]
    fn test_too_short_on_both_axes_becomes_leaf() {
        let settings = GeneratorSettings {
            min_split_area: 1.0,
            min_length: 8.0,
            ..settings()
        };
        let mut dungeon = Dungeon::new(15, 15);
        let mut rng = StdRng::seed_from_u64(3);
        let mut splitter = RegionSplitter::new(&settings);

        assert!(!{ let root = dungeon.root_id(); splitter.split_region(&mut dungeon, root, &mut rng) });
        assert!(dungeon.root().is_leaf());
    }

    #[test]
    fn test_certain_stop_chance_keeps_shallow_tree() {
        let settings = GeneratorSettings {
            stop_chance: 1.0,
            min_depth_to_stop: 1,
            max_area_for_stop: 100_000.0,
            ..settings()
        };
        let mut dungeon = Dungeon::new(64, 64);
        let mut rng = StdRng::seed_from_u64(11);
        let mut splitter = RegionSplitter::new(&settings);

        splitter.split_until_stable(&mut dungeon, &mut rng);
        // Regions at depth 2 always stop, so the tree cannot be deeper
        assert!(dungeon.depth() <= 2);
        assert!(dungeon.depth() >= 1);
    }

    #[test]
    fn test_split_until_stable_respects_pass_limit() {
        let settings = GeneratorSettings {
            max_split_passes: 1,
            ..settings()
        };
        let mut dungeon = Dungeon::new(64, 64);
        let mut rng = StdRng::seed_from_u64(5);
        let mut splitter = RegionSplitter::new(&settings);

        splitter.split_until_stable(&mut dungeon, &mut rng);
        assert_eq!(splitter.passes, 1);
        assert_eq!(dungeon.depth(), 1);
    }

    #[test]
    fn test_leaves_are_valid_regions() {
        let settings = settings();
        let mut dungeon = Dungeon::new(64, 64);
        let mut rng = StdRng::seed_from_u64(42);
        let mut splitter = RegionSplitter::new(&settings);

        splitter.split_until_stable(&mut dungeon, &mut rng);
        let leaves = dungeon.leaf_regions(dungeon.root_id());
        assert!(leaves.len() >= 2);
        assert!(splitter.splits >= 1);

        let total: f32 = leaves
            .iter()
            .map(|id| dungeon.region(*id).unwrap().footprint.area())
            .sum();
        assert_eq!(total, 64.0 * 64.0);

        for id in &leaves {
            let footprint = dungeon.region(*id).unwrap().footprint;
            assert!(footprint.width >= settings.min_length);
            assert!(footprint.height >= settings.min_length);
            assert!(footprint.area() >= settings.min_split_area);
        }
    }
}
