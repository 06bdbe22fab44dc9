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

//! Save and restore generated dungeons.
//!
//! The saved object is a serialization of the [`Dungeon`] object in JSON format by using
//! [`serde`]. The region tree, the rooms, and the corridors are all kept, so a restored dungeon
//! is identical to the saved one.

use log::debug;
use std::error::Error;
use std::fs::{File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::generator::dungeon::Dungeon;

/// Object to save and restore a dungeon.
pub struct SaverDungeon {
    /// Path to the JSON file.
    save_file: PathBuf,
}

impl SaverDungeon {
    /// Create a [`SaverDungeon`] object.
    ///
    /// The provided [`PathBuf`] is the path to the JSON file.
    pub fn new(save_file: PathBuf) -> Self {
        debug!("Dungeon file: {save_file:?}");
        Self { save_file }
    }

    /// Retrieve the saved [`Dungeon`] object.
    ///
    /// Return the [`Dungeon`] object or None if the file does not exist.
    pub fn get_dungeon(&self) -> Result<Option<Dungeon>, Box<dyn Error>> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let dungeon: Dungeon = serde_json::from_reader(reader)?;
        Ok(Some(dungeon))
    }

    /// Save the provided [`Dungeon`] object.
    pub fn save_dungeon(&self, dungeon: &Dungeon) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, dungeon)?;
        writer.flush()?;
        Ok(())
    }

    /// Delete the saved dungeon.
    ///
    /// Deleting a file that does not exist is not an error.
    pub fn delete_save(&self) -> Result<(), Box<dyn Error>> {
        match remove_file(&self.save_file) {
            Ok(()) => Ok(()),
            Err(error) => match error.kind() {
                ErrorKind::NotFound => Ok(()),
                _ => Err(Box::new(error)),
            },
        }
    }
}
