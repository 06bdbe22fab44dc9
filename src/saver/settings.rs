/*
settings.rs

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

//! Load and save generator settings.
//!
//! The file is the [`GeneratorSettings`] object in JSON format. Missing fields take their default
//! value, so a file can override only a few parameters:
//!
//! ```json
//! {
//!   "width": 64,
//!   "height": 64,
//!   "corridor_width": 2
//! }
//! ```

use log::debug;
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::generator::settings::GeneratorSettings;

/// Object to load and save generator settings.
pub struct SaverSettings {
    /// Path to the JSON file.
    settings_file: PathBuf,
}

impl SaverSettings {
    /// Create a [`SaverSettings`] object.
    pub fn new(settings_file: PathBuf) -> Self {
        debug!("Settings file: {settings_file:?}");
        Self { settings_file }
    }

    /// Retrieve the [`GeneratorSettings`] object from the file.
    ///
    /// Return None if the file does not exist. The settings are not validated.
    pub fn get_settings(&self) -> Result<Option<GeneratorSettings>, Box<dyn Error>> {
        let file: File = match File::open(&self.settings_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let settings: GeneratorSettings = serde_json::from_reader(reader)?;
        Ok(Some(settings))
    }

    /// Save the provided [`GeneratorSettings`] object.
    pub fn save_settings(&self, settings: &GeneratorSettings) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.settings_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, settings)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::settings::Preset;
    use std::env;
    use std::fs;

    #[test]
    fn test_partial_file() {
        let path = env::temp_dir().join(format!("delvekit-settings-{}.json", std::process::id()));
        fs::write(&path, r#"{"width": 64, "height": 40, "corridor_width": 2}"#).unwrap();
        let saver = SaverSettings::new(path.clone());

        let settings = saver.get_settings().unwrap().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(settings.width, 64);
        assert_eq!(settings.height, 40);
        assert_eq!(settings.corridor_width, 2);
        assert_eq!(settings.min_length, GeneratorSettings::default().min_length);
    }

    #[test]
    fn test_round_trip() {
        let path = env::temp_dir().join(format!("delvekit-preset-{}.json", std::process::id()));
        let saver = SaverSettings::new(path.clone());
        let settings = Preset::Sprawling.settings();

        saver.save_settings(&settings).unwrap();
        let restored = saver.get_settings().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(restored, Some(settings));
    }

    #[test]
    fn test_missing_file() {
        let saver = SaverSettings::new(env::temp_dir().join("delvekit-no-such-settings.json"));
        assert_eq!(saver.get_settings().unwrap(), None);
    }
}
