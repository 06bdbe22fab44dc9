/*
cli_options.rs

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

//! Process command-line options.
//!
//! These options are intended for developers tuning the generator parameters.
//!
//! # Examples
//!
//! Generate a compact dungeon and print it:
//!
//! ```text
//! $ delvekit -p compact -s 7 --ascii
//! ```
//!
//! Generate 200 dungeons from a settings file and print some statistics:
//!
//! ```text
//! $ delvekit -c mysettings.json -n 200 --summary
//! ```

use clap::Parser;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;
use std::path::PathBuf;

use delvekit::generator::dungeon::Dungeon;
use delvekit::generator::dungeon_generator::{DungeonGenerator, GeneratorError};
use delvekit::generator::settings::{GeneratorSettings, Preset};
use delvekit::generator::tiles::TileGrid;
use delvekit::generator::validator;
use delvekit::saver::dungeon::SaverDungeon;
use delvekit::saver::settings::SaverSettings;

/// Build random dungeons.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// JSON file with the generator settings
    #[arg(short, long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Built-in generator settings
    #[arg(value_enum, short, long)]
    preset: Option<Preset>,

    /// Width of the dungeon, overriding the settings
    #[arg(long)]
    width: Option<u32>,

    /// Height of the dungeon, overriding the settings
    #[arg(long)]
    height: Option<u32>,

    /// Seed for the first dungeon. A random seed is used if not provided
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of dungeons to generate, with consecutive seeds
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Print the dungeons as ASCII art
    #[arg(short, long, default_value_t = false)]
    ascii: bool,

    /// Save the last dungeon in a JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Generate again until the dungeon passes the checks
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Maximum number of attempts for each dungeon in strict mode
    #[arg(long, default_value_t = 20, requires = "strict")]
    attempts: usize,

    /// Print some statistics after generating the dungeons
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Build the generator settings from the options.
fn load_settings(args: &Args) -> Result<GeneratorSettings, String> {
    let mut settings: GeneratorSettings = match &args.config {
        Some(path) => match SaverSettings::new(path.clone()).get_settings() {
            Ok(Some(s)) => s,
            Ok(None) => return Err(format!("{}: file not found", path.display())),
            Err(e) => return Err(format!("{}: {e}", path.display())),
        },
        None => args.preset.unwrap_or_default().settings(),
    };
    if let Some(w) = args.width {
        settings.width = w;
    }
    if let Some(h) = args.height {
        settings.height = h;
    }
    Ok(settings)
}

/// Parse and process command-line options. Return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let settings: GeneratorSettings = match load_settings(&args) {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("Error: {msg}");
            return 1;
        }
    };
    let mut generator: DungeonGenerator = match DungeonGenerator::new(settings) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: invalid settings: {e}");
            return 1;
        }
    };

    let first_seed: u64 = args.seed.unwrap_or_else(|| rand::rng().random());
    println!("Seed: {first_seed}");

    let mut last: Option<Dungeon> = None;
    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut rooms: usize = 0;
    let mut corridors: usize = 0;
    let mut repairs: usize = 0;
    let mut failures: usize = 0;

    for i in 0..args.count {
        let seed: u64 = first_seed.wrapping_add(i as u64);
        debug!("Dungeon {i} (seed {seed})");
        let mut rng: StdRng = StdRng::seed_from_u64(seed);

        let dungeon: Dungeon = if args.strict {
            match generator.generate_checked(&mut rng, args.attempts) {
                Ok(d) => d,
                Err(GeneratorError::ValidationFailed { attempts }) => {
                    eprintln!("Error: seed {seed}: no valid dungeon after {attempts} attempts");
                    return 1;
                }
                Err(e) => {
                    eprintln!("Error: seed {seed}: {e}");
                    return 1;
                }
            }
        } else {
            generator.generate(&mut rng)
        };

        total += generator.duration;
        if generator.duration > max {
            max = generator.duration;
        }
        rooms += dungeon.rooms().len();
        corridors += dungeon.corridors().len();
        repairs += generator.repair_corridors;
        if !generator.valid || !validator::is_fully_connected(&dungeon) {
            failures += 1;
        }

        if args.ascii {
            println!(
                "\nSeed {seed}: {} rooms, {} corridors",
                dungeon.rooms().len(),
                dungeon.corridors().len()
            );
            print!("{}", TileGrid::from_dungeon(&dungeon));
        }
        last = Some(dungeon);
    }

    if let (Some(path), Some(dungeon)) = (&args.output, &last) {
        if let Err(e) = SaverDungeon::new(path.clone()).save_dungeon(dungeon) {
            eprintln!("Error: {}: {e}", path.display());
            return 1;
        }
        println!("Dungeon saved in {}", path.display());
    }

    // Print some stats
    if args.summary && args.count > 0 {
        let count: f32 = args.count as f32;
        println!(
            "
       total time = {}s
     average time = {}s
         max time = {}s
    average rooms = {}
average corridors = {}
 repair corridors = {}
         failures = {}",
            total,
            total / count,
            max,
            rooms as f32 / count,
            corridors as f32 / count,
            repairs,
            failures
        );
    }
    0
}
