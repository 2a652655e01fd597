use crate::session::{DEFAULT_ZOOM, STORAGE_KEY, SessionSettings};
use crate::types::{Coordinates, WorkoutKind};
use crate::utils::parse_coordinates;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = ".maplog";

#[derive(Parser, Debug)]
#[command(
    name = "maplog",
    about = "Log running and cycling workouts at map coordinates"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Cmd>,

    /// Directory holding the saved workouts.
    #[arg(long, env = "MAPLOG_DATA_DIR", default_value = DEFAULT_DATA_DIR, global = true)]
    pub data_dir: PathBuf,

    /// Current position as LAT,LNG. Without it the map cannot be shown.
    #[arg(
        long,
        env = "MAPLOG_LOCATION",
        value_parser = parse_coordinates,
        allow_hyphen_values = true,
        global = true
    )]
    pub location: Option<Coordinates>,

    /// Zoom level used when showing and panning the map.
    #[arg(long, default_value_t = DEFAULT_ZOOM, global = true)]
    pub zoom: u8,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Print the sidebar: one line per workout, oldest first (default).
    List {
        /// Print every stored field of each workout as one JSON record per line.
        #[arg(long)]
        details: bool,

        /// Print at most this many rows.
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Click the map at a point and submit the workout form.
    Log {
        /// Where on the map the workout happened, as LAT,LNG.
        #[arg(long, value_parser = parse_coordinates, allow_hyphen_values = true)]
        at: Coordinates,

        #[arg(long = "type", default_value = "running")]
        kind: WorkoutKind,

        /// Distance in km.
        #[arg(long, allow_hyphen_values = true)]
        distance: String,

        /// Duration in minutes.
        #[arg(long, allow_hyphen_values = true)]
        duration: String,

        /// Steps per minute (running).
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        cadence: String,

        /// Elevation gain in meters (cycling).
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        elevation: String,
    },

    /// Activate a sidebar row: pan the map to that workout.
    Show { id: String },

    /// Print every marker on the map.
    Markers,

    /// Delete all saved workouts.
    Reset,
}

impl Cli {
    pub fn settings(&self) -> SessionSettings {
        SessionSettings {
            zoom: self.zoom,
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}
