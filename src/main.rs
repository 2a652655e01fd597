#![deny(warnings, clippy::all, clippy::pedantic, clippy::nursery)]

use anyhow::{Context, Result};
use clap::Parser;
use maplog::cli::{self, Cmd};
use maplog::form::FormValues;
use maplog::geolocation::StaticLocation;
use maplog::map::TerminalMap;
use maplog::session::Session;
use maplog::store::{self, FileStore};
use maplog::types::{WorkoutId, WorkoutKind};
use maplog::utils;
use maplog::view::TerminalView;

#[macro_use]
extern crate maplog;

type TerminalSession = Session<StaticLocation, TerminalMap, FileStore, TerminalView>;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    dlog!(
        "data_dir={} location={:?} zoom={}",
        cli.data_dir.display(),
        cli.location,
        cli.zoom
    );

    let mut session = Session::new(
        StaticLocation::new(cli.location),
        TerminalMap::new(),
        FileStore::new(&cli.data_dir),
        TerminalView::new(),
        cli.settings(),
    );
    let started = session.start();

    match cli.cmd.unwrap_or(Cmd::List {
        details: false,
        count: None,
    }) {
        Cmd::List { details, count } => {
            print_sidebar(&session, details, count.unwrap_or(usize::MAX))?;
        }
        Cmd::Log {
            at,
            kind,
            distance,
            duration,
            cadence,
            elevation,
        } => {
            started.context("no map to click on; pass --location")?;
            session.on_map_click(at)?;
            // The form opens on running; picking cycling flips the fields.
            if kind == WorkoutKind::Cycling {
                session.on_activity_type_changed();
            }

            let form = FormValues {
                kind,
                distance,
                duration,
                cadence,
                elevation,
            };
            let id = session.on_submit(&form)?;

            if let Some(entry) = session.view().entries().iter().find(|e| e.id == id) {
                println!("{id}\t{entry}");
            }
        }
        Cmd::Show { id } => {
            if let Some(at) = session.on_workout_row_activated(&WorkoutId::from(id)) {
                println!("{at}");
            }
        }
        Cmd::Markers => {
            for m in session.map().markers() {
                println!("{}\t{}\t{}", m.at, m.options.popup.class_name, m.popup);
            }
        }
        Cmd::Reset => {
            session.reset()?;
            tracing::info!(dir = %cli.data_dir.display(), "all workouts deleted");
        }
    }

    Ok(())
}

fn print_sidebar(session: &TerminalSession, details: bool, count: usize) -> Result<()> {
    if details {
        for w in session.workouts().iter().take(count) {
            println!("{}", store::encode_workout(w)?);
        }
    } else {
        for entry in session.view().entries().iter().take(count) {
            println!("{entry}");
        }
    }
    Ok(())
}
