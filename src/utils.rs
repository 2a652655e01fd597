use crate::types::Coordinates;
use anyhow::{Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing_subscriber::{EnvFilter, fmt};

#[macro_export]
macro_rules! dlog {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*);
    };
}

/// Initialize colorful logging.
///
/// Default level is INFO.
/// - `-v` => DEBUG
/// - `-vv` => TRACE
/// - `-q` => WARN
/// - `-qq` => ERROR
///
/// `RUST_LOG` overrides everything (e.g. `RUST_LOG=trace`).
pub fn init_logging(verbose: u8, quiet: u8) {
    let net = i16::from(verbose) - i16::from(quiet);
    let level = match net {
        i16::MIN..=-2 => "error",
        -1 => "warn",
        0 => "info",
        1 => "debug",
        2..=i16::MAX => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,maplog={level}")));

    let show_src = matches!(level, "debug" | "trace");

    // stdout carries the sidebar, so logs go to stderr.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_target(true)
        .with_level(true)
        .with_file(show_src)
        .with_line_number(show_src)
        .compact()
        .init();
}

static LAT_LNG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\[?\s*([-+]?\d+(?:\.\d+)?)\s*[,;\s]\s*([-+]?\d+(?:\.\d+)?)\s*\]?\s*$")
        .expect("valid lat/lng regex")
});

/// Parses `"51.5,-0.1"`, `"51.5, -0.1"` or `"[51.5,-0.1]"`.
pub fn parse_coordinates(s: &str) -> Result<Coordinates> {
    let Some(caps) = LAT_LNG.captures(s) else {
        bail!("expected LAT,LNG but got {s:?}");
    };
    let lat: f64 = caps[1].parse()?;
    let lng: f64 = caps[2].parse()?;

    if !(-90.0..=90.0).contains(&lat) {
        bail!("latitude {lat} out of range [-90, 90]");
    }
    if !(-180.0..=180.0).contains(&lng) {
        bail!("longitude {lng} out of range [-180, 180]");
    }
    Ok(Coordinates::new(lat, lng))
}
