use crate::error::{Result, SessionError};
use crate::types::{Coordinates, Workout, WorkoutKind};
use crate::workout::{make_cycling, make_running, pace_min_per_km, speed_km_per_h};
use chrono::{DateTime, FixedOffset};

/// Raw text of the entry form, as read from its fields.
///
/// Only the field matching `kind` is read on submit; the other one is hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub kind: WorkoutKind,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

impl FormValues {
    pub fn running(distance: &str, duration: &str, cadence: &str) -> Self {
        Self {
            kind: WorkoutKind::Running,
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: cadence.to_string(),
            elevation: String::new(),
        }
    }

    pub fn cycling(distance: &str, duration: &str, elevation: &str) -> Self {
        Self {
            kind: WorkoutKind::Cycling,
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: String::new(),
            elevation: elevation.to_string(),
        }
    }
}

/// A submission that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry {
    Running {
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    },
    Cycling {
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    },
}

impl Entry {
    pub fn build(self, at: Coordinates, created_at: DateTime<FixedOffset>) -> Workout {
        match self {
            Self::Running {
                distance_km,
                duration_min,
                cadence_spm,
            } => make_running(at, distance_km, duration_min, cadence_spm, created_at),
            Self::Cycling {
                distance_km,
                duration_min,
                elevation_gain_m,
            } => make_cycling(at, distance_km, duration_min, elevation_gain_m, created_at),
        }
    }
}

/// Coerce form text the way a number input does: blank is zero, anything
/// unparseable is NaN.
pub fn coerce_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Checks finiteness of every field and positivity of distance, duration and
/// (running only) cadence. Elevation gain may be zero or negative.
///
/// The derived pace or speed must be finite too: JSON has no infinity, so an
/// overflowing metric could not be stored and read back.
pub fn validate(form: &FormValues) -> Result<Entry> {
    let distance_km = coerce_number(&form.distance);
    let duration_min = coerce_number(&form.duration);

    let entry = match form.kind {
        WorkoutKind::Running => {
            let cadence_spm = coerce_number(&form.cadence);
            if !all_positive(&[distance_km, duration_min, cadence_spm])
                || !pace_min_per_km(distance_km, duration_min).is_finite()
            {
                return Err(SessionError::InvalidInput);
            }
            Entry::Running {
                distance_km,
                duration_min,
                cadence_spm,
            }
        }
        WorkoutKind::Cycling => {
            let elevation_gain_m = coerce_number(&form.elevation);
            if !elevation_gain_m.is_finite()
                || !all_positive(&[distance_km, duration_min])
                || !speed_km_per_h(distance_km, duration_min).is_finite()
            {
                return Err(SessionError::InvalidInput);
            }
            Entry::Cycling {
                distance_km,
                duration_min,
                elevation_gain_m,
            }
        }
    };

    Ok(entry)
}

fn all_positive(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite() && *v > 0.0)
}
