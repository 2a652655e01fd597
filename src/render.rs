use crate::map::{Marker, MarkerOptions};
use crate::types::{Activity, Workout, WorkoutId, WorkoutKind};
use std::fmt;

pub const fn icon(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "🏃‍♂️",
        WorkoutKind::Cycling => "🚴‍♀️",
    }
}

pub fn popup_text(w: &Workout) -> String {
    format!("{} {}", icon(w.kind()), w.description)
}

pub fn marker_for(w: &Workout) -> Marker {
    Marker {
        at: w.coordinates,
        popup: popup_text(w),
        options: MarkerOptions::for_kind(w.kind()),
    }
}

/// One sidebar row. `id` ties the row back to its workout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub id: WorkoutId,
    pub style: String,
    pub title: String,
    pub details: Vec<Detail>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl fmt::Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.icon, self.value, self.unit)
    }
}

impl fmt::Display for SidebarEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        for d in &self.details {
            write!(f, "  {d}")?;
        }
        Ok(())
    }
}

pub fn sidebar_entry(w: &Workout) -> SidebarEntry {
    let kind = w.kind();
    let mut details = vec![
        detail(icon(kind), w.distance_km.to_string(), "km"),
        detail("⏱", w.duration_min.to_string(), "min"),
    ];

    match w.activity {
        Activity::Running {
            cadence_spm,
            pace_min_per_km,
        } => {
            details.push(detail("⚡️", format!("{pace_min_per_km:.1}"), "min/km"));
            details.push(detail("🦶🏼", cadence_spm.to_string(), "spm"));
        }
        Activity::Cycling {
            elevation_gain_m,
            speed_km_per_h,
        } => {
            details.push(detail("⚡️", format!("{speed_km_per_h:.1}"), "km/h"));
            details.push(detail("⛰", elevation_gain_m.to_string(), "m"));
        }
    }

    SidebarEntry {
        id: w.id.clone(),
        style: format!("workout--{kind}"),
        title: w.description.clone(),
        details,
    }
}

fn detail(icon: &'static str, value: String, unit: &'static str) -> Detail {
    Detail { icon, value, unit }
}
