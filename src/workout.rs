use crate::types::{Activity, Coordinates, Workout, WorkoutId, WorkoutKind};
use chrono::{DateTime, Datelike, FixedOffset};
use uuid::Uuid;

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn make_running(
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    cadence_spm: f64,
    created_at: DateTime<FixedOffset>,
) -> Workout {
    Workout {
        id: new_id(),
        created_at,
        coordinates,
        distance_km,
        duration_min,
        description: describe(WorkoutKind::Running, created_at),
        activity: Activity::Running {
            cadence_spm,
            pace_min_per_km: pace_min_per_km(distance_km, duration_min),
        },
    }
}

pub fn make_cycling(
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    elevation_gain_m: f64,
    created_at: DateTime<FixedOffset>,
) -> Workout {
    Workout {
        id: new_id(),
        created_at,
        coordinates,
        distance_km,
        duration_min,
        description: describe(WorkoutKind::Cycling, created_at),
        activity: Activity::Cycling {
            elevation_gain_m,
            speed_km_per_h: speed_km_per_h(distance_km, duration_min),
        },
    }
}

pub fn pace_min_per_km(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

pub fn speed_km_per_h(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / (duration_min / 60.0)
}

/// "Running on April 14", using the calendar date in the timestamp's own offset.
pub fn describe(kind: WorkoutKind, at: DateTime<FixedOffset>) -> String {
    let month = MONTHS[at.month0() as usize];
    format!("{} on {month} {}", capitalize(kind.as_str()), at.day())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn new_id() -> WorkoutId {
    WorkoutId::from(Uuid::new_v4().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, 9, 30, 0)
            .unwrap()
    }

    #[test]
    fn running_derives_pace_and_description() {
        let w = make_running(Coordinates::new(51.5, -0.1), 5.0, 30.0, 150.0, at(2026, 4, 14));
        assert_eq!(w.kind(), WorkoutKind::Running);
        assert_eq!(w.description, "Running on April 14");
        match w.activity {
            Activity::Running {
                cadence_spm,
                pace_min_per_km,
            } => {
                assert!((pace_min_per_km - 6.0).abs() < f64::EPSILON);
                assert!((cadence_spm - 150.0).abs() < f64::EPSILON);
            }
            Activity::Cycling { .. } => panic!("expected running"),
        }
    }

    #[test]
    fn cycling_derives_speed_and_description() {
        let w = make_cycling(Coordinates::new(0.0, 0.0), 27.0, 95.0, 523.0, at(2026, 1, 5));
        assert_eq!(w.description, "Cycling on January 5");
        let Activity::Cycling { speed_km_per_h, .. } = w.activity else {
            panic!("expected cycling");
        };
        assert!((speed_km_per_h - 27.0 / (95.0 / 60.0)).abs() < 1e-12);
    }

    #[test]
    fn description_uses_local_offset_date() {
        // 23:30 UTC on Dec 31 is already Jan 1 at +02:00.
        let utc_evening = chrono::Utc
            .with_ymd_and_hms(2025, 12, 31, 23, 30, 0)
            .unwrap()
            .with_timezone(&FixedOffset::east_opt(2 * 3600).unwrap());
        assert_eq!(
            describe(WorkoutKind::Cycling, utc_evening),
            "Cycling on January 1"
        );
    }

    #[test]
    fn ids_are_unique() {
        let c = Coordinates::new(1.0, 2.0);
        let a = make_running(c, 1.0, 1.0, 1.0, at(2026, 3, 1));
        let b = make_running(c, 1.0, 1.0, 1.0, at(2026, 3, 1));
        assert_ne!(a.id, b.id);
    }
}
