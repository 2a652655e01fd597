use crate::types::Workout;
use anyhow::{Context, Result, bail};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Largest value a store accepts. The store is meant for small payloads.
pub const MAX_VALUE_BYTES: usize = 5 * 1024 * 1024;

/// Durable key-value text storage that survives restarts.
pub trait PersistentStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// One `<key>.json` file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || !key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        {
            bail!("Refusing to use unsafe store key: {key:?}");
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl PersistentStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading store file: {}", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if value.len() > MAX_VALUE_BYTES {
            bail!(
                "value for {key:?} is {} bytes, store limit is {MAX_VALUE_BYTES}",
                value.len()
            );
        }
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating store dir: {}", self.dir.display()))?;

        // Write next to the target and rename over it so readers never see a torn file.
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .with_context(|| format!("creating temp file in {}", self.dir.display()))?;
        tmp.write_all(value.as_bytes())
            .context("writing store temp file")?;
        tmp.persist(&path)
            .with_context(|| format!("replacing store file: {}", path.display()))?;

        tracing::trace!(key, bytes = value.len(), path = %path.display(), "store set");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing store file: {}", path.display())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if value.len() > MAX_VALUE_BYTES {
            bail!("value for {key:?} exceeds store limit of {MAX_VALUE_BYTES} bytes");
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Serializes the whole ordered collection as one JSON array.
pub fn encode_workouts(workouts: &[Workout]) -> Result<String> {
    serde_json::to_string(workouts).context("serializing workouts")
}

/// One workout as a single-line JSON record, in the stored shape.
pub fn encode_workout(workout: &Workout) -> Result<String> {
    serde_json::to_string(workout).with_context(|| format!("serializing workout {}", workout.id))
}

pub fn decode_workouts(payload: &str) -> Result<Vec<Workout>> {
    serde_json::from_str(payload).context("parsing stored workouts")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Activity, Coordinates};
    use crate::workout::{make_cycling, make_running};
    use chrono::{FixedOffset, TimeZone};

    fn sample() -> Vec<Workout> {
        let at = FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 7, 3, 18, 0, 0)
            .unwrap();
        vec![
            make_running(Coordinates::new(51.5, -0.1), 5.2, 24.0, 178.0, at),
            make_cycling(Coordinates::new(39.7, -105.0), 27.0, 95.0, 523.0, at),
        ]
    }

    #[test]
    fn record_shape_is_flat() {
        let json = encode_workouts(&sample()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &v[0];
        assert_eq!(first["kind"], "running");
        assert_eq!(first["coordinates"], serde_json::json!([51.5, -0.1]));
        assert_eq!(first["description"], "Running on July 3");
        assert!(first["cadenceSpm"].is_number());
        assert!(first["paceMinPerKm"].is_number());
        assert!(first["createdAt"].as_str().unwrap().starts_with("2026-07-03T18:00:00"));
        assert_eq!(v[1]["kind"], "cycling");
        assert!(v[1]["elevationGainM"].is_number());
        assert!(v[1]["speedKmPerH"].is_number());
    }

    #[test]
    fn single_record_carries_every_field() {
        let w = &sample()[1];
        let v: serde_json::Value = serde_json::from_str(&encode_workout(w).unwrap()).unwrap();
        let mut keys: Vec<_> = v.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            [
                "coordinates",
                "createdAt",
                "description",
                "distanceKm",
                "durationMin",
                "elevationGainM",
                "id",
                "kind",
                "speedKmPerH"
            ]
        );
        assert_eq!(v["id"], w.id.as_str());
    }

    #[test]
    fn decode_keeps_stored_derived_fields() {
        // Derived values are taken as stored, never recomputed.
        let payload = r#"[{"id":"abc","createdAt":"2026-02-10T08:00:00+01:00",
            "coordinates":[1.0,2.0],"distanceKm":10,"durationMin":50,
            "description":"Running on February 10","kind":"running",
            "cadenceSpm":170,"paceMinPerKm":99}]"#;
        let ws = decode_workouts(payload).unwrap();
        assert_eq!(ws.len(), 1);
        assert_eq!(ws[0].id.as_str(), "abc");
        assert_eq!(
            ws[0].activity,
            Activity::Running {
                cadence_spm: 170.0,
                pace_min_per_km: 99.0
            }
        );
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_workouts("not json").is_err());
        assert!(decode_workouts(r#"{"kind":"running"}"#).is_err());
    }

    #[test]
    fn file_store_set_get_remove() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(tmp.path().join("data"));

        assert_eq!(store.get("workouts").unwrap(), None);
        store.set("workouts", "[]").unwrap();
        assert_eq!(store.get("workouts").unwrap().as_deref(), Some("[]"));
        store.set("workouts", "[1]").unwrap();
        assert_eq!(store.get("workouts").unwrap().as_deref(), Some("[1]"));

        store.remove("workouts").unwrap();
        assert_eq!(store.get("workouts").unwrap(), None);
        store.remove("workouts").unwrap();
    }

    #[test]
    fn file_store_rejects_path_keys_and_oversize_values() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(tmp.path());
        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());

        let big = "x".repeat(MAX_VALUE_BYTES + 1);
        assert!(store.set("workouts", &big).is_err());
        assert_eq!(store.get("workouts").unwrap(), None);
    }
}
