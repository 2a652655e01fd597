#![allow(dead_code)]

use anyhow::{Result, bail};
use chrono::{DateTime, FixedOffset, TimeZone};
use maplog::error::LocationError;
use maplog::geolocation::GeolocationProvider;
use maplog::map::{MapSurface, Marker};
use maplog::render::SidebarEntry;
use maplog::session::{Session, SessionSettings};
use maplog::store::{MemoryStore, PersistentStore};
use maplog::types::Coordinates;
use maplog::view::{Notice, WorkoutView};

pub const HOME: Coordinates = Coordinates::new(51.5, -0.1);

pub fn fixed_now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(3600)
        .unwrap()
        .with_ymd_and_hms(2026, 10, 19, 10, 0, 0)
        .unwrap()
}

pub struct FakeGeo(pub Result<Coordinates, LocationError>);

impl GeolocationProvider for FakeGeo {
    fn request_location(&mut self) -> Result<Coordinates, LocationError> {
        self.0.clone()
    }
}

#[derive(Debug, Default)]
pub struct FakeMap {
    pub initialized: Vec<(Coordinates, u8)>,
    pub markers: Vec<Marker>,
    pub pans: Vec<(Coordinates, u8, bool)>,
    pub teardowns: usize,
}

impl MapSurface for FakeMap {
    type Handle = ();

    fn initialize(&mut self, center: Coordinates, zoom: u8) -> Self::Handle {
        self.initialized.push((center, zoom));
        self.markers.clear();
        self.pans.clear();
    }

    fn place_marker(&mut self, _handle: &Self::Handle, marker: Marker) {
        self.markers.push(marker);
    }

    fn pan_to(&mut self, _handle: &Self::Handle, at: Coordinates, zoom: u8, animated: bool) {
        self.pans.push((at, zoom, animated));
    }

    fn teardown(&mut self, _handle: Self::Handle) {
        self.teardowns += 1;
        self.markers.clear();
        self.pans.clear();
    }
}

#[derive(Debug, Default)]
pub struct FakeView {
    pub entries: Vec<SidebarEntry>,
    pub notices: Vec<Notice>,
    pub form_open: bool,
    pub form_resets: usize,
    pub toggles: usize,
}

impl WorkoutView for FakeView {
    fn show_form(&mut self) {
        self.form_open = true;
    }

    fn reset_form(&mut self) {
        self.form_resets += 1;
    }

    fn hide_form(&mut self) {
        self.form_open = false;
    }

    fn toggle_activity_fields(&mut self) {
        self.toggles += 1;
    }

    fn append_entry(&mut self, entry: SidebarEntry) {
        self.entries.push(entry);
    }

    fn clear_entries(&mut self) {
        self.entries.clear();
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// Reads work, every write fails.
#[derive(Debug, Default)]
pub struct ReadOnlyStore(pub MemoryStore);

impl PersistentStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.0.get(key)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        bail!("quota exceeded")
    }

    fn remove(&mut self, _key: &str) -> Result<()> {
        bail!("read-only")
    }
}

pub type TestSession<S = MemoryStore> = Session<FakeGeo, FakeMap, S, FakeView>;

pub fn session_with<S: PersistentStore>(
    location: Result<Coordinates, LocationError>,
    store: S,
) -> TestSession<S> {
    Session::new(
        FakeGeo(location),
        FakeMap::default(),
        store,
        FakeView::default(),
        SessionSettings::default(),
    )
    .with_clock(fixed_now)
}

pub fn stored(store: &impl PersistentStore) -> Option<String> {
    store.get("workouts").unwrap()
}
