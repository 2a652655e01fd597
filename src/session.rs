//! The workout session: owns the collection and keeps map, sidebar and store
//! in step with it.
//!
//! Flow: `start()` restores saved workouts into the sidebar, asks for a
//! location and, once the map exists, places their markers. A map click
//! records the pending location and opens the form; submitting the form
//! validates, builds the workout, renders it and rewrites the store.

use crate::dlog;
use crate::error::{LocationError, Result, SessionError};
use crate::form::{FormValues, validate};
use crate::geolocation::GeolocationProvider;
use crate::map::MapSurface;
use crate::render::{marker_for, sidebar_entry};
use crate::store::{PersistentStore, decode_workouts, encode_workouts};
use crate::types::{Coordinates, Workout, WorkoutId};
use crate::view::{Notice, WorkoutView};
use anyhow::Context;
use chrono::{DateTime, FixedOffset, Local};

pub const STORAGE_KEY: &str = "workouts";
pub const DEFAULT_ZOOM: u8 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub zoom: u8,
    pub storage_key: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}

pub type Clock = fn() -> DateTime<FixedOffset>;

pub fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

pub struct Session<G, M, S, V>
where
    M: MapSurface,
{
    geolocation: G,
    map: M,
    map_handle: Option<M::Handle>,
    store: S,
    view: V,
    settings: SessionSettings,
    clock: Clock,

    workouts: Vec<Workout>,
    pending_click: Option<Coordinates>,
    started: bool,
}

impl<G, M, S, V> Session<G, M, S, V>
where
    G: GeolocationProvider,
    M: MapSurface,
    S: PersistentStore,
    V: WorkoutView,
{
    pub fn new(geolocation: G, map: M, store: S, view: V, settings: SessionSettings) -> Self {
        Self {
            geolocation,
            map,
            map_handle: None,
            store,
            view,
            settings,
            clock: local_now,
            workouts: Vec::new(),
            pending_click: None,
            started: false,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Restore saved workouts, then try to bring up the map. Runs once; later
    /// calls are no-ops.
    ///
    /// A location failure leaves the map down and posts a notice; restored
    /// sidebar entries stay visible.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            dlog!("session already started");
            return Ok(());
        }
        self.started = true;

        self.restore_workouts();

        match self.geolocation.request_location() {
            Ok(center) => {
                self.load_map(center);
                Ok(())
            }
            Err(e) => Err(self.location_failed(e)),
        }
    }

    /// Rehydrate the collection from the store and render the sidebar.
    ///
    /// A missing or unreadable payload yields an empty collection.
    pub fn restore_workouts(&mut self) {
        let key = self.settings.storage_key.as_str();
        let restored = match self.store.get(key) {
            Ok(None) => Vec::new(),
            Ok(Some(payload)) => match decode_workouts(&payload) {
                Ok(ws) => ws,
                Err(e) => {
                    tracing::warn!(key, err = %format!("{e:#}"), "discarding corrupt stored workouts");
                    Vec::new()
                }
            },
            Err(e) => {
                tracing::warn!(key, err = %format!("{e:#}"), "could not read stored workouts");
                Vec::new()
            }
        };

        self.workouts = restored;
        self.view.clear_entries();
        for w in &self.workouts {
            self.view.append_entry(sidebar_entry(w));
        }
        tracing::info!(count = self.workouts.len(), "workouts restored");
    }

    /// Initialize the map around `center` and place markers for every
    /// workout already in the collection.
    pub fn load_map(&mut self, center: Coordinates) {
        if self.map_handle.is_some() {
            dlog!("map already loaded");
            return;
        }
        dlog!("https://www.google.com/maps/@{},{}", center.lat, center.lng);

        let handle = self.map.initialize(center, self.settings.zoom);
        for w in &self.workouts {
            self.map.place_marker(&handle, marker_for(w));
        }
        self.map_handle = Some(handle);
        tracing::info!(%center, markers = self.workouts.len(), "map ready");
    }

    pub fn location_failed(&mut self, err: LocationError) -> SessionError {
        tracing::warn!(err = %err, "could not get current location");
        self.view.notify(Notice::LocationUnavailable);
        SessionError::from(err)
    }

    /// Remember `at` as the location for the next submission and open the form.
    pub fn on_map_click(&mut self, at: Coordinates) -> Result<()> {
        if self.map_handle.is_none() {
            return Err(SessionError::MapNotReady);
        }
        if let Some(prev) = self.pending_click.replace(at) {
            dlog!("replacing pending click {prev} with {at}");
        }
        self.view.show_form();
        Ok(())
    }

    pub fn on_activity_type_changed(&mut self) {
        self.view.toggle_activity_fields();
    }

    /// Validate the form and, only if it passes, add the workout, render it
    /// and rewrite the store. On error nothing but a notice changes.
    pub fn on_submit(&mut self, form: &FormValues) -> Result<WorkoutId> {
        let Some(at) = self.pending_click else {
            tracing::error!("form submitted without a pending map click");
            return Err(SessionError::NoPendingClick);
        };
        let Some(handle) = self.map_handle.as_ref() else {
            return Err(SessionError::MapNotReady);
        };

        let entry = match validate(form) {
            Ok(entry) => entry,
            Err(e) => {
                dlog!("rejected form {form:?}");
                self.view.notify(Notice::InvalidInput);
                return Err(e);
            }
        };

        let workout = entry.build(at, (self.clock)());
        let id = workout.id.clone();
        tracing::info!(id = %id, kind = %workout.kind(), at = %at, "workout added");

        self.map.place_marker(handle, marker_for(&workout));
        self.view.append_entry(sidebar_entry(&workout));
        self.workouts.push(workout);

        self.view.reset_form();
        self.view.hide_form();
        self.persist();

        Ok(id)
    }

    /// Pan to the workout behind a sidebar row. Unknown ids are ignored.
    pub fn on_workout_row_activated(&mut self, id: &WorkoutId) -> Option<Coordinates> {
        let Some(w) = self.workouts.iter().find(|w| &w.id == id) else {
            dlog!("no workout for row id={id}");
            return None;
        };
        let Some(handle) = self.map_handle.as_ref() else {
            dlog!("map not ready, cannot pan to id={id}");
            return None;
        };

        self.map
            .pan_to(handle, w.coordinates, self.settings.zoom, true);
        Some(w.coordinates)
    }

    /// Drop every stored workout and start over with an empty collection.
    pub fn reset(&mut self) -> anyhow::Result<()> {
        let key = self.settings.storage_key.as_str();
        self.store
            .remove(key)
            .with_context(|| format!("clearing stored workouts under {key:?}"))?;
        tracing::info!(key, "stored workouts cleared");

        self.workouts.clear();
        self.pending_click = None;
        if let Some(handle) = self.map_handle.take() {
            self.map.teardown(handle);
        }
        self.started = false;
        self.view.reset_form();
        self.view.hide_form();
        self.view.clear_entries();

        // No location on reload is a degraded session, not a reset failure.
        if let Err(e) = self.start() {
            dlog!("restart after reset: {e}");
        }
        Ok(())
    }

    fn persist(&mut self) {
        let key = self.settings.storage_key.as_str();
        let saved = encode_workouts(&self.workouts).and_then(|json| self.store.set(key, &json));
        if let Err(e) = saved {
            tracing::error!(key, err = %format!("{e:#}"), "failed to persist workouts");
            self.view.notify(Notice::StorageFailed);
        }
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub const fn pending_click(&self) -> Option<Coordinates> {
        self.pending_click
    }

    pub const fn is_map_ready(&self) -> bool {
        self.map_handle.is_some()
    }

    pub const fn map(&self) -> &M {
        &self.map
    }

    pub const fn view(&self) -> &V {
        &self.view
    }

    pub const fn store(&self) -> &S {
        &self.store
    }
}
