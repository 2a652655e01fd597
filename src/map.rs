use crate::types::{Coordinates, WorkoutKind};

pub const TILE_URL: &str = "https://tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// The interactive map the session draws on.
///
/// Markers and panning need the handle returned by [`MapSurface::initialize`],
/// so nothing can be placed before the map exists. Clicks are delivered by the
/// host calling [`crate::session::Session::on_map_click`].
pub trait MapSurface {
    type Handle;

    /// Show the map around `center`. Replaces any earlier map, so markers
    /// placed through a previous handle are gone afterwards.
    fn initialize(&mut self, center: Coordinates, zoom: u8) -> Self::Handle;
    fn place_marker(&mut self, handle: &Self::Handle, marker: Marker);
    fn pan_to(&mut self, handle: &Self::Handle, at: Coordinates, zoom: u8, animated: bool);
    /// Remove the map and every marker on it.
    fn teardown(&mut self, handle: Self::Handle);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub at: Coordinates,
    pub popup: String,
    pub options: MarkerOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerOptions {
    pub rise_on_hover: bool,
    pub draggable: bool,
    pub popup: PopupOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupOptions {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
}

impl MarkerOptions {
    pub fn for_kind(kind: WorkoutKind) -> Self {
        Self {
            rise_on_hover: true,
            draggable: true,
            popup: PopupOptions {
                max_width: 250,
                min_width: 100,
                auto_close: false,
                close_on_click: false,
                class_name: style_tag(kind),
            },
        }
    }
}

pub fn style_tag(kind: WorkoutKind) -> String {
    format!("{kind}-popup")
}

/// Map state kept in memory and reported through tracing, for terminal use.
#[derive(Debug, Clone, Default)]
pub struct TerminalMap {
    view: Option<(Coordinates, u8)>,
    markers: Vec<Marker>,
}

/// Handle for a [`TerminalMap`] that has been initialized.
#[derive(Debug, Clone, Copy)]
pub struct TerminalMapHandle;

impl TerminalMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Current center and zoom, if the map was initialized.
    pub const fn view(&self) -> Option<(Coordinates, u8)> {
        self.view
    }
}

impl MapSurface for TerminalMap {
    type Handle = TerminalMapHandle;

    fn initialize(&mut self, center: Coordinates, zoom: u8) -> Self::Handle {
        tracing::info!(%center, zoom, tiles = TILE_URL, "map initialized");
        tracing::trace!(attribution = TILE_ATTRIBUTION);
        self.view = Some((center, zoom));
        self.markers.clear();
        TerminalMapHandle
    }

    fn place_marker(&mut self, _handle: &Self::Handle, marker: Marker) {
        tracing::debug!(
            at = %marker.at,
            class = %marker.options.popup.class_name,
            popup = %marker.popup,
            "marker placed"
        );
        self.markers.push(marker);
    }

    fn pan_to(&mut self, _handle: &Self::Handle, at: Coordinates, zoom: u8, animated: bool) {
        tracing::debug!(%at, zoom, animated, "map panned");
        self.view = Some((at, zoom));
    }

    fn teardown(&mut self, _handle: Self::Handle) {
        tracing::debug!(markers = self.markers.len(), "map removed");
        self.view = None;
        self.markers.clear();
    }
}
