use crate::render::SidebarEntry;
use std::fmt;

/// User-visible announcements. Transient; they never block a retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    LocationUnavailable,
    InvalidInput,
    StorageFailed,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LocationUnavailable => "Failed to get your current location 🥺",
            Self::InvalidInput => "Inputs have to be positive numbers!",
            Self::StorageFailed => "Could not save your workouts; they will be lost on reload.",
        })
    }
}

/// The form, sidebar and notice area the session drives.
pub trait WorkoutView {
    /// Reveal the entry form with the distance field focused.
    fn show_form(&mut self);
    /// Empty the distance, duration, cadence and elevation fields.
    fn reset_form(&mut self);
    fn hide_form(&mut self);
    /// Swap which of cadence / elevation is visible.
    fn toggle_activity_fields(&mut self);
    fn append_entry(&mut self, entry: SidebarEntry);
    fn clear_entries(&mut self);
    fn notify(&mut self, notice: Notice);
}

/// Keeps the sidebar and form state in memory; notices go to stderr.
#[derive(Debug, Clone, Default)]
pub struct TerminalView {
    entries: Vec<SidebarEntry>,
    form_open: bool,
    activity_toggled: bool,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[SidebarEntry] {
        &self.entries
    }

    pub const fn form_open(&self) -> bool {
        self.form_open
    }
}

impl WorkoutView for TerminalView {
    fn show_form(&mut self) {
        self.form_open = true;
    }

    fn reset_form(&mut self) {
        tracing::trace!("form fields cleared");
    }

    fn hide_form(&mut self) {
        self.form_open = false;
    }

    fn toggle_activity_fields(&mut self) {
        self.activity_toggled = !self.activity_toggled;
        tracing::trace!(elevation_visible = self.activity_toggled, "toggled activity fields");
    }

    fn append_entry(&mut self, entry: SidebarEntry) {
        self.entries.push(entry);
    }

    fn clear_entries(&mut self) {
        self.entries.clear();
    }

    fn notify(&mut self, notice: Notice) {
        eprintln!("{notice}");
    }
}
