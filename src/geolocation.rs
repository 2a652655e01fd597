use crate::error::LocationError;
use crate::types::Coordinates;

/// Source of the user's starting position. Single-shot; the session never retries.
pub trait GeolocationProvider {
    fn request_location(&mut self) -> Result<Coordinates, LocationError>;
}

/// Reports a position fixed up front (from the command line or environment),
/// or fails as a denied permission when none was given.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLocation {
    position: Option<Coordinates>,
}

impl StaticLocation {
    pub const fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

impl GeolocationProvider for StaticLocation {
    fn request_location(&mut self) -> Result<Coordinates, LocationError> {
        self.position.ok_or(LocationError::PermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_position_is_denied() {
        let mut geo = StaticLocation::default();
        assert_eq!(geo.request_location(), Err(LocationError::PermissionDenied));

        let mut geo = StaticLocation::new(Some(Coordinates::new(48.85, 2.35)));
        assert_eq!(geo.request_location(), Ok(Coordinates::new(48.85, 2.35)));
    }
}
