//! Location resolver: turns a [`LocationQuery`] into a [`ResolvedLocation`].
//!
//! Name flow: Nominatim `q=` → not found is an error.
//! ZIP flow:  Nominatim `postalcode=` → not found is an error.
//! IP flow:   ipinfo.io → any failure falls back to the built-in default.

use super::providers::{GeoService, HttpGeoService, ServiceConfig};
use super::timezone::timezone_at;
use super::types::{LocationError, LocationQuery, LocationSource, ResolvedLocation};

/// Where we land when the IP lookup cannot tell us anything.
pub const DEFAULT_NAME: &str = "Mountain View, CA";
pub const DEFAULT_LAT: f64 = 37.3861;
pub const DEFAULT_LON: f64 = -122.0839;
pub const DEFAULT_TZ: &str = "America/Los_Angeles";

pub struct LocationResolver<S = HttpGeoService> {
    service: S,
}

impl LocationResolver {
    pub fn new() -> Self {
        Self::with_config(ServiceConfig::default())
    }

    pub fn with_config(config: ServiceConfig) -> Self {
        Self { service: HttpGeoService::new(config) }
    }
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GeoService> LocationResolver<S> {
    /// Create a resolver over a specific service (for testing).
    pub fn with_service(service: S) -> Self {
        Self { service }
    }

    pub fn resolve(&self, query: &LocationQuery) -> Result<ResolvedLocation, LocationError> {
        match query {
            LocationQuery::Name(name) => self.resolve_from_name(name),
            LocationQuery::PostalCode(code) => self.resolve_from_zip(code),
            LocationQuery::Coordinates { lat, lon } => Self::from_coordinates(*lat, *lon),
            LocationQuery::Ip => Ok(self.resolve_from_ip()),
        }
    }

    /// Geocode a free-text place name.
    pub fn resolve_from_name(&self, query: &str) -> Result<ResolvedLocation, LocationError> {
        let top = self
            .service
            .search_name(query)?
            .into_iter()
            .next()
            .ok_or_else(|| LocationError::NotFound(query.to_string()))?;

        let (lat, lon) = top.coordinates()?;
        let short = top.short_name();
        // A one- or two-letter label is less useful than what the user typed.
        let name = if short.chars().count() < 3 { query.to_string() } else { short.to_string() };

        Ok(ResolvedLocation {
            name,
            lat,
            lon,
            tz: timezone_at(lat, lon),
            source: LocationSource::Nominatim,
        })
    }

    /// Geocode a ZIP or postal code.
    pub fn resolve_from_zip(&self, code: &str) -> Result<ResolvedLocation, LocationError> {
        let top = self
            .service
            .search_postal_code(code)?
            .into_iter()
            .next()
            .ok_or_else(|| LocationError::NotFound(format!("ZIP code {}", code)))?;

        let (lat, lon) = top.coordinates()?;

        Ok(ResolvedLocation {
            name: format!("{}, {}", top.short_name(), code),
            lat,
            lon,
            tz: timezone_at(lat, lon),
            source: LocationSource::Nominatim,
        })
    }

    /// Locate the caller by IP. Never fails: on any error the built-in
    /// default location is returned and a warning is logged.
    pub fn resolve_from_ip(&self) -> ResolvedLocation {
        match self.try_ip() {
            Ok(loc) => loc,
            Err(e) => {
                log::warn!("Error determining location from IP: {}", e);
                log::warn!("Using default location: {}", DEFAULT_NAME);
                Self::default_location()
            }
        }
    }

    fn try_ip(&self) -> Result<ResolvedLocation, LocationError> {
        let info = self.service.lookup_ip()?;
        let (lat, lon) = info.coordinates()?;
        check_range(lat, lon)?;
        Ok(ResolvedLocation {
            name: info.display_name(),
            lat,
            lon,
            tz: timezone_at(lat, lon),
            source: LocationSource::IpInfo,
        })
    }

    /// Create a ResolvedLocation from manual lat/lon input.
    pub fn from_coordinates(lat: f64, lon: f64) -> Result<ResolvedLocation, LocationError> {
        check_range(lat, lon)?;

        Ok(ResolvedLocation {
            name: format!("Custom Location ({}, {})", crate::format::decimal(lat), crate::format::decimal(lon)),
            lat,
            lon,
            tz: timezone_at(lat, lon),
            source: LocationSource::Manual,
        })
    }

    pub fn default_location() -> ResolvedLocation {
        ResolvedLocation {
            name: DEFAULT_NAME.into(),
            lat: DEFAULT_LAT,
            lon: DEFAULT_LON,
            tz: DEFAULT_TZ.into(),
            source: LocationSource::Fallback,
        }
    }
}

/// NaN fails both range checks.
fn check_range(lat: f64, lon: f64) -> Result<(), LocationError> {
    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        Err(LocationError::InvalidCoordinates { lat, lon })
    }
}
