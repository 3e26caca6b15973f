//! Core types for the location subsystem.

use std::fmt;
use thiserror::Error;

/// How a location was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    Nominatim,
    IpInfo,
    Fallback,
    Manual,
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nominatim => write!(f, "Nominatim"),
            Self::IpInfo => write!(f, "IP geolocation"),
            Self::Fallback => write!(f, "default location"),
            Self::Manual => write!(f, "coordinates"),
        }
    }
}

/// A fully resolved location with coordinates, timezone, and provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub tz: String,
    pub source: LocationSource,
}

/// What the caller asked to be located.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// Free-text place name, e.g. "Reykjavik, Iceland".
    Name(String),
    /// ZIP or postal code.
    PostalCode(String),
    Coordinates { lat: f64, lon: f64 },
    /// Whatever the caller's public IP address maps to.
    Ip,
}

/// Location resolution errors.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Could not find location: {0}")]
    NotFound(String),
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
    #[error("Invalid coordinates ({lat}, {lon}). Lat: -90..90, Lon: -180..180")]
    InvalidCoordinates { lat: f64, lon: f64 },
}

impl fmt::Display for ResolvedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {}) [{}] via {}", self.name, self.lat, self.lon, self.tz, self.source)
    }
}
