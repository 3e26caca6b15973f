//! Location subsystem.
//!
//! Place-name and postal-code geocoding, IP-based geolocation with a fixed
//! fallback, and time zone lookup from coordinates.

pub mod providers;
pub mod resolver;
pub mod timezone;
pub mod types;

pub use providers::{GeoService, HttpGeoService, ServiceConfig};
pub use resolver::LocationResolver;
pub use timezone::timezone_at;
pub use types::{LocationError, LocationQuery, LocationSource, ResolvedLocation};
