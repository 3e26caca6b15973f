//! Sunlight hours for a given date and place.
//!
//! The [`calculator`] turns a date, a coordinate and an IANA time zone into
//! dawn, sunrise, solar noon, sunset and dusk. [`location`] resolves where the
//! caller is, [`dates`] resolves which day they mean, and [`format`] renders a
//! [`report::DaylightReport`] for the terminal.

pub mod calculator;
pub mod dates;
pub mod error;
pub mod format;
pub mod location;
pub mod report;
pub mod solar;
pub mod zone;

pub use calculator::{compute_solar_events, daylight_hours, DayKind, GeoCoordinate, SolarCalculator, SolarEventSet};
pub use dates::{resolve_date, Clock, DateSelection, FixedClock, SystemClock};
pub use error::{Error, Result};
pub use format::{format_report, OutputFormat};
pub use report::DaylightReport;
