//! The daylight report: one date, one place, its solar events.

use crate::calculator::{daylight_hours, GeoCoordinate, SolarCalculator, SolarEventSet};
use crate::error::Result;
use crate::location::ResolvedLocation;
use crate::solar::SolarEphemeris;
use crate::zone::TimeZoneOffsetProvider;
use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaylightReport {
    pub date: NaiveDate,
    pub location: ReportLocation,
    pub sunlight: Sunlight,
    pub astronomical: Astronomical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sunlight {
    pub sunrise: String,
    pub sunset: String,
    /// 12-hour clock, e.g. "04:25 AM".
    pub sunrise_time: String,
    pub sunset_time: String,
    pub duration_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Astronomical {
    pub dawn: String,
    pub dusk: String,
    pub noon: String,
}

impl DaylightReport {
    /// Solve the day at `location` and assemble the report.
    pub fn compute<E, Z>(calculator: &SolarCalculator<E, Z>, date: NaiveDate, location: &ResolvedLocation) -> Result<Self>
    where
        E: SolarEphemeris,
        Z: TimeZoneOffsetProvider,
    {
        let coord = GeoCoordinate::new(location.lat, location.lon)?;
        let events = calculator.compute(date, coord, &location.tz)?;
        Ok(Self::from_events(date, location, &events))
    }

    pub fn from_events(date: NaiveDate, location: &ResolvedLocation, events: &SolarEventSet) -> Self {
        Self {
            date,
            location: ReportLocation {
                name: location.name.clone(),
                latitude: location.lat,
                longitude: location.lon,
                timezone: location.tz.clone(),
            },
            sunlight: Sunlight {
                sunrise: iso(&events.sunrise),
                sunset: iso(&events.sunset),
                sunrise_time: clock_12h(&events.sunrise),
                sunset_time: clock_12h(&events.sunset),
                duration_hours: daylight_hours(events),
            },
            astronomical: Astronomical {
                dawn: iso(&events.dawn),
                dusk: iso(&events.dusk),
                noon: iso(&events.solar_noon),
            },
        }
    }
}

fn iso(t: &DateTime<FixedOffset>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, false)
}

fn clock_12h(t: &DateTime<FixedOffset>) -> String {
    t.format("%I:%M %p").to_string()
}
