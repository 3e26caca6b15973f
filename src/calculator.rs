//! The solar calculator: dawn, sunrise, solar noon, sunset and dusk for one
//! local calendar day.
//!
//! Times are solved in UTC minutes from the hour-angle geometry in
//! [`crate::solar`], then placed on the local clock through a
//! [`TimeZoneOffsetProvider`].

use crate::error::{Error, Result};
use crate::solar::{self, HourAngle, NoaaEphemeris, SolarEphemeris};
use crate::zone::{ChronoTzOffsets, TimeZoneOffsetProvider};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::Serialize;
use std::cmp::Ordering;

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self { latitude, longitude };
        coord.validate()?;
        Ok(coord)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::InvalidInput(format!(
                "latitude {} is outside -90..90",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::InvalidInput(format!(
                "longitude {} is outside -180..180",
                self.longitude
            )));
        }
        Ok(())
    }
}

/// How the sun behaves against one elevation threshold over the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    Normal,
    /// Never drops below the threshold.
    MidnightSun,
    /// Never climbs above the threshold.
    PolarNight,
}

/// Solar events of one local day, each carrying the zone's offset at that instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolarEventSet {
    pub dawn: DateTime<FixedOffset>,
    pub sunrise: DateTime<FixedOffset>,
    pub solar_noon: DateTime<FixedOffset>,
    pub sunset: DateTime<FixedOffset>,
    pub dusk: DateTime<FixedOffset>,
    /// Behaviour against the sunrise/sunset threshold.
    pub daylight: DayKind,
    /// Behaviour against the civil twilight threshold.
    pub twilight: DayKind,
}

enum Event {
    Crossing { rise: f64, set: f64 },
    AlwaysAbove,
    AlwaysBelow,
}

/// Computes [`SolarEventSet`]s from a pluggable ephemeris and time-zone source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolarCalculator<E = NoaaEphemeris, Z = ChronoTzOffsets> {
    ephemeris: E,
    zones: Z,
}

impl SolarCalculator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: SolarEphemeris, Z: TimeZoneOffsetProvider> SolarCalculator<E, Z> {
    pub fn with_providers(ephemeris: E, zones: Z) -> Self {
        Self { ephemeris, zones }
    }

    pub fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    /// Solve the events of local calendar day `date` at `coord` in zone `tz`.
    ///
    /// Fails only on out-of-range coordinates or an unknown zone; polar days
    /// are folded into the returned set (see [`DayKind`]).
    pub fn compute(&self, date: NaiveDate, coord: GeoCoordinate, tz: &str) -> Result<SolarEventSet> {
        coord.validate()?;
        let midnight = date.and_time(NaiveTime::MIN);
        self.zones.offset_at(tz, midnight)?;

        let lon = coord.longitude;
        let lat = coord.latitude;

        // Anchor on the UTC day whose solar noon falls on the requested local date.
        let mut shift = 0i64;
        let mut noon_min = self.transit_minutes(solar::julian_day(date), lon);
        for _ in 0..2 {
            let noon_local = self.localize(tz, midnight, noon_min)?;
            let step = match noon_local.date_naive().cmp(&date) {
                Ordering::Equal => break,
                Ordering::Greater => -1,
                Ordering::Less => 1,
            };
            shift += step;
            let jd = solar::julian_day(date) + shift as f64;
            noon_min = self.transit_minutes(jd, lon) + (shift * 1440) as f64;
        }
        let jd = solar::julian_day(date) + shift as f64;
        let base_min = (shift * 1440) as f64;

        let horizon = self.events(jd, lat, lon, noon_min - base_min, solar::SUNRISE_ELEVATION);
        let civil = self.events(jd, lat, lon, noon_min - base_min, solar::CIVIL_TWILIGHT_ELEVATION);

        let day_start = self.zones.day_start(tz, date)?;
        let day_end = self.zones.day_start(tz, date + Duration::days(1))?;

        let (sunrise, sunset, daylight) =
            self.bounds(tz, midnight, &horizon, base_min, noon_min, day_start, day_end)?;
        let (dawn, dusk, twilight) = self.bounds(tz, midnight, &civil, base_min, noon_min, day_start, day_end)?;

        log::debug!(
            "{} at ({}, {}): daylight {:?}, twilight {:?}",
            date,
            lat,
            lon,
            daylight,
            twilight
        );

        Ok(SolarEventSet {
            // Twilight bounds never fall inside daylight.
            dawn: dawn.min(sunrise),
            sunrise,
            solar_noon: self.localize(tz, midnight, noon_min)?,
            sunset,
            dusk: dusk.max(sunset),
            daylight,
            twilight,
        })
    }

    /// UTC minutes after 0h of Julian day `jd` at which the sun transits `lon`.
    fn transit_minutes(&self, jd: f64, lon: f64) -> f64 {
        let first = self.ephemeris.sun_at(jd + 0.5 - lon / 360.0);
        let estimate = 720.0 - 4.0 * lon - first.equation_of_time;
        let refined = self.ephemeris.sun_at(jd + estimate / 1440.0);
        720.0 - 4.0 * lon - refined.equation_of_time
    }

    fn events(&self, jd: f64, lat: f64, lon: f64, noon_min: f64, elevation: f64) -> Event {
        let at_noon = self.ephemeris.sun_at(jd + noon_min / 1440.0);
        match solar::hour_angle(lat, at_noon.declination, elevation) {
            HourAngle::AlwaysAbove => Event::AlwaysAbove,
            HourAngle::AlwaysBelow => Event::AlwaysBelow,
            HourAngle::Crosses(h) => Event::Crossing {
                rise: self.crossing_minutes(jd, lat, lon, h, elevation, 1.0),
                set: self.crossing_minutes(jd, lat, lon, h, elevation, -1.0),
            },
        }
    }

    /// One refinement pass: re-evaluate the sun at the first estimate.
    fn crossing_minutes(&self, jd: f64, lat: f64, lon: f64, h: f64, elevation: f64, sign: f64) -> f64 {
        let first = self.ephemeris.sun_at(jd + 0.5 - lon / 360.0 - sign * h / 360.0);
        let estimate = 720.0 - 4.0 * (lon + sign * h) - first.equation_of_time;

        let sun = self.ephemeris.sun_at(jd + estimate / 1440.0);
        let h = match solar::hour_angle(lat, sun.declination, elevation) {
            HourAngle::Crosses(refined) => refined,
            _ => h,
        };
        720.0 - 4.0 * (lon + sign * h) - sun.equation_of_time
    }

    #[allow(clippy::too_many_arguments)]
    fn bounds(
        &self,
        tz: &str,
        midnight: NaiveDateTime,
        event: &Event,
        base_min: f64,
        noon_min: f64,
        day_start: NaiveDateTime,
        day_end: NaiveDateTime,
    ) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>, DayKind)> {
        match *event {
            Event::Crossing { rise, set } => Ok((
                self.localize(tz, midnight, base_min + rise)?,
                self.localize(tz, midnight, base_min + set)?,
                DayKind::Normal,
            )),
            Event::AlwaysAbove => Ok((
                self.to_local(tz, day_start)?,
                self.to_local(tz, day_end)?,
                DayKind::MidnightSun,
            )),
            Event::AlwaysBelow => {
                let noon = self.localize(tz, midnight, noon_min)?;
                Ok((noon, noon, DayKind::PolarNight))
            }
        }
    }

    /// Place `minutes` after `midnight` (UTC) on the local clock, to the second.
    fn localize(&self, tz: &str, midnight: NaiveDateTime, minutes: f64) -> Result<DateTime<FixedOffset>> {
        let utc = midnight + Duration::seconds((minutes * 60.0).round() as i64);
        self.to_local(tz, utc)
    }

    fn to_local(&self, tz: &str, utc: NaiveDateTime) -> Result<DateTime<FixedOffset>> {
        let offset = self.zones.offset_at(tz, utc)?;
        Ok(offset.from_utc_datetime(&utc))
    }
}

/// Solve with the default ephemeris and the bundled IANA database.
pub fn compute_solar_events(date: NaiveDate, coord: GeoCoordinate, tz: &str) -> Result<SolarEventSet> {
    SolarCalculator::new().compute(date, coord, tz)
}

/// Hours between sunrise and sunset, clamped to 0..=24 and rounded to 2 decimals.
pub fn daylight_hours(events: &SolarEventSet) -> f64 {
    let hours = (events.sunset - events.sunrise).num_seconds() as f64 / 3600.0;
    (hours.clamp(0.0, 24.0) * 100.0).round() / 100.0
}
