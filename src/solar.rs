//! Low-precision solar ephemeris (NOAA formulation).
//!
//! Declination and equation of time for any Julian day, plus the hour-angle
//! geometry used to place sunrise, sunset and twilight on the clock.
//! Accuracy: about one minute of time for dates within ±50 years of J2000.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::f64::consts::PI;

const DEG: f64 = PI / 180.0;

/// Apparent elevation of the sun's upper limb at sunrise and sunset,
/// refraction and disk radius included.
pub const SUNRISE_ELEVATION: f64 = -0.833;

/// Elevation that bounds civil twilight.
pub const CIVIL_TWILIGHT_ELEVATION: f64 = -6.0;

/// Where the sun is on a given day, as far as event timing cares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunState {
    /// Declination in degrees.
    pub declination: f64,
    /// Equation of time in minutes (apparent minus mean solar time).
    pub equation_of_time: f64,
}

/// Source of solar declination and equation of time.
///
/// The calculator only ever asks for these two quantities, so any ephemeris
/// (a higher-precision series, a lookup table) can stand in for the default.
pub trait SolarEphemeris {
    fn sun_at(&self, julian_day: f64) -> SunState;
}

/// The NOAA spreadsheet formulas.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoaaEphemeris;

impl SolarEphemeris for NoaaEphemeris {
    fn sun_at(&self, julian_day: f64) -> SunState {
        // Julian centuries since J2000.0.
        let t = (julian_day - 2451545.0) / 36525.0;

        let mean_lon = (280.46646 + t * (36000.76983 + t * 0.0003032)).rem_euclid(360.0) * DEG;
        let anomaly = (357.52911 + t * (35999.05029 - t * 0.0001537)) * DEG;
        let ecc = 0.016708634 - t * (0.000042037 + t * 0.0000001267);
        let omega = (125.04 - 1934.136 * t) * DEG;

        let center = anomaly.sin() * (1.914602 - t * (0.004817 + t * 0.000014))
            + (2.0 * anomaly).sin() * (0.019993 - t * 0.000101)
            + (3.0 * anomaly).sin() * 0.000289;
        let apparent_lon = (mean_lon / DEG + center - 0.00569 - 0.00478 * omega.sin()) * DEG;

        let arcsec = 21.448 - t * (46.815 + t * (0.00059 - t * 0.001813));
        let obliquity = (23.0 + (26.0 + arcsec / 60.0) / 60.0 + 0.00256 * omega.cos()) * DEG;

        let y = (obliquity / 2.0).tan().powi(2);
        let eot = y * (2.0 * mean_lon).sin() - 2.0 * ecc * anomaly.sin()
            + 4.0 * ecc * y * anomaly.sin() * (2.0 * mean_lon).cos()
            - 0.5 * y * y * (4.0 * mean_lon).sin()
            - 1.25 * ecc * ecc * (2.0 * anomaly).sin();

        SunState {
            declination: (obliquity.sin() * apparent_lon.sin()).asin() / DEG,
            equation_of_time: 4.0 * eot / DEG,
        }
    }
}

/// Result of solving the hour-angle equation for one elevation threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HourAngle {
    /// The sun crosses the threshold; half-arc in degrees.
    Crosses(f64),
    /// The sun stays above the threshold all day.
    AlwaysAbove,
    /// The sun stays below the threshold all day.
    AlwaysBelow,
}

/// Convert a NaiveDateTime (assumed UTC) to Julian Date.
pub fn julian_date(dt: &NaiveDateTime) -> f64 {
    let y = dt.year() as f64;
    let m = dt.month() as f64;
    let d = dt.day() as f64;
    let h = dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0;

    let (y2, m2) = if m <= 2.0 { (y - 1.0, m + 12.0) } else { (y, m) };

    let a = (y2 / 100.0_f64).floor();
    let b = 2.0 - a + (a / 4.0_f64).floor();

    (365.25_f64 * (y2 + 4716.0)).floor() + (30.6001_f64 * (m2 + 1.0)).floor() + d + h / 24.0 + b
        - 1524.5
}

/// Julian Date at 0h UTC of `date`.
pub fn julian_day(date: NaiveDate) -> f64 {
    julian_date(&date.and_time(NaiveTime::MIN))
}

/// Solve `cos H = (sin h0 - sin φ sin δ) / (cos φ cos δ)` for the half-arc the
/// sun spends above `elevation` degrees.
pub fn hour_angle(latitude: f64, declination: f64, elevation: f64) -> HourAngle {
    let lat = latitude * DEG;
    let decl = declination * DEG;
    let cos_h = ((elevation * DEG).sin() - lat.sin() * decl.sin()) / (lat.cos() * decl.cos());

    if cos_h < -1.0 {
        HourAngle::AlwaysAbove
    } else if cos_h > 1.0 {
        HourAngle::AlwaysBelow
    } else {
        HourAngle::Crosses(cos_h.acos() / DEG)
    }
}

/// Geometric elevation of the sun (degrees) at a UTC instant.
pub fn solar_elevation<E: SolarEphemeris>(ephemeris: &E, utc: &NaiveDateTime, latitude: f64, longitude: f64) -> f64 {
    let sun = ephemeris.sun_at(julian_date(utc));

    let minutes = utc.hour() as f64 * 60.0 + utc.minute() as f64 + utc.second() as f64 / 60.0;
    let true_solar_time = minutes + sun.equation_of_time + 4.0 * longitude;
    let ha = (true_solar_time / 4.0 - 180.0) * DEG;

    let lat = latitude * DEG;
    let decl = sun.declination * DEG;
    let sin_alt = lat.sin() * decl.sin() + lat.cos() * decl.cos() * ha.cos();
    sin_alt.clamp(-1.0, 1.0).asin() / DEG
}
