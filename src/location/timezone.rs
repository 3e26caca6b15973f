//! Time zone from coordinates, by point-in-polygon lookup over the
//! timezone-boundary-builder dataset bundled with `tzf-rs`.

use chrono_tz::Tz;
use std::sync::OnceLock;
use tzf_rs::DefaultFinder;

/// IANA zone containing (`lat`, `lon`), or "UTC" when none is found.
pub fn timezone_at(lat: f64, lon: f64) -> String {
    static FINDER: OnceLock<DefaultFinder> = OnceLock::new();
    let finder = FINDER.get_or_init(DefaultFinder::new);

    // tzf-rs takes (longitude, latitude).
    let name = finder.get_tz_name(lon, lat);
    if name.is_empty() || name.parse::<Tz>().is_err() {
        log::debug!("no time zone for ({}, {}), using UTC", lat, lon);
        return "UTC".into();
    }
    name.to_string()
}
