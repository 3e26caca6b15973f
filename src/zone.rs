//! UTC offsets for IANA time zones.

use crate::error::{Error, Result};
use chrono::{Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone};
use chrono_tz::Tz;

/// Resolves the UTC offset a zone observes at a given instant.
///
/// Implementations must honour the historical and future DST rules of the
/// zone, since a report can be asked for any date.
pub trait TimeZoneOffsetProvider {
    /// Offset in effect for `tz_id` at the UTC instant `utc`.
    fn offset_at(&self, tz_id: &str, utc: NaiveDateTime) -> Result<FixedOffset>;

    /// UTC instant at which the local calendar day `date` begins in `tz_id`.
    ///
    /// When midnight falls inside a DST gap the day begins at the first local
    /// time that exists.
    fn day_start(&self, tz_id: &str, date: NaiveDate) -> Result<NaiveDateTime> {
        let midnight = date.and_time(NaiveTime::MIN);
        let guess = midnight - seconds(self.offset_at(tz_id, midnight)?);
        let utc = midnight - seconds(self.offset_at(tz_id, guess)?);
        let before = self.offset_at(tz_id, utc)?;
        if (utc + seconds(before)).date() < date {
            // Midnight was skipped: the day starts at the transition itself.
            return Ok(midnight - seconds(before));
        }
        Ok(utc)
    }
}

fn seconds(offset: FixedOffset) -> Duration {
    Duration::seconds(offset.local_minus_utc() as i64)
}

/// Offsets backed by the IANA database compiled into `chrono-tz`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoTzOffsets;

impl ChronoTzOffsets {
    pub fn parse(tz_id: &str) -> Result<Tz> {
        tz_id
            .parse::<Tz>()
            .map_err(|_| Error::InvalidInput(format!("unknown time zone '{}'", tz_id)))
    }
}

impl TimeZoneOffsetProvider for ChronoTzOffsets {
    fn offset_at(&self, tz_id: &str, utc: NaiveDateTime) -> Result<FixedOffset> {
        let tz = Self::parse(tz_id)?;
        Ok(tz.offset_from_utc_datetime(&utc).fix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_zone_offset() {
        let off = ChronoTzOffsets.offset_at("Asia/Tokyo", date(2025, 6, 21).and_hms_opt(0, 0, 0).unwrap()).unwrap();
        assert_eq!(off.local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_dst_is_applied_per_instant() {
        let z = ChronoTzOffsets;
        let winter = z.offset_at("America/Los_Angeles", date(2025, 1, 15).and_hms_opt(20, 0, 0).unwrap()).unwrap();
        let summer = z.offset_at("America/Los_Angeles", date(2025, 7, 15).and_hms_opt(20, 0, 0).unwrap()).unwrap();
        assert_eq!(winter.local_minus_utc(), -8 * 3600);
        assert_eq!(summer.local_minus_utc(), -7 * 3600);
    }

    #[test]
    fn test_unknown_zone_is_invalid_input() {
        let err = ChronoTzOffsets.offset_at("Mars/Olympus_Mons", date(2025, 1, 1).and_hms_opt(0, 0, 0).unwrap());
        assert!(matches!(err, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_day_start_regular() {
        let start = ChronoTzOffsets.day_start("Asia/Tokyo", date(2025, 6, 21)).unwrap();
        assert_eq!(start, date(2025, 6, 20).and_hms_opt(15, 0, 0).unwrap());
    }

    #[test]
    fn test_day_start_across_dst_change() {
        // Europe/London springs forward at 01:00 UTC, midnight itself is unaffected.
        let start = ChronoTzOffsets.day_start("Europe/London", date(2025, 3, 30)).unwrap();
        assert_eq!(start, date(2025, 3, 30).and_hms_opt(0, 0, 0).unwrap());
        let next = ChronoTzOffsets.day_start("Europe/London", date(2025, 3, 31)).unwrap();
        assert_eq!(next, date(2025, 3, 30).and_hms_opt(23, 0, 0).unwrap());
    }

    #[test]
    fn test_day_start_when_midnight_is_skipped() {
        // America/Santiago jumps from 00:00 to 01:00 on 2024-09-08.
        let start = ChronoTzOffsets.day_start("America/Santiago", date(2024, 9, 8)).unwrap();
        assert_eq!(start, date(2024, 9, 8).and_hms_opt(4, 0, 0).unwrap());
    }
}
