//! Rendering a [`DaylightReport`] for the terminal.

use crate::error::Result;
use crate::report::DaylightReport;
use chrono::NaiveDate;

/// Output style; exactly one is active per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One-line summary.
    #[default]
    Default,
    Json,
    /// Just the number of hours.
    Brief,
    Verbose,
}

/// Render `report`. `today` decides whether the summary says "Today's".
pub fn format_report(report: &DaylightReport, format: OutputFormat, today: NaiveDate) -> Result<String> {
    let hours = decimal(report.sunlight.duration_hours);
    let date_str = report.date.format("%A, %B %d, %Y").to_string();

    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Brief => hours,
        OutputFormat::Verbose => {
            let loc = &report.location;
            let astro = &report.astronomical;
            [
                format!("Sunlight information for {} at {}:", date_str, loc.name),
                format!("  Sunrise: {}", report.sunlight.sunrise_time),
                format!("  Sunset:  {}", report.sunlight.sunset_time),
                format!("  Daylight duration: {} hours", hours),
                format!("  Lat/Lon:  {}, {}", decimal(loc.latitude), decimal(loc.longitude)),
                format!("  Timezone: {}", loc.timezone),
                String::new(),
                "Astronomical information:".to_string(),
                format!("  Dawn: {}", astro.dawn),
                format!("  Noon: {}", astro.noon),
                format!("  Dusk: {}", astro.dusk),
            ]
            .join("\n")
        }
        OutputFormat::Default => {
            let day = if report.date == today { "Today's".to_string() } else { format!("{}'s", date_str) };
            format!(
                "{} sunlight in {}: {} hours ({} to {})",
                day, report.location.name, hours, report.sunlight.sunrise_time, report.sunlight.sunset_time
            )
        }
    };
    Ok(out)
}

/// Shortest round-trip rendering that always keeps a fractional part
/// (`9.84`, `24.0`, `-122.0839`).
pub fn decimal(x: f64) -> String {
    let s = x.to_string();
    if x.is_finite() && !s.contains('.') {
        format!("{}.0", s)
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Astronomical, ReportLocation, Sunlight};

    fn sample(duration_hours: f64) -> DaylightReport {
        DaylightReport {
            date: NaiveDate::from_ymd_opt(2025, 6, 21).unwrap(),
            location: ReportLocation {
                name: "Tokyo".into(),
                latitude: 35.6762,
                longitude: 139.6503,
                timezone: "Asia/Tokyo".into(),
            },
            sunlight: Sunlight {
                sunrise: "2025-06-21T04:25:31+09:00".into(),
                sunset: "2025-06-21T19:00:22+09:00".into(),
                sunrise_time: "04:25 AM".into(),
                sunset_time: "07:00 PM".into(),
                duration_hours,
            },
            astronomical: Astronomical {
                dawn: "2025-06-21T03:54:40+09:00".into(),
                dusk: "2025-06-21T19:31:13+09:00".into(),
                noon: "2025-06-21T11:42:57+09:00".into(),
            },
        }
    }

    fn other_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_decimal() {
        assert_eq!(decimal(9.84), "9.84");
        assert_eq!(decimal(24.0), "24.0");
        assert_eq!(decimal(0.0), "0.0");
        assert_eq!(decimal(14.5), "14.5");
        assert_eq!(decimal(-122.0839), "-122.0839");
    }

    #[test]
    fn test_brief() {
        for hours in [14.58, 24.0, 0.0, 9.8] {
            let out = format_report(&sample(hours), OutputFormat::Brief, other_day()).unwrap();
            let (int, frac) = out.split_once('.').expect("decimal point");
            assert!(!int.is_empty() && int.chars().all(|c| c.is_ascii_digit()), "{out}");
            assert!(!frac.is_empty() && frac.chars().all(|c| c.is_ascii_digit()), "{out}");
        }
    }

    #[test]
    fn test_default_other_day() {
        let out = format_report(&sample(14.58), OutputFormat::Default, other_day()).unwrap();
        assert_eq!(
            out,
            "Saturday, June 21, 2025's sunlight in Tokyo: 14.58 hours (04:25 AM to 07:00 PM)"
        );
    }

    #[test]
    fn test_default_today() {
        let report = sample(14.58);
        let out = format_report(&report, OutputFormat::Default, report.date).unwrap();
        assert_eq!(out, "Today's sunlight in Tokyo: 14.58 hours (04:25 AM to 07:00 PM)");
    }

    #[test]
    fn test_verbose() {
        let out = format_report(&sample(14.58), OutputFormat::Verbose, other_day()).unwrap();
        assert!(out.starts_with("Sunlight information for Saturday, June 21, 2025 at Tokyo:"));
        assert!(out.contains("  Sunrise: 04:25 AM"));
        assert!(out.contains("  Sunset:  07:00 PM"));
        assert!(out.contains("  Daylight duration: 14.58 hours"));
        assert!(out.contains("  Lat/Lon:  35.6762, 139.6503"));
        assert!(out.contains("  Timezone: Asia/Tokyo"));
        assert!(out.contains("\n\nAstronomical information:\n"));
        assert!(out.contains("  Dawn: 2025-06-21T03:54:40+09:00"));
        assert!(out.contains("  Noon: 2025-06-21T11:42:57+09:00"));
        assert!(out.contains("  Dusk: 2025-06-21T19:31:13+09:00"));
    }

    #[test]
    fn test_json_key_set() {
        let out = format_report(&sample(14.58), OutputFormat::Json, other_day()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();

        let keys = |v: &serde_json::Value| {
            let mut k: Vec<String> = v.as_object().unwrap().keys().cloned().collect();
            k.sort();
            k
        };
        assert_eq!(keys(&v), ["astronomical", "date", "location", "sunlight"]);
        assert_eq!(keys(&v["location"]), ["latitude", "longitude", "name", "timezone"]);
        assert_eq!(
            keys(&v["sunlight"]),
            ["duration_hours", "sunrise", "sunrise_time", "sunset", "sunset_time"]
        );
        assert_eq!(keys(&v["astronomical"]), ["dawn", "dusk", "noon"]);
        assert_eq!(v["date"], "2025-06-21");
        assert_eq!(v["sunlight"]["duration_hours"].as_f64(), Some(14.58));
        assert!(out.contains("\n  \"date\""), "two-space indentation");
    }
}
