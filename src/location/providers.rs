//! Location providers: Nominatim geocoding and ipinfo.io IP geolocation.

use super::types::LocationError;
use serde::Deserialize;
use std::time::Duration;

// ─── Configuration ──────────────────────────────────────────────

/// Endpoints and HTTP settings for the lookup services.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub nominatim_url: String,
    pub ipinfo_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            nominatim_url: "https://nominatim.openstreetmap.org/search".into(),
            ipinfo_url: "https://ipinfo.io/json".into(),
            user_agent: "daylight-cli/1.0".into(),
            timeout: Duration::from_secs(5),
        }
    }
}

// ─── Wire types ─────────────────────────────────────────────────

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct NominatimResult {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

impl NominatimResult {
    pub fn coordinates(&self) -> Result<(f64, f64), LocationError> {
        let lat = self
            .lat
            .trim()
            .parse()
            .map_err(|_| LocationError::InvalidResponse(format!("bad latitude '{}'", self.lat)))?;
        let lon = self
            .lon
            .trim()
            .parse()
            .map_err(|_| LocationError::InvalidResponse(format!("bad longitude '{}'", self.lon)))?;
        Ok((lat, lon))
    }

    /// Leading component of the display name ("Tokyo" for "Tokyo, Japan").
    pub fn short_name(&self) -> &str {
        self.display_name.split(',').next().unwrap_or_default()
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct IpInfoResult {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// "lat,lon"
    #[serde(default)]
    pub loc: Option<String>,
}

impl IpInfoResult {
    /// "City, Region", falling back to "City, Country".
    pub fn display_name(&self) -> String {
        let mut name = self.city.clone().unwrap_or_else(|| "Unknown".into());
        match (&self.region, &self.country) {
            (Some(region), _) if !region.is_empty() => {
                name.push_str(", ");
                name.push_str(region);
            }
            (_, Some(country)) => {
                name.push_str(", ");
                name.push_str(country);
            }
            _ => {}
        }
        name
    }

    pub fn coordinates(&self) -> Result<(f64, f64), LocationError> {
        let loc = self
            .loc
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LocationError::InvalidResponse("Could not determine location from IP".into()))?;
        let (lat, lon) = loc
            .split_once(',')
            .ok_or_else(|| LocationError::InvalidResponse(format!("bad loc field '{}'", loc)))?;
        let parse = |s: &str| {
            s.trim()
                .parse::<f64>()
                .map_err(|_| LocationError::InvalidResponse(format!("bad loc field '{}'", loc)))
        };
        Ok((parse(lat)?, parse(lon)?))
    }
}

// ─── Service seam ───────────────────────────────────────────────

/// The external lookups the resolver depends on.
pub trait GeoService {
    /// Free-text place search. Returns at most one result.
    fn search_name(&self, query: &str) -> Result<Vec<NominatimResult>, LocationError>;
    /// Postal code search. Returns at most one result.
    fn search_postal_code(&self, code: &str) -> Result<Vec<NominatimResult>, LocationError>;
    /// Geolocate the caller's public IP address.
    fn lookup_ip(&self) -> Result<IpInfoResult, LocationError>;
}

/// Blocking HTTP implementation over `ureq`.
pub struct HttpGeoService {
    agent: ureq::Agent,
    config: ServiceConfig,
}

impl HttpGeoService {
    pub fn new(config: ServiceConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();
        Self { agent, config }
    }

    fn nominatim(&self, param: &str, value: &str) -> Result<Vec<NominatimResult>, LocationError> {
        log::debug!("GET {} {}={}", self.config.nominatim_url, param, value);
        let response = self
            .agent
            .get(&self.config.nominatim_url)
            .query(param, value)
            .query("format", "json")
            .query("limit", "1")
            .call()
            .map_err(map_ureq_error)?;

        response
            .into_json()
            .map_err(|e| LocationError::InvalidResponse(e.to_string()))
    }
}

impl Default for HttpGeoService {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}

impl GeoService for HttpGeoService {
    fn search_name(&self, query: &str) -> Result<Vec<NominatimResult>, LocationError> {
        self.nominatim("q", query)
    }

    fn search_postal_code(&self, code: &str) -> Result<Vec<NominatimResult>, LocationError> {
        self.nominatim("postalcode", code)
    }

    fn lookup_ip(&self) -> Result<IpInfoResult, LocationError> {
        log::debug!("GET {}", self.config.ipinfo_url);
        let response = self
            .agent
            .get(&self.config.ipinfo_url)
            .call()
            .map_err(map_ureq_error)?;

        response
            .into_json()
            .map_err(|e| LocationError::InvalidResponse(e.to_string()))
    }
}

fn map_ureq_error(err: ureq::Error) -> LocationError {
    match err {
        ureq::Error::Status(code, response) => {
            LocationError::InvalidResponse(format!("HTTP {} from {}", code, response.get_url()))
        }
        ureq::Error::Transport(t) => LocationError::Network(t.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominatim_result_parsing() {
        let body = r#"[{"place_id":1,"lat":"35.6768601","lon":"139.7638947",
            "display_name":"Tokyo, Japan","class":"boundary","type":"administrative"}]"#;
        let results: Vec<NominatimResult> = serde_json::from_str(body).unwrap();
        assert_eq!(results.len(), 1);
        let (lat, lon) = results[0].coordinates().unwrap();
        assert!((lat - 35.6768601).abs() < 1e-9);
        assert!((lon - 139.7638947).abs() < 1e-9);
        assert_eq!(results[0].short_name(), "Tokyo");
    }

    #[test]
    fn test_nominatim_bad_coordinates() {
        let r = NominatimResult { lat: "north".into(), lon: "0".into(), display_name: String::new() };
        assert!(matches!(r.coordinates(), Err(LocationError::InvalidResponse(_))));
        assert_eq!(r.short_name(), "");
    }

    #[test]
    fn test_ipinfo_name_prefers_region() {
        let r: IpInfoResult = serde_json::from_str(
            r#"{"ip":"8.8.8.8","city":"Mountain View","region":"California","country":"US","loc":"37.4056,-122.0775"}"#,
        )
        .unwrap();
        assert_eq!(r.display_name(), "Mountain View, California");
        assert_eq!(r.coordinates().unwrap(), (37.4056, -122.0775));
    }

    #[test]
    fn test_ipinfo_name_falls_back_to_country() {
        let r = IpInfoResult {
            city: Some("Oslo".into()),
            region: Some(String::new()),
            country: Some("NO".into()),
            loc: None,
        };
        assert_eq!(r.display_name(), "Oslo, NO");
    }

    #[test]
    fn test_ipinfo_missing_city() {
        let r = IpInfoResult::default();
        assert_eq!(r.display_name(), "Unknown");
        assert!(r.coordinates().is_err());
    }

    #[test]
    fn test_ipinfo_malformed_loc() {
        let r = IpInfoResult { loc: Some("37.4".into()), ..Default::default() };
        assert!(matches!(r.coordinates(), Err(LocationError::InvalidResponse(_))));
    }

    #[test]
    fn test_default_config() {
        let cfg = ServiceConfig::default();
        assert_eq!(cfg.user_agent, "daylight-cli/1.0");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }
}
