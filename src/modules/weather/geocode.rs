//! Resolve what a user typed into a named place with coordinates.
//!
//! Free text goes to Google Maps, falling back to OpenWeather's direct geocoding. Postcodes are
//! looked up in the local GeoNames dataset first and OpenWeather's zip endpoint second, then
//! reverse geocoded for a display name, as are raw coordinates.

use std::sync::Arc;

use serde::Deserialize;

use crate::error::LookupError;
use crate::http;

use super::cache::ResponseCache;
use super::model::ResolvedLocation;
use super::postal::PostalDataset;
use super::Endpoints;

const GOOGLE: &str = "Google Maps";
const OPENWEATHER_GEO: &str = "OpenWeather Geocoding";

lazy_static! {
    static ref COORDINATES_RE: regex::Regex =
        regex::Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*(?:,\s*|\s+)(-?\d+(?:\.\d+)?)\s*$").unwrap();
    static ref POSTCODE_RE: regex::Regex =
        regex::Regex::new(r"^\s*([A-Za-z0-9]+(?:[ -][A-Za-z0-9]+)?)\s*(?:,\s*|\s+)([A-Za-z]{2})\s*$").unwrap();
    static ref BARE_POSTCODE_RE: regex::Regex =
        regex::Regex::new(r"^\s*[A-Za-z0-9]{3,10}\s*$").unwrap();
}

/// Reject locations whose coordinates a provider got wrong.
pub fn validate(location: ResolvedLocation) -> Result<ResolvedLocation, LookupError> {
    if !location.has_valid_coordinates() {
        return Err(LookupError::upstream(
            "Geocoding",
            format!("coordinates out of range: {}, {}", location.latitude, location.longitude)));
    }
    Ok(location)
}

/// A location query, classified by its shape.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Coordinates { latitude: f64, longitude: f64 },
    Postal { postcode: String, country: String },
    Address(String),
}

fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

impl LocationQuery {
    /// Only queries containing digits can be coordinates or postcodes; everything else is an
    /// address.
    pub fn classify(input: &str) -> Result<LocationQuery, LookupError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(LookupError::MalformedInput("Please specify a location.".to_string()));
        }
        if !has_digit(input) {
            return Ok(LocationQuery::Address(input.to_string()));
        }

        if let Some(captures) = COORDINATES_RE.captures(input) {
            let latitude: f64 = captures[1].parse().unwrap_or(f64::NAN);
            let longitude: f64 = captures[2].parse().unwrap_or(f64::NAN);
            if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
                return Err(LookupError::MalformedInput(format!(
                    "'{}' is not a valid latitude, longitude pair", input)));
            }
            return Ok(LocationQuery::Coordinates { latitude, longitude });
        }

        if let Some(captures) = POSTCODE_RE.captures(input) {
            let postcode = &captures[1];
            // "SW1A 1AA" is a postcode, "Dublin 2" is a place
            let first = postcode.split(|c| c == ' ' || c == '-').next().unwrap_or("");
            if has_digit(first) && (3..=10).contains(&postcode.len()) {
                return Ok(LocationQuery::Postal {
                    postcode: postcode.to_uppercase(),
                    country: captures[2].to_uppercase(),
                });
            }
        }

        if BARE_POSTCODE_RE.is_match(input) {
            return Err(LookupError::MalformedInput(format!(
                "Please add a two-letter country code to the postcode, e.g. '{}, AU'", input)));
        }

        Ok(LocationQuery::Address(input.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    status: String,
    #[serde(default)]
    results: Vec<GoogleResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleResult {
    #[serde(default)]
    address_components: Vec<AddressComponent>,
    formatted_address: Option<String>,
    geometry: GoogleGeometry,
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleGeometry {
    location: GoogleLatLng,
}

#[derive(Debug, Deserialize)]
struct GoogleLatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressComponent {
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherPlace {
    name: Option<String>,
    lat: f64,
    lon: f64,
    state: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherZip {
    zip: Option<String>,
    name: Option<String>,
    lat: f64,
    lon: f64,
    country: Option<String>,
}

/// Join the non-empty parts with ", ".
fn join_parts(parts: &[Option<&str>]) -> Option<String> {
    let parts: Vec<&str> = parts
        .iter()
        .filter_map(|part| *part)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Pick city, region and country out of Google's address components and join whichever are
/// present. Also returns the postcode, if there is one.
pub fn address_details(components: &[AddressComponent]) -> (Option<String>, Option<String>) {
    let find = |kind: &str| {
        components
            .iter()
            .find(|component| component.types.iter().any(|t| t == kind))
            .map(|component| component.short_name.as_str())
    };

    let city = find("locality").or_else(|| find("postal_town"));
    let name = join_parts(&[city, find("administrative_area_level_1"), find("country")]);
    (name, find("postal_code").map(str::to_string))
}

pub struct Geocoder {
    client: reqwest::Client,
    endpoints: Endpoints,
    google_key: Option<String>,
    openweather_key: Option<String>,
    postal: Option<PostalDataset>,
    cache: Arc<ResponseCache>,
}

impl Geocoder {
    pub fn new(
        client: reqwest::Client,
        endpoints: Endpoints,
        google_key: Option<String>,
        openweather_key: Option<String>,
        postal: Option<PostalDataset>,
        cache: Arc<ResponseCache>,
    ) -> Geocoder {
        Geocoder { client, endpoints, google_key, openweather_key, postal, cache }
    }

    pub async fn resolve(&self, query: &LocationQuery) -> Result<ResolvedLocation, LookupError> {
        let location = match query {
            LocationQuery::Coordinates { latitude, longitude } =>
                self.reverse(*latitude, *longitude).await?,
            LocationQuery::Postal { postcode, country } =>
                self.resolve_postal(postcode, country).await?,
            LocationQuery::Address(address) =>
                self.resolve_address(address).await?,
        };

        let location = validate(location)?;
        debug!("Resolved {:?} to {:?}", query, location);
        Ok(location)
    }

    async fn resolve_address(&self, address: &str) -> Result<ResolvedLocation, LookupError> {
        let primary = match self.google(address).await {
            Ok(location) => return Ok(location),
            Err(err) => err,
        };
        info!("{} failed for '{}' ({}), trying {}", GOOGLE, address, primary, OPENWEATHER_GEO);

        match self.direct(address).await {
            Ok(location) =>
                Ok(location),
            Err(LookupError::Configuration(_)) =>
                Err(primary),
            Err(secondary) =>
                Err(secondary),
        }
    }

    async fn resolve_postal(&self, postcode: &str, country: &str) -> Result<ResolvedLocation, LookupError> {
        let local = self.postal.as_ref().and_then(|dataset| dataset.lookup(postcode, country));
        let (latitude, longitude, fallback_name) = match local {
            Some(place) => {
                debug!("Found {} {} in the local postcode dataset", postcode, country);
                let name = join_parts(&[
                    Some(place.place_name.as_str()),
                    place.region.as_deref(),
                    Some(country),
                ]);
                (place.latitude, place.longitude, name)
            },
            None => {
                if self.postal.is_some() {
                    warn!("Falling back to {} for '{}, {}'", OPENWEATHER_GEO, postcode, country);
                }
                let zip = self.zip(postcode, country).await?;
                let name = join_parts(&[zip.name.as_deref(), zip.country.as_deref()]);
                (zip.lat, zip.lon, name)
            },
        };

        let display_name = match self.reverse(latitude, longitude).await {
            Ok(location) =>
                location.display_name,
            Err(err) =>
                match fallback_name {
                    Some(name) => {
                        warn!("Reverse geocoding {}, {} failed ({}), using '{}'", latitude, longitude, err, name);
                        name
                    },
                    None =>
                        return Err(err),
                },
        };

        Ok(ResolvedLocation {
            display_name,
            latitude,
            longitude,
            postal_code: Some(postcode.to_string()),
            provider_id: None,
        })
    }

    /// GET through the response cache. Callers remember the body once they have accepted it.
    async fn get_cached(&self, url: &reqwest::Url, provider: &'static str) -> Result<String, LookupError> {
        if let Some(body) = self.cache.get(url.as_str()) {
            debug!("{}: cache hit for {}", provider, url.path());
            return Ok(body);
        }
        http::get_text(&self.client, url, provider).await
    }

    fn openweather_key(&self) -> Result<&str, LookupError> {
        self.openweather_key
            .as_deref()
            .ok_or_else(|| LookupError::missing_key("OpenWeather", "openweather_api_key"))
    }

    /// Forward geocode with Google Maps, taking the first result.
    pub async fn google(&self, address: &str) -> Result<ResolvedLocation, LookupError> {
        let key = self.google_key
            .as_deref()
            .ok_or_else(|| LookupError::missing_key("Google Maps", "googlemaps_api_key"))?;
        let url = http::url_with_params(&self.endpoints.google_geocode, &[
            ("address", address.to_string()),
            ("key", key.to_string()),
        ])?;

        let body = self.get_cached(&url, GOOGLE).await?;
        let response: GoogleResponse = http::decode(&body, GOOGLE)?;
        if response.status != "OK" {
            if let Some(ref message) = response.error_message {
                warn!("{} returned {}: {}", GOOGLE, response.status, message);
            }
            return Err(LookupError::NotFound(format!(
                "{} from Google Maps for location {}", response.status, address)));
        }
        let result = response.results
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NotFound(format!("Google Maps found nothing for {}", address)))?;

        let (name, postal_code) = address_details(&result.address_components);
        let display_name = name
            .or(result.formatted_address)
            .ok_or_else(|| LookupError::NotFound(format!("Google Maps has no name for {}", address)))?;

        self.cache.insert(url.as_str(), &body);
        Ok(ResolvedLocation {
            display_name,
            latitude: result.geometry.location.lat,
            longitude: result.geometry.location.lng,
            postal_code,
            provider_id: result.place_id,
        })
    }

    async fn places(&self, url: &reqwest::Url, what: &str) -> Result<ResolvedLocation, LookupError> {
        let body = self.get_cached(url, OPENWEATHER_GEO).await?;
        let places: Vec<OpenWeatherPlace> = http::decode(&body, OPENWEATHER_GEO)?;
        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NotFound(format!("No location data found for {}", what)))?;

        let display_name = join_parts(&[place.name.as_deref(), place.state.as_deref(), place.country.as_deref()])
            .ok_or_else(|| LookupError::NotFound(format!("No location name found for {}", what)))?;

        self.cache.insert(url.as_str(), &body);
        Ok(ResolvedLocation {
            display_name,
            latitude: place.lat,
            longitude: place.lon,
            postal_code: None,
            provider_id: None,
        })
    }

    /// Forward geocode with OpenWeather, taking the first result.
    async fn direct(&self, address: &str) -> Result<ResolvedLocation, LookupError> {
        let key = self.openweather_key()?;
        let url = http::url_with_params(&format!("{}/direct", self.endpoints.openweather_geo), &[
            ("q", address.to_string()),
            ("limit", "1".to_string()),
            ("appid", key.to_string()),
        ])?;
        self.places(&url, address).await
    }

    /// The nearest named place to the given coordinates.
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> Result<ResolvedLocation, LookupError> {
        let key = self.openweather_key()?;
        let url = http::url_with_params(&format!("{}/reverse", self.endpoints.openweather_geo), &[
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("limit", "1".to_string()),
            ("appid", key.to_string()),
        ])?;
        let place = self.places(&url, &format!("coordinates ({}, {})", latitude, longitude)).await?;

        // keep the coordinates the user asked about, not those of the nearest place
        Ok(ResolvedLocation { latitude, longitude, ..place })
    }

    async fn zip(&self, postcode: &str, country: &str) -> Result<OpenWeatherZip, LookupError> {
        let key = self.openweather_key()?;
        let url = http::url_with_params(&format!("{}/zip", self.endpoints.openweather_geo), &[
            ("zip", format!("{},{}", postcode, country)),
            ("appid", key.to_string()),
        ])?;

        let body = self.get_cached(&url, OPENWEATHER_GEO).await
            .map_err(|err| match err {
                LookupError::NotFound(_) =>
                    LookupError::NotFound(format!("Unknown postcode '{}, {}'", postcode, country)),
                err =>
                    err,
            })?;
        let zip: OpenWeatherZip = http::decode(&body, OPENWEATHER_GEO)?;
        debug!("{} resolved {:?} to {}, {}", OPENWEATHER_GEO, zip.zip, zip.lat, zip.lon);

        self.cache.insert(url.as_str(), &body);
        Ok(zip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn component(short_name: &str, kind: &str) -> AddressComponent {
        AddressComponent {
            short_name: short_name.to_string(),
            types: vec![kind.to_string(), "political".to_string()],
        }
    }

    fn geocoder(server: &MockServer, google: Option<&str>, openweather: Option<&str>) -> Geocoder {
        Geocoder::new(
            http::client(http::TIMEOUT),
            Endpoints::with_base(&server.uri()),
            google.map(str::to_string),
            openweather.map(str::to_string),
            None,
            Arc::new(ResponseCache::default()),
        )
    }

    #[test]
    fn classify() {
        assert_eq!(
            LocationQuery::classify("Ballarat AU").unwrap(),
            LocationQuery::Address("Ballarat AU".to_string()));
        assert_eq!(
            LocationQuery::classify("3350, AU").unwrap(),
            LocationQuery::Postal { postcode: "3350".to_string(), country: "AU".to_string() });
        assert_eq!(
            LocationQuery::classify("3350 au").unwrap(),
            LocationQuery::Postal { postcode: "3350".to_string(), country: "AU".to_string() });
        assert_eq!(
            LocationQuery::classify("SW1A 1AA, GB").unwrap(),
            LocationQuery::Postal { postcode: "SW1A 1AA".to_string(), country: "GB".to_string() });
        assert_eq!(
            LocationQuery::classify("38.9071923 -77.036870").unwrap(),
            LocationQuery::Coordinates { latitude: 38.9071923, longitude: -77.03687 });
        assert_eq!(
            LocationQuery::classify("-37.56, 143.85").unwrap(),
            LocationQuery::Coordinates { latitude: -37.56, longitude: 143.85 });
        assert_eq!(
            LocationQuery::classify("10 Downing Street, London").unwrap(),
            LocationQuery::Address("10 Downing Street, London".to_string()));
    }

    #[test]
    fn classify_place_names_with_numbers() {
        assert_eq!(
            LocationQuery::classify("Dublin 2 IE").unwrap(),
            LocationQuery::Address("Dublin 2 IE".to_string()));
        assert_eq!(
            LocationQuery::classify("Paris 15, FR").unwrap(),
            LocationQuery::Address("Paris 15, FR".to_string()));
        assert_eq!(
            LocationQuery::classify("D02 X285, IE").unwrap(),
            LocationQuery::Postal { postcode: "D02 X285".to_string(), country: "IE".to_string() });
    }

    #[test]
    fn classify_rejects_malformed_input() {
        assert!(matches!(LocationQuery::classify("3350"), Err(LookupError::MalformedInput(_))));
        assert!(matches!(LocationQuery::classify("95, 10"), Err(LookupError::MalformedInput(_))));
        assert!(matches!(LocationQuery::classify("  "), Err(LookupError::MalformedInput(_))));
    }

    #[test]
    fn address_details_full() {
        let components = vec![
            component("Dublin", "locality"),
            component("D", "administrative_area_level_1"),
            component("IE", "country"),
            component("12345", "postal_code"),
        ];
        assert_eq!(
            address_details(&components),
            (Some("Dublin, D, IE".to_string()), Some("12345".to_string())));
    }

    #[test]
    fn address_details_without_region_or_city() {
        let components = vec![component("Ballarat", "locality"), component("AU", "country")];
        assert_eq!(address_details(&components), (Some("Ballarat, AU".to_string()), None));

        let components = vec![component("VIC", "administrative_area_level_1"), component("AU", "country")];
        assert_eq!(address_details(&components).0.as_deref(), Some("VIC, AU"));

        assert_eq!(address_details(&[]), (None, None));
    }

    #[tokio::test]
    async fn test_google() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .and(query_param("address", "Dublin"))
            .and(query_param("key", "google-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "results": [{
                    "geometry": {"location": {"lat": 53.3478, "lng": -6.2597}},
                    "place_id": "ChIJL6wn6oAOZ0gRoHExl6nHAAU",
                    "address_components": [
                        {"types": ["locality"], "short_name": "Dublin"},
                        {"types": ["administrative_area_level_1"], "short_name": "D"},
                        {"types": ["country"], "short_name": "IE"},
                        {"types": ["postal_code"], "short_name": "12345"}
                    ]
                }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let geocoder = geocoder(&mock_server, Some("google-key"), None);
        let query = LocationQuery::classify("Dublin").unwrap();
        let location = geocoder.resolve(&query).await.unwrap();
        assert_eq!(location, ResolvedLocation {
            display_name: "Dublin, D, IE".to_string(),
            latitude: 53.3478,
            longitude: -6.2597,
            postal_code: Some("12345".to_string()),
            provider_id: Some("ChIJL6wn6oAOZ0gRoHExl6nHAAU".to_string()),
        });

        // the second lookup is answered from the cache
        let again = geocoder.resolve(&query).await.unwrap();
        assert_eq!(again, location);
    }

    #[tokio::test]
    async fn test_google_locality_and_country_only() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "results": [{
                    "geometry": {"location": {"lat": -37.5622, "lng": 143.8503}},
                    "address_components": [
                        {"types": ["locality", "political"], "short_name": "Ballarat"},
                        {"types": ["country", "political"], "short_name": "AU"}
                    ]
                }]
            })))
            .mount(&mock_server)
            .await;

        let geocoder = geocoder(&mock_server, Some("google-key"), None);
        let location = geocoder.resolve(&LocationQuery::Address("ballarat".to_string())).await.unwrap();
        assert_eq!(location.display_name, "Ballarat, AU");
        assert_eq!(location.provider_id, None);
    }

    #[tokio::test]
    async fn test_google_zero_results_falls_back_to_openweather() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ZERO_RESULTS",
                "results": []
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", "Ballarat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"name": "Ballarat", "lat": -37.5623, "lon": 143.8605, "country": "AU", "state": "Victoria"}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let geocoder = geocoder(&mock_server, Some("google-key"), Some("ow-key"));
        let location = geocoder.resolve(&LocationQuery::Address("Ballarat".to_string())).await.unwrap();
        assert_eq!(location.display_name, "Ballarat, Victoria, AU");
    }

    #[tokio::test]
    async fn test_missing_keys() {
        let mock_server = MockServer::start().await;
        let geocoder = geocoder(&mock_server, None, None);

        match geocoder.resolve(&LocationQuery::Address("Ballarat".to_string())).await {
            Err(LookupError::Configuration(message)) => assert!(message.contains("googlemaps_api_key")),
            other => panic!("expected a configuration error, got {:?}", other),
        }
        match geocoder.reverse(-37.56, 143.85).await {
            Err(LookupError::Configuration(message)) => assert!(message.contains("openweather_api_key")),
            other => panic!("expected a configuration error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_not_found_when_both_providers_are_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ZERO_RESULTS",
                "results": []
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&mock_server)
            .await;

        let geocoder = geocoder(&mock_server, Some("google-key"), Some("ow-key"));
        let result = geocoder.resolve(&LocationQuery::Address("Atlantis".to_string())).await;
        assert!(matches!(result, Err(LookupError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_postcode_falls_back_to_zip_and_reverse() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/zip"))
            .and(query_param("zip", "3350,AU"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "zip": "3350", "name": "Ballarat", "lat": -37.5622, "lon": 143.8503, "country": "AU"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/reverse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"name": "Ballarat Central", "lat": -37.56, "lon": 143.85, "country": "AU", "state": "Victoria"}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let geocoder = geocoder(&mock_server, None, Some("ow-key"));
        let location = geocoder.resolve(&LocationQuery::classify("3350, AU").unwrap()).await.unwrap();
        assert_eq!(location.display_name, "Ballarat Central, Victoria, AU");
        assert_eq!(location.postal_code.as_deref(), Some("3350"));
        assert!((location.latitude - -37.5622).abs() < 1e-6);
        assert!((location.longitude - 143.8503).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_postcode_from_local_dataset() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/zip"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/reverse"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let dataset = PostalDataset::parse("AU\t3350\tBallarat\tVictoria\tVIC\t\t\t\t\t-37.5\t143.8\t4\n");
        let geocoder = Geocoder::new(
            http::client(http::TIMEOUT),
            Endpoints::with_base(&mock_server.uri()),
            None,
            Some("ow-key".to_string()),
            Some(dataset),
            Arc::new(ResponseCache::default()),
        );

        // reverse geocoding is down, so the dataset's own place name is used
        let location = geocoder.resolve(&LocationQuery::classify("3350, AU").unwrap()).await.unwrap();
        assert_eq!(location.display_name, "Ballarat, Victoria, AU");
        assert_eq!(location.latitude, -37.5);
    }

    #[tokio::test]
    async fn test_unknown_postcode() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/zip"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "cod": "404", "message": "not found"
            })))
            .mount(&mock_server)
            .await;

        let geocoder = geocoder(&mock_server, None, Some("ow-key"));
        match geocoder.resolve(&LocationQuery::classify("0000, AU").unwrap()).await {
            Err(LookupError::NotFound(message)) => assert_eq!(message, "Unknown postcode '0000, AU'"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reverse_keeps_requested_coordinates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/reverse"))
            .and(query_param("lat", "38.9071923"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"name": "Washington", "lat": 38.8950368, "lon": -77.0365427, "country": "US", "state": "District of Columbia"}
            ])))
            .mount(&mock_server)
            .await;

        let geocoder = geocoder(&mock_server, None, Some("ow-key"));
        let location = geocoder.resolve(&LocationQuery::classify("38.9071923, -77.036870").unwrap()).await.unwrap();
        assert_eq!(location.display_name, "Washington, District of Columbia, US");
        assert_eq!(location.latitude, 38.9071923);
        assert_eq!(location.longitude, -77.03687);
    }

    #[tokio::test]
    async fn test_out_of_range_coordinates_from_provider() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "results": [{
                    "geometry": {"location": {"lat": 123.0, "lng": 0.0}},
                    "formatted_address": "Nowhere"
                }]
            })))
            .mount(&mock_server)
            .await;

        let geocoder = geocoder(&mock_server, Some("google-key"), None);
        let result = geocoder.resolve(&LocationQuery::Address("Nowhere".to_string())).await;
        assert!(matches!(result, Err(LookupError::Upstream { .. })));
    }
}
