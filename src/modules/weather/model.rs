//! The data the weather pipeline passes between its stages.

/// A location the geocoders resolved a query to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub postal_code: Option<String>,
    pub provider_id: Option<String>,
}

impl ResolvedLocation {
    pub fn has_valid_coordinates(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Current conditions, normalised to metric units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentConditions {
    pub description: String,
    pub icon_code: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub dew_point_c: f64,
    pub humidity_pct: f64,
    pub pressure_hpa: f64,
    pub cloud_pct: f64,
    pub wind_speed_kmh: f64,
    pub wind_gust_kmh: f64,
    pub wind_dir_deg: f64,
    pub uv_index: f64,
    /// Rain in the last hour; `None` when the provider reported none.
    pub precipitation_mm: Option<f64>,
    pub visibility_km: f64,
}

/// One day of a daily forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub day_name: String,
    pub description: String,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
}

/// Everything one weather request returns.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherPayload {
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset_secs: i32,
    pub current: CurrentConditions,
    pub daily: Vec<ForecastDay>,
}
