//! Current conditions and daily forecasts from the OpenWeather One Call API (3.0).

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use crate::error::LookupError;
use crate::http;

use super::format::FORECAST_DAYS;
use super::model::{CurrentConditions, ForecastDay, WeatherPayload};

const PROVIDER: &str = "OpenWeather";

// metres per second to kilometres per hour
const MPS_TO_KMH: f64 = 3.6;

#[derive(Debug, Deserialize)]
struct OneCall {
    lat: f64,
    lon: f64,
    #[serde(default)]
    timezone_offset: i32,
    current: OneCallCurrent,
    #[serde(default)]
    daily: Vec<OneCallDaily>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OneCallCurrent {
    temp: f64,
    feels_like: f64,
    dew_point: f64,
    humidity: f64,
    pressure: f64,
    clouds: f64,
    wind_speed: f64,
    wind_gust: Option<f64>,
    wind_deg: f64,
    uvi: f64,
    visibility: Option<f64>,
    rain: Option<OneCallRain>,
    weather: Vec<OneCallCondition>,
}

#[derive(Debug, Default, Deserialize)]
struct OneCallRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OneCallCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OneCallDaily {
    dt: i64,
    temp: OneCallDailyTemp,
    #[serde(default)]
    weather: Vec<OneCallCondition>,
}

#[derive(Debug, Deserialize)]
struct OneCallDailyTemp {
    min: f64,
    max: f64,
}

/// The name of the weekday of a unix timestamp at the given UTC offset.
pub fn weekday(timestamp: i64, utc_offset_secs: i32) -> String {
    let offset = FixedOffset::east_opt(utc_offset_secs)
        .or_else(|| FixedOffset::east_opt(0));
    match (DateTime::from_timestamp(timestamp, 0), offset) {
        (Some(utc), Some(offset)) =>
            utc.with_timezone(&offset).format("%A").to_string(),
        _ =>
            "Unknown day".to_string(),
    }
}

impl From<OneCallCurrent> for CurrentConditions {
    fn from(current: OneCallCurrent) -> CurrentConditions {
        let condition = current.weather.into_iter().next().unwrap_or_default();
        CurrentConditions {
            description: condition.description,
            icon_code: condition.icon,
            temperature_c: current.temp,
            feels_like_c: current.feels_like,
            dew_point_c: current.dew_point,
            humidity_pct: current.humidity,
            pressure_hpa: current.pressure,
            cloud_pct: current.clouds,
            wind_speed_kmh: current.wind_speed * MPS_TO_KMH,
            wind_gust_kmh: current.wind_gust.unwrap_or(0.0) * MPS_TO_KMH,
            wind_dir_deg: current.wind_deg,
            uv_index: current.uvi,
            precipitation_mm: current.rain.and_then(|rain| rain.one_hour),
            visibility_km: current.visibility.unwrap_or(0.0) / 1000.0,
        }
    }
}

impl From<OneCall> for WeatherPayload {
    fn from(response: OneCall) -> WeatherPayload {
        let offset = response.timezone_offset;
        let daily = response.daily
            .into_iter()
            .take(FORECAST_DAYS)
            .map(|day| ForecastDay {
                day_name: weekday(day.dt, offset),
                description: day.weather
                    .into_iter()
                    .next()
                    .map(|condition| condition.description)
                    .unwrap_or_default(),
                min_temp_c: day.temp.min,
                max_temp_c: day.temp.max,
            })
            .collect();

        WeatherPayload {
            latitude: response.lat,
            longitude: response.lon,
            utc_offset_secs: offset,
            current: response.current.into(),
            daily,
        }
    }
}

pub struct WeatherFetcher {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl WeatherFetcher {
    pub fn new(client: reqwest::Client, endpoint: String, api_key: Option<String>) -> WeatherFetcher {
        WeatherFetcher { client, endpoint, api_key }
    }

    /// Fetch current conditions, and the daily forecast if `want_forecast` is set.
    pub async fn fetch(&self, latitude: f64, longitude: f64, want_forecast: bool) -> Result<WeatherPayload, LookupError> {
        let key = self.api_key
            .as_deref()
            .ok_or_else(|| LookupError::missing_key(PROVIDER, "openweather_api_key"))?;
        let exclude = if want_forecast {
            "minutely,hourly,alerts"
        } else {
            "minutely,hourly,daily,alerts"
        };
        let url = http::url_with_params(&self.endpoint, &[
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("exclude", exclude.to_string()),
            ("units", "metric".to_string()),
            ("appid", key.to_string()),
        ])?;

        let result = match http::get_text(&self.client, &url, PROVIDER).await {
            Ok(body) => http::decode::<OneCall>(&body, PROVIDER),
            // any failure of the weather call itself is an upstream problem
            Err(LookupError::NotFound(_)) => Err(LookupError::upstream(PROVIDER, reqwest::StatusCode::NOT_FOUND)),
            Err(err) => Err(err),
        };

        match result {
            Ok(response) =>
                Ok(response.into()),
            Err(err) => {
                warn!("{} request for ({}, {}) failed: {}", PROVIDER, latitude, longitude, err);
                Err(err)
            },
        }
    }
}
