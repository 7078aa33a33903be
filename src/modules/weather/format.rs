//! Turn a weather payload into a single chat line.

use crate::util::format::bold;

use super::colour::{colour_temperature, colour_uv};
use super::dms::to_dms;
use super::icons::{precipitation_icon, status_icon};
use super::model::{ForecastDay, WeatherPayload};

/// Forecasts show at most this many days.
pub const FORECAST_DAYS: usize = 4;

const DEGREE_SIGN: char = '\u{b0}';

// 16-point compass, clockwise from north; the cardinal and intercardinal points get an arrow
const COMPASS: [(&str, &str); 16] = [
    ("N", "\u{2191} "),
    ("NNE", ""),
    ("NE", "\u{2197} "),
    ("ENE", ""),
    ("E", "\u{2192} "),
    ("ESE", ""),
    ("SE", "\u{2198} "),
    ("SSE", ""),
    ("S", "\u{2193} "),
    ("SSW", ""),
    ("SW", "\u{2199} "),
    ("WSW", ""),
    ("W", "\u{2190} "),
    ("WNW", ""),
    ("NW", "\u{2196} "),
    ("NNW", ""),
];

fn compass_index(degrees: f64) -> usize {
    ((degrees / 22.5).round() as i64).rem_euclid(16) as usize
}

/// The compass point a wind bearing (in degrees) is closest to.
pub fn compass_point(degrees: f64) -> &'static str {
    COMPASS[compass_index(degrees)].0
}

fn wind_direction(degrees: f64) -> String {
    let arrow = COMPASS[compass_index(degrees)].1;
    format!("{}{}", arrow, compass_point(degrees))
}

/// Format a UTC offset in seconds as hours, e.g. `+10`, `-3` or `+5.5`.
fn utc_offset(seconds: i32) -> String {
    let hours = f64::from(seconds) / 3600.0;
    if hours < 0.0 {
        format!("{}", hours)
    } else {
        format!("+{}", hours)
    }
}

fn rounded(value: f64) -> f64 {
    value.round() + 0.0
}

/// The current conditions at `display_name`, e.g.
/// `Ballarat, VIC, AU :: UTC +10 :: Lat 37°33' 43.92" S Lon 143°51' 1.08" E :: ☀ clear sky | ...`
pub fn format_current(display_name: &str, payload: &WeatherPayload) -> String {
    let current = &payload.current;
    let (lon, lat) = to_dms(payload.longitude, payload.latitude);
    let precipitation = current.precipitation_mm.unwrap_or(0.0);

    let segments = vec![
        format!("{} :: UTC {} :: Lat {} Lon {} :: {} {}",
            bold(display_name),
            utc_offset(payload.utc_offset_secs),
            lat,
            lon,
            status_icon(&current.icon_code),
            current.description),
        format!("Current {}", colour_temperature(rounded(current.temperature_c))),
        format!("Feels like {}", colour_temperature(rounded(current.feels_like_c))),
        format!("\u{1f4a6} Humidity {}%", rounded(current.humidity_pct)),
        format!("\u{1f343} Wind {}Km/H {}", rounded(current.wind_speed_kmh), wind_direction(current.wind_dir_deg)),
        format!("\u{1f4a8} Gust {}Km/H", rounded(current.wind_gust_kmh)),
        format!("\u{1f321} Barometric {}hPa", rounded(current.pressure_hpa)),
        format!("Dew Point {}{}C", rounded(current.dew_point_c), DEGREE_SIGN),
        format!("\u{2601} Cloud cover {}%", rounded(current.cloud_pct)),
        format!("{} Precip {}mm/h", precipitation_icon(current.precipitation_mm.is_some()), precipitation),
        format!("\u{1f441} Visibility {}Km", rounded(current.visibility_km)),
        colour_uv((current.uv_index * 10.0).round() / 10.0),
    ];

    segments.join(" | ")
}

/// The daily forecast at `display_name`, e.g.
/// `Ballarat, VIC, AU :: Monday: light rain MIN 4°C MAX 12°C :: Tuesday: ...`
pub fn format_forecast(display_name: &str, days: &[ForecastDay]) -> String {
    let mut output = bold(display_name);
    if days.is_empty() {
        output.push_str(" :: No forecast available");
    }
    for day in days.iter().take(FORECAST_DAYS) {
        output.push_str(&format!(" :: {}: {} MIN {} MAX {}",
            day.day_name,
            day.description,
            colour_temperature(rounded(day.min_temp_c)),
            colour_temperature(rounded(day.max_temp_c))));
    }
    output
}
