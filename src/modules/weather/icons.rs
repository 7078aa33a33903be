//! Weather status icons, keyed by OpenWeather icon code.
//! See https://openweathermap.org/weather-conditions#How-to-get-icon-URL

use std::collections::HashMap;

const UNKNOWN: &str = "\u{1f937}";

// "d" codes are daytime, "n" codes night time
const ICONS: &[(&str, &str)] = &[
    ("01d", "\u{2600}"),
    ("01n", "\u{1f31a}"),
    ("02d", "\u{1f324}"),
    ("02n", "\u{1f31a}"),
    ("03d", "\u{2601}"),
    ("03n", "\u{1f31a}"),
    ("04d", "\u{2601}"),
    ("04n", "\u{1f31a}"),
    ("09d", "\u{1f326}"),
    ("09n", "\u{1f31a}"),
    ("10d", "\u{1f326}"),
    ("10n", "\u{1f31a}"),
    ("11d", "\u{26c8}"),
    ("11n", "\u{26c8}"),
    ("13d", "\u{2744}"),
    ("13n", "\u{2744}"),
    ("50d", "\u{1f32b}"),
    ("50n", "\u{1f32b}"),
];

lazy_static! {
    static ref STATUS_ICONS: HashMap<&'static str, &'static str> = ICONS.iter().cloned().collect();
}

/// The icon for a weather status code, or a shrug for codes we do not know.
pub fn status_icon(code: &str) -> &'static str {
    STATUS_ICONS.get(code).copied().unwrap_or(UNKNOWN)
}

/// Precipitation icon: an umbrella with rain drops when it is raining.
pub fn precipitation_icon(raining: bool) -> &'static str {
    if raining { "\u{2614}" } else { "\u{2602}" }
}
