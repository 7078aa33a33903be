//! Decimal degrees to degrees, minutes and seconds.

use std::fmt;

/// One coordinate split into degrees, minutes and seconds; the sign lives in the hemisphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
    pub hemisphere: char,
}

impl Dms {
    fn from_decimal(value: f64, positive: char, negative: char) -> Dms {
        let hemisphere = if value < 0.0 { negative } else { positive };
        let magnitude = value.abs();

        let mut degrees = magnitude.trunc() as u32;
        let fractional_minutes = magnitude.fract() * 60.0;
        let mut minutes = fractional_minutes.trunc() as u32;
        let mut seconds = (fractional_minutes.fract() * 60.0 * 100.0).round() / 100.0;

        if seconds >= 60.0 {
            seconds -= 60.0;
            minutes += 1;
        }
        if minutes >= 60 {
            minutes -= 60;
            degrees += 1;
        }

        Dms { degrees, minutes, seconds, hemisphere }
    }

    pub fn longitude(value: f64) -> Dms {
        Dms::from_decimal(value, 'E', 'W')
    }

    pub fn latitude(value: f64) -> Dms {
        Dms::from_decimal(value, 'N', 'S')
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}°{}' {:.2}\" {}", self.degrees, self.minutes, self.seconds, self.hemisphere)
    }
}

/// Format a coordinate pair for display, longitude first.
pub fn to_dms(longitude: f64, latitude: f64) -> (String, String) {
    (Dms::longitude(longitude).to_string(), Dms::latitude(latitude).to_string())
}
