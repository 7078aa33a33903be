//! Colour temperatures and UV indices by looking them up in ordered range tables.
//!
//! Every range is half-open (lower bound inclusive) and the tables are contiguous from the lowest
//! to the highest bound, so each finite value falls into exactly one range.

use crate::util::format::{colour, Colour};

const DEGREE_SIGN: char = '\u{b0}';

struct Range<T> {
    lower: f64,
    upper: f64,
    value: T,
}

impl<T> Range<T> {
    fn contains(&self, x: f64) -> bool {
        self.lower <= x && x < self.upper
    }
}

const TEMPERATURES: &[Range<Colour>] = &[
    Range { lower: f64::NEG_INFINITY, upper: 0.0, value: Colour::Blue },
    Range { lower: 0.0, upper: 1.0, value: Colour::Teal },
    Range { lower: 1.0, upper: 10.0, value: Colour::LightBlue },
    Range { lower: 10.0, upper: 20.0, value: Colour::LightGreen },
    Range { lower: 20.0, upper: 30.0, value: Colour::Yellow },
    Range { lower: 30.0, upper: 40.0, value: Colour::Orange },
    Range { lower: 40.0, upper: f64::INFINITY, value: Colour::Red },
];

/// UV index categories, adapted from the WHO UV index scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvCategory {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
    Unknown,
}

impl UvCategory {
    pub fn label(self) -> &'static str {
        match self {
            UvCategory::Low => "Low",
            UvCategory::Moderate => "Moderate",
            UvCategory::High => "High",
            UvCategory::VeryHigh => "Very High",
            UvCategory::Extreme => "Extreme",
            UvCategory::Unknown => "Unknown",
        }
    }

    pub fn colour(self) -> Colour {
        match self {
            UvCategory::Low => Colour::LightGreen,
            UvCategory::Moderate => Colour::Yellow,
            UvCategory::High => Colour::Orange,
            UvCategory::VeryHigh => Colour::Red,
            UvCategory::Extreme => Colour::Purple,
            UvCategory::Unknown => Colour::LightGrey,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            UvCategory::Low => "\u{1f7e2}",
            UvCategory::Moderate => "\u{1f7e1}",
            UvCategory::High => "\u{1f7e0}",
            UvCategory::VeryHigh => "\u{1f534}",
            UvCategory::Extreme => "\u{1f7e3}",
            UvCategory::Unknown => "\u{2754}",
        }
    }
}

const UV_INDICES: &[Range<UvCategory>] = &[
    Range { lower: 0.0, upper: 3.0, value: UvCategory::Low },
    Range { lower: 3.0, upper: 6.0, value: UvCategory::Moderate },
    Range { lower: 6.0, upper: 8.0, value: UvCategory::High },
    Range { lower: 8.0, upper: 11.0, value: UvCategory::VeryHigh },
    Range { lower: 11.0, upper: f64::INFINITY, value: UvCategory::Extreme },
];

fn lookup<T: Copy>(table: &[Range<T>], x: f64) -> Option<T> {
    table.iter().find(|range| range.contains(x)).map(|range| range.value)
}

/// The colour for a temperature in degrees Celsius. NaN is grey.
pub fn temperature_colour(celsius: f64) -> Colour {
    lookup(TEMPERATURES, celsius).unwrap_or(Colour::DarkGrey)
}

/// The category of a UV index; negative values and NaN are `Unknown`.
pub fn uv_category(index: f64) -> UvCategory {
    lookup(UV_INDICES, index).unwrap_or(UvCategory::Unknown)
}

/// Format a temperature as a coloured `20°C`.
pub fn colour_temperature(celsius: f64) -> String {
    // adding 0.0 turns -0 into 0
    let celsius = celsius + 0.0;
    colour(&format!("{}{}C", celsius, DEGREE_SIGN), temperature_colour(celsius))
}

/// Format a UV index as a coloured `UVI 5 (Moderate)` followed by its icon.
pub fn colour_uv(index: f64) -> String {
    let category = uv_category(index);
    let text = match category {
        UvCategory::Unknown => "UVI Unknown".to_string(),
        _ => format!("UVI {} ({})", index + 0.0, category.label()),
    };
    format!("{} {}", colour(&text, category.colour()), category.icon())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uv_boundaries_belong_to_the_upper_range() {
        assert_eq!(uv_category(0.0), UvCategory::Low);
        assert_eq!(uv_category(2.99), UvCategory::Low);
        assert_eq!(uv_category(3.0), UvCategory::Moderate);
        assert_eq!(uv_category(6.0), UvCategory::High);
        assert_eq!(uv_category(8.0), UvCategory::VeryHigh);
        assert_eq!(uv_category(11.0), UvCategory::Extreme);
        assert_eq!(uv_category(1e9), UvCategory::Extreme);
    }

    #[test]
    fn uv_out_of_domain_is_unknown() {
        assert_eq!(uv_category(-0.1), UvCategory::Unknown);
        assert_eq!(uv_category(f64::NEG_INFINITY), UvCategory::Unknown);
        assert_eq!(uv_category(f64::NAN), UvCategory::Unknown);
        assert_eq!(colour_uv(-1.0), "\x0315UVI Unknown\x03 \u{2754}");
    }

    #[test]
    fn temperature_boundaries() {
        assert_eq!(temperature_colour(-0.5), Colour::Blue);
        assert_eq!(temperature_colour(0.0), Colour::Teal);
        assert_eq!(temperature_colour(1.0), Colour::LightBlue);
        assert_eq!(temperature_colour(19.9), Colour::LightGreen);
        assert_eq!(temperature_colour(20.0), Colour::Yellow);
        assert_eq!(temperature_colour(39.9), Colour::Orange);
        assert_eq!(temperature_colour(40.0), Colour::Red);
    }

    #[test]
    fn every_finite_value_has_a_temperature_colour() {
        for x in &[f64::MIN, -273.15, -1e-9, 5.5, 1e300, f64::MAX] {
            assert_eq!(TEMPERATURES.iter().filter(|range| range.contains(*x)).count(), 1, "{}", x);
        }
        for x in &[0.0, 2.5, 7.9, 10.999, f64::MAX] {
            assert_eq!(UV_INDICES.iter().filter(|range| range.contains(*x)).count(), 1, "{}", x);
        }
    }

    #[test]
    fn formatting() {
        assert_eq!(colour_temperature(20.0), "\x030820°C\x03");
        assert_eq!(colour_temperature(-0.0), "\x03100°C\x03");
        assert_eq!(colour_uv(3.0), "\x0308UVI 3 (Moderate)\x03 \u{1f7e1}");
    }
}
