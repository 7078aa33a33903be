//! mIRC colour and formatting codes.

#![deny(unsafe_code)]
#![deny(missing_docs)]

const BOLD: char = '\x02';
const COLOUR: char = '\x03';
const ITALIC: char = '\x1d';

/// The sixteen standard mIRC colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    /// 00
    White,
    /// 01
    Black,
    /// 02
    Blue,
    /// 03
    Green,
    /// 04
    Red,
    /// 05
    Brown,
    /// 06
    Purple,
    /// 07
    Orange,
    /// 08
    Yellow,
    /// 09
    LightGreen,
    /// 10
    Teal,
    /// 11
    LightBlue,
    /// 12
    DarkBlue,
    /// 13
    Pink,
    /// 14
    DarkGrey,
    /// 15
    LightGrey,
}

impl Colour {
    /// The two-digit mIRC code of this colour.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Wrap `text` in the given foreground colour.
pub fn colour(text: &str, colour: Colour) -> String {
    format!("{}{:02}{}{}", COLOUR, colour.code(), text, COLOUR)
}

/// Wrap `text` in bold.
pub fn bold(text: &str) -> String {
    format!("{}{}{}", BOLD, text, BOLD)
}

/// Wrap `text` in italics.
pub fn italic(text: &str) -> String {
    format!("{}{}{}", ITALIC, text, ITALIC)
}

/// Remove all mIRC formatting codes from `text`.
pub fn strip(text: &str) -> String {
    lazy_static! {
        static ref CODES: regex::Regex =
            regex::Regex::new(r"\x03(\d{1,2}(,\d{1,2})?)?|[\x02\x0f\x16\x1d\x1f]").unwrap();
    }
    CODES.replace_all(text, "").into_owned()
}
