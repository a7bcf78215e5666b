use std::{str::FromStr, sync::Arc};

use jomini::common::Date;

/// A type alias for a game object id.
pub type GameId = u32;

// implementing a wrapper for GameId is overkill, the opaqueness is not needed as it's always going to be a numeric type

/// A type alias for a game string.
/// Roughly meant to represent a raw string from a save file, reference counted so that it exists once in memory.
/// Actually an [Arc] around a [str], so that a parsed save can be handed to another thread.
pub type GameString = Arc<str>;

/// A string that represents a boolean true value.
const BOOL_TRUE: &str = "yes";

/// The quote character surrounding string values in the save file.
const QUOTE: char = '"';

/// Parses a scalar, falling back to the type's default value if the text is
/// malformed. Save files are not validated, so a single corrupted number must
/// not prevent the rest of the galaxy from loading.
pub fn parse_or_default<T: FromStr + Default>(value: &str) -> T {
    value.trim().parse().unwrap_or_default()
}

/// Like [parse_or_default], but for an optional value. Absent values become
/// the default as well.
pub fn parse_opt_or_default<T: FromStr + Default>(value: Option<&str>) -> T {
    value.map(parse_or_default).unwrap_or_default()
}

/// Checks whether the value is the save file's boolean true. Anything else,
/// including a missing value, is false.
pub fn parse_yes(value: Option<&str>) -> bool {
    value.map_or(false, |v| v.trim() == BOOL_TRUE)
}

/// Splits a whitespace separated list of integers, e.g. the body of
/// `bypasses={ 12 13 }`. Malformed tokens become 0.
pub fn parse_id_list(value: &str) -> Vec<GameId> {
    value.split_whitespace().map(parse_or_default).collect()
}

/// Strips the surrounding quotes from a value.
pub fn unquote(value: &str) -> &str {
    value.trim_matches(QUOTE)
}

/// Parses a `Y.M.D` date. Anything else, including an impossible date, is
/// [None].
pub fn parse_date(value: &str) -> Option<Date> {
    let mut parts = unquote(value.trim()).split('.');
    if let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    {
        if let (Ok(year), Ok(month), Ok(day)) = (year.parse(), month.parse(), day.parse()) {
            return Date::from_ymd_opt(year, month, day);
        }
    }
    None
}
