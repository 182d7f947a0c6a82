//! Guard library
//!
//! Small stateless validation predicates shared by every entity constructor.
//! Each returns a [`GuardResult`]; aggregate several with
//! [`GuardResult::combine`], which reports the first failure in list order.

use crate::outcome::GuardResult;
use regex::Regex;
use std::fmt::{Debug, Display};

pub struct Guard;

impl Guard {
    pub fn against_null_or_undefined<T>(argument: Option<&T>, name: &str) -> GuardResult {
        match argument {
            Some(_) => GuardResult::ok(),
            None => GuardResult::fail(format!("{name} is null or undefined")),
        }
    }

    /// Presence check over several arguments of mixed types, given as
    /// `(is_present, name)` pairs. Reports the first missing one.
    pub fn against_null_or_undefined_bulk(arguments: &[(bool, &str)]) -> GuardResult {
        GuardResult::combine(arguments.iter().map(|&(present, name)| {
            if present {
                GuardResult::ok()
            } else {
                GuardResult::fail(format!("{name} is null or undefined"))
            }
        }))
    }

    /// Text must have at least `min` characters.
    pub fn against_at_least(min: usize, text: &str, name: &str) -> GuardResult {
        if text.chars().count() >= min {
            GuardResult::ok()
        } else {
            GuardResult::fail(format!("{name} is not at least {min} chars"))
        }
    }

    /// Text must have at most `max` characters.
    pub fn against_at_most(max: usize, text: &str, name: &str) -> GuardResult {
        if text.chars().count() <= max {
            GuardResult::ok()
        } else {
            GuardResult::fail(format!("{name} is greater than {max} chars"))
        }
    }

    pub fn against_empty<T>(list: &[T], name: &str) -> GuardResult {
        if list.is_empty() {
            GuardResult::fail(format!("{name} is empty"))
        } else {
            GuardResult::ok()
        }
    }

    pub fn greater_than<N: PartialOrd + Display>(min: N, actual: N, name: &str) -> GuardResult {
        if actual > min {
            GuardResult::ok()
        } else {
            GuardResult::fail(format!("{name} ({actual}) is not greater than {min}"))
        }
    }

    /// Inclusive on both ends.
    pub fn in_range<N: PartialOrd + Display>(num: N, min: N, max: N, name: &str) -> GuardResult {
        if num >= min && num <= max {
            GuardResult::ok()
        } else {
            GuardResult::fail(format!("{name} ({num}) is not within range {min} to {max}"))
        }
    }

    pub fn is_one_of<T: PartialEq + Debug>(value: &T, valid: &[T], name: &str) -> GuardResult {
        if valid.contains(value) {
            GuardResult::ok()
        } else {
            GuardResult::fail(format!("{name} isn't one of {valid:?}, got {value:?}"))
        }
    }

    pub fn against_regex(regex: &Regex, text: &str, name: &str) -> GuardResult {
        if regex.is_match(text) {
            GuardResult::ok()
        } else {
            GuardResult::fail(format!("{name} does not match {}", regex.as_str()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_guard_rejects_missing_argument() {
        assert!(Guard::against_null_or_undefined(Some(&3), "value").is_ok());
        let result = Guard::against_null_or_undefined::<i32>(None, "lineup");
        assert_eq!(result.message.as_deref(), Some("lineup is null or undefined"));
    }

    #[test]
    fn bulk_null_guard_names_first_missing_argument() {
        let result = Guard::against_null_or_undefined_bulk(&[
            (true, "home lineup"),
            (false, "home bench"),
            (false, "away lineup"),
        ]);
        assert_eq!(result.message.as_deref(), Some("home bench is null or undefined"));
        assert!(Guard::against_null_or_undefined_bulk(&[]).is_ok());
    }

    #[test]
    fn length_guards_count_characters() {
        assert!(Guard::against_at_least(1, "a", "name").is_ok());
        assert!(!Guard::against_at_least(1, "", "name").is_ok());
        assert!(Guard::against_at_most(3, "Çağ", "name").is_ok());
        assert!(!Guard::against_at_most(2, "Çağ", "name").is_ok());
    }

    #[test]
    fn range_is_inclusive() {
        assert!(Guard::in_range(0, 0, 125, "timestamp").is_ok());
        assert!(Guard::in_range(125, 0, 125, "timestamp").is_ok());
        assert!(!Guard::in_range(126, 0, 125, "timestamp").is_ok());
        assert!(!Guard::in_range(-1, 0, 125, "timestamp").is_ok());
    }

    #[test]
    fn greater_than_is_strict() {
        assert!(Guard::greater_than(0, 1, "capacity").is_ok());
        assert!(!Guard::greater_than(0, 0, "capacity").is_ok());
    }

    #[test]
    fn one_of_and_regex() {
        assert!(Guard::is_one_of(&"red", &["yellow", "red"], "color").is_ok());
        assert!(!Guard::is_one_of(&"blue", &["yellow", "red"], "color").is_ok());

        let year = Regex::new(r"^\d{4}$").unwrap();
        assert!(Guard::against_regex(&year, "2024", "season").is_ok());
        assert!(!Guard::against_regex(&year, "24/25", "season").is_ok());
    }

    #[test]
    fn combine_keeps_listing_order() {
        let combined = GuardResult::combine([
            Guard::against_at_least(1, "Inter", "name"),
            Guard::against_empty::<u8>(&[], "players"),
            Guard::in_range(200, 0, 125, "timestamp"),
        ]);
        assert_eq!(combined.message.as_deref(), Some("players is empty"));
    }
}
