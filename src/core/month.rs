//! Dense integer ids for calendar months.
//!
//! A month id is `year * 12 + month_index`, with `month_index` in `0..12`
//! (January is 0). Ids are totally ordered and consecutive months differ by
//! exactly one, so a range of months is just an integer range.
//!
//! ```
//! use chatstats::core::month::{month_id, month_name, month_id_from_name};
//!
//! let id = month_id(0, 2024);
//! assert_eq!(month_name(id), "Jan 2024");
//! assert_eq!(month_id_from_name("Jan 2024"), Some(id));
//! assert_eq!(month_id(11, 2023) + 1, id);
//! ```

use chrono::{DateTime, Datelike, Utc};

/// A dense, ordered month identifier.
pub type MonthId = i64;

/// Three-letter English month abbreviations, indexed by month index.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Returns the id of a month. `month_index` is 0-based.
pub fn month_id(month_index: u32, year: i32) -> MonthId {
    i64::from(year) * 12 + i64::from(month_index)
}

/// Returns the 0-based month index of an id.
pub fn month_index(id: MonthId) -> u32 {
    // rem_euclid keeps years before 0 in range
    id.rem_euclid(12) as u32
}

/// Returns the year of an id.
pub fn year(id: MonthId) -> i32 {
    ((id - i64::from(month_index(id))) / 12) as i32
}

/// Returns the id of the UTC calendar month a timestamp falls in.
pub fn month_id_of(timestamp: DateTime<Utc>) -> MonthId {
    month_id(timestamp.month0(), timestamp.year())
}

/// Returns the display name of a month, e.g. `"Jan 2024"`.
pub fn month_name(id: MonthId) -> String {
    format!("{} {}", MONTH_NAMES[month_index(id) as usize], year(id))
}

/// Parses a display name produced by [`month_name`] back into its id.
///
/// Returns `None` unless the input is exactly an abbreviation, one space,
/// and an integer year.
pub fn month_id_from_name(name: &str) -> Option<MonthId> {
    let (month, year) = name.split_once(' ')?;
    let index = MONTH_NAMES.iter().position(|m| *m == month)?;
    let year: i32 = year.parse().ok()?;
    Some(month_id(index as u32, year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_month_id_formula() {
        assert_eq!(month_id(0, 2024), 2024 * 12);
        assert_eq!(month_id(11, 2024), 2024 * 12 + 11);
        assert_eq!(month_id(0, 2025) - month_id(11, 2024), 1);
    }

    #[test]
    fn test_inverse_mapping() {
        let id = month_id(4, 2023);
        assert_eq!(month_index(id), 4);
        assert_eq!(year(id), 2023);
    }

    #[test]
    fn test_negative_years_round_trip() {
        let id = month_id(3, -1);
        assert_eq!(month_index(id), 3);
        assert_eq!(year(id), -1);
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(month_id(0, 2024)), "Jan 2024");
        assert_eq!(month_name(month_id(8, 1999)), "Sep 1999");
        assert_eq!(month_name(month_id(11, 2030)), "Dec 2030");
    }

    #[test]
    fn test_month_id_from_name() {
        assert_eq!(month_id_from_name("Feb 2024"), Some(month_id(1, 2024)));
        assert_eq!(month_id_from_name("Feb"), None);
        assert_eq!(month_id_from_name("Foo 2024"), None);
        assert_eq!(month_id_from_name("Feb twenty"), None);
        assert_eq!(month_id_from_name(""), None);
    }

    #[test]
    fn test_month_id_of_timestamp_uses_utc() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap();
        assert_eq!(month_id_of(ts), month_id(2, 2024));
        let ts = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        assert_eq!(month_id_of(ts), month_id(3, 2024));
    }

    #[test]
    fn test_round_trip_all_months() {
        for y in [1970, 2000, 2024, 2099] {
            for m in 0..12 {
                let id = month_id(m, y);
                assert_eq!(month_id_from_name(&month_name(id)), Some(id));
            }
        }
    }
}
