//! Calendar [`Period`] definitions.

use std::{cmp::Ordering, fmt, str::FromStr};

use derive_more::{Display, Error as StdError};
use time::{util::days_in_year_month, Month, OffsetDateTime};

pub use time::Date;

/// Returns the current UTC [`Date`].
#[must_use]
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Calendar month of a Gregorian year, the key every monthly figure is
/// computed for.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Period {
    /// Four-digit year of this [`Period`].
    year: i32,

    /// Month of this [`Period`].
    month: Month,
}

impl Period {
    /// Minimal supported year.
    pub const MIN_YEAR: i32 = 1000;

    /// Maximal supported year.
    pub const MAX_YEAR: i32 = 9999;

    /// Creates a new [`Period`] out of the provided `year` and `month`
    /// (`1` is January).
    ///
    /// # Errors
    ///
    /// If the `year` is not a four-digit one, or the `month` is out of
    /// `1..=12` range. Values are never clamped.
    pub fn new(year: i32, month: i32) -> Result<Self, Error> {
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
            return Err(Error::YearOutOfRange(year));
        }
        let month = u8::try_from(month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or(Error::MonthOutOfRange(month))?;
        Ok(Self { year, month })
    }

    /// Returns the year of this [`Period`].
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Returns the month number of this [`Period`] (`1` is January).
    #[must_use]
    pub const fn month(self) -> u8 {
        self.month as u8
    }

    /// Returns the number of days in this [`Period`].
    #[must_use]
    pub fn days(self) -> u8 {
        days_in_year_month(self.year, self.month)
    }

    /// Returns the first day of this [`Period`].
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn first_day(self) -> Date {
        Date::from_calendar_date(self.year, self.month, 1)
            .expect("year is always in range")
    }

    /// Returns the last day of this [`Period`].
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn last_day(self) -> Date {
        Date::from_calendar_date(self.year, self.month, self.days())
            .expect("year is always in range")
    }

    /// Indicates whether the inclusive `[from, end]` window intersects this
    /// [`Period`].
    ///
    /// [`None`] `end` means the window never ends.
    #[must_use]
    pub fn intersects(self, from: Date, end: Option<Date>) -> bool {
        from <= self.last_day() && end.map_or(true, |e| e >= self.first_day())
    }

    /// Returns the number of days of this [`Period`] covered by the
    /// inclusive `[from, end]` window.
    #[must_use]
    pub fn overlap_days(self, from: Date, end: Option<Date>) -> u8 {
        if !self.intersects(from, end) {
            return 0;
        }

        let start = from.max(self.first_day());
        let end = end.map_or(self.last_day(), |e| e.min(self.last_day()));
        // Both ends lie within a single month.
        end.day() - start.day() + 1
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month()).cmp(&(other.year, other.month()))
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s.split_once('-').ok_or(Error::Malformed)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(Error::Malformed);
        }
        Self::new(
            year.parse().map_err(|_| Error::Malformed)?,
            month.parse().map_err(|_| Error::Malformed)?,
        )
    }
}

/// Error of constructing a [`Period`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error {
    /// Month is not in `1..=12` range.
    #[display("month `{_0}` is out of `1..=12` range")]
    MonthOutOfRange(#[error(not(source))] i32),

    /// Year is not a four-digit one.
    #[display("year `{_0}` is not a four-digit year")]
    YearOutOfRange(#[error(not(source))] i32),

    /// String is not in `YYYY-MM` format.
    #[display("period must be in `YYYY-MM` format")]
    Malformed,
}

#[cfg(test)]
mod spec {
    use time::macros::date;

    use super::{Error, Period};

    fn period(year: i32, month: i32) -> Period {
        Period::new(year, month).unwrap()
    }

    #[test]
    fn validates_month_and_year() {
        assert!(Period::new(2024, 1).is_ok());
        assert!(Period::new(2024, 12).is_ok());

        assert_eq!(Period::new(2024, 0), Err(Error::MonthOutOfRange(0)));
        assert_eq!(Period::new(2024, 13), Err(Error::MonthOutOfRange(13)));
        assert_eq!(Period::new(2024, -3), Err(Error::MonthOutOfRange(-3)));
        assert_eq!(Period::new(999, 3), Err(Error::YearOutOfRange(999)));
        assert_eq!(Period::new(10000, 3), Err(Error::YearOutOfRange(10000)));
    }

    #[test]
    fn calendar_bounds() {
        let march = period(2024, 3);
        assert_eq!(march.first_day(), date!(2024 - 03 - 01));
        assert_eq!(march.last_day(), date!(2024 - 03 - 31));
        assert_eq!(march.days(), 31);

        assert_eq!(period(2024, 2).days(), 29);
        assert_eq!(period(2023, 2).days(), 28);
        assert_eq!(period(2024, 4).last_day(), date!(2024 - 04 - 30));
    }

    #[test]
    fn intersects_inclusive_window() {
        let march = period(2024, 3);

        assert!(march.intersects(date!(2024 - 03 - 31), None));
        assert!(march.intersects(date!(2023 - 01 - 01), Some(date!(2024 - 03 - 01))));
        assert!(march.intersects(date!(2024 - 03 - 10), Some(date!(2024 - 03 - 12))));

        assert!(!march.intersects(date!(2024 - 04 - 01), None));
        assert!(!march.intersects(date!(2023 - 01 - 01), Some(date!(2024 - 02 - 29))));
    }

    #[test]
    fn counts_overlap_days() {
        let march = period(2024, 3);

        assert_eq!(march.overlap_days(date!(2024 - 01 - 01), None), 31);
        assert_eq!(march.overlap_days(date!(2024 - 03 - 31), None), 1);
        assert_eq!(
            march.overlap_days(date!(2023 - 01 - 01), Some(date!(2024 - 03 - 01))),
            1,
        );
        assert_eq!(
            march.overlap_days(date!(2024 - 03 - 16), Some(date!(2024 - 05 - 01))),
            16,
        );
        assert_eq!(
            march.overlap_days(date!(2024 - 04 - 01), Some(date!(2024 - 05 - 01))),
            0,
        );
    }

    #[test]
    fn orders_chronologically() {
        assert!(period(2023, 12) < period(2024, 1));
        assert!(period(2024, 2) < period(2024, 11));
    }

    #[test]
    fn parses_and_displays() {
        assert_eq!("2024-03".parse::<Period>(), Ok(period(2024, 3)));
        assert_eq!(period(2024, 3).to_string(), "2024-03");

        assert_eq!("2024-3".parse::<Period>(), Err(Error::Malformed));
        assert_eq!("2024-13".parse::<Period>(), Err(Error::MonthOutOfRange(13)));
        assert_eq!("march".parse::<Period>(), Err(Error::Malformed));
    }
}
