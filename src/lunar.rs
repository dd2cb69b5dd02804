//! Lunar New Year lookup and the holiday annotations derived from it.

use crate::calendar::{MAX_YEAR, MIN_YEAR};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Number of days the new-year window covers after New Year's Day itself.
const FOLLOWING_DAYS: u32 = 4;

/// Day offsets of Lunar New Year from January 21, one entry per year starting at
/// [`MIN_YEAR`]. Every Lunar New Year in range falls between Jan 21 and Feb 20, so
/// each entry fits in five bits.
#[rustfmt::skip]
const NEW_YEAR_OFFSETS: [u8; (MAX_YEAR - MIN_YEAR + 1) as usize] = [
    10, 29, 18, 8, 26, 14, 4, 23, 12, 1, 20, 9, 28, 16, 5,    // 1900
    24, 13, 2, 21, 11, 30, 18, 7, 26, 15, 3, 23, 12, 2, 20,   // 1915
    9, 27, 16, 5, 24, 14, 3, 21, 10, 29, 18, 6, 25, 15, 4,    // 1930
    23, 12, 1, 20, 8, 27, 16, 6, 24, 13, 3, 22, 10, 28, 18,   // 1945
    7, 25, 15, 4, 23, 12, 0, 19, 9, 27, 16, 6, 25, 13, 2,     // 1960
    21, 10, 28, 17, 7, 26, 15, 4, 23, 12, 30, 19, 8, 27, 16,  // 1975
    6, 25, 14, 2, 20, 10, 29, 17, 7, 26, 15, 3, 22, 11, 1,    // 1990
    19, 8, 28, 17, 5, 24, 13, 2, 20, 10, 29, 18, 7, 26, 15,   // 2005
    4, 22, 11, 1, 20, 8, 27, 16, 5, 23, 13, 2, 21, 10, 29,    // 2020
    18, 7, 25, 14, 3, 22, 11, 1, 20, 9, 27, 16, 5, 24, 12,    // 2035
    2, 21, 11, 29, 18, 7, 25, 14, 3, 22, 12, 0, 19, 8, 27,    // 2050
    15, 5, 24, 13, 2, 21, 10, 29, 17, 6, 25, 15, 3, 22, 12,   // 2065
    1, 19, 8, 27, 16, 5, 24, 13, 3, 20, 9, 28, 17, 6, 25,     // 2080
    15, 4, 22, 11, 0, 19,                                     // 2095
];

/// Solar date of the first day of the first lunar month in `year`, or `None` when
/// the year is outside the conversion table.
pub fn lunar_new_year(year: i32) -> Option<NaiveDate> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }

    let offset = NEW_YEAR_OFFSETS[(year - MIN_YEAR) as usize];
    NaiveDate::from_ymd_opt(year, 1, 21).map(|d| d + Duration::days(offset.into()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidayKind {
    /// The last day of the outgoing lunar year.
    Eve,
    /// Day `n` (1-based) of the first lunar month.
    NewYear(u32),
}

impl HolidayKind {
    /// Day 1 is drawn with a glyph in place of its numeral.
    pub fn is_first_day(&self) -> bool {
        matches!(self, Self::NewYear(1))
    }
}

/// Holiday annotations for one solar year, keyed by `(month, day)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    year: i32,
    days: BTreeMap<(u32, u32), HolidayKind>,
}

impl HolidaySet {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            days: BTreeMap::new(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Marks `date` if it lies within this set's year. Returns whether it was kept.
    pub fn mark(&mut self, date: NaiveDate, kind: HolidayKind) -> bool {
        if date.year() != self.year {
            return false;
        }

        self.days.insert((date.month(), date.day()), kind);
        true
    }

    pub fn get(&self, month: u32, day: u32) -> Option<HolidayKind> {
        self.days.get(&(month, day)).copied()
    }

    pub fn contains(&self, month: u32, day: u32) -> bool {
        self.days.contains_key(&(month, day))
    }

    pub fn is_first_day(&self, month: u32, day: u32) -> bool {
        self.get(month, day).is_some_and(|k| k.is_first_day())
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Iterates `((month, day), kind)` in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = ((u32, u32), HolidayKind)> + '_ {
        self.days.iter().map(|(k, v)| (*k, *v))
    }
}

/// Computes New Year's Eve plus the first five days of the lunar year, as solar
/// dates within `year`. Dates that spill into an adjacent solar year are dropped.
pub fn lunar_new_year_window(year: i32) -> HolidaySet {
    let mut set = HolidaySet::new(year);

    let Some(first) = lunar_new_year(year) else {
        warn!(year, "no lunar new year data for year; no holidays marked");
        return set;
    };

    if let Some(eve) = first.pred_opt() {
        if !set.mark(eve, HolidayKind::Eve) {
            debug!(year, eve = %eve, "new year's eve falls in the previous year; skipped");
        }
    }

    for n in 0..=FOLLOWING_DAYS {
        set.mark(first + Duration::days(n.into()), HolidayKind::NewYear(n + 1));
    }

    debug!(year, new_year = %first, marked = set.len(), "resolved lunar new year window");
    set
}

/// Supplies the holiday annotations the renderer overlays on a year.
pub trait HolidayProvider: Sync {
    fn holidays(&self, year: i32) -> HolidaySet;
}

/// Lunar New Year's Eve through the fifth day of the new year.
#[derive(Debug, Clone, Copy, Default)]
pub struct LunarNewYear;

impl HolidayProvider for LunarNewYear {
    fn holidays(&self, year: i32) -> HolidaySet {
        lunar_new_year_window(year)
    }
}
