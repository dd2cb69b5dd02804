use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;
pub const DAYS_IN_WEEK: usize = 7;

/// One week of a month grid, Monday first. `None` is a padding cell.
pub type Week = [Option<u32>; DAYS_IN_WEEK];

/// Week-by-week layout of a single month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    weeks: Vec<Week>,
}

impl MonthGrid {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// Iterates `(week_index, column, day)` for every non-empty cell.
    pub fn days(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.weeks.iter().enumerate().flat_map(|(row, week)| {
            week.iter()
                .enumerate()
                .filter_map(move |(col, day)| day.map(|day| (row, col, day)))
        })
    }
}

pub fn validate_year(year: i32) -> Result<i32> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(Error::InvalidYear {
            year,
            min: MIN_YEAR,
            max: MAX_YEAR,
        })
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    Ok(match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => return Err(Error::InvalidMonth { month }),
    })
}

/// Weekday of the given date, Monday = 0 .. Sunday = 6.
pub fn weekday_of(year: i32, month: u32, day: u32) -> Result<usize> {
    days_in_month(year, month)?;
    let date =
        NaiveDate::from_ymd_opt(year, month, day).ok_or(Error::InvalidDate { year, month, day })?;
    Ok(date.weekday().num_days_from_monday() as usize)
}

/// Builds the Monday-first grid for `month` of `year`, padding the first and last
/// weeks with empty cells.
pub fn month_grid(year: i32, month: u32) -> Result<MonthGrid> {
    let total = days_in_month(year, month)?;
    let lead = weekday_of(year, month, 1)?;

    let mut weeks = Vec::new();
    let mut week: Week = [None; DAYS_IN_WEEK];
    let mut col = lead;

    for day in 1..=total {
        week[col] = Some(day);
        col += 1;
        if col == DAYS_IN_WEEK {
            weeks.push(week);
            week = [None; DAYS_IN_WEEK];
            col = 0;
        }
    }

    if col != 0 {
        weeks.push(week);
    }

    Ok(MonthGrid { year, month, weeks })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month() {
        let table = vec![
            (2024, 2, 29),
            (2023, 2, 28),
            (1900, 2, 28),
            (2000, 2, 29),
            (2100, 2, 28),
            (2026, 4, 30),
            (2026, 1, 31),
            (2026, 12, 31),
        ];

        for (year, month, days) in table {
            assert_eq!(days_in_month(year, month).unwrap(), days, "{year}-{month}");
        }
    }

    #[test]
    fn test_invalid_month() {
        assert!(matches!(
            month_grid(2026, 13),
            Err(Error::InvalidMonth { month: 13 })
        ));
        assert!(matches!(
            month_grid(2026, 0),
            Err(Error::InvalidMonth { month: 0 })
        ));
    }

    #[test]
    fn test_weekday_of_rejects_bad_dates() {
        let table = vec![(2026, 2, 30), (2023, 2, 29), (2026, 4, 31), (2026, 1, 0)];
        for (year, month, day) in table {
            assert!(
                matches!(
                    weekday_of(year, month, day),
                    Err(Error::InvalidDate { year: y, month: m, day: d }) if (y, m, d) == (year, month, day)
                ),
                "{year}-{month}-{day}"
            );
        }

        assert!(matches!(
            weekday_of(2026, 13, 1),
            Err(Error::InvalidMonth { month: 13 })
        ));
        assert_eq!(weekday_of(2024, 2, 29).unwrap(), 3);
    }

    #[test]
    fn test_first_column_matches_weekday() {
        let table = vec![
            (2026, 1, 3), // Thursday
            (2026, 2, 6), // Sunday
            (2024, 1, 0), // Monday
            (2000, 1, 5), // Saturday
            (1900, 1, 0), // Monday
        ];

        for (year, month, column) in table {
            let grid = month_grid(year, month).unwrap();
            let first = grid.weeks()[0].iter().position(|d| d.is_some()).unwrap();
            assert_eq!(first, column, "{year}-{month}");
            assert_eq!(grid.weeks()[0][first], Some(1));
        }
    }

    #[test]
    fn test_random_months_hold_invariants() {
        for _ in 0..200 {
            let year = MIN_YEAR + (rand::random::<u32>() % 201) as i32;
            let month = rand::random::<u32>() % 12 + 1;

            let grid = month_grid(year, month).unwrap();
            let days: Vec<u32> = grid.days().map(|(_, _, d)| d).collect();

            assert_eq!(days.len() as u32, days_in_month(year, month).unwrap());
            assert_eq!(days, (1..=days.len() as u32).collect::<Vec<u32>>());
            assert!(grid.weeks().len() >= 4 && grid.weeks().len() <= 6);

            let (row, col, day) = grid.days().next().unwrap();
            assert_eq!((row, day), (0, 1));
            assert_eq!(col, weekday_of(year, month, 1).unwrap());

            assert_eq!(grid, month_grid(year, month).unwrap());
        }
    }

    #[test]
    fn test_six_week_month() {
        // March 2026 starts on a Sunday and has 31 days.
        let grid = month_grid(2026, 3).unwrap();
        assert_eq!(grid.weeks().len(), 6);
        assert_eq!(grid.weeks()[0], [None, None, None, None, None, None, Some(1)]);
        assert_eq!(grid.weeks()[5][0], Some(30));
        assert_eq!(grid.weeks()[5][1], Some(31));
        assert_eq!(grid.weeks()[5][2], None);
    }

    #[test]
    fn test_four_week_february() {
        // February 2021 starts on a Monday and has 28 days.
        let grid = month_grid(2021, 2).unwrap();
        assert_eq!(grid.weeks().len(), 4);
        assert!(grid.weeks().iter().all(|w| w.iter().all(|d| d.is_some())));
    }

    #[test]
    fn test_validate_year_bounds() {
        for year in [1900, 2026, 2100] {
            assert_eq!(validate_year(year).unwrap(), year);
        }
        for year in [1899, 2101, 0, -5] {
            assert!(matches!(
                validate_year(year),
                Err(Error::InvalidYear { .. })
            ));
        }
    }
}
