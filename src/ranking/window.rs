//! Time windows for ranking views
//!
//! Monthly windows are half-open UTC ranges: a game dated exactly at the
//! first instant of the month belongs to it, one dated exactly at the first
//! instant of the next month does not.

use crate::error::{Result, TrackerError};
use crate::types::Game;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

/// A calendar month in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Month {
    year: i32,
    month: u32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Month {
    /// Create a month, `month` being 1-based
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(TrackerError::InvalidWindow {
                reason: format!("month must be between 1 and 12, got {}", month),
            }
            .into());
        }

        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };

        let start = month_start(year, month).ok_or_else(|| TrackerError::InvalidWindow {
            reason: format!("{}-{:02} is not a valid month", year, month),
        })?;
        let end = month_start(next_year, next_month).ok_or_else(|| TrackerError::InvalidWindow {
            reason: format!("{}-{:02} has no following month", year, month),
        })?;

        Ok(Self {
            year,
            month,
            start,
            end,
        })
    }

    /// The month a timestamp falls in
    pub fn containing(date: DateTime<Utc>) -> Result<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First instant of the month (inclusive)
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// First instant of the following month (exclusive)
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        self.start <= date && date < self.end
    }
}

fn month_start(year: i32, month: u32) -> Option<DateTime<Utc>> {
    let naive = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&naive))
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = anyhow::Error;

    /// Parses `YYYY-MM`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TrackerError::InvalidWindow {
            reason: format!("expected YYYY-MM, got '{}'", s),
        };

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Month::new(year, month)
    }
}

/// Which slice of history a ranking is computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankingView {
    /// Every game, ratings as stored
    AllTime,
    /// Games in the month, starting from each player's real rating entering it
    MonthlyAccumulated(Month),
    /// Games in the month as an isolated season, everyone starting at baseline
    MonthlyIndependent(Month),
}

impl RankingView {
    pub fn month(&self) -> Option<Month> {
        match self {
            RankingView::AllTime => None,
            RankingView::MonthlyAccumulated(month) | RankingView::MonthlyIndependent(month) => {
                Some(*month)
            }
        }
    }

    /// Games that fall inside this view
    pub fn filter_games(&self, games: &[Game]) -> Vec<Game> {
        match self.month() {
            None => games.to_vec(),
            Some(month) => games
                .iter()
                .filter(|game| month.contains(game.date))
                .cloned()
                .collect(),
        }
    }
}

impl fmt::Display for RankingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankingView::AllTime => write!(f, "all-time"),
            RankingView::MonthlyAccumulated(month) => write!(f, "monthly-accumulated {}", month),
            RankingView::MonthlyIndependent(month) => write!(f, "monthly-independent {}", month),
        }
    }
}
