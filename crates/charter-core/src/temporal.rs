//! # Time Windows as Data
//!
//! Constitutional procedures open windows: 30 days for the Senate, 21 for
//! the President, 14 for a government to win confidence. The procedural
//! records store each window on the history entry that opens it and never
//! check it; a caller holding a calendar resolves the deadline with
//! [`Window::deadline_from`] and decides what a lapse means.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::violation::Article;

/// A period of calendar days granted by a provision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    /// Length of the window in days.
    pub days: u32,
    /// The provision granting the window.
    pub article: Article,
}

impl Window {
    /// Build a window.
    pub fn new(days: u32, article: Article) -> Self {
        Self { days, article }
    }

    /// Last day of the window when it opens on `opened_on`.
    ///
    /// `None` only if the result falls outside the supported calendar.
    pub fn deadline_from(&self, opened_on: NaiveDate) -> Option<NaiveDate> {
        opened_on.checked_add_days(Days::new(u64::from(self.days)))
    }

    /// Whether `on` still falls inside the window opened on `opened_on`.
    pub fn is_open(&self, opened_on: NaiveDate, on: NaiveDate) -> bool {
        on >= opened_on && self.deadline_from(opened_on).map_or(true, |end| on <= end)
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} days (Art. {})", self.days, self.article)
    }
}

/// Whole days from `start` to `end`; negative when `end` precedes `start`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}
