use chrono::{Datelike, NaiveDate, Weekday};

use super::domain::SeasonWindow;

/// Determines which calendar dates the club can operate on.
#[derive(Debug, Clone, Default)]
pub struct OperationalCalendar {
    season: Option<SeasonWindow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("{year}-{month:02} is not a representable calendar month")]
    InvalidMonth { year: i32, month: u32 },
}

impl OperationalCalendar {
    pub fn new(season: Option<SeasonWindow>) -> Self {
        Self { season }
    }

    pub fn season(&self) -> Option<&SeasonWindow> {
        self.season.as_ref()
    }

    /// A date is operational when it falls on a weekend and, if season
    /// bounds are configured, within the season inclusive.
    pub fn is_operational(&self, date: NaiveDate) -> bool {
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        weekend
            && self
                .season
                .map_or(true, |season| season.contains(date))
    }

    /// Operational dates of one month, ascending. Fails fast on a
    /// year/month pair outside the representable range.
    pub fn operational_dates(&self, year: i32, month: u32) -> Result<Vec<NaiveDate>, CalendarError> {
        let first =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidMonth { year, month })?;

        let mut dates = Vec::new();
        let mut day = first;
        while day.month() == month {
            if self.is_operational(day) {
                dates.push(day);
            }
            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        Ok(dates)
    }
}
