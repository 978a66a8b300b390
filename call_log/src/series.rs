//! Daily call-count series
//!
//! A [`DailySeries`] has one entry per calendar day between its first and
//! last date, with no gaps. The only ways to build one are from timestamps
//! (resampling) or from a start date plus consecutive counts, so the
//! contiguity holds for every value of the type.

use crate::loader::CallLog;
use crate::{CallLogError, Result};
use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of calls on one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    /// Calendar day
    pub date: NaiveDate,
    /// Calls logged on that day
    pub count: u64,
}

/// Gap-free daily call counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DailySeries {
    points: Vec<DailyCount>,
}

impl DailySeries {
    /// A series with no days
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a series of consecutive days starting at `start`
    pub fn from_counts(start: NaiveDate, counts: &[u64]) -> Result<Self> {
        let points = counts
            .iter()
            .enumerate()
            .map(|(offset, &count)| {
                start
                    .checked_add_days(Days::new(offset as u64))
                    .map(|date| DailyCount { date, count })
                    .ok_or_else(|| {
                        CallLogError::InvalidSeries(format!(
                            "day {} after {} is out of range",
                            offset, start
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { points })
    }

    /// Resample call times into one count per calendar day
    ///
    /// Spans the earliest to the latest call inclusive; days without calls
    /// count zero. Input order does not matter.
    pub fn from_timestamps(times: &[NaiveDateTime]) -> Self {
        let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for time in times {
            *per_day.entry(time.date()).or_insert(0) += 1;
        }

        let (first, last) = match (per_day.keys().next(), per_day.keys().next_back()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Self::empty(),
        };

        let mut points = Vec::new();
        let mut day = Some(first);
        while let Some(date) = day.filter(|d| *d <= last) {
            points.push(DailyCount {
                date,
                count: per_day.get(&date).copied().unwrap_or(0),
            });
            day = date.succ_opt();
        }

        Self { points }
    }

    /// Number of days in the series
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the series has no days
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The (date, count) entries in date order
    pub fn points(&self) -> &[DailyCount] {
        &self.points
    }

    /// Dates of the series
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Counts of the series
    pub fn counts(&self) -> Vec<u64> {
        self.points.iter().map(|p| p.count).collect()
    }

    /// Counts as floating-point observations for modelling
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.count as f64).collect()
    }

    /// First day, if any
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    /// Last day, if any
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Split into the days before `index` and the days from `index` on
    ///
    /// `index` past the end is clamped, giving an empty suffix.
    pub fn split_at(&self, index: usize) -> (DailySeries, DailySeries) {
        let (head, tail) = self.points.split_at(index.min(self.points.len()));
        (
            DailySeries {
                points: head.to_vec(),
            },
            DailySeries {
                points: tail.to_vec(),
            },
        )
    }
}

impl CallLog {
    /// Daily call counts for one identifier
    ///
    /// An identifier with no calls, or only unparseable timestamps, gives an
    /// empty series.
    pub fn build_daily_series(&self, api_code: &str) -> DailySeries {
        DailySeries::from_timestamps(&self.call_times(api_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_resampling_fills_gaps_with_zero() {
        let times = vec![
            time(2024, 1, 3, 9),
            time(2024, 1, 1, 10),
            time(2024, 1, 1, 23),
            time(2024, 1, 5, 0),
        ];
        let series = DailySeries::from_timestamps(&times);

        assert_eq!(series.counts(), vec![2, 0, 1, 0, 1]);
        assert_eq!(series.first_date(), Some(date(2024, 1, 1)));
        assert_eq!(series.last_date(), Some(date(2024, 1, 5)));
    }

    #[test]
    fn test_resampling_crosses_month_and_leap_day() {
        let times = vec![time(2024, 2, 28, 1), time(2024, 3, 1, 1)];
        let series = DailySeries::from_timestamps(&times);
        assert_eq!(
            series.dates(),
            vec![date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]
        );
    }

    #[test]
    fn test_no_timestamps_give_empty_series() {
        let series = DailySeries::from_timestamps(&[]);
        assert!(series.is_empty());
        assert_eq!(series.first_date(), None);
    }

    #[test]
    fn test_from_counts_is_contiguous() {
        let series = DailySeries::from_counts(date(2023, 12, 30), &[1, 2, 3, 4]).unwrap();
        for pair in series.points().windows(2) {
            assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
        }
        assert_eq!(series.values(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_split_at_partitions_in_order() {
        let series = DailySeries::from_counts(date(2024, 1, 1), &[5, 6, 7, 8, 9]).unwrap();
        let (train, test) = series.split_at(4);

        assert_eq!(train.len() + test.len(), series.len());
        assert_eq!(train.last_date().unwrap().succ_opt(), test.first_date());
        let rejoined: Vec<u64> = train.counts().into_iter().chain(test.counts()).collect();
        assert_eq!(rejoined, series.counts());

        let (all, none) = series.split_at(99);
        assert_eq!(all.len(), 5);
        assert!(none.is_empty());
    }
}
