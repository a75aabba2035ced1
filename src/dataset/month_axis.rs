//! Month-granularity date axis used for range selection

use chrono::{DateTime, NaiveDate, Utc};

use super::timestamp::{floor_to_month, month_label, next_month, parse_month};
use crate::error::SelectionError;

/// First-of-month dates from the earliest to the latest publish month, inclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthAxis {
    months: Vec<NaiveDate>,
}

impl MonthAxis {
    /// Build the axis spanning `[floor(min), floor(max)]`, one entry per calendar month
    pub fn from_bounds(min: &DateTime<Utc>, max: &DateTime<Utc>) -> Self {
        let first = floor_to_month(min);
        let last = floor_to_month(max).max(first);

        let mut months = vec![first];
        let mut current = first;
        while current < last {
            match next_month(current) {
                Some(next) => {
                    months.push(next);
                    current = next;
                }
                None => break,
            }
        }

        Self { months }
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn months(&self) -> &[NaiveDate] {
        &self.months
    }

    pub fn get(&self, index: usize) -> Option<NaiveDate> {
        self.months.get(index).copied()
    }

    pub fn label(&self, index: usize) -> Option<String> {
        self.get(index).map(month_label)
    }

    /// Index of the last month
    pub fn last_index(&self) -> usize {
        self.months.len() - 1
    }

    /// Index of a `YYYY-MM` month label
    pub fn index_of(&self, raw: &str) -> Result<usize, SelectionError> {
        let month = parse_month(raw).ok_or_else(|| SelectionError::BadMonth(raw.to_string()))?;
        self.months
            .binary_search(&month)
            .map_err(|_| {
                SelectionError::MonthNotOnAxis(
                    month_label(month),
                    month_label(self.months[0]),
                    month_label(self.months[self.last_index()]),
                )
            })
    }

    /// Resolve an index pair to its `(start, end)` months
    pub fn resolve(&self, lo: usize, hi: usize) -> Result<(NaiveDate, NaiveDate), SelectionError> {
        if lo > hi || hi >= self.months.len() {
            return Err(SelectionError::OutOfRange {
                lo,
                hi,
                max: self.last_index(),
            });
        }
        Ok((self.months[lo], self.months[hi]))
    }
}
