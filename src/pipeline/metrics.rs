//! Derived metrics: time-to-trend and per-category sums

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dataset::{Row, whole_days_between};

/// Whole days between publishing and trending, `None` when either date is missing.
/// Negative spans from malformed input are passed through.
pub fn days_to_trend(row: &Row) -> Option<i64> {
    match (&row.published_at, &row.trending_date) {
        (Some(published), Some(trending)) => Some(whole_days_between(published, trending)),
        _ => None,
    }
}

/// Engagement totals over a set of rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub dislikes: u64,
}

impl Totals {
    /// Saturates at `u64::MAX` rather than wrapping
    fn add(&mut self, row: &Row) {
        self.views = self.views.saturating_add(row.view_count);
        self.likes = self.likes.saturating_add(row.likes);
        self.comments = self.comments.saturating_add(row.comment_count);
        self.dislikes = self.dislikes.saturating_add(row.dislikes);
    }

    /// Totals over every row
    pub fn of<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Self {
        let mut totals = Totals::default();
        for row in rows {
            totals.add(row);
        }
        totals
    }
}

/// Summed engagement for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySums {
    pub category: String,
    pub rows: usize,
    pub totals: Totals,
}

/// Group rows by category name and sum each metric. Output is sorted by
/// category name so parallel series line up.
pub fn category_sums(rows: &[&Row]) -> Vec<CategorySums> {
    let mut groups: BTreeMap<&str, (usize, Totals)> = BTreeMap::new();
    for row in rows {
        let (count, totals) = groups.entry(row.category_name.as_str()).or_default();
        *count += 1;
        totals.add(row);
    }

    groups
        .into_iter()
        .map(|(category, (rows, totals))| CategorySums {
            category: category.to_string(),
            rows,
            totals,
        })
        .collect()
}
