//! Filter -> aggregate -> chart pipeline
//!
//! [`Dashboard`] bundles the read-only state built once at startup. Each call
//! to [`Dashboard::update`] filters the rows for one selection and hands them
//! to the chart strategy for the requested mode.

mod metrics;

pub use metrics::{CategorySums, Totals, category_sums, days_to_trend};

use std::collections::BTreeSet;

use log::debug;

use crate::category::CategoryIndex;
use crate::chart::{self, ChartSpec};
use crate::dataset::{Dataset, MonthAxis, Row, floor_to_month};
use crate::error::SelectionError;
use crate::mode::VisualizationMode;

/// One user selection: an inclusive month index range and a category set.
/// An empty category set selects every category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub range: (usize, usize),
    pub categories: BTreeSet<u32>,
}

impl FilterSelection {
    /// The whole axis, every category
    pub fn all(axis: &MonthAxis) -> Self {
        Self {
            range: (0, axis.last_index()),
            categories: BTreeSet::new(),
        }
    }

    pub fn new(lo: usize, hi: usize, categories: impl IntoIterator<Item = u32>) -> Self {
        Self {
            range: (lo, hi),
            categories: categories.into_iter().collect(),
        }
    }
}

/// Keep rows published within the selected months and, if any are given,
/// belonging to the selected categories. Source order is preserved.
pub fn filter<'a>(
    rows: &'a [Row],
    axis: &MonthAxis,
    selection: &FilterSelection,
) -> Result<Vec<&'a Row>, SelectionError> {
    let (lo, hi) = selection.range;
    let (start, end) = axis.resolve(lo, hi)?;

    let filtered: Vec<&Row> = rows
        .iter()
        .filter(|row| {
            row.published_at
                .map(|ts| floor_to_month(&ts))
                .is_some_and(|month| start <= month && month <= end)
        })
        .filter(|row| {
            selection.categories.is_empty() || selection.categories.contains(&row.category_id)
        })
        .collect();

    debug!(
        "selection {}..={} with {} categories kept {} of {} rows",
        start,
        end,
        selection.categories.len(),
        filtered.len(),
        rows.len()
    );

    Ok(filtered)
}

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct ChartUpdate {
    /// Rows that passed the filter
    pub matched_rows: usize,
    pub chart: ChartSpec,
}

/// Read-only dashboard state shared by every update
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Dataset,
    categories: CategoryIndex,
    axis: Option<MonthAxis>,
}

impl Dashboard {
    pub fn new(dataset: Dataset) -> Self {
        let categories = CategoryIndex::build(&dataset);
        let axis = dataset.month_axis();
        Self {
            dataset,
            categories,
            axis,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn categories(&self) -> &CategoryIndex {
        &self.categories
    }

    /// Month axis, `None` for a dataset without publish dates
    pub fn axis(&self) -> Option<&MonthAxis> {
        self.axis.as_ref()
    }

    /// Rows matching a selection. A dataset without any publish date has no
    /// axis and yields no rows.
    pub fn select_rows(&self, selection: &FilterSelection) -> Result<Vec<&Row>, SelectionError> {
        match &self.axis {
            Some(axis) => filter(self.dataset.rows(), axis, selection),
            None => Ok(Vec::new()),
        }
    }

    /// Run the full pipeline for one interaction
    pub fn update(
        &self,
        mode: VisualizationMode,
        selection: &FilterSelection,
    ) -> Result<ChartUpdate, SelectionError> {
        let rows = self.select_rows(selection)?;
        Ok(ChartUpdate {
            matched_rows: rows.len(),
            chart: chart::select(mode, &rows),
        })
    }
}

#[cfg(test)]
mod tests;
