//! Trending dataset loading
//!
//! Reads the trending CSV into typed rows. Timestamps that fail to parse are
//! kept as missing values; rows with malformed ids or counts are skipped and
//! recorded in the [`LoadReport`].

mod month_axis;
mod timestamp;

pub use month_axis::MonthAxis;
pub(crate) use timestamp::{floor_to_month, month_label, whole_days_between};

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use csv::StringRecord;
use log::{debug, trace};

use crate::error::{LoadError, SchemaError};
use timestamp::parse_timestamp;

pub const COL_VIDEO_ID: &str = "video_id";
pub const COL_TITLE: &str = "title";
pub const COL_CHANNEL_TITLE: &str = "channelTitle";
pub const COL_CATEGORY_ID: &str = "categoryId";
pub const COL_CATEGORY_NAME: &str = "categoryName";
pub const COL_PUBLISHED_AT: &str = "publishedAt";
pub const COL_TRENDING_DATE: &str = "trending_date";
pub const COL_VIEW_COUNT: &str = "view_count";
pub const COL_LIKES: &str = "likes";
pub const COL_DISLIKES: &str = "dislikes";
pub const COL_COMMENT_COUNT: &str = "comment_count";

/// Columns that must be present in the source header
pub const REQUIRED_COLUMNS: [&str; 11] = [
    COL_VIDEO_ID,
    COL_TITLE,
    COL_CHANNEL_TITLE,
    COL_CATEGORY_ID,
    COL_CATEGORY_NAME,
    COL_PUBLISHED_AT,
    COL_TRENDING_DATE,
    COL_VIEW_COUNT,
    COL_LIKES,
    COL_DISLIKES,
    COL_COMMENT_COUNT,
];

/// One trending-video observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub category_id: u32,
    pub category_name: String,
    pub published_at: Option<DateTime<Utc>>,
    pub trending_date: Option<DateTime<Utc>>,
    pub view_count: u64,
    pub likes: u64,
    pub dislikes: u64,
    pub comment_count: u64,
}

/// A source row that was dropped during loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the source (header is line 1)
    pub line: usize,
    pub reason: String,
}

/// Summary of what happened while loading
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub skipped: Vec<SkippedRow>,
    pub missing_published: usize,
    pub missing_trending: usize,
}

/// The loaded, immutable trending dataset
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Vec<Row>,
    published_bounds: Option<(DateTime<Utc>, DateTime<Utc>)>,
    report: LoadReport,
}

impl Dataset {
    /// Load the dataset from a CSV file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Load the dataset from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let columns = ColumnMap::from_headers(&headers)?;

        let mut rows = Vec::new();
        let mut report = LoadReport::default();

        for (idx, result) in reader.records().enumerate() {
            let line = idx + 2;
            report.rows_read += 1;

            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    trace!("line {}: skipped, {}", line, e);
                    report.skipped.push(SkippedRow {
                        line,
                        reason: format!("CSV parse error: {e}"),
                    });
                    continue;
                }
            };

            match columns.parse_row(&record) {
                Ok(row) => {
                    if row.published_at.is_none() {
                        report.missing_published += 1;
                    }
                    if row.trending_date.is_none() {
                        report.missing_trending += 1;
                    }
                    rows.push(row);
                }
                Err(reason) => {
                    trace!("line {}: skipped, {}", line, reason);
                    report.skipped.push(SkippedRow { line, reason });
                }
            }
        }

        if !rows.is_empty() && report.missing_published == rows.len() {
            return Err(LoadError::UnparseableColumn {
                column: COL_PUBLISHED_AT,
            });
        }

        Ok(Self::from_parts(rows, report))
    }

    /// Build a dataset from already-typed rows
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let report = LoadReport {
            rows_read: rows.len(),
            skipped: Vec::new(),
            missing_published: rows.iter().filter(|r| r.published_at.is_none()).count(),
            missing_trending: rows.iter().filter(|r| r.trending_date.is_none()).count(),
        };
        Self::from_parts(rows, report)
    }

    fn from_parts(rows: Vec<Row>, report: LoadReport) -> Self {
        let published_bounds = rows
            .iter()
            .filter_map(|r| r.published_at)
            .fold(None, |bounds, ts| match bounds {
                None => Some((ts, ts)),
                Some((min, max)) => Some((min.min(ts), max.max(ts))),
            });

        debug!(
            "loaded {} rows ({} skipped, {} without publish date)",
            rows.len(),
            report.skipped.len(),
            report.missing_published
        );

        Self {
            rows,
            published_bounds,
            report,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Earliest and latest publish timestamps, `None` when no row has one
    pub fn published_bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.published_bounds
    }

    pub fn min_published(&self) -> Option<DateTime<Utc>> {
        self.published_bounds.map(|(min, _)| min)
    }

    pub fn max_published(&self) -> Option<DateTime<Utc>> {
        self.published_bounds.map(|(_, max)| max)
    }

    /// Month axis spanning the publish range
    pub fn month_axis(&self) -> Option<MonthAxis> {
        self.published_bounds
            .map(|(min, max)| MonthAxis::from_bounds(&min, &max))
    }
}

/// Positions of the required columns in the source header
struct ColumnMap {
    indices: HashMap<&'static str, usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, SchemaError> {
        let by_name: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (normalize_header(name), idx))
            .collect();

        let mut indices = HashMap::new();
        let mut missing = Vec::new();
        for column in REQUIRED_COLUMNS {
            match by_name.get(column) {
                Some(&idx) => {
                    indices.insert(column, idx);
                }
                None => missing.push(column.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(SchemaError { missing });
        }
        Ok(Self { indices })
    }

    fn field<'r>(&self, record: &'r StringRecord, column: &'static str) -> Result<&'r str, String> {
        self.indices
            .get(column)
            .and_then(|&idx| record.get(idx))
            .ok_or_else(|| format!("missing value for '{column}'"))
    }

    fn count(&self, record: &StringRecord, column: &'static str) -> Result<u64, String> {
        let raw = self.field(record, column)?.trim();
        raw.parse::<u64>()
            .map_err(|_| format!("invalid {column} '{raw}'"))
    }

    fn parse_row(&self, record: &StringRecord) -> Result<Row, String> {
        let category_raw = self.field(record, COL_CATEGORY_ID)?.trim();
        let category_id = category_raw
            .parse::<u32>()
            .map_err(|_| format!("invalid {COL_CATEGORY_ID} '{category_raw}'"))?;

        Ok(Row {
            video_id: self.field(record, COL_VIDEO_ID)?.to_string(),
            title: self.field(record, COL_TITLE)?.to_string(),
            channel_title: self.field(record, COL_CHANNEL_TITLE)?.to_string(),
            category_id,
            category_name: self.field(record, COL_CATEGORY_NAME)?.trim().to_string(),
            published_at: parse_timestamp(self.field(record, COL_PUBLISHED_AT)?),
            trending_date: parse_timestamp(self.field(record, COL_TRENDING_DATE)?),
            view_count: self.count(record, COL_VIEW_COUNT)?,
            likes: self.count(record, COL_LIKES)?,
            dislikes: self.count(record, COL_DISLIKES)?,
            comment_count: self.count(record, COL_COMMENT_COUNT)?,
        })
    }
}

/// Trim a header name and drop a leading UTF-8 BOM
fn normalize_header(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_string()
}

#[cfg(test)]
pub(crate) mod fixtures;
