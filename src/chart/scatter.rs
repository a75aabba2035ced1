//! Views-to-likes scatter (one bubble per row, sized by comments)

use std::collections::BTreeMap;

use charming::{
    Chart,
    component::{Axis, Grid, Legend},
    datatype::CompositeValue,
    element::{
        AxisLabel, AxisType, ItemStyle, LineStyle, SplitLine, TextStyle, Tooltip, Trigger,
    },
    series::Scatter,
};
use serde::Serialize;

use super::colors::{COLOR_GRID, COLOR_TEXT, category_color};
use super::{base_chart, rows_subtitle};
use crate::dataset::Row;
use crate::pipeline::days_to_trend;

/// Largest bubble diameter, given to the row with the most comments
pub const MAX_MARKER_SIZE: f64 = 60.0;
/// Smallest bubble diameter, so rows without comments stay visible
pub const MIN_MARKER_SIZE: f64 = 4.0;
/// Bubble sizes are rounded to this step when rendering
const MARKER_SIZE_STEP: f64 = 4.0;
/// Hover text; `{@[n]}` is dimension n of the data item built in `render`
const TOOLTIP_TEMPLATE: &str = "{a}<br/>{@[4]}<br/>Views: {@[0]}<br/>Likes: {@[1]}\
<br/>Comments: {@[2]}<br/>Days to trend: {@[3]}";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub video_id: String,
    /// Hover title
    pub title: String,
    /// Color group
    pub category: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub days_to_trend: Option<i64>,
    /// Bubble diameter, area-proportional to comments
    pub marker_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSpec {
    pub title: String,
    pub subtitle: String,
    pub x_label: String,
    pub y_label: String,
    pub size_label: String,
    pub color_label: String,
    pub hover_label: String,
    pub points: Vec<ScatterPoint>,
}

impl ScatterSpec {
    /// Distinct point categories in name order
    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.points.iter().map(|p| p.category.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

/// Bubble diameter for `comments`, scaled so that area tracks the count
fn marker_size(comments: u64, max_comments: u64) -> f64 {
    if max_comments == 0 {
        return MIN_MARKER_SIZE;
    }
    let scaled = MAX_MARKER_SIZE * (comments as f64 / max_comments as f64).sqrt();
    scaled.max(MIN_MARKER_SIZE)
}

pub(super) fn build(rows: &[&Row]) -> ScatterSpec {
    let max_comments = rows.iter().map(|r| r.comment_count).max().unwrap_or(0);

    let points: Vec<ScatterPoint> = rows
        .iter()
        .map(|row| ScatterPoint {
            video_id: row.video_id.clone(),
            title: row.title.clone(),
            category: row.category_name.clone(),
            views: row.view_count,
            likes: row.likes,
            comments: row.comment_count,
            days_to_trend: days_to_trend(row),
            marker_size: marker_size(row.comment_count, max_comments),
        })
        .collect();

    let mut spec = ScatterSpec {
        title: "Views to Likes per Video".to_string(),
        subtitle: String::new(),
        x_label: "Number of Views".to_string(),
        y_label: "Number of Likes".to_string(),
        size_label: "Comment Count".to_string(),
        color_label: "Category".to_string(),
        hover_label: "Number of Days Trending".to_string(),
        points,
    };
    spec.subtitle = rows_subtitle(spec.points.len(), spec.categories().len());
    spec
}

pub(super) fn render(spec: &ScatterSpec) -> Chart {
    let categories = spec.categories();

    let mut chart = base_chart(&spec.title, &spec.subtitle)
        .legend(
            Legend::new()
                .data(categories.iter().map(|c| c.to_string()).collect())
                .bottom("3%")
                .item_gap(24)
                .text_style(TextStyle::new().color(COLOR_TEXT).font_size(20)),
        )
        .grid(
            Grid::new()
                .left("5%")
                .right("4%")
                .bottom("12%")
                .top("15%")
                .contain_label(true),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .formatter(TOOLTIP_TEMPLATE),
        )
        .x_axis(value_axis(&spec.x_label))
        .y_axis(value_axis(&spec.y_label));

    // ECharts sizes a whole series at once, so each category is split into
    // one series per size step sharing the category's name and color
    for (idx, category) in categories.iter().enumerate() {
        let mut by_size: BTreeMap<u32, Vec<Vec<CompositeValue>>> = BTreeMap::new();
        for point in spec.points.iter().filter(|p| p.category == *category) {
            let step = (point.marker_size / MARKER_SIZE_STEP).round().max(1.0) as u32;
            by_size.entry(step).or_default().push(vec![
                (point.views as f64).into(),
                (point.likes as f64).into(),
                (point.comments as f64).into(),
                point.days_to_trend.into(),
                point.title.clone().into(),
            ]);
        }

        for (step, data) in by_size {
            chart = chart.series(
                Scatter::new()
                    .name(*category)
                    .symbol_size(step as f64 * MARKER_SIZE_STEP)
                    .item_style(ItemStyle::new().color(category_color(idx)).opacity(0.7))
                    .data(data),
            );
        }
    }

    chart
}

fn value_axis(name: &str) -> Axis {
    Axis::new()
        .type_(AxisType::Value)
        .name(name)
        .name_text_style(TextStyle::new().color(COLOR_TEXT).font_size(24))
        .axis_label(AxisLabel::new().color(COLOR_TEXT).font_size(20))
        .split_line(SplitLine::new().line_style(LineStyle::new().width(0.5).color(COLOR_GRID)))
}
