//! Likes vs dislikes per category as a diverging ("butterfly") bar chart

use charming::{
    Chart,
    component::{Axis, Grid},
    element::{
        AxisLabel, AxisType, Formatter, ItemStyle, Label, LabelPosition, SplitLine, TextStyle,
        Tooltip, Trigger,
    },
    series::Bar,
};
use serde::Serialize;

use super::colors::{COLOR_BAR_BORDER, COLOR_DISLIKES, COLOR_LIKES, COLOR_TEXT};
use super::{base_chart, rows_subtitle};
use crate::dataset::Row;
use crate::pipeline::{CategorySums, category_sums};

/// One side of the diverging chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DivergingSeries {
    pub name: String,
    pub color: String,
    /// Plotted bar values; negative values extend left of zero
    pub values: Vec<i64>,
    /// Displayed labels, always the true count
    pub labels: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DivergingBarSpec {
    pub title: String,
    pub subtitle: String,
    /// Category names in ascending order, one bar pair each
    pub categories: Vec<String>,
    pub left: DivergingSeries,
    pub right: DivergingSeries,
}

fn signed(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

impl DivergingBarSpec {
    /// Lay out per-category sums as likes extending left and dislikes right.
    /// The sums themselves are left untouched; only the plotted values of the
    /// left side are negated.
    pub fn from_sums(sums: &[CategorySums]) -> Self {
        let likes: Vec<u64> = sums.iter().map(|s| s.totals.likes).collect();
        let dislikes: Vec<u64> = sums.iter().map(|s| s.totals.dislikes).collect();
        let rows: usize = sums.iter().map(|s| s.rows).sum();

        Self {
            title: "Total Likes and Dislikes per Category".to_string(),
            subtitle: rows_subtitle(rows, sums.len()),
            categories: sums.iter().map(|s| s.category.clone()).collect(),
            left: DivergingSeries {
                name: "Likes".to_string(),
                color: COLOR_LIKES.to_string(),
                values: likes.iter().map(|&v| -signed(v)).collect(),
                labels: likes,
            },
            right: DivergingSeries {
                name: "Dislikes".to_string(),
                color: COLOR_DISLIKES.to_string(),
                values: dislikes.iter().map(|&v| signed(v)).collect(),
                labels: dislikes,
            },
        }
    }
}

pub(super) fn build(rows: &[&Row]) -> DivergingBarSpec {
    DivergingBarSpec::from_sums(&category_sums(rows))
}

/// Label formatter showing the magnitude of a (possibly negated) bar
fn magnitude_formatter() -> Formatter {
    Formatter::Function(
        "function (params) { return Math.abs(params.value).toLocaleString(); }".into(),
    )
}

/// Axis tooltip listing the true count of each side for the hovered category
fn counts_tooltip() -> Tooltip {
    Tooltip::new().trigger(Trigger::Axis).formatter(Formatter::Function(
        "function (params) { \
            return params[0].name + params.map(function (p) { \
                return '<br/>' + p.marker + p.seriesName + ': ' + Math.abs(p.value).toLocaleString(); \
            }).join(''); \
        }"
        .into(),
    ))
}

fn side(series: &DivergingSeries, position: LabelPosition) -> Bar {
    let data: Vec<f64> = series.values.iter().map(|&v| v as f64).collect();
    Bar::new()
        .name(&series.name)
        .stack("total")
        .data(data)
        .item_style(
            ItemStyle::new()
                .color(series.color.as_str())
                .border_color(COLOR_BAR_BORDER)
                .border_width(0.5),
        )
        .label(
            Label::new()
                .show(true)
                .position(position)
                .color(COLOR_TEXT)
                .font_size(18)
                .formatter(magnitude_formatter()),
        )
}

pub(super) fn render(spec: &DivergingBarSpec) -> Chart {
    base_chart(&spec.title, &spec.subtitle)
        .tooltip(counts_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("6%")
                .bottom("5%")
                .top("15%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().show(false))
                .split_line(SplitLine::new().show(false)),
        )
        // The category axis line sits on x = 0 and divides the two sides
        .y_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(spec.categories.clone())
                .axis_label(AxisLabel::new().color(COLOR_TEXT).font_size(20))
                .name_text_style(TextStyle::new().color(COLOR_TEXT).font_size(24)),
        )
        .series(side(&spec.left, LabelPosition::Left))
        .series(side(&spec.right, LabelPosition::Right))
}
