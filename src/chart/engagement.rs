//! Engagement per category: grouped views/likes/comments bars on a log axis

use charming::{
    Chart,
    component::{Axis, Grid, Legend},
    element::{
        AxisLabel, AxisType, ItemStyle, LineStyle, SplitLine, TextStyle, Tooltip, Trigger,
    },
    series::Bar,
};
use serde::Serialize;

use super::colors::{COLOR_COMMENTS, COLOR_GRID, COLOR_LIKES_BAR, COLOR_TEXT, COLOR_VIEWS};
use super::{base_chart, rows_subtitle};
use crate::dataset::Row;
use crate::pipeline::category_sums;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarSeries {
    pub name: String,
    /// One value per entry of `GroupedBarSpec::categories`
    pub values: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedBarSpec {
    pub title: String,
    pub subtitle: String,
    pub x_label: String,
    pub y_label: String,
    /// Category names in ascending order
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
    pub log_scale: bool,
}

pub(super) fn build(rows: &[&Row]) -> GroupedBarSpec {
    let sums = category_sums(rows);

    let series = vec![
        BarSeries {
            name: "Views".to_string(),
            values: sums.iter().map(|s| s.totals.views).collect(),
        },
        BarSeries {
            name: "Likes".to_string(),
            values: sums.iter().map(|s| s.totals.likes).collect(),
        },
        BarSeries {
            name: "Comments".to_string(),
            values: sums.iter().map(|s| s.totals.comments).collect(),
        },
    ];

    GroupedBarSpec {
        title: "User Engagement per Category".to_string(),
        subtitle: rows_subtitle(rows.len(), sums.len()),
        x_label: "Category".to_string(),
        y_label: "User Engagement".to_string(),
        categories: sums.into_iter().map(|s| s.category).collect(),
        series,
        log_scale: true,
    }
}

fn series_color(idx: usize) -> &'static str {
    [COLOR_VIEWS, COLOR_LIKES_BAR, COLOR_COMMENTS][idx % 3]
}

pub(super) fn render(spec: &GroupedBarSpec) -> Chart {
    let legend_data: Vec<String> = spec.series.iter().map(|s| s.name.clone()).collect();

    let mut chart = base_chart(&spec.title, &spec.subtitle)
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .legend(
            Legend::new()
                .data(legend_data)
                .bottom("3%")
                .item_gap(40)
                .text_style(TextStyle::new().color(COLOR_TEXT).font_size(24)),
        )
        .grid(
            Grid::new()
                .left("4%")
                .right("3%")
                .bottom("10%")
                .top("15%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name(&spec.x_label)
                .name_text_style(TextStyle::new().color(COLOR_TEXT).font_size(24))
                .data(spec.categories.clone())
                .axis_label(AxisLabel::new().color(COLOR_TEXT).font_size(18)),
        )
        .y_axis(
            Axis::new()
                .type_(if spec.log_scale {
                    AxisType::Log
                } else {
                    AxisType::Value
                })
                .name(&spec.y_label)
                .name_text_style(TextStyle::new().color(COLOR_TEXT).font_size(24))
                .axis_label(AxisLabel::new().color(COLOR_TEXT).font_size(20))
                .split_line(
                    SplitLine::new().line_style(LineStyle::new().width(0.5).color(COLOR_GRID)),
                ),
        );

    for (idx, series) in spec.series.iter().enumerate() {
        let data: Vec<f64> = series.values.iter().map(|&v| v as f64).collect();
        chart = chart.series(
            Bar::new()
                .name(&series.name)
                .data(data)
                .item_style(ItemStyle::new().color(series_color(idx))),
        );
    }

    chart
}
