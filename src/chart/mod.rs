//! Chart construction and rendering
//!
//! [`select`] turns filtered rows into a [`ChartSpec`] for one visualization
//! mode. The spec is plain data; [`to_echarts`] and [`render_image`] turn it
//! into an ECharts option or an image.

mod colors;
mod diverging;
mod engagement;
mod scatter;
mod sunburst;

pub use diverging::{DivergingBarSpec, DivergingSeries};
pub use engagement::{BarSeries, GroupedBarSpec};
pub use scatter::{ScatterPoint, ScatterSpec};
pub use sunburst::{PartitionNode, SunburstSpec, TOP_CHANNEL_ROWS};

use std::path::Path;

use charming::{
    Chart, ImageRenderer,
    component::Title,
    element::{Color, TextStyle},
    renderer::ImageFormat,
};
use serde::Serialize;

use crate::dataset::Row;
use crate::error::RenderError;
use crate::mode::VisualizationMode;
use colors::{COLOR_BACKGROUND, COLOR_TEXT};

/// Chart height for every mode (2x for Retina quality)
pub(super) const CHART_HEIGHT: u32 = 1200;

/// Renderable output of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Scatter(ScatterSpec),
    GroupedBars(GroupedBarSpec),
    DivergingBars(DivergingBarSpec),
    Sunburst(SunburstSpec),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Scatter(s) => &s.title,
            ChartSpec::GroupedBars(s) => &s.title,
            ChartSpec::DivergingBars(s) => &s.title,
            ChartSpec::Sunburst(s) => &s.title,
        }
    }

    /// True when the chart has nothing to plot
    pub fn is_empty(&self) -> bool {
        match self {
            ChartSpec::Scatter(s) => s.points.is_empty(),
            ChartSpec::GroupedBars(s) => s.categories.is_empty(),
            ChartSpec::DivergingBars(s) => s.categories.is_empty(),
            ChartSpec::Sunburst(s) => s.nodes.is_empty(),
        }
    }

    /// Output image size in pixels
    fn dimensions(&self) -> (u32, u32) {
        match self {
            ChartSpec::Scatter(_) => (3600, CHART_HEIGHT),
            ChartSpec::GroupedBars(_) => (3800, CHART_HEIGHT),
            ChartSpec::DivergingBars(_) => (2800, CHART_HEIGHT),
            ChartSpec::Sunburst(_) => (1600, CHART_HEIGHT),
        }
    }
}

/// Build the chart for a mode from already-filtered rows
pub fn select(mode: VisualizationMode, rows: &[&Row]) -> ChartSpec {
    match mode {
        VisualizationMode::ViewsToLikes => ChartSpec::Scatter(scatter::build(rows)),
        VisualizationMode::EngagementPerCategory => {
            ChartSpec::GroupedBars(engagement::build(rows))
        }
        VisualizationMode::LikesVsDislikes => ChartSpec::DivergingBars(diverging::build(rows)),
        VisualizationMode::TopChannels => ChartSpec::Sunburst(sunburst::build(rows)),
    }
}

/// Convert a spec into an ECharts chart
pub fn to_echarts(spec: &ChartSpec) -> Chart {
    match spec {
        ChartSpec::Scatter(s) => scatter::render(s),
        ChartSpec::GroupedBars(s) => engagement::render(s),
        ChartSpec::DivergingBars(s) => diverging::render(s),
        ChartSpec::Sunburst(s) => sunburst::render(s),
    }
}

/// ECharts option JSON for a spec
pub fn echarts_json(spec: &ChartSpec) -> String {
    to_echarts(spec).to_string()
}

/// Render a spec to a PNG file, or SVG when the path ends in `.svg`
pub fn render_image(spec: &ChartSpec, output_path: &str) -> Result<(), RenderError> {
    let chart = to_echarts(spec);
    let (width, height) = spec.dimensions();
    let mut renderer = ImageRenderer::new(width, height);

    let is_svg = Path::new(output_path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    let result = if is_svg {
        renderer.save(&chart, output_path)
    } else {
        renderer.save_format(ImageFormat::Png, &chart, output_path)
    };
    result.map_err(|e| RenderError(e.to_string()))
}

/// Dark background chart with a centered title
pub(super) fn base_chart(title: &str, subtitle: &str) -> Chart {
    Chart::new()
        .background_color(Color::Value(COLOR_BACKGROUND.to_string()))
        .title(
            Title::new()
                .text(title)
                .subtext(subtitle)
                .left("center")
                .top("3%")
                .text_style(TextStyle::new().color(COLOR_TEXT).font_size(36))
                .subtext_style(TextStyle::new().color(COLOR_TEXT).font_size(24)),
        )
}

/// Subtitle shared by the category charts
pub(super) fn rows_subtitle(rows: usize, categories: usize) -> String {
    format!(
        "{} {} across {} {}",
        rows,
        if rows == 1 { "video" } else { "videos" },
        categories,
        if categories == 1 { "category" } else { "categories" }
    )
}
