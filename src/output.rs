use colored::*;

use crate::category::CategoryIndex;
use crate::chart::{ChartSpec, DivergingBarSpec, GroupedBarSpec, ScatterSpec, SunburstSpec};
use crate::dataset::{Dataset, MonthAxis, month_label};
use crate::mode::VisualizationMode;
use crate::pipeline::FilterSelection;

/// Width of the name column in tables
const NAME_WIDTH: usize = 24;
/// Width of each number column in tables
const VALUE_WIDTH: usize = 14;
/// Scatter rows listed in the report
const SCATTER_PREVIEW_ROWS: usize = 10;

fn style_label(label: &str) -> ColoredString {
    label.bold()
}

pub(crate) fn print_error(msg: &str) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

pub(crate) fn print_warning(msg: &str) {
    eprintln!("{}: {}", "warning".yellow().bold(), msg);
}

pub(crate) fn get_display_name(filename: &str) -> &str {
    std::path::Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename)
}

/// Format a count with thousands separators (e.g., 1234567 -> "1,234,567")
pub(crate) fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_signed(value: i64) -> String {
    let magnitude = format_count(value.unsigned_abs());
    if value < 0 {
        format!("-{}", magnitude)
    } else {
        magnitude
    }
}

/// Cut a name to fit a table column
fn fit(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let cut: String = name.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

pub(crate) fn print_separator(columns: usize) {
    println!("{}", "-".repeat(NAME_WIDTH + columns * (VALUE_WIDTH + 1)));
}

pub(crate) fn print_header(first: &str, columns: &[&str]) {
    print!("{:<width$}", first, width = NAME_WIDTH);
    for column in columns {
        print!(" {:>width$}", column, width = VALUE_WIDTH);
    }
    println!();
}

fn print_count_row(name: &str, values: &[u64]) {
    print!("{:<width$}", fit(name, NAME_WIDTH), width = NAME_WIDTH);
    for v in values {
        print!(" {:>width$}", format_count(*v), width = VALUE_WIDTH);
    }
    println!();
}

pub(crate) fn print_dataset_info(filename: &str, dataset: &Dataset, axis: Option<&MonthAxis>) {
    let report = dataset.report();
    println!("File: {}", get_display_name(filename));
    println!(
        "Rows: {} loaded, {} skipped",
        format_count(dataset.len() as u64),
        report.skipped.len()
    );
    if report.missing_published > 0 || report.missing_trending > 0 {
        println!(
            "Missing timestamps: {} publishedAt, {} trending_date",
            report.missing_published, report.missing_trending
        );
    }
    if let (Some(min), Some(max)) = (dataset.min_published(), dataset.max_published()) {
        println!(
            "Published: {} to {}",
            min.format("%Y-%m-%d %H:%M"),
            max.format("%Y-%m-%d %H:%M")
        );
    }
    if let Some(axis) = axis {
        println!("Months: {}", axis.len());
    }
    println!();
}

pub(crate) fn print_categories(categories: &CategoryIndex) {
    println!("Categories:");
    if categories.is_empty() {
        println!("  (none)");
    }
    for category in categories.entries() {
        println!("  {:>4}: {}", category.id, category.name);
    }
    println!();
}

pub(crate) fn print_month_axis(axis: &MonthAxis) {
    println!("Months:");
    for (idx, month) in axis.months().iter().enumerate() {
        println!("  {:>4}: {}", idx, month_label(*month));
    }
}

pub(crate) fn print_selection(
    mode: VisualizationMode,
    axis: Option<&MonthAxis>,
    selection: &FilterSelection,
    categories: &CategoryIndex,
    rows: usize,
) {
    println!("{} {}", style_label("Mode:"), mode);

    let (lo, hi) = selection.range;
    match axis.and_then(|a| Some((a.label(lo)?, a.label(hi)?))) {
        Some((from, to)) => println!("{} {} to {}", style_label("Range:"), from, to),
        None => println!("{} -", style_label("Range:")),
    }

    if selection.categories.is_empty() {
        println!("{} all", style_label("Categories:"));
    } else {
        let names: Vec<String> = selection
            .categories
            .iter()
            .map(|id| match categories.name_of(*id) {
                Some(name) => format!("{} ({})", name, id),
                None => format!("? ({})", id),
            })
            .collect();
        println!("{} {}", style_label("Categories:"), names.join(", "));
    }

    println!("{} {}", style_label("Videos:"), format_count(rows as u64));
    println!();
}

/// Print the chart contents as a table
pub(crate) fn print_chart(spec: &ChartSpec) {
    println!("[{}]", spec.title());
    match spec {
        ChartSpec::Scatter(s) => print_scatter(s),
        ChartSpec::GroupedBars(s) => print_grouped_bars(s),
        ChartSpec::DivergingBars(s) => print_diverging(s),
        ChartSpec::Sunburst(s) => print_sunburst(s),
    }
}

fn print_empty() {
    println!("  (no videos match the selection)");
}

fn print_scatter(spec: &ScatterSpec) {
    if spec.points.is_empty() {
        print_empty();
        return;
    }

    println!(
        "{} points in {} categories",
        spec.points.len(),
        spec.categories().len()
    );
    println!();

    print_header("Title", &["Views", "Likes", "Comments", "Days"]);
    print_separator(4);

    let mut by_views: Vec<_> = spec.points.iter().collect();
    by_views.sort_by(|a, b| b.views.cmp(&a.views));
    for point in by_views.iter().take(SCATTER_PREVIEW_ROWS) {
        print!("{:<width$}", fit(&point.title, NAME_WIDTH), width = NAME_WIDTH);
        for v in [point.views, point.likes, point.comments] {
            print!(" {:>width$}", format_count(v), width = VALUE_WIDTH);
        }
        let days = point
            .days_to_trend
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(" {:>width$}", days, width = VALUE_WIDTH);
    }
    if spec.points.len() > SCATTER_PREVIEW_ROWS {
        println!("  ... {} more", spec.points.len() - SCATTER_PREVIEW_ROWS);
    }
}

fn print_grouped_bars(spec: &GroupedBarSpec) {
    if spec.categories.is_empty() {
        print_empty();
        return;
    }

    let names: Vec<&str> = spec.series.iter().map(|s| s.name.as_str()).collect();
    print_header(&spec.x_label, &names);
    print_separator(names.len());

    for (idx, category) in spec.categories.iter().enumerate() {
        let values: Vec<u64> = spec.series.iter().map(|s| s.values[idx]).collect();
        print_count_row(category, &values);
    }

    print_separator(names.len());
    let totals: Vec<u64> = spec
        .series
        .iter()
        .map(|s| s.values.iter().fold(0, |acc: u64, v| acc.saturating_add(*v)))
        .collect();
    print_count_row("TOTAL", &totals);
}

fn print_diverging(spec: &DivergingBarSpec) {
    if spec.categories.is_empty() {
        print_empty();
        return;
    }

    print_header(
        "Category",
        &[spec.left.name.as_str(), spec.right.name.as_str(), "Plotted"],
    );
    print_separator(3);

    for (idx, category) in spec.categories.iter().enumerate() {
        print!("{:<width$}", fit(category, NAME_WIDTH), width = NAME_WIDTH);
        print!(
            " {:>width$}",
            format_count(spec.left.labels[idx]).green(),
            width = VALUE_WIDTH
        );
        print!(
            " {:>width$}",
            format_count(spec.right.labels[idx]).red(),
            width = VALUE_WIDTH
        );
        let plotted = format!(
            "{} | {}",
            format_signed(spec.left.values[idx]),
            format_signed(spec.right.values[idx])
        );
        println!(" {:>width$}", plotted, width = VALUE_WIDTH);
    }
}

fn print_sunburst(spec: &SunburstSpec) {
    if spec.nodes.is_empty() {
        print_empty();
        return;
    }

    print_header("Category / Channel", &["Views"]);
    print_separator(1);

    for node in &spec.nodes {
        print!("{:<width$}", fit(&node.name, NAME_WIDTH), width = NAME_WIDTH);
        println!(
            " {:>width$}",
            format_count(node.value).bold(),
            width = VALUE_WIDTH
        );
        for child in &node.children {
            print_count_row(&format!("  {}", child.name), &[child.value]);
        }
    }

    print_separator(1);
    print_count_row("TOTAL", &[spec.total_value()]);
    println!("Rows used: {}", spec.rows_used);
}

pub(crate) fn print_legend(mode: VisualizationMode) {
    match mode {
        VisualizationMode::ViewsToLikes => {
            println!("Each video is one point: x = views, y = likes, size = comments.");
            println!("Days: whole days from publishing to trending (- when unknown).");
        }
        VisualizationMode::EngagementPerCategory => {
            println!("Views, likes and comments summed per category (log scale in the chart).");
        }
        VisualizationMode::LikesVsDislikes => {
            println!("Likes extend left of zero and dislikes right; labels show true counts.");
            println!("Plotted: signed bar values (likes | dislikes).");
        }
        VisualizationMode::TopChannels => {
            println!(
                "Views per channel for the first {} videos of the selection, in source order.",
                crate::chart::TOP_CHANNEL_ROWS
            );
        }
    }
}
