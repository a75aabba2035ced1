mod category;
mod chart;
mod dataset;
mod error;
mod mode;
mod output;
mod pipeline;

use std::path::Path;

use clap::Parser;
use log::debug;

use dataset::{Dataset, MonthAxis};
use error::SelectionError;
use mode::VisualizationMode;
use output::{
    print_categories, print_chart, print_dataset_info, print_error, print_legend,
    print_month_axis, print_selection, print_warning,
};
use pipeline::{Dashboard, FilterSelection};

const DEFAULT_DATASET: &str = "Updated_US_youtube_trending_data.csv";

#[derive(Parser)]
#[command(
    name = "trendscope",
    version,
    about = "Trending video dashboard: filter, aggregate and chart YouTube trending data",
    after_help = "Examples:
  trendscope                                          Views to likes, whole dataset
  trendscope data.csv -m engagement                   Engagement per category
  trendscope data.csv -m likes-dislikes -c 10,24      Likes vs dislikes for two categories
  trendscope data.csv --from 2021-01 --to 2021-06     Restrict to a month range
  trendscope data.csv -m top-channels --image c.png   Output sunburst chart
  trendscope data.csv --list-months                   Show the month axis
  trendscope --no-color data.csv                      Disable colored output

Modes: views-likes, engagement, likes-dislikes, top-channels"
)]
struct Args {
    /// Trending videos CSV
    #[arg(default_value = DEFAULT_DATASET)]
    file: String,

    /// Visualization mode
    #[arg(short, long, default_value = "views-likes", value_name = "MODE")]
    mode: String,

    /// First month of the range
    #[arg(long, value_name = "YYYY-MM", conflicts_with = "range")]
    from: Option<String>,

    /// Last month of the range (inclusive)
    #[arg(long, value_name = "YYYY-MM", conflicts_with = "range")]
    to: Option<String>,

    /// Month axis indices, inclusive (see --list-months)
    #[arg(long, value_name = "LO:HI")]
    range: Option<String>,

    /// Category IDs to include (default: all)
    #[arg(
        short = 'c',
        long = "category",
        value_name = "ID",
        value_delimiter = ','
    )]
    categories: Vec<u32>,

    /// Print the month axis with indices and exit
    #[arg(long)]
    list_months: bool,

    /// Print the chart data as JSON instead of the report
    #[arg(long)]
    json: bool,

    /// Suppress explanations (show data only)
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Output chart as PNG image (SVG when the path ends in .svg)
    #[arg(long, value_name = "PATH")]
    image: Option<String>,

    /// Output the ECharts option as JSON
    #[arg(long, value_name = "PATH")]
    echarts: Option<String>,
}

fn fail(msg: &str) -> ! {
    print_error(msg);
    std::process::exit(1);
}

/// Parse "LO:HI" into axis indices
fn parse_range(raw: &str) -> Option<(usize, usize)> {
    let (lo, hi) = raw.split_once(':')?;
    Some((lo.trim().parse().ok()?, hi.trim().parse().ok()?))
}

/// Resolve the month range flags against the axis
fn resolve_range(args: &Args, axis: Option<&MonthAxis>) -> Result<(usize, usize), String> {
    let Some(axis) = axis else {
        if args.range.is_some() || args.from.is_some() || args.to.is_some() {
            return Err(SelectionError::EmptyAxis.to_string());
        }
        return Ok((0, 0));
    };

    if let Some(ref raw) = args.range {
        return parse_range(raw)
            .ok_or_else(|| format!("invalid range '{}' (expected LO:HI)", raw));
    }

    let lo = match args.from {
        Some(ref month) => axis.index_of(month).map_err(|e| e.to_string())?,
        None => 0,
    };
    let hi = match args.to {
        Some(ref month) => axis.index_of(month).map_err(|e| e.to_string())?,
        None => axis.last_index(),
    };
    Ok((lo, hi))
}

fn load_dataset(filename: &str) -> Dataset {
    let dataset = Dataset::load(filename).unwrap_or_else(|e| fail(&e.to_string()));

    let skipped = &dataset.report().skipped;
    if let Some(first) = skipped.first() {
        print_warning(&format!(
            "{} malformed row(s) skipped (first at line {}: {})",
            skipped.len(),
            first.line,
            first.reason
        ));
    }

    dataset
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    // Handle --no-color
    if args.no_color {
        colored::control::set_override(false);
    }

    let mode: VisualizationMode = args.mode.parse().unwrap_or_else(|e: error::InvalidModeError| {
        fail(&format!(
            "{} (expected one of: {})",
            e,
            VisualizationMode::ALL.map(|m| m.cli_name()).join(", ")
        ))
    });

    // Validate output paths
    for path in [args.image.as_deref(), args.echarts.as_deref()]
        .into_iter()
        .flatten()
    {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fail(&format!("Directory does not exist: {}", parent.display()));
        }
    }

    let dashboard = Dashboard::new(load_dataset(&args.file));
    let axis = dashboard.axis();

    if args.list_months {
        match axis {
            Some(axis) => print_month_axis(axis),
            None => print_warning("dataset has no publish dates"),
        }
        return;
    }

    for id in &args.categories {
        if !dashboard.categories().contains(*id) {
            print_warning(&format!("unknown category ID {}", id));
        }
    }

    let (lo, hi) = resolve_range(&args, axis).unwrap_or_else(|e| fail(&e));
    let selection = FilterSelection::new(lo, hi, args.categories.iter().copied());
    debug!("mode {:?}, selection {:?}", mode, selection);

    let update = dashboard
        .update(mode, &selection)
        .unwrap_or_else(|e| fail(&e.to_string()));

    if args.json {
        match serde_json::to_string_pretty(&update.chart) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&format!("failed to serialize chart: {}", e)),
        }
    } else {
        if !args.quiet {
            print_dataset_info(&args.file, dashboard.dataset(), axis);
            print_categories(dashboard.categories());
        }

        print_selection(
            mode,
            axis,
            &selection,
            dashboard.categories(),
            update.matched_rows,
        );
        print_chart(&update.chart);

        if !args.quiet {
            println!();
            print_legend(mode);
        }
    }

    // Output chart image if requested
    if let Some(ref path) = args.image {
        if let Err(e) = chart::render_image(&update.chart, path) {
            fail(&e.to_string());
        }
        eprintln!("Chart saved to: {}", path);
    }

    if let Some(ref path) = args.echarts {
        if let Err(e) = std::fs::write(path, chart::echarts_json(&update.chart)) {
            fail(&format!("cannot write '{}': {}", path, e));
        }
        eprintln!("ECharts option saved to: {}", path);
    }
}
