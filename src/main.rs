use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;

use econoscope::data::load_dataset;
use econoscope::model::{ChartType, RawContext};
use econoscope::narrative::{build_story, describe_chart, get_chart_insights};
use econoscope::processing::{reshape, summarize, ThresholdConfig};

/// Analyze an indicator dataset and print chart data and narrative text.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Dataset file (.json or .csv)
    dataset: PathBuf,

    /// Chart type to reshape for: line, bar, pie, scatter, area or radial
    #[arg(short, long, default_value = "bar")]
    chart_type: String,

    /// Comma-separated indicator names to analyze (default: all)
    #[arg(short, long)]
    indicators: Option<String>,

    /// Print the reshaped dataset as JSON instead of the narrative report
    #[arg(long)]
    json: bool,

    /// Print a multi-section data story for the selected indicators
    #[arg(long)]
    story: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let chart_type: ChartType = args.chart_type.parse().map_err(|e: String| anyhow!(e))?;
    let cfg = ThresholdConfig::default();

    let dataset = load_dataset(&args.dataset)
        .with_context(|| format!("loading {}", args.dataset.display()))?;

    // Narrow to the requested indicators; observation filtering keeps the
    // time context consistent with the selection.
    let indicators: Vec<_> = match &args.indicators {
        Some(names) => {
            let wanted: Vec<String> = names.split(',').map(|n| n.trim().to_lowercase()).collect();
            dataset
                .indicators
                .iter()
                .filter(|i| wanted.contains(&i.name.to_lowercase()))
                .cloned()
                .collect()
        }
        None => dataset.indicators.clone(),
    };
    if indicators.is_empty() {
        return Err(anyhow!("no indicators match the selection"));
    }
    let observations: Vec<_> = dataset
        .observations
        .iter()
        .filter(|o| indicators.iter().any(|i| i.id == o.indicator_id))
        .cloned()
        .collect();
    info!(
        indicators = indicators.len(),
        observations = observations.len(),
        chart_type = chart_type.label(),
        "analyzing selection"
    );

    let chart_data = reshape(&observations, &indicators, chart_type)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&chart_data)?);
        return Ok(());
    }

    if args.story {
        let story = build_story(&observations, &indicators, &cfg);
        println!("# {}\n", story.title);
        for section in &story.sections {
            println!("## {}\n\n{}\n", section.heading, section.body);
        }
        return Ok(());
    }

    let ctx = RawContext::from_observations(&observations);
    println!("{}", describe_chart(chart_type, &chart_data, &indicators[0], &ctx, &cfg));

    let insights = get_chart_insights(chart_type, &chart_data, &cfg);
    if !insights.is_empty() {
        println!();
        for insight in insights {
            println!("- {insight}");
        }
    }

    println!();
    for indicator in &indicators {
        let values: Vec<f64> = observations
            .iter()
            .filter(|o| o.indicator_id == indicator.id)
            .map(|o| o.value)
            .collect();
        print!("{}", summarize(&values).report(&indicator.name));
    }

    Ok(())
}
