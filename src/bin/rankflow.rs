//! rankflow - year-over-year ranking flow chart generator.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

use rankflow::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "rankflow", version, about = "Generate year-over-year ranking flow charts")]
struct Cli {
    /// Path to the JSON file with ranking data.
    #[arg(short, long, default_value = "sample_data.json")]
    data: PathBuf,

    /// Output file; `.svg` writes vector output, anything else PNG.
    #[arg(short, long, default_value = "ranking.svg")]
    output: PathBuf,

    /// Chart title.
    #[arg(short, long, default_value = "Top 10 Ranked Items")]
    title: String,

    /// Chart subtitle (defaults to a generated year comparison).
    #[arg(short, long)]
    subtitle: Option<String>,

    /// Maximum number of entries to show.
    #[arg(long, default_value_t = 10)]
    max_entries: u32,

    /// Chart the given year against its predecessor instead of the latest.
    #[arg(long)]
    current_year: Option<String>,

    /// Year label feeding the two-years-back indicator on new entries.
    #[arg(long)]
    two_back: Option<String>,

    /// Infer the two-years-back year from the data when possible.
    #[arg(long, default_value_t = false)]
    infer_two_back: bool,

    /// Path to a JSON transform file applied to every year before charting.
    #[arg(long)]
    transform: Option<PathBuf>,

    /// Force SVG output regardless of the output extension.
    #[arg(long, default_value_t = false)]
    svg: bool,

    /// Output dimensions as WIDTHxHEIGHT.
    #[arg(long, default_value = "1200x1000")]
    size: String,
}

fn parse_size(size: &str) -> anyhow::Result<(u32, u32)> {
    let (w, h) = size
        .split_once('x')
        .with_context(|| format!("invalid size '{size}', expected WIDTHxHEIGHT"))?;
    Ok((w.trim().parse()?, h.trim().parse()?))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let data = DataSet::from_path(&cli.data)
        .with_context(|| format!("failed to load data from {}", cli.data.display()))?;
    tracing::info!(years = data.labels().len(), "loaded ranking data");

    let transforms = match &cli.transform {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read transform file {}", path.display()))?;
            rankflow::transform::parse(&text)?
        }
        None => Vec::new(),
    };

    let (width, height) = parse_size(&cli.size)?;

    let mut chart = RankingChart::new()
        .data(data)
        .title(&cli.title)
        .max_entries(cli.max_entries)
        .dimensions(width, height)
        .transforms(transforms)
        .infer_two_back(cli.infer_two_back);
    if let Some(subtitle) = &cli.subtitle {
        chart = chart.subtitle(subtitle);
    }
    if let Some(year) = &cli.current_year {
        chart = chart.current_year(year);
    }
    if let Some(year) = &cli.two_back {
        chart = chart.two_back(year);
    }
    let chart = chart.build()?;

    if cli.svg {
        chart.write_svg(&cli.output)?;
    } else {
        chart.render_to_file(&cli.output)?;
    }
    tracing::info!(output = %cli.output.display(), "chart written");
    println!("Ranking chart saved to {}", cli.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("1200x1000").unwrap(), (1200, 1000));
        assert_eq!(parse_size("640 x 480").unwrap(), (640, 480));
        assert!(parse_size("1200").is_err());
        assert!(parse_size("axb").is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["rankflow"]);
        assert_eq!(cli.output, PathBuf::from("ranking.svg"));
        assert_eq!(cli.max_entries, 10);
        assert!(!cli.svg);
    }
}
