use std::{error::Error, path::PathBuf};
use clap::{ArgAction, Parser};
use log::{info, LevelFilter};
use solver_timings::bench;

/// Plot ECOS vs. EiCOS average solve times on the portfolio benchmark
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// write the chart to this file (format from the extension)
    /// instead of opening a window
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// resolution of the saved image
    #[arg(long, requires = "output")]
    dpi: Option<f64>,

    /// title of the x-axis
    #[arg(long, default_value = bench::XLABEL)]
    xlabel: String,

    /// matplotlib style sheet
    #[arg(long, default_value = bench::DEFAULT_STYLE)]
    style: String,

    /// use matplotlib's default style
    #[arg(long, conflicts_with = "style")]
    no_style: bool,

    /// print the timings as a table and exit
    #[arg(long)]
    table: bool,

    /// more log output (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let mut chart = bench::portfolio().xlabel(&cli.xlabel);
    chart = if cli.no_style { chart.no_style() } else { chart.style(&cli.style) };

    if cli.table {
        print!("{}", chart);
        return Ok(())
    }
    match &cli.output {
        Some(path) => chart.save(path, cli.dpi)?,
        None => {
            info!("rendering {} problem sizes", chart.labels().len());
            chart.show()?
        }
    }
    Ok(())
}
