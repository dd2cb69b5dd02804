use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;
use wallcal::{
    calendar::{MAX_YEAR, MIN_YEAR},
    config::Config,
    consts::{DEFAULT_OUTPUT_DIR, DEFAULT_YEAR},
    generate, logging,
};

#[derive(Parser, Debug)]
#[command(
    name = "wallcal",
    author = "Erik Hollensbe <git@hollensbe.org>",
    version,
    about = "Render a year of calendar wallpapers, one image per background theme"
)]
struct ArgParser {
    #[arg(help = "Year to render (1900-2100)", default_value_t = DEFAULT_YEAR, allow_negative_numbers = true)]
    year: i32,
    #[arg(short, long, help = "Directory to write images into", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
    #[arg(short, long, help = "Configuration file (default ~/.wallcal.conf)")]
    config: Option<PathBuf>,
    #[arg(long, help = "Mark the Lunar New Year holiday window")]
    lunar: bool,
    #[arg(long, help = "Render themes concurrently")]
    parallel: bool,
    #[arg(long, help = "Write the effective configuration back to the config file")]
    save_config: bool,
    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    verbose: u8,
}

fn run(cli: ArgParser) -> Result<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&cli.year) {
        return Err(anyhow!(
            "Year must be between {} and {}",
            MIN_YEAR,
            MAX_YEAR
        ));
    }

    let mut config = Config::load(cli.config.clone())?;
    if cli.lunar {
        config.set_lunar_enabled(true);
    }
    if cli.parallel {
        config.set_parallel(true);
    }

    if cli.save_config {
        config.save(cli.config.clone())?;
    }

    println!("Generating calendar for year {}...", cli.year);

    let report = generate(cli.year, &config, &cli.output_dir)?;
    for path in &report.written {
        println!("Wallpaper generated: {}", path.display());
    }

    if !report.is_success() {
        for failure in &report.failures {
            eprintln!("Error: theme '{}': {}", failure.theme, failure.error);
        }

        return Err(anyhow!(
            "{} of {} themes failed",
            report.failures.len(),
            report.failures.len() + report.written.len()
        ));
    }

    println!("Done!");
    Ok(())
}

fn main() {
    let cli = ArgParser::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
