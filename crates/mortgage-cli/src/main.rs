mod output;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;

use mortgage_core::config;
use mortgage_core::scenario;

/// Combined housing-fund and commercial mortgage planner
#[derive(Parser)]
#[command(
    name = "mtg",
    version,
    about = "Combined housing-fund and commercial mortgage planner",
    long_about = "Computes repayment schedules for a combined public-housing-fund \
                  and commercial mortgage under 等额本息 and 等额本金, and renders \
                  the four resulting scenarios as console tables, an xlsx workbook \
                  and a markdown report."
)]
struct Cli {
    /// Path to the key=value configuration file
    #[arg(default_value = "config.txt")]
    config: PathBuf,

    /// Directory for the generated reports (defaults to the config file's directory)
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let params = config::load_config(&cli.config)?;
    let report = scenario::build_report(&params)?;

    let out_dir = match &cli.out_dir {
        Some(dir) => dir.clone(),
        None => cli
            .config
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    output::write_reports(&out_dir, &report)?;

    for (name, result) in &report {
        output::table::print_scenario(name, result);
    }

    Ok(())
}
