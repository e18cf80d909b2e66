use std::path::Path;

use clap::Parser;
use cost_report::pipeline;

fn main() {
    let _cli = Cli::parse();
    if let Err(error) = pipeline::execute(Path::new(".")) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

/// Takes no options: inputs and output come from `cost-report.json` in the
/// working directory, or the built-in defaults.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Summarise desktop and notebook cost data into an Excel report."
)]
struct Cli {}
