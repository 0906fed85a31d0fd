use std::path::PathBuf;
use std::process::ExitCode;

use aeye_icons::checklist::{print_summary, run_all, ProjectLayout};
use aeye_icons::cli::init_logging;
use clap::Parser;

#[derive(Debug, Parser)]
#[clap(
    name = "validate-pwa",
    about = "Check that a web app project has everything browsers need to offer installation"
)]
struct Args {
    /// Project root containing public/ and src/app/.
    #[clap(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let project = ProjectLayout::under(&args.root);
    let summary = run_all(&project);
    print_summary(&project, &summary);

    if summary.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
