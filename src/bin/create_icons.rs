use aeye_icons::cli::{init_logging, GenerateArgs};
use aeye_icons::icon_gen::generate_icons;
use aeye_icons::style::LogoStyle;
use anyhow::Result;
use clap::Parser;

#[derive(Debug, Parser)]
#[clap(
    name = "create-icons",
    about = "Render the AEYE.NG icon set with the radial navy background"
)]
struct Args {
    #[clap(flatten)]
    generate: GenerateArgs,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let report = generate_icons(&args.generate.into_options(LogoStyle::classic()))?;
    println!();
    println!(
        "Done: {} icons written, {} failed, favicon {:?}",
        report.written.len(),
        report.failed.len(),
        report.favicon
    );
    Ok(())
}
