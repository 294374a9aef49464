use anyhow::Result;
use clap::Parser;
use increment_version_code::{arguments::Arguments, step};
use log::LevelFilter;

fn main() -> Result<()> {
    let args = Arguments::parse();
    pretty_env_logger::env_logger::builder()
        .filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .format_timestamp(None)
        .init();

    let context = step::execute(&args)?;
    print!("{}", context.render_env());

    Ok(())
}
