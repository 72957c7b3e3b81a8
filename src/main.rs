use anyhow::Result;
use clap::Parser;

use thub::cli::commands::{engines, translate, usage};
use thub::cli::{Args, Command};
use thub::output::{self, OutputConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        ..OutputConfig::default()
    });

    match args.command {
        Some(Command::Usage { json }) => {
            usage::run_usage(json).await?;
        }
        Some(Command::Engines) => {
            engines::print_engines()?;
        }
        None => {
            let options = translate::TranslateOptions {
                text: args.text,
                file: args.file,
                from: args.from,
                to: args.to,
                engine: args.engine,
                json: args.json,
            };
            translate::run_translate(options).await?;
        }
    }

    Ok(())
}
