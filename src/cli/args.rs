use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "thub")]
#[command(about = "Multi-engine translation hub with ordered fallback")]
#[command(version)]
pub struct Args {
    /// Text to translate (reads from stdin if neither TEXT nor --file is given)
    pub text: Option<String>,

    /// Read the text to translate from a file
    #[arg(short = 'F', long)]
    pub file: Option<String>,

    /// Source language code (e.g., en)
    #[arg(short = 'f', long = "from")]
    pub from: Option<String>,

    /// Target language code (e.g., fr)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Restrict the request to one named engine (e.g., deepl)
    #[arg(short = 'e', long)]
    pub engine: Option<String>,

    /// Print the full JSON response envelope instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Suppress status output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report usage and quota for every configured engine
    Usage {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List configured engines in fallback order
    Engines,
}
