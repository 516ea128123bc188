//! CLI command implementations

use clap::Subcommand;

pub mod classify;
pub mod eval;
pub mod list;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Identify the language of texts, files or standard input
    Classify(classify::ClassifyArgs),

    /// Measure precision and recall on labelled samples
    Eval(eval::EvalArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List languages in the loaded frequency tables
    Languages(list::ListLanguagesArgs),

    /// List named corpora and where they are looked up
    Corpora,
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Classify(args) => args.execute(),
            Commands::Eval(args) => args.execute(),
            Commands::List { subcommand } => match subcommand {
                ListCommands::Languages(args) => args.execute(),
                ListCommands::Corpora => list::list_corpora(),
            },
        }
    }
}

/// Initialize logging based on verbosity level
pub fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).try_init();
    }
}
