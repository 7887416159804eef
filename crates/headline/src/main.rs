use crate::prelude::*;
use clap::Parser;

mod build;
mod error;
mod options;
mod prelude;
mod report;
mod show;
mod source;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Convert headline classification prompts into flat JSON Lines records"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "HEADLINE_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Convert every sample of the dataset into a JSON Lines file
    Build(crate::build::BuildOptions),

    /// Transform a single sample and print it
    Show(crate::show::ShowOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Build(options) => crate::build::run(options, app.global).await,
        SubCommands::Show(options) => crate::show::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
