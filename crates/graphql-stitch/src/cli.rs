use clap::CommandFactory;
use crate::commands;

#[derive(clap::Parser, Debug)]
#[command(name = "graphql-stitch", version)]
pub(crate) struct Cli {
    #[arg(
        global=true,
        help="Alias marking fields the query planner injected for its own \
             use. Overrides the marker of every stitch case.",
        long,
    )]
    pub artificial_field_marker: Option<String>,

    #[command(subcommand)]
    pub(crate) cmd: Option<commands::CommandEnum>,

    #[arg(
        help="Enable verbose output.",
        long,
        short='v',
    )]
    pub verbose: bool,
}
impl Cli {
    pub(crate) async fn run_default(self) -> anyhow::Result<()> {
        Self::command().print_help()?;
        Ok(())
    }
}
