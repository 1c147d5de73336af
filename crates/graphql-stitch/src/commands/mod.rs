mod stitch;
#[cfg(test)]
mod tests;

use crate::Cli;
use crate::CommandResult;
use stitch::StitchCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "graphql-stitch")]
pub(crate) enum CommandEnum {
    /// Stitch the raw result of each stitch case file and print the
    /// overall result.
    Stitch(Box<StitchCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Stitch(cmd) => {
                log::debug!("Running `{}`...", cmd.name());
                cmd.run(cli).await
            },
        }
    }
}
