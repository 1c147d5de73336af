use crate::Cli;
use crate::CommandResult;

/// A `graphql-stitch` subcommand.
///
/// Commands report through the returned [`CommandResult`] rather than
/// printing, so `main` decides where output goes and which exit code to use.
pub(crate) trait RunnableCommand: std::fmt::Debug {
    /// The subcommand name as typed on the command line.
    fn name(&self) -> &'static str;

    async fn run(self, cli: Cli) -> CommandResult;
}
