//! Shell completions generation command
//!
//! Usage: `drivebox completions bash > ~/.local/share/bash-completion/completions/drivebox`

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;

use crate::output::OutputFormat;

/// Arguments for the completions subcommand
#[derive(Debug, clap::Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for (bash, zsh, fish, elvish, powershell)
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Generate the completion script on stdout
    pub async fn execute(&self, _format: OutputFormat) -> Result<()> {
        let mut command = crate::Cli::command();
        let bin_name = command.get_name().to_string();
        clap_complete::generate(self.shell, &mut command, bin_name, &mut io::stdout());
        Ok(())
    }
}
