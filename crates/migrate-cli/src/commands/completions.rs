//! Shell completion generation command.
//!
//! Generates completion scripts for bash, zsh, fish, elvish and `PowerShell`.

use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use glide_migrate_core::cli::ExitCode;
use std::io::{self, Write};
use tracing::info;

/// Writes the completion script for `shell` to `out`.
///
/// # Examples
///
/// ```
/// use clap::Command;
/// use clap_complete::Shell;
/// use glide_migrate_cli::commands::completions;
///
/// let mut cmd = Command::new("glide-migrate");
/// let mut script = Vec::new();
/// completions::generate_completions(Shell::Bash, &mut cmd, &mut script);
/// assert!(String::from_utf8(script).unwrap().contains("glide-migrate"));
/// ```
pub fn generate_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    info!("Generating {shell} completions");
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Runs the completions command, printing the script to stdout.
pub fn run(shell: Shell, cmd: &mut Command) -> Result<ExitCode> {
    generate_completions(shell, cmd, &mut io::stdout().lock());
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut cmd = Command::new("glide-migrate").subcommand(Command::new("validate"));
        let mut out = Vec::new();
        generate_completions(shell, &mut cmd, &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_bash_completions_list_subcommands() {
        assert!(script(Shell::Bash).contains("validate"));
    }

    #[test]
    fn test_every_shell_generates() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            assert!(!script(shell).is_empty(), "{shell} produced no output");
        }
    }
}
