//! # Shell Completion Module
//!
//! Generates completion scripts for the shells clap_complete supports.
//!
//! ## Usage
//!
//! ```bash
//! # Generate bash completions
//! encore completion bash > ~/.local/share/bash-completion/completions/encore
//!
//! # Generate zsh completions
//! encore completion zsh > ~/.config/zsh/completions/_encore
//! ```

use crate::cli::Shell;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io;

/// Generate shell completions for the given shell
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Convert our CLI shell enum to clap_complete's shell type
#[must_use]
pub fn shell_to_completion_shell(shell: &Shell) -> CompletionShell {
    match shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_mapping_covers_all_variants() {
        assert_eq!(
            shell_to_completion_shell(&Shell::Bash),
            CompletionShell::Bash
        );
        assert_eq!(shell_to_completion_shell(&Shell::Zsh), CompletionShell::Zsh);
        assert_eq!(
            shell_to_completion_shell(&Shell::Fish),
            CompletionShell::Fish
        );
        assert_eq!(
            shell_to_completion_shell(&Shell::PowerShell),
            CompletionShell::PowerShell
        );
        assert_eq!(
            shell_to_completion_shell(&Shell::Elvish),
            CompletionShell::Elvish
        );
    }
}
