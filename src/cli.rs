//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Config file name looked up when `-C` is not given.
pub const DEFAULT_CONFIG: &str = "docbuild.toml";

/// docbuild documentation pipeline CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about = "Builds AsciiDoc and rustdoc web pages.", long_about = None)]
pub struct Cli {
    /// Config file name (default: docbuild.toml)
    #[arg(short = 'C', long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// subcommands; full build when omitted
    #[command(subcommand)]
    pub command: Option<Action>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Action {
    /// Build AsciiDoc and rustdoc web pages
    Build,

    /// Build AsciiDoc web pages only (no API-doc step)
    Adoc,

    /// Cross-build the wasm artifact and publish it with the docs
    Wasm,

    /// Start a local preview server over the output directory
    Http {
        /// Port to bind (default: 8888)
        #[arg(short, long)]
        port: Option<u16>,

        /// Open the browser at the primary document
        #[arg(long)]
        open: bool,
    },
}

impl Cli {
    /// The selected action; a bare invocation means a full build.
    pub fn action(&self) -> Action {
        self.command.clone().unwrap_or(Action::Build)
    }
}

impl Action {
    /// Whether this action invokes the external renderer.
    pub const fn renders(&self) -> bool {
        matches!(self, Self::Build | Self::Adoc | Self::Wasm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_action_is_build() {
        let cli = Cli::parse_from(["docbuild"]);
        assert!(matches!(cli.action(), Action::Build));
    }

    #[test]
    fn test_http_port_flag() {
        let cli = Cli::parse_from(["docbuild", "http", "--port", "9001"]);
        match cli.action() {
            Action::Http { port, open } => {
                assert_eq!(port, Some(9001));
                assert!(!open);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_http_open_flag() {
        let cli = Cli::parse_from(["docbuild", "http", "--open"]);
        assert!(matches!(cli.action(), Action::Http { open: true, .. }));
    }

    #[test]
    fn test_renders() {
        assert!(Action::Build.renders());
        assert!(Action::Adoc.renders());
        assert!(Action::Wasm.renders());
        assert!(
            !Action::Http {
                port: None,
                open: false
            }
            .renders()
        );
    }
}
