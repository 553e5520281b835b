//! Build configuration management for `docbuild.toml`.
//!
//! # Sections
//!
//! | Section    | Purpose                                        |
//! |------------|------------------------------------------------|
//! | `[paths]`  | Source, script and output directories          |
//! | `[render]` | Renderer program, attributes, TOC targets      |
//! | `[wasm]`   | Cross-compilation target and artifact          |
//! | `[serve]`  | Preview server (interface, port, browser open) |
//!
//! The config file is optional: every field has a default matching the
//! conventional `doc/` + `src/` + `target/doc/` layout. The struct is
//! built once in `main` and passed by reference into each pipeline
//! component; nothing reads ambient global state.
//!
//! # Example
//!
//! ```toml
//! [paths]
//! doc = "doc"
//! output = "target/doc"
//!
//! [render]
//! toc_documents = ["thesis.adoc"]
//!
//! [serve]
//! port = 8888
//! ```

pub mod defaults;
mod error;
mod paths;
mod render;
mod serve;
mod wasm;

pub use error::ConfigError;

use paths::PathsConfig;
use render::RenderConfig;
use serve::ServeConfig;
use wasm::WasmConfig;

use crate::cli::{Action, Cli};
use anyhow::{Context, Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Root configuration structure representing docbuild.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct DocsConfig {
    /// Directory layout
    #[serde(default)]
    pub paths: PathsConfig,

    /// Renderer invocation settings
    #[serde(default)]
    pub render: RenderConfig,

    /// WASM cross-build settings
    #[serde(default)]
    pub wasm: WasmConfig,

    /// Preview server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl DocsConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: DocsConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load configuration for a CLI invocation.
    ///
    /// Reads the config file if it exists, then applies CLI overrides for
    /// the selected action. The implicit `docbuild.toml` is optional and
    /// silently falls back to defaults; a file named explicitly with `-C`
    /// must exist.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = if cli.config.exists() {
            Self::from_path(&cli.config)?
        } else if cli.config != Path::new(crate::cli::DEFAULT_CONFIG) {
            bail!("Config file `{}` not found.", cli.config.display());
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        config.validate(&cli.action())?;
        Ok(config)
    }

    /// Apply CLI argument overrides.
    fn update_with_cli(&mut self, cli: &Cli) {
        if let Action::Http { port, open } = cli.action() {
            if let Some(port) = port {
                self.serve.port = port;
            }
            if open {
                self.serve.open = true;
            }
        }
    }

    /// Validate config state for the selected action.
    ///
    /// Rendering actions require the renderer executable to exist; the
    /// preview server has no external collaborators.
    fn validate(&self, action: &Action) -> Result<()> {
        if self.render.program.is_empty() {
            bail!(ConfigError::Validation(
                "[render.program] must not be empty".into()
            ));
        }

        if action.renders() {
            Self::check_command_installed("[render.program]", &self.render.program)?;
        }

        Ok(())
    }

    /// Check if a command is installed and available
    fn check_command_installed(field: &str, command: &str) -> Result<()> {
        which::which(command).with_context(|| {
            format!("{field}: `{command}` not found. Please install it first.")
        })?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config = DocsConfig::from_str("").unwrap();
        assert_eq!(config.paths.output, Path::new("target/doc"));
        assert_eq!(config.serve.port, 8888);
        assert_eq!(config.render.program, "asciidoctor");
    }

    #[test]
    fn test_unknown_section_rejection() {
        let result = DocsConfig::from_str("[deploy]\ntarget = \"gh-pages\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_empty_program() {
        let config = DocsConfig::from_str("[render]\nprogram = \"\"").unwrap();
        assert!(config.validate(&Action::Adoc).is_err());
    }

    #[test]
    fn test_validate_http_skips_renderer_check() {
        // The preview action must not require the renderer to be installed
        let config = DocsConfig::from_str("[render]\nprogram = \"no-such-renderer-9d2c\"")
            .unwrap();
        let action = Action::Http {
            port: None,
            open: false,
        };
        assert!(config.validate(&action).is_ok());
    }

    #[test]
    fn test_missing_renderer_fails_render_actions() {
        let config = DocsConfig::from_str("[render]\nprogram = \"no-such-renderer-9d2c\"")
            .unwrap();
        assert!(config.validate(&Action::Build).is_err());
    }

    #[test]
    fn test_cli_port_and_open_overrides() {
        use clap::Parser;

        let cli = Cli::parse_from(["docbuild", "http", "--port", "9001", "--open"]);
        let mut config = DocsConfig::from_str("[serve]\nport = 8888").unwrap();

        config.update_with_cli(&cli);

        assert_eq!(config.serve.port, 9001);
        assert!(config.serve.open);
    }

    #[test]
    fn test_cli_without_flags_keeps_config_values() {
        use clap::Parser;

        let cli = Cli::parse_from(["docbuild", "http"]);
        let mut config = DocsConfig::from_str("[serve]\nport = 3000\nopen = true").unwrap();

        config.update_with_cli(&cli);

        assert_eq!(config.serve.port, 3000);
        assert!(config.serve.open);
    }

    #[test]
    fn test_load_explicit_missing_config_is_error() {
        use clap::Parser;

        let cli = Cli::parse_from(["docbuild", "-C", "/no/such/dir/custom.toml", "http"]);
        let err = DocsConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_explicit_existing_config_is_read() {
        use clap::Parser;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[serve]\nport = 4321").unwrap();

        let cli = Cli::parse_from([
            "docbuild",
            "-C",
            path.to_str().unwrap(),
            "http",
        ]);
        let config = DocsConfig::load(&cli).unwrap();
        assert_eq!(config.serve.port, 4321);
    }
}
