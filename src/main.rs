//! docbuild - documentation build orchestrator.
//!
//! Drives the API-reference generator, renders AsciiDoc sources to HTML
//! via asciidoctor, synchronizes static assets into the output directory,
//! and optionally serves the result over HTTP for local preview.

mod apidoc;
mod assets;
mod build;
mod cli;
mod config;
mod render;
mod serve;
mod utils;
mod wasm;

use anyhow::Result;
use clap::Parser;
use cli::{Action, Cli};
use config::DocsConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = DocsConfig::load(&cli)?;

    match cli.action() {
        Action::Build => build::build_site(&config),
        Action::Adoc => build::build_adoc(&config),
        Action::Wasm => wasm::build_wasm(&config),
        Action::Http { .. } => serve::serve_site(&config),
    }
}
