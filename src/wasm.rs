//! WASM artifact build and placement.
//!
//! Cross-compiles for the configured target triple with the table-export
//! linker flag injected through `RUSTFLAGS` (the hosting page needs the
//! exported table to reach the interpreter entry points), copies the
//! artifact and any loader scripts into the output directory, then
//! publishes the docs so page and artifact go out together.

use crate::assets;
use crate::build;
use crate::config::DocsConfig;
use crate::exec;
use crate::log;
use crate::utils::fileset::{self, Filters};
use anyhow::Result;

/// Cross-build the wasm artifact and publish it with the docs.
pub fn build_wasm(config: &DocsConfig) -> Result<()> {
    build::ensure_output_dir(config)?;

    // The overlay only applies to this invocation; nothing is exported
    // to the parent environment.
    let result = exec!(
        env = [("RUSTFLAGS", config.wasm.rustflags.as_str())];
        ["cargo"]; "build", "--target", config.wasm.target.as_str()
    );
    if let Err(e) = result {
        log!("error"; "wasm build failed: {:#}", e);
    }

    // Artifact placement runs regardless of the build's exit status; a
    // previous build's artifact may still be worth publishing.
    assets::sync_files(&[config.wasm.artifact_path()], &config.paths.output)?;

    match fileset::discover(&config.paths.src, &Filters::new().name("*.js")) {
        Ok(scripts) => {
            log!("wasm"; "copying {} script file(s)", scripts.len());
            assets::sync_files(&scripts, &config.paths.output)?;
        }
        Err(e) => log!("warn"; "{e}"),
    }

    build::build_adoc(config)
}
