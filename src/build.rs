//! Pipeline orchestration.
//!
//! Sequences the build steps for each action. Execution is synchronous
//! and sequential; each step runs to completion before the next starts,
//! and a failing step does not prevent later steps from running. Partial
//! output (images copied even when rendering failed) is more useful to a
//! developer than an all-or-nothing abort.
//!
//! ```text
//! build_site()
//!     │
//!     ├── apidoc::build_api_docs() ──► cargo doc
//!     │
//!     └── build_adoc()
//!             │
//!             ├── render::render_docs() ──► asciidoctor (toc / no-toc passes)
//!             │
//!             └── publish_assets() ──► images + favicons into output
//! ```

use crate::apidoc;
use crate::assets;
use crate::config::DocsConfig;
use crate::log;
use crate::render;
use anyhow::{Context, Result};
use std::fs;

/// Full build: API reference plus the AsciiDoc site.
pub fn build_site(config: &DocsConfig) -> Result<()> {
    ensure_output_dir(config)?;
    apidoc::build_api_docs()?;
    build_adoc(config)
}

/// Docs-only build: render the AsciiDoc sources and publish assets.
pub fn build_adoc(config: &DocsConfig) -> Result<()> {
    ensure_output_dir(config)?;
    render::render_docs(config)?;
    publish_assets(config);
    log!("build"; "done");
    Ok(())
}

/// Create the output directory (including parents). Idempotent.
pub fn ensure_output_dir(config: &DocsConfig) -> Result<()> {
    fs::create_dir_all(&config.paths.output).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.paths.output.display()
        )
    })
}

/// Publish the static asset classes into the output directory.
///
/// The image tree mirrors to `output/images`; favicons flatten into the
/// output root so browsers find them at `/`. Each class is independent:
/// one failing does not block the other.
fn publish_assets(config: &DocsConfig) {
    let output = &config.paths.output;

    if let Err(e) = assets::sync_tree(&config.paths.images(), &output.join("images")) {
        log!("warn"; "images not copied: {:#}", e);
    }

    if let Err(e) = assets::sync_tree(&config.paths.favicons(), output) {
        log!("warn"; "favicons not copied: {:#}", e);
    }
}
