//! `[render]` section configuration.
//!
//! Controls how AsciiDoc sources are turned into HTML. The attribute set is
//! applied uniformly to every document in a build; only the table-of-contents
//! attribute varies, and which documents get it is explicit configuration
//! rather than a filename convention baked into the pipeline.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[render]` section in docbuild.toml - renderer invocation settings.
///
/// # Example
/// ```toml
/// [render]
/// program = "asciidoctor"
/// toc_documents = ["thesis.adoc"]
/// primary = "thesis.html"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// External renderer executable.
    #[serde(default = "defaults::render::program")]
    #[educe(Default = defaults::render::program())]
    pub program: String,

    /// Attributes (`-a key=value`) passed to every invocation.
    #[serde(default = "defaults::render::attributes")]
    #[educe(Default = defaults::render::attributes())]
    pub attributes: Vec<String>,

    /// Table-of-contents attribute, appended only for `toc_documents`.
    #[serde(default = "defaults::render::toc")]
    #[educe(Default = defaults::render::toc())]
    pub toc: String,

    /// Source file names rendered with the table of contents. The long-form
    /// reference document belongs here; landing pages do not, since a
    /// left-aligned TOC corrupts their layout.
    #[serde(default = "defaults::render::toc_documents")]
    #[educe(Default = defaults::render::toc_documents())]
    pub toc_documents: Vec<String>,

    /// Rendered file (relative to output) that receives the `100%px` fixup.
    #[serde(default = "defaults::render::primary")]
    #[educe(Default = defaults::render::primary())]
    pub primary: String,
}

impl RenderConfig {
    /// Whether `source` (a file name) is rendered with the TOC attribute.
    pub fn wants_toc(&self, source: &std::path::Path) -> bool {
        source
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| self.toc_documents.iter().any(|d| d == name))
    }
}
