//! `[paths]` section configuration.
//!
//! Source and output directory layout. All paths are relative to the
//! project root the tool is invoked from.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[paths]` section in docbuild.toml - directory layout.
///
/// # Example
/// ```toml
/// [paths]
/// doc = "doc"
/// src = "src"
/// output = "target/doc"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory holding AsciiDoc sources and static assets.
    #[serde(default = "defaults::paths::doc")]
    #[educe(Default = defaults::paths::doc())]
    pub doc: PathBuf,

    /// Directory scanned for loader scripts (`**/*.js`) on wasm builds.
    #[serde(default = "defaults::paths::src")]
    #[educe(Default = defaults::paths::src())]
    pub src: PathBuf,

    /// Directory all generated and copied output lands in.
    /// Created (with parents) before any write.
    #[serde(default = "defaults::paths::output")]
    #[educe(Default = defaults::paths::output())]
    pub output: PathBuf,
}

impl PathsConfig {
    /// Image asset directory under `doc`.
    pub fn images(&self) -> PathBuf {
        self.doc.join("images")
    }

    /// Favicon directory under the image assets.
    pub fn favicons(&self) -> PathBuf {
        self.doc.join("images").join("favicon")
    }
}
