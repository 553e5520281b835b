//! `[wasm]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[wasm]` section in docbuild.toml - cross-compilation settings.
///
/// # Example
/// ```toml
/// [wasm]
/// target = "wasm32-unknown-unknown"
/// artifact = "repl.wasm"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct WasmConfig {
    /// Cross-compilation target triple.
    #[serde(default = "defaults::wasm::target")]
    #[educe(Default = defaults::wasm::target())]
    pub target: String,

    /// Binary artifact name produced by the build.
    #[serde(default = "defaults::wasm::artifact")]
    #[educe(Default = defaults::wasm::artifact())]
    pub artifact: String,

    /// Linker flags injected via `RUSTFLAGS` for the build. The table export
    /// is required for the hosting page to reach the interpreter entry table.
    #[serde(default = "defaults::wasm::rustflags")]
    #[educe(Default = defaults::wasm::rustflags())]
    pub rustflags: String,
}

impl WasmConfig {
    /// Fixed path the compiled artifact lands at under the target triple's
    /// debug output.
    pub fn artifact_path(&self) -> PathBuf {
        PathBuf::from("target")
            .join(&self.target)
            .join("debug")
            .join(&self.artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::super::DocsConfig;
    use std::path::Path;

    #[test]
    fn test_wasm_defaults() {
        let config: DocsConfig = toml::from_str("").unwrap();
        assert_eq!(config.wasm.target, "wasm32-unknown-unknown");
        assert_eq!(config.wasm.artifact, "repl.wasm");
        assert_eq!(config.wasm.rustflags, "-C link-arg=--export-table");
    }

    #[test]
    fn test_artifact_path() {
        let config: DocsConfig = toml::from_str(
            r#"
            [wasm]
            artifact = "fress.wasm"
        "#,
        )
        .unwrap();
        assert_eq!(
            config.wasm.artifact_path(),
            Path::new("target/wasm32-unknown-unknown/debug/fress.wasm")
        );
    }
}
