//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [paths] Section Defaults
// ============================================================================

pub mod paths {
    use std::path::PathBuf;

    pub fn doc() -> PathBuf {
        "doc".into()
    }

    pub fn src() -> PathBuf {
        "src".into()
    }

    pub fn output() -> PathBuf {
        "target/doc".into()
    }
}

// ============================================================================
// [render] Section Defaults
// ============================================================================

pub mod render {
    pub fn program() -> String {
        "asciidoctor".into()
    }

    /// Attributes applied uniformly to every render invocation.
    pub fn attributes() -> Vec<String> {
        [
            "doctype=article",
            "sectanchors",
            "imagesdir=images",
            "stylesheet=style.css",
            "docinfo=shared",
            "idprefix=+",
            "idseparator=-",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    pub fn toc() -> String {
        "toc=left".into()
    }

    /// Documents that receive the table-of-contents attribute.
    pub fn toc_documents() -> Vec<String> {
        vec!["thesis.adoc".into()]
    }

    /// Rendered output file that receives the unit-string fixup.
    pub fn primary() -> String {
        "thesis.html".into()
    }
}

// ============================================================================
// [wasm] Section Defaults
// ============================================================================

pub mod wasm {
    pub fn target() -> String {
        "wasm32-unknown-unknown".into()
    }

    pub fn artifact() -> String {
        "repl.wasm".into()
    }

    pub fn rustflags() -> String {
        "-C link-arg=--export-table".into()
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        8888
    }
}
