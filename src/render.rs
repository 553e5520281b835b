//! AsciiDoc rendering via the external renderer.
//!
//! Documents are rendered in two passes: one invocation for the documents
//! that get the table-of-contents attribute, one for the rest. The
//! attribute set is otherwise identical; applying a left-aligned TOC
//! unconditionally would corrupt the landing page's layout.
//!
//! After rendering, the primary document gets a literal text substitution
//! replacing the renderer's malformed `100%px` width unit with `100%`.

use crate::config::DocsConfig;
use crate::log;
use crate::utils::exec::{self, to_os};
use crate::utils::fileset::{self, DiscoveryError, Filters};
use anyhow::Result;
use std::{
    ffi::OsString,
    fs,
    path::PathBuf,
};

/// Malformed unit string emitted by the renderer for full-width images.
const BROKEN_UNIT: &str = "100%px";
/// Corrected form written back into the primary document.
const FIXED_UNIT: &str = "100%";

/// Render every AsciiDoc document under the doc directory into the output
/// directory, then apply the unit fixup to the primary document.
///
/// A missing doc directory is a logged warning, not an error: an empty
/// file set simply produces no render call. A renderer failure surfaces
/// through its exit code in the trace and does not unwind the pipeline.
pub fn render_docs(config: &DocsConfig) -> Result<()> {
    let sources = match fileset::discover(
        &config.paths.doc,
        &Filters::new().max_depth(1).name("*.adoc"),
    ) {
        Ok(sources) => sources,
        Err(e @ DiscoveryError::RootNotFound(_)) => {
            log!("warn"; "{e}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let (toc_docs, plain_docs): (Vec<_>, Vec<_>) = sources
        .into_iter()
        .partition(|doc| config.render.wants_toc(doc));

    log!("render"; "{} documents with toc, {} without", toc_docs.len(), plain_docs.len());

    render_set(config, &toc_docs, true);
    render_set(config, &plain_docs, false);

    fix_primary_units(config)
}

/// Render one document set in a single renderer invocation.
fn render_set(config: &DocsConfig, docs: &[PathBuf], with_toc: bool) {
    if docs.is_empty() {
        return;
    }

    let argv = renderer_argv(config, with_toc);
    let files: Vec<OsString> = docs.iter().map(|d| to_os(d.as_os_str())).collect();

    // Non-zero exit is already traced by the runner; spawn failure is
    // logged here and the pipeline continues with the remaining steps.
    if let Err(e) = exec::exec(&argv, &files, &[]) {
        log!("error"; "render failed: {:#}", e);
    }
}

/// Compose the fixed renderer argument vector.
///
/// The same option set is applied to every document in one build; only the
/// TOC attribute varies between the two passes.
fn renderer_argv(config: &DocsConfig, with_toc: bool) -> Vec<OsString> {
    let mut argv = vec![to_os(config.render.program.as_str())];

    for attr in &config.render.attributes {
        argv.push(to_os("-a"));
        argv.push(to_os(attr.as_str()));
    }

    if with_toc {
        argv.push(to_os("-a"));
        argv.push(to_os(config.render.toc.as_str()));
    }

    argv.push(to_os("--destination-dir"));
    argv.push(to_os(config.paths.output.as_os_str()));

    argv
}

/// Replace the malformed unit string in the primary rendered document.
///
/// Runs in place, exactly once per build. Idempotent: a file without the
/// broken unit is left byte-identical. A missing primary document is a
/// warning only; a later re-run can still succeed.
pub fn fix_primary_units(config: &DocsConfig) -> Result<()> {
    let path = config.paths.output.join(&config.render.primary);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log!("warn"; "post-process target `{}` not found", path.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if content.contains(BROKEN_UNIT) {
        fs::write(&path, content.replace(BROKEN_UNIT, FIXED_UNIT))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_config(output: &std::path::Path) -> DocsConfig {
        let mut config = DocsConfig::from_str("").unwrap();
        config.paths.output = output.to_path_buf();
        config
    }

    #[test]
    fn test_renderer_argv_without_toc() {
        let config = DocsConfig::from_str("").unwrap();
        let argv = renderer_argv(&config, false);

        assert_eq!(argv[0], OsString::from("asciidoctor"));
        let rendered: Vec<_> = argv.iter().map(|s| s.to_string_lossy()).collect();
        assert!(rendered.contains(&"doctype=article".into()));
        assert!(!rendered.contains(&"toc=left".into()));
        assert_eq!(rendered[rendered.len() - 2], "--destination-dir");
    }

    #[test]
    fn test_renderer_argv_with_toc() {
        let config = DocsConfig::from_str("").unwrap();
        let argv = renderer_argv(&config, true);
        let rendered: Vec<_> = argv.iter().map(|s| s.to_string_lossy()).collect();
        assert!(rendered.contains(&"toc=left".into()));
    }

    #[test]
    fn test_fix_primary_units_replaces_all() {
        let out = tempdir().unwrap();
        let config = test_config(out.path());
        let primary = out.path().join("thesis.html");
        fs::write(&primary, "<img width=\"100%px\"><div style=\"width:100%px\">").unwrap();

        fix_primary_units(&config).unwrap();

        let content = fs::read_to_string(&primary).unwrap();
        assert!(!content.contains("100%px"));
        assert_eq!(content.matches("100%").count(), 2);
    }

    #[test]
    fn test_fix_primary_units_idempotent() {
        let out = tempdir().unwrap();
        let config = test_config(out.path());
        let primary = out.path().join("thesis.html");
        fs::write(&primary, "width=\"100%px\"").unwrap();

        fix_primary_units(&config).unwrap();
        let once = fs::read_to_string(&primary).unwrap();
        fix_primary_units(&config).unwrap();
        let twice = fs::read_to_string(&primary).unwrap();

        assert_eq!(once, twice);
        assert_eq!(once, "width=\"100%\"");
    }

    #[test]
    fn test_fix_primary_units_untouched_without_occurrence() {
        let out = tempdir().unwrap();
        let config = test_config(out.path());
        let primary = out.path().join("thesis.html");
        fs::write(&primary, "<p>all good: width 100%</p>").unwrap();

        fix_primary_units(&config).unwrap();

        assert_eq!(
            fs::read_to_string(&primary).unwrap(),
            "<p>all good: width 100%</p>"
        );
    }

    #[test]
    fn test_fix_primary_units_missing_file_is_warning() {
        let out = tempdir().unwrap();
        let config = test_config(out.path());
        // No thesis.html present
        assert!(fix_primary_units(&config).is_ok());
    }

    #[test]
    fn test_render_docs_missing_doc_dir_is_ok() {
        let out = tempdir().unwrap();
        let mut config = test_config(out.path());
        config.paths.doc = out.path().join("no-doc-dir");
        assert!(render_docs(&config).is_ok());
    }
}
