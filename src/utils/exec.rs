//! External command execution.
//!
//! The pipeline delegates all real work (asciidoctor, cargo) to external
//! programs. Commands are run without shell interpretation, each argument
//! passed as a literal token, so filenames with spaces or glob characters
//! cannot be re-expanded.
//!
//! A non-zero exit does not produce an `Err`: the pipeline is best-effort
//! and later steps still run. The exit status is carried back in
//! [`ExecutionResult`] for callers that want a step to be fatal.

use crate::log;
use anyhow::{Context, Result};
use std::{ffi::OsString, process::Command};

/// Run an external command with arguments.
///
/// # Examples
/// ```ignore
/// // Plain invocation
/// exec!(["cargo"]; "doc")?;
///
/// // With environment overlay
/// exec!(env = [("RUSTFLAGS", "-C link-arg=--export-table")]; ["cargo"]; "build")?;
/// ```
#[macro_export]
macro_rules! exec {
    (env = $env:expr; $cmd:expr; $($arg:expr),* $(,)?) => {{
        $crate::utils::exec::exec(
            &$crate::utils::exec::to_cmd_vec($cmd),
            &$crate::utils::exec::filter_args(&[$($crate::utils::exec::to_os($arg)),*]),
            &$crate::utils::exec::to_env_vec($env),
        )
    }};
    ($cmd:expr; $($arg:expr),* $(,)?) => {{
        $crate::utils::exec::exec(
            &$crate::utils::exec::to_cmd_vec($cmd),
            &$crate::utils::exec::filter_args(&[$($crate::utils::exec::to_os($arg)),*]),
            &[],
        )
    }};
}

// ============================================================================
// Argument Conversion
// ============================================================================

/// Convert to OsString.
#[inline]
pub fn to_os<S: Into<OsString>>(s: S) -> OsString {
    s.into()
}

/// Trait for converting to command vector.
pub trait ToCmd {
    fn to_cmd(self) -> Vec<OsString>;
}

impl<const N: usize> ToCmd for [&str; N] {
    #[inline]
    fn to_cmd(self) -> Vec<OsString> {
        self.into_iter().map(OsString::from).collect()
    }
}

/// Convert command to Vec<OsString>.
#[inline]
pub fn to_cmd_vec<C: ToCmd>(cmd: C) -> Vec<OsString> {
    cmd.to_cmd()
}

/// Filter out empty args.
#[inline]
pub fn filter_args(args: &[OsString]) -> Vec<OsString> {
    args.iter().filter(|a| !a.is_empty()).cloned().collect()
}

/// Convert environment pairs to OsString pairs.
#[inline]
pub fn to_env_vec<K, V>(envs: impl IntoIterator<Item = (K, V)>) -> Vec<(OsString, OsString)>
where
    K: Into<OsString>,
    V: Into<OsString>,
{
    envs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

// ============================================================================
// Command Execution
// ============================================================================

/// Outcome of a delegated command.
///
/// Captured output plus the raw exit status. Callers decide whether a
/// non-zero exit matters for their step.
#[derive(Debug)]
pub struct ExecutionResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    /// Whether the command exited with status zero.
    #[inline]
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Execute a command and capture its output.
///
/// Emits a trace line before execution so a failure's context is always
/// visible. The environment overlay augments (never replaces) the inherited
/// process environment.
///
/// # Errors
/// Returns error only if the program cannot be spawned at all. A non-zero
/// exit code is reported through the returned [`ExecutionResult`].
pub fn exec(
    cmd: &[OsString],
    args: &[OsString],
    envs: &[(OsString, OsString)],
) -> Result<ExecutionResult> {
    let (name, mut command) = prepare(cmd, args)?;

    for (key, value) in envs {
        command.env(key, value);
    }

    log!("exec"; "Running: {}", render_command(cmd, args));

    let output = command
        .output()
        .with_context(|| format!("Failed to execute `{name}`"))?;

    let result = ExecutionResult {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    if !result.success() {
        log!("warn"; "`{name}` exited with {}", result.status);
        for line in result.stderr.lines().filter(|l| !l.trim().is_empty()) {
            log!("warn"; "{line}");
        }
    }

    Ok(result)
}

/// Prepare a Command from components.
fn prepare(cmd: &[OsString], args: &[OsString]) -> Result<(String, Command)> {
    let name = cmd
        .first()
        .and_then(|s| s.to_str())
        .context("Empty command")?
        .to_owned();

    let mut command = Command::new(&cmd[0]);
    command.args(&cmd[1..]).args(args);

    Ok((name, command))
}

/// Human-readable form of the full command line, for the trace.
fn render_command(cmd: &[OsString], args: &[OsString]) -> String {
    cmd.iter()
        .chain(args.iter())
        .map(|s| s.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_os() {
        assert_eq!(to_os("hello"), OsString::from("hello"));
        assert_eq!(to_os(String::from("world")), OsString::from("world"));
    }

    #[test]
    fn test_to_cmd_vec_array() {
        let cmd = to_cmd_vec(["cargo", "doc"]);
        assert_eq!(cmd.len(), 2);
        assert_eq!(cmd[0], OsString::from("cargo"));
        assert_eq!(cmd[1], OsString::from("doc"));
    }

    #[test]
    fn test_filter_args() {
        let args = [OsString::from("a"), OsString::from(""), OsString::from("b")];
        let filtered = filter_args(&args);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0], OsString::from("a"));
        assert_eq!(filtered[1], OsString::from("b"));
    }

    #[test]
    fn test_to_env_vec() {
        let envs = to_env_vec([("RUSTFLAGS", "-C link-arg=--export-table")]);
        assert_eq!(envs.len(), 1);
        assert_eq!(envs[0].0, OsString::from("RUSTFLAGS"));
    }

    #[test]
    fn test_prepare_empty() {
        assert!(prepare(&[], &[]).is_err());
    }

    #[test]
    fn test_prepare_valid() {
        let cmd = to_cmd_vec(["echo"]);
        let args = filter_args(&[OsString::from("hello")]);
        let (name, _) = prepare(&cmd, &args).unwrap();
        assert_eq!(name, "echo");
    }

    #[test]
    fn test_render_command() {
        let cmd = to_cmd_vec(["asciidoctor", "-a", "sectanchors"]);
        let args = [OsString::from("thesis.adoc")];
        assert_eq!(
            render_command(&cmd, &args),
            "asciidoctor -a sectanchors thesis.adoc"
        );
    }

    #[test]
    fn test_nonzero_exit_is_ok() {
        // `false` exits 1; the runner must not turn that into an Err
        let cmd = to_cmd_vec(["false"]);
        let result = exec(&cmd, &[], &[]);
        let Ok(result) = result else {
            // `false` missing on exotic platforms; nothing to assert
            return;
        };
        assert!(!result.success());
    }

    #[test]
    fn test_spawn_failure_is_err() {
        let cmd = to_cmd_vec(["definitely-not-a-real-program-7f3a"]);
        assert!(exec(&cmd, &[], &[]).is_err());
    }

    #[test]
    fn test_captures_stdout() {
        let cmd = to_cmd_vec(["echo", "hello"]);
        let Ok(result) = exec(&cmd, &[], &[]) else {
            return;
        };
        assert!(result.success());
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[test]
    fn test_env_overlay() {
        let cmd = to_cmd_vec(["sh", "-c", "echo $DOCBUILD_TEST_VAR"]);
        let envs = to_env_vec([("DOCBUILD_TEST_VAR", "overlay")]);
        let Ok(result) = exec(&cmd, &[], &envs) else {
            return;
        };
        assert_eq!(result.stdout.trim(), "overlay");
    }

    #[test]
    fn test_exec_macro_plain_form() {
        let Ok(result) = crate::exec!(["echo"]; "hi") else {
            return;
        };
        assert!(result.success());
        assert_eq!(result.stdout.trim(), "hi");
    }

    #[test]
    fn test_exec_macro_env_form() {
        let result = crate::exec!(
            env = [("DOCBUILD_MACRO_VAR", "via-macro")];
            ["sh"]; "-c", "echo $DOCBUILD_MACRO_VAR"
        );
        let Ok(result) = result else {
            return;
        };
        assert_eq!(result.stdout.trim(), "via-macro");
    }
}
