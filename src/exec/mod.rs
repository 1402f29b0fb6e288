//! Executable strategy.
//!
//! Runs the command that follows `exec=` and reads IP addresses from its
//! standard output. The executable must follow these rules:
//!
//! - on success: exit 0 and print whitespace delimited IP addresses to
//!   stdout. Each address may be wrapped in double quotes and IPv6
//!   addresses may carry a `%<zone>` suffix.
//! - on failure: exit with a non-zero code and optionally print a short
//!   message (up to about 1024 bytes) to stderr.
//!
//! Only the exit code decides failure. Stderr from a successful run is
//! ignored.

mod command;

pub use command::CommandLine;

use crate::addr::{self, ResolvedAddr};
use crate::base::cancel::Context;
use crate::base::error::ExecError;
use crate::logger::Logger;
use std::{
    io,
    process::{Output, Stdio},
};
use tokio::{
    io::AsyncReadExt,
    process::{Child, Command},
};

/// Runs `command_line` once and parses the addresses it prints.
///
/// The child is killed when `ctx` is done and is always reaped before this
/// function returns.
pub async fn run(
    ctx: &Context,
    command_line: &str,
    log: &dyn Logger,
) -> Result<Vec<ResolvedAddr>, ExecError> {
    let cmd = CommandLine::parse(command_line)?;

    log.debug(
        "Executing command",
        &[("command", &cmd.program()), ("args", &cmd.args())],
    );

    if let Some(err) = ctx.err() {
        return Err(err.into());
    }

    let output = execute(ctx, &cmd).await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ExecError::ExitStatus {
            code: output.status.code().unwrap_or(-1),
            stderr: stderr.trim().to_string(),
        });
    }

    let addrs = parse_output(&output.stdout)?;

    log.debug("Addresses retrieved from the executable", &[("ip-addrs", &addrs)]);
    Ok(addrs)
}

/// Parses the stdout of a successful run.
pub fn parse_output(stdout: &[u8]) -> Result<Vec<ResolvedAddr>, ExecError> {
    let stdout = String::from_utf8_lossy(stdout);
    if stdout.split_whitespace().next().is_none() {
        return Err(ExecError::NoOutput);
    }

    Ok(addr::parse_tokens(&stdout)?)
}

async fn execute(ctx: &Context, cmd: &CommandLine) -> Result<Output, ExecError> {
    let mut child = Command::new(cmd.program())
        .args(cmd.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ExecError::Launch {
            command: cmd.program().to_string(),
            source,
        })?;

    let outcome = tokio::select! {
        res = collect(&mut child) => Ok(res),
        err = ctx.done() => Err(err),
    };

    match outcome {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => {
            tracing::debug!(program = %cmd.program(), error = %e, "killing executable");
            reap(&mut child, cmd.program()).await;
            Err(ExecError::Io(e))
        }
        Err(err) => {
            tracing::debug!(program = %cmd.program(), reason = %err, "killing executable");
            reap(&mut child, cmd.program()).await;
            Err(err.into())
        }
    }
}

/// Kills the child and waits for its exit status.
async fn reap(child: &mut Child, program: &str) {
    if let Ok(Some(_)) = child.try_wait() {
        return;
    }
    // kill() waits for the child after signalling it
    if let Err(e) = child.kill().await {
        tracing::warn!(program = %program, error = %e, "failed to kill executable");
    }
}

/// Drains both pipes while waiting for the child to exit.
async fn collect(child: &mut Child) -> io::Result<Output> {
    let mut stdout_pipe = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::other("stdout was not captured"))?;
    let mut stderr_pipe = child
        .stderr
        .take()
        .ok_or_else(|| io::Error::other("stderr was not captured"))?;

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let (status, _, _) = tokio::try_join!(
        child.wait(),
        stdout_pipe.read_to_end(&mut stdout),
        stderr_pipe.read_to_end(&mut stderr),
    )?;

    Ok(Output {
        status,
        stdout,
        stderr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::NoopLogger;

    #[test]
    fn test_parse_output_multi_line() {
        let addrs = parse_output(b"172.25.41.79\n172.25.16.77\n\"172.25.42.80\"\n").unwrap();
        let text: Vec<_> = addrs.iter().map(ToString::to_string).collect();
        assert_eq!(text, ["172.25.41.79", "172.25.16.77", "172.25.42.80"]);
    }

    #[test]
    fn test_parse_output_blank() {
        assert!(matches!(parse_output(b""), Err(ExecError::NoOutput)));
        assert!(matches!(parse_output(b" \n\t\n"), Err(ExecError::NoOutput)));
    }

    #[test]
    fn test_parse_output_invalid_token() {
        match parse_output(b"10.0.0.1 not-an-ip") {
            Err(ExecError::InvalidAddress(err)) => assert_eq!(err.text(), "not-an-ip"),
            other => panic!("Expected InvalidAddress, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reap_kills_and_waits() {
        let mut child = Command::new("sleep")
            .arg("30")
            .kill_on_drop(true)
            .spawn()
            .unwrap();

        reap(&mut child, "sleep").await;

        let status = child.try_wait().unwrap().expect("child was not reaped");
        assert!(!status.success());
    }

    #[tokio::test]
    async fn test_reap_after_exit() {
        let mut child = Command::new("true").spawn().unwrap();
        child.wait().await.unwrap();

        reap(&mut child, "true").await;

        assert!(child.try_wait().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_run_rejects_missing_command() {
        let result = run(&Context::background(), " ", &NoopLogger).await;
        assert!(matches!(result, Err(ExecError::MissingCommand)));
    }

    #[tokio::test]
    async fn test_run_checks_context_before_spawn() {
        let (ctx, handle) = Context::background().with_cancel();
        handle.cancel();

        let result = run(&ctx, "echo 10.0.0.1", &NoopLogger).await;
        assert!(matches!(
            result,
            Err(ExecError::Context(crate::base::cancel::ContextError::Canceled))
        ));
    }
}
