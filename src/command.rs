use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};

/// Runs an external program to completion and hands back its stdout.
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` and returns the captured standard output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spawn`] if the program cannot be started and
    /// [`Error::Exit`] if it exits with a non-zero status.
    fn run(&self, program: &str, args: &[&str]) -> Result<String>;
}

/// [`CommandRunner`] backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        debug!(program, ?args, "running");

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| Error::Spawn {
                command: display_command(program, args),
                source,
            })?;

        if !output.status.success() {
            return Err(Error::Exit {
                command: display_command(program, args),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

pub(crate) fn display_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{program} {}", args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = SystemRunner
            .run("port-pid-definitely-missing-binary", &["-x"])
            .expect_err("missing binary must fail");

        assert!(err.is_execution());
        assert!(matches!(err, Error::Spawn { ref command, .. } if command == "port-pid-definitely-missing-binary -x"));
    }

    #[test]
    fn display_command_joins_args() {
        assert_eq!(display_command("ss", &["-tunlp"]), "ss -tunlp");
        assert_eq!(display_command("netstat", &[]), "netstat");
    }
}
