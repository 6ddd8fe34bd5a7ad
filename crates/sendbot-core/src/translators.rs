//! Source of the `update-translators` comment content.
//!
//! Working out which translators to notify happens outside this crate. The
//! production source runs a configured shell command and takes its stdout
//! verbatim.

use crate::error::{Result, SendbotError};
use std::io::Read;
use std::process::{Command, Stdio};

pub trait TranslatorSource {
    fn comment_body(&self) -> Result<String>;
}

/// Runs `sh -c <command>` and returns its stdout unchanged.
#[derive(Debug, Clone)]
pub struct CommandTranslatorSource {
    command: String,
}

impl CommandTranslatorSource {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl TranslatorSource for CommandTranslatorSource {
    fn comment_body(&self) -> Result<String> {
        tracing::debug!(command = %self.command, "running translator command");

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            // stderr flows through so the command's diagnostics reach the CI log
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| SendbotError::Translators(format!("failed to spawn: {e}")))?;

        let mut stdout = Vec::new();
        let read = match child.stdout.take() {
            Some(mut out) => out.read_to_end(&mut stdout).map(|_| ()),
            None => Ok(()),
        };
        // Reap the child even when its output could not be read.
        let status = child.wait()?;
        read?;

        if !status.success() {
            return Err(SendbotError::Translators(format!(
                "'{}' exited with {status}",
                self.command
            )));
        }

        String::from_utf8(stdout)
            .map_err(|_| SendbotError::Translators("command output is not valid UTF-8".into()))
    }
}

/// Used when no translator command is configured; fails only if asked for content.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

impl TranslatorSource for Unconfigured {
    fn comment_body(&self) -> Result<String> {
        Err(SendbotError::Translators(
            "no translator command configured (set --translators-cmd or SENDBOT_TRANSLATORS_CMD)"
                .into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_output_is_used_verbatim() {
        let source = CommandTranslatorSource::new("printf '  @alice\\n@bob  \\n'");
        assert_eq!(source.comment_body().unwrap(), "  @alice\n@bob  \n");
    }

    #[test]
    fn failing_command_is_an_error() {
        let source = CommandTranslatorSource::new("exit 3");
        let err = source.comment_body().unwrap_err();
        assert!(matches!(err, SendbotError::Translators(_)));
    }

    #[test]
    fn exit_status_is_checked_after_stdout_closes_early() {
        let source = CommandTranslatorSource::new("printf partial; exec >&-; sleep 0.1; exit 4");
        let err = source.comment_body().unwrap_err();
        assert!(err.to_string().contains("exit status: 4"), "{err}");
    }

    #[test]
    fn unconfigured_source_errors() {
        assert!(Unconfigured.comment_body().is_err());
    }
}
