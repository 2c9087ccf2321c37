// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Utility functions for invoking external commands.

use std::process::{Command, ExitStatus};

use thiserror::Error;

/// Errors produced by running an external command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` returned non-success exit code: {status}")]
    Failed { command: String, status: ExitStatus },
}

/// Runs a `Command` with inherited stdio and blocks until it exits. Returns
/// `Err` if the command could not be launched or if its exit status indicates
/// that it failed. The child writes to the terminal directly, so a failing
/// collaborator's own diagnostics reach the operator untranslated.
pub fn run_blocking(cmd: &mut Command) -> Result<(), CommandError> {
    let command = cmd.get_program().to_string_lossy().into_owned();
    let status = cmd
        .status()
        .map_err(|source| CommandError::Launch { command: command.clone(), source })?;

    if !status.success() {
        return Err(CommandError::Failed { command, status });
    }

    Ok(())
}
