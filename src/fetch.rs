// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The recovery-image download step and the collaborator that performs it.

use std::process::Command;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::catalog::ReleaseEntry;
use crate::util::{run_blocking, CommandError};

/// The command expected to implement the download contract.
pub const MACRECOVERY_COMMAND: &str = "macrecovery";

/// The placeholder serial-like model identifier. Recovery-image retrieval
/// does not require a genuine device identity, so an all-zero token is
/// supplied for every release.
pub const PLACEHOLDER_MODEL_ID: &str = "00000000000000000";

/// OS-version selector meaning "most recent available build for this board".
pub const OS_VERSION_LATEST: &str = "latest";

/// The full parameter set handed to the download collaborator. Derived from
/// the operator's selection; lives only for the one download call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadRequest {
    pub board_id: String,
    pub model_id: &'static str,
    pub base_name: String,
    pub os_version: &'static str,
}

impl DownloadRequest {
    /// Builds the request for `release`. The base filename is the release
    /// name, unmodified; the conversion step later derives its own paths from
    /// the same stem.
    pub fn for_release(release: &ReleaseEntry) -> Self {
        Self {
            board_id: release.board_id.to_owned(),
            model_id: PLACEHOLDER_MODEL_ID,
            base_name: release.name.to_owned(),
            os_version: OS_VERSION_LATEST,
        }
    }

    /// The disk image the collaborator is expected to leave behind.
    pub fn dmg_filename(&self) -> String {
        format!("{}.dmg", self.base_name)
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Command(#[from] CommandError),

    /// The collaborator reported success but the disk image is not where it
    /// was asked to put it.
    #[error("download finished but `{path}` does not exist")]
    MissingImage { path: Utf8PathBuf },
}

/// The download capability. The production implementation shells out to
/// `macrecovery`; tests substitute a recording double.
pub trait RecoveryDownloader {
    /// Downloads the recovery image described by `request`, blocking until
    /// the collaborator finishes. On success a file named
    /// `<base_name>.dmg` is expected to exist in the working directory.
    fn download(&self, request: &DownloadRequest) -> Result<(), FetchError>;

    /// The external command this implementation launches, if any, so the
    /// runner can check for it before the pipeline starts.
    fn prereq_command(&self) -> Option<&'static str> {
        None
    }
}

/// Downloads recovery images by invoking the `macrecovery` command-line
/// collaborator.
pub struct MacrecoveryCli;

impl RecoveryDownloader for MacrecoveryCli {
    fn download(&self, request: &DownloadRequest) -> Result<(), FetchError> {
        let mut cmd = Command::new(MACRECOVERY_COMMAND);
        cmd.args([
            "download",
            "-b",
            &request.board_id,
            "-m",
            request.model_id,
            "--basename",
            &request.base_name,
            "-os",
            request.os_version,
        ]);

        run_blocking(&mut cmd)?;
        Ok(())
    }

    fn prereq_command(&self) -> Option<&'static str> {
        Some(MACRECOVERY_COMMAND)
    }
}
