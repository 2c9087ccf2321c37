// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The disk-image conversion step and the `qemu-img` collaborator that
//! performs it.

use std::process::Command;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::util::{run_blocking, CommandError};

/// The external conversion utility.
pub const QEMU_IMG_COMMAND: &str = "qemu-img";

/// One conversion from a fetched disk image to a virtual disk. Both paths are
/// derived from the same base name so the converter always operates on
/// exactly the file the download step was asked to produce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionJob {
    pub source: Utf8PathBuf,
    pub target: Utf8PathBuf,
}

impl ConversionJob {
    /// Builds the job for the `.dmg`/`.vmdk` pair named `base_name` under
    /// `dir`. An empty `dir` yields bare filenames, i.e. the working
    /// directory.
    pub fn for_base_name(dir: &Utf8Path, base_name: &str) -> Self {
        Self {
            source: dir.join(format!("{base_name}.dmg")),
            target: dir.join(format!("{base_name}.vmdk")),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// The conversion capability. The production implementation runs `qemu-img`;
/// tests substitute a recording double.
pub trait ImageConverter {
    /// Converts `job.source` into a virtual disk at `job.target`, blocking
    /// until the external utility exits.
    fn convert(&self, job: &ConversionJob) -> Result<(), ConvertError>;

    /// The external command this implementation launches, if any.
    fn prereq_command(&self) -> Option<&'static str> {
        None
    }
}

/// Converts disk images to VMDK by invoking `qemu-img convert`.
pub struct QemuImgConverter;

impl ImageConverter for QemuImgConverter {
    fn convert(&self, job: &ConversionJob) -> Result<(), ConvertError> {
        let mut cmd = Command::new(QEMU_IMG_COMMAND);
        cmd.args([
            "convert",
            "-O",
            "vmdk",
            job.source.as_str(),
            job.target.as_str(),
            "-p",
        ]);

        run_blocking(&mut cmd)?;
        Ok(())
    }

    fn prereq_command(&self) -> Option<&'static str> {
        Some(QEMU_IMG_COMMAND)
    }
}
