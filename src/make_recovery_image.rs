// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Defines the script that turns an operator's release selection into a
//! VMDK recovery image: download the release's recovery `.dmg`, then convert
//! it with `qemu-img`.

use std::{collections::HashMap, io::Write, rc::Rc};

use camino::{Utf8Path, Utf8PathBuf};
use colored::Colorize;

use crate::catalog::ReleaseEntry;
use crate::convert::{ConversionJob, ImageConverter, QemuImgConverter};
use crate::fetch::{MacrecoveryCli, RecoveryDownloader};
use crate::runner::{Context, Script, ScriptStep, Ui};
use crate::steps;

pub struct MakeRecoveryImageScript {
    steps: Vec<ScriptStep>,
    selection: &'static ReleaseEntry,
    output_dir: Utf8PathBuf,
}

impl MakeRecoveryImageScript {
    /// Builds the script for `selection` with the production collaborators,
    /// writing its artifacts to the working directory.
    pub fn new(selection: &'static ReleaseEntry) -> Self {
        Self::with_collaborators(
            selection,
            Utf8PathBuf::new(),
            Rc::new(MacrecoveryCli),
            Rc::new(QemuImgConverter),
        )
    }

    /// Builds the script with explicit collaborators and output directory.
    /// The test suite uses this to substitute doubles for the external
    /// download and conversion commands.
    pub fn with_collaborators(
        selection: &'static ReleaseEntry,
        output_dir: Utf8PathBuf,
        downloader: Rc<dyn RecoveryDownloader>,
        converter: Rc<dyn ImageConverter>,
    ) -> Self {
        let download_prereqs: Vec<&'static str> =
            downloader.prereq_command().into_iter().collect();
        let convert_prereqs: Vec<&'static str> =
            converter.prereq_command().into_iter().collect();

        let steps = vec![
            ScriptStep::with_prereqs(
                "download recovery image",
                move |ctx: &mut Context, ui: &Ui| {
                    steps::download_recovery_image(ctx, ui, downloader.as_ref())
                },
                &download_prereqs,
            ),
            ScriptStep::with_prereqs(
                "convert disk image to VMDK",
                move |ctx: &mut Context, ui: &Ui| {
                    steps::convert_to_virtual_disk(ctx, ui, converter.as_ref())
                },
                &convert_prereqs,
            ),
        ];

        Self { steps, selection, output_dir }
    }

    fn conversion_job(&self) -> ConversionJob {
        ConversionJob::for_base_name(&self.output_dir, self.selection.name)
    }
}

impl Script for MakeRecoveryImageScript {
    fn steps(&self) -> &[ScriptStep] {
        self.steps.as_slice()
    }

    fn print_configuration(&self, w: &mut dyn Write) -> std::io::Result<()> {
        let job = self.conversion_job();
        writeln!(w, "{}", "Creating a VMware VMDK recovery image".bold())?;
        writeln!(w, "  Release:          {}", self.selection.label)?;
        writeln!(w, "  Board identifier: {}", self.selection.board_id)?;
        writeln!(w, "  Disk image:       {}", job.source)?;
        writeln!(w, "  Virtual disk:     {}", job.target)?;
        Ok(())
    }

    fn initial_context(&self) -> HashMap<String, String> {
        // The dmg and vmdk paths are derived here, once, from the selected
        // release's name; the steps must operate on exactly this pair.
        let job = self.conversion_job();
        [
            ("base_name".to_string(), self.selection.name.to_string()),
            ("board_id".to_string(), self.selection.board_id.to_string()),
            ("dmg_path".to_string(), job.source.to_string()),
            ("vmdk_path".to_string(), job.target.to_string()),
        ]
        .into_iter()
        .collect()
    }
}
