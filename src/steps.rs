// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The pipeline's step functions. Each reads its inputs from the shared
//! `Context` and delegates the external work to an injected collaborator.

use anyhow::Result;
use camino::Utf8PathBuf;

use crate::convert::{ConversionJob, ImageConverter};
use crate::fetch::{DownloadRequest, FetchError, RecoveryDownloader};
use crate::runner::{Context, Ui};

/// Asks `downloader` to fetch the recovery image for the release in `ctx`,
/// then verifies the image actually exists. The converter must never run
/// against a file the download step did not produce.
pub fn download_recovery_image(
    ctx: &mut Context,
    ui: &Ui,
    downloader: &dyn RecoveryDownloader,
) -> Result<()> {
    let request = DownloadRequest {
        board_id: ctx.get_var("board_id").unwrap().to_owned(),
        model_id: crate::fetch::PLACEHOLDER_MODEL_ID,
        base_name: ctx.get_var("base_name").unwrap().to_owned(),
        os_version: crate::fetch::OS_VERSION_LATEST,
    };

    ui.set_substep(format!("downloading {}", request.dmg_filename()));
    downloader.download(&request)?;

    let dmg = Utf8PathBuf::from(ctx.get_var("dmg_path").unwrap());
    if !dmg.exists() {
        return Err(FetchError::MissingImage { path: dmg }.into());
    }

    Ok(())
}

/// Converts the fetched disk image in `ctx` into a virtual disk using
/// `converter`.
pub fn convert_to_virtual_disk(
    ctx: &mut Context,
    ui: &Ui,
    converter: &dyn ImageConverter,
) -> Result<()> {
    let job = ConversionJob {
        source: Utf8PathBuf::from(ctx.get_var("dmg_path").unwrap()),
        target: Utf8PathBuf::from(ctx.get_var("vmdk_path").unwrap()),
    };

    ui.set_substep(format!("writing {}", job.target));
    converter.convert(&job)?;
    Ok(())
}
