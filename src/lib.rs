// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! recovery-maker: builds VMware-compatible macOS recovery disk images.
//!
//! The operator picks a release from a fixed menu; the tool asks the
//! `macrecovery` collaborator to download that release's recovery image and
//! then converts the resulting `.dmg` into a `.vmdk` with `qemu-img`.

pub mod app;
pub mod catalog;
pub mod convert;
pub mod fetch;
pub mod make_recovery_image;
pub mod runner;
pub mod select;
pub mod steps;
pub mod util;
