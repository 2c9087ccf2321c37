// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use clap::Parser;

/// Builds a VMware-compatible macOS recovery disk image for a release chosen
/// interactively from a fixed menu.
#[derive(Parser)]
#[command(name = "recovery-maker", version)]
pub struct App {
    /// Forces the tool to run in an interactive or non-interactive mode. If
    /// not set, the tool infers whether to run interactively from whether it
    /// is running in an interactive terminal. This only affects progress
    /// rendering; the release menu is always interactive.
    #[arg(long, default_value = Option::None)]
    pub interactive: Option<bool>,
}
