// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use clap::Parser;
use colored::Colorize;

use recovery_maker::app::App;
use recovery_maker::make_recovery_image::MakeRecoveryImageScript;
use recovery_maker::{runner, select};

fn main() -> anyhow::Result<()> {
    let app = App::parse();
    let interactive = match app.interactive {
        Some(val) => val,
        None => atty::is(atty::Stream::Stdout),
    };

    println!("{}", "macOS Recovery VMDK Maker".bold());
    println!("=========================");
    println!();

    let stdin = std::io::stdin();
    let selection =
        select::select_release(&mut stdin.lock(), &mut std::io::stdout())?;
    println!();

    let script = MakeRecoveryImageScript::new(selection);
    runner::run_script(Box::new(script), interactive)?;

    println!();
    println!("Created VMDK disk: {}", format!("{}.vmdk", selection.name).bold());
    Ok(())
}
