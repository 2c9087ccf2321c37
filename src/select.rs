// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The interactive release selector.

use std::io::{BufRead, Write};

use crate::catalog::{ReleaseEntry, CATALOG};

/// Prints the release menu to `output` once, then reads lines from `input`
/// until one matches a catalog entry's menu number, and returns that entry.
///
/// Invalid input is never an error; the selector just prompts again. The only
/// error case is the input stream ending before a valid choice is made, which
/// the caller should treat as a request to terminate.
pub fn select_release(
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> std::io::Result<&'static ReleaseEntry> {
    writeln!(output, "Create a VMware VMDK Recovery Image")?;
    for entry in CATALOG {
        writeln!(output, "{}. {}", entry.menu_index, entry.label)?;
    }

    loop {
        write!(output, "Input menu number: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input ended before a release was chosen",
            ));
        }

        // Strict string comparison against each entry's canonical decimal
        // index; anything else (including surrounding spaces) re-prompts.
        let choice = line.trim_end_matches(['\r', '\n']);
        if let Some(entry) =
            CATALOG.iter().find(|e| choice == e.menu_index.to_string())
        {
            return Ok(entry);
        }
    }
}
