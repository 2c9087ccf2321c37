// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The fixed table of macOS releases this tool can produce a recovery image
//! for.

/// A single supported release. `board_id` is the Apple board identifier under
/// which the vendor's recovery catalog files this release; these values are
/// externally meaningful and must be reproduced verbatim.
#[derive(Debug, PartialEq, Eq)]
pub struct ReleaseEntry {
    /// The number the operator types to pick this release.
    pub menu_index: u8,

    /// The human-readable menu label.
    pub label: &'static str,

    /// The lowercase release name, used as the filename stem for both the
    /// downloaded `.dmg` and the converted `.vmdk`.
    pub name: &'static str,

    /// The board identifier passed to the download collaborator.
    pub board_id: &'static str,
}

/// The supported releases, in menu order.
pub const CATALOG: &[ReleaseEntry] = &[
    ReleaseEntry {
        menu_index: 1,
        label: "Catalina",
        name: "catalina",
        board_id: "Mac-6F01561E16C75D06",
    },
    ReleaseEntry {
        menu_index: 2,
        label: "Big Sur",
        name: "bigsur",
        board_id: "Mac-2BD1B31983FE1663",
    },
    ReleaseEntry {
        menu_index: 3,
        label: "Monterey",
        name: "monterey",
        board_id: "Mac-A5C67F76ED83108C",
    },
    ReleaseEntry {
        menu_index: 4,
        label: "Ventura",
        name: "ventura",
        board_id: "Mac-B4831CEBD52A0C4C",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_indices_are_contiguous_from_one() {
        for (pos, entry) in CATALOG.iter().enumerate() {
            assert_eq!(entry.menu_index as usize, pos + 1);
        }
    }

    #[test]
    fn board_identifiers_match_the_vendor_catalog() {
        let expected = [
            ("catalina", "Mac-6F01561E16C75D06"),
            ("bigsur", "Mac-2BD1B31983FE1663"),
            ("monterey", "Mac-A5C67F76ED83108C"),
            ("ventura", "Mac-B4831CEBD52A0C4C"),
        ];

        assert_eq!(CATALOG.len(), expected.len());
        for (entry, (name, board_id)) in CATALOG.iter().zip(expected) {
            assert_eq!(entry.name, name);
            assert_eq!(entry.board_id, board_id);
        }
    }
}
