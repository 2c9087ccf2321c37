// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end pipeline tests with the external collaborators replaced by
//! recording doubles.

use std::cell::RefCell;
use std::io::Cursor;
use std::rc::Rc;

use camino::Utf8PathBuf;

use recovery_maker::catalog::CATALOG;
use recovery_maker::convert::{ConversionJob, ConvertError, ImageConverter};
use recovery_maker::fetch::{DownloadRequest, FetchError, RecoveryDownloader};
use recovery_maker::make_recovery_image::MakeRecoveryImageScript;
use recovery_maker::runner::run_script;
use recovery_maker::select::select_release;
use recovery_maker::util::CommandError;

/// What the doubles observed, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Download(DownloadRequest),
    Convert(ConversionJob),
}

type CallLog = Rc<RefCell<Vec<Call>>>;

/// A download double that records its request and, on success, writes the
/// `.dmg` the real collaborator would have produced.
struct FakeDownloader {
    calls: CallLog,
    output_dir: Utf8PathBuf,
    fail: bool,
}

impl RecoveryDownloader for FakeDownloader {
    fn download(&self, request: &DownloadRequest) -> Result<(), FetchError> {
        self.calls.borrow_mut().push(Call::Download(request.clone()));
        if self.fail {
            return Err(FetchError::Command(CommandError::Launch {
                command: "macrecovery".to_string(),
                source: std::io::Error::other("network unreachable"),
            }));
        }

        let dmg = self.output_dir.join(request.dmg_filename());
        std::fs::write(dmg, b"not a real disk image").unwrap();
        Ok(())
    }
}

struct FakeConverter {
    calls: CallLog,
    fail: bool,
}

impl ImageConverter for FakeConverter {
    fn convert(&self, job: &ConversionJob) -> Result<(), ConvertError> {
        self.calls.borrow_mut().push(Call::Convert(job.clone()));
        if self.fail {
            return Err(ConvertError::Command(CommandError::Launch {
                command: "qemu-img".to_string(),
                source: std::io::Error::other("no such file or directory"),
            }));
        }
        Ok(())
    }
}

struct Harness {
    calls: CallLog,
    output_dir: Utf8PathBuf,
    // Held for its Drop; the directory outlives the run.
    _dir: tempfile::TempDir,
}

impl Harness {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = Utf8PathBuf::from_path_buf(dir.path().to_owned()).unwrap();
        Self { calls: Rc::new(RefCell::new(Vec::new())), output_dir, _dir: dir }
    }

    fn script(
        &self,
        menu_input: &str,
        fail_download: bool,
        fail_convert: bool,
    ) -> MakeRecoveryImageScript {
        let mut output = Vec::new();
        let selection =
            select_release(&mut Cursor::new(menu_input), &mut output).unwrap();

        MakeRecoveryImageScript::with_collaborators(
            selection,
            self.output_dir.clone(),
            Rc::new(FakeDownloader {
                calls: self.calls.clone(),
                output_dir: self.output_dir.clone(),
                fail: fail_download,
            }),
            Rc::new(FakeConverter { calls: self.calls.clone(), fail: fail_convert }),
        )
    }
}

#[test]
fn selecting_monterey_downloads_and_converts_the_right_image() {
    let harness = Harness::new();
    let script = harness.script("3\n", false, false);
    run_script(Box::new(script), false).unwrap();

    let calls = harness.calls.borrow();
    assert_eq!(
        *calls,
        vec![
            Call::Download(DownloadRequest {
                board_id: "Mac-A5C67F76ED83108C".to_string(),
                model_id: "00000000000000000",
                base_name: "monterey".to_string(),
                os_version: "latest",
            }),
            Call::Convert(ConversionJob {
                source: harness.output_dir.join("monterey.dmg"),
                target: harness.output_dir.join("monterey.vmdk"),
            }),
        ]
    );
}

#[test]
fn rejected_menu_input_still_reaches_the_chosen_release() {
    let harness = Harness::new();
    let script = harness.script("9\n2\n", false, false);
    run_script(Box::new(script), false).unwrap();

    let calls = harness.calls.borrow();
    match &calls[0] {
        Call::Download(request) => {
            assert_eq!(request.base_name, "bigsur");
            assert_eq!(request.board_id, "Mac-2BD1B31983FE1663");
        }
        other => panic!("expected a download call, got {other:?}"),
    }
}

#[test]
fn download_failure_aborts_the_run_before_conversion() {
    let harness = Harness::new();
    let script = harness.script("1\n", true, false);
    let err = run_script(Box::new(script), false).unwrap_err();
    assert!(err.to_string().contains("macrecovery"));

    let calls = harness.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0], Call::Download(_)));
}

#[test]
fn conversion_failure_is_reported_not_swallowed() {
    let harness = Harness::new();
    let script = harness.script("4\n", false, true);
    let err = run_script(Box::new(script), false).unwrap_err();
    assert!(err.to_string().contains("qemu-img"));

    let calls = harness.calls.borrow();
    assert_eq!(calls.len(), 2);
}

/// A downloader that demands a command that cannot exist on any PATH.
struct UnsatisfiableDownloader;

impl RecoveryDownloader for UnsatisfiableDownloader {
    fn download(&self, _request: &DownloadRequest) -> Result<(), FetchError> {
        panic!("a step ran even though its prerequisite was missing");
    }

    fn prereq_command(&self) -> Option<&'static str> {
        Some("recovery-maker-test-nonexistent-command")
    }
}

#[test]
fn missing_prerequisite_command_aborts_before_any_step_runs() {
    let harness = Harness::new();
    let script = MakeRecoveryImageScript::with_collaborators(
        &CATALOG[0],
        harness.output_dir.clone(),
        Rc::new(UnsatisfiableDownloader),
        Rc::new(FakeConverter { calls: harness.calls.clone(), fail: false }),
    );

    let err = run_script(Box::new(script), false).unwrap_err();
    assert!(err.to_string().contains("prerequisites"));
    assert!(harness.calls.borrow().is_empty());
}

#[test]
fn every_release_uses_its_own_name_for_both_artifacts() {
    for (index, entry) in CATALOG.iter().enumerate() {
        let harness = Harness::new();
        let script = harness.script(&format!("{}\n", index + 1), false, false);
        run_script(Box::new(script), false).unwrap();

        let calls = harness.calls.borrow();
        assert_eq!(
            calls[1],
            Call::Convert(ConversionJob {
                source: harness.output_dir.join(format!("{}.dmg", entry.name)),
                target: harness.output_dir.join(format!("{}.vmdk", entry.name)),
            })
        );
    }
}
