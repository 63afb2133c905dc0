mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn cross_referenced_document_passes() {
    let t = TestEnv::new();
    t.bin()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("ok: 7 items, 2 annotations"));
}

#[test]
fn dangling_reference_fails_every_command() {
    let broken = common::SAMPLE.replace(r#"["n1", "n2"]"#, r#"["n1", "ghost"]"#);
    let t = TestEnv::with_document(&broken);

    t.bin()
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("references missing annotation"));

    t.bin()
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid bootstrap document"));
}

#[test]
fn unreadable_document_reports_the_path() {
    assert_cmd::Command::cargo_bin("cineboard")
        .expect("binary")
        .args(["--data", "/nonexistent/bootstrap.json", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bootstrap.json"));
}
