//! End-to-end tests for `sysml validate`.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GOOD: &str = "package Demo {\n    part def Wheel;\n    part car { part w : Wheel[4]; }\n}\n";
const BAD: &str = "package Broken {\n    part def Wheel;\n";

fn sysml(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sysml").unwrap();
    cmd.current_dir(dir.path()).arg("--no-interactive");
    cmd
}

#[test]
fn empty_directory_succeeds() {
    let temp = TempDir::new().unwrap();
    temp.child("models").create_dir_all().unwrap();

    sysml(&temp)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("No .sysml files found."));
}

#[test]
fn missing_path_fails() {
    let temp = TempDir::new().unwrap();

    sysml(&temp)
        .args(["validate", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn valid_models_pass_with_local_note() {
    let temp = TempDir::new().unwrap();
    temp.child("models/a.sysml").write_str(GOOD).unwrap();
    temp.child("models/sub/b.sysml").write_str(GOOD).unwrap();
    temp.child("models/readme.txt").write_str("not a model").unwrap();

    sysml(&temp)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Validating 2 file(s)..."))
        .stdout(predicate::str::contains("2 passed, 0 failed (2 total)"))
        .stdout(predicate::str::contains("--server"));
}

#[test]
fn one_bad_file_fails_the_run() {
    let temp = TempDir::new().unwrap();
    temp.child("models/good.sysml").write_str(GOOD).unwrap();
    temp.child("models/bad.sysml").write_str(BAD).unwrap();

    sysml(&temp)
        .arg("validate")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Validation Errors"))
        .stdout(predicate::str::contains("bad.sysml"))
        .stdout(predicate::str::contains("expected '}'"))
        .stdout(predicate::str::contains("1 passed, 1 failed (2 total)"));
}

#[test]
fn deeply_nested_file_is_one_failure() {
    let temp = TempDir::new().unwrap();
    temp.child("models/a_good.sysml").write_str(GOOD).unwrap();
    temp.child("models/b_deep.sysml")
        .write_str(&"part a {".repeat(200_000))
        .unwrap();
    temp.child("models/c_bad.sysml").write_str(BAD).unwrap();

    sysml(&temp)
        .arg("validate")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("nesting too deep"))
        .stdout(predicate::str::contains("1 passed, 2 failed (3 total)"));
}

#[test]
fn single_file_argument() {
    let temp = TempDir::new().unwrap();
    temp.child("bad.sysml").write_str(BAD).unwrap();

    sysml(&temp)
        .args(["validate", "bad.sysml"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("0 passed, 1 failed (1 total)"));
}

#[test]
fn unreachable_server_falls_back_to_local() {
    let temp = TempDir::new().unwrap();
    temp.child("sysml.toml")
        .write_str("[server]\nurl = \"http://127.0.0.1:9\"\n")
        .unwrap();
    temp.child("models/a.sysml").write_str(GOOD).unwrap();

    sysml(&temp)
        .args(["validate", "--server"])
        .assert()
        .success()
        .stderr(predicate::str::contains("fell back to local validation"))
        .stdout(predicate::str::contains("1 passed, 0 failed (1 total)"))
        .stdout(predicate::str::contains("Note:"));
}

#[test]
fn invalid_config_is_an_error() {
    let temp = TempDir::new().unwrap();
    temp.child("sysml.toml")
        .write_str("[validate]\nmode = \"cloud\"\n")
        .unwrap();
    temp.child("models/a.sysml").write_str(GOOD).unwrap();

    sysml(&temp).arg("validate").assert().failure();
}

#[tokio::test(flavor = "multi_thread")]
async fn server_mode_reports_parse_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/parse"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"error": "unresolved type 'Wheel'"})),
        )
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    temp.child("sysml.toml")
        .write_str(&format!(
            "[server]\nurl = \"{}\"\n\n[validate]\nmode = \"server\"\n",
            server.uri()
        ))
        .unwrap();
    temp.child("models/a.sysml").write_str(GOOD).unwrap();

    let assert = tokio::task::spawn_blocking(move || {
        let assert = sysml(&temp).arg("validate").assert();
        drop(temp);
        assert
    })
    .await
    .unwrap();

    assert
        .code(1)
        .stdout(predicate::str::contains("unresolved type 'Wheel'"))
        .stdout(predicate::str::contains("0 passed, 1 failed (1 total)"))
        .stdout(predicate::str::contains("Note:").not());
}
