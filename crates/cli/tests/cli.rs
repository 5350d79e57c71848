use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn notehub() -> Command {
    let mut cmd = Command::cargo_bin("notehub").unwrap();
    // keep tests hermetic on machines with real vaults
    cmd.env_remove("NOTEHUB_VAULT_PATH")
        .env_remove("DATAHUB_GMS")
        .env_remove("DATAHUB_DOMAIN_URN");
    cmd
}

fn make_vault(root: &Path) {
    fs::create_dir_all(root.join(".obsidian")).unwrap();
    fs::write(root.join("inbox.md"), "size: 10\n").unwrap();
    fs::create_dir_all(root.join("projects")).unwrap();
    fs::write(root.join("projects/plan.md"), "flag: true\n").unwrap();
}

#[test]
fn list_prints_vault_and_notes() {
    let temp = tempdir().unwrap();
    let vault = temp.path().join("Personal");
    make_vault(&vault);

    notehub()
        .args(["list", "--vault-path"])
        .arg(&vault)
        .assert()
        .success()
        .stdout(predicate::str::contains("Vault: Personal"))
        .stdout(predicate::str::contains("Path: inbox.md"))
        .stdout(predicate::str::contains("projects/plan.md"));
}

#[test]
fn list_json_reports_inferred_fields() {
    let temp = tempdir().unwrap();
    let vault = temp.path().join("Personal");
    make_vault(&vault);

    let output = notehub()
        .args(["list", "--json", "--vault-path"])
        .arg(&vault)
        .output()
        .unwrap();
    assert!(output.status.success());

    let listings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let notes = listings[0]["notes"].as_array().unwrap();
    assert_eq!(notes.len(), 2);

    let inbox = notes
        .iter()
        .find(|n| n["relative_path"] == "inbox.md")
        .unwrap();
    assert_eq!(inbox["fields"][0]["name"], "size");
    assert_eq!(inbox["fields"][0]["field_type"], "number");
}

#[test]
fn list_with_missing_vault_is_empty_not_an_error() {
    let temp = tempdir().unwrap();

    notehub()
        .args(["list", "--vault-path"])
        .arg(temp.path().join("does-not-exist"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 vault(s)"));
}

#[test]
fn ingest_dry_run_makes_no_network_calls() {
    let temp = tempdir().unwrap();
    let vault = temp.path().join("Personal");
    make_vault(&vault);

    notehub()
        .args(["ingest", "--dry-run", "--vault-path"])
        .arg(&vault)
        .assert()
        .success()
        .stderr(predicate::str::contains("Dry run"))
        .stderr(predicate::str::contains("projects/plan.md"));
}

#[test]
fn ingest_without_vaults_fails_with_usage_hint() {
    let temp = tempdir().unwrap();

    notehub()
        .args(["ingest", "--dry-run", "--vault-path"])
        .arg(temp.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no vaults found"));
}

#[test]
fn check_domain_requires_urns() {
    notehub().arg("check-domain").assert().failure();
}
