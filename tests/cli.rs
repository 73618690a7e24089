use std::error::Error;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn Error>>;

// helper: tempdir/dir (700) containing file.txt with the given mode
fn tree(file_mode: u32) -> Result<(TempDir, PathBuf), Box<dyn Error>> {
    let root = tempfile::tempdir()?;
    let dir = root.path().join("dir");
    fs::create_dir(&dir)?;
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o700))?;
    let file = dir.join("file.txt");
    fs::write(&file, "data")?;
    fs::set_permissions(&file, fs::Permissions::from_mode(file_mode))?;
    Ok((root, file))
}

#[test]
fn dies_no_args() -> TestResult {
    Command::cargo_bin("unixperms")?
        .assert()
        .failure()
        .stderr(contains("USAGE"));
    Ok(())
}

#[test]
fn reports_missing_read_write() -> TestResult {
    let (_root, file) = tree(0o000)?;
    let name = file.display().to_string();
    Command::cargo_bin("unixperms")?
        .arg(&name)
        .assert()
        .code(2)
        .stdout(contains(format!("Owner can't read, write file: {name}")))
        .stdout(contains(format!("fix: sudo chmod 600 {name}")));
    Ok(())
}

#[test]
fn no_sudo_suggestion() -> TestResult {
    let (_root, file) = tree(0o400)?;
    let name = file.display().to_string();
    Command::cargo_bin("unixperms")?
        .args(["--no-sudo", name.as_str()])
        .assert()
        .code(2)
        .stdout(contains(format!("fix: chmod 600 {name}")));
    Ok(())
}

#[test]
fn accessible_file_is_ok() -> TestResult {
    let (_root, file) = tree(0o600)?;
    let name = file.display().to_string();
    Command::cargo_bin("unixperms")?
        .arg(&name)
        .assert()
        .success()
        .stdout(contains(format!("{name}: access OK")));
    Ok(())
}

#[test]
fn info_report() -> TestResult {
    let (_root, file) = tree(0o640)?;
    Command::cargo_bin("unixperms")?
        .arg("--info")
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("Exists: Yes"))
        .stdout(contains("Type: file"))
        .stdout(contains("Permissions: 0640 (rw-r-----)"))
        .stdout(contains("Current user is owner: Yes"));
    Ok(())
}

#[test]
fn info_on_missing_path() -> TestResult {
    let root = tempfile::tempdir()?;
    Command::cargo_bin("unixperms")?
        .arg("-i")
        .arg(root.path().join("absent"))
        .assert()
        .success()
        .stdout(contains("Exists: No"));
    Ok(())
}

#[test]
fn failing_groups_command_is_fatal_when_strict() -> TestResult {
    // root owns every ancestor, so its walk never asks for groups
    if users::get_effective_uid() == 0 {
        return Ok(());
    }
    let (_root, file) = tree(0o600)?;
    Command::cargo_bin("unixperms")?
        .args(["--strict", "--groups-command", "/bin/false"])
        .arg(&file)
        .assert()
        .code(1)
        .stderr(contains("group_members: lookup failed"));
    Ok(())
}

#[test]
fn failing_groups_command_is_tolerated() -> TestResult {
    let (_root, file) = tree(0o600)?;
    let name = file.display().to_string();
    Command::cargo_bin("unixperms")?
        .args(["--groups-command", "/bin/false", name.as_str()])
        .assert()
        .success()
        .stdout(contains(format!("{name}: access OK")));
    Ok(())
}

#[test]
fn system_groups_command() -> TestResult {
    let (_root, file) = tree(0o600)?;
    Command::cargo_bin("unixperms")?
        .arg("-g")
        .arg(&file)
        .assert()
        .success();
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn json_issues() -> TestResult {
    let (_root, file) = tree(0o000)?;
    Command::cargo_bin("unixperms")?
        .arg("--json")
        .arg(&file)
        .assert()
        .code(2)
        .stdout(contains("\"corrective\": \"600\""))
        .stdout(contains("\"role\": \"owner\""));
    Ok(())
}
