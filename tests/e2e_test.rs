/// End-to-end tests for the CLI
///
/// Runs go through fixture mode (`--fixture-dir` plus `--output`), which needs
/// neither a snapshot service, a scanner binary nor network access.
use assert_cmd::cargo::cargo_bin_cmd;
use hostvuln::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SCAN_FIXTURE: &str = r#"{
  "result": {
    "libraries": [
      { "path": "usr/lib/libfoo.so.1", "name": "libfoo", "version": "1.2", "ecosystem": "os" },
      { "path": "opt/app/lib/libbar.so", "name": "libbar", "version": "3.0" }
    ],
    "applications": [
      { "name": "editor", "version": "5.1", "vendor": "Example Corp" }
    ]
  }
}"#;

const KNOWN_VULNS: &str = r#"[
  { "name": "CVE-1", "detailedName": "libfoo", "version": "1.2", "severity": "HIGH", "fixedVersion": "1.3" },
  { "name": "CVE-2", "detailedName": "libfoo", "version": "1.0", "severity": "LOW" }
]"#;

fn write_fixtures(dir: &Path, known_vulns: &str) {
    fs::write(dir.join("scan-root.json"), SCAN_FIXTURE).unwrap();
    fs::write(dir.join("known_vulns.json"), known_vulns).unwrap();
}

fn offline_args<'a>(fixtures: &'a str, output: &'a str) -> Vec<&'a str> {
    vec![
        "--subscription-id",
        "sub-1",
        "--cloud-platform",
        "AWS",
        "--provider-id",
        "i-0123456789abcdef0",
        "--volume",
        "/",
        "--fixture-dir",
        fixtures,
        "--output",
        output,
    ]
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("hostvuln").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("hostvuln").arg("--version").assert().code(0);
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("hostvuln")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Non-numeric page size
    #[test]
    fn test_exit_code_invalid_page_size() {
        cargo_bin_cmd!("hostvuln")
            .args(["--page-size", "lots"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - required setting missing
    #[test]
    fn test_exit_code_missing_required_setting() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("hostvuln")
            .current_dir(dir.path())
            .args(["--cloud-platform", "AWS", "--provider-id", "i-1"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("subscription_id"));
    }

    /// Exit code 3: Application error - unknown snapshot mode
    #[test]
    fn test_exit_code_invalid_snapshot_mode() {
        let dir = TempDir::new().unwrap();
        let fixtures = dir.path().to_str().unwrap();
        let output = dir.path().join("out.json");
        let mut args = offline_args(fixtures, output.to_str().unwrap());
        args.extend(["--snapshot-mode", "lvm"]);

        cargo_bin_cmd!("hostvuln")
            .current_dir(dir.path())
            .args(args)
            .assert()
            .code(3)
            .stderr(predicate::str::contains("snapshot_mode"));
    }

    /// Exit code 3: Application error - missing feed fixture is fatal
    #[test]
    fn test_exit_code_missing_feed_fixture() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("scan-root.json"), SCAN_FIXTURE).unwrap();
        let output = dir.path().join("out.json");

        cargo_bin_cmd!("hostvuln")
            .current_dir(dir.path())
            .args(offline_args(
                dir.path().to_str().unwrap(),
                output.to_str().unwrap(),
            ))
            .assert()
            .code(3)
            .stderr(predicate::str::contains("known_vulns.json"));

        assert!(!output.exists());
    }
}

mod fixture_run_tests {
    use super::*;

    #[test]
    fn test_fixture_run_writes_payload() {
        let dir = TempDir::new().unwrap();
        write_fixtures(dir.path(), KNOWN_VULNS);
        let output = dir.path().join("findings.json");

        cargo_bin_cmd!("hostvuln")
            .current_dir(dir.path())
            .args(offline_args(
                dir.path().to_str().unwrap(),
                output.to_str().unwrap(),
            ))
            .assert()
            .code(0)
            .stdout(predicate::str::contains("1 finding(s), payload published"));

        let payload: UploadPayload =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(
            payload.integration_id.to_string(),
            DEFAULT_INTEGRATION_ID
        );
        assert_eq!(payload.data_sources[0].id, "sub-1");

        let asset = &payload.data_sources[0].assets[0];
        assert_eq!(asset.asset_identifier.provider_id, "i-0123456789abcdef0");
        assert_eq!(asset.vulnerability_findings.len(), 1);
        assert_eq!(asset.vulnerability_findings[0].name, "CVE-1");
        assert_eq!(
            asset.vulnerability_findings[0].path.as_deref(),
            Some("/usr/lib/libfoo.so.1")
        );
    }

    #[test]
    fn test_windows_fixtures_replay_with_single_separator() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("scan-C.json"),
            r#"{"result":{"libraries":[{"path":"\\Windows\\System32\\libfoo.dll","name":"libfoo","version":"1.2"}]}}"#,
        )
        .unwrap();
        fs::write(dir.path().join("known_vulns.json"), KNOWN_VULNS).unwrap();
        let output = dir.path().join("findings.json");
        let mut args = offline_args(dir.path().to_str().unwrap(), output.to_str().unwrap());
        args.retain(|arg| *arg != "/");
        let volume_at = args.iter().position(|arg| *arg == "--volume").unwrap();
        args.insert(volume_at + 1, "C:\\");

        cargo_bin_cmd!("hostvuln")
            .current_dir(dir.path())
            .args(args)
            .assert()
            .code(0);

        let payload: UploadPayload =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let finding = &payload.data_sources[0].assets[0].vulnerability_findings[0];
        assert_eq!(finding.path.as_deref(), Some("C:\\Windows\\System32\\libfoo.dll"));
    }

    #[test]
    fn test_fixture_run_without_findings_writes_nothing() {
        let dir = TempDir::new().unwrap();
        write_fixtures(
            dir.path(),
            r#"[{ "name": "CVE-9", "detailedName": "libzip", "version": "0.1", "severity": "LOW" }]"#,
        );
        let output = dir.path().join("findings.json");

        cargo_bin_cmd!("hostvuln")
            .current_dir(dir.path())
            .args(offline_args(
                dir.path().to_str().unwrap(),
                output.to_str().unwrap(),
            ))
            .assert()
            .code(0)
            .stdout(predicate::str::contains("nothing published"));

        assert!(!output.exists());
    }

    #[test]
    fn test_missing_scan_fixture_skips_volume_but_run_succeeds() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("known_vulns.json"), KNOWN_VULNS).unwrap();
        let output = dir.path().join("findings.json");

        cargo_bin_cmd!("hostvuln")
            .current_dir(dir.path())
            .args(offline_args(
                dir.path().to_str().unwrap(),
                output.to_str().unwrap(),
            ))
            .assert()
            .code(0)
            .stdout(predicate::str::contains("skipped 1"));

        assert!(!output.exists());
    }

    #[test]
    fn test_range_matching_flags_older_versions() {
        let dir = TempDir::new().unwrap();
        write_fixtures(
            dir.path(),
            r#"[{ "name": "CVE-7", "detailedName": "libbar", "version": "<3.1", "severity": "MEDIUM" }]"#,
        );
        let output = dir.path().join("findings.json");
        let mut args = offline_args(dir.path().to_str().unwrap(), output.to_str().unwrap());
        args.extend(["--version-matching", "range"]);

        cargo_bin_cmd!("hostvuln")
            .current_dir(dir.path())
            .args(args)
            .assert()
            .code(0);

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("CVE-7"));
        assert!(written.contains("/opt/app/lib/libbar.so"));
    }

    #[test]
    fn test_record_fixtures_dir_captures_replayable_inputs() {
        let dir = TempDir::new().unwrap();
        write_fixtures(dir.path(), KNOWN_VULNS);
        let recorded = dir.path().join("recorded");
        let output = dir.path().join("findings.json");
        let mut args = offline_args(dir.path().to_str().unwrap(), output.to_str().unwrap());
        args.extend(["--record-fixtures-dir", recorded.to_str().unwrap()]);

        cargo_bin_cmd!("hostvuln")
            .current_dir(dir.path())
            .args(args)
            .assert()
            .code(0);

        assert!(recorded.join("scan-root.json").exists());
        let feed = fs::read_to_string(recorded.join("known_vulns.json")).unwrap();
        assert!(feed.contains("CVE-1"));
        assert!(feed.contains("CVE-2"));
    }
}
