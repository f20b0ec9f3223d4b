//! Integration tests for the berth binary.
//!
//! Every `svc init` here passes enough flags that no prompt is shown.
//! Output is piped, so it is plain text without colour.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn berth(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("berth").unwrap();
    cmd.current_dir(dir)
        .env_remove("NO_COLOR")
        .env_remove("RUST_LOG");
    cmd
}

fn workspace(app: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    berth(dir.path())
        .args(["workspace", "init", "--app", app, "--account", "123456789012"])
        .assert()
        .success();
    dir
}

fn manifest(dir: &Path, service: &str) -> serde_yaml::Value {
    let raw = fs::read_to_string(dir.join("berth").join(service).join("manifest.yml")).unwrap();
    serde_yaml::from_str(&raw).unwrap()
}

// ── surface ───────────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    berth(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("svc"))
        .stdout(predicate::str::contains("workspace"));
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    berth(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn svc_init_help_shows_flags() {
    let dir = TempDir::new().unwrap();
    berth(dir.path())
        .args(["svc", "init", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--svc-type"))
        .stdout(predicate::str::contains("--dockerfile"))
        .stdout(predicate::str::contains("--image"));
}

// ── validation ────────────────────────────────────────────────────────────────

#[test]
fn image_and_dockerfile_conflict() {
    let dir = TempDir::new().unwrap();
    berth(dir.path())
        .args([
            "svc", "init", "--app", "phonetool", "--image", "nginx", "--dockerfile", "Dockerfile",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "--dockerfile and --image cannot be specified together",
        ));
}

#[test]
fn invalid_service_type_lists_choices() {
    let dir = TempDir::new().unwrap();
    berth(dir.path())
        .args(["svc", "init", "--app", "phonetool", "--svc-type", "Worker"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "invalid service type Worker: must be one of \"Load Balanced Web Service\", \"Backend Service\"",
        ));
}

#[test]
fn invalid_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    berth(dir.path())
        .args(["svc", "init", "--app", "phonetool", "--name", "Bad--Name"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("service name Bad--Name is invalid"));
}

#[test]
fn missing_dockerfile_directory_is_rejected() {
    let dir = TempDir::new().unwrap();
    berth(dir.path())
        .args([
            "svc",
            "init",
            "--app",
            "phonetool",
            "--dockerfile",
            "nowhere/Dockerfile",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("directory nowhere does not exist"));
}

#[test]
fn no_workspace_and_no_app() {
    let dir = TempDir::new().unwrap();
    berth(dir.path())
        .args(["svc", "init", "--name", "api"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "could not find an application attached to this workspace",
        ));
}

// ── execute ───────────────────────────────────────────────────────────────────

#[test]
fn load_balanced_service_from_image() {
    let dir = workspace("phonetool");

    berth(dir.path())
        .args([
            "svc",
            "init",
            "--name",
            "frontend",
            "--svc-type",
            "Load Balanced Web Service",
            "--image",
            "nginx:latest",
            "--port",
            "8080",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("frontend"))
        .stderr(predicate::str::contains(
            "Created registry entries for service frontend.",
        ));

    let doc = manifest(dir.path(), "frontend");
    assert_eq!(doc["name"], "frontend");
    assert_eq!(doc["type"], "Load Balanced Web Service");
    assert_eq!(doc["image"]["location"], "nginx:latest");
    assert_eq!(doc["image"]["port"], 8080);
    assert_eq!(doc["http"]["path"], "/");

    let registry = fs::read_to_string(dir.path().join("berth/.registry.json")).unwrap();
    assert!(registry.contains("123456789012/phonetool"));
    assert!(registry.contains("frontend"));
}

#[test]
fn second_load_balanced_service_routes_by_name() {
    let dir = workspace("phonetool");
    for name in ["frontend", "admin"] {
        berth(dir.path())
            .args([
                "svc", "init", "--name", name, "--svc-type", "lb-web-svc", "--image", "nginx",
                "--port", "80",
            ])
            .assert()
            .success();
    }

    assert_eq!(manifest(dir.path(), "frontend")["http"]["path"], "/");
    assert_eq!(manifest(dir.path(), "admin")["http"]["path"], "admin");
}

#[test]
fn backend_service_adopts_single_exposed_port_and_health_check() {
    let dir = workspace("phonetool");
    fs::create_dir_all(dir.path().join("api")).unwrap();
    fs::write(
        dir.path().join("api/Dockerfile"),
        "FROM alpine\n\
         EXPOSE 8080/tcp\n\
         HEALTHCHECK --interval=10s --retries=2 CMD curl -f http://localhost:8080/ || exit 1\n",
    )
    .unwrap();

    berth(dir.path())
        .args([
            "svc",
            "init",
            "--name",
            "api",
            "--svc-type",
            "Backend Service",
            "--dockerfile",
            "api/Dockerfile",
        ])
        .assert()
        .success();

    let doc = manifest(dir.path(), "api");
    assert_eq!(doc["type"], "Backend Service");
    assert_eq!(doc["image"]["build"]["dockerfile"], "api/Dockerfile");
    assert_eq!(doc["image"]["port"], 8080);
    assert_eq!(doc["image"]["healthcheck"]["interval"], "10s");
    assert_eq!(doc["image"]["healthcheck"]["retries"], 2);
    assert_eq!(doc["image"]["healthcheck"]["command"][0], "CMD-SHELL");
    assert!(doc.get("http").is_none());
}

#[test]
fn dockerfile_given_from_subdirectory_is_recorded_from_workspace_root() {
    let dir = workspace("phonetool");
    let api = dir.path().join("api");
    fs::create_dir_all(&api).unwrap();
    fs::write(api.join("Dockerfile"), "FROM alpine\n").unwrap();

    berth(&api)
        .args([
            "svc",
            "init",
            "--name",
            "api",
            "--svc-type",
            "Backend Service",
            "--dockerfile",
            "Dockerfile",
        ])
        .assert()
        .success();

    let doc = manifest(dir.path(), "api");
    assert_eq!(doc["image"]["build"]["dockerfile"], "api/Dockerfile");
    assert_eq!(doc["image"]["build"]["context"], "api");
}

#[test]
fn rerun_overwrites_manifest() {
    let dir = workspace("phonetool");
    let args = [
        "svc", "init", "--name", "cache", "--svc-type", "backend-svc", "--image",
    ];

    berth(dir.path()).args(args).arg("redis:6").assert().success();
    berth(dir.path()).args(args).arg("redis:7").assert().success();

    assert_eq!(manifest(dir.path(), "cache")["image"]["location"], "redis:7");
    let store = fs::read_to_string(dir.path().join("berth/.store.json")).unwrap();
    assert_eq!(store.matches("\"cache\"").count(), 1);
}

#[test]
fn unknown_application_exits_three_and_writes_nothing() {
    let dir = workspace("phonetool");
    berth(dir.path())
        .args([
            "svc", "init", "--app", "ghost", "--name", "api", "--svc-type", "backend-svc",
            "--image", "redis",
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "get application ghost: application ghost does not exist",
        ));

    assert!(!dir.path().join("berth/api/manifest.yml").exists());
}

#[test]
fn json_output_summarises_registration() {
    let dir = workspace("phonetool");
    let out = berth(dir.path())
        .args([
            "--output-format",
            "json",
            "svc",
            "init",
            "--name",
            "cache",
            "--svc-type",
            "backend-svc",
            "--image",
            "redis",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["application"], "phonetool");
    assert_eq!(json["service"], "cache");
    assert_eq!(json["type"], "Backend Service");
}

#[test]
fn workspace_init_rejects_a_different_application() {
    let dir = workspace("phonetool");
    berth(dir.path())
        .args(["workspace", "init", "--app", "other"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("already belongs to application phonetool"));
}

// ── config ────────────────────────────────────────────────────────────────────

#[test]
fn config_get_reads_explicit_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("berth.toml");
    fs::write(&file, "[workspace]\ndockerfile_search_depth = 5\n").unwrap();

    berth(dir.path())
        .args(["--config", file.to_str().unwrap()])
        .args(["config", "get", "workspace.dockerfile_search_depth"])
        .assert()
        .success()
        .stdout(predicate::str::diff("5\n"));
}

#[test]
fn config_get_unknown_key_exits_four() {
    let dir = TempDir::new().unwrap();
    berth(dir.path())
        .args(["config", "get", "nope"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key 'nope'"));
}

#[test]
fn missing_explicit_config_file_exits_four() {
    let dir = TempDir::new().unwrap();
    berth(dir.path())
        .args(["--config", "missing.toml", "config", "list"])
        .assert()
        .code(4);
}

#[test]
fn config_path_prints_a_toml_file() {
    let dir = TempDir::new().unwrap();
    berth(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".toml"));
}
