use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use tempfile::TempDir;

/// Binary run from an empty directory with no provider credentials, so no
/// `.env` file or inherited key can leak in.
fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dealer-finder").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("TAVILY_API_KEY")
        .env_remove("GROQ_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_describes_the_tool() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Tata Motors dealership"))
        .stdout(contains("--max-results"));
}

#[test]
fn query_is_required() {
    let dir = TempDir::new().unwrap();
    cmd(&dir).assert().failure();
}

#[test]
fn refuses_to_start_without_search_key() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .env("GROQ_API_KEY", "gsk-test")
        .args(["Nearest", "Tata", "dealer", "in", "Wakad", "Pune"])
        .assert()
        .failure()
        .stderr(contains("TAVILY_API_KEY"));
}

#[test]
fn refuses_to_start_without_model_key() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .env("TAVILY_API_KEY", "tvly-test")
        .arg("showroom near Andheri")
        .assert()
        .failure()
        .stderr(contains("GROQ_API_KEY"));
}

#[test]
fn reads_credentials_from_dotenv_before_validating_settings() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".env"),
        "TAVILY_API_KEY=tvly-test\nGROQ_API_KEY=gsk-test\n",
    )
    .unwrap();

    // Both keys come from .env, so the failure is the zero result cap.
    cmd(&dir)
        .args(["--max-results", "0", "Tata Baner"])
        .assert()
        .failure()
        .stderr(contains("max_results must be at least 1"));
}

#[test]
fn rejects_malformed_settings_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("finder.json");
    fs::write(&path, "{ not json").unwrap();

    cmd(&dir)
        .env("TAVILY_API_KEY", "tvly-test")
        .env("GROQ_API_KEY", "gsk-test")
        .arg("--config")
        .arg(&path)
        .arg("Tata Baner")
        .assert()
        .failure()
        .stderr(contains("failed to parse settings file"));
}
