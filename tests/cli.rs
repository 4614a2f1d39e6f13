use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

/// Runs the binary in an empty directory, without credentials or a config file
fn summarizer_command(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("issue-summarizer").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("OPENAI_API_KEY")
        .env_remove("GITHUB_TOKEN")
        .env_remove("ISSUE_SUMMARIZER__MODEL")
        .env("ISSUE_SUMMARIZER__LOG_DIR", dir.path().join("logs"));
    cmd
}

#[test]
fn test_invalid_repository() {
    let dir = TempDir::new().unwrap();

    summarizer_command(&dir)
        .args(["summarize", "reponame", "1"])
        .assert()
        .failure()
        .stderr(contains("Invalid repository format 'reponame'"));
}

#[test]
fn test_missing_api_key() {
    let dir = TempDir::new().unwrap();

    summarizer_command(&dir)
        .args(["summarize", "owner/repo", "1"])
        .assert()
        .failure()
        .stderr(contains("OPENAI_API_KEY environment variable not set"))
        .stderr(contains("README.md"));
}

#[test]
fn test_unsupported_model_from_environment() {
    let dir = TempDir::new().unwrap();

    summarizer_command(&dir)
        .env("ISSUE_SUMMARIZER__MODEL", "claude-3-opus")
        .args(["summarize", "owner/repo", "1"])
        .assert()
        .failure()
        .stderr(contains("Unsupported model: claude-3-opus"));
}

#[test]
fn test_model_flag_overrides_config() {
    let dir = TempDir::new().unwrap();

    summarizer_command(&dir)
        .args(["summarize", "owner/repo", "1", "--model", "llama-3-70b"])
        .assert()
        .failure()
        .stderr(contains("Unsupported model: llama-3-70b"));
}

#[test]
fn test_print_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("issue-summarizer.toml"),
        "model = \"gpt-4-turbo-2024-04-09\"\n",
    )
    .unwrap();

    summarizer_command(&dir)
        .arg("--print-config")
        .assert()
        .success()
        .stdout(contains("model = \"gpt-4-turbo-2024-04-09\""))
        .stdout(contains("github_api_base = \"https://api.github.com\""));
}

#[test]
fn test_config_path() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("other.toml"),
        "[pricing]\nunit = 1000\n\n[[pricing.models]]\nmodel = \"gpt-4o\"\ninput = 0.005\noutput = 0.015\n",
    )
    .unwrap();

    summarizer_command(&dir)
        .args(["--config-path", "other.toml", "models"])
        .assert()
        .success()
        .stdout(contains("Prices in US $ per 1000 tokens"))
        .stdout(contains("gpt-4o: input 0.005, output 0.015"));
}

#[test]
fn test_models() {
    let dir = TempDir::new().unwrap();

    summarizer_command(&dir)
        .arg("models")
        .assert()
        .success()
        .stdout(contains("gpt-3.5-turbo-0125: input 0.5, output 1.5"))
        .stdout(contains("gpt-4-turbo-2024-04-09: input 10, output 30"));
}
