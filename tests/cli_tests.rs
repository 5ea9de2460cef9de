use assert_cmd::Command;
use mockito::{Matcher, Server, ServerGuard};
use predicates::prelude::*;
use tempfile::TempDir;

const BUDGETS: &str = r#"{"data": {"budgets": [
    {"id": "b-1", "name": "Household"},
    {"id": "b-2", "name": "Business"}
]}}"#;

const ACCOUNTS: &str = r#"{"data": {"accounts": [
    {"id": "a-1", "name": "Brokerage", "type": "otherAsset", "on_budget": false,
     "closed": false, "balance": 150000, "deleted": false},
    {"id": "a-2", "name": "House", "type": "otherAsset", "on_budget": false,
     "closed": false, "balance": 200000, "deleted": false}
]}}"#;

/// The binary with an isolated config dir and no ambient token
fn updater(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ynab-updater").unwrap();
    cmd.env("YNAB_UPDATER_CONFIG_DIR", config_dir.path())
        .env_remove("YNAB_API_TOKEN")
        .env_remove("YNAB_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// The binary talking to `server` with a token
fn connected(config_dir: &TempDir, server: &ServerGuard) -> Command {
    let mut cmd = updater(config_dir);
    cmd.env("YNAB_API_TOKEN", "test-token")
        .env("YNAB_API_URL", server.url());
    cmd
}

/// Config dir with budget b-1 selected and Brokerage tracked
fn configured(server: &mut ServerGuard) -> TempDir {
    server
        .mock("GET", "/budgets")
        .with_status(200)
        .with_body(BUDGETS)
        .create();
    server
        .mock("GET", "/budgets/b-1/accounts")
        .with_status(200)
        .with_body(ACCOUNTS)
        .expect_at_least(1)
        .create();

    let dir = TempDir::new().unwrap();
    connected(&dir, server)
        .args(["config", "select-budget", "household"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Active budget: Household"));
    connected(&dir, server)
        .args(["config", "select-accounts", "Brokerage"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tracking 1 account(s):"));
    dir
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    updater(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("accounts"));
}

#[test]
fn test_config_show_defaults() {
    let dir = TempDir::new().unwrap();
    updater(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("YNAB Updater Configuration"))
        .stdout(predicate::str::contains("API token:        not set"))
        .stdout(predicate::str::contains("Budget:           none selected"))
        .stdout(predicate::str::contains("Adjustment memo:  Balance adjusted by YNAB Updater"))
        .stdout(predicate::str::contains("Cleared status:   cleared"));
}

#[test]
fn test_config_path_is_inside_config_dir() {
    let dir = TempDir::new().unwrap();
    updater(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(dir.path().to_string_lossy().as_ref()))
        .stdout(predicate::str::contains("config.json"));
}

#[test]
fn test_set_memo_and_cleared_status_persist() {
    let dir = TempDir::new().unwrap();
    updater(&dir)
        .args(["config", "set-memo", "Monthly valuation"])
        .assert()
        .success();
    updater(&dir)
        .args(["config", "set-cleared", "uncleared"])
        .assert()
        .success();

    updater(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Adjustment memo:  Monthly valuation"))
        .stdout(predicate::str::contains("Cleared status:   uncleared"));
}

#[test]
fn test_config_reset_deletes_file() {
    let dir = TempDir::new().unwrap();
    updater(&dir)
        .args(["config", "set-memo", "Monthly valuation"])
        .assert()
        .success();
    assert!(dir.path().join("config.json").exists());

    updater(&dir)
        .args(["config", "reset"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration kept."));
    assert!(dir.path().join("config.json").exists());

    updater(&dir)
        .args(["config", "reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration reset."));
    assert!(!dir.path().join("config.json").exists());

    updater(&dir)
        .args(["config", "reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No configuration file to reset."));
}

#[test]
fn test_set_cleared_rejects_unknown_status() {
    let dir = TempDir::new().unwrap();
    updater(&dir)
        .args(["config", "set-cleared", "pending"])
        .assert()
        .failure();
}

#[test]
fn test_token_flag_is_not_saved() {
    let dir = TempDir::new().unwrap();
    updater(&dir)
        .args(["--token", "abcdef123", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("set (abcd…)"));

    updater(&dir)
        .args(["--token", "abcdef123", "config", "set-memo", "x"])
        .assert()
        .success();
    let saved = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert!(!saved.contains("abcdef123"));
}

#[test]
fn test_accounts_without_token_is_config_error() {
    let dir = TempDir::new().unwrap();
    updater(&dir)
        .arg("accounts")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_update_requires_assignments() {
    let dir = TempDir::new().unwrap();
    updater(&dir).arg("update").assert().failure();
}

#[test]
fn test_update_rejects_malformed_assignment() {
    let dir = TempDir::new().unwrap();
    updater(&dir)
        .args(["update", "Brokerage"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expected ACCOUNT=BALANCE"));
}

#[test]
fn test_invalid_log_level() {
    let dir = TempDir::new().unwrap();
    updater(&dir)
        .args(["--log-level", "loud", "config", "path"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log level"));
}

#[test]
fn test_budgets_lists_from_service() {
    let mut server = Server::new();
    server
        .mock("GET", "/budgets")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_body(BUDGETS)
        .create();

    let dir = TempDir::new().unwrap();
    connected(&dir, &server)
        .arg("budgets")
        .assert()
        .success()
        .stdout(predicate::str::contains("Household"))
        .stdout(predicate::str::contains("Business"));
}

#[test]
fn test_accounts_lists_tracked_only() {
    let mut server = Server::new();
    let dir = configured(&mut server);

    connected(&dir, &server)
        .arg("accounts")
        .assert()
        .success()
        .stdout(predicate::str::contains("Brokerage"))
        .stdout(predicate::str::contains("$150.00"))
        .stdout(predicate::str::contains("a-2").not());
}

#[test]
fn test_update_posts_adjustment() {
    let mut server = Server::new();
    let dir = configured(&mut server);
    let post = server
        .mock("POST", "/budgets/b-1/transactions")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "transaction": {"account_id": "a-1", "amount": 25500, "approved": true}
        })))
        .with_status(201)
        .with_body(r#"{"data": {"transaction_ids": ["t-1"], "transaction": {"id": "t-1"}}}"#)
        .expect(1)
        .create();

    connected(&dir, &server)
        .args(["update", "brokerage=$175.50", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Brokerage: $25.50 (New balance: $175.50)"))
        .stdout(predicate::str::contains("1 updated"));
    post.assert();
}

#[test]
fn test_update_dry_run_posts_nothing() {
    let mut server = Server::new();
    let dir = configured(&mut server);
    let post = server
        .mock("POST", "/budgets/b-1/transactions")
        .expect(0)
        .create();

    connected(&dir, &server)
        .args(["update", "Brokerage=180", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run: 1 adjustment(s) not posted."));
    post.assert();
}

#[test]
fn test_update_unchanged_balance_posts_nothing() {
    let mut server = Server::new();
    let dir = configured(&mut server);
    let post = server
        .mock("POST", "/budgets/b-1/transactions")
        .expect(0)
        .create();

    connected(&dir, &server)
        .args(["update", "Brokerage=150.00", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to post."));
    post.assert();
}

#[test]
fn test_update_unknown_account_fails() {
    let mut server = Server::new();
    let dir = configured(&mut server);

    connected(&dir, &server)
        .args(["update", "House=1", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found: House"));
}

#[test]
fn test_update_failed_post_exits_non_zero() {
    let mut server = Server::new();
    let dir = configured(&mut server);
    server
        .mock("POST", "/budgets/b-1/transactions")
        .with_status(500)
        .with_body(r#"{"error": {"id": "500", "name": "internal_server_error", "detail": "Boom"}}"#)
        .create();

    connected(&dir, &server)
        .args(["update", "Brokerage=160", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 account(s) not updated: Brokerage"));
}

#[test]
fn test_update_plain_decimal_in_euro_budget() {
    let mut server = Server::new();
    server
        .mock("GET", "/budgets")
        .with_status(200)
        .with_body(
            r#"{"data": {"budgets": [{"id": "b-1", "name": "Household", "currency_format": {
                "decimal_digits": 2, "decimal_separator": ",", "group_separator": ".",
                "symbol_first": false, "currency_symbol": "€"}}]}}"#,
        )
        .create();
    server
        .mock("GET", "/budgets/b-1/accounts")
        .with_status(200)
        .with_body(ACCOUNTS)
        .expect_at_least(1)
        .create();
    let post = server
        .mock("POST", "/budgets/b-1/transactions")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "transaction": {"account_id": "a-1", "amount": 25500}
        })))
        .with_status(201)
        .with_body(r#"{"data": {"transaction_ids": ["t-1"], "transaction": {"id": "t-1"}}}"#)
        .expect(1)
        .create();

    let dir = TempDir::new().unwrap();
    connected(&dir, &server)
        .args(["config", "select-budget", "Household"])
        .assert()
        .success();
    connected(&dir, &server)
        .args(["config", "select-accounts", "Brokerage"])
        .assert()
        .success();

    connected(&dir, &server)
        .args(["update", "Brokerage=175.50", "--yes"])
        .assert()
        .success();
    post.assert();

    connected(&dir, &server)
        .args(["update", "Brokerage=12.3.4", "--yes"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Brokerage: skipped"));
}

#[test]
fn test_update_invalid_amount_exits_non_zero() {
    let mut server = Server::new();
    let dir = configured(&mut server);

    connected(&dir, &server)
        .args(["update", "Brokerage=12.3.4", "--yes"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Brokerage: skipped"));
}
