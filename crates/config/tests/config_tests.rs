//! Tests for the `orderhub-config` loader: defaults, file discovery, and
//! environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serial_test::serial;
use tempfile::TempDir;

use orderhub_config::load;

const ENV_VARS_TO_RESET: &[&str] = &[
    "ORDERHUB_CONFIG",
    "ORDERHUB__HTTP__ADDRESS",
    "ORDERHUB__HTTP__PORT",
    "ORDERHUB__DATABASE__URL",
    "ORDERHUB__DATABASE__MAX_CONNECTIONS",
    "ORDERHUB__AUTH__JWT_SECRET",
    "ORDERHUB__AUTH__TOKEN_TTL_SECONDS",
    "PORT",
    "PROD_SERVER_URL",
];

struct TestContext {
    vars: Vec<(String, Option<String>)>,
    original_dir: Option<PathBuf>,
}

impl TestContext {
    fn new() -> Self {
        let mut ctx = Self {
            vars: Vec::new(),
            original_dir: None,
        };
        for key in ENV_VARS_TO_RESET {
            ctx.remove_var(key);
        }
        ctx
    }

    fn set_var(&mut self, key: &str, value: impl AsRef<str>) {
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value.as_ref());
        self.vars.push((key.to_string(), previous));
    }

    fn remove_var(&mut self, key: &str) {
        let previous = std::env::var(key).ok();
        std::env::remove_var(key);
        self.vars.push((key.to_string(), previous));
    }

    fn set_current_dir(&mut self, dir: &Path) {
        if self.original_dir.is_none() {
            self.original_dir =
                Some(std::env::current_dir().expect("failed to capture current directory"));
        }
        std::env::set_current_dir(dir).expect("failed to set current directory");
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if let Some(original) = self.original_dir.take() {
            let _ = std::env::set_current_dir(original);
        }

        while let Some((key, value)) = self.vars.pop() {
            match value {
                Some(value) => std::env::set_var(&key, value),
                None => std::env::remove_var(&key),
            }
        }
    }
}

#[test]
#[serial]
fn defaults_apply_without_file_or_environment() {
    let _ctx = TestContext::new();

    let config = load().expect("configuration should load with defaults");

    assert_eq!(config.http.address, "0.0.0.0");
    assert_eq!(config.http.port, 3333);
    assert_eq!(config.database.url, "sqlite://orderhub.db");
    assert_eq!(config.auth.token_ttl_seconds, 86_400);
    assert!(config.docs.prod_server_url.is_none());
}

#[test]
#[serial]
fn environment_overrides_take_precedence() {
    let mut ctx = TestContext::new();
    ctx.set_var("ORDERHUB__HTTP__PORT", "9090");
    ctx.set_var("ORDERHUB__AUTH__JWT_SECRET", "override-secret");

    let config = load().expect("configuration should load");

    assert_eq!(config.http.port, 9090);
    assert_eq!(config.auth.jwt_secret, "override-secret");
}

#[test]
#[serial]
fn explicit_config_file_is_loaded() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("orderhub.toml");
    fs::write(
        &path,
        "[http]\naddress = \"127.0.0.1\"\nport = 4444\n\n[database]\nurl = \"sqlite://:memory:\"\nmax_connections = 2\n",
    )
    .expect("write config file");

    let mut ctx = TestContext::new();
    ctx.set_var("ORDERHUB_CONFIG", path.to_string_lossy());

    let config = load().expect("configuration should load");

    assert_eq!(config.http.address, "127.0.0.1");
    assert_eq!(config.http.port, 4444);
    assert_eq!(config.database.url, "sqlite://:memory:");
    assert_eq!(config.database.max_connections, 2);
}

#[test]
#[serial]
fn config_file_in_working_directory_is_discovered() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(
        temp.path().join("orderhub.toml"),
        "[http]\nport = 5555\n",
    )
    .expect("write config file");

    let mut ctx = TestContext::new();
    ctx.set_current_dir(temp.path());

    let config = load().expect("configuration should load");

    assert_eq!(config.http.port, 5555);
}

#[test]
#[serial]
fn port_and_prod_server_url_variables_are_honored() {
    let mut ctx = TestContext::new();
    ctx.set_var("PORT", "8080");
    ctx.set_var("PROD_SERVER_URL", "https://orderhub.example.com");

    let config = load().expect("configuration should load");

    assert_eq!(config.http.port, 8080);
    assert_eq!(
        config.docs.prod_server_url.as_deref(),
        Some("https://orderhub.example.com")
    );
}

#[test]
#[serial]
fn invalid_port_variable_is_rejected() {
    let mut ctx = TestContext::new();
    ctx.set_var("PORT", "not-a-port");

    assert!(load().is_err());
}
