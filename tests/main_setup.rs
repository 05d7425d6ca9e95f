use petdimen_admin::{
    AppConfig,
    config::{DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS, Env},
};
use serial_test::serial;
use std::{env, panic, path::PathBuf, time::Duration};

const CONFIG_VARS: [&str; 4] = [
    "APP_ENV",
    "ADMIN_API_BASE",
    "ADMIN_REQUEST_TIMEOUT_SECS",
    "ADMIN_SESSION_FILE",
];

// --- Setup/Teardown Utilities ---

/// Runs `test` with exactly the given variables set (all other config variables
/// cleared) and restores the previous environment afterward.
fn run_with_env<T, R>(vars: &[(&str, &str)], test: T) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    let originals: Vec<(&str, Option<String>)> = CONFIG_VARS
        .iter()
        .map(|&var| (var, env::var(var).ok()))
        .collect();

    unsafe {
        for var in CONFIG_VARS {
            env::remove_var(var);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }
    }

    let result = panic::catch_unwind(test);

    for (key, original_value) in originals {
        unsafe {
            match original_value {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }

    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_app_config_production_fail_fast() {
    let result = run_with_env(&[("APP_ENV", "production")], || panic::catch_unwind(AppConfig::load));

    assert!(
        result.is_err(),
        "Production config loading should panic without ADMIN_API_BASE"
    );
}

#[test]
#[serial]
fn test_app_config_production_with_backend() {
    let config = run_with_env(
        &[("APP_ENV", "production"), ("ADMIN_API_BASE", "https://admin.example.com/")],
        AppConfig::load,
    );

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.api_base, "https://admin.example.com");
}

#[test]
#[serial]
fn test_app_config_local_env_defaults() {
    let config = run_with_env(&[("APP_ENV", "local")], AppConfig::load);

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.api_base, DEFAULT_API_BASE);
    assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    assert!(config.storage_path.ends_with("session.json"));
}

#[test]
#[serial]
fn test_app_config_overrides() {
    let config = run_with_env(
        &[
            ("ADMIN_API_BASE", "http://10.0.0.5:9000//"),
            ("ADMIN_REQUEST_TIMEOUT_SECS", "3"),
            ("ADMIN_SESSION_FILE", "/tmp/console/session.json"),
        ],
        AppConfig::load,
    );

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.api_base, "http://10.0.0.5:9000");
    assert_eq!(config.request_timeout, Duration::from_secs(3));
    assert_eq!(config.storage_path, PathBuf::from("/tmp/console/session.json"));
}

#[test]
#[serial]
fn test_app_config_rejects_unusable_timeout() {
    for raw in ["0", "soon", ""] {
        let config = run_with_env(&[("ADMIN_REQUEST_TIMEOUT_SECS", raw)], AppConfig::load);
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
