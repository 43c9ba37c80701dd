//! Config parsing, lookup order and environment overrides.

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{ACCESS_TOKEN_ENV, CONFIG_ENV, CUSTOMER_ID_ENV, GminConfig, LOG_LEVEL_ENV};
use crate::error::FatalError;
use crate::model::{CallType, ObjectType};

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn write_config(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn empty_file_yields_defaults() {
    let config = GminConfig::from_toml("").unwrap();
    assert_eq!(config, GminConfig::default());
    assert_eq!(config.customer_id, "my_customer");
    assert_eq!(config.concurrency, 16);
    assert_eq!(config.retry.max_elapsed_secs, 32);
}

#[test]
fn full_file_is_parsed() {
    let config = GminConfig::from_toml(
        r#"
customer_id = "C01abc"
access_token = "ya29.token"
log_level = "debug"
log_path = "/var/log/gmin.json"
concurrency = 4
directory_base_url = "http://127.0.0.1:8080/admin/directory/v1"

[retry]
initial_interval_ms = 100
max_elapsed_secs = 5

[[pacing]]
object = "orgunit"
call = "create"
delay_ms = 3000

[[pacing]]
object = "users"
call = "create"
delay_ms = 50
"#,
    )
    .unwrap();

    assert_eq!(config.customer_id, "C01abc");
    assert_eq!(config.log_path, Some(PathBuf::from("/var/log/gmin.json")));
    assert_eq!(config.retry.multiplier, 2.0);

    let policy = config.retry_policy();
    assert_eq!(policy.initial_interval, Duration::from_millis(100));
    assert_eq!(policy.max_elapsed, Duration::from_secs(5));

    let pacing = config.pacing().unwrap();
    assert_eq!(
        pacing.pre_submit_delay(ObjectType::OrgUnit, CallType::Create),
        Duration::from_secs(3)
    );
    assert_eq!(
        pacing.pre_submit_delay(ObjectType::OrgUnit, CallType::Delete),
        Duration::from_secs(2)
    );
    assert_eq!(
        pacing.pre_submit_delay(ObjectType::User, CallType::Create),
        Duration::from_millis(50)
    );
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(GminConfig::from_toml("customer = \"x\"").is_err());
}

#[test]
fn explicit_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");
    let err = GminConfig::load_with(Some(path.as_path()), env(&[]), None).unwrap_err();
    assert!(matches!(err, FatalError::ConfigMissing(p) if p == path));
}

#[test]
fn missing_default_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config =
        GminConfig::load_with(None, env(&[]), Some(dir.path().join("config.toml"))).unwrap();
    assert_eq!(config, GminConfig::default());
}

#[test]
fn lookup_prefers_flag_then_env_then_default() {
    let flag = write_config("customer_id = \"from-flag\"");
    let via_env = write_config("customer_id = \"from-env\"");
    let default = write_config("customer_id = \"from-default\"");
    let env_path = via_env.path().to_string_lossy().into_owned();

    let config = GminConfig::load_with(
        Some(flag.path()),
        env(&[(CONFIG_ENV, &env_path)]),
        Some(default.path().to_path_buf()),
    )
    .unwrap();
    assert_eq!(config.customer_id, "from-flag");

    let config = GminConfig::load_with(
        None,
        env(&[(CONFIG_ENV, &env_path)]),
        Some(default.path().to_path_buf()),
    )
    .unwrap();
    assert_eq!(config.customer_id, "from-env");

    let config =
        GminConfig::load_with(None, env(&[]), Some(default.path().to_path_buf())).unwrap();
    assert_eq!(config.customer_id, "from-default");
}

#[test]
fn environment_overrides_the_file() {
    let file = write_config("customer_id = \"C01abc\"\nlog_level = \"warn\"");
    let config = GminConfig::load_with(
        Some(file.path()),
        env(&[
            (CUSTOMER_ID_ENV, "C02xyz"),
            (ACCESS_TOKEN_ENV, "ya29.env"),
            (LOG_LEVEL_ENV, "trace"),
        ]),
        None,
    )
    .unwrap();
    assert_eq!(config.customer_id, "C02xyz");
    assert_eq!(config.require_token().unwrap(), "ya29.env");
    assert_eq!(config.log_level, "trace");
}

#[test]
fn invalid_file_is_reported_with_its_path() {
    let file = write_config("concurrency = \"many\"");
    let err = GminConfig::load_with(Some(file.path()), env(&[]), None).unwrap_err();
    assert!(matches!(err, FatalError::ConfigInvalid { ref path, .. } if path == file.path()));
}

#[test]
fn unknown_pacing_rule_is_invalid() {
    let file = write_config("[[pacing]]\nobject = \"printer\"\ncall = \"create\"\ndelay_ms = 1");
    let err = GminConfig::load_with(Some(file.path()), env(&[]), None).unwrap_err();
    assert!(matches!(err, FatalError::ConfigInvalid { .. }));
}

#[test]
fn missing_token_is_credentials_missing() {
    let config = GminConfig::default();
    assert!(matches!(
        config.require_token(),
        Err(FatalError::CredentialsMissing)
    ));
}

#[test]
fn concurrency_is_at_least_one() {
    let config = GminConfig::from_toml("concurrency = 0").unwrap();
    assert_eq!(config.effective_concurrency(), 1);
}
