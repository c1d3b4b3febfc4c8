//! Unit tests for startup settings parsing.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;

const BLOB: &str = r#"{"databaseUrl":"postgres://forms:s3cret@db/forms"}"#;

fn mock_env(vars: HashMap<String, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn env_with(pairs: &[(&str, &str)]) -> MockEnv {
    mock_env(
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect(),
    )
}

fn expect_error(result: Result<ServiceSettings, StartupConfigError>) -> StartupConfigError {
    match result {
        Ok(settings) => panic!("expected startup error, got {settings:?}"),
        Err(error) => error,
    }
}

#[rstest]
fn defaults_apply_when_only_credentials_are_set() {
    let env = env_with(&[(CREDENTIALS_ENV, BLOB)]);

    let settings = ServiceSettings::from_env(&env).expect("settings parse");

    assert_eq!(settings.bind_addr, "0.0.0.0:10000".parse().expect("addr"));
    assert_eq!(settings.store.database_url(), "postgres://forms:s3cret@db/forms");
}

#[rstest]
#[case(&[])]
#[case(&[(CREDENTIALS_ENV, "   ")])]
fn missing_credentials_are_fatal(#[case] pairs: &[(&str, &str)]) {
    let err = expect_error(ServiceSettings::from_env(&env_with(pairs)));

    assert!(matches!(
        err,
        StartupConfigError::MissingEnv {
            name: CREDENTIALS_ENV
        }
    ));
}

#[rstest]
#[case("{not json", "not valid JSON")]
#[case(r#"{"maxConnections": 4}"#, "databaseUrl")]
#[case(r#"{"databaseUrl": "  "}"#, "must not be empty")]
#[case(r#"{"databaseUrl": "postgres://db", "maxConnections": 0}"#, "at least 1")]
#[case(r#"{"databaseUrl": "postgres://db", "password": "x"}"#, "unknown field")]
fn malformed_credentials_are_fatal(#[case] blob: &str, #[case] fragment: &str) {
    let err = expect_error(ServiceSettings::from_env(&env_with(&[(
        CREDENTIALS_ENV,
        blob,
    )])));

    match err {
        StartupConfigError::MalformedCredentials { name, message } => {
            assert_eq!(name, CREDENTIALS_ENV);
            assert!(message.contains(fragment), "message: {message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
fn malformed_credentials_never_echo_the_blob() {
    let blob = r#"{"databaseUrl": "postgres://forms:s3cret@db/forms","#;

    let err = expect_error(ServiceSettings::from_env(&env_with(&[(
        CREDENTIALS_ENV,
        blob,
    )])));

    assert!(!err.to_string().contains("s3cret"));
}

#[rstest]
#[case("8080", 8080)]
#[case(" 9000 ", 9000)]
#[case("", DEFAULT_PORT)]
fn port_is_read_from_env(#[case] raw: &str, #[case] expected: u16) {
    let env = env_with(&[(CREDENTIALS_ENV, BLOB), (PORT_ENV, raw)]);

    let settings = ServiceSettings::from_env(&env).expect("settings parse");

    assert_eq!(settings.bind_addr.port(), expected);
}

#[rstest]
#[case("http")]
#[case("70000")]
fn invalid_port_is_fatal(#[case] raw: &str) {
    let env = env_with(&[(CREDENTIALS_ENV, BLOB), (PORT_ENV, raw)]);

    let err = expect_error(ServiceSettings::from_env(&env));

    assert!(matches!(err, StartupConfigError::InvalidEnv { name: PORT_ENV, .. }));
}

#[rstest]
fn bind_host_overrides_default() {
    let env = env_with(&[(CREDENTIALS_ENV, BLOB), (BIND_HOST_ENV, "127.0.0.1")]);

    let settings = ServiceSettings::from_env(&env).expect("settings parse");

    assert_eq!(settings.bind_addr, "127.0.0.1:10000".parse().expect("addr"));
}

#[rstest]
fn invalid_bind_host_is_fatal() {
    let env = env_with(&[(CREDENTIALS_ENV, BLOB), (BIND_HOST_ENV, "localhost")]);

    let err = expect_error(ServiceSettings::from_env(&env));

    assert!(matches!(
        err,
        StartupConfigError::InvalidEnv {
            name: BIND_HOST_ENV,
            ..
        }
    ));
}

#[rstest]
fn pool_config_carries_blob_tunables() {
    let creds = StoreCredentials::parse(
        r#"{"databaseUrl":"postgres://db/forms","maxConnections":4,"connectionTimeoutSecs":5}"#,
    )
    .expect("valid blob");

    let config = creds.pool_config();

    assert_eq!(config.max_size(), 4);
    assert_eq!(config.connection_timeout(), Duration::from_secs(5));
}

#[rstest]
fn debug_output_redacts_database_url() {
    let creds = StoreCredentials::parse(BLOB).expect("valid blob");

    assert!(!format!("{creds:?}").contains("s3cret"));
}
