//! Session settings resolution under debug and release rules.

use std::collections::HashMap;

use mockable::MockEnv;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;

fn key_file(len: usize) -> NamedTempFile {
    let file = NamedTempFile::new().expect("temp key file");
    std::fs::write(file.path(), vec![b'k'; len]).expect("write key bytes");
    file
}

fn env_with(vars: &[(&str, &str)]) -> MockEnv {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

#[fixture]
fn release_key() -> NamedTempFile {
    key_file(SESSION_KEY_MIN_LEN)
}

fn release_vars(key_path: &str) -> Vec<(&'static str, String)> {
    vec![
        (KEY_FILE_ENV, key_path.to_owned()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ]
}

fn release_env(key: &NamedTempFile, overrides: &[(&'static str, Option<&str>)]) -> MockEnv {
    let path = key.path().to_string_lossy().into_owned();
    let mut vars = release_vars(&path);
    for (name, value) in overrides {
        vars.retain(|(existing, _)| existing != name);
        if let Some(value) = value {
            vars.push((*name, (*value).to_owned()));
        }
    }
    let borrowed: Vec<(&str, &str)> = vars.iter().map(|(k, v)| (*k, v.as_str())).collect();
    env_with(&borrowed)
}

fn release_error(env: &MockEnv) -> SessionConfigError {
    match session_settings_from_env(env, BuildMode::Release) {
        Ok(_) => panic!("release settings should be rejected"),
        Err(error) => error,
    }
}

#[rstest]
fn release_accepts_complete_settings(release_key: NamedTempFile) {
    let env = release_env(&release_key, &[]);
    let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
    assert_eq!(settings.key_fingerprint().len(), 16);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_rejects_missing_toggle(release_key: NamedTempFile, #[case] name: &'static str) {
    let env = release_env(&release_key, &[(name, None)]);
    let error = release_error(&env);
    assert!(
        matches!(error, SessionConfigError::MissingEnv { name: missing } if missing == name),
        "unexpected error: {error}"
    );
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(COOKIE_SECURE_ENV, "")]
#[case(SAMESITE_ENV, "sideways")]
#[case(ALLOW_EPHEMERAL_ENV, "sometimes")]
fn release_rejects_malformed_toggle(
    release_key: NamedTempFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let env = release_env(&release_key, &[(name, Some(value))]);
    let error = release_error(&env);
    assert!(
        matches!(error, SessionConfigError::InvalidEnv { name: invalid, .. } if invalid == name),
        "unexpected error: {error}"
    );
}

#[rstest]
fn release_rejects_ephemeral_keys(release_key: NamedTempFile) {
    let env = release_env(&release_key, &[(ALLOW_EPHEMERAL_ENV, Some("yes"))]);
    assert!(matches!(
        release_error(&env),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_rejects_insecure_same_site_none(release_key: NamedTempFile) {
    let env = release_env(
        &release_key,
        &[(COOKIE_SECURE_ENV, Some("0")), (SAMESITE_ENV, Some("None"))],
    );
    assert!(matches!(
        release_error(&env),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn release_rejects_short_key() {
    let short = key_file(SESSION_KEY_MIN_LEN - 1);
    let env = release_env(&short, &[]);
    assert!(matches!(
        release_error(&env),
        SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1
    ));
}

#[rstest]
fn release_rejects_unreadable_key(release_key: NamedTempFile) {
    let missing = release_key.path().with_extension("absent");
    let missing = missing.to_string_lossy().into_owned();
    let env = release_env(&release_key, &[(KEY_FILE_ENV, Some(missing.as_str()))]);
    assert!(matches!(
        release_error(&env),
        SessionConfigError::KeyRead { .. }
    ));
}

#[rstest]
fn debug_falls_back_to_development_defaults() {
    let env = env_with(&[]);
    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_tolerates_malformed_same_site(release_key: NamedTempFile) {
    let env = release_env(&release_key, &[(SAMESITE_ENV, Some("sideways"))]);
    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug fallback");
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_accepts_key_shorter_than_release_minimum() {
    let short = key_file(DERIVED_KEY_MIN_LEN);
    let env = release_env(&short, &[]);
    assert!(session_settings_from_env(&env, BuildMode::Debug).is_ok());
}
