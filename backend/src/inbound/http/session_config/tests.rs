//! Unit tests for session cookie settings.

use super::*;
use mockable::MockEnv;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use uuid::Uuid;

/// Key file removed on drop.
struct TempKeyFile(PathBuf);

impl TempKeyFile {
    fn with_len(len: usize) -> Self {
        let path = std::env::temp_dir().join(format!("feedback-session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'k'; len]).expect("write temporary key file");
        Self(path)
    }

    fn path(&self) -> String {
        self.0.to_str().expect("temp path is UTF-8").to_owned()
    }
}

impl Drop for TempKeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn env_from(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

#[fixture]
fn key_file() -> TempKeyFile {
    TempKeyFile::with_len(SESSION_KEY_MIN_LEN)
}

fn release_vars(key_file: &TempKeyFile) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key_file.path()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn release_error(vars: HashMap<&'static str, String>) -> SessionConfigError {
    match session_settings_from_env(&env_from(vars), BuildMode::Release) {
        Ok(_) => panic!("release settings should be rejected"),
        Err(error) => error,
    }
}

#[rstest]
fn release_accepts_complete_settings(key_file: TempKeyFile) {
    let settings = session_settings_from_env(&env_from(release_vars(&key_file)), BuildMode::Release)
        .expect("valid release settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_rejects_missing_toggle(key_file: TempKeyFile, #[case] missing: &'static str) {
    let mut vars = release_vars(&key_file);
    vars.remove(missing);
    let error = release_error(vars);
    assert!(matches!(error, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(COOKIE_SECURE_ENV, "")]
#[case(SAMESITE_ENV, "sometimes")]
#[case(ALLOW_EPHEMERAL_ENV, "2")]
fn release_rejects_invalid_toggle(
    key_file: TempKeyFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let mut vars = release_vars(&key_file);
    vars.insert(name, value.to_owned());
    let error = release_error(vars);
    assert!(matches!(error, SessionConfigError::InvalidEnv { name: got, .. } if got == name));
}

#[rstest]
fn release_rejects_ephemeral_keys(key_file: TempKeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_rejects_unreadable_key(key_file: TempKeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(
        KEY_FILE_ENV,
        format!("/nonexistent/{}", Uuid::new_v4()),
    );
    assert!(matches!(
        release_error(vars),
        SessionConfigError::KeyRead { .. }
    ));
}

#[rstest]
fn release_rejects_short_key() {
    let short = TempKeyFile::with_len(SESSION_KEY_MIN_LEN - 1);
    match release_error(release_vars(&short)) {
        SessionConfigError::KeyTooShort { length, min_len, .. } => {
            assert_eq!(length, SESSION_KEY_MIN_LEN - 1);
            assert_eq!(min_len, SESSION_KEY_MIN_LEN);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
fn release_rejects_insecure_same_site_none(key_file: TempKeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn debug_falls_back_to_defaults() {
    let settings = session_settings_from_env(&env_from(HashMap::new()), BuildMode::Debug)
        .expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case("unexpected", SameSite::Lax)]
#[case("NONE", SameSite::None)]
#[case("strict", SameSite::Strict)]
fn debug_same_site_parsing(
    key_file: TempKeyFile,
    #[case] raw: &str,
    #[case] expected: SameSite,
) {
    let mut vars = release_vars(&key_file);
    vars.insert(SAMESITE_ENV, raw.to_owned());
    let settings =
        session_settings_from_env(&env_from(vars), BuildMode::Debug).expect("debug settings");
    assert_eq!(settings.same_site, expected);
}

#[rstest]
#[case("1", Some(true))]
#[case("Yes", Some(true))]
#[case("n", Some(false))]
#[case("FALSE", Some(false))]
#[case("on", None)]
fn parses_boolean_toggles(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}
