//! CLI configuration: thin wrapper around `airwright_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--url, --username, --password, --timeout).

use std::time::Duration;

use secrecy::SecretString;

use airwright_core::{Credentials, LayeredEnv, ProcessEnv, Reconciler, RemoteConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use airwright_config::{
    Config, Profile, config_path, load_config_or_default, save_config, store_password,
};

/// Reconciler used by every remote command: process env plus file-backed
/// variables from the active profile.
pub type AppReconciler = Reconciler<LayeredEnv<ProcessEnv>>;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// The active profile. A profile named explicitly with `--profile` must
/// exist; otherwise a missing profile falls back to defaults.
pub fn active_profile(global: &GlobalOpts, config: &Config) -> Result<(String, Profile), CliError> {
    let name = active_profile_name(global, config);
    match config.profiles.get(&name) {
        Some(profile) => Ok((name, profile.clone())),
        None if global.profile.is_some() => Err(CliError::ProfileNotFound {
            available: available_profiles(config),
            name,
        }),
        None => Ok((name, Profile::default())),
    }
}

pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort_unstable();
    names.join(", ")
}

/// Translate a `Profile` + global flags into a `RemoteConfig`.
///
/// CLI flag overrides take priority over profile values. A `--password`
/// flag short-circuits the env and keyring lookups.
pub fn resolve_remote(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    default_timeout: u64,
) -> Result<RemoteConfig, CliError> {
    let url = global.url.as_deref().unwrap_or(&profile.url);
    let mut remote = RemoteConfig::new(airwright_config::parse_url(url)?);

    let timeout = global.timeout.or(profile.timeout).unwrap_or(default_timeout);
    remote.timeout = Duration::from_secs(timeout);

    let merged = Profile {
        username: global.username.clone().or_else(|| profile.username.clone()),
        ..profile.clone()
    };
    remote.auth = match global.password.as_deref() {
        Some(password) => merged
            .username
            .filter(|u| !u.is_empty())
            .map(|username| Credentials {
                username,
                password: Some(SecretString::from(password.to_owned())),
            }),
        None => airwright_config::resolve_credentials(&merged, profile_name, &ProcessEnv),
    };

    Ok(remote)
}

/// Build the reconciler for the active profile.
pub fn build_reconciler(global: &GlobalOpts, config: &Config) -> Result<AppReconciler, CliError> {
    let (profile_name, profile) = active_profile(global, config)?;
    let remote = resolve_remote(&profile, &profile_name, global, config.defaults.timeout)?;
    let env = airwright_config::file_backed_env(ProcessEnv, &profile.file_vars)?;
    let client = remote.build_client()?;

    tracing::debug!(profile = %profile_name, url = %remote.url, "using remote");
    Ok(Reconciler::new(client, env))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;
    use secrecy::ExposeSecret;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["airwright"];
        argv.extend_from_slice(args);
        argv.push("workspace");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with(name: &str, profile: Profile) -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(name.into(), profile);
        cfg
    }

    #[test]
    fn flags_override_profile() {
        let profile = Profile {
            url: "http://profile-host:8000".into(),
            username: Some("profile-user".into()),
            timeout: Some(10),
            ..Profile::default()
        };
        let global = global(&[
            "--url",
            "https://flag-host",
            "--username",
            "flag-user",
            "--password",
            "flag-pass",
            "--timeout",
            "5",
        ]);

        let remote = resolve_remote(&profile, "default", &global, 30).unwrap();

        assert_eq!(remote.url.as_str(), "https://flag-host/");
        assert_eq!(remote.timeout, Duration::from_secs(5));
        let auth = remote.auth.unwrap();
        assert_eq!(auth.username, "flag-user");
        assert_eq!(auth.password.unwrap().expose_secret(), "flag-pass");
    }

    #[test]
    fn profile_timeout_beats_config_default() {
        let profile = Profile {
            timeout: Some(12),
            ..Profile::default()
        };
        let global = global(&["--url", "http://localhost:8000"]);

        let remote = resolve_remote(&profile, "default", &global, 30).unwrap();
        assert_eq!(remote.timeout, Duration::from_secs(12));
    }

    #[test]
    fn invalid_url_flag_is_validation_error() {
        let global = global(&["--url", "ftp://nope"]);
        let err = resolve_remote(&Profile::default(), "default", &global, 30).unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }));
    }

    #[test]
    fn explicit_missing_profile_is_rejected() {
        let cfg = config_with("prod", Profile::default());
        let global = global(&["--profile", "staging"]);

        let err = active_profile(&global, &cfg).unwrap_err();
        let CliError::ProfileNotFound { name, available } = err else {
            panic!("expected ProfileNotFound");
        };
        assert_eq!(name, "staging");
        assert_eq!(available, "prod");
    }

    #[test]
    fn missing_default_profile_falls_back() {
        let cfg = Config::default();
        let (name, profile) = active_profile(&global(&[]), &cfg).unwrap();
        assert_eq!(name, "default");
        assert_eq!(profile, Profile::default());
    }
}
