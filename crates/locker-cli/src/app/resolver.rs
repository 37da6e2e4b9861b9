//! Path resolution and record id lookup.

use std::path::PathBuf;

use locker_core::Resource;

use crate::cli::Cli;
use crate::config::{default_config_path, default_session_path, LockerConfig};
use crate::constants::CONFIG_ENV;
use crate::errors::CliError;

/// Resolve the config file path, checking LOCKER_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the session file from `--session`, the config, or the XDG default.
pub fn resolve_session_path(cli: &Cli, config: &LockerConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.session.clone() {
        return Ok(path);
    }
    if let Some(path) = config.session.path.as_deref() {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    default_session_path()
}

/// Find the listed record whose id is `fragment` or starts with it.
pub fn resolve_record_id<R: Resource>(items: &[R], fragment: &str) -> Result<String, CliError> {
    let noun = R::KIND.noun().to_lowercase();
    let list_hint = format!("Run: locker {} list", command_name::<R>());

    if let Some(item) = items.iter().find(|item| item.id() == fragment) {
        return Ok(item.id().to_string());
    }
    if fragment.is_empty() {
        return Err(CliError::invalid_input(format!("Missing {} id", noun)));
    }

    let matches: Vec<&R> = items
        .iter()
        .filter(|item| item.id().starts_with(fragment))
        .collect();
    match matches.as_slice() {
        [only] => Ok(only.id().to_string()),
        [] => Err(CliError::not_found(
            format!("No {} with id {}", noun, fragment),
            list_hint,
        )),
        _ => Err(CliError::invalid_input(format!(
            "Id prefix {} matches {} records; use more characters",
            fragment,
            matches.len()
        ))),
    }
}

/// Subcommand name for a record kind.
pub fn command_name<R: Resource>() -> &'static str {
    use locker_core::ResourceKind;
    match R::KIND {
        ResourceKind::Notes => "notes",
        ResourceKind::Links => "links",
        ResourceKind::Credentials => "creds",
        ResourceKind::Files => "files",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::exit_codes;
    use locker_core::models::Note;

    fn note(id: &str) -> Note {
        Note {
            id: id.to_string(),
            title: "t".to_string(),
            note: "b".to_string(),
            owner_id: Some("u1".to_string()),
            created_at: None,
        }
    }

    #[test]
    fn test_exact_id_wins_over_prefix() {
        let items = vec![note("abc"), note("abcd")];
        assert_eq!(resolve_record_id(&items, "abc").unwrap(), "abc");
    }

    #[test]
    fn test_unique_prefix_resolves() {
        let items = vec![note("65f1aa"), note("65f2bb")];
        assert_eq!(resolve_record_id(&items, "65f2").unwrap(), "65f2bb");
    }

    #[test]
    fn test_ambiguous_prefix_is_invalid_input() {
        let items = vec![note("65f1aa"), note("65f2bb")];
        let err = resolve_record_id(&items, "65f").unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::INVALID_INPUT);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let items = vec![note("65f1aa")];
        let err = resolve_record_id(&items, "zz").unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::NOT_FOUND);
        assert!(err.to_string().contains("locker notes list"));
    }

    #[test]
    fn test_session_flag_wins() {
        let cli = <Cli as clap::Parser>::try_parse_from(["locker", "--session", "/tmp/s.json", "status"])
            .unwrap();
        let path = resolve_session_path(&cli, &LockerConfig::default()).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/s.json"));
    }
}
