//! Credential resolution.
//!
//! Each field is taken from the first source that has it:
//!
//! 1. explicit value (`--api-key`, `--token`)
//! 2. process environment (`TRELLO_API_KEY`, `TRELLO_TOKEN`)
//! 3. secrets file (`--env-file PATH`, else `./.env` when present)
//!
//! The environment is read once into an [`EnvSnapshot`] and the secrets file
//! is parsed without exporting anything, so resolution never mutates process
//! state. Secret values never appear in errors or log fields.

use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use planner_core::{
    domain::{CredentialError, CredentialField, Credentials},
    error::PlannerResult,
};

pub const DEFAULT_ENV_FILE: &str = ".env";

const FIELDS: [CredentialField; 2] = [CredentialField::ApiKey, CredentialField::Token];

// ── Environment ─────────────────────────────────────────────────────────────

/// Credential variables captured from the process environment.
#[derive(Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<&'static str, String>,
}

impl EnvSnapshot {
    /// Read the credential variables from the current process.
    pub fn capture() -> Self {
        let vars = FIELDS
            .iter()
            .filter_map(|f| {
                let name = f.env_var();
                std::env::var(name).ok().map(|v| (name, v))
            })
            .collect();
        Self { vars }
    }

    /// Build a snapshot from explicit pairs. Unknown names are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut vars = HashMap::new();
        for (name, value) in pairs {
            if let Some(field) = FIELDS.iter().find(|f| f.env_var() == name.as_ref()) {
                vars.insert(field.env_var(), value.into());
            }
        }
        Self { vars }
    }

    fn get(&self, field: CredentialField) -> Option<&str> {
        non_empty(self.vars.get(field.env_var()).map(String::as_str))
    }
}

impl fmt::Debug for EnvSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.vars.keys().collect();
        names.sort();
        f.debug_struct("EnvSnapshot").field("present", &names).finish()
    }
}

// ── Sources ─────────────────────────────────────────────────────────────────

/// Values supplied on the command line.
#[derive(Clone, Default)]
pub struct CredentialSources {
    pub api_key: Option<String>,
    pub token: Option<String>,
    pub env_file: Option<PathBuf>,
}

impl CredentialSources {
    fn explicit(&self, field: CredentialField) -> Option<&str> {
        let value = match field {
            CredentialField::ApiKey => self.api_key.as_deref(),
            CredentialField::Token => self.token.as_deref(),
        };
        non_empty(value)
    }
}

impl fmt::Debug for CredentialSources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSources")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("env_file", &self.env_file)
            .finish()
    }
}

/// Where a field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialOrigin {
    Flag,
    Environment,
    File(PathBuf),
}

impl fmt::Display for CredentialOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => f.write_str("command line"),
            Self::Environment => f.write_str("environment"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedCredentials {
    pub credentials: Credentials,
    pub api_key_origin: CredentialOrigin,
    pub token_origin: CredentialOrigin,
    /// Non-fatal problems worth showing, e.g. a world-readable secrets file.
    pub warnings: Vec<String>,
}

// ── Resolver ────────────────────────────────────────────────────────────────

pub struct CredentialResolver<'a> {
    env: &'a EnvSnapshot,
    working_dir: PathBuf,
}

impl<'a> CredentialResolver<'a> {
    pub fn new(env: &'a EnvSnapshot) -> Self {
        Self {
            env,
            working_dir: PathBuf::from("."),
        }
    }

    /// Directory searched for the default `.env` file.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    pub fn resolve(&self, sources: &CredentialSources) -> PlannerResult<ResolvedCredentials> {
        let mut warnings = Vec::new();
        let file = self.secrets_file(sources, &mut warnings)?;

        let pick = |field: CredentialField| -> Option<(String, CredentialOrigin)> {
            if let Some(value) = sources.explicit(field) {
                return Some((value.to_string(), CredentialOrigin::Flag));
            }
            if let Some(value) = self.env.get(field) {
                return Some((value.to_string(), CredentialOrigin::Environment));
            }
            let (path, values) = file.as_ref()?;
            non_empty(values.get(field.env_var()).map(String::as_str))
                .map(|v| (v.to_string(), CredentialOrigin::File(path.clone())))
        };

        let (api_key, api_key_origin) = pick(CredentialField::ApiKey).ok_or(
            CredentialError::Missing {
                field: CredentialField::ApiKey,
            },
        )?;
        let (token, token_origin) = pick(CredentialField::Token).ok_or(CredentialError::Missing {
            field: CredentialField::Token,
        })?;

        debug!(api_key = %api_key_origin, token = %token_origin, "Credentials resolved");
        Ok(ResolvedCredentials {
            credentials: Credentials::new(api_key, token)?,
            api_key_origin,
            token_origin,
            warnings,
        })
    }

    /// Parse the secrets file, if there is one to read.
    fn secrets_file(
        &self,
        sources: &CredentialSources,
        warnings: &mut Vec<String>,
    ) -> PlannerResult<Option<(PathBuf, HashMap<String, String>)>> {
        let path = match &sources.env_file {
            Some(path) if !path.is_file() => {
                return Err(CredentialError::SecretsFileNotFound { path: path.clone() }.into());
            }
            Some(path) => path.clone(),
            None => {
                let default = self.working_dir.join(DEFAULT_ENV_FILE);
                if !default.is_file() {
                    return Ok(None);
                }
                default
            }
        };

        if let Some(warning) = permission_warning(&path) {
            warn!("{warning}");
            warnings.push(warning);
        }

        let values = read_secrets(&path)?;
        debug!(path = %path.display(), "Read secrets file");
        Ok(Some((path, values)))
    }
}

/// Credential entries of a dotenv-style file. Other keys are dropped.
fn read_secrets(path: &Path) -> PlannerResult<HashMap<String, String>> {
    let unreadable = |reason: String| CredentialError::SecretsFileUnreadable {
        path: path.to_path_buf(),
        reason,
    };

    let entries = dotenvy::from_path_iter(path).map_err(|e| unreadable(describe(&e)))?;
    let mut values = HashMap::new();
    for entry in entries {
        let (key, value) = entry.map_err(|e| unreadable(describe(&e)))?;
        if FIELDS.iter().any(|f| f.env_var() == key) {
            values.insert(key, value);
        }
    }
    Ok(values)
}

/// Error text that cannot echo file content back.
fn describe(error: &dotenvy::Error) -> String {
    match error {
        dotenvy::Error::LineParse(_, index) => format!("syntax error at byte {index} of a line"),
        dotenvy::Error::Io(io) => io.to_string(),
        _ => "invalid entry".to_string(),
    }
}

#[cfg(unix)]
fn permission_warning(path: &Path) -> Option<String> {
    use std::os::unix::fs::PermissionsExt;

    let mode = std::fs::metadata(path).ok()?.permissions().mode();
    (mode & 0o077 != 0).then(|| {
        format!(
            "{} is readable by other users (mode {:o}); consider `chmod 600 {}`",
            path.display(),
            mode & 0o777,
            path.display()
        )
    })
}

#[cfg(not(unix))]
fn permission_warning(_path: &Path) -> Option<String> {
    None
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use planner_core::error::{ErrorKind, PlannerError};

    fn env(pairs: &[(&str, &str)]) -> EnvSnapshot {
        EnvSnapshot::from_pairs(pairs.iter().copied())
    }

    fn empty_dir() -> TempDir {
        tempfile::tempdir().unwrap()
    }

    fn write_env_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();
        }
        path
    }

    #[test]
    fn resolves_from_environment() {
        let dir = empty_dir();
        let snapshot = env(&[("TRELLO_API_KEY", "abc"), ("TRELLO_TOKEN", "xyz")]);

        let resolved = CredentialResolver::new(&snapshot)
            .with_working_dir(dir.path())
            .resolve(&CredentialSources::default())
            .unwrap();

        assert_eq!(resolved.credentials.api_key(), "abc");
        assert_eq!(resolved.credentials.token(), "xyz");
        assert_eq!(resolved.api_key_origin, CredentialOrigin::Environment);
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn missing_token_is_credentials_missing() {
        let dir = empty_dir();
        let snapshot = env(&[("TRELLO_API_KEY", "abc")]);

        let err = CredentialResolver::new(&snapshot)
            .with_working_dir(dir.path())
            .resolve(&CredentialSources::default())
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::CredentialsMissing);
        assert!(matches!(
            err,
            PlannerError::Credentials(CredentialError::Missing {
                field: CredentialField::Token
            })
        ));
    }

    #[test]
    fn missing_key_is_credentials_missing() {
        let dir = empty_dir();
        let snapshot = env(&[("TRELLO_TOKEN", "xyz")]);

        let err = CredentialResolver::new(&snapshot)
            .with_working_dir(dir.path())
            .resolve(&CredentialSources::default())
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::CredentialsMissing);
        assert!(!err.to_string().contains("xyz"));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let dir = empty_dir();
        let snapshot = env(&[("TRELLO_API_KEY", "  "), ("TRELLO_TOKEN", "xyz")]);

        let err = CredentialResolver::new(&snapshot)
            .with_working_dir(dir.path())
            .resolve(&CredentialSources::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialsMissing);
    }

    #[test]
    fn explicit_values_beat_environment() {
        let dir = empty_dir();
        let snapshot = env(&[("TRELLO_API_KEY", "env-key"), ("TRELLO_TOKEN", "env-token")]);
        let sources = CredentialSources {
            api_key: Some("flag-key".into()),
            ..CredentialSources::default()
        };

        let resolved = CredentialResolver::new(&snapshot)
            .with_working_dir(dir.path())
            .resolve(&sources)
            .unwrap();

        assert_eq!(resolved.credentials.api_key(), "flag-key");
        assert_eq!(resolved.credentials.token(), "env-token");
        assert_eq!(resolved.api_key_origin, CredentialOrigin::Flag);
        assert_eq!(resolved.token_origin, CredentialOrigin::Environment);
    }

    #[test]
    fn default_env_file_fills_gaps() {
        let dir = empty_dir();
        let path = write_env_file(
            &dir,
            ".env",
            "# secrets\nTRELLO_API_KEY=file-key\nTRELLO_TOKEN=\"file-token\"\nOTHER=1\n",
        );
        let snapshot = env(&[("TRELLO_API_KEY", "env-key")]);

        let resolved = CredentialResolver::new(&snapshot)
            .with_working_dir(dir.path())
            .resolve(&CredentialSources::default())
            .unwrap();

        assert_eq!(resolved.credentials.api_key(), "env-key");
        assert_eq!(resolved.credentials.token(), "file-token");
        assert_eq!(resolved.token_origin, CredentialOrigin::File(path));
    }

    #[test]
    fn explicit_env_file_is_used() {
        let dir = empty_dir();
        let path = write_env_file(&dir, "trello.env", "TRELLO_API_KEY=k\nTRELLO_TOKEN=t\n");
        let snapshot = EnvSnapshot::default();
        let sources = CredentialSources {
            env_file: Some(path),
            ..CredentialSources::default()
        };

        let resolved = CredentialResolver::new(&snapshot).resolve(&sources).unwrap();
        assert_eq!(resolved.credentials.token(), "t");
    }

    #[test]
    fn missing_explicit_env_file_is_an_error() {
        let dir = empty_dir();
        let snapshot = env(&[("TRELLO_API_KEY", "abc"), ("TRELLO_TOKEN", "xyz")]);
        let sources = CredentialSources {
            env_file: Some(dir.path().join("nope.env")),
            ..CredentialSources::default()
        };

        let err = CredentialResolver::new(&snapshot).resolve(&sources).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::Credentials(CredentialError::SecretsFileNotFound { .. })
        ));
        assert_eq!(err.kind(), ErrorKind::CredentialsMissing);
    }

    #[test]
    fn unparsable_file_does_not_echo_content() {
        let dir = empty_dir();
        write_env_file(&dir, ".env", "TRELLO_TOKEN='supersecret\n");
        let snapshot = env(&[("TRELLO_API_KEY", "abc")]);

        let err = CredentialResolver::new(&snapshot)
            .with_working_dir(dir.path())
            .resolve(&CredentialSources::default())
            .unwrap_err();

        assert!(matches!(
            err,
            PlannerError::Credentials(CredentialError::SecretsFileUnreadable { .. })
        ));
        assert_eq!(err.kind(), ErrorKind::CredentialsMissing);
        assert!(!err.to_string().contains("supersecret"));
    }

    #[cfg(unix)]
    #[test]
    fn world_readable_file_warns() {
        use std::os::unix::fs::PermissionsExt;

        let dir = empty_dir();
        let path = write_env_file(&dir, ".env", "TRELLO_API_KEY=k\nTRELLO_TOKEN=t\n");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let resolved = CredentialResolver::new(&EnvSnapshot::default())
            .with_working_dir(dir.path())
            .resolve(&CredentialSources::default())
            .unwrap();

        assert_eq!(resolved.warnings.len(), 1);
        assert!(resolved.warnings[0].contains("chmod 600"));
    }

    #[test]
    fn debug_output_is_redacted() {
        let sources = CredentialSources {
            api_key: Some("abc123".into()),
            token: Some("xyz789".into()),
            env_file: None,
        };
        let snapshot = env(&[("TRELLO_TOKEN", "xyz789")]);

        let rendered = format!("{sources:?} {snapshot:?}");
        assert!(!rendered.contains("abc123"));
        assert!(!rendered.contains("xyz789"));
        assert!(rendered.contains("TRELLO_TOKEN"));
    }
}
