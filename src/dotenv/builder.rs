use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use super::files::{file_pattern, list_files, BASE_FILENAME};
use super::load::{load, unload, LoadOutcome};
use super::options::{Encoding, ListOptions, LoadOptions, ReadOptions};
use super::store::{EnvStore, ProcessEnv};
use super::EnvError;

/// Variable consulted for the environment name when none is configured.
pub const DEFAULT_ENVIRONMENT_VAR: &str = "APP_ENV";

/// Environment used when nothing else names one.
pub const FALLBACK_ENVIRONMENT: &str = "development";

/// Builder for loading layered `.env*` files into the environment.
///
/// Discovers the files for the resolved environment in a directory, merges
/// them from lowest to highest priority and applies the result without
/// overriding variables that are already set.
///
/// ## Environment resolution
///
/// The first of these wins:
///
/// 1. [`with_environment`](Self::with_environment)
/// 2. the variable named by [`with_environment_var`](Self::with_environment_var)
///    (`APP_ENV` by default), if set and non-empty
/// 3. [`with_default_environment`](Self::with_default_environment)
/// 4. `"development"`
///
/// ## Example
///
/// ```no_run
/// use layered_env::Config;
///
/// let parsed = Config::builder()
///     .with_path("config/env")
///     .with_default_environment("production")
///     .load()?;
///
/// println!("loaded {} variables", parsed.len());
/// # Ok::<(), layered_env::EnvError>(())
/// ```
///
/// The options can also be embedded in a larger TOML or JSON config:
///
/// ```toml
/// [dotenv]
/// path = "config/env"
/// default_environment = "production"
/// purge_dotenv = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[must_use = "builders do nothing until .load() is called"]
pub struct Config {
    environment: Option<String>,
    default_environment: Option<String>,
    environment_var: Option<String>,
    path: Option<PathBuf>,
    encoding: Encoding,
    purge_dotenv: bool,
    silent: bool,
}

impl Config {
    /// Creates a new builder with every option at its default.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Sets the environment name, overriding any environment variable.
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Environment to use when the environment variable is not set.
    pub fn with_default_environment(mut self, environment: impl Into<String>) -> Self {
        self.default_environment = Some(environment.into());
        self
    }

    /// Name of the variable holding the environment name. Defaults to `APP_ENV`.
    pub fn with_environment_var(mut self, name: impl Into<String>) -> Self {
        self.environment_var = Some(name.into());
        self
    }

    /// Directory holding the `.env*` files. Defaults to the current directory.
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Unloads a previously loaded plain `.env` before loading.
    ///
    /// A plain dotenv loader running first makes `.env` values look like
    /// shell variables, which would then shadow `.env.local` and the
    /// environment specific files.
    pub fn with_purge_dotenv(mut self, purge: bool) -> Self {
        self.purge_dotenv = purge;
        self
    }

    /// Demotes diagnostics to debug level.
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Loads into the process environment.
    pub fn load(self) -> LoadOutcome {
        self.load_into(&mut ProcessEnv)
    }

    /// Loads into `store`.
    pub fn load_into<S: EnvStore + ?Sized>(self, store: &mut S) -> LoadOutcome {
        let files = match self.discover(store) {
            Ok(files) => files,
            Err(e) => {
                if self.silent {
                    debug!(error = %e, "failed to discover env files");
                } else {
                    warn!(error = %e, "failed to discover env files");
                }
                return Err(e);
            }
        };

        let options = LoadOptions::default()
            .with_encoding(self.encoding)
            .with_silent(self.silent);
        load(store, &files, &options)
    }

    /// Resolves the environment name against `store`.
    pub fn resolve_environment<S: EnvStore + ?Sized>(&self, store: &S) -> String {
        let var = self
            .environment_var
            .as_deref()
            .unwrap_or(DEFAULT_ENVIRONMENT_VAR);

        self.environment
            .clone()
            .or_else(|| store.get(var).filter(|value| !value.is_empty()))
            .or_else(|| self.default_environment.clone())
            .unwrap_or_else(|| FALLBACK_ENVIRONMENT.to_string())
    }

    fn resolve_path(&self) -> Result<PathBuf, EnvError> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir().map_err(EnvError::CurrentDir),
        }
    }

    fn discover<S: EnvStore + ?Sized>(&self, store: &mut S) -> Result<Vec<PathBuf>, EnvError> {
        let environment = self.resolve_environment(store);
        let dir = self.resolve_path()?;
        debug!(%environment, dir = %dir.display(), "loading env files");

        if self.purge_dotenv {
            let read = ReadOptions::default().with_encoding(self.encoding);
            unload(store, [dir.join(BASE_FILENAME)], &read);
        }

        let list = ListOptions::default().with_environment(environment.clone());
        let files = list_files(&dir, &list)?;
        if files.is_empty() {
            let pattern = file_pattern(Some(environment.as_str()));
            if self.silent {
                debug!(%pattern, dir = %dir.display(), "no env files found");
            } else {
                warn!(%pattern, dir = %dir.display(), "no env files found");
            }
        }

        Ok(files)
    }
}
