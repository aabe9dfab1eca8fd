//! `.env*` file discovery.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::options::ListOptions;
use super::EnvError;

/// Base name every layered env file starts with.
pub const BASE_FILENAME: &str = ".env";

/// Environment in which `.env.local` is never read, so test runs
/// don't depend on machine-local overrides.
pub const TEST_ENVIRONMENT: &str = "test";

/// Returns the existing `.env*` files in `dir`, ordered by priority from
/// lowest to highest:
///
/// 1. `.env`
/// 2. `.env.local` (skipped for the `test` environment)
/// 3. `.env.<environment>`
/// 4. `.env.<environment>.local`
///
/// Fails with [`EnvError::DirectoryNotFound`] if `dir` is not a directory.
pub fn list_files(dir: impl AsRef<Path>, options: &ListOptions) -> Result<Vec<PathBuf>, EnvError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(EnvError::DirectoryNotFound(dir.to_path_buf()));
    }

    let files: Vec<PathBuf> = candidate_names(options.environment.as_deref())
        .into_iter()
        .map(|name| dir.join(name))
        .filter(|path| path.is_file())
        .collect();

    debug!(dir = %dir.display(), count = files.len(), "listed env files");
    Ok(files)
}

/// Alias of [`list_files`].
#[deprecated(note = "use `list_files` instead")]
pub fn list_dotenv_files(
    dir: impl AsRef<Path>,
    options: &ListOptions,
) -> Result<Vec<PathBuf>, EnvError> {
    list_files(dir, options)
}

fn candidate_names(environment: Option<&str>) -> Vec<String> {
    let mut names = vec![BASE_FILENAME.to_string()];

    if environment != Some(TEST_ENVIRONMENT) {
        names.push(format!("{BASE_FILENAME}.local"));
    }

    if let Some(env) = environment.filter(|env| !env.is_empty()) {
        names.push(format!("{BASE_FILENAME}.{env}"));
        names.push(format!("{BASE_FILENAME}.{env}.local"));
    }

    names
}

/// Human readable pattern of the files looked up for `environment`.
pub(crate) fn file_pattern(environment: Option<&str>) -> String {
    match environment.filter(|env| !env.is_empty()) {
        Some(env) => format!("{BASE_FILENAME}[.{env}][.local]"),
        None => format!("{BASE_FILENAME}[.local]"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, names: &[&str]) {
        for name in names {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_production_files_ordered_by_priority() {
        let dir = TempDir::new().unwrap();
        touch(&dir, &[".env.production.local", ".env", ".env.production"]);

        let options = ListOptions::default().with_environment("production");
        let files = list_files(dir.path(), &options).unwrap();

        assert_eq!(
            names(&files),
            [".env", ".env.production", ".env.production.local"]
        );
        assert!(files.iter().all(|f| f.starts_with(dir.path())));
    }

    #[test]
    fn test_full_layering() {
        let dir = TempDir::new().unwrap();
        touch(
            &dir,
            &[".env", ".env.local", ".env.development", ".env.development.local", ".env.production"],
        );

        let options = ListOptions::default().with_environment("development");
        let files = list_files(dir.path(), &options).unwrap();

        assert_eq!(
            names(&files),
            [".env", ".env.local", ".env.development", ".env.development.local"]
        );
    }

    #[test]
    fn test_environment_skips_local() {
        let dir = TempDir::new().unwrap();
        touch(&dir, &[".env", ".env.local", ".env.test", ".env.test.local"]);

        let options = ListOptions::default().with_environment("test");
        let files = list_files(dir.path(), &options).unwrap();

        assert_eq!(names(&files), [".env", ".env.test", ".env.test.local"]);
    }

    #[test]
    fn test_without_environment() {
        let dir = TempDir::new().unwrap();
        touch(&dir, &[".env", ".env.local", ".env.production"]);

        let files = list_files(dir.path(), &ListOptions::default()).unwrap();
        assert_eq!(names(&files), [".env", ".env.local"]);
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let files = list_files(dir.path(), &ListOptions::default()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let result = list_files("/nonexistent/env/dir", &ListOptions::default());
        assert!(matches!(result, Err(EnvError::DirectoryNotFound(_))));
    }

    #[test]
    fn test_directories_are_not_files() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".env")).unwrap();

        let files = list_files(dir.path(), &ListOptions::default()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    #[allow(deprecated)]
    fn test_deprecated_alias() {
        let dir = TempDir::new().unwrap();
        touch(&dir, &[".env"]);
        let files = list_dotenv_files(dir.path(), &ListOptions::default()).unwrap();
        assert_eq!(names(&files), [".env"]);
    }

    #[test]
    fn test_file_pattern() {
        assert_eq!(file_pattern(Some("production")), ".env[.production][.local]");
        assert_eq!(file_pattern(None), ".env[.local]");
    }
}
