//! Applying parsed variables to an [`EnvStore`] and removing them again.

use std::path::Path;

use tracing::{debug, warn};

use super::options::{LoadOptions, ReadOptions};
use super::parse::{parse, EnvMap};
use super::store::EnvStore;
use super::EnvError;

/// Result of a load: the merged variables, or what went wrong.
pub type LoadOutcome = Result<EnvMap, EnvError>;

/// Parses `files` (lowest priority first) and applies the merged variables
/// to `store`.
///
/// Variables already present in the store keep their value, so anything set
/// by the shell wins over the files. The returned map is the merged file
/// content, including keys that were skipped for that reason.
///
/// Nothing is written when parsing fails or when the store would reject any
/// of the variables. Loading the same files twice leaves the store unchanged
/// the second time.
pub fn load<S, I>(store: &mut S, files: I, options: &LoadOptions) -> LoadOutcome
where
    S: EnvStore + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let result = parse(files, &options.read_options()).and_then(|parsed| {
        apply(store, &parsed, options.silent)?;
        Ok(parsed)
    });

    if let Err(e) = &result {
        if options.silent {
            debug!(error = %e, "failed to load env files");
        } else {
            warn!(error = %e, "failed to load env files");
        }
    }

    result
}

fn apply<S: EnvStore + ?Sized>(store: &mut S, parsed: &EnvMap, silent: bool) -> Result<(), EnvError> {
    let mut pending = Vec::new();

    for (key, value) in parsed {
        match store.get(key) {
            None => {
                store.check(key, value)?;
                pending.push((key, value));
            }
            Some(current) if current == *value => {}
            Some(_) if silent => {
                debug!(%key, "variable already defined, keeping existing value");
            }
            Some(_) => {
                warn!(%key, "variable is already defined in the environment and will not be overwritten");
            }
        }
    }

    for (key, value) in pending {
        store.set(key, value)?;
    }
    Ok(())
}

/// Removes the variables defined in `files` from `store`.
///
/// A variable is only removed while its value still equals the one in the
/// files, so values changed after loading are left alone. The store does not
/// record who set a variable: a shell variable that happens to hold the same
/// value as the file is removed too, which is what lets a purge undo a plain
/// `.env` load. Read and parse failures are logged and otherwise ignored.
pub fn unload<S, I>(store: &mut S, files: I, options: &ReadOptions)
where
    S: EnvStore + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let parsed = match parse(files, options) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!(error = %e, "skipping unload");
            return;
        }
    };

    for (key, value) in &parsed {
        if store.get(key).as_deref() == Some(value.as_str()) {
            store.remove(key);
        }
    }
}
