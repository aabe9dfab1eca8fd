//! Layered `.env*` file loading.

mod builder;
mod error;
mod files;
mod load;
mod options;
mod parse;
mod store;

pub use builder::{Config, DEFAULT_ENVIRONMENT_VAR, FALLBACK_ENVIRONMENT};
pub use error::{EnvError, SyntaxError, SyntaxErrorKind};
#[allow(deprecated)]
pub use files::{list_dotenv_files, list_files, BASE_FILENAME, TEST_ENVIRONMENT};
pub use load::{load, unload, LoadOutcome};
pub use options::{Encoding, ListOptions, LoadOptions, ReadOptions};
pub use parse::{parse, parse_file, parse_str, EnvMap};
pub use store::{EnvStore, MemoryEnv, ProcessEnv};

/// Loads the `.env*` files of the current directory into the process
/// environment with default options.
///
/// Shorthand for `Config::builder().load()`.
pub fn config() -> LoadOutcome {
    Config::builder().load()
}
