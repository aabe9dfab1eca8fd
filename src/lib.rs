pub mod dotenv;
mod error;
pub mod sns;

pub use dotenv::{config, Config, EnvError, EnvMap, EnvStore, LoadOutcome};
pub use error::Error;
