//! JSON configuration files for the command-line tools.

pub mod analysis;

pub use analysis::{load_config, load_params, OutputConfig, OutputFormat, RuntimeConfig};
