//! Configuration file loading for management-advisor
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `ADVISOR_<SECTION>__<KEY>` (e.g. `ADVISOR_MODELS__DEFAULT`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./advisor.toml` or `./.advisor.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/management-advisor/config.toml`
//!    (fallback `~/.config/management-advisor/config.toml`)
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileEvaluationConfig, FileGeminiConfig, FileLangfuseConfig, FileModelsConfig,
    FileOutputConfig, FilePromptsConfig, FileServerConfig, FileTraceConfig, LangfuseCredentials,
};
pub use loader::ConfigLoader;
