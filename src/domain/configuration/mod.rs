pub mod engine_config;
pub mod loader;

pub use engine_config::{
    AwardConfig, EngineConfig, GenerationConfig, MAX_VIDEOS_PER_MODULE, ProgressionConfig,
    VideoConfig,
};
pub use loader::{CONFIG_FILE, load_config, parse_config_content};
