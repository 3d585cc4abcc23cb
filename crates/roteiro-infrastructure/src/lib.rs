pub mod json_dir_prompt_repository;
pub mod paths;
pub mod storage;
pub mod toml_model_config_repository;
pub mod toml_platform_format_repository;

pub use crate::json_dir_prompt_repository::JsonDirPromptRepository;
pub use crate::toml_model_config_repository::TomlModelConfigRepository;
pub use crate::toml_platform_format_repository::TomlPlatformFormatRepository;
