pub mod loader;
pub mod schema;

pub use loader::{
    find_config_file, load_config, load_config_from_file, ConfigFormat, ResolvedConfig,
    ENV_OWNER, ENV_SERVER, ENV_TOKEN,
};
pub use schema::{PromptSettings, ServerSettings, StatikiConfig};
