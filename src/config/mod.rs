mod loader;
mod model;
mod template;

pub use loader::{ConfigLoader, FileConfigLoader, FileSystem, LOCAL_CONFIG_NAME, RealFileSystem};
pub use model::{ChartConfig, Record, StatePatch, generate_id};
pub use template::DEFAULT_CONFIG_TEMPLATE;
