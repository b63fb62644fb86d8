//! Small helpers shared by the Atrium crates: path resolution and query
//! string encoding.

pub mod path_processing;
pub mod query_encoding;

pub use path_processing::{app_config_dir, default_log_path, env_path_override, expand_tilde};
pub use query_encoding::{decode_query_component, encode_query_component};
