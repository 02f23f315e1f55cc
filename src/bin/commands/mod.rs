pub mod config_cmd;
pub mod fingerprint_cmd;
pub mod params_cmd;
pub mod validate_cmd;

pub use config_cmd::cmd_config;
pub use fingerprint_cmd::cmd_fingerprint;
pub use params_cmd::cmd_params;
pub use validate_cmd::cmd_validate;
