//! uesim UE library
//!
//! Loads and validates the UE profile that the `nr-ue-nas` tool builds its
//! NAS context from.

pub mod config_loader;

pub use config_loader::{
    load_and_validate_ue_profile, load_ue_profile, load_ue_profile_from_str,
    validate_ue_profile, ConfigError, ConfigValidationError,
};
