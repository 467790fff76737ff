pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{openai::OpenAiClient, storage::LocalStorage};
pub use config::Settings;
pub use core::{
    matcher::DoctorMatcher,
    profiles::{FileProfiles, InlineProfiles, ProfileStore},
};
pub use domain::model::{DoctorMatch, DoctorProfiles, NewProfile, ProfileList, ResponseMode};
pub use utils::error::{MatchError, Result};
