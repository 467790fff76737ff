pub mod matcher;
pub mod profiles;
pub mod prompt;

pub use crate::domain::model::{
    ChatMessage, CompletionRequest, DoctorMatch, DoctorProfiles, ProfileList,
};
pub use crate::domain::ports::{CompletionClient, ConfigProvider, ProfileSource, Storage};
pub use crate::utils::error::Result;
