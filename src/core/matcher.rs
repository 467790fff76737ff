use crate::core::prompt::{build_messages, build_system_prompt};
use crate::domain::model::{CompletionRequest, DoctorMatch, ResponseMode};
use crate::domain::ports::{CompletionClient, ConfigProvider, ProfileSource};
use crate::utils::error::{MatchError, Result};

/// Loads the profiles and builds the request without touching the network.
pub async fn prepare_request<P: ProfileSource>(
    profiles: &P,
    query: &str,
    model: &str,
    mode: ResponseMode,
) -> Result<CompletionRequest> {
    let profiles = profiles.load_profiles().await?;
    if profiles.is_empty() {
        tracing::warn!("Profile document is empty, the model has no doctor to choose from");
    }

    let system_prompt = build_system_prompt(&profiles, mode)?;
    Ok(CompletionRequest {
        model: model.to_string(),
        messages: build_messages(system_prompt, query),
        mode,
    })
}

/// Reads the structured output. `name` must be present and a string;
/// other fields are ignored.
pub fn parse_doctor_match(content: &str) -> Result<DoctorMatch> {
    serde_json::from_str::<DoctorMatch>(content).map_err(|e| MatchError::SchemaViolationError {
        reason: e.to_string(),
    })
}

pub struct DoctorMatcher<P: ProfileSource, C: CompletionClient> {
    profiles: P,
    client: C,
    model: String,
    mode: ResponseMode,
}

impl<P: ProfileSource, C: CompletionClient> DoctorMatcher<P, C> {
    pub fn new(profiles: P, client: C, model: impl Into<String>, mode: ResponseMode) -> Self {
        Self {
            profiles,
            client,
            model: model.into(),
            mode,
        }
    }

    pub fn from_config<Cfg: ConfigProvider>(profiles: P, client: C, config: &Cfg) -> Self {
        Self::new(profiles, client, config.model(), config.response_mode())
    }

    /// One completion call; the returned name is not checked against the
    /// profile list.
    pub async fn find_doctor(&self, query: &str) -> Result<DoctorMatch> {
        let request = prepare_request(&self.profiles, query, &self.model, self.mode).await?;

        tracing::info!("Asking {} for the most relevant doctor", self.model);
        let content = self.client.complete(&request).await?;
        tracing::debug!("Structured output: {}", content);

        let doctor = parse_doctor_match(&content)?;
        tracing::info!("Matched doctor: {}", doctor.name);
        Ok(doctor)
    }
}
