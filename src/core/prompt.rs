use crate::domain::model::{ChatMessage, DoctorProfiles, ResponseMode};
use crate::utils::error::Result;

pub const MATCH_INSTRUCTIONS: &str = "In the prompt the user will provide what medical issue they are facing. Your job is to find the most relevant doctor that can help with the issue.";

/// json_object mode only works when the prompt itself asks for JSON.
pub const JSON_OBJECT_INSTRUCTIONS: &str =
    "Reply ONLY with a JSON object in the format: { \"name\": \"Doctor Name\" }";

pub fn build_system_prompt(profiles: &DoctorProfiles, mode: ResponseMode) -> Result<String> {
    let serialized = serde_json::to_string_pretty(profiles)?;
    let mut prompt = format!(
        "Here is a list of volunteer doctors: {}\n{}",
        serialized, MATCH_INSTRUCTIONS
    );

    if mode == ResponseMode::JsonObject {
        prompt.push(' ');
        prompt.push_str(JSON_OBJECT_INSTRUCTIONS);
    }

    Ok(prompt)
}

/// Exactly two messages: the system prompt, then the query verbatim.
pub fn build_messages(system_prompt: String, query: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::system(system_prompt), ChatMessage::user(query)]
}
