use doctor_match::config::settings::{api_key_from_env, Settings};
use doctor_match::config::toml_config::TomlConfig;
use doctor_match::core::ConfigProvider;
use doctor_match::utils::{logger, validation::Validate};
use doctor_match::{DoctorMatcher, FileProfiles, InlineProfiles, LocalStorage, OpenAiClient};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct Request {
    pub user_prompt: String,
    /// Any JSON document, embedded whole. Falls back to the configured
    /// profile file when absent.
    pub doctors: Option<serde_json::Value>,
}

#[derive(Serialize)]
pub struct Response {
    pub name: String,
}

fn lambda_settings() -> doctor_match::Result<Settings> {
    let settings = match std::env::var("DOCTOR_MATCH_CONFIG") {
        Ok(path) => Settings::from_env().apply_toml(&TomlConfig::from_file(path)?),
        Err(_) => Settings::from_env(),
    };
    settings.validate()?;
    Ok(settings)
}

async fn function_handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    let (request, _context) = event.into_parts();
    tracing::info!("Received doctor match request");

    let settings = lambda_settings()?;
    let client = OpenAiClient::from_config(&settings, api_key_from_env()?)?;

    let doctor = match request.doctors {
        Some(doctors) => {
            tracing::info!("Using doctor profiles from the request body");
            DoctorMatcher::from_config(InlineProfiles::new(doctors), client, &settings)
                .find_doctor(&request.user_prompt)
                .await?
        }
        None => {
            let profiles = FileProfiles::new(LocalStorage::new("."), settings.profiles_path());
            DoctorMatcher::from_config(profiles, client, &settings)
                .find_doctor(&request.user_prompt)
                .await?
        }
    };

    Ok(Response { name: doctor.name })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
