use clap::Parser;
use doctor_match::config::cli::{Command, FindArgs, ProfilesCommand};
use doctor_match::config::settings::{api_key_from_env, load_env_file, Settings};
use doctor_match::core::matcher::prepare_request;
use doctor_match::core::ConfigProvider;
use doctor_match::utils::error::ErrorSeverity;
use doctor_match::utils::{logger, validation::Validate};
use doctor_match::{
    CliConfig, DoctorMatcher, FileProfiles, LocalStorage, NewProfile, OpenAiClient, ProfileStore,
    Result,
};
use std::path::Path;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting doctor-match CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ doctor-match failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,   // service or model output
            ErrorSeverity::High => 1,     // input
            ErrorSeverity::Critical => 3, // configuration or system
        };
        std::process::exit(exit_code);
    }
}

async fn run(config: CliConfig) -> Result<()> {
    load_env_file(Path::new(&config.env_file))?;

    let settings = config.settings()?;
    settings.validate()?;
    tracing::debug!("Resolved settings: {:?}", settings);

    let storage = LocalStorage::new(".");

    match config.command {
        Command::Find(args) => find(&settings, storage, &args).await,
        Command::Profiles(ProfilesCommand::List) => {
            let store = ProfileStore::new(storage, settings.profiles_path());
            let profiles = store.list().await?;
            println!("{}", serde_json::to_string_pretty(&profiles)?);
            Ok(())
        }
        Command::Profiles(ProfilesCommand::Add(args)) => {
            let store = ProfileStore::new(storage, settings.profiles_path());
            let saved = store.save(NewProfile::from(args)).await?;
            println!("✅ Profile saved");
            println!("{}", serde_json::to_string_pretty(&saved)?);
            Ok(())
        }
    }
}

async fn find(settings: &Settings, storage: LocalStorage, args: &FindArgs) -> Result<()> {
    let profiles = FileProfiles::new(storage, settings.profiles_path());

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - the model will not be called");
        let request = prepare_request(
            &profiles,
            &args.query,
            settings.model(),
            settings.response_mode(),
        )
        .await?;
        println!("model: {} ({:?})", request.model, request.mode);
        for message in &request.messages {
            println!("--- {:?} ---", message.role);
            println!("{}", message.content);
        }
        return Ok(());
    }

    let api_key = api_key_from_env()?;
    let client = OpenAiClient::from_config(settings, api_key)?;
    let matcher = DoctorMatcher::from_config(profiles, client, settings);

    let doctor = matcher.find_doctor(&args.query).await?;

    if args.json {
        println!("{}", serde_json::to_string(&doctor)?);
    } else {
        println!("{}", doctor.name);
    }

    Ok(())
}
