use crate::config::settings::Settings;
use crate::config::toml_config::TomlConfig;
use crate::domain::model::{NewProfile, ResponseMode};
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "doctor-match")]
#[command(about = "Find the most relevant volunteer doctor for a medical request")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Env file holding OPENAI_API_KEY (values override the process environment)
    #[arg(long, global = true, default_value = ".env")]
    pub env_file: String,

    /// Path to the doctor profile JSON file
    #[arg(long, global = true)]
    pub profiles: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Ask the model which doctor fits a medical request
    Find(FindArgs),

    /// Manage the volunteer profile list
    #[command(subcommand)]
    Profiles(ProfilesCommand),
}

#[derive(Debug, Clone, Args)]
pub struct FindArgs {
    /// Free-text description of the medical issue
    pub query: String,

    /// Model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// json_schema or json_object
    #[arg(long)]
    pub response_format: Option<ResponseMode>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Print the result as a JSON object
    #[arg(long)]
    pub json: bool,

    /// Print the prompt without calling the model
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ProfilesCommand {
    /// List stored profiles, newest first
    List,

    /// Add a volunteer profile
    Add(AddProfileArgs),
}

#[derive(Debug, Clone, Args)]
pub struct AddProfileArgs {
    #[arg(long)]
    pub fullname: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub bio: String,

    /// Comma separated, e.g. "Arabic,English"
    #[arg(long, value_delimiter = ',')]
    pub languages: Vec<String>,
}

impl From<AddProfileArgs> for NewProfile {
    fn from(args: AddProfileArgs) -> Self {
        Self {
            fullname: args.fullname,
            phone: args.phone,
            bio: args.bio,
            languages: args
                .languages
                .into_iter()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect(),
        }
    }
}

impl CliConfig {
    /// Layers the TOML file (if any) and the flags over the environment defaults.
    /// The env file must already be loaded.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::from_env();

        if let Some(path) = &self.config {
            tracing::info!("📁 Loading configuration from: {}", path);
            settings = settings.apply_toml(&TomlConfig::from_file(path)?);
        }

        if let Some(profiles) = &self.profiles {
            settings.profiles_path = profiles.clone();
        }

        if let Command::Find(args) = &self.command {
            if let Some(model) = &args.model {
                settings.model = model.clone();
            }
            if let Some(mode) = args.response_format {
                settings.response_mode = mode;
            }
            if args.timeout.is_some() {
                settings.timeout_seconds = args.timeout;
            }
        }

        Ok(settings)
    }
}
