use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;

use lesion_triage::config::Config;
use lesion_triage::ids::{generate_lesion_id, generate_patient_id};
use lesion_triage::models::{NewLesion, NewPatient, PredictionRequest};
use lesion_triage::registry::text::{api_connection_message, footer, prediction_failed_message};
use lesion_triage::registry::{self, RiskCategory, get_risk_color, map_location_to_api};
use lesion_triage::validators::{
    validate_date_of_birth, validate_image_file, validate_initial_lesion_size,
    validate_lesion_location, validate_patient_name, validate_sex,
};
use lesion_triage::{ApiError, ImageUpload, TriageClient};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Skin lesion triage backend client.")]
pub struct CommandLine {
    /// Backend base URL, overrides TRIAGE_API_BASE_URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Request timeout in seconds, overrides TRIAGE_API_TIMEOUT_SECS
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check backend health
    Health,
    /// Show backend service information
    Info,
    /// Resolve an endpoint key to its full URL
    Url { key: Option<String> },
    /// Show the colors for a risk category, or the category for a probability
    Risk {
        category: Option<String>,
        #[arg(long)]
        probability: Option<f64>,
    },
    /// Map a UI location label to its backend form
    Location { display_name: String },
    /// Patient records
    #[command(subcommand)]
    Patients(PatientCommands),
    /// Lesion records
    #[command(subcommand)]
    Lesions(LesionCommands),
    /// Analyses of a lesion, oldest first
    Analyses { lesion_id: String },
    /// Feature display names
    Features,
    /// Submit an image for risk prediction
    Predict {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        sex: String,
        /// Display label ("Left Leg") or backend form ("left leg")
        #[arg(long)]
        location: String,
        /// Lesion diameter in millimeters
        #[arg(long)]
        diameter: f64,
    },
    /// Generate identifiers
    #[command(subcommand)]
    NewId(IdCommands),
}

#[derive(Subcommand)]
pub enum PatientCommands {
    List,
    Search { name: String },
    Get { patient_id: String },
    Create {
        #[arg(long)]
        name: String,
        /// Male or Female
        #[arg(long)]
        sex: String,
        /// DD/MM/YYYY
        #[arg(long)]
        dob: String,
        /// Defaults to a fresh timestamp ID
        #[arg(long)]
        id: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum LesionCommands {
    List { patient_id: String },
    Get { lesion_id: String },
    Create {
        #[arg(long)]
        patient_id: String,
        #[arg(long)]
        location: String,
        /// Initial size in millimeters
        #[arg(long)]
        size: f64,
        #[arg(long)]
        counter: Option<u32>,
    },
}

#[derive(Subcommand)]
pub enum IdCommands {
    Patient,
    Lesion {
        #[arg(long)]
        location: String,
        #[arg(long)]
        counter: Option<u32>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Environment config with command-line overrides applied
    pub fn config(&self) -> Result<Config> {
        self.apply_overrides(Config::from_env()?)
    }

    fn apply_overrides(&self, mut config: Config) -> Result<Config> {
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url).context("Invalid --base-url")?;
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout_secs(secs).context("Invalid --timeout")?;
        }
        Ok(config)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Backend form of a location given either as a display label or as a backend label
fn resolve_location(location: &str) -> Result<&'static str> {
    let mapped = map_location_to_api(location.trim());
    Ok(validate_lesion_location(&mapped)?.api_value())
}

pub async fn run(cli: CommandLine, config: Config) -> Result<()> {
    match cli.command {
        Commands::Url { key } => {
            println!("{}", config.api_url(key.as_deref())?);
        }
        Commands::Risk {
            category,
            probability,
        } => {
            let category = match (category, probability) {
                (_, Some(p)) => RiskCategory::from_probability(p).as_str().to_string(),
                (Some(c), None) => c,
                (None, None) => bail!("Give a risk category or --probability"),
            };
            let (primary, background, icon) = get_risk_color(&category)?.as_tuple();
            println!("{category}: primary={primary} background={background} icon={icon}");
        }
        Commands::Location { display_name } => {
            println!("{}", map_location_to_api(&display_name));
        }
        Commands::NewId(IdCommands::Patient) => {
            println!("{}", generate_patient_id());
        }
        Commands::NewId(IdCommands::Lesion { location, counter }) => {
            println!("{}", generate_lesion_id(resolve_location(&location)?, counter)?);
        }
        command => {
            let api_url = config.api_url(None)?;
            let client = TriageClient::from_config(config)?;
            if let Err(e) = run_remote(&client, command).await {
                if matches!(e.downcast_ref::<ApiError>(), Some(ApiError::Connection(_))) {
                    eprintln!("{}", api_connection_message(&api_url));
                }
                return Err(e);
            }
        }
    }
    Ok(())
}

async fn run_remote(client: &TriageClient, command: Commands) -> Result<()> {
    match command {
        Commands::Health => print_json(&client.check_health().await?)?,
        Commands::Info => {
            print_json(&client.get_api_info().await?)?;
            println!("{}", footer());
        }
        Commands::Features => print_json(&client.get_feature_display_names().await?)?,
        Commands::Analyses { lesion_id } => {
            for analysis in client.get_lesion_analyses(&lesion_id).await? {
                let risk = analysis.model_a_risk();
                println!("{analysis} | image model risk: {risk}");
            }
        }
        Commands::Patients(PatientCommands::List) => {
            for patient in client.get_all_patients().await? {
                println!("{patient}");
            }
        }
        Commands::Patients(PatientCommands::Search { name }) => {
            for patient in client.search_patients_by_name(&name).await? {
                println!("{patient}");
            }
        }
        Commands::Patients(PatientCommands::Get { patient_id }) => {
            match client.get_patient_by_id(&patient_id).await? {
                Some(patient) => print_json(&patient)?,
                None => bail!("Patient {patient_id} not found"),
            }
        }
        Commands::Patients(PatientCommands::Create { name, sex, dob, id }) => {
            validate_patient_name(&name)?;
            validate_sex(&sex)?;
            validate_date_of_birth(&dob)?;
            let patient = NewPatient {
                patient_id: id.unwrap_or_else(generate_patient_id),
                patient_full_name: name.trim().to_string(),
                sex,
                date_of_birth: dob,
            };
            print_json(&client.create_patient(&patient).await?)?;
        }
        Commands::Lesions(LesionCommands::List { patient_id }) => {
            for lesion in client.get_lesions_by_patient(&patient_id).await? {
                println!("{lesion}");
            }
        }
        Commands::Lesions(LesionCommands::Get { lesion_id }) => {
            match client.get_lesion_by_id(&lesion_id).await? {
                Some(lesion) => print_json(&lesion)?,
                None => bail!("Lesion {lesion_id} not found"),
            }
        }
        Commands::Lesions(LesionCommands::Create {
            patient_id,
            location,
            size,
            counter,
        }) => {
            validate_initial_lesion_size(size)?;
            let location = resolve_location(&location)?;
            let lesion = NewLesion {
                lesion_id: generate_lesion_id(location, counter)?,
                patient_id,
                lesion_location: location.to_string(),
                initial_size_mm: size,
            };
            print_json(&client.create_lesion(&lesion).await?)?;
        }
        Commands::Predict {
            image,
            age,
            sex,
            location,
            diameter,
        } => {
            let upload = ImageUpload::from_path(&image)
                .await
                .with_context(|| format!("Failed to read {}", image.display()))?;
            validate_image_file(&upload.file_name, upload.bytes.len() as u64)?;

            let request = PredictionRequest {
                age,
                sex,
                location: resolve_location(&location)?.to_string(),
                diameter,
            };
            match client.submit_prediction(upload, &request).await {
                Ok(prediction) => {
                    println!("{}", registry::text::ANALYSIS_COMPLETE_MESSAGE);
                    println!("{prediction}");
                    print_json(&prediction)?;
                }
                Err(e) => {
                    eprintln!("{}", prediction_failed_message(&e));
                    return Err(e.into());
                }
            }
        }
        Commands::Url { .. }
        | Commands::Risk { .. }
        | Commands::Location { .. }
        | Commands::NewId(_) => bail!("command does not use the backend"),
    }
    Ok(())
}
