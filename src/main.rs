//! vitalrisk: cardiovascular risk assessment CLI
//!
//! Main entry point for the command-line application.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vitalrisk::application::{build_scorer, AssessmentService};
use vitalrisk::config::ScoringConfig;
use vitalrisk::domain::recommendations::guidance_for;
use vitalrisk::domain::BodyMeasurements;
use vitalrisk::{Assessment, HealthReadings, RiskLevel, ScoringMethod};

#[derive(Debug, Parser)]
#[command(
    name = "vitalrisk",
    version,
    about = "Cardiovascular risk assessment from age, blood pressure, cholesterol and BMI"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Assess risk for one set of readings
    Assess(AssessArgs),
    /// Print the guidance list for a risk level
    Guidance {
        /// low, moderate or high
        level: RiskLevel,
    },
}

#[derive(Debug, Args)]
struct AssessArgs {
    /// Age in years
    #[arg(long)]
    age: f64,

    /// Systolic blood pressure (mmHg)
    #[arg(long = "systolic-bp")]
    systolic_bp: f64,

    /// Total cholesterol (mg/dL)
    #[arg(long)]
    cholesterol: f64,

    /// Body mass index; alternatively give --height-cm and --weight-kg
    #[arg(long, conflicts_with_all = ["height_cm", "weight_kg"])]
    bmi: Option<f64>,

    /// Height in centimetres
    #[arg(long = "height-cm", requires = "weight_kg")]
    height_cm: Option<f64>,

    /// Weight in kilograms
    #[arg(long = "weight-kg", requires = "height_cm")]
    weight_kg: Option<f64>,

    /// Scoring scheme: weighted, rule_points or model
    #[arg(long)]
    method: Option<ScoringMethod>,

    /// Directory containing model.json (model scoring)
    #[arg(long = "model-dir")]
    model_dir: Option<PathBuf>,

    /// JSON scoring configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reference to attach to the assessment
    #[arg(long = "subject-id")]
    subject_id: Option<String>,

    /// Print the assessment as JSON
    #[arg(long)]
    json: bool,
}

impl AssessArgs {
    fn readings(&self) -> Result<HealthReadings> {
        match (self.bmi, self.height_cm, self.weight_kg) {
            (Some(bmi), _, _) => Ok(HealthReadings::new(
                self.age,
                self.systolic_bp,
                self.cholesterol,
                bmi,
            )),
            (None, Some(height_cm), Some(weight_kg)) => {
                let body = BodyMeasurements {
                    height_cm,
                    weight_kg,
                };
                HealthReadings::from_body(self.age, self.systolic_bp, self.cholesterol, &body)
                    .map_err(anyhow::Error::msg)
            }
            _ => bail!("Provide --bmi or both --height-cm and --weight-kg"),
        }
    }

    fn scoring_config(&self) -> Result<ScoringConfig> {
        let mut config = match &self.config {
            Some(path) => ScoringConfig::from_file(path)
                .with_context(|| format!("Failed to load config {path:?}"))?,
            None => ScoringConfig::default(),
        };
        config.apply_env_overrides()?;

        // Command-line flags win over file and environment.
        if let Some(method) = self.method {
            config.method = method;
        }
        if let Some(dir) = &self.model_dir {
            config.model_dir = Some(dir.clone());
        }
        Ok(config)
    }
}

fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    // stdout carries the report; logs go to stderr unless a file is requested.
    let log_mode = std::env::var("VITALRISK_LOG_MODE").unwrap_or_else(|_| "stderr".to_string());

    let (writer, guard) = if log_mode == "file" {
        let log_file = std::env::var("VITALRISK_LOG_FILE")
            .unwrap_or_else(|_| "vitalrisk.log".to_string());

        if let Some(parent) = std::path::Path::new(&log_file).parent() {
            // Best-effort: don't fail startup just because the directory is missing.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stderr())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    Ok(guard)
}

fn print_assessment(assessment: &Assessment) {
    println!("Risk level: {}", assessment.score.level);
    println!("  {}", assessment.score.level.description());
    println!(
        "Score: {:.2} ({} scoring)",
        assessment.score.value, assessment.method
    );
    if let Some(percent) = assessment.score.confidence_percent() {
        println!("Model confidence: {percent}%");
    }
    println!("BMI: {:.1}", assessment.readings.bmi);

    println!();
    println!("Recommendations:");
    for rec in &assessment.recommendations {
        println!("  - {rec}");
    }

    println!();
    println!("Based on your readings:");
    for tip in &assessment.factor_tips {
        println!("  - {tip}");
    }
}

fn run_assess(args: &AssessArgs) -> Result<()> {
    let readings = args.readings()?;
    let config = args.scoring_config()?;
    let service = AssessmentService::new(build_scorer(&config)?);

    let assessment = service.assess(args.subject_id.as_deref(), readings)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        print_assessment(&assessment);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging()?;

    match &cli.command {
        Command::Assess(args) => run_assess(args),
        Command::Guidance { level } => {
            println!("{}: {}", level, level.description());
            for item in guidance_for(*level) {
                println!("  - {item}");
            }
            Ok(())
        }
    }
}
