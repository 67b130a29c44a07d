//! lz-config CLI
//!
//! Validates landing zone configurations, converts them to Terraform
//! variables and submits deployments.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// lz-config - Landing zone configuration tool
#[derive(Parser)]
#[command(name = "lz-config")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    Validate {
        /// Configuration file
        config_file: String,
    },

    /// Convert a configuration file to Terraform variables
    Convert {
        /// Configuration file
        config_file: String,

        /// Output .tfvars file
        output_file: String,

        /// Leave out per-environment settings
        #[arg(long)]
        common_only: bool,

        /// Landing zone type (overrides the configuration)
        #[arg(long, env = "LZ_CONFIG_LANDING_ZONE_TYPE")]
        landing_zone_type: Option<String>,
    },

    /// Convert every environment of a landing zone
    ConvertAll {
        /// Configuration file
        config_file: String,

        /// Landing zone directory (defaults to landing-zones/<type>)
        #[arg(long)]
        landing_zone_dir: Option<String>,

        /// Landing zone type (overrides the configuration)
        #[arg(long, env = "LZ_CONFIG_LANDING_ZONE_TYPE")]
        landing_zone_type: Option<String>,
    },

    /// Validate, convert and submit a deployment build
    Deploy {
        /// Configuration file
        config_file: String,

        /// Project the build runs in
        #[arg(long)]
        project_id: String,

        /// Follow the build until it finishes
        #[arg(long)]
        progress: bool,

        /// Landing zone type (overrides the configuration)
        #[arg(long, env = "LZ_CONFIG_LANDING_ZONE_TYPE")]
        landing_zone_type: Option<String>,

        /// Landing zone directory (defaults to landing-zones/<type>)
        #[arg(long)]
        landing_zone_dir: Option<String>,

        /// Build pipeline (defaults to <landing-zone-dir>/cloudbuild.yaml)
        #[arg(long)]
        pipeline: Option<String>,

        /// Value for the _DOMAIN substitution
        #[arg(long)]
        domain: Option<String>,

        /// Secret Manager version exposed to the build as SECRET
        #[arg(long)]
        secret_version: Option<String>,

        /// Seconds between build status polls
        #[arg(long, default_value_t = 5)]
        poll_interval: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Validate { config_file } => {
            commands::validate::run(&config_file).await?;
        }
        Commands::Convert {
            config_file,
            output_file,
            common_only,
            landing_zone_type,
        } => {
            commands::convert::run(
                &config_file,
                &output_file,
                common_only,
                landing_zone_type.as_deref(),
            )
            .await?;
        }
        Commands::ConvertAll {
            config_file,
            landing_zone_dir,
            landing_zone_type,
        } => {
            commands::convert_all::run(
                &config_file,
                landing_zone_dir.as_deref(),
                landing_zone_type.as_deref(),
            )
            .await?;
        }
        Commands::Deploy {
            config_file,
            project_id,
            progress,
            landing_zone_type,
            landing_zone_dir,
            pipeline,
            domain,
            secret_version,
            poll_interval,
        } => {
            commands::deploy::run(commands::deploy::DeployArgs {
                config_path: &config_file,
                project_id: &project_id,
                progress,
                landing_zone_type: landing_zone_type.as_deref(),
                landing_zone_dir: landing_zone_dir.as_deref(),
                pipeline: pipeline.as_deref(),
                domain: domain.as_deref(),
                secret_version: secret_version.as_deref(),
                poll_interval,
            })
            .await?;
        }
    }

    Ok(())
}
