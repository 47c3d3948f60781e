use anyhow::Result;
use aws_config::BehaviorVersion;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use costctl::config::{init_config, Config};
use costctl::providers::aws::{AwsCompute, AwsDatabase, CloudWatchMetrics};
use costctl::report;

#[derive(Parser)]
#[command(name = "costctl")]
#[command(
    about = "AWS cost optimization and rightsizing report CLI",
    long_about = "costctl inspects your AWS account and prints an advisory report.\n\nSections:\n  - EC2 rightsizing: CPU, network, and disk averages vs. thresholds\n  - RDS rightsizing: CPU and free-storage averages vs. thresholds\n  - Unused resources: unattached EBS volumes, unused snapshots, unassociated Elastic IPs\n\nThresholds and the lookback window come from the config file; credentials\nand everything else resolve from the ambient AWS environment."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full advisory report (EC2, RDS, unused resources)
    Report,
    /// Initialize report configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = ".costctl.toml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Suppress INFO by default, only show warnings and errors
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Report => {
            let shared = aws_config::defaults(BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws.region.clone()))
                .load()
                .await;
            let compute = AwsCompute::new(aws_sdk_ec2::Client::new(&shared));
            let databases = AwsDatabase::new(aws_sdk_rds::Client::new(&shared));
            let metrics = CloudWatchMetrics::new(aws_sdk_cloudwatch::Client::new(&shared));

            report::run(&config, &compute, &databases, &metrics).await?;
        }
        Commands::Init { output } => {
            init_config(&output)?;
        }
    }

    Ok(())
}
