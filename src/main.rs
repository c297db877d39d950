use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tunnelstack::AppError;

#[derive(Parser)]
#[command(name = "tunnelstack")]
#[command(version)]
#[command(
    about = "Synthesize a Tailscale + OpenVPN EC2 appliance stack",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the Terraform JSON stack document
    #[clap(visible_alias = "s")]
    Synth {
        /// Directory containing the config/ and docker/ template trees
        #[arg(long, default_value = ".")]
        base_dir: PathBuf,
        /// Directory the stack document is written to
        #[arg(long, default_value = "cdktf.out")]
        out_dir: PathBuf,
        /// Exclude the OpenVPN-over-Tailscale relay stack
        #[arg(long)]
        no_relay: bool,
    },
    /// Print the first-boot bootstrap script to stdout
    #[clap(visible_alias = "ud")]
    UserData {
        /// Directory containing the config/ and docker/ template trees
        #[arg(long, default_value = ".")]
        base_dir: PathBuf,
        /// Exclude the OpenVPN-over-Tailscale relay stack
        #[arg(long)]
        no_relay: bool,
    },
    /// Deploy the default template tree into the base directory
    #[clap(visible_alias = "i")]
    Init {
        /// Target directory for the template tree
        #[arg(long, default_value = ".")]
        base_dir: PathBuf,
    },
    /// Check environment variables, template files, and substitution output
    #[clap(visible_alias = "dr")]
    Doctor {
        /// Directory containing the config/ and docker/ template trees
        #[arg(long, default_value = ".")]
        base_dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result: Result<ExitCode, AppError> = match cli.command {
        Commands::Synth { base_dir, out_dir, no_relay } => {
            tunnelstack::synth(&base_dir, &out_dir, no_relay.then_some(false)).map(|outcome| {
                let relay = if outcome.with_relay { "with relay" } else { "no relay" };
                println!(
                    "✅ Synthesized stack ({}, {}) at {}",
                    outcome.instance_type,
                    relay,
                    outcome.output_path.display()
                );
                ExitCode::SUCCESS
            })
        }
        Commands::UserData { base_dir, no_relay } => {
            tunnelstack::user_data(&base_dir, no_relay.then_some(false)).map(|script| {
                print!("{}", script);
                ExitCode::SUCCESS
            })
        }
        Commands::Init { base_dir } => tunnelstack::init(&base_dir).map(|written| {
            println!("✅ Deployed template tree ({} files)", written.len());
            for path in &written {
                println!("  {}", path);
            }
            ExitCode::SUCCESS
        }),
        Commands::Doctor { base_dir } => tunnelstack::doctor(&base_dir).map(|report| {
            if report.is_healthy() {
                println!("✅ All checks passed");
                ExitCode::SUCCESS
            } else {
                println!("Found {} issue(s):", report.issues.len());
                for issue in &report.issues {
                    println!("  • {}", issue);
                }
                ExitCode::FAILURE
            }
        }),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
