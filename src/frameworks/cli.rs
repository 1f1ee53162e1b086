// Framework bootstrap for the command-line client.

use crate::domain::{AuthServiceError, SignUpRequest, VerifyPasswordRequest};
use crate::frameworks::config;
use clap::{Args, Parser, Subcommand};
use std::{path::PathBuf, process::ExitCode};

#[derive(Parser)]
#[command(name = "identity_auth")]
#[command(version, about = "Email/password sign-up and sign-in against the identity provider")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,

    /// TOML config file; IDENTITY_* environment variables are used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new email/password account
    SignUp(CredentialArgs),
    /// Sign in with an existing email/password account
    VerifyPassword(CredentialArgs),
}

#[derive(Args)]
struct CredentialArgs {
    #[arg(long)]
    email: String,

    #[arg(long, env = "IDENTITY_PASSWORD", hide_env_values = true)]
    password: String,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Logs go to stderr so stdout only carries the JSON result.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run() -> ExitCode {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => config::from_file(path),
        None => config::from_env(),
    };
    let client_config = match loaded {
        Ok(client_config) => client_config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration.");
            return ExitCode::FAILURE;
        }
    };

    let service = match config::build_service(&client_config) {
        Ok(service) => service,
        Err(e) => {
            tracing::error!(error = %e, "failed to build identity client.");
            return ExitCode::FAILURE;
        }
    };

    let outcome = match cli.command {
        Command::SignUp(args) => {
            service
                .sign_up_new_user(SignUpRequest::new(args.email, args.password))
                .await
        }
        Command::VerifyPassword(args) => {
            service
                .verify_password(VerifyPasswordRequest::new(args.email, args.password))
                .await
        }
    };

    match outcome {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to encode result.");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            report_failure(&e);
            ExitCode::FAILURE
        }
    }
}

fn report_failure(err: &AuthServiceError) {
    match err {
        AuthServiceError::Auth(failure) => tracing::error!(
            message_type = %failure.message_type,
            status = failure.status,
            "provider rejected the request: {}",
            failure.raw_message
        ),
        AuthServiceError::Transport(failure) => {
            tracing::error!(kind = ?failure.kind, "request did not complete: {}", failure.message)
        }
        AuthServiceError::Decoding(failure) => {
            tracing::error!("provider response was not understood: {}", failure.message)
        }
    }
}
