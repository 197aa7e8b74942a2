//! `folio`: the portfolio owner's CLI.
//!
//! Keeps the profile, photo, resume and login token in a local store and
//! talks to `foliod` for login, contact messages and publishing the resume.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use portfolio::ContactMessage;

use config::ClientConfig;

/// Portfolio CLI.
#[derive(Parser, Debug)]
#[command(name = "folio", about = "Portfolio owner CLI")]
struct Cli {
    /// Path to client config file (default: ~/.folio/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Set client options.
    Config {
        /// foliod URL; pass an empty string to go offline.
        #[arg(long)]
        server: Option<String>,
        /// Local store file.
        #[arg(long)]
        store_path: Option<String>,
    },

    /// Unlock editing.
    Login {
        /// Password. Prompted for when omitted.
        #[arg(long)]
        password: Option<String>,
    },

    /// Lock editing and forget the token.
    Logout,

    /// Show local state and server reachability.
    Status,

    /// Profile text.
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Profile photo.
    Photo {
        #[command(subcommand)]
        action: PhotoAction,
    },

    /// Resume (PDF).
    Resume {
        #[command(subcommand)]
        action: ResumeAction,
    },

    /// Send a message through the contact form.
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },

    /// Print an argon2id hash for `[auth] password_hash` in the server config.
    HashPassword,
}

#[derive(Subcommand, Debug)]
enum ProfileAction {
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Set fields: `folio profile set cgpa=8.1 title="Backend Developer"`.
    Set {
        #[arg(required = true)]
        assignments: Vec<String>,
    },
    /// Prompt for each field.
    Edit,
}

#[derive(Subcommand, Debug)]
enum PhotoAction {
    Show,
    Upload { path: PathBuf },
    /// Revert to the default photo.
    Remove,
}

#[derive(Subcommand, Debug)]
enum ResumeAction {
    Show,
    Upload {
        path: PathBuf,
        /// Also replace the resume served by foliod.
        #[arg(long)]
        publish: bool,
    },
    Export { dest: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(PathBuf::from)
        .unwrap_or_else(ClientConfig::default_path);
    let mut config = ClientConfig::load(&config_path)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Config { server, store_path } => {
            if let Some(server) = server {
                config.server = server;
            }
            if let Some(store_path) = store_path {
                config.store_path = store_path;
            }
            config.save(&config_path)?;
            println!("Saved {}.", config_path.display());
        }

        Commands::HashPassword => {
            let pw = rpassword::prompt_password("Password: ")?;
            let confirm = rpassword::prompt_password("Confirm password: ")?;
            if pw != confirm {
                anyhow::bail!("Passwords do not match.");
            }
            if pw.is_empty() {
                anyhow::bail!("Password cannot be empty.");
            }
            println!("{}", folio_core::hash_secret(&pw)?);
        }

        Commands::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let client = commands::api_client(&config)?;
            let message = ContactMessage::new(name, email, subject, message);
            commands::contact::send(&client, message, &mut out).await?;
        }

        Commands::Login { password } => {
            let mut session = commands::open_session(&config)?;
            let password = match password {
                Some(p) => p,
                None => rpassword::prompt_password("Password: ")?,
            };
            let gate = commands::login::gate_for(&config);
            commands::login::login(&mut session, gate.as_ref(), &password, &mut out).await?;
        }

        Commands::Logout => {
            let mut session = commands::open_session(&config)?;
            commands::login::logout(&mut session, &mut out)?;
        }

        Commands::Status => {
            let session = commands::open_session(&config)?;
            commands::status::status(&config, &session, &mut out).await?;
        }

        Commands::Profile { action } => {
            let mut session = commands::open_session(&config)?;
            match action {
                ProfileAction::Show { json } => commands::profile::show(&session, json, &mut out)?,
                ProfileAction::Set { assignments } => {
                    let changes = commands::profile::parse_assignments(&assignments)?;
                    commands::profile::set(&mut session, &changes, &mut out)?;
                }
                ProfileAction::Edit => {
                    let mut input = std::io::stdin().lock();
                    commands::profile::edit(&mut session, &mut input, &mut out)?;
                }
            }
        }

        Commands::Photo { action } => {
            let session = commands::open_session(&config)?;
            match action {
                PhotoAction::Show => commands::photo::show(&session, &mut out)?,
                PhotoAction::Upload { path } => {
                    commands::photo::upload(&session, &path, &mut out).await?
                }
                PhotoAction::Remove => commands::photo::remove(&session, &mut out)?,
            }
        }

        Commands::Resume { action } => {
            let session = commands::open_session(&config)?;
            match action {
                ResumeAction::Show => commands::resume::show(&session, &mut out)?,
                ResumeAction::Upload { path, publish } => {
                    let client = if publish {
                        Some(commands::api_client(&config)?)
                    } else {
                        None
                    };
                    commands::resume::upload(&session, &path, client.as_ref(), &mut out).await?;
                }
                ResumeAction::Export { dest } => {
                    commands::resume::export(&session, &dest, &mut out)?
                }
            }
        }
    }

    Ok(())
}
