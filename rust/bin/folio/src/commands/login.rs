//! Login / logout commands.

use std::io::Write;

use anyhow::Result;
use folio_core::CredentialGate;
use portfolio::{LocalGate, RemoteGate, Session};

use crate::config::ClientConfig;

/// The server decides when one is configured, the compiled-in secret otherwise.
pub fn gate_for(config: &ClientConfig) -> Box<dyn CredentialGate> {
    match config.server() {
        Some(server) => Box::new(RemoteGate::new(portfolio::ApiClient::new(server))),
        None => Box::new(LocalGate::new()),
    }
}

pub async fn login(
    session: &mut Session,
    gate: &dyn CredentialGate,
    password: &str,
    out: &mut dyn Write,
) -> Result<()> {
    if session.is_authenticated() {
        writeln!(out, "Already logged in.")?;
        return Ok(());
    }
    if !session.login(gate, password).await? {
        anyhow::bail!("Incorrect password.");
    }
    writeln!(out, "Logged in. Editing unlocked.")?;
    Ok(())
}

pub fn logout(session: &mut Session, out: &mut dyn Write) -> Result<()> {
    session.logout()?;
    writeln!(out, "Logged out.")?;
    Ok(())
}
