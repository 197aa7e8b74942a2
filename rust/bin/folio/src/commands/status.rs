//! `folio status`.

use std::io::Write;

use anyhow::Result;
use portfolio::Session;

use crate::config::ClientConfig;

pub async fn status(config: &ClientConfig, session: &Session, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Store:    {}", config.store_path().display())?;
    writeln!(
        out,
        "Editing:  {}",
        if session.is_authenticated() { "unlocked" } else { "locked" }
    )?;
    writeln!(out, "Profile:  {}", session.profile().document_title())?;
    writeln!(
        out,
        "Photo:    {}",
        if session.photo()?.is_default() { "default" } else { "uploaded" }
    )?;
    writeln!(
        out,
        "Resume:   {}",
        if session.resume()?.is_some() { "uploaded" } else { "none" }
    )?;

    let Some(server) = config.server() else {
        writeln!(out, "Server:   (offline)")?;
        return Ok(());
    };
    let client = portfolio::ApiClient::new(server);
    match client.version().await {
        Ok(v) => writeln!(out, "Server:   {} ({} v{})", server, v.name, v.version)?,
        Err(e) => writeln!(out, "Server:   {} (unreachable: {})", server, e)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{session, text};

    #[tokio::test]
    async fn offline_status() {
        let s = session();
        let config = ClientConfig {
            server: String::new(),
            store_path: "/tmp/folio-test.redb".into(),
        };
        let mut out = Vec::new();
        status(&config, &s, &mut out).await.unwrap();
        assert_eq!(
            text(out),
            "Store:    /tmp/folio-test.redb\n\
             Editing:  locked\n\
             Profile:  Piyush Shukla - Frontend Developer & DSA Enthusiast\n\
             Photo:    default\n\
             Resume:   none\n\
             Server:   (offline)\n"
        );
    }
}
