//! `folio contact`: send a message through the server.

use std::io::Write;

use anyhow::Result;
use portfolio::{ContactForm, ContactForwarder, ContactMessage};

pub async fn send(
    forwarder: &dyn ContactForwarder,
    message: ContactMessage,
    out: &mut dyn Write,
) -> Result<()> {
    let mut form = ContactForm::new(message);
    let notice = form.submit(forwarder).await;
    writeln!(out, "{}", notice.title())?;
    writeln!(out, "{}", notice.description())?;
    if !notice.is_success() {
        anyhow::bail!("message not sent");
    }
    Ok(())
}
