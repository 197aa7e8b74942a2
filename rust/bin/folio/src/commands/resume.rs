//! `folio resume show|upload|export`.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use portfolio::{ApiClient, PendingFile, Session};

use super::format_size;

pub fn show(session: &Session, out: &mut dyn Write) -> Result<()> {
    match session.resume()? {
        Some(resume) => writeln!(
            out,
            "{} ({})",
            resume.file_name.as_deref().unwrap_or("resume.pdf"),
            format_size(resume.data_uri.decoded_len())
        )?,
        None => writeln!(out, "No resume uploaded.")?,
    }
    Ok(())
}

/// Store the PDF locally; with `remote`, also replace the one foliod serves.
pub async fn upload(
    session: &Session,
    path: &Path,
    remote: Option<&ApiClient>,
    out: &mut dyn Write,
) -> Result<()> {
    let file = PendingFile::from_path(path)
        .await
        .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
    session.upload_resume(file.clone()).await?;
    writeln!(out, "Resume saved: {} ({}).", file.file_name, format_size(file.bytes.len()))?;

    if let Some(client) = remote {
        let token = session
            .token()
            .ok_or_else(|| anyhow::anyhow!("Not logged in."))?;
        let receipt = client.upload_resume(token, &file).await?;
        writeln!(
            out,
            "Published to {}{}.",
            client.base_url(),
            receipt.resume_url
        )?;
    }
    Ok(())
}

/// Write the stored resume back to disk.
pub fn export(session: &Session, dest: &Path, out: &mut dyn Write) -> Result<()> {
    let resume = session
        .resume()?
        .ok_or_else(|| anyhow::anyhow!("No resume uploaded."))?;
    let bytes = resume.data_uri.decode()?;
    std::fs::write(dest, &bytes)?;
    writeln!(out, "Wrote {} to {}.", format_size(bytes.len()), dest.display())?;
    Ok(())
}
