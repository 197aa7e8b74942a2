//! `folio photo show|upload|remove`.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use portfolio::{AssetRef, PendingFile, Session};

use super::format_size;

pub fn show(session: &Session, out: &mut dyn Write) -> Result<()> {
    match session.photo()? {
        AssetRef::Inline(uri) => writeln!(
            out,
            "Uploaded photo ({}, {})",
            uri.mime(),
            format_size(uri.decoded_len())
        )?,
        AssetRef::Default(path) => writeln!(out, "Default photo ({})", path)?,
    }
    Ok(())
}

pub async fn upload(session: &Session, path: &Path, out: &mut dyn Write) -> Result<()> {
    let file = PendingFile::from_path(path)
        .await
        .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
    let size = file.bytes.len();
    session.upload_photo(file).await?;
    writeln!(out, "Profile photo updated ({}).", format_size(size))?;
    Ok(())
}

pub fn remove(session: &Session, out: &mut dyn Write) -> Result<()> {
    session.remove_photo()?;
    writeln!(out, "Profile photo reset to default.")?;
    Ok(())
}
