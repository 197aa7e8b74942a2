//! `folio profile show|set|edit`.

use std::io::{BufRead, Write};

use anyhow::Result;
use portfolio::{Profile, Session};

pub fn show(session: &Session, json: bool, out: &mut dyn Write) -> Result<()> {
    let profile = session.profile();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(profile)?)?;
        return Ok(());
    }
    writeln!(out, "{}", profile.document_title())?;
    for field in Profile::FIELDS {
        writeln!(out, "  {:<15} {}", field, profile.get(field).unwrap_or_default())?;
    }
    Ok(())
}

/// Change one or more fields, given as `(field, value)` pairs, in one save.
pub fn set(session: &mut Session, changes: &[(String, String)], out: &mut dyn Write) -> Result<()> {
    let mut profile = session.profile().clone();
    for (field, value) in changes {
        profile.set(field, value.as_str())?;
    }
    session.save_profile(profile)?;
    writeln!(out, "Profile saved.")?;
    Ok(())
}

/// Parse `field=value` arguments.
pub fn parse_assignments(args: &[String]) -> Result<Vec<(String, String)>> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                .ok_or_else(|| anyhow::anyhow!("expected field=value, got {:?}", arg))
        })
        .collect()
}

/// Prompt for every field; an empty answer keeps the current value.
pub fn edit(session: &mut Session, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<()> {
    if !session.is_authenticated() {
        anyhow::bail!("Editing is locked. Run `folio login` first.");
    }
    let mut profile = session.profile().clone();
    for field in Profile::FIELDS {
        write!(out, "{} [{}]: ", field, profile.get(field).unwrap_or_default())?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let answer = line.trim_end_matches(['\r', '\n']);
        if !answer.is_empty() {
            profile.set(field, answer)?;
        }
    }
    if &profile == session.profile() {
        writeln!(out, "No changes.")?;
        return Ok(());
    }
    session.save_profile(profile)?;
    writeln!(out, "Profile saved.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use portfolio::SessionError;

    use super::*;
    use crate::commands::testing::{session, text, unlocked};

    #[test]
    fn show_lists_every_field() {
        let s = session();
        let mut out = Vec::new();
        show(&s, false, &mut out).unwrap();
        let out = text(out);
        assert!(out.starts_with("Piyush Shukla - Frontend Developer & DSA Enthusiast\n"));
        assert!(out.contains("problemsSolved  200+"));

        let mut out = Vec::new();
        show(&s, true, &mut out).unwrap();
        let back: Profile = serde_json::from_slice(&out).unwrap();
        assert_eq!(&back, s.profile());
    }

    #[test]
    fn assignments() {
        let args = vec!["cgpa=8.0".to_string(), "title=A=B".to_string()];
        assert_eq!(
            parse_assignments(&args).unwrap(),
            vec![
                ("cgpa".to_string(), "8.0".to_string()),
                ("title".to_string(), "A=B".to_string())
            ]
        );
        assert!(parse_assignments(&["cgpa".to_string()]).is_err());
    }

    #[tokio::test]
    async fn set_requires_login() {
        let mut s = session();
        let err = set(&mut s, &[("cgpa".into(), "9.0".into())], &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SessionError>(),
            Some(SessionError::Locked)
        ));

        let mut s = unlocked().await;
        set(&mut s, &[("cgpa".into(), "9.0".into())], &mut Vec::new()).unwrap();
        assert_eq!(s.profile().cgpa, "9.0");
        assert_eq!(s.store().profile().unwrap().cgpa, "9.0");
    }

    #[tokio::test]
    async fn unknown_field_saves_nothing() {
        let mut s = unlocked().await;
        let changes = [("cgpa".to_string(), "9.0".to_string()), ("avatar".to_string(), "x".to_string())];
        assert!(set(&mut s, &changes, &mut Vec::new()).is_err());
        assert_eq!(s.profile().cgpa, "7.6");
    }

    #[tokio::test]
    async fn interactive_edit_keeps_blank_answers() {
        let mut s = unlocked().await;
        let mut input: &[u8] = b"\nBackend Developer\n";
        let mut out = Vec::new();
        edit(&mut s, &mut input, &mut out).unwrap();
        assert_eq!(s.profile().name, "Piyush Shukla");
        assert_eq!(s.profile().title, "Backend Developer");
        assert!(text(out).ends_with("Profile saved.\n"));
    }
}
