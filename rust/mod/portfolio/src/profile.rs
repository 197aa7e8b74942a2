use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("malformed profile: {0}")]
    Malformed(String),

    #[error("unknown profile field: {0}")]
    UnknownField(String),

    #[error("invalid profile: {0}")]
    Invalid(String),
}

/// The biography and contact data shown on the page.
///
/// One per deployment. Edits replace the whole record; the JSON shape is
/// fixed and unknown fields are rejected when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub description: String,
    pub github: String,
    pub linkedin: String,
    pub email: String,
    pub cgpa: String,
    pub problems_solved: String,
    pub about1: String,
    pub about2: String,
    pub about3: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Piyush Shukla".into(),
            title: "Frontend Developer & DSA Enthusiast".into(),
            description: "Passionate Frontend Developer & DSA Enthusiast crafting beautiful, \
                responsive web experiences with clean code and innovative solutions."
                .into(),
            github: "https://github.com/piyushshuk1a".into(),
            linkedin: "https://www.linkedin.com/in/piyush-shukla-791238298/".into(),
            email: "piyushshukla6396@gmail.com".into(),
            cgpa: "7.6".into(),
            problems_solved: "200+".into(),
            about1: "I'm a motivated and detail-oriented third-year B.Tech student in \
                Electronics and Communication Engineering (2023–2027) with a CGPA of 7.6. \
                I have a strong interest in frontend development and artificial intelligence."
                .into(),
            about2: "I've solved 200+ DSA questions across platforms like LeetCode, CodeChef, \
                Codeforces, GFG, and InterviewPrep, constantly improving my problem-solving skills."
                .into(),
            about3: "I enjoy building clean, responsive interfaces and optimizing user experience. \
                My expertise spans across multiple programming languages and modern web \
                development frameworks."
                .into(),
        }
    }
}

impl Profile {
    /// JSON field names, in display order.
    pub const FIELDS: [&'static str; 11] = [
        "name",
        "title",
        "description",
        "github",
        "linkedin",
        "email",
        "cgpa",
        "problemsSolved",
        "about1",
        "about2",
        "about3",
    ];

    /// Decode and validate a stored or submitted record.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ProfileError> {
        let profile: Profile = serde_json::from_slice(bytes).map_err(|e| {
            let msg = e.to_string();
            if msg.starts_with("unknown field") {
                ProfileError::UnknownField(msg)
            } else {
                ProfileError::Malformed(msg)
            }
        })?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.name.trim().is_empty() {
            return Err(ProfileError::Invalid("name must not be empty".into()));
        }
        Ok(())
    }

    /// Page title, `"<name> - <title>"`.
    pub fn document_title(&self) -> String {
        format!("{} - {}", self.name, self.title)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        let value = match field {
            "name" => &self.name,
            "title" => &self.title,
            "description" => &self.description,
            "github" => &self.github,
            "linkedin" => &self.linkedin,
            "email" => &self.email,
            "cgpa" => &self.cgpa,
            "problemsSolved" => &self.problems_solved,
            "about1" => &self.about1,
            "about2" => &self.about2,
            "about3" => &self.about3,
            _ => return None,
        };
        Some(value)
    }

    /// Change one field on a copy the caller will save as a whole.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<(), ProfileError> {
        let slot = match field {
            "name" => &mut self.name,
            "title" => &mut self.title,
            "description" => &mut self.description,
            "github" => &mut self.github,
            "linkedin" => &mut self.linkedin,
            "email" => &mut self.email,
            "cgpa" => &mut self.cgpa,
            "problemsSolved" => &mut self.problems_solved,
            "about1" => &mut self.about1,
            "about2" => &mut self.about2,
            "about3" => &mut self.about3,
            other => return Err(ProfileError::UnknownField(other.to_string())),
        };
        *slot = value.into();
        Ok(())
    }
}
