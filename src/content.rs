//! Portfolio content
//!
//! Everything the page shows is plain data. A built-in copy is compiled in;
//! a JSON file of the same shape can replace it at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::carousel::CarouselItem;
use crate::player::Track;

/// Errors that can occur while loading a content file
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to read content file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse content file: {0}")]
    ParseError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub degree: String,
    pub school: String,
    pub tagline: String,
    pub email: String,
    #[serde(default)]
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub repo_url: Option<String>,
}

impl Project {
    /// Tags shown on the card
    pub fn visible_tags(&self) -> &[String] {
        &self.tags[..self.tags.len().min(3)]
    }

    /// Demo link, if it points anywhere
    pub fn demo_link(&self) -> Option<&str> {
        self.demo_url
            .as_deref()
            .filter(|url| !url.is_empty() && *url != "#")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub role: String,
    pub company: String,
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub year: String,
    #[serde(default)]
    pub gpa: Option<String>,
}

/// All page content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub profile: Profile,
    pub projects: Vec<Project>,
    pub experience: Vec<Job>,
    pub education: Vec<Education>,
    pub skills: Vec<CarouselItem>,
    pub certifications: Vec<String>,
    pub track: Track,
}

impl Portfolio {
    /// Read a content file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load content from `path`, falling back to the built-in content on any
    /// error.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::from_file(path) {
            Ok(portfolio) => {
                log::info!("Loaded content from {}", path.display());
                portfolio
            }
            Err(e) => {
                log::warn!("{} ({}), using built-in content", e, path.display());
                Self::default()
            }
        }
    }

    /// `mailto:` link for the contact button
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.profile.email)
    }
}

fn skill(title: &str, icon: &str, description: &str) -> CarouselItem {
    CarouselItem {
        image: format!(
            "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/{0}/{0}-original.svg",
            icon
        ),
        title: title.to_string(),
        description: description.to_string(),
        link: None,
    }
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            profile: Profile {
                name: "Ikram Alif".to_string(),
                role: "System Engineer & Web Developer".to_string(),
                degree: "Bachelor of Information Systems Engineering (Hons)".to_string(),
                school: "UiTM Shah Alam".to_string(),
                tagline: "Passionate about building scalable web solutions with Laravel & Next.js. \
                          Designing immersive digital experiences."
                    .to_string(),
                email: "ikramalif.roslee@gmail.com".to_string(),
                linkedin: Some("https://linkedin.com/in/ikrm-alif".to_string()),
            },
            projects: vec![
                Project {
                    title: "Olympia Education LMS".to_string(),
                    description: "A comprehensive Learning Management System built with Laravel. \
                                  Features include user authentication, course enrollment, learning \
                                  material management, and content access control."
                        .to_string(),
                    tags: tags(&["Laravel", "PHP", "MySQL", "Bootstrap", "JavaScript"]),
                    image: Some("lms-preview.jpg".to_string()),
                    demo_url: Some("#".to_string()),
                    repo_url: None,
                },
                Project {
                    title: "International Halal Economic Awards".to_string(),
                    description: "Official website for IHEA. Content management for award \
                                  categories, event details, and winner showcases, with a focus on \
                                  performance and cross-browser compatibility."
                        .to_string(),
                    tags: tags(&["Laravel", "HTML/CSS", "JavaScript", "SEO"]),
                    image: Some("ihea-preview.jpg".to_string()),
                    demo_url: Some("#".to_string()),
                    repo_url: None,
                },
                Project {
                    title: "Smart Hafazan Tracker".to_string(),
                    description: "Flutter and Firebase app that lets teachers track Quran \
                                  memorization progress digitally, with role-based access control \
                                  and real-time sync."
                        .to_string(),
                    tags: tags(&["Flutter", "Firebase", "Mobile App", "Dart"]),
                    image: Some("hafazan-preview.jpg".to_string()),
                    demo_url: Some("#".to_string()),
                    repo_url: None,
                },
                Project {
                    title: "Olympia Sales Record".to_string(),
                    description: "Java desktop system for tracking sales data, with data entry \
                                  validation, reporting, and error handling for data integrity."
                        .to_string(),
                    tags: tags(&["Java", "Swing", "SQL", "Desktop App"]),
                    image: Some("sales-preview.jpg".to_string()),
                    demo_url: Some("#".to_string()),
                    repo_url: None,
                },
            ],
            experience: vec![Job {
                role: "Web Developer Intern".to_string(),
                company: "Olympia Education Malaysia".to_string(),
                period: "Sept 2024 - Present".to_string(),
                description: "Developed and maintained web apps using Laravel and PHP. \
                              Collaborated on system analysis and documentation."
                    .to_string(),
            }],
            education: vec![
                Education {
                    school: "Universiti Teknologi MARA (UiTM) Shah Alam".to_string(),
                    degree: "Bachelor of Information Systems (Hons.) Engineering".to_string(),
                    year: "2023 - 2026".to_string(),
                    gpa: None,
                },
                Education {
                    school: "Kolej Matrikulasi Kelantan".to_string(),
                    degree: "Accounting".to_string(),
                    year: "2020 - 2023".to_string(),
                    gpa: Some("3.54".to_string()),
                },
            ],
            skills: vec![
                skill("Laravel", "laravel", "PHP Framework for Web Artisans"),
                skill("Next.js", "nextjs", "React Framework for Production"),
                skill("Flutter", "flutter", "Cross-platform Mobile SDK"),
                skill("MySQL", "mysql", "Relational Database System"),
                skill("TypeScript", "typescript", "JavaScript with Superpowers"),
                skill("Azure", "azure", "Microsoft Cloud Platform"),
            ],
            certifications: vec![
                "Microsoft Certified: Azure Data Fundamentals".to_string(),
                "Microsoft Certified: Power BI Data Analyst Associate".to_string(),
            ],
            track: Track {
                title: "First Love".to_string(),
                artist: "KIM CHAEWON".to_string(),
                cover: "song/cover.jpg".to_string(),
                audio: "song/First Love.mp3".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_content() {
        let portfolio = Portfolio::default();
        assert_eq!(portfolio.skills.len(), 6);
        assert_eq!(portfolio.projects.len(), 4);
        assert_eq!(portfolio.mailto(), "mailto:ikramalif.roslee@gmail.com");
    }

    #[test]
    fn test_json_round_trip_of_builtin() {
        let portfolio = Portfolio::default();
        let json = serde_json::to_string(&portfolio).unwrap();
        assert_eq!(Portfolio::from_json(&json).unwrap(), portfolio);
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "profile": {
                "name": "A", "role": "B", "degree": "C", "school": "D",
                "tagline": "E", "email": "a@example.com"
            },
            "projects": [{ "title": "P", "description": "D", "tags": [] }],
            "experience": [],
            "education": [{ "school": "S", "degree": "D", "year": "2020" }],
            "skills": [{ "image": "i.svg", "title": "T", "description": "D" }],
            "certifications": [],
            "track": { "title": "t", "artist": "a", "cover": "c.jpg", "audio": "a.mp3" }
        }"#;
        let portfolio = Portfolio::from_json(json).unwrap();
        assert_eq!(portfolio.profile.linkedin, None);
        assert_eq!(portfolio.projects[0].demo_url, None);
        assert_eq!(portfolio.education[0].gpa, None);
        assert_eq!(portfolio.skills[0].link, None);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            Portfolio::from_json("{ \"profile\": 3 }"),
            Err(ContentError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let portfolio = Portfolio::load(Some(Path::new("does/not/exist.json")));
        assert_eq!(portfolio, Portfolio::default());
        assert_eq!(Portfolio::load(None), Portfolio::default());
    }

    #[test]
    fn test_visible_tags_capped_at_three() {
        let project = &Portfolio::default().projects[0];
        assert_eq!(project.visible_tags().len(), 3);
        assert_eq!(project.visible_tags()[0], "Laravel");
    }

    #[test]
    fn test_placeholder_demo_link_is_none() {
        let mut project = Portfolio::default().projects[0].clone();
        assert_eq!(project.demo_link(), None);
        project.demo_url = Some("https://example.com".to_string());
        assert_eq!(project.demo_link(), Some("https://example.com"));
    }
}
