//! Showcase content: projects, the portfolio grid, and testimonials.
//!
//! Content is either the compiled-in fixture or a TOML file:
//!
//! ```toml
//! [[projects]]
//! id = "project1"
//! category = "web"
//! title = "E-commerce Platform"
//! description = "..."
//! icon = "</>"
//! technologies = ["React", "Node.js"]
//! features = ["..."]
//! achievements = ["..."]
//!
//! [[testimonials]]
//! quote = "..."
//! author = "Jane Doe"
//! role = "CTO, Example Corp"
//! ```
//!
//! Grid order follows project order in the file.

#![allow(missing_docs)]

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::errors::{FolioError, Result};
use crate::showcase::catalog::{ProjectCatalog, ProjectRecord, builtin_projects};
use crate::showcase::filter::{ALL_TAG, PortfolioItem};

/// One testimonial slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    #[serde(default)]
    pub role: String,
}

/// Everything the showcase displays, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseContent {
    pub catalog: ProjectCatalog,
    pub items: Vec<PortfolioItem>,
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Deserialize)]
struct ContentFile {
    #[serde(default)]
    projects: Vec<ProjectEntry>,
    #[serde(default)]
    testimonials: Vec<Testimonial>,
}

#[derive(Debug, Deserialize)]
struct ProjectEntry {
    id: String,
    category: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_icon")]
    icon: String,
    #[serde(default)]
    technologies: Vec<String>,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    achievements: Vec<String>,
}

fn default_icon() -> String {
    "•".to_string()
}

impl ShowcaseContent {
    /// The compiled-in portfolio.
    #[must_use]
    pub fn builtin() -> Self {
        let projects = builtin_projects();
        let items = projects
            .iter()
            .map(|(id, category, record)| PortfolioItem {
                project_id: id.clone(),
                title: record.title.clone(),
                category: category.clone(),
            })
            .collect();
        let catalog = ProjectCatalog::new(
            projects
                .into_iter()
                .map(|(id, _, record)| (id, record)),
        );
        Self {
            catalog,
            items,
            testimonials: builtin_testimonials(),
        }
    }

    /// Load from `path` when given, otherwise use the built-in fixture.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Self::builtin()),
            Some(path) => {
                let raw = fs::read_to_string(path).map_err(|source| FolioError::io(path, source))?;
                Self::from_toml_str(&raw).map_err(|details| FolioError::InvalidContent {
                    path: path.to_path_buf(),
                    details,
                })
            }
        }
    }

    /// Parse and validate a content document.
    pub fn from_toml_str(raw: &str) -> std::result::Result<Self, String> {
        let file: ContentFile = toml::from_str(raw).map_err(|e| e.to_string())?;

        let mut seen = HashSet::new();
        for entry in &file.projects {
            if entry.id.trim().is_empty() {
                return Err("project id must not be empty".to_string());
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(format!("duplicate project id {:?}", entry.id));
            }
            if entry.title.trim().is_empty() {
                return Err(format!("project {:?} has an empty title", entry.id));
            }
            let category = entry.category.trim();
            if category.is_empty() {
                return Err(format!("project {:?} has an empty category", entry.id));
            }
            if category.eq_ignore_ascii_case(ALL_TAG) {
                return Err(format!(
                    "project {:?} uses the reserved category {ALL_TAG:?}",
                    entry.id
                ));
            }
        }
        for (i, testimonial) in file.testimonials.iter().enumerate() {
            if testimonial.quote.trim().is_empty() || testimonial.author.trim().is_empty() {
                return Err(format!("testimonial #{} needs a quote and an author", i + 1));
            }
        }

        let items = file
            .projects
            .iter()
            .map(|entry| PortfolioItem {
                project_id: entry.id.clone(),
                title: entry.title.clone(),
                category: entry.category.trim().to_string(),
            })
            .collect();
        let catalog = ProjectCatalog::new(file.projects.into_iter().map(|entry| {
            (
                entry.id,
                ProjectRecord {
                    title: entry.title,
                    description: entry.description,
                    icon: entry.icon,
                    technologies: entry.technologies,
                    features: entry.features,
                    achievements: entry.achievements,
                },
            )
        }));

        Ok(Self {
            catalog,
            items,
            testimonials: file.testimonials,
        })
    }
}

fn builtin_testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial {
            quote: "Delivered a storefront that out-converted our old site within the first \
                    month. Communication was clear and every milestone landed on time."
                .to_string(),
            author: "Sarah Chen".to_string(),
            role: "Head of Growth, Northwind Retail".to_string(),
        },
        Testimonial {
            quote: "The launch video carried our whole campaign. Sharp editing, great motion \
                    work, and zero hand-holding needed."
                .to_string(),
            author: "Marcus Webb".to_string(),
            role: "Brand Director, Lumen Audio".to_string(),
        },
        Testimonial {
            quote: "Our community bot has run for a year without a restart. Moderation load \
                    dropped to almost nothing."
                .to_string(),
            author: "Priya Nair".to_string(),
            role: "Community Lead, Pixelforge".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[projects]]
id = "site"
category = "web"
title = "Studio Site"
technologies = ["Rust"]

[[projects]]
id = "reel"
category = "video"
title = "Showreel"
description = "Cuts from 2025."

[[testimonials]]
quote = "Great."
author = "A. Client"
"#;

    #[test]
    fn builtin_items_line_up_with_catalog() {
        let content = ShowcaseContent::builtin();
        assert_eq!(content.items.len(), content.catalog.len());
        for item in &content.items {
            assert!(content.catalog.contains(&item.project_id));
        }
        assert_eq!(content.testimonials.len(), 3);
    }

    #[test]
    fn parses_content_file() {
        let content = ShowcaseContent::from_toml_str(SAMPLE).expect("valid content");
        let ids: Vec<&str> = content.items.iter().map(|i| i.project_id.as_str()).collect();
        assert_eq!(ids, ["site", "reel"]);
        assert_eq!(content.catalog.get("site").map(|r| r.icon.as_str()), Some("•"));
        assert_eq!(content.testimonials[0].role, "");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let raw = "[[projects]]\nid = \"a\"\ncategory = \"web\"\ntitle = \"A\"\n\n\
                   [[projects]]\nid = \"a\"\ncategory = \"web\"\ntitle = \"B\"\n";
        let err = ShowcaseContent::from_toml_str(raw).unwrap_err();
        assert!(err.contains("duplicate"), "{err}");
    }

    #[test]
    fn rejects_wildcard_category() {
        let raw = "[[projects]]\nid = \"a\"\ncategory = \"All\"\ntitle = \"A\"\n";
        let err = ShowcaseContent::from_toml_str(raw).unwrap_err();
        assert!(err.contains("reserved"), "{err}");
    }

    #[test]
    fn empty_document_is_valid_and_empty() {
        let content = ShowcaseContent::from_toml_str("").expect("empty is fine");
        assert!(content.catalog.is_empty());
        assert!(content.testimonials.is_empty());
    }

    #[test]
    fn load_reports_path_on_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.toml");
        fs::write(&path, "[[projects]]\nid = 3\n").unwrap();
        let err = ShowcaseContent::load(Some(&path)).unwrap_err();
        assert_eq!(err.code(), "FOLIO-2001");
        assert!(err.to_string().contains("content.toml"));
    }

    #[test]
    fn load_without_path_is_builtin() {
        let content = ShowcaseContent::load(None).expect("builtin");
        assert_eq!(content, ShowcaseContent::builtin());
    }
}
