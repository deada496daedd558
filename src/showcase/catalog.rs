//! Static project catalog: detail records keyed by project identifier.

#![allow(missing_docs)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Everything the detail modal shows for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub title: String,
    pub description: String,
    /// Short glyph drawn next to the title.
    pub icon: String,
    pub technologies: Vec<String>,
    pub features: Vec<String>,
    pub achievements: Vec<String>,
}

/// Immutable id → record table. Built once at startup and never edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectCatalog {
    records: BTreeMap<String, ProjectRecord>,
}

impl ProjectCatalog {
    #[must_use]
    pub fn new(records: impl IntoIterator<Item = (String, ProjectRecord)>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn get(&self, project_id: &str) -> Option<&ProjectRecord> {
        self.records.get(project_id)
    }

    #[must_use]
    pub fn contains(&self, project_id: &str) -> bool {
        self.records.contains_key(project_id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProjectRecord)> {
        self.records.iter().map(|(id, record)| (id.as_str(), record))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Built-in fixture: `(project_id, category, record)` for the six showcase
/// projects.
#[must_use]
pub fn builtin_projects() -> Vec<(String, String, ProjectRecord)> {
    vec![
        (
            "project1".to_string(),
            "web".to_string(),
            ProjectRecord {
                title: "E-commerce Platform".to_string(),
                description: "A comprehensive e-commerce solution built with modern technologies, \
                              featuring AI-powered recommendations, advanced analytics, and \
                              seamless payment integration."
                    .to_string(),
                icon: "</>".to_string(),
                technologies: strings(&[
                    "React",
                    "Node.js",
                    "MongoDB",
                    "Stripe API",
                    "Machine Learning",
                ]),
                features: strings(&[
                    "AI-powered product recommendations",
                    "Real-time inventory management",
                    "Advanced analytics dashboard",
                    "Multi-payment gateway integration",
                    "Progressive Web App (PWA)",
                    "Mobile-first responsive design",
                ]),
                achievements: strings(&[
                    "40% increase in conversion rates",
                    "99.9% uptime achievement",
                    "10x faster page load times",
                ]),
            },
        ),
        (
            "project2".to_string(),
            "video".to_string(),
            ProjectRecord {
                title: "Brand Commercial Video".to_string(),
                description: "A cinematic brand commercial featuring advanced motion graphics, \
                              3D animations, and professional color grading that increased \
                              brand awareness by 300%."
                    .to_string(),
                icon: "▶".to_string(),
                technologies: strings(&[
                    "After Effects",
                    "Cinema 4D",
                    "Premiere Pro",
                    "DaVinci Resolve",
                ]),
                features: strings(&[
                    "Cinematic storytelling",
                    "Advanced motion graphics",
                    "3D product visualization",
                    "Professional color grading",
                    "Surround sound audio design",
                    "Multi-platform optimization",
                ]),
                achievements: strings(&[
                    "2M+ views on social media",
                    "300% brand awareness increase",
                    "Award-winning cinematography",
                ]),
            },
        ),
        (
            "project3".to_string(),
            "ai".to_string(),
            ProjectRecord {
                title: "AI Analytics Dashboard".to_string(),
                description: "An intelligent analytics dashboard that leverages machine learning \
                              to provide real-time insights and predictive analytics for \
                              business decision-making."
                    .to_string(),
                icon: "◎".to_string(),
                technologies: strings(&["Python", "TensorFlow", "Vue.js", "D3.js", "PostgreSQL"]),
                features: strings(&[
                    "Real-time data visualization",
                    "Predictive analytics engine",
                    "Machine learning insights",
                    "Custom report generation",
                    "API integration suite",
                    "Mobile companion app",
                ]),
                achievements: strings(&[
                    "85% accuracy in predictions",
                    "60% faster decision making",
                    "Industry-leading performance",
                ]),
            },
        ),
        (
            "project4".to_string(),
            "bot".to_string(),
            ProjectRecord {
                title: "Advanced Discord Bot".to_string(),
                description: "A sophisticated Discord bot with AI-powered moderation, custom \
                              commands, music streaming, and community management features."
                    .to_string(),
                icon: "#".to_string(),
                technologies: strings(&["Discord.js", "Node.js", "MongoDB", "OpenAI API"]),
                features: strings(&[
                    "AI-powered moderation",
                    "Custom command system",
                    "Music streaming integration",
                    "Automated role management",
                    "Advanced logging system",
                    "Multi-server dashboard",
                ]),
                achievements: strings(&[
                    "500+ servers deployed",
                    "99.9% uptime maintained",
                    "50K+ active users",
                ]),
            },
        ),
        (
            "project5".to_string(),
            "design".to_string(),
            ProjectRecord {
                title: "Mobile App UI Design".to_string(),
                description: "A sleek and intuitive mobile application interface designed with \
                              user experience at its core, featuring micro-interactions and \
                              modern design principles."
                    .to_string(),
                icon: "▯".to_string(),
                technologies: strings(&["Figma", "Principle", "After Effects", "Lottie"]),
                features: strings(&[
                    "User-centered design",
                    "Micro-interactions",
                    "Accessibility compliance",
                    "Cross-platform consistency",
                    "Animation prototyping",
                    "Design system creation",
                ]),
                achievements: strings(&[
                    "4.9/5 user satisfaction",
                    "40% engagement increase",
                    "Award-winning UX design",
                ]),
            },
        ),
        (
            "project6".to_string(),
            "3d".to_string(),
            ProjectRecord {
                title: "3D Product Showcase".to_string(),
                description: "A stunning 3D product visualization and animation showcase \
                              featuring photorealistic rendering and interactive product \
                              exploration."
                    .to_string(),
                icon: "◆".to_string(),
                technologies: strings(&["Blender", "Three.js", "WebGL", "Cinema 4D"]),
                features: strings(&[
                    "Photorealistic rendering",
                    "360° product rotation",
                    "Interactive exploration",
                    "Real-time lighting",
                    "Material customization",
                    "VR compatibility",
                ]),
                achievements: strings(&[
                    "500% engagement boost",
                    "95% reduction in returns",
                    "Industry benchmark quality",
                ]),
            },
        ),
    ]
}
