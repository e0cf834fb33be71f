use serde::{Deserialize, Serialize};

/// Compiled-in banner settings. Passed explicitly to every component that
/// needs them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerConfig {
    /// Index document, relative to each page.
    pub index_path: String,
    pub brand_color: String,
    pub logo_url: String,
    pub logo_alt: String,
    pub repository_url: String,
    pub copyright: String,
    pub title: String,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            index_path: "../index.html".to_string(),
            brand_color: "#96004B".to_string(),
            logo_url: "https://www.unige.ch/cdn/themes/unige2016/img/unige-logo.svg".to_string(),
            logo_alt: "University of Geneva".to_string(),
            repository_url: "https://github.com/Roehrin/webapps_for_EEG_courses/tree/site"
                .to_string(),
            copyright: "© 2025 Dr Nicolas Roehri".to_string(),
            title: "Advanced EEG pages collection".to_string(),
        }
    }
}

impl BannerConfig {
    /// Filename of the index document, e.g. `index.html` for `../index.html`.
    pub fn index_filename(&self) -> &str {
        self.index_path.rsplit('/').next().unwrap_or_default()
    }
}
