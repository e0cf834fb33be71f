// Per-page pipeline: guard, extract, match, render, inject

use crate::error::{BannerError, Result};
use crate::inject;
use crate::matcher::{path_filename, url_filename};
use crate::render::Renderer;
use navbanner_extractor::{IndexSource, MenuExtractor, MenuStructure};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

/// Where a processed page lives; determines its filename and where its
/// index document is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLocation {
    File(PathBuf),
    Url(Url),
}

impl PageLocation {
    pub fn filename(&self) -> String {
        match self {
            PageLocation::File(path) => path_filename(path),
            PageLocation::Url(url) => url_filename(url),
        }
    }

    pub fn index_source(&self, index_path: &str) -> Result<IndexSource> {
        match self {
            PageLocation::File(path) => Ok(IndexSource::for_file(path, index_path)),
            PageLocation::Url(url) => IndexSource::for_url(url, index_path).map_err(BannerError::from),
        }
    }

    /// Public URL of a page under `base`, given its path relative to the
    /// site root.
    pub fn under_base(base: &Url, relative: &str) -> Result<Self> {
        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let relative = relative.replace('\\', "/");
        base.join(relative.trim_start_matches('/'))
            .map(PageLocation::Url)
            .map_err(|e| BannerError::InvalidLocation(format!("{} + {}: {}", base, relative, e)))
    }
}

impl fmt::Display for PageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageLocation::File(path) => write!(f, "{}", path.display()),
            PageLocation::Url(url) => write!(f, "{}", url),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The page is the index document itself.
    IndexPage,
    NoFilename,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Skipped(SkipReason),
    Injected {
        html: String,
        active_tab: usize,
        menu_available: bool,
    },
}

pub struct BannerPipeline {
    extractor: MenuExtractor,
    renderer: Renderer,
    menus: HashMap<IndexSource, Option<MenuStructure>>,
}

impl BannerPipeline {
    pub fn new(extractor: MenuExtractor, renderer: Renderer) -> Self {
        Self {
            extractor,
            renderer,
            menus: HashMap::new(),
        }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Menu for `source`, loaded at most once per pipeline.
    pub async fn menu(&mut self, source: &IndexSource) -> Option<&MenuStructure> {
        self.load_menu(source).await;
        self.menus.get(source).and_then(Option::as_ref)
    }

    async fn load_menu(&mut self, source: &IndexSource) {
        if self.menus.contains_key(source) {
            debug!("Using cached menu for {}", source);
            return;
        }
        let menu = self.extractor.extract(source).await;
        if menu.is_none() {
            warn!("No menu available from {}", source);
        }
        self.menus.insert(source.clone(), menu);
    }

    /// Runs the whole pipeline for one page and returns the page with the
    /// banner injected.
    pub async fn process(&mut self, location: &PageLocation, html: &str) -> Result<PageOutcome> {
        let current = location.filename();
        if current.is_empty() {
            info!("Skipping {}: no page filename", location);
            return Ok(PageOutcome::Skipped(SkipReason::NoFilename));
        }
        if current == self.renderer.config().index_filename() {
            info!("Skipping {}: index page", location);
            return Ok(PageOutcome::Skipped(SkipReason::IndexPage));
        }

        let source = location.index_source(&self.renderer.config().index_path)?;
        self.load_menu(&source).await;
        let menu = self.menus.get(&source).and_then(Option::as_ref);

        let active_tab = self.renderer.matcher().active_category(menu, &current);
        let banner = self.renderer.render(menu, active_tab, &current);
        let menu_available = menu.is_some_and(|m| !m.is_empty());

        info!(
            "Injecting banner into {} (active tab {}, menu {})",
            location,
            active_tab,
            if menu_available { "available" } else { "unavailable" }
        );

        Ok(PageOutcome::Injected {
            html: inject::inject(html, &banner),
            active_tab,
            menu_available,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_under_base_adds_trailing_slash() {
        let base = Url::parse("https://example.com/site").unwrap();
        let location = PageLocation::under_base(&base, "pages/quiz.html").unwrap();
        assert_eq!(
            location,
            PageLocation::Url(Url::parse("https://example.com/site/pages/quiz.html").unwrap())
        );
    }

    #[test]
    fn test_under_base_windows_separators() {
        let base = Url::parse("https://example.com/").unwrap();
        let location = PageLocation::under_base(&base, "pages\\quiz.html").unwrap();
        assert_eq!(location.filename(), "quiz.html");
    }

    #[test]
    fn test_index_source_for_url_page() {
        let location =
            PageLocation::Url(Url::parse("https://example.com/site/pages/quiz.html").unwrap());
        assert_eq!(
            location.index_source("../index.html").unwrap(),
            IndexSource::Http(Url::parse("https://example.com/site/index.html").unwrap())
        );
    }
}
