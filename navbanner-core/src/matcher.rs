// Which menu entry is the page being processed

use navbanner_extractor::MenuStructure;
use std::collections::HashMap;
use std::path::Path;
use url::Url;

/// Quiz pages that share one entry in the index.
const MULTI_QUIZ_VARIANTS: [&str; 3] = [
    "topography_quiz_multi.html",
    "graph_quiz_multi.html",
    "source_localization_quiz_multi.html",
];
const MULTI_QUIZ_CANONICAL: &str = "topography_quiz_multi.html";

/// Maps interchangeable page filenames onto the one listed in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    pub fn empty() -> Self {
        Self {
            aliases: HashMap::new(),
        }
    }

    /// Registers `variants` as aliases of `canonical`. The canonical name
    /// always maps to itself, which keeps `normalize` idempotent.
    pub fn with_group(mut self, canonical: &str, variants: &[&str]) -> Self {
        for variant in variants {
            self.aliases
                .insert((*variant).to_string(), canonical.to_string());
        }
        self.aliases
            .insert(canonical.to_string(), canonical.to_string());
        self
    }

    pub fn normalize<'a>(&'a self, filename: &'a str) -> &'a str {
        self.aliases
            .get(filename)
            .map(String::as_str)
            .unwrap_or(filename)
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::empty().with_group(MULTI_QUIZ_CANONICAL, &MULTI_QUIZ_VARIANTS)
    }
}

/// Last path segment of a link URL, without query string or fragment.
pub fn link_filename(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = &url[..end];
    path.rsplit('/').next().unwrap_or_default()
}

/// Filename of a page served at `url`. Empty for directory URLs.
pub fn url_filename(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default()
        .to_string()
}

/// Filename of a page stored at `path`.
pub fn path_filename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default)]
pub struct PageMatcher {
    aliases: AliasTable,
}

impl PageMatcher {
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    /// Two filenames name the same page when they are equal raw or after
    /// normalization, in either direction. Normalization is idempotent, so
    /// comparing normalized forms covers every combination.
    pub fn same_page(&self, a: &str, b: &str) -> bool {
        self.aliases.normalize(a) == self.aliases.normalize(b)
    }

    /// Whether a menu link points at the current page.
    pub fn is_current(&self, link_url: &str, current: &str) -> bool {
        !current.is_empty() && self.same_page(link_filename(link_url), current)
    }

    /// Index of the first category holding a link to `current`; 0 when the
    /// page is not in the menu or there is no menu.
    pub fn active_category(&self, menu: Option<&MenuStructure>, current: &str) -> usize {
        let Some(menu) = menu else {
            return 0;
        };

        menu.categories()
            .position(|(_, sections)| {
                sections
                    .values()
                    .flatten()
                    .any(|link| self.is_current(&link.url, current))
            })
            .unwrap_or(0)
    }
}
