use crate::error::{ExtractError, Result};
use crate::menu::{LinkEntry, MenuStructure, SectionMap};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

const CATEGORY_HEADING: &str = "h2";
const SECTION_HEADING: &str = "h3";

static CATEGORY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(CATEGORY_HEADING).expect("static selector"));
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("static selector"));

/// Where the index document for a page lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndexSource {
    Http(Url),
    File(PathBuf),
}

impl IndexSource {
    /// Index location for a page served at `page_url`.
    pub fn for_url(page_url: &Url, index_path: &str) -> Result<Self> {
        let joined = page_url
            .join(index_path)
            .map_err(|e| ExtractError::InvalidUrl(format!("{} + {}: {}", page_url, index_path, e)))?;
        Ok(IndexSource::Http(joined))
    }

    /// Index location for a page stored at `page_path`.
    pub fn for_file(page_path: &Path, index_path: &str) -> Self {
        let dir = page_path.parent().unwrap_or_else(|| Path::new(""));
        IndexSource::File(dir.join(index_path))
    }

    /// Interprets a command-line argument: http(s) URLs are fetched, anything
    /// else is a filesystem path.
    pub fn parse(arg: &str) -> Self {
        match Url::parse(arg) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => IndexSource::Http(url),
            _ => IndexSource::File(PathBuf::from(arg)),
        }
    }
}

impl std::fmt::Display for IndexSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexSource::Http(url) => write!(f, "{}", url),
            IndexSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub struct MenuExtractor {
    client: Client,
}

impl MenuExtractor {
    pub fn new() -> Result<Self> {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("navbanner/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }

    /// Loads and parses the index. Failures are logged and reported as
    /// `None`, meaning "no menu available".
    pub async fn extract(&self, source: &IndexSource) -> Option<MenuStructure> {
        match self.load(source).await {
            Ok(body) => {
                let menu = parse_menu(&body);
                info!(
                    "Extracted {} categories ({} links) from {}",
                    menu.len(),
                    menu.link_count(),
                    source
                );
                Some(menu)
            }
            Err(e) => {
                error!("Error loading index {}: {}", source, e);
                None
            }
        }
    }

    /// Loads the raw index document.
    pub async fn load(&self, source: &IndexSource) -> Result<String> {
        match source {
            IndexSource::Http(url) => {
                debug!("Fetching {}", url);
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(ExtractError::Status(status.as_u16()));
                }
                Ok(response.text().await?)
            }
            IndexSource::File(path) => {
                debug!("Reading {}", path.display());
                Ok(tokio::fs::read_to_string(path).await?)
            }
        }
    }
}

/// Builds the menu from an index document: every `h2` is a category, every
/// following `h3` (up to the next sibling `h2`) a section, and every link
/// after a section heading an entry of that section.
pub fn parse_menu(html: &str) -> MenuStructure {
    let document = Html::parse_document(html);
    let mut menu = MenuStructure::new();

    for heading in document.select(&CATEGORY_SELECTOR) {
        let category = element_text(&heading);
        let mut sections = SectionMap::new();
        let mut current_section: Option<String> = None;

        for sibling in heading.next_siblings().filter_map(ElementRef::wrap) {
            let tag = sibling.value().name();
            if tag == CATEGORY_HEADING {
                break;
            }
            if tag == SECTION_HEADING {
                let name = element_text(&sibling);
                sections.insert(name.clone(), Vec::new());
                current_section = Some(name);
                continue;
            }
            let Some(section) = current_section.as_ref() else {
                continue;
            };
            let links = collect_links(sibling);
            if let Some(entries) = sections.get_mut(section) {
                entries.extend(links);
            }
        }

        // A category only counts once it has links; an empty repeat of a
        // heading must not displace an earlier populated one.
        sections.retain(|_, links| !links.is_empty());
        if sections.is_empty() {
            debug!("Category '{}' has no links, skipping", category);
            continue;
        }
        menu.insert_category(category, sections);
    }

    menu
}

fn collect_links(element: ElementRef<'_>) -> Vec<LinkEntry> {
    let own = (element.value().name() == "a").then_some(element);
    own.into_iter()
        .chain(element.select(&LINK_SELECTOR))
        .filter_map(|anchor| {
            let name = element_text(&anchor);
            if name.is_empty() {
                return None;
            }
            let url = rewrite_href(anchor.value().attr("href")?)?;
            Some(LinkEntry { name, url })
        })
        .collect()
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Rewrites an index-relative href so it resolves from a page one directory
/// below the index. Returns `None` for hrefs that should not appear in the
/// menu: empty, fragment-only, protocol-relative or carrying a scheme.
///
/// Bare filenames get `./`, which keeps sibling pages of the current page
/// addressable; root-relative hrefs are left alone.
pub fn rewrite_href(href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') || href.starts_with("//") {
        return None;
    }
    if Url::parse(href).is_ok() {
        return None;
    }

    if let Some(rest) = href.strip_prefix("./") {
        Some(format!("../{}", rest))
    } else if href.starts_with("../") {
        Some(format!("../{}", href))
    } else if href.starts_with('/') {
        Some(href.to_string())
    } else {
        Some(format!("./{}", href))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    #[test]
    fn test_rewrite_href() {
        assert_eq!(rewrite_href("./pages/a.html"), Some("../pages/a.html".to_string()));
        assert_eq!(rewrite_href("a.html"), Some("./a.html".to_string()));
        assert_eq!(rewrite_href("../b.html"), Some("../../b.html".to_string()));
        assert_eq!(rewrite_href("/root.html"), Some("/root.html".to_string()));
        assert_eq!(rewrite_href("  x.html "), Some("./x.html".to_string()));
    }

    #[test]
    fn test_rewrite_href_rejects_absolute() {
        assert_eq!(rewrite_href("https://example.com/a.html"), None);
        assert_eq!(rewrite_href("http://example.com"), None);
        assert_eq!(rewrite_href("mailto:someone@example.com"), None);
        assert_eq!(rewrite_href("javascript:void(0)"), None);
        assert_eq!(rewrite_href("//cdn.example.com/a.html"), None);
        assert_eq!(rewrite_href("#top"), None);
        assert_eq!(rewrite_href("   "), None);
    }

    #[test]
    fn test_parse_single_link_sibling() {
        let html = r#"<h2>Quizzes</h2><h3>Topography</h3><a href="topography_quiz_multi.html">Topo</a>"#;
        let menu = parse_menu(html);

        assert_eq!(menu.len(), 1);
        let links = &menu.category("Quizzes").unwrap()["Topography"];
        assert_eq!(links, &vec![LinkEntry::new("Topo", "./topography_quiz_multi.html")]);
    }

    #[test]
    fn test_parse_nested_links_and_order() {
        let html = r#"<html><body>
            <h2> Lectures </h2>
            <h3>Basics</h3>
            <ul>
              <li><a href="./pages/intro.html">Intro</a></li>
              <li><a href="./pages/montage.html">Montage</a></li>
            </ul>
            <h3>Advanced</h3>
            <p>See <a href="./pages/source.html">Source imaging</a></p>
            <h2>Quizzes</h2>
            <h3>All</h3>
            <div><a href="./pages/quiz.html">Quiz</a></div>
        </body></html>"#;
        let menu = parse_menu(html);

        let names: Vec<&String> = menu.category_names().collect();
        assert_eq!(names, vec!["Lectures", "Quizzes"]);

        let lectures = menu.category("Lectures").unwrap();
        let sections: Vec<&String> = lectures.keys().collect();
        assert_eq!(sections, vec!["Basics", "Advanced"]);
        assert_eq!(lectures["Basics"].len(), 2);
        assert_eq!(lectures["Basics"][1].url, "../pages/montage.html");
        assert_eq!(lectures["Advanced"][0].name, "Source imaging");
    }

    #[test]
    fn test_parse_filters_invalid_links() {
        let html = r#"
            <h2>Tools</h2>
            <h3>External</h3>
            <ul>
              <li><a href="https://github.com/x">GitHub</a></li>
              <li><a href="./local.html">   </a></li>
              <li><a>No href</a></li>
            </ul>
            <h3>Local</h3>
            <ul><li><a href="./ok.html">Ok</a></li></ul>
        "#;
        let menu = parse_menu(html);

        let tools = menu.category("Tools").unwrap();
        assert!(!tools.contains_key("External"));
        assert_eq!(tools["Local"], vec![LinkEntry::new("Ok", "../ok.html")]);
    }

    #[test]
    fn test_parse_drops_empty_categories() {
        let html = r#"
            <h2>Intro</h2>
            <p><a href="./before-any-section.html">Orphan</a></p>
            <h2>Empty</h2>
            <h3>Nothing here</h3>
            <p>text only</p>
            <h2>Real</h2>
            <h3>S</h3>
            <a href="./r.html">R</a>
        "#;
        let menu = parse_menu(html);

        let names: Vec<&String> = menu.category_names().collect();
        assert_eq!(names, vec!["Real"]);
    }

    #[test]
    fn test_parse_duplicate_section_restarts_list() {
        let html = r#"
            <h2>C</h2>
            <h3>S</h3><a href="./one.html">One</a>
            <h3>S</h3><a href="./two.html">Two</a>
        "#;
        let menu = parse_menu(html);
        assert_eq!(menu.category("C").unwrap()["S"], vec![LinkEntry::new("Two", "../two.html")]);
    }

    #[test]
    fn test_parse_empty_duplicate_category_keeps_first() {
        let html = r#"
            <h2>A</h2>
            <h3>S</h3><a href="./x.html">X</a>
            <h2>A</h2>
            <p>nothing</p>
        "#;
        let menu = parse_menu(html);

        assert_eq!(menu.len(), 1);
        assert_eq!(menu.category("A").unwrap()["S"], vec![LinkEntry::new("X", "../x.html")]);
    }

    #[test]
    fn test_parse_populated_duplicate_category_replaces_in_place() {
        let html = r#"
            <h2>A</h2><h3>S</h3><a href="a1.html">A1</a>
            <h2>B</h2><h3>S</h3><a href="b.html">B</a>
            <h2>A</h2><h3>T</h3><a href="a2.html">A2</a>
        "#;
        let menu = parse_menu(html);

        let names: Vec<&String> = menu.category_names().collect();
        assert_eq!(names, vec!["A", "B"]);
        let a = menu.category("A").unwrap();
        assert!(!a.contains_key("S"));
        assert_eq!(a["T"], vec![LinkEntry::new("A2", "./a2.html")]);
    }

    #[test]
    fn test_parse_no_headings() {
        let menu = parse_menu("<html><body><a href='./a.html'>A</a></body></html>");
        assert!(menu.is_empty());
    }

    #[test]
    fn test_index_source_resolution() {
        let page = Url::parse("https://example.com/site/pages/quiz.html").unwrap();
        let source = IndexSource::for_url(&page, "../index.html").unwrap();
        assert_eq!(
            source,
            IndexSource::Http(Url::parse("https://example.com/site/index.html").unwrap())
        );

        let source = IndexSource::for_file(Path::new("site/pages/quiz.html"), "../index.html");
        assert_eq!(source, IndexSource::File(PathBuf::from("site/pages/../index.html")));
    }

    #[test]
    fn test_index_source_parse() {
        assert!(matches!(IndexSource::parse("https://example.com/index.html"), IndexSource::Http(_)));
        assert!(matches!(IndexSource::parse("site/index.html"), IndexSource::File(_)));
        assert!(matches!(IndexSource::parse("C:/site/index.html"), IndexSource::File(_)));
    }

    #[tokio::test]
    async fn test_extract_over_http() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/index.html"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string(r#"<h2>A</h2><h3>B</h3><a href="./pages/c.html">C</a>"#),
            )
            .mount(&mock_server)
            .await;

        let extractor = MenuExtractor::new().unwrap();
        let url = Url::parse(&format!("{}/index.html", mock_server.uri())).unwrap();
        let menu = extractor.extract(&IndexSource::Http(url)).await.unwrap();

        assert_eq!(menu.category("A").unwrap()["B"][0].url, "../pages/c.html");
    }

    #[tokio::test]
    async fn test_extract_not_found_is_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/index.html"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let extractor = MenuExtractor::new().unwrap();
        let url = Url::parse(&format!("{}/index.html", mock_server.uri())).unwrap();
        let source = IndexSource::Http(url);

        assert!(matches!(extractor.load(&source).await, Err(ExtractError::Status(404))));
        assert!(extractor.extract(&source).await.is_none());
    }

    #[tokio::test]
    async fn test_extract_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = MenuExtractor::new().unwrap();
        let source = IndexSource::File(dir.path().join("index.html"));

        assert!(matches!(extractor.load(&source).await, Err(ExtractError::Io(_))));
        assert!(extractor.extract(&source).await.is_none());
    }
}
