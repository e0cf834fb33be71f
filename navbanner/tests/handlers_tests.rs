use navbanner::handlers::*;
use navbanner_core::{LinkEntry, MenuStructure, PageLocation, SectionMap};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use url::Url;

const INDEX: &str = r#"<html><body>
<h2>Quizzes</h2>
<h3>Topography</h3>
<a href="topography_quiz_multi.html">Topo</a>
</body></html>"#;

const PAGE: &str = "<html><head></head><body><p>quiz</p></body></html>";

fn options(pages: Vec<PathBuf>, root: &Path) -> InjectOptions {
    InjectOptions {
        pages,
        root: root.to_path_buf(),
        base_url: None,
        dry_run: false,
        to_stdout: false,
        show_progress: false,
    }
}

#[test]
fn test_parse_page_line() {
    assert_eq!(parse_page_line("  pages/a.html "), Some(PathBuf::from("pages/a.html")));
    assert_eq!(parse_page_line(""), None);
    assert_eq!(parse_page_line("   "), None);
    assert_eq!(parse_page_line("# comment"), None);
}

#[test]
fn test_load_pages_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, "pages/a.html")?;
    writeln!(temp_file)?; // Empty line
    writeln!(temp_file, "# skipped")?;
    writeln!(temp_file, "pages/b.html")?;

    let pages = load_pages_from_file(temp_file.path())?;

    assert_eq!(pages, vec![PathBuf::from("pages/a.html"), PathBuf::from("pages/b.html")]);
    Ok(())
}

#[test]
fn test_load_pages_from_file_empty() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file).unwrap();
    writeln!(temp_file, "   ").unwrap();

    let result = load_pages_from_file(temp_file.path());
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("No page paths found"));
}

#[test]
fn test_load_pages_from_missing_file() {
    let result = load_pages_from_file(Path::new("/nonexistent/pages.txt"));
    assert!(result.is_err());
}

#[test]
fn test_expand_page_path_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("pages/nested")).unwrap();
    fs::write(dir.path().join("pages/b.html"), PAGE).unwrap();
    fs::write(dir.path().join("pages/a.HTM"), PAGE).unwrap();
    fs::write(dir.path().join("pages/nested/c.html"), PAGE).unwrap();
    fs::write(dir.path().join("pages/notes.txt"), "x").unwrap();

    let pages = expand_page_path(&dir.path().join("pages")).unwrap();

    assert_eq!(
        pages,
        vec![
            dir.path().join("pages/a.HTM"),
            dir.path().join("pages/b.html"),
            dir.path().join("pages/nested/c.html"),
        ]
    );
}

#[test]
fn test_collect_pages_dedupes() {
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("a.html");
    fs::write(&page, PAGE).unwrap();

    let pages = collect_pages(&[page.clone(), dir.path().to_path_buf()], None).unwrap();
    assert_eq!(pages, vec![page]);
}

#[test]
fn test_collect_pages_requires_input() {
    assert!(collect_pages(&[], None).is_err());
}

#[test]
fn test_page_location() {
    let root = Path::new("/srv/site");
    let page = Path::new("/srv/site/pages/quiz.html");

    assert_eq!(
        page_location(page, root, None).unwrap(),
        PageLocation::File(page.to_path_buf())
    );

    let base = Url::parse("https://example.com/course/").unwrap();
    assert_eq!(
        page_location(page, root, Some(&base)).unwrap(),
        PageLocation::Url(Url::parse("https://example.com/course/pages/quiz.html").unwrap())
    );

    assert!(page_location(Path::new("/elsewhere/quiz.html"), root, Some(&base)).is_err());
}

#[test]
fn test_menu_format_from_str() {
    assert_eq!(MenuFormat::from_str("JSON"), Some(MenuFormat::Json));
    assert_eq!(MenuFormat::from_str("txt"), Some(MenuFormat::Text));
    assert_eq!(MenuFormat::from_str("yaml"), None);
}

#[test]
fn test_format_menu_text() {
    let mut menu = MenuStructure::new();
    let mut sections = SectionMap::new();
    sections.insert(
        "Topography".to_string(),
        vec![LinkEntry::new("Topo", "./topography_quiz_multi.html")],
    );
    menu.insert_category("Quizzes", sections);

    assert_eq!(
        format_menu_text(&menu),
        "[0] Quizzes\n  Topography\n    Topo -> ./topography_quiz_multi.html\n"
    );
    assert_eq!(format_menu_text(&MenuStructure::new()), "(no categories)\n");
}

#[tokio::test]
async fn test_run_inject_writes_pages() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), INDEX).unwrap();
    fs::create_dir(dir.path().join("pages")).unwrap();
    let page = dir.path().join("pages/graph_quiz_multi.html");
    fs::write(&page, PAGE).unwrap();

    let summary = run_inject(options(vec![page.clone()], dir.path())).await.unwrap();
    assert_eq!(summary.injected, 1);
    assert_eq!(summary.without_menu, 0);

    let written = fs::read_to_string(&page).unwrap();
    assert!(written.contains(r#"<a href="./topography_quiz_multi.html" class="current-page">Topo</a>"#));

    // A second run finds nothing to change.
    let summary = run_inject(options(vec![page.clone()], dir.path())).await.unwrap();
    assert_eq!(summary.injected, 0);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(fs::read_to_string(&page).unwrap(), written);
}

#[tokio::test]
async fn test_run_inject_dry_run_and_index_skip() {
    let dir = tempfile::tempdir().unwrap();
    let site = dir.path().join("site");
    fs::create_dir(&site).unwrap();
    let index = site.join("index.html");
    fs::write(&index, INDEX).unwrap();
    let page = site.join("page.html");
    fs::write(&page, PAGE).unwrap();

    let mut opts = options(vec![index.clone(), page.clone()], &site);
    opts.dry_run = true;
    let summary = run_inject(opts).await.unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.injected, 1);
    // site/page.html looks for ../index.html, which does not exist.
    assert_eq!(summary.without_menu, 1);
    assert_eq!(fs::read_to_string(&page).unwrap(), PAGE);
    assert_eq!(fs::read_to_string(&index).unwrap(), INDEX);
}

#[tokio::test]
async fn test_run_menu_json() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", INDEX).unwrap();

    let json = run_menu(&temp_file.path().to_string_lossy(), MenuFormat::Json)
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(
        value["Quizzes"]["Topography"][0]["url"],
        "./topography_quiz_multi.html"
    );
}

#[tokio::test]
async fn test_run_menu_missing_index_fails() {
    let result = run_menu("/nonexistent/index.html", MenuFormat::Text).await;
    assert!(result.is_err());
}
