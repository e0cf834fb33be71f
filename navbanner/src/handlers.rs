use anyhow::{Context, Result, bail};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use navbanner_core::page::SkipReason;
use navbanner_core::{
    BannerConfig, BannerPipeline, IndexSource, MenuExtractor, MenuStructure, PageLocation,
    PageMatcher, PageOutcome, Renderer,
};
use navbanner_extractor::parse_menu;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

// Helper functions for the inject handler

/// Parse a single line of a pages file. Blank lines and `#` comments yield
/// nothing; `~` is expanded.
pub fn parse_page_line(line: &str) -> Option<PathBuf> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(PathBuf::from(shellexpand::tilde(line).as_ref()))
}

/// Load page paths from a newline-delimited file
pub fn load_pages_from_file(path: &Path) -> Result<Vec<PathBuf>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read pages file {}", path.display()))?;

    let pages: Vec<PathBuf> = content.lines().filter_map(parse_page_line).collect();
    if pages.is_empty() {
        bail!("No page paths found in {}", path.display());
    }
    Ok(pages)
}

/// A directory expands to every `.html` file below it, sorted; a file is
/// returned as-is.
pub fn expand_page_path(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut pages = Vec::new();
    let mut pending = vec![path.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries =
            fs::read_dir(&dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;
        for entry in entries {
            let entry_path = entry?.path();
            if entry_path.is_dir() {
                pending.push(entry_path);
            } else if is_html(&entry_path) {
                pages.push(entry_path);
            }
        }
    }
    pages.sort();
    Ok(pages)
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

/// Pages from the command line and an optional pages file, directories
/// expanded, duplicates dropped, order kept.
pub fn collect_pages(args: &[PathBuf], pages_file: Option<&Path>) -> Result<Vec<PathBuf>> {
    let mut sources: Vec<PathBuf> = args
        .iter()
        .map(|arg| PathBuf::from(shellexpand::tilde(&arg.to_string_lossy()).as_ref()))
        .collect();
    if let Some(file) = pages_file {
        sources.extend(load_pages_from_file(file)?);
    }
    if sources.is_empty() {
        bail!("Either <PAGES> or --pages-file must be provided");
    }

    let mut seen = HashSet::new();
    let mut pages = Vec::new();
    for source in sources {
        for page in expand_page_path(&source)? {
            if seen.insert(page.clone()) {
                pages.push(page);
            }
        }
    }
    Ok(pages)
}

/// Location the banner pipeline sees for a page on disk: the file itself, or
/// its public URL when a base URL is given.
pub fn page_location(path: &Path, root: &Path, base_url: Option<&Url>) -> Result<PageLocation> {
    let Some(base) = base_url else {
        return Ok(PageLocation::File(path.to_path_buf()));
    };

    let relative = path.strip_prefix(root).with_context(|| {
        format!(
            "{} is not under the site root {}",
            path.display(),
            root.display()
        )
    })?;
    Ok(PageLocation::under_base(base, &relative.to_string_lossy())?)
}

pub struct InjectOptions {
    pub pages: Vec<PathBuf>,
    pub root: PathBuf,
    pub base_url: Option<Url>,
    pub dry_run: bool,
    pub to_stdout: bool,
    pub show_progress: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InjectSummary {
    pub injected: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub without_menu: usize,
}

/// Injects the banner into every page, writing results back unless this is
/// a dry run or output goes to stdout.
pub async fn run_inject(options: InjectOptions) -> Result<InjectSummary> {
    let InjectOptions {
        pages,
        root,
        base_url,
        dry_run,
        to_stdout,
        show_progress,
    } = options;

    let renderer = Renderer::new(BannerConfig::default(), PageMatcher::default());
    let mut pipeline = BannerPipeline::new(MenuExtractor::new()?, renderer);
    let mut summary = InjectSummary::default();

    let progress_bar = show_progress.then(|| {
        let pb = ProgressBar::new(pages.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    for page in &pages {
        if let Some(pb) = &progress_bar {
            pb.set_message(page.display().to_string());
        }

        let html = tokio::fs::read_to_string(page)
            .await
            .with_context(|| format!("Failed to read page {}", page.display()))?;
        let location = page_location(page, &root, base_url.as_ref())?;

        match pipeline.process(&location, &html).await? {
            PageOutcome::Skipped(reason) => {
                let why = match reason {
                    SkipReason::IndexPage => "index page",
                    SkipReason::NoFilename => "no filename",
                };
                info!("Skipped {} ({})", page.display(), why);
                summary.skipped += 1;
            }
            PageOutcome::Injected {
                html: injected,
                menu_available,
                ..
            } => {
                if !menu_available {
                    summary.without_menu += 1;
                }
                if to_stdout {
                    print!("{}", injected);
                }
                if injected == html {
                    summary.unchanged += 1;
                } else {
                    summary.injected += 1;
                    if !dry_run && !to_stdout {
                        tokio::fs::write(page, &injected)
                            .await
                            .with_context(|| format!("Failed to write page {}", page.display()))?;
                    }
                }
            }
        }

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }
    if summary.without_menu > 0 {
        warn!("{} page(s) rendered without a menu", summary.without_menu);
    }
    Ok(summary)
}

pub fn print_inject_summary(summary: &InjectSummary, dry_run: bool) {
    let verb = if dry_run { "Would update" } else { "Updated" };
    println!("{} {} {} page(s)", "✓".green().bold(), verb, summary.injected);
    if summary.unchanged > 0 {
        println!("{} {} already up to date", "•".blue(), summary.unchanged);
    }
    if summary.skipped > 0 {
        println!("{} {} skipped (index page)", "•".blue(), summary.skipped);
    }
    if summary.without_menu > 0 {
        println!(
            "{} {} rendered without a menu (index could not be loaded)",
            "⚠".yellow().bold(),
            summary.without_menu
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFormat {
    Json,
    Text,
}

impl MenuFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(MenuFormat::Json),
            "text" | "txt" => Some(MenuFormat::Text),
            _ => None,
        }
    }
}

/// Loads an index and renders its menu. Unlike page injection, a load
/// failure is an error here.
pub async fn run_menu(index: &str, format: MenuFormat) -> Result<String> {
    let source = IndexSource::parse(&shellexpand::tilde(index));
    let extractor = MenuExtractor::new()?;
    let body = extractor
        .load(&source)
        .await
        .with_context(|| format!("Failed to load index {}", source))?;
    let menu = parse_menu(&body);

    match format {
        MenuFormat::Json => Ok(serde_json::to_string_pretty(&menu)?),
        MenuFormat::Text => Ok(format_menu_text(&menu)),
    }
}

/// Indented outline of a menu: categories, sections, then links.
pub fn format_menu_text(menu: &MenuStructure) -> String {
    if menu.is_empty() {
        return "(no categories)\n".to_string();
    }

    let mut out = String::new();
    for (index, (category, sections)) in menu.categories().enumerate() {
        out.push_str(&format!("[{}] {}\n", index, category));
        for (section, links) in sections {
            out.push_str(&format!("  {}\n", section));
            for link in links {
                out.push_str(&format!("    {} -> {}\n", link.name, link.url));
            }
        }
    }
    out
}
