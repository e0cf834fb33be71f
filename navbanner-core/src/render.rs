// Banner markup generation

use crate::config::BannerConfig;
use crate::matcher::PageMatcher;
use crate::script;
use crate::style;
use crate::sync::SyncTrigger;
use crate::tabs::TabBar;
use navbanner_extractor::{LinkEntry, MenuStructure, SectionMap};
use std::fmt::Write;

pub const BANNER_ID: &str = "nav-banner";
pub const CURRENT_PAGE_CLASS: &str = "current-page";

const MENU_LABEL: &str = "Browse Pages";
const NO_MENU_LABEL: &str = "No Pages";

/// Everything one page needs: the style block, the client script and the
/// banner followed by its spacer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBanner {
    pub style: String,
    pub script: String,
    pub markup: String,
}

pub struct Renderer {
    config: BannerConfig,
    matcher: PageMatcher,
    triggers: Vec<SyncTrigger>,
}

impl Renderer {
    pub fn new(config: BannerConfig, matcher: PageMatcher) -> Self {
        Self {
            config,
            matcher,
            triggers: SyncTrigger::ALL.to_vec(),
        }
    }

    pub fn with_sync_triggers(mut self, triggers: Vec<SyncTrigger>) -> Self {
        self.triggers = triggers;
        self
    }

    pub fn config(&self) -> &BannerConfig {
        &self.config
    }

    pub fn matcher(&self) -> &PageMatcher {
        &self.matcher
    }

    pub fn render(&self, menu: Option<&MenuStructure>, active: usize, current: &str) -> RenderedBanner {
        RenderedBanner {
            style: style::stylesheet(&self.config),
            script: script::client_script(&self.triggers),
            markup: self.render_markup(menu, active, current),
        }
    }

    /// Banner followed by the spacer that reserves its height.
    pub fn render_markup(&self, menu: Option<&MenuStructure>, active: usize, current: &str) -> String {
        let has_menu = menu.is_some_and(|m| !m.is_empty());
        let label = if has_menu { MENU_LABEL } else { NO_MENU_LABEL };
        let config = &self.config;

        let mut out = String::new();
        let _ = write!(
            out,
            concat!(
                "<div class=\"nav-banner\" id=\"{id}\">\n",
                "<div class=\"nav-banner-content\">\n",
                "<div class=\"nav-banner-left\">\n",
                "<a href=\"{index}\" class=\"nav-banner-home-btn\"><span>←</span><span>Index</span></a>\n",
                "<button type=\"button\" class=\"nav-banner-menu-btn\" id=\"nav-menu-toggle\"><span>☰</span><span>{label}</span></button>\n",
                "<p class=\"nav-banner-title\">{title}</p>\n",
                "</div>\n",
                "<div class=\"nav-banner-right\">\n",
                "<a href=\"{repo}\" class=\"nav-banner-repo-link\">Source</a>\n",
                "<img src=\"{logo}\" alt=\"{alt}\" class=\"nav-banner-logo\">\n",
                "<p class=\"nav-banner-copyright\">{copyright}</p>\n",
                "</div>\n",
                "</div>\n",
                "<div class=\"nav-banner-dropdown\" id=\"nav-dropdown\">\n",
            ),
            id = BANNER_ID,
            index = escape(&config.index_path),
            label = label,
            title = escape(&config.title),
            repo = escape(&config.repository_url),
            logo = escape(&config.logo_url),
            alt = escape(&config.logo_alt),
            copyright = escape(&config.copyright),
        );
        out.push_str(&self.render_dropdown(menu, active, current));
        out.push_str("</div>\n</div>\n<div class=\"nav-banner-spacer\"></div>\n");
        out
    }

    /// Tab bar and panels, or the placeholder when there is nothing to show.
    pub fn render_dropdown(&self, menu: Option<&MenuStructure>, active: usize, current: &str) -> String {
        let menu = match menu {
            Some(menu) if !menu.is_empty() => menu,
            _ => {
                return format!(
                    "<div class=\"nav-banner-loading\">No pages found in {}</div>\n",
                    escape(self.config.index_filename())
                );
            }
        };

        let tabs = TabBar::new(menu.len(), active);
        let mut out = String::from("<div class=\"nav-banner-tabs\">\n");
        for (index, name) in menu.category_names().enumerate() {
            let _ = writeln!(
                out,
                "<button type=\"button\" class=\"nav-banner-tab{}\" data-tab=\"{}\">{}</button>",
                active_class(tabs.is_selected(index)),
                index,
                escape(name)
            );
        }
        out.push_str("</div>\n");

        for (index, (_, sections)) in menu.categories().enumerate() {
            let _ = writeln!(
                out,
                "<div class=\"nav-banner-tab-content{}\" data-tab-content=\"{}\">",
                active_class(tabs.is_selected(index)),
                index
            );
            out.push_str("<div class=\"nav-banner-dropdown-content\">\n");
            self.render_sections(&mut out, sections, current);
            out.push_str("</div>\n</div>\n");
        }
        out
    }

    fn render_sections(&self, out: &mut String, sections: &SectionMap, current: &str) {
        for (name, links) in sections {
            let _ = writeln!(out, "<div class=\"nav-banner-section\">\n<h3>{}</h3>\n<ul>", escape(name));
            for link in links {
                self.render_link(out, link, current);
            }
            out.push_str("</ul>\n</div>\n");
        }
    }

    fn render_link(&self, out: &mut String, link: &LinkEntry, current: &str) {
        if self.matcher.is_current(&link.url, current) {
            let _ = writeln!(
                out,
                "<li><a href=\"{}\" class=\"{}\">{}</a></li>",
                escape(&link.url),
                CURRENT_PAGE_CLASS,
                escape(&link.name)
            );
        } else {
            let _ = writeln!(
                out,
                "<li><a href=\"{}\">{}</a></li>",
                escape(&link.url),
                escape(&link.name)
            );
        }
    }
}

fn active_class(selected: bool) -> &'static str {
    if selected { " active" } else { "" }
}

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
