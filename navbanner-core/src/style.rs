use crate::config::BannerConfig;

/// Marker id of the injected style block.
pub const STYLE_ID: &str = "nav-banner-styles";

const STYLE: &str = r#"
body {
  margin: 0 !important;
  padding: 0 !important;
}
.nav-banner-spacer { display: block; width: 100%; height: auto; min-height: 100px; }
.nav-banner {
  position: fixed; top: 0; left: 0; right: 0;
  background: {brand}; color: #f1f1f1; z-index: 99999;
  padding: 15px 20px 20px 20px; box-shadow: 0 2px 8px rgba(0,0,0,0.3);
  font-family: sans-serif;
}
.nav-banner-content {
  max-width: 1400px; margin: 0 auto; display: flex; align-items: center;
  justify-content: space-between; flex-wrap: wrap; gap: 10px;
}
.nav-banner-left { display: flex; align-items: center; gap: 15px; flex-wrap: wrap; }
.nav-banner-home-btn, .nav-banner-menu-btn {
  background: rgba(255,255,255,0.2); color: white;
  border: 2px solid rgba(255,255,255,0.4);
  padding: 8px 16px; border-radius: 6px; text-decoration: none;
  font-weight: bold; font-size: 14px; transition: all 0.3s ease;
  display: inline-flex; align-items: center; gap: 6px; cursor: pointer;
}
.nav-banner-home-btn:hover, .nav-banner-menu-btn:hover {
  background: rgba(255,255,255,0.3); border-color: rgba(255,255,255,0.6);
  transform: translateY(-2px);
}
.nav-banner-menu-btn.active { background: rgba(255,255,255,0.4); }
.nav-banner-menu-btn:disabled { opacity: 0.5; cursor: not-allowed; }
.nav-banner-title { font-size: 16px; margin: 0; color: rgba(255,255,255,0.9); }
.nav-banner-right { display: flex; align-items: center; gap: 15px; }
.nav-banner-repo-link { color: rgba(255,255,255,0.9); font-size: 14px; }
.nav-banner-logo { height: 40px; filter: brightness(0) invert(1); opacity: 0.9; }
.nav-banner-copyright { font-size: 14px; color: rgba(255,255,255,0.9); margin: 0; }
.nav-banner-dropdown {
  position: absolute; top: 100%; left: 0; right: 0; background: #fff;
  box-shadow: 0 4px 12px rgba(0,0,0,0.2);
  max-height: 0; overflow: hidden; transition: max-height 0.4s ease;
}
.nav-banner-dropdown.open { max-height: 600px; overflow-y: auto; }
.nav-banner-tabs {
  display: flex; gap: 0; background: #f0f0f0; border-bottom: 2px solid {brand};
  padding: 0 20px; overflow-x: auto; scrollbar-width: none;
}
.nav-banner-tabs::-webkit-scrollbar { display: none; }
.nav-banner-tab {
  background: transparent; border: none; color: #555; padding: 12px 24px;
  font-size: 15px; font-weight: 600; cursor: pointer;
  border-bottom: 3px solid transparent; transition: all 0.3s ease;
  white-space: nowrap; position: relative; top: 2px;
}
.nav-banner-tab:hover { background: {tint_hover}; color: {brand}; }
.nav-banner-tab.active { color: {brand}; border-bottom-color: {brand}; background: #fff; }
.nav-banner-tab-content { display: none; }
.nav-banner-tab-content.active { display: block; }
.nav-banner-dropdown-content {
  max-width: 1400px; margin: 0 auto; padding: 20px;
  display: grid; grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); gap: 20px;
}
.nav-banner-section {
  background: #f9f9f9; border-radius: 8px; padding: 15px;
  border-left: 4px solid {brand};
}
.nav-banner-section h3 { margin: 0 0 12px 0; color: {brand}; font-size: 16px; }
.nav-banner-section ul { list-style: none; margin: 0; padding: 0; }
.nav-banner-section a {
  color: #333; text-decoration: none; font-size: 14px; display: block;
  padding: 6px 10px; border-radius: 4px; transition: all 0.2s ease;
}
.nav-banner-section a:hover { background: {brand}; color: white; transform: translateX(4px); }
.nav-banner-section a.current-page { font-weight: bold; color: {brand}; background: {tint_current}; }
.nav-banner-loading { text-align: center; padding: 20px; color: #666; font-style: italic; }
"#;

/// The banner stylesheet with the configured brand color filled in.
pub fn stylesheet(config: &BannerConfig) -> String {
    let brand = config.brand_color.as_str();
    STYLE
        .replace("{tint_hover}", &tint(brand, 0.1))
        .replace("{tint_current}", &tint(brand, 0.08))
        .replace("{brand}", brand)
}

/// Translucent variant of a `#rrggbb` color. Other notations are used as-is.
fn tint(color: &str, alpha: f32) -> String {
    let channel = |range: std::ops::Range<usize>| {
        color
            .get(range)
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
    };

    match (color.len(), color.starts_with('#')) {
        (7, true) => match (channel(1..3), channel(3..5), channel(5..7)) {
            (Some(r), Some(g), Some(b)) => format!("rgba({}, {}, {}, {})", r, g, b, alpha),
            _ => color.to_string(),
        },
        _ => color.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tint() {
        assert_eq!(tint("#96004B", 0.1), "rgba(150, 0, 75, 0.1)");
        assert_eq!(tint("#96004B", 0.08), "rgba(150, 0, 75, 0.08)");
        assert_eq!(tint("teal", 0.1), "teal");
        assert_eq!(tint("#zz004B", 0.1), "#zz004B");
    }

    #[test]
    fn test_stylesheet_uses_brand_color() {
        let config = BannerConfig {
            brand_color: "#112233".to_string(),
            ..BannerConfig::default()
        };
        let css = stylesheet(&config);
        assert!(css.contains("background: #112233;"));
        assert!(css.contains("rgba(17, 34, 51, 0.1)"));
        assert!(!css.contains("{brand}"));
        assert!(!css.contains("{tint_"));
    }
}
