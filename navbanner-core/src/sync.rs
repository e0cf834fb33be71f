// Spacer height synchronization
//
// The banner is fixed-positioned, so a spacer of the same height keeps page
// content visible below it. Every trigger calls the same `resync()` in the
// client script; it only copies the banner's current height and may run any
// number of times in any order.

/// Events after which the spacer height is re-measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncTrigger {
    /// The banner itself changed size (dropdown, text reflow).
    BannerResize,
    WindowResize,
    WindowLoad,
    /// The logo finished loading; measured again after a short delay.
    LogoLoad,
}

/// Delay before the post-logo measurement.
pub const LOGO_SETTLE_MS: u32 = 100;

impl SyncTrigger {
    pub const ALL: [SyncTrigger; 4] = [
        SyncTrigger::BannerResize,
        SyncTrigger::WindowResize,
        SyncTrigger::WindowLoad,
        SyncTrigger::LogoLoad,
    ];

    /// Client-side code binding this trigger to `resync`. Expects `banner`
    /// and `resync` in scope.
    pub fn binding(self) -> String {
        match self {
            SyncTrigger::BannerResize => concat!(
                "if (window.ResizeObserver) {\n",
                "      var observer = new ResizeObserver(resync);\n",
                "      observer.observe(banner);\n",
                "      var content = banner.querySelector('.nav-banner-content');\n",
                "      if (content) observer.observe(content);\n",
                "    }"
            )
            .to_string(),
            SyncTrigger::WindowResize => "window.addEventListener('resize', resync);".to_string(),
            SyncTrigger::WindowLoad => "window.addEventListener('load', resync);".to_string(),
            SyncTrigger::LogoLoad => format!(
                concat!(
                    "var logo = banner.querySelector('.nav-banner-logo');\n",
                    "    if (logo) {{\n",
                    "      if (logo.complete) {{\n",
                    "        setTimeout(resync, {delay});\n",
                    "      }} else {{\n",
                    "        logo.addEventListener('load', function () {{ setTimeout(resync, {delay}); }});\n",
                    "      }}\n",
                    "    }}"
                ),
                delay = LOGO_SETTLE_MS
            ),
        }
    }
}

/// Bindings for `triggers`, in order, one statement block per trigger.
pub fn bindings(triggers: &[SyncTrigger]) -> String {
    triggers
        .iter()
        .map(|trigger| format!("    {}\n", trigger.binding()))
        .collect()
}
