use crate::sync::{self, SyncTrigger};

/// Marker id of the injected client script.
pub const SCRIPT_ID: &str = "nav-banner-script";

const SCRIPT_HEAD: &str = r#"
(function () {
  'use strict';

  function init() {
    var banner = document.getElementById('nav-banner');
    if (!banner) return;

    function resync() {
      var spacer = document.querySelector('.nav-banner-spacer');
      if (spacer) spacer.style.height = banner.offsetHeight + 'px';
    }

    var tabs = banner.querySelectorAll('.nav-banner-tab');
    var panels = banner.querySelectorAll('.nav-banner-tab-content');
    tabs.forEach(function (tab) {
      tab.addEventListener('click', function () {
        var index = tab.getAttribute('data-tab');
        tabs.forEach(function (t) { t.classList.remove('active'); });
        panels.forEach(function (p) { p.classList.remove('active'); });
        tab.classList.add('active');
        var panel = banner.querySelector('[data-tab-content="' + index + '"]');
        if (panel) panel.classList.add('active');
      });
    });

    var toggle = document.getElementById('nav-menu-toggle');
    var dropdown = document.getElementById('nav-dropdown');
    if (toggle && dropdown) {
      toggle.addEventListener('click', function () {
        if (toggle.disabled) return;
        dropdown.classList.toggle('open');
        toggle.classList.toggle('active');
      });
      document.addEventListener('click', function (event) {
        if (!event.target.closest('.nav-banner')) {
          dropdown.classList.remove('open');
          toggle.classList.remove('active');
        }
      });
    }

"#;

const SCRIPT_TAIL: &str = r#"
    resync();
  }

  if (document.readyState === 'loading') {
    document.addEventListener('DOMContentLoaded', init);
  } else {
    init();
  }
})();
"#;

/// Tab switching, dropdown toggling and spacer height sync for the
/// rendered banner.
pub fn client_script(triggers: &[SyncTrigger]) -> String {
    let mut script = String::from(SCRIPT_HEAD);
    script.push_str(&sync::bindings(triggers));
    script.push_str(SCRIPT_TAIL);
    script
}
