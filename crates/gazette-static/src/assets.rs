//! Asset pipeline for CSS and the client interaction script.

use gazette_ui::{nav, progress, MOBILE_BREAKPOINT_PX, ROTATION_INTERVAL, THEME_STORAGE_KEY};

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the client script.
    ///
    /// Storage key, breakpoint, and timings come from `gazette-ui` so the
    /// browser behaves like the modeled state machines.
    pub fn generate_js() -> String {
        client_script(&ScriptSettings::default())
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

/// Values interpolated into the client script.
#[derive(Debug, Clone)]
struct ScriptSettings {
    storage_key: &'static str,
    breakpoint_px: u32,
    rotation_ms: u128,
    tick_ms: u128,
    threshold: f64,
    active_targets: String,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            storage_key: THEME_STORAGE_KEY,
            breakpoint_px: MOBILE_BREAKPOINT_PX,
            rotation_ms: ROTATION_INTERVAL.as_millis(),
            tick_ms: progress::TICK_INTERVAL.as_millis(),
            threshold: progress::VISIBILITY_THRESHOLD,
            active_targets: nav::MOBILE_ACTIVE_TARGETS.join(", "),
        }
    }
}

fn client_script(s: &ScriptSettings) -> String {
    format!(
        r#"// gazette site runtime
"use strict";

(function () {{
  const THEME_KEY = "{storage_key}";
  const root = document.documentElement;

  // Responsive width
  let isMobile = false;
  let isMobileNavVisible = false;
  const mobileQuery = matchMedia("(max-width: {breakpoint}px)");
  isMobile = mobileQuery.matches;
  mobileQuery.addEventListener("change", (e) => {{
    isMobile = e.matches;
    if (isMobileNavVisible && !isMobile) {{
      toggleMobileSidebar();
    }}
  }});

  // Color scheme
  function currentTheme() {{
    const stored = window.localStorage.getItem(THEME_KEY);
    if (stored != null) {{
      return stored;
    }}
    return matchMedia("(prefers-color-scheme: dark)").matches ? "dark" : "light";
  }}

  const schemeSwitch = document.querySelector(".color-scheme-switch");
  function applyTheme(scheme) {{
    root.setAttribute("data-theme", scheme);
    if (schemeSwitch != null) {{
      schemeSwitch.setAttribute("aria-checked", String(scheme === "dark"));
    }}
  }}
  applyTheme(currentTheme());

  if (schemeSwitch != null) {{
    schemeSwitch.addEventListener("click", () => {{
      const next = currentTheme() === "dark" ? "light" : "dark";
      window.localStorage.setItem(THEME_KEY, next);
      root.classList.add("{transition_class}");
      applyTheme(next);
    }});
  }}

  for (const tweet of document.querySelectorAll(".twitter-tweet")) {{
    tweet.setAttribute("data-theme", currentTheme());
  }}

  // Mobile navigation
  const handle = document.querySelector(".mobile-handle");
  const activeTargets = document.querySelectorAll("{active_targets}");
  function toggleMobileSidebar() {{
    isMobileNavVisible = !isMobileNavVisible;
    if (handle != null) {{
      handle.classList.toggle("{handle_class}");
    }}
    document.body.classList.toggle("{no_scroll_class}");
    for (const elem of activeTargets) {{
      elem.classList.toggle("{active_class}", isMobileNavVisible);
    }}
  }}
  if (handle != null) {{
    handle.addEventListener("click", (event) => {{
      event.preventDefault();
      toggleMobileSidebar();
    }});
  }}

  // Hero rotation
  const heroItems = document.querySelectorAll(".homepage .h1 li");
  if (heroItems.length > 0) {{
    let active = 0;
    const schedule = () => setTimeout(rotate, {rotation_ms});
    function rotate() {{
      const leaving = heroItems[active];
      leaving.classList.remove("fadein");
      leaving.classList.add("fadeout");
      leaving.addEventListener(
        "animationend",
        () => {{
          leaving.setAttribute("hidden", "hidden");
          active = (active + 1) % heroItems.length;
          const entering = heroItems[active];
          entering.classList.add("fadein");
          entering.removeAttribute("hidden");
          schedule();
        }},
        {{ once: true }},
      );
    }}
    schedule();
  }}

  // Component switcher
  let activeButton = document.querySelector(".component-list li.active");
  const setHidden = (cls, hidden) => {{
    for (const elem of document.getElementsByClassName(cls)) {{
      if (hidden) {{
        elem.setAttribute("hidden", "hidden");
      }} else {{
        elem.removeAttribute("hidden");
      }}
    }}
  }};
  for (const button of document.querySelectorAll(".component-list li:not(.soon)")) {{
    button.addEventListener("click", () => {{
      if (activeButton != null) {{
        activeButton.classList.remove("active");
        setHidden(activeButton.getAttribute("data-class"), true);
      }}
      button.classList.add("active");
      setHidden(button.getAttribute("data-class"), false);
      activeButton = button;
    }});
  }}

  // Progress bar stopwatch
  const bar = document.querySelector(".homepage .progress-bar-bad");
  const totalTime = document.querySelector(".homepage .time-bad");
  if (bar != null && totalTime != null) {{
    bar.classList.add("transition");
    const start = () => {{
      const startedAt = Date.now();
      const label = document.createElement("span");
      label.classList.add("time-bad", "time-bad-timer");
      totalTime.parentElement.insertBefore(label, totalTime);
      totalTime.classList.add("timer-running");
      bar.style.width = "100%";
      const interval = setInterval(() => {{
        label.textContent = `${{((Date.now() - startedAt) / 1000).toFixed(1)}}s`;
      }}, {tick_ms});
      let running = true;
      const end = () => {{
        if (!running) return;
        running = false;
        clearInterval(interval);
        totalTime.classList.remove("timer-running");
        label.remove();
      }};
      bar.addEventListener("transitioncancel", end, {{ once: true }});
      bar.addEventListener("transitionend", end, {{ once: true }});
    }};
    const observer = new IntersectionObserver(
      ([entry]) => {{
        if (entry.isIntersecting && entry.intersectionRatio >= {threshold}) {{
          start();
          observer.disconnect();
        }}
      }},
      {{ root: null, threshold: {threshold} }},
    );
    observer.observe(bar);
  }}
}})();
"#,
        storage_key = s.storage_key,
        breakpoint = s.breakpoint_px,
        transition_class = gazette_ui::theme::TRANSITION_CLASS,
        active_targets = s.active_targets,
        handle_class = nav::HANDLE_ACTIVE_CLASS,
        no_scroll_class = nav::NO_SCROLL_CLASS,
        active_class = nav::MOBILE_ACTIVE_CLASS,
        rotation_ms = s.rotation_ms,
        tick_ms = s.tick_ms,
        threshold = s.threshold,
    )
}

const DEFAULT_CSS: &str = r#"/* gazette site theme */

:root {
  --background: #ffffff;
  --foreground: #1f2328;
  --muted: #f6f8fa;
  --muted-foreground: #57606a;
  --border: #d0d7de;
  --primary: #5d3fd3;
  --primary-foreground: #ffffff;
  --content-max-width: 760px;
  --header-height: 64px;
}

[data-theme="dark"] {
  --background: #0d1117;
  --foreground: #e6edf3;
  --muted: #161b22;
  --muted-foreground: #8b949e;
  --border: #30363d;
  --primary: #a58cff;
  --primary-foreground: #0d1117;
}

.transition,
.transition * {
  transition: background-color 0.2s, color 0.2s, border-color 0.2s;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

body.no-scroll {
  overflow: hidden;
}

/* Header */
.page-header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  height: var(--header-height);
  padding: 0 1.5rem;
  border-bottom: 1px solid var(--border);
}

.page-header a {
  color: var(--foreground);
  text-decoration: none;
  font-weight: 600;
}

.page-header nav a {
  margin-left: 1.25rem;
  font-weight: 400;
  color: var(--muted-foreground);
}

.color-scheme-switch {
  background: none;
  border: 1px solid var(--border);
  border-radius: 999px;
  padding: 0.25rem 0.75rem;
  color: var(--foreground);
  cursor: pointer;
}

.mobile-handle {
  display: none;
  background: none;
  border: none;
  color: var(--foreground);
  cursor: pointer;
}

/* Content */
.content {
  max-width: var(--content-max-width);
  margin: 2rem auto;
  padding: 0 1.5rem;
}

.content h1 {
  font-size: 2.25rem;
  margin-bottom: 0.5rem;
}

.content h2 {
  font-size: 1.5rem;
  margin: 2rem 0 1rem;
}

.content p {
  margin-bottom: 1rem;
}

.content a {
  color: var(--primary);
}

.content pre {
  background: var(--muted);
  border: 1px solid var(--border);
  border-radius: 0.5rem;
  padding: 1rem;
  overflow-x: auto;
  margin-bottom: 1rem;
}

.content code {
  font-family: ui-monospace, monospace;
  font-size: 0.875em;
}

.post-meta {
  color: var(--muted-foreground);
  font-size: 0.875rem;
  margin-bottom: 2rem;
}

.post-list {
  list-style: none;
}

.post-list li {
  padding: 1rem 0;
  border-bottom: 1px solid var(--border);
}

/* Homepage widgets */
.homepage .h1 li.fadein {
  animation: fadein 0.4s ease-in forwards;
}

.homepage .h1 li.fadeout {
  animation: fadeout 0.4s ease-out forwards;
}

@keyframes fadein {
  from { opacity: 0; }
  to { opacity: 1; }
}

@keyframes fadeout {
  from { opacity: 1; }
  to { opacity: 0; }
}

.component-list li {
  cursor: pointer;
}

.component-list li.active {
  color: var(--primary);
}

.component-list li.soon {
  cursor: default;
  opacity: 0.5;
}

.progress-bar-bad {
  width: 0;
  height: 0.5rem;
  background: var(--primary);
}

.progress-bar-bad.transition {
  transition: width 30s linear;
}

.time-bad.timer-running {
  display: none;
}

/* Mobile */
@media (max-width: 768px) {
  .mobile-handle {
    display: block;
  }

  .page-header nav,
  .docs-sidebar {
    display: none;
  }

  .page-header.mobile-active nav,
  .docs-sidebar.mobile-active {
    display: block;
  }
}
"#;
