//! Interaction state for the gazette site.
//!
//! Each widget on the page keeps its flags in a small owned struct and
//! reports the DOM changes it wants as plain data, so the behavior can be
//! driven and checked without a browser. The generated client script
//! mirrors these rules.

pub mod hero;
pub mod nav;
pub mod progress;
pub mod switcher;
pub mod theme;

pub use hero::{HeroRotator, HeroStep, ROTATION_INTERVAL};
pub use nav::{is_mobile_width, SidebarChange, UiState, MOBILE_BREAKPOINT_PX};
pub use progress::{ProgressTrigger, Stopwatch, TICK_INTERVAL, VISIBILITY_THRESHOLD};
pub use switcher::{ComponentSwitcher, SwitchButton, SwitchChange};
pub use theme::{
    current_theme, load_theme, toggle_theme, tweet_theme, MemoryStore, Theme, ThemeChange,
    ThemeStore, THEME_STORAGE_KEY,
};
