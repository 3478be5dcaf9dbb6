//! Responsive width and the mobile navigation sidebar.

/// Widths at or below this many CSS pixels are mobile.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

/// Elements that receive [`MOBILE_ACTIVE_CLASS`] while the sidebar is open.
pub const MOBILE_ACTIVE_TARGETS: &[&str] =
    &[".page-header", ".page-header-mobile", ".docs-sidebar"];

pub const MOBILE_ACTIVE_CLASS: &str = "mobile-active";
pub const HANDLE_ACTIVE_CLASS: &str = "active";
pub const NO_SCROLL_CLASS: &str = "no-scroll";

/// Whether a viewport width falls in the mobile range.
pub fn is_mobile_width(width_px: u32) -> bool {
    width_px <= MOBILE_BREAKPOINT_PX
}

/// Viewport and sidebar flags, owned by the interaction layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    pub is_mobile: bool,
    pub mobile_nav_visible: bool,
}

/// Class changes produced by opening or closing the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarChange {
    /// Sidebar visibility after the change
    pub visible: bool,
    /// Class toggled on the sidebar handle
    pub handle_class: &'static str,
    /// Class toggled on the body
    pub body_class: &'static str,
    /// Selectors gaining (visible) or losing (hidden) `target_class`
    pub targets: &'static [&'static str],
    pub target_class: &'static str,
}

impl UiState {
    /// Initial state for a viewport width.
    pub fn new(width_px: u32) -> Self {
        Self {
            is_mobile: is_mobile_width(width_px),
            mobile_nav_visible: false,
        }
    }

    /// Wire up the sidebar handle. Returns `None` when the page has no handle,
    /// in which case no listener is attached.
    pub fn attach(width_px: u32, handle_present: bool) -> Option<Self> {
        handle_present.then(|| Self::new(width_px))
    }

    /// Open or close the sidebar.
    pub fn toggle_mobile_sidebar(&mut self) -> SidebarChange {
        self.mobile_nav_visible = !self.mobile_nav_visible;

        SidebarChange {
            visible: self.mobile_nav_visible,
            handle_class: HANDLE_ACTIVE_CLASS,
            body_class: NO_SCROLL_CLASS,
            targets: MOBILE_ACTIVE_TARGETS,
            target_class: MOBILE_ACTIVE_CLASS,
        }
    }

    /// React to the viewport crossing the mobile breakpoint.
    ///
    /// Moving to desktop width with the sidebar open closes it.
    pub fn on_viewport_change(&mut self, is_mobile: bool) -> Option<SidebarChange> {
        self.is_mobile = is_mobile;

        if self.mobile_nav_visible && !self.is_mobile {
            Some(self.toggle_mobile_sidebar())
        } else {
            None
        }
    }
}
