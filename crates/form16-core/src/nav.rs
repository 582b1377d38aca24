//! Navigation state: which nav entry is active and where to scroll
//!
//! Layout numbers (header height, section offsets) are measured by the caller
//! and passed in, so every decision here is a pure function of them.

use crate::config::PageConfig;
use crate::menu::MobileMenu;
use tracing::debug;

/// `href` of the nav link pointing at `section`
pub fn link_href(section: &str) -> String {
    format!("#{}", section)
}

/// Section id an in-page `href` points at
///
/// Returns `None` for external links and for a bare `#`.
pub fn section_from_href(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Measured position of a section on the page
#[derive(Debug, Clone, PartialEq)]
pub struct SectionLayout {
    pub id: String,
    /// Distance from the top of the page
    pub offset_top: f64,
    /// Rendered height
    pub height: f64,
}

impl SectionLayout {
    pub fn new(id: impl Into<String>, offset_top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            offset_top,
            height,
        }
    }
}

/// Vertical scroll range in which a section counts as the one being viewed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBand {
    pub start: f64,
    pub end: f64,
}

impl SectionBand {
    pub fn for_section(section: &SectionLayout, header_height: f64, slack: f64) -> Self {
        let start = section.offset_top - header_height - slack;
        Self {
            start,
            end: start + section.height,
        }
    }

    pub fn contains(&self, scroll_y: f64) -> bool {
        scroll_y >= self.start && scroll_y < self.end
    }
}

/// What to do once the page has loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialNav {
    /// Activate this section's link and scroll to it
    Jump(String),
    /// Activate the home link
    Home(String),
    /// The fragment names no nav link; leave everything alone
    Nothing,
}

/// Owns the active nav entry
#[derive(Debug, Clone)]
pub struct NavController {
    active: Option<String>,
    header_padding: f64,
    band_slack: f64,
    home_section: String,
}

impl NavController {
    pub fn new(config: &PageConfig) -> Self {
        Self {
            active: None,
            header_padding: config.header_padding_px,
            band_slack: config.band_slack_px,
            home_section: config.home_section.clone(),
        }
    }

    /// Section whose nav link is currently active
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether the link with `href` should carry the active flag
    pub fn is_active_href(&self, href: &str) -> bool {
        match (&self.active, section_from_href(href)) {
            (Some(active), Some(section)) => active == section,
            _ => false,
        }
    }

    /// Make `section` the sole active entry, returning whether it changed
    pub fn activate(&mut self, section: &str) -> bool {
        if self.active.as_deref() == Some(section) {
            return false;
        }
        debug!(section, "nav link activated");
        self.active = Some(section.to_string());
        true
    }

    /// Plan a jump to a section whose top sits `element_page_top` px down the page
    ///
    /// Closes the mobile menu, activates the section and returns the scroll
    /// position that puts the section just below the fixed header.
    pub fn jump(
        &mut self,
        section: &str,
        element_page_top: f64,
        header_height: f64,
        menu: &mut MobileMenu,
    ) -> f64 {
        menu.close();
        self.activate(section);
        self.scroll_target(element_page_top, header_height)
    }

    /// Scroll position for a section top, leaving room for the header
    pub fn scroll_target(&self, element_page_top: f64, header_height: f64) -> f64 {
        element_page_top - header_height - self.header_padding
    }

    /// Update the active entry from the current scroll position
    ///
    /// When several bands contain `scroll_y` the last section wins. With no
    /// match the current entry is kept. Returns whether anything changed.
    pub fn on_scroll(&mut self, scroll_y: f64, header_height: f64, sections: &[SectionLayout]) -> bool {
        let current = sections
            .iter()
            .rev()
            .find(|s| SectionBand::for_section(s, header_height, self.band_slack).contains(scroll_y));

        match current {
            Some(section) => self.activate(&section.id),
            None => false,
        }
    }

    /// Decide the initial nav state from the URL fragment
    ///
    /// `has_link` reports whether a nav link with the given `href` exists.
    pub fn initial(&mut self, fragment: &str, has_link: impl Fn(&str) -> bool) -> InitialNav {
        let fragment = fragment.trim_start_matches('#');
        if fragment.is_empty() {
            let home = self.home_section.clone();
            if has_link(&link_href(&home)) {
                self.activate(&home);
            }
            return InitialNav::Home(home);
        }

        if has_link(&link_href(fragment)) {
            self.activate(fragment);
            InitialNav::Jump(fragment.to_string())
        } else {
            InitialNav::Nothing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn controller() -> NavController {
        NavController::new(&PageConfig::default())
    }

    fn page() -> Vec<SectionLayout> {
        vec![
            SectionLayout::new("home", 0.0, 600.0),
            SectionLayout::new("features", 600.0, 800.0),
            SectionLayout::new("analyzer-tool", 1400.0, 900.0),
        ]
    }

    #[test]
    fn test_section_from_href() {
        assert_eq!(section_from_href("#features"), Some("features"));
        assert_eq!(section_from_href("#"), None);
        assert_eq!(section_from_href("https://example.com"), None);
        assert_eq!(link_href("home"), "#home");
    }

    #[test]
    fn test_band_bounds() {
        let band = SectionBand::for_section(&SectionLayout::new("s", 1000.0, 400.0), 80.0, 50.0);
        assert_eq!(band.start, 870.0);
        assert_eq!(band.end, 1270.0);
        assert!(band.contains(870.0));
        assert!(band.contains(1269.9));
        assert!(!band.contains(1270.0));
        assert!(!band.contains(869.9));
    }

    #[test]
    fn test_scroll_activates_matching_section() {
        let mut nav = controller();
        assert!(nav.on_scroll(700.0, 80.0, &page()));
        assert_eq!(nav.active(), Some("features"));
        assert!(nav.is_active_href("#features"));
        assert!(!nav.is_active_href("#home"));
    }

    #[test]
    fn test_scroll_without_match_keeps_active() {
        let mut nav = controller();
        nav.on_scroll(700.0, 80.0, &page());
        // Past the end of the last band
        assert!(!nav.on_scroll(10_000.0, 80.0, &page()));
        assert_eq!(nav.active(), Some("features"));
    }

    #[test]
    fn test_overlapping_bands_last_wins() {
        let mut nav = controller();
        let sections = vec![
            SectionLayout::new("outer", 0.0, 2000.0),
            SectionLayout::new("inner", 500.0, 300.0),
        ];
        nav.on_scroll(500.0, 0.0, &sections);
        assert_eq!(nav.active(), Some("inner"));
    }

    #[test]
    fn test_jump_closes_menu_and_offsets() {
        let mut nav = controller();
        let mut menu = MobileMenu::new();
        menu.toggle();
        let top = nav.jump("analyzer-tool", 1400.0, 80.0, &mut menu);
        assert_eq!(top, 1300.0);
        assert!(!menu.is_open());
        assert_eq!(nav.active(), Some("analyzer-tool"));
    }

    #[test]
    fn test_initial_without_fragment_activates_home() {
        let mut nav = controller();
        let result = nav.initial("", |href| href == "#home");
        assert_eq!(result, InitialNav::Home("home".to_string()));
        assert_eq!(nav.active(), Some("home"));
    }

    #[test]
    fn test_initial_with_known_fragment_jumps() {
        let mut nav = controller();
        let result = nav.initial("#features", |href| href == "#features");
        assert_eq!(result, InitialNav::Jump("features".to_string()));
        assert_eq!(nav.active(), Some("features"));
    }

    #[test]
    fn test_initial_with_unknown_fragment_does_nothing() {
        let mut nav = controller();
        assert_eq!(nav.initial("#missing", |_| false), InitialNav::Nothing);
        assert_eq!(nav.active(), None);
    }

    #[test]
    fn test_activate_reports_change() {
        let mut nav = controller();
        assert!(nav.activate("home"));
        assert!(!nav.activate("home"));
        assert!(nav.activate("features"));
    }
}
