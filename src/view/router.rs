//! Page router
//!
//! Four pages, explicit navigation only, Search first. There is no
//! terminal state; the router lives as long as the session.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A navigable page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Search,
    Add,
    Logs,
    Chart,
}

impl Page {
    pub fn all() -> &'static [Page] {
        &[Page::Search, Page::Add, Page::Logs, Page::Chart]
    }

    /// Parse a page identifier, falling back to Search for anything unknown
    pub fn parse_or_search(id: &str) -> Page {
        id.parse().unwrap_or_default()
    }

    /// Heading shown at the top of the page
    pub fn title(&self) -> &'static str {
        match self {
            Page::Search => "Search PPE Records",
            Page::Add => "Add Cleaning Record",
            Page::Logs => "All Logs",
            Page::Chart => "Cleaning Frequency",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Page::Search => write!(f, "search"),
            Page::Add => write!(f, "add"),
            Page::Logs => write!(f, "logs"),
            Page::Chart => write!(f, "chart"),
        }
    }
}

/// Unrecognized page identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown page: {0}")]
pub struct UnknownPage(pub String);

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "search" | "home" => Ok(Page::Search),
            "add" => Ok(Page::Add),
            "logs" => Ok(Page::Logs),
            "chart" => Ok(Page::Chart),
            other => Err(UnknownPage(other.to_string())),
        }
    }
}

/// Current-page state machine
#[derive(Debug, Clone, Default)]
pub struct Router {
    current: Page,
    navigations: u64,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Page {
        self.current
    }

    /// Number of navigations so far (each one re-renders)
    pub fn navigations(&self) -> u64 {
        self.navigations
    }

    /// Move to `page`. Navigating to the current page still counts, since
    /// it rebuilds the page.
    pub fn navigate(&mut self, page: Page) -> Page {
        tracing::debug!(from = %self.current, to = %page, "Navigate");
        self.current = page;
        self.navigations += 1;
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_page_is_search() {
        let router = Router::new();
        assert_eq!(router.current(), Page::Search);
        assert_eq!(router.navigations(), 0);
    }

    #[test]
    fn test_navigation_moves_between_any_pages() {
        let mut router = Router::new();
        for page in [Page::Add, Page::Logs, Page::Chart, Page::Chart, Page::Search] {
            router.navigate(page);
            assert_eq!(router.current(), page);
        }
        assert_eq!(router.navigations(), 5);
    }

    #[test]
    fn test_page_parsing() {
        assert_eq!("Logs".parse::<Page>().unwrap(), Page::Logs);
        assert_eq!("home".parse::<Page>().unwrap(), Page::Search);
        assert_eq!(" chart ".parse::<Page>().unwrap(), Page::Chart);
        assert_eq!(
            "settings".parse::<Page>().unwrap_err(),
            UnknownPage("settings".to_string())
        );
        assert_eq!(Page::parse_or_search("settings"), Page::Search);
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for page in Page::all() {
            assert_eq!(page.to_string().parse::<Page>().unwrap(), *page);
        }
    }
}
