//! Result categories and per-category query refinement.
//!
//! Each tab biases the provider query toward the sources that matter for it:
//! people searches lean on professional networks, news searches on major
//! outlets, patents on patent offices, and so on. The transformation is pure
//! and deterministic.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A search result category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    Companies,
    People,
    News,
    Signals,
    Market,
    Patents,
    ResearchPapers,
}

/// Returned when a category string names no known tab.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tab: {0}")]
pub struct UnknownTab(pub String);

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Companies,
        Tab::People,
        Tab::News,
        Tab::Signals,
        Tab::Market,
        Tab::Patents,
        Tab::ResearchPapers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Companies => "companies",
            Tab::People => "people",
            Tab::News => "news",
            Tab::Signals => "signals",
            Tab::Market => "market",
            Tab::Patents => "patents",
            Tab::ResearchPapers => "research-papers",
        }
    }

    /// Domain restrictions appended as an OR-group of `site:` operators.
    fn sites(&self) -> &'static [&'static str] {
        match self {
            Tab::Companies => &["crunchbase.com", "linkedin.com/company", "pitchbook.com"],
            Tab::People => &["linkedin.com/in", "x.com", "github.com"],
            Tab::News => &["reuters.com", "bloomberg.com", "techcrunch.com", "wsj.com", "ft.com", "cnbc.com"],
            Tab::Signals | Tab::Market => &[],
            Tab::Patents => &["patents.google.com", "uspto.gov", "wipo.int"],
            Tab::ResearchPapers => &["arxiv.org", "semanticscholar.org", "researchgate.net", "acm.org"],
        }
    }

    /// Keyword OR-group that boosts category-relevant pages.
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Tab::Companies => &["company", "startup", "\"official site\""],
            Tab::People => &["founder", "CEO", "director", "head"],
            Tab::News => &[],
            Tab::Signals => &["funding", "raises", "acquisition", "hiring", "launch", "partnership"],
            Tab::Market => &["\"market size\"", "\"market share\"", "CAGR", "forecast", "\"industry report\""],
            Tab::Patents => &[],
            Tab::ResearchPapers => &["paper", "study", "abstract"],
        }
    }

    /// Refine a raw query for this tab.
    ///
    /// Blank input is returned unchanged.
    pub fn refine(&self, raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return raw.to_string();
        }

        let mut out = raw.to_string();
        if let Some(group) = or_group(self.keywords().iter().map(|k| (*k).to_string())) {
            out.push(' ');
            out.push_str(&group);
        }
        if let Some(group) = or_group(self.sites().iter().map(|s| format!("site:{s}"))) {
            out.push(' ');
            out.push_str(&group);
        }
        out
    }
}

fn or_group(terms: impl Iterator<Item = String>) -> Option<String> {
    let terms: Vec<String> = terms.collect();
    match terms.len() {
        0 => None,
        1 => terms.into_iter().next(),
        _ => Some(format!("({})", terms.join(" OR "))),
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Tab::ALL
            .into_iter()
            .find(|tab| tab.as_str() == wanted)
            .ok_or_else(|| UnknownTab(s.to_string()))
    }
}

/// Build the provider query for a category given as a string.
///
/// Unknown categories leave the query untouched.
pub fn build_tab_query(category: &str, raw: &str) -> String {
    match category.parse::<Tab>() {
        Ok(tab) => tab.refine(raw),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_tabs() {
        for tab in Tab::ALL {
            assert_eq!(tab.as_str().parse::<Tab>().unwrap(), tab);
        }
        assert_eq!(" News ".parse::<Tab>().unwrap(), Tab::News);
        assert!(matches!("videos".parse::<Tab>(), Err(UnknownTab(_))));
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&Tab::ResearchPapers).unwrap();
        assert_eq!(json, "\"research-papers\"");
        let tab: Tab = serde_json::from_str("\"signals\"").unwrap();
        assert_eq!(tab, Tab::Signals);
    }

    #[test]
    fn test_people_query_biases_professional_networks() {
        let q = build_tab_query("people", "Jane Doe");
        assert!(q.starts_with("Jane Doe "));
        assert!(q.contains("site:linkedin.com/in"));
        assert!(q.contains(" OR "));
    }

    #[test]
    fn test_news_query_biases_outlets() {
        let q = build_tab_query("news", "acme robotics");
        assert_eq!(
            q,
            "acme robotics (site:reuters.com OR site:bloomberg.com OR site:techcrunch.com \
             OR site:wsj.com OR site:ft.com OR site:cnbc.com)"
        );
    }

    #[test]
    fn test_market_query_keywords_only() {
        let q = build_tab_query("market", "solid state batteries");
        assert!(q.contains("CAGR"));
        assert!(!q.contains("site:"));
    }

    #[test]
    fn test_unknown_category_is_identity() {
        assert_eq!(build_tab_query("videos", "  cats  "), "  cats  ");
    }

    #[test]
    fn test_refine_is_deterministic() {
        for tab in Tab::ALL {
            assert_eq!(tab.refine("lidar"), tab.refine("lidar"));
        }
    }

    #[test]
    fn test_refine_blank_query() {
        assert_eq!(Tab::Companies.refine("   "), "");
    }
}
