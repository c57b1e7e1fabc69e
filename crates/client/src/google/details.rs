//! Category-specific field extraction from generic web results.
//!
//! Google returns the same shape for every result; the grid needs names,
//! roles, publishers, patent numbers and so on. These are pulled from the
//! title, snippet and page metatags on a best-effort basis.

use std::sync::LazyLock;

use prospect_core::{ItemDetails, SignalType, Tab};
use regex::Regex;

use super::response::PageMap;

static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:headquartered|based) in ([A-Z][A-Za-z .'-]*?[A-Za-z])(?:[,.;]|\s+(?:and|with|since)\b|$)")
        .expect("location regex")
});

static LEADING_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][\w&.'-]*(?:\s+[A-Z][\w&.'-]*)*)").expect("leading name regex"));

static MARKET_METRIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\d+(?:\.\d+)?%\s*CAGR|CAGR of \d+(?:\.\d+)?%|(?:USD|US\$|\$)\s?\d+(?:\.\d+)?\s?(?:trillion|billion|million|bn|mn)\b)",
    )
    .expect("market metric regex")
});

static PATENT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b((?:US|EP|WO|CN|JP|KR|DE)\d{5,}(?:[A-Z]\d?)?)\b").expect("patent regex"));

static ASSIGNEE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Assignee|assigned to|Current Assignee)[:\s]+([A-Z][^.;,]*[A-Za-z.])").expect("assignee regex")
});

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b((?:19|20)\d{2})\b").expect("year regex"));

/// Text fields of one result.
#[derive(Debug, Clone, Copy)]
pub struct ItemText<'a> {
    pub title: &'a str,
    pub snippet: &'a str,
    pub domain: &'a str,
}

/// Site suffixes that carry no information about the result itself.
const SITE_SUFFIXES: &[&str] = &["LinkedIn", "Crunchbase", "Google Patents", "arXiv", "X", "Twitter", "GitHub"];

/// Split a title on the usual separators, dropping site-name suffixes.
fn title_parts(title: &str) -> Vec<&str> {
    title
        .split(" - ")
        .flat_map(|part| part.split(" | "))
        .flat_map(|part| part.split(" \u{2013} "))
        .map(str::trim)
        .filter(|part| !part.is_empty() && !SITE_SUFFIXES.iter().any(|s| part.eq_ignore_ascii_case(s)))
        .collect()
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str().trim().to_string())
}

/// Build the details block for `tab` from a result's text and metatags.
pub fn extract_details(tab: Tab, text: &ItemText<'_>, pagemap: &PageMap) -> ItemDetails {
    let parts = title_parts(text.title);
    let first = parts.first().map(|s| s.to_string()).unwrap_or_else(|| text.title.trim().to_string());

    match tab {
        Tab::Companies => ItemDetails::Company {
            company_name: pagemap.meta("og:site_name").filter(|_| parts.len() < 2).unwrap_or(first),
            industry: pagemap.meta("industry"),
            location: capture(&LOCATION, text.snippet),
        },
        Tab::People => ItemDetails::Person {
            name: first,
            role: parts.get(1).map(|s| s.to_string()),
            organization: parts.get(2).map(|s| s.to_string()),
        },
        Tab::News => ItemDetails::News {
            publisher: pagemap
                .meta("og:site_name")
                .or_else(|| (parts.len() > 1).then(|| parts[parts.len() - 1].to_string()))
                .unwrap_or_else(|| text.domain.to_string()),
            published_at: pagemap
                .meta("article:published_time")
                .or_else(|| pagemap.meta("og:updated_time"))
                .or_else(|| pagemap.meta("date")),
        },
        Tab::Signals => ItemDetails::Signal {
            signal_type: SignalType::classify(&format!("{} {}", text.title, text.snippet)),
            company: capture(&LEADING_NAME, text.title),
        },
        Tab::Market => ItemDetails::Market {
            metric: capture(&MARKET_METRIC, text.snippet).or_else(|| capture(&MARKET_METRIC, text.title)),
        },
        Tab::Patents => ItemDetails::Patent {
            patent_number: capture(&PATENT_NUMBER, text.title).or_else(|| capture(&PATENT_NUMBER, text.snippet)),
            assignee: pagemap.meta("dc.contributor").or_else(|| capture(&ASSIGNEE, text.snippet)),
        },
        Tab::ResearchPapers => ItemDetails::Paper {
            authors: pagemap
                .meta("citation_author")
                .map(|a| a.split(';').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
                .unwrap_or_default(),
            year: pagemap
                .meta("citation_publication_date")
                .or_else(|| pagemap.meta("citation_date"))
                .and_then(|d| capture(&YEAR, &d))
                .or_else(|| capture(&YEAR, text.snippet))
                .and_then(|y| y.parse().ok()),
            venue: pagemap
                .meta("citation_journal_title")
                .or_else(|| pagemap.meta("citation_conference_title"))
                .or_else(|| (!text.domain.is_empty()).then(|| text.domain.to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pagemap(tags: serde_json::Value) -> PageMap {
        serde_json::from_value(json!({ "metatags": [tags] })).unwrap()
    }

    fn text<'a>(title: &'a str, snippet: &'a str, domain: &'a str) -> ItemText<'a> {
        ItemText { title, snippet, domain }
    }

    #[test]
    fn test_title_parts_drop_site_suffix() {
        assert_eq!(title_parts("Jane Doe - CTO - Acme | LinkedIn"), vec!["Jane Doe", "CTO", "Acme"]);
        assert_eq!(title_parts("Acme Robotics"), vec!["Acme Robotics"]);
    }

    #[test]
    fn test_person_from_linkedin_title() {
        let details = extract_details(
            Tab::People,
            &text("Jane Doe - CTO - Acme Robotics | LinkedIn", "", "linkedin.com"),
            &PageMap::default(),
        );
        assert_eq!(
            details,
            ItemDetails::Person {
                name: "Jane Doe".into(),
                role: Some("CTO".into()),
                organization: Some("Acme Robotics".into()),
            }
        );
    }

    #[test]
    fn test_company_location_from_snippet() {
        let details = extract_details(
            Tab::Companies,
            &text("Acme Robotics | Crunchbase", "Acme is headquartered in San Francisco, California.", "crunchbase.com"),
            &PageMap::default(),
        );
        let ItemDetails::Company { company_name, location, .. } = details else { panic!("expected company") };
        assert_eq!(company_name, "Acme Robotics");
        assert_eq!(location.as_deref(), Some("San Francisco"));
    }

    #[test]
    fn test_news_publisher_fallbacks() {
        let details =
            extract_details(Tab::News, &text("Acme expands - Reuters", "", "reuters.com"), &PageMap::default());
        assert_eq!(details, ItemDetails::News { publisher: "Reuters".into(), published_at: None });

        let details = extract_details(Tab::News, &text("Acme expands", "", "reuters.com"), &PageMap::default());
        assert_eq!(details, ItemDetails::News { publisher: "reuters.com".into(), published_at: None });
    }

    #[test]
    fn test_signal_company_and_type() {
        let details = extract_details(
            Tab::Signals,
            &text("Acme Robotics raises $40M to scale picking robots", "", "techcrunch.com"),
            &PageMap::default(),
        );
        assert_eq!(
            details,
            ItemDetails::Signal { signal_type: SignalType::Funding, company: Some("Acme Robotics".into()) }
        );
    }

    #[test]
    fn test_market_metric() {
        let details = extract_details(
            Tab::Market,
            &text("Warehouse Robotics Market Report", "The market will grow at a 14.2% CAGR through 2030.", "x.com"),
            &PageMap::default(),
        );
        assert_eq!(details, ItemDetails::Market { metric: Some("14.2% CAGR".into()) });
    }

    #[test]
    fn test_patent_number_and_assignee() {
        let details = extract_details(
            Tab::Patents,
            &text(
                "US10987654B2 - Robotic picking gripper - Google Patents",
                "A gripper... Current Assignee: Acme Robotics Inc.",
                "patents.google.com",
            ),
            &PageMap::default(),
        );
        let ItemDetails::Patent { patent_number, assignee } = details else { panic!("expected patent") };
        assert_eq!(patent_number.as_deref(), Some("US10987654B2"));
        assert_eq!(assignee.as_deref(), Some("Acme Robotics Inc."));
    }

    #[test]
    fn test_paper_from_citation_meta() {
        let details = extract_details(
            Tab::ResearchPapers,
            &text("Learning to grasp [2301.00001]", "", "arxiv.org"),
            &pagemap(json!({
                "citation_author": "Doe, Jane; Roe, Richard",
                "citation_date": "2023/01/02",
            })),
        );
        assert_eq!(
            details,
            ItemDetails::Paper {
                authors: vec!["Doe, Jane".into(), "Roe, Richard".into()],
                year: Some(2023),
                venue: Some("arxiv.org".into()),
            }
        );
    }
}
