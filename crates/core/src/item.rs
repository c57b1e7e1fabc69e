//! Search result payloads shared by providers, the cache and transports.

use serde::{Deserialize, Serialize};

/// Where a payload's items came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Google,
    Mock,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Google => "google",
            SourceKind::Mock => "mock",
        }
    }
}

/// Kind of business event a signal result describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    Funding,
    Acquisition,
    Hiring,
    Launch,
    Partnership,
    Other,
}

impl SignalType {
    /// Classify free text by the first signal keyword it contains.
    pub fn classify(text: &str) -> Self {
        let text = text.to_lowercase();
        const RULES: &[(&[&str], SignalType)] = &[
            (&["acquire", "acquisition", "merger", "buys "], SignalType::Acquisition),
            (&["raises", "funding", "series a", "series b", "series c", "seed round"], SignalType::Funding),
            (&["hiring", "job", "careers", "appoints"], SignalType::Hiring),
            (&["partner"], SignalType::Partnership),
            (&["launch", "unveil", "introduces", "release"], SignalType::Launch),
        ];
        RULES
            .iter()
            .find(|(needles, _)| needles.iter().any(|n| text.contains(n)))
            .map(|(_, kind)| *kind)
            .unwrap_or(SignalType::Other)
    }
}

/// Category-specific fields of a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ItemDetails {
    Company {
        company_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        industry: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<String>,
    },
    Person {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        role: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        organization: Option<String>,
    },
    News {
        publisher: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        published_at: Option<String>,
    },
    Signal {
        signal_type: SignalType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        company: Option<String>,
    },
    Market {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metric: Option<String>,
    },
    Patent {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        patent_number: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        assignee: Option<String>,
    },
    Paper {
        #[serde(default)]
        authors: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        year: Option<u16>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        venue: Option<String>,
    },
}

/// A single search result row.
///
/// IDs are generated when the item is produced and carry no identity across
/// requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    pub id: String,
    pub rank: usize,
    pub title: String,
    pub url: String,
    pub source_domain: String,
    pub snippet: String,
    #[serde(flatten)]
    pub details: ItemDetails,
}

/// Provider-reported totals for a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInformation {
    pub total_results: u64,
    pub search_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_total_results: Option<String>,
}

/// The unit stored in the search cache and returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPayload {
    pub items: Vec<SearchResultItem>,
    pub source: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_information: Option<SearchInformation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

impl SearchPayload {
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = Some(banner.into());
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
