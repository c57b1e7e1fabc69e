//! Google Custom Search response types and normalization.

use prospect_core::{SearchInformation, SearchPayload, SearchResultItem, SourceKind, Tab};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::details::{ItemText, extract_details};

/// Raw response from the Custom Search JSON API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CseApiResponse {
    #[serde(default)]
    pub items: Vec<CseItem>,
    #[serde(default)]
    pub search_information: Option<CseSearchInformation>,
}

/// Totals block. Google reports the result count as a string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CseSearchInformation {
    #[serde(default)]
    pub search_time: f64,
    #[serde(default)]
    pub total_results: String,
    #[serde(default)]
    pub formatted_total_results: Option<String>,
}

/// Individual result from the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CseItem {
    #[serde(default)]
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub display_link: Option<String>,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub pagemap: Option<PageMap>,
}

/// Structured data Google scraped from the page.
#[derive(Debug, Default, Deserialize)]
pub struct PageMap {
    #[serde(default)]
    pub metatags: Vec<Map<String, Value>>,
}

impl PageMap {
    /// First string value for `name` across all metatag blocks.
    pub fn meta(&self, name: &str) -> Option<String> {
        self.metatags
            .iter()
            .find_map(|tags| tags.get(name).and_then(Value::as_str))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

/// Domain shown for a result: the display link, else the URL host, without `www.`.
pub fn source_domain(display_link: Option<&str>, link: &str) -> String {
    let host = display_link
        .filter(|d| !d.is_empty())
        .map(|d| d.split('/').next().unwrap_or(d).to_string())
        .or_else(|| url::Url::parse(link).ok().and_then(|u| u.host_str().map(str::to_string)))
        .unwrap_or_default();
    host.trim_start_matches("www.").to_ascii_lowercase()
}

impl CseApiResponse {
    /// Convert the raw response into a payload for `tab`.
    ///
    /// Ranks continue from `start` so page two begins at 11.
    pub fn into_payload(self, tab: Tab, start: u8) -> SearchPayload {
        let items = self
            .items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| {
                let domain = source_domain(item.display_link.as_deref(), &item.link);
                let pagemap = item.pagemap.unwrap_or_default();
                let details = extract_details(
                    tab,
                    &ItemText { title: &item.title, snippet: &item.snippet, domain: &domain },
                    &pagemap,
                );
                SearchResultItem {
                    id: uuid::Uuid::new_v4().to_string(),
                    rank: usize::from(start) + idx,
                    title: item.title,
                    url: item.link,
                    source_domain: domain,
                    snippet: item.snippet,
                    details,
                }
            })
            .collect();

        let search_information = self.search_information.map(|info| SearchInformation {
            total_results: info.total_results.parse().unwrap_or(0),
            search_time: info.search_time,
            formatted_total_results: info.formatted_total_results,
        });

        SearchPayload { items, source: SourceKind::Google, search_information, banner: None }
    }
}
