//! Google Custom Search request types and validation.

use serde::Serialize;

use crate::provider::ProviderError;

/// Query parameters for the Custom Search JSON API.
///
/// The API key is attached separately so it never ends up in logs that
/// print this struct.
///
/// https://developers.google.com/custom-search/v1/reference/rest/v1/cse/list
#[derive(Debug, Clone, Serialize, Default)]
pub struct CseRequest {
    /// Search query (required).
    pub q: String,

    /// Programmable Search Engine id.
    pub cx: String,

    /// 1-based index of the first result (1-91).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u8>,

    /// Number of results (1-10).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num: Option<u8>,

    /// Safe search: active|off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safe: Option<String>,

    /// Restrict by recency, e.g. `d7`, `m6`.
    #[serde(rename = "dateRestrict", skip_serializing_if = "Option::is_none")]
    pub date_restrict: Option<String>,
}

/// Longest query the API accepts, in bytes.
const MAX_QUERY_LEN: usize = 2048;

impl CseRequest {
    /// Validate the request parameters.
    ///
    /// Returns an error if any parameters are out of range or malformed.
    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.q.trim().is_empty() {
            return Err(ProviderError::InvalidQuery("query cannot be empty".to_string()));
        }

        if self.q.len() > MAX_QUERY_LEN {
            return Err(ProviderError::InvalidQuery(format!(
                "query too long: {} bytes (max {MAX_QUERY_LEN})",
                self.q.len()
            )));
        }

        if self.cx.is_empty() {
            return Err(ProviderError::MissingCredentials("google_cse_id"));
        }

        if let Some(start) = self.start
            && !(1..=91).contains(&start)
        {
            return Err(ProviderError::InvalidStart);
        }

        if let Some(num) = self.num
            && !(1..=10).contains(&num)
        {
            return Err(ProviderError::InvalidQuery(format!("num must be 1-10, got {num}")));
        }

        Ok(())
    }

    /// Get the effective start (default 1).
    pub fn get_start(&self) -> u8 {
        self.start.unwrap_or(1)
    }
}
