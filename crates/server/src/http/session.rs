//! Per-visitor identity: rate-limit key, budget cookie and state owner.

use std::net::SocketAddr;

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use prospect_core::SessionBudget;
use sha2::{Digest, Sha256};

/// Client-readable cookie holding the session's live search count.
pub const BUDGET_COOKIE: &str = "prospect_budget";

/// Cookie naming the owner of stored UI state.
pub const OWNER_COOKIE: &str = "prospect_sid";

const OWNER_MAX_AGE_DAYS: i64 = 365;

/// Hex characters kept from the client hash.
const CLIENT_ID_LEN: usize = 16;

/// Raw client address: first `x-forwarded-for` hop, else the peer address.
pub fn client_address(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "anonymous".to_string())
}

/// Rate-limit key for a request. Addresses are never stored in the clear.
pub fn client_id(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let digest = Sha256::digest(client_address(headers, peer).as_bytes());
    let mut id = hex::encode(digest);
    id.truncate(CLIENT_ID_LEN);
    id
}

/// Session budget restored from the request cookies.
pub fn budget_from(jar: &CookieJar, limit: u32) -> SessionBudget {
    SessionBudget::from_stored(jar.get(BUDGET_COOKIE).map(|c| c.value()), limit)
}

pub fn budget_cookie(budget: &SessionBudget, max_age_secs: u64) -> Cookie<'static> {
    Cookie::build((BUDGET_COOKIE, budget.to_stored()))
        .path("/")
        .same_site(SameSite::Lax)
        .http_only(false)
        .max_age(time::Duration::seconds(i64::try_from(max_age_secs).unwrap_or(i64::MAX)))
        .build()
}

/// The state owner for this visitor, issuing a new owner cookie if needed.
pub fn owner(jar: CookieJar) -> (String, CookieJar) {
    if let Some(existing) = jar.get(OWNER_COOKIE).map(|c| c.value().trim().to_string())
        && !existing.is_empty()
    {
        return (existing, jar);
    }

    let owner = uuid::Uuid::new_v4().simple().to_string();
    let cookie = Cookie::build((OWNER_COOKIE, owner.clone()))
        .path("/")
        .same_site(SameSite::Lax)
        .http_only(true)
        .max_age(time::Duration::days(OWNER_MAX_AGE_DAYS))
        .build();
    (owner, jar.add(cookie))
}
