//! # Reference-Code Metadata Lookup
//!
//! Best-effort enrichment: given a reference standard code (a GOST number),
//! ask a search endpoint for a descriptive title. Every failure mode -
//! transport error, non-success status, unparseable body - collapses to
//! `None`; absence of metadata is indistinguishable from a lookup that was
//! never attempted.

use serde::Deserialize;
use tracing::debug;

/// Current crate version, used in the lookup user agent.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default search endpoint for reference-code queries.
pub const DEFAULT_API_URL: &str = "https://gost-api.example.com/search";

/// Capability seam for reference-code lookups. The calculation never needs
/// this to succeed.
pub trait ReferenceLookup {
    /// Descriptive title for the given reference code, if one can be found.
    fn title_for(&self, code: &str) -> Option<String>;
}

#[derive(Deserialize)]
struct SearchResponse {
    title: Option<String>,
}

/// HTTP-backed lookup against a GOST search endpoint.
pub struct GostApiLookup {
    base_url: String,
    client: Option<reqwest::blocking::Client>,
}

impl GostApiLookup {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("Mason/{}", VERSION))
            .timeout(std::time::Duration::from_secs(10))
            .build();

        let client = match client {
            Ok(client) => Some(client),
            Err(e) => {
                debug!(error = %e, "failed to build lookup client, lookups disabled");
                None
            }
        };

        GostApiLookup {
            base_url: base_url.into(),
            client,
        }
    }
}

impl Default for GostApiLookup {
    fn default() -> Self {
        GostApiLookup::new(DEFAULT_API_URL)
    }
}

impl ReferenceLookup for GostApiLookup {
    fn title_for(&self, code: &str) -> Option<String> {
        let client = self.client.as_ref()?;

        let response = match client
            .get(&self.base_url)
            .query(&[("query", code)])
            .send()
        {
            Ok(response) => response,
            Err(e) => {
                debug!(code, error = %e, "reference lookup failed");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!(code, status = %response.status(), "reference lookup returned non-success");
            return None;
        }

        match response.json::<SearchResponse>() {
            Ok(body) => body.title,
            Err(e) => {
                debug!(code, error = %e, "reference lookup body unparseable");
                None
            }
        }
    }
}

/// Inert lookup for offline use and tests.
pub struct NoLookup;

impl ReferenceLookup for NoLookup {
    fn title_for(&self, _code: &str) -> Option<String> {
        None
    }
}
