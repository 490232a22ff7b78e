//! HTTP client for the person API.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{EnrichError, EnrichResult};
use crate::types::{ClientConfig, PersonData, PersonResponse};

/// User agent for API requests.
const USER_AGENT_VALUE: &str = concat!("rolo/", env!("CARGO_PKG_VERSION"));

/// Name of the request header carrying the API key.
const API_KEY_HEADER: &str = "api_key";

/// Which optional field a single query searches by.
///
/// A query always carries firstName and lastName, plus exactly one of
/// company or domain. Company-first priority (try company, fall back to
/// domain only when the company query found nothing) lives in
/// [`crate::enrich`], not here.
#[derive(Debug, Clone, Copy)]
pub enum SearchScope<'a> {
    /// Search by company name.
    Company(&'a str),
    /// Search by company domain.
    Domain(&'a str),
}

/// Outcome of a single query.
///
/// "No result" conditions are data, not errors: the pipeline logs them and
/// leaves the row unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The API returned a usable person.
    Found(PersonData),
    /// The API answered but produced nothing usable.
    NoResult(NoResultReason),
}

/// Why a query produced no result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoResultReason {
    /// Non-success HTTP status.
    HttpStatus(u16),
    /// Success status but no `data` field, or an empty result list.
    Empty,
}

/// Person API client.
#[derive(Debug, Clone)]
pub struct PersonClient {
    /// HTTP client.
    client: reqwest::Client,

    /// Base URL for the API.
    base_url: String,

    /// API key sent with every request.
    api_key: String,
}

impl PersonClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> EnrichResult<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| EnrichError::Config {
            message: "no API key configured".to_string(),
        })?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| EnrichError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        // Normalize base URL (remove trailing slash)
        let base_url = config.url.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Query the API for one person.
    ///
    /// Issues a single GET to `{base_url}/person`. Non-success statuses and
    /// empty bodies map to [`LookupOutcome::NoResult`]; transport failures
    /// and unparseable 2xx bodies are errors and abort the run.
    pub async fn lookup(
        &self,
        firstname: &str,
        lastname: &str,
        scope: SearchScope<'_>,
    ) -> EnrichResult<LookupOutcome> {
        let url = self.person_url(firstname, lastname, scope)?;
        debug!(url = %url, "querying person API");

        let response = self
            .client
            .get(url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                url = %url,
                status = status.as_u16(),
                "person API returned non-success status"
            );
            return Ok(LookupOutcome::NoResult(NoResultReason::HttpStatus(
                status.as_u16(),
            )));
        }

        let body: PersonResponse =
            response
                .json()
                .await
                .map_err(|e| EnrichError::InvalidResponse {
                    message: format!("failed to parse person response: {}", e),
                })?;

        let person = match body.data.and_then(|data| data.into_person()) {
            Some(person) => person,
            None => {
                info!(url = %url, "query returned 0 results");
                return Ok(LookupOutcome::NoResult(NoResultReason::Empty));
            }
        };

        let data = person.into_person_data();
        info!(
            url = %url,
            emails = data.emails.len(),
            phones = data.phones.len(),
            "query returned a result"
        );

        Ok(LookupOutcome::Found(data))
    }

    fn person_url(
        &self,
        firstname: &str,
        lastname: &str,
        scope: SearchScope<'_>,
    ) -> EnrichResult<Url> {
        let mut url =
            Url::parse(&format!("{}/person", self.base_url)).map_err(|e| EnrichError::Config {
                message: format!("invalid API base URL {}: {}", self.base_url, e),
            })?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("firstName", firstname);
            pairs.append_pair("lastName", lastname);
            match scope {
                SearchScope::Company(company) => pairs.append_pair("company", company),
                SearchScope::Domain(domain) => pairs.append_pair("domain", domain),
            };
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> PersonClient {
        PersonClient::new(ClientConfig::default().with_api_key("k")).unwrap()
    }

    #[test]
    fn client_requires_api_key() {
        let result = PersonClient::new(ClientConfig::default());
        assert!(matches!(result, Err(EnrichError::Config { .. })));
    }

    #[test]
    fn person_url_company_scope() {
        let url = test_client()
            .person_url("Jane", "Doe", SearchScope::Company("Acme Inc"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.lusha.co/person?firstName=Jane&lastName=Doe&company=Acme+Inc"
        );
    }

    #[test]
    fn person_url_domain_scope() {
        let url = test_client()
            .person_url("Jane", "Doe", SearchScope::Domain("acme.com"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.lusha.co/person?firstName=Jane&lastName=Doe&domain=acme.com"
        );
    }

    #[test]
    fn base_url_trailing_slash_normalized() {
        let client =
            PersonClient::new(ClientConfig::default().with_url("http://x.test/").with_api_key("k"))
                .unwrap();
        assert_eq!(client.base_url, "http://x.test");
    }
}
