//! Core record types, API response DTOs, and client configuration.

use serde::{Deserialize, Serialize};

/// A contact identity as read from the input table.
///
/// The cache identity key is (firstname, lastname, company). Domain is
/// deliberately not part of the key: two records differing only in domain
/// collide in the cache. This is a documented inconsistency carried from the
/// original behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// First name (required input column).
    pub firstname: String,

    /// Last name (required input column).
    pub lastname: String,

    /// Company name, if the input cell was non-empty.
    #[serde(default)]
    pub company: Option<String>,

    /// Company domain, if the input cell was non-empty.
    #[serde(default)]
    pub domain: Option<String>,
}

impl ContactRecord {
    /// Whether `other` matches this record's cache key
    /// (exact string equality, case-sensitive, no normalization).
    pub fn same_key(&self, other: &ContactRecord) -> bool {
        self.firstname == other.firstname
            && self.lastname == other.lastname
            && self.company == other.company
    }
}

/// Emails and phones extracted from one person-API result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonData {
    /// Email addresses, in API order.
    pub emails: Vec<String>,

    /// Phone numbers (international format), in API order.
    pub phones: Vec<String>,
}

/// One persisted cache row: a contact plus its resolved data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRow {
    /// The contact identity.
    pub contact: ContactRecord,

    /// Resolved email addresses (empty when none were found).
    pub emails: Vec<String>,

    /// Resolved phone numbers (empty when none were found).
    pub phones: Vec<String>,
}

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL for the person API.
    #[serde(default = "default_api_url")]
    pub url: String,

    /// API key, sent as the `api_key` request header.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://api.lusha.co".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `ROLO_API_URL` | Person API base URL |
    /// | `ROLO_API_KEY` | API key |
    /// | `ROLO_API_TIMEOUT` | Request timeout in seconds (default: 30) |
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("ROLO_API_URL").unwrap_or_else(|_| default_api_url()),
            api_key: std::env::var("ROLO_API_KEY").ok(),
            timeout_secs: std::env::var("ROLO_API_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
        }
    }

    /// Override the base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Override the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

/// Top-level person-API response body.
///
/// The `data` field holds either a single person object or a list of them;
/// an absent `data` field means zero results.
#[derive(Debug, Deserialize)]
pub struct PersonResponse {
    /// The result payload, when the query matched.
    #[serde(default)]
    pub data: Option<DataField>,
}

/// Single-object-or-list shape of the `data` field.
///
/// `Many` must be tried before `One`: untagged resolution takes the first
/// variant that deserializes, and `PersonObject` (all fields defaulted)
/// would otherwise swallow an empty JSON sequence.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DataField {
    /// A list of person objects; only the first is used.
    Many(Vec<PersonObject>),
    /// A single person object.
    One(PersonObject),
}

impl DataField {
    /// The single person to use: the object itself, or the first list
    /// element. `None` for an empty list.
    pub fn into_person(self) -> Option<PersonObject> {
        match self {
            Self::One(person) => Some(person),
            Self::Many(list) => list.into_iter().next(),
        }
    }
}

/// One person result from the API.
#[derive(Debug, Deserialize)]
pub struct PersonObject {
    /// Email address entries.
    #[serde(default, rename = "emailAddresses")]
    pub email_addresses: Vec<EmailAddress>,

    /// Phone number entries.
    #[serde(default, rename = "phoneNumbers")]
    pub phone_numbers: Vec<PhoneNumber>,
}

impl PersonObject {
    /// Project the nested entries into flat email/phone lists.
    pub fn into_person_data(self) -> PersonData {
        PersonData {
            emails: self.email_addresses.into_iter().map(|e| e.email).collect(),
            phones: self
                .phone_numbers
                .into_iter()
                .map(|p| p.international_number)
                .collect(),
        }
    }
}

/// One email address entry.
#[derive(Debug, Deserialize)]
pub struct EmailAddress {
    /// The address itself.
    pub email: String,
}

/// One phone number entry.
#[derive(Debug, Deserialize)]
pub struct PhoneNumber {
    /// The number in international format.
    #[serde(rename = "internationalNumber")]
    pub international_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.url, "https://api.lusha.co");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn config_builders() {
        let config = ClientConfig::default()
            .with_url("http://localhost:9999")
            .with_api_key("k");
        assert_eq!(config.url, "http://localhost:9999");
        assert_eq!(config.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn data_field_single_object() {
        let body: PersonResponse = serde_json::from_str(
            r#"{"data":{"emailAddresses":[{"email":"a@b.c"}],"phoneNumbers":[]}}"#,
        )
        .unwrap();
        let person = body.data.unwrap().into_person().unwrap();
        let data = person.into_person_data();
        assert_eq!(data.emails, vec!["a@b.c"]);
        assert!(data.phones.is_empty());
    }

    #[test]
    fn data_field_list_takes_first() {
        let body: PersonResponse = serde_json::from_str(
            r#"{"data":[
                {"emailAddresses":[{"email":"first@x.y"}],"phoneNumbers":[{"internationalNumber":"+1"}]},
                {"emailAddresses":[{"email":"second@x.y"}],"phoneNumbers":[]}
            ]}"#,
        )
        .unwrap();
        let person = body.data.unwrap().into_person().unwrap();
        let data = person.into_person_data();
        assert_eq!(data.emails, vec!["first@x.y"]);
        assert_eq!(data.phones, vec!["+1"]);
    }

    #[test]
    fn data_field_empty_list_is_no_person() {
        let body: PersonResponse = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        assert!(body.data.unwrap().into_person().is_none());
    }

    #[test]
    fn missing_data_field() {
        let body: PersonResponse = serde_json::from_str(r#"{"requestId":"abc"}"#).unwrap();
        assert!(body.data.is_none());
    }

    #[test]
    fn absent_nested_arrays_deserialize_empty() {
        let body: PersonResponse = serde_json::from_str(r#"{"data":{}}"#).unwrap();
        let data = body.data.unwrap().into_person().unwrap().into_person_data();
        assert!(data.emails.is_empty());
        assert!(data.phones.is_empty());
    }

    #[test]
    fn same_key_ignores_domain() {
        let a = ContactRecord {
            firstname: "Jane".into(),
            lastname: "Doe".into(),
            company: Some("Acme".into()),
            domain: Some("acme.com".into()),
        };
        let b = ContactRecord {
            domain: None,
            ..a.clone()
        };
        assert!(a.same_key(&b));
    }

    #[test]
    fn same_key_is_case_sensitive() {
        let a = ContactRecord {
            firstname: "Jane".into(),
            lastname: "Doe".into(),
            company: Some("Acme".into()),
            domain: None,
        };
        let b = ContactRecord {
            company: Some("acme".into()),
            ..a.clone()
        };
        assert!(!a.same_key(&b));
    }
}
