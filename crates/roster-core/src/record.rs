//! User record types as delivered by the users endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::hash::Hash;

/// Stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// String field that treats an explicit `null` like a missing value.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single user in the directory.
///
/// Records are immutable once loaded. Flat string fields default to empty
/// when the payload omits them or sends `null`; nested structures stay optional and are
/// read through the accessor methods, which degrade to `""`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique identifier.
    pub id: UserId,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub website: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// Employer details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,

    #[serde(default, rename = "catchPhrase", deserialize_with = "null_as_empty")]
    pub catch_phrase: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub bs: String,
}

/// Postal address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub street: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub suite: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub zipcode: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
}

/// Coordinates, kept as the strings the endpoint sends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub lat: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub lng: String,
}

impl UserRecord {
    /// Create a record with only the required fields set.
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            username: String::new(),
            email: String::new(),
            phone: String::new(),
            website: String::new(),
            company: None,
            address: None,
        }
    }

    /// Company name, or `""` when the record has no company.
    pub fn company_name(&self) -> &str {
        self.company.as_ref().map_or("", |c| c.name.as_str())
    }

    /// Company catch phrase, or `""`.
    pub fn catch_phrase(&self) -> &str {
        self.company.as_ref().map_or("", |c| c.catch_phrase.as_str())
    }

    /// Address city, or `""` when the record has no address.
    pub fn city(&self) -> &str {
        self.address.as_ref().map_or("", |a| a.city.as_str())
    }

    /// Address zipcode, or `""`.
    pub fn zipcode(&self) -> &str {
        self.address.as_ref().map_or("", |a| a.zipcode.as_str())
    }

    /// Coordinates when the address carries them.
    pub fn geo(&self) -> Option<&Geo> {
        self.address.as_ref().and_then(|a| a.geo.as_ref())
    }

    /// One-line address: street, suite, city, zipcode.
    ///
    /// Empty parts are skipped rather than rendered as blanks.
    pub fn address_line(&self) -> String {
        let Some(address) = &self.address else {
            return String::new();
        };
        [
            address.street.as_str(),
            address.suite.as_str(),
            address.city.as_str(),
            address.zipcode.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Website as an absolute URL.
    pub fn website_url(&self) -> Option<String> {
        if self.website.is_empty() {
            None
        } else {
            Some(format!("https://{}", self.website))
        }
    }

    /// Google Maps search link for the record's coordinates.
    pub fn maps_url(&self) -> Option<String> {
        self.geo().map(|geo| {
            format!(
                "https://www.google.com/maps/search/?api=1&query={},{}",
                geo.lat, geo.lng
            )
        })
    }

    // Builder-style setters, mostly for fixtures.

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }

    pub fn with_company(mut self, name: impl Into<String>) -> Self {
        self.company = Some(Company {
            name: name.into(),
            ..Company::default()
        });
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        let mut address = self.address.take().unwrap_or_default();
        address.city = city.into();
        self.address = Some(address);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": { "lat": "-37.3159", "lng": "81.1496" }
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": {
                "name": "Romaguera-Crona",
                "catchPhrase": "Multi-layered client-server neural-net",
                "bs": "harness real-time e-markets"
            }
        }"#;

        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, UserId(1));
        assert_eq!(user.company_name(), "Romaguera-Crona");
        assert_eq!(user.catch_phrase(), "Multi-layered client-server neural-net");
        assert_eq!(user.city(), "Gwenborough");
        assert_eq!(user.zipcode(), "92998-3874");
        assert_eq!(
            user.maps_url().as_deref(),
            Some("https://www.google.com/maps/search/?api=1&query=-37.3159,81.1496")
        );
    }

    #[test]
    fn test_missing_nested_fields_degrade_to_empty() {
        let user: UserRecord = serde_json::from_str(r#"{ "id": 7, "name": "Solo" }"#).unwrap();
        assert_eq!(user.company_name(), "");
        assert_eq!(user.city(), "");
        assert_eq!(user.zipcode(), "");
        assert_eq!(user.email, "");
        assert!(user.maps_url().is_none());
        assert!(user.website_url().is_none());
        assert_eq!(user.address_line(), "");
    }

    #[test]
    fn test_null_strings_read_as_empty() {
        let json = r#"{
            "id": 3,
            "name": "Clementine Bauch",
            "phone": null,
            "website": null,
            "company": { "name": "Romaguera-Jacobson", "catchPhrase": null },
            "address": { "city": null }
        }"#;

        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.phone, "");
        assert_eq!(user.website, "");
        assert_eq!(user.company_name(), "Romaguera-Jacobson");
        assert_eq!(user.catch_phrase(), "");
        assert_eq!(user.city(), "");
        assert!(user.website_url().is_none());
    }

    #[test]
    fn test_partial_geo_is_kept() {
        let json = r#"{ "id": 4, "address": { "city": "X", "geo": { "lat": "1" } } }"#;
        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.city(), "X");
        assert_eq!(
            user.geo(),
            Some(&Geo {
                lat: "1".to_string(),
                lng: String::new(),
            })
        );
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let result: Result<UserRecord, _> = serde_json::from_str(r#"{ "name": "Nobody" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_address_line_skips_empty_parts() {
        let user = UserRecord::new(1u64, "A").with_city("Gwenborough");
        assert_eq!(user.address_line(), "Gwenborough");
    }

    #[test]
    fn test_website_url() {
        let user = UserRecord::new(1u64, "A").with_website("hildegard.org");
        assert_eq!(user.website_url().as_deref(), Some("https://hildegard.org"));
    }
}
