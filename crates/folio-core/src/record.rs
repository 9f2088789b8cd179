//! Normalized content records.
//!
//! One struct per collection, each with a hand-written check from raw
//! front-matter. Field names on the wire keep the front-matter spelling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    collection::Collection,
    validate::{FieldChecker, ValidationFailure},
    value::RawRecord,
};

/// A validated entry of the `projects` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub title: String,
    pub description: String,
    pub pub_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ProjectRecord {
    /// Front-matter keys this schema reads.
    pub const FIELDS: &'static [&'static str] = &[
        "title",
        "description",
        "pubDate",
        "updatedDate",
        "heroImage",
        "badge",
        "tags",
    ];

    /// Check a raw record against the project schema.
    pub fn from_raw(raw: &RawRecord) -> Result<Self, ValidationFailure> {
        let mut fields = FieldChecker::new(raw);

        let title = fields.required_str("title");
        let description = fields.required_str("description");
        let pub_date = fields.required_date("pubDate");
        let updated_date = fields.required_date("updatedDate");
        let hero_image = fields.optional_str("heroImage");
        let badge = fields.optional_str("badge");
        let tags = fields.optional_unique_strings("tags");

        let record = (|| {
            Some(Self {
                title: title?,
                description: description?,
                pub_date: pub_date?,
                updated_date: updated_date?,
                hero_image: hero_image.ok()?,
                badge: badge.ok()?,
                tags: tags.ok()?,
            })
        })();

        fields.finish(Collection::Projects, record)
    }
}

/// A validated entry of the `store` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub title: String,
    pub description: String,
    pub custom_link_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_link: Option<String>,
    #[serde(rename = "updatedDate")]
    pub updated_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<String>,
    #[serde(
        rename = "oldPricing",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub old_pricing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(
        rename = "checkoutUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub checkout_url: Option<String>,
    #[serde(rename = "heroImage", default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
}

impl StoreRecord {
    /// Front-matter keys this schema reads.
    pub const FIELDS: &'static [&'static str] = &[
        "title",
        "description",
        "custom_link_label",
        "custom_link",
        "updatedDate",
        "pricing",
        "oldPricing",
        "badge",
        "checkoutUrl",
        "heroImage",
    ];

    /// Check a raw record against the store schema.
    pub fn from_raw(raw: &RawRecord) -> Result<Self, ValidationFailure> {
        let mut fields = FieldChecker::new(raw);

        let title = fields.required_str("title");
        let description = fields.required_str("description");
        let custom_link_label = fields.required_str("custom_link_label");
        let custom_link = fields.optional_str("custom_link");
        let updated_date = fields.required_date("updatedDate");
        let pricing = fields.optional_str("pricing");
        let old_pricing = fields.optional_str("oldPricing");
        let badge = fields.optional_str("badge");
        let checkout_url = fields.optional_str("checkoutUrl");
        let hero_image = fields.optional_str("heroImage");

        let record = (|| {
            Some(Self {
                title: title?,
                description: description?,
                custom_link_label: custom_link_label?,
                custom_link: custom_link.ok()?,
                updated_date: updated_date?,
                pricing: pricing.ok()?,
                old_pricing: old_pricing.ok()?,
                badge: badge.ok()?,
                checkout_url: checkout_url.ok()?,
                hero_image: hero_image.ok()?,
            })
        })();

        fields.finish(Collection::Store, record)
    }

    /// Where the entry's call to action points, if anywhere.
    pub fn link(&self) -> Option<&str> {
        self.checkout_url
            .as_deref()
            .or(self.custom_link.as_deref())
    }
}

/// A validated record of either collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Project(ProjectRecord),
    Store(StoreRecord),
}

impl Record {
    /// The collection this record was validated against.
    pub fn collection(&self) -> Collection {
        match self {
            Self::Project(_) => Collection::Projects,
            Self::Store(_) => Collection::Store,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Project(p) => &p.title,
            Self::Store(s) => &s.title,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Project(p) => &p.description,
            Self::Store(s) => &s.description,
        }
    }

    pub fn updated_date(&self) -> DateTime<Utc> {
        match self {
            Self::Project(p) => p.updated_date,
            Self::Store(s) => s.updated_date,
        }
    }

    pub fn as_project(&self) -> Option<&ProjectRecord> {
        match self {
            Self::Project(p) => Some(p),
            Self::Store(_) => None,
        }
    }

    pub fn as_store(&self) -> Option<&StoreRecord> {
        match self {
            Self::Store(s) => Some(s),
            Self::Project(_) => None,
        }
    }
}
