use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ResourceError;
use crate::resource::{NaturalKey, Resource};

/// One resource as returned by the API, captured for offline use.
///
/// ```json
/// {
///   "id": 7, "type": "job_template", "url": "/api/v2/job_templates/7/",
///   "name": "Deploy", "project": 3,
///   "related": { "project": "/api/v2/projects/3/" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
  pub id: i64,
  #[serde(rename = "type")]
  pub resource_type: String,
  pub url: String,
  /// Relation name to the URL of another record. A `null` URL means unset.
  #[serde(default)]
  pub related: HashMap<String, Option<String>>,
  /// Explicit natural key. Derived from `type` and `name` when absent.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub natural_key: Option<Map<String, Value>>,
  #[serde(flatten)]
  pub fields: Map<String, Value>,
}

impl ResourceRecord {
  fn derived_natural_key(&self) -> NaturalKey {
    let mut key = Map::new();
    key.insert(
      "type".to_string(),
      Value::String(self.resource_type.clone()),
    );
    if let Some(name) = self.fields.get("name") {
      key.insert("name".to_string(), name.clone());
    }
    NaturalKey::new(key)
  }
}

/// An offline set of resource records, keyed by URL.
///
/// Relations between records are resolved by URL within the catalog, so a
/// snapshot must include every resource a patch may traverse to.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
  records: HashMap<String, ResourceRecord>,
}

impl Catalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Build a catalog, rejecting records that share a URL.
  pub fn from_records(
    records: impl IntoIterator<Item = ResourceRecord>,
  ) -> Result<Self, ResourceError> {
    let mut catalog = Self::new();
    for record in records {
      catalog.insert(record)?;
    }
    Ok(catalog)
  }

  /// Parse a JSON array of records.
  pub fn from_json_str(content: &str) -> Result<Self, ResourceError> {
    let records: Vec<ResourceRecord> = serde_json::from_str(content)?;
    Self::from_records(records)
  }

  pub fn from_value(value: Value) -> Result<Self, ResourceError> {
    let records: Vec<ResourceRecord> = serde_json::from_value(value)?;
    Self::from_records(records)
  }

  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ResourceError> {
    let content = std::fs::read_to_string(path)?;
    Self::from_json_str(&content)
  }

  pub fn insert(&mut self, record: ResourceRecord) -> Result<(), ResourceError> {
    if record.url.is_empty() {
      return Err(ResourceError::InvalidRecord {
        message: format!("{} {} has an empty url", record.resource_type, record.id),
      });
    }
    if self.records.contains_key(&record.url) {
      return Err(ResourceError::InvalidRecord {
        message: format!("duplicate url: {}", record.url),
      });
    }
    self.records.insert(record.url.clone(), record);
    Ok(())
  }

  /// Get a resource view by URL.
  pub fn get(&self, url: &str) -> Result<CatalogResource<'_>, ResourceError> {
    self
      .records
      .get(url)
      .map(|record| CatalogResource {
        catalog: self,
        record,
      })
      .ok_or_else(|| ResourceError::NotFound(url.to_string()))
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }
}

/// A [`Resource`] backed by a record in a [`Catalog`].
#[derive(Debug, Clone, Copy)]
pub struct CatalogResource<'a> {
  catalog: &'a Catalog,
  record: &'a ResourceRecord,
}

impl CatalogResource<'_> {
  pub fn record(&self) -> &ResourceRecord {
    self.record
  }
}

impl Resource for CatalogResource<'_> {
  fn resource_type(&self) -> &str {
    &self.record.resource_type
  }

  fn id(&self) -> i64 {
    self.record.id
  }

  fn url(&self) -> &str {
    &self.record.url
  }

  fn field(&self, name: &str) -> Option<&Value> {
    self.record.fields.get(name)
  }

  fn get_related(&self, name: &str) -> Result<Box<dyn Resource + '_>, ResourceError> {
    let url = self
      .record
      .related
      .get(name)
      .and_then(|url| url.as_deref())
      .ok_or_else(|| ResourceError::RelatedNotFound {
        url: self.record.url.clone(),
        relation: name.to_string(),
      })?;

    Ok(Box::new(self.catalog.get(url)?))
  }

  fn natural_key(&self) -> Result<NaturalKey, ResourceError> {
    Ok(match &self.record.natural_key {
      Some(key) => NaturalKey::new(key.clone()),
      None => self.record.derived_natural_key(),
    })
  }
}
