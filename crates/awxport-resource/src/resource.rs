use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ResourceError;

/// The subset of a resource's fields selected for export, keyed by field name.
///
/// Owned by the exporter and mutated in place by the patches.
pub type Namespace = Map<String, Value>;

/// Identity of a resource that does not depend on its numeric id.
///
/// Natural keys are what an import matches on, so they must survive a move
/// between servers. The contents are opaque to the patches; they are only
/// copied into a namespace.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NaturalKey(Map<String, Value>);

impl NaturalKey {
  pub fn new(fields: Map<String, Value>) -> Self {
    Self(fields)
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    self.0.get(key)
  }

  pub fn as_map_mut(&mut self) -> &mut Map<String, Value> {
    &mut self.0
  }
}

impl From<NaturalKey> for Value {
  fn from(key: NaturalKey) -> Self {
    Value::Object(key.0)
  }
}

/// A record served by the AWX API, as seen through the REST client.
pub trait Resource {
  /// The API type tag, e.g. `job_template` or `workflow_job_template_node`.
  fn resource_type(&self) -> &str;

  fn id(&self) -> i64;

  fn url(&self) -> &str;

  /// Look up a field by key. `None` when the record has no such field.
  fn field(&self, name: &str) -> Option<&Value>;

  /// Follow a named relation (`project`, `inventory`, `organization`, ...).
  ///
  /// Returns [`ResourceError::RelatedNotFound`] when the relation is unset.
  fn get_related(&self, name: &str) -> Result<Box<dyn Resource + '_>, ResourceError>;

  fn natural_key(&self) -> Result<NaturalKey, ResourceError>;

  /// Whether the field exists and holds a truthy value.
  fn is_set(&self, name: &str) -> bool {
    self.field(name).is_some_and(is_truthy)
  }
}

/// JSON truthiness as the API client treats field values.
///
/// `null`, `false`, zero, the empty string and empty containers are falsy.
pub fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(a) => !a.is_empty(),
    Value::Object(o) => !o.is_empty(),
  }
}
