//! Patches driven through a hand-written `Resource`, the way an API client
//! would plug in, rather than through the offline catalog.

use std::cell::Cell;
use std::collections::HashMap;

use awxport_patch::{
  PatchError, RecordingLogger, node_identifier, patch_job_template_organization, patch_missing,
};
use awxport_resource::{Namespace, NaturalKey, Resource, ResourceError};
use serde_json::{Map, Value, json};
use tracing::Level;

struct StubResource {
  resource_type: &'static str,
  id: i64,
  url: String,
  fields: Map<String, Value>,
  related: HashMap<&'static str, StubResource>,
  related_calls: Cell<u32>,
}

impl StubResource {
  fn new(resource_type: &'static str, id: i64) -> Self {
    Self {
      resource_type,
      id,
      url: format!("/api/v2/{}/{}/", resource_type, id),
      fields: Map::new(),
      related: HashMap::new(),
      related_calls: Cell::new(0),
    }
  }

  fn with_field(mut self, name: &str, value: Value) -> Self {
    self.fields.insert(name.to_string(), value);
    self
  }

  fn with_related(mut self, name: &'static str, resource: StubResource) -> Self {
    self.related.insert(name, resource);
    self
  }
}

impl Resource for StubResource {
  fn resource_type(&self) -> &str {
    self.resource_type
  }

  fn id(&self) -> i64 {
    self.id
  }

  fn url(&self) -> &str {
    &self.url
  }

  fn field(&self, name: &str) -> Option<&Value> {
    self.fields.get(name)
  }

  fn get_related(&self, name: &str) -> Result<Box<dyn Resource + '_>, ResourceError> {
    self.related_calls.set(self.related_calls.get() + 1);
    self
      .related
      .get(name)
      .map(|r| Box::new(r) as Box<dyn Resource + '_>)
      .ok_or_else(|| ResourceError::RelatedNotFound {
        url: self.url.clone(),
        relation: name.to_string(),
      })
  }

  fn natural_key(&self) -> Result<NaturalKey, ResourceError> {
    let mut key = Map::new();
    key.insert("type".to_string(), json!(self.resource_type));
    if let Some(name) = self.fields.get("name") {
      key.insert("name".to_string(), name.clone());
    }
    Ok(NaturalKey::new(key))
  }
}

impl Resource for &StubResource {
  fn resource_type(&self) -> &str {
    (**self).resource_type()
  }

  fn id(&self) -> i64 {
    (**self).id()
  }

  fn url(&self) -> &str {
    (**self).url()
  }

  fn field(&self, name: &str) -> Option<&Value> {
    (**self).field(name)
  }

  fn get_related(&self, name: &str) -> Result<Box<dyn Resource + '_>, ResourceError> {
    (**self).get_related(name)
  }

  fn natural_key(&self) -> Result<NaturalKey, ResourceError> {
    (**self).natural_key()
  }
}

fn organization(id: i64, name: &str) -> StubResource {
  StubResource::new("organization", id).with_field("name", json!(name))
}

#[test]
fn test_project_preferred_over_inventory() {
  let template = StubResource::new("job_template", 10)
    .with_field("project", json!(4))
    .with_field("inventory", json!(6))
    .with_related(
      "project",
      StubResource::new("project", 4).with_related("organization", organization(1, "Engineering")),
    )
    .with_related(
      "inventory",
      StubResource::new("inventory", 6).with_related("organization", organization(2, "Operations")),
    );

  let mut namespace = Namespace::new();
  patch_job_template_organization(&template, &mut namespace, &RecordingLogger::new()).unwrap();

  assert_eq!(
    namespace["organization"],
    json!({"type": "organization", "name": "Engineering"})
  );
  assert_eq!(template.related["inventory"].related_calls.get(), 0);
}

#[test]
fn test_unresolvable_organization_is_returned() {
  let template = StubResource::new("unified_job_template", 10)
    .with_field("inventory", json!(6))
    .with_related("inventory", StubResource::new("inventory", 6));
  let logger = RecordingLogger::new();

  let mut namespace = Namespace::new();
  let err = patch_job_template_organization(&template, &mut namespace, &logger).unwrap_err();

  match err {
    PatchError::Resource(ResourceError::RelatedNotFound { url, relation }) => {
      assert_eq!(url, "/api/v2/inventory/6/");
      assert_eq!(relation, "organization");
    }
    other => panic!("unexpected error: {}", other),
  }
  assert!(namespace.is_empty());
  assert!(logger.messages(Level::WARN).is_empty());
}

#[test]
fn test_no_references_never_touches_client() {
  let template = StubResource::new("job_template", 10)
    .with_field("project", Value::Null)
    .with_field("inventory", json!(""));
  let logger = RecordingLogger::new();

  let mut namespace = Namespace::new();
  patch_job_template_organization(&template, &mut namespace, &logger).unwrap();

  assert!(namespace.is_empty());
  assert_eq!(template.related_calls.get(), 0);
  assert_eq!(
    logger.messages(Level::ERROR),
    vec!["Could not infer the organization for: /api/v2/job_template/10/".to_string()]
  );
}

#[test]
fn test_patch_missing_through_client() {
  let node = StubResource::new("workflow_job_template_node", 42);

  let mut fields = Namespace::new();
  fields.insert("extra_data".to_string(), json!({}));
  patch_missing(&node, &mut fields, &RecordingLogger::new()).unwrap();

  assert_eq!(fields["identifier"], json!(node_identifier(42).to_string()));
  assert_eq!(fields["extra_data"], json!({}));
}

#[test]
fn test_patch_missing_leaves_templates_alone() {
  let template = StubResource::new("job_template", 10).with_field("project", json!(4));

  let mut fields = Namespace::new();
  patch_missing(&template, &mut fields, &RecordingLogger::new()).unwrap();

  assert!(fields.is_empty());
  assert_eq!(template.related_calls.get(), 0);
}
