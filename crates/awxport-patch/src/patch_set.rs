use awxport_resource::{Namespace, NaturalKey, Resource};

use crate::error::PatchError;
use crate::identifier::patch_workflow_node_identifier;
use crate::logger::PatchLogger;
use crate::organization::patch_job_template_organization;
use crate::{JOB_TEMPLATE, UNIFIED_JOB_TEMPLATE, WORKFLOW_JOB_TEMPLATE_NODE};

/// Signature shared by every entry in a [`PatchSet`].
pub type PatchFn =
  fn(&dyn Resource, &mut Namespace, &dyn PatchLogger) -> Result<(), PatchError>;

/// A patch and the resource types it applies to.
#[derive(Clone, Copy)]
pub struct PatchEntry {
  pub name: &'static str,
  pub applies_to: fn(&str) -> bool,
  pub patch: PatchFn,
}

impl std::fmt::Debug for PatchEntry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PatchEntry").field("name", &self.name).finish()
  }
}

/// An ordered table of patches.
///
/// [`PatchSet::apply`] runs, in table order, every entry whose predicate
/// accepts the resource's type.
#[derive(Debug, Clone, Default)]
pub struct PatchSet {
  entries: Vec<PatchEntry>,
}

impl PatchSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Patches for the namespace of an exported resource.
  pub fn missing_fields() -> Self {
    Self::new().with(PatchEntry {
      name: "workflow_node_identifier",
      applies_to: |t| t == WORKFLOW_JOB_TEMPLATE_NODE,
      patch: workflow_node_identifier,
    })
  }

  /// Patches for the natural key of a related resource embedded in an export.
  pub fn natural_keys() -> Self {
    Self::new().with(PatchEntry {
      name: "job_template_organization",
      applies_to: |t| t == JOB_TEMPLATE || t == UNIFIED_JOB_TEMPLATE,
      patch: patch_job_template_organization,
    })
  }

  /// Append an entry after the existing ones.
  pub fn with(mut self, entry: PatchEntry) -> Self {
    self.entries.push(entry);
    self
  }

  pub fn entries(&self) -> &[PatchEntry] {
    &self.entries
  }

  pub fn apply(
    &self,
    resource: &dyn Resource,
    namespace: &mut Namespace,
    logger: &dyn PatchLogger,
  ) -> Result<(), PatchError> {
    let resource_type = resource.resource_type();
    for entry in self.entries.iter().filter(|e| (e.applies_to)(resource_type)) {
      tracing::debug!(
        patch = entry.name,
        resource_type,
        url = resource.url(),
        "applying patch"
      );
      (entry.patch)(resource, namespace, logger)?;
    }
    Ok(())
  }
}

fn workflow_node_identifier(
  resource: &dyn Resource,
  namespace: &mut Namespace,
  _logger: &dyn PatchLogger,
) -> Result<(), PatchError> {
  patch_workflow_node_identifier(resource, namespace);
  Ok(())
}

/// Patch fields missing from a resource exported by an older server.
pub fn patch_missing(
  resource: &dyn Resource,
  fields_to_export: &mut Namespace,
  logger: &dyn PatchLogger,
) -> Result<(), PatchError> {
  PatchSet::missing_fields().apply(resource, fields_to_export, logger)
}

/// Patch the natural key of a related resource before it is embedded.
pub fn patch_natural_key(
  resource: &dyn Resource,
  natural_key: &mut NaturalKey,
  logger: &dyn PatchLogger,
) -> Result<(), PatchError> {
  PatchSet::natural_keys().apply(resource, natural_key.as_map_mut(), logger)
}
