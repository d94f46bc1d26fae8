use awxport_resource::{Namespace, Resource};
use serde_json::Value;

use crate::error::PatchError;
use crate::logger::PatchLogger;
use crate::{JOB_TEMPLATE, UNIFIED_JOB_TEMPLATE};

/// Restore the organization in a job template's natural key.
///
/// Before AWX 10.0.0, a workflow job template node referenced its unified job
/// template without the organization, and the node was imported as
/// "Deleted". The organization is taken from the template's project, or from
/// its inventory when it has no project.
///
/// A template with neither is logged at error level and left as is. Errors
/// are only returned when the resource client fails a lookup.
pub fn patch_job_template_organization(
  resource: &dyn Resource,
  namespace: &mut Namespace,
  logger: &dyn PatchLogger,
) -> Result<(), PatchError> {
  if namespace.contains_key("organization") {
    return Ok(());
  }

  if !matches!(resource.resource_type(), JOB_TEMPLATE | UNIFIED_JOB_TEMPLATE) {
    return Ok(());
  }

  let related = if resource.is_set("project") {
    resource.get_related("project")?
  } else if resource.is_set("inventory") {
    resource.get_related("inventory")?
  } else {
    logger.error(&format!(
      "Could not infer the organization for: {}",
      resource.url()
    ));
    return Ok(());
  };

  let organization = related.get_related("organization")?;
  namespace.insert(
    "organization".to_string(),
    Value::from(organization.natural_key()?),
  );

  logger.warn(&format!("Patched {}", Value::Object(namespace.clone())));
  Ok(())
}
