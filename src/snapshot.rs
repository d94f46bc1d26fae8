use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use awxport_patch::{PatchLogger, patch_missing, patch_natural_key};
use awxport_resource::{Catalog, CatalogResource, Namespace, NaturalKey, Resource, ResourceRecord};
use serde_json::Value;

/// A saved export: the resources it was taken from and the namespaces about
/// to be written.
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
  pub resources: Vec<ResourceRecord>,
  #[serde(default)]
  pub exports: Vec<ExportEntry>,
}

/// The export namespace of the resource at `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportEntry {
  pub url: String,
  pub fields: Namespace,
}

impl Snapshot {
  pub fn from_path(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("failed to read snapshot: {}", path.display()))?;
    serde_json::from_str(&content)
      .with_context(|| format!("failed to parse snapshot: {}", path.display()))
  }

  /// Apply the missing-field patches to every export entry, in order, then
  /// patch the natural keys the entry embeds for its related resources.
  pub fn patch(self, logger: &dyn PatchLogger) -> Result<Vec<ExportEntry>> {
    let catalog = Catalog::from_records(self.resources).context("invalid snapshot resources")?;

    let mut exports = self.exports;
    for entry in &mut exports {
      let resource = catalog
        .get(&entry.url)
        .with_context(|| format!("export entry refers to unknown resource: {}", entry.url))?;
      patch_missing(&resource, &mut entry.fields, logger)
        .with_context(|| format!("failed to patch {}", entry.url))?;
      patch_related_keys(&resource, &mut entry.fields, logger)
        .with_context(|| format!("failed to patch related keys of {}", entry.url))?;
    }

    Ok(exports)
  }
}

/// Patch every exported field that holds the natural key of a set relation.
fn patch_related_keys(
  resource: &CatalogResource<'_>,
  fields: &mut Namespace,
  logger: &dyn PatchLogger,
) -> Result<()> {
  let related = &resource.record().related;
  let relations: Vec<String> = fields
    .iter()
    .filter(|(name, value)| {
      value.is_object() && related.get(name.as_str()).is_some_and(|url| url.is_some())
    })
    .map(|(name, _)| name.clone())
    .collect();

  for name in relations {
    let target = resource.get_related(&name)?;
    let Some(Value::Object(key)) = fields.get_mut(&name) else {
      continue;
    };

    let mut natural_key = NaturalKey::new(std::mem::take(key));
    let result = patch_natural_key(&*target, &mut natural_key, logger);
    fields.insert(name.clone(), Value::from(natural_key));
    result.with_context(|| format!("failed to patch natural key '{}'", name))?;
  }

  Ok(())
}
