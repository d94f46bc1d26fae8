//! Identifiers for workflow job template nodes.
//!
//! AWX 10.0.0 added a unique `identifier` to workflow job template nodes and
//! made it part of the node's natural key. Nodes exported from older servers
//! have none, which breaks rebuilding the node sequence on import. The
//! identifier patched in here is derived from the node's numeric id so that
//! exporting the same node twice yields the same value.

use awxport_resource::{Namespace, Resource};
use md5::{Digest, Md5};
use serde_json::Value;
use uuid::Uuid;

/// Derive the identifier for the node with the given numeric id.
///
/// The MD5 digest of the id's decimal string is taken verbatim as the UUID's
/// 16 bytes. The input format is fixed: earlier exports used it, and an import
/// only matches nodes whose identifiers agree.
pub fn node_identifier(id: i64) -> Uuid {
  let digest = Md5::digest(id.to_string().as_bytes());
  let mut bytes = [0u8; 16];
  bytes.copy_from_slice(&digest);
  Uuid::from_bytes(bytes)
}

/// Insert a derived `identifier` into the namespace if it has none.
pub fn patch_workflow_node_identifier(resource: &dyn Resource, namespace: &mut Namespace) {
  if namespace.contains_key("identifier") {
    return;
  }

  let identifier = node_identifier(resource.id());
  namespace.insert(
    "identifier".to_string(),
    Value::String(identifier.hyphenated().to_string()),
  );
}
