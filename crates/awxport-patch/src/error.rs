use awxport_resource::ResourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatchError {
  /// The resource client could not answer a lookup the patch needed.
  #[error("resource lookup failed: {0}")]
  Resource(#[from] ResourceError),
}
