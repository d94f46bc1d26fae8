use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
  #[error("resource not found: {0}")]
  NotFound(String),

  #[error("resource {url} has no related '{relation}'")]
  RelatedNotFound { url: String, relation: String },

  #[error("invalid resource record: {message}")]
  InvalidRecord { message: String },

  #[error("failed to parse resources: {0}")]
  Json(#[from] serde_json::Error),

  #[error("failed to read resources: {0}")]
  Io(#[from] std::io::Error),
}
