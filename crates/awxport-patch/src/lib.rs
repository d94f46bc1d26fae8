//! Awxport Patch
//!
//! Servers older than AWX 10.0.0 export records that newer servers cannot
//! import cleanly. The patches in this crate run on an export namespace just
//! before it is serialized and fill in what the old server left out:
//!
//! - [`patch_job_template_organization`] restores the organization in the
//!   natural key of a job template, inferred from its project or inventory.
//! - [`patch_workflow_node_identifier`] gives a workflow job template node a
//!   stable identifier derived from its numeric id.
//!
//! Exporters call [`patch_missing`] once per exported resource, and
//! [`patch_natural_key`] on the natural key of each related resource they
//! embed. Both walk an ordered [`PatchSet`].

mod error;
mod identifier;
mod logger;
mod organization;
mod patch_set;

pub use error::PatchError;
pub use identifier::{node_identifier, patch_workflow_node_identifier};
pub use logger::{PatchLogger, RecordingLogger, TracingLogger};
pub use organization::patch_job_template_organization;
pub use patch_set::{PatchEntry, PatchFn, PatchSet, patch_missing, patch_natural_key};

pub const JOB_TEMPLATE: &str = "job_template";
pub const UNIFIED_JOB_TEMPLATE: &str = "unified_job_template";
pub const WORKFLOW_JOB_TEMPLATE_NODE: &str = "workflow_job_template_node";
