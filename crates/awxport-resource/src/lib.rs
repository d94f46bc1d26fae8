//! Awxport Resource
//!
//! This crate defines how the export patches see the AWX REST client: a
//! [`Resource`] is a server-backed record with a type tag, an id, a URL, keyed
//! fields and named relations to other resources. The client itself lives
//! elsewhere; anything that can answer those questions can be patched.
//!
//! It also ships [`Catalog`], an offline set of resource records loaded from
//! JSON, so exports can be patched from a saved snapshot without a server.

mod catalog;
mod error;
mod resource;

pub use catalog::{Catalog, CatalogResource, ResourceRecord};
pub use error::ResourceError;
pub use resource::{Namespace, NaturalKey, Resource, is_truthy};
