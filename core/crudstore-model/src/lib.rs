//! Entity model for crudstore.
//!
//! Defines the types every layer of the store agrees on:
//! - [`Entity`] — an id assigned by the store plus an opaque [`Fields`] object
//! - [`FieldValidator`] — the pluggable validation capability applied on writes
//! - [`ResourceSchema`] — a declarative validator built from [`FieldRule`]s
//!
//! The HTTP layer serializes these types directly, so their JSON shape is part
//! of the public contract.

mod entity;
mod schema;
mod validator;

pub use entity::{Entity, Fields};
pub use schema::{FieldRule, FieldType, ResourceSchema};
pub use validator::{AcceptAll, FieldValidator};
