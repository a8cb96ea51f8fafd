//! Storedash Core - Shared domain library.
//!
//! This crate provides the types every Storedash component agrees on:
//! - `admin` - The dashboard server and per-store REST API
//! - `client` - Typed HTTP client for the REST API
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types, validation and descriptors - no I/O,
//! no database access, no HTTP clients. This keeps it lightweight and allows
//! the same validation schema to run in the server and in the client before
//! a request is ever sent.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, owner identities, prices and colors
//! - [`entities`] - Persisted records as exposed by the REST API
//! - [`inputs`] - Write payloads and their validated forms
//! - [`validation`] - Field rules and error collection
//! - [`resource`] - Entity descriptors (paths, labels, messages, API docs)
//! - [`forms`] - Form and delete-confirmation state machines

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod entities;
pub mod forms;
pub mod inputs;
pub mod resource;
pub mod types;
pub mod validation;

pub use entities::*;
pub use forms::{DeleteFlow, FormFlow, FormMode, FormState, FlowError, Notice};
pub use inputs::*;
pub use resource::{
    ApiAccess, ApiRoute, GENERIC_ERROR_MESSAGE, ResourceKind, STORE_CONFLICT_MESSAGE, UnknownResource,
    api_routes,
};
pub use types::*;
pub use validation::{
    Constraint, FieldError, FieldSpec, NumberInput, Validate, ValidationErrors, Validator,
};
