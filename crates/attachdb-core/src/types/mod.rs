//! Core types shared across the crate
//!
//! This module contains the API kinds and the persisted account descriptor.

mod api;
mod descriptor;

pub use api::{ApiKind, Experience};
pub use descriptor::AccountDescriptor;
