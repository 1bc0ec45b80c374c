//! Business logic layer
//!
//! Name resolution and the reconciling services built on top of it.

pub mod services;
