//! # Postboard Core
//!
//! The domain layer of the Postboard API.
//! This crate contains the Post entity, the store ports and the Post Service,
//! with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError};
pub use service::PostService;
