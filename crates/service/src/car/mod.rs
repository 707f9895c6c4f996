//! Car registry: three-layer architecture (domain, repository, service).
//!
//! Handlers in the server crate validate input shapes, then call into `CarService`.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::CarService;
