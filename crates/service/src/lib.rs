//! Service layer providing the car registry's business operations on top of models.
//! - Separates uniqueness/not-found policy from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Storage is reached only through the `CarRepository` trait.

pub mod errors;
pub mod car;
#[cfg(test)]
pub mod test_support;
