//! Domain logic for the cabinet backend.
//!
//! Pure types and rules with no database or HTTP dependencies: the dossier
//! lifecycle model, trash (soft-delete) validation and retention, roles, and
//! the shared error type.

mod codes;
pub mod dossier;
pub mod error;
pub mod pagination;
pub mod roles;
pub mod trash;
pub mod types;
