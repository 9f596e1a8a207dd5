//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - A `Deserialize` list-params struct for the paginated list endpoint

pub mod apartment;
pub mod partner;
pub mod project;
pub mod translation;
