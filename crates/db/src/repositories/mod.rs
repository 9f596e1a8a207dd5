//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod apartment_repo;
pub mod partner_repo;
pub mod project_repo;
pub mod translation_repo;

pub use apartment_repo::ApartmentRepo;
pub use partner_repo::PartnerRepo;
pub use project_repo::ProjectRepo;
pub use translation_repo::TranslationRepo;
