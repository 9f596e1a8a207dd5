pub mod apartment;
pub mod partner;
pub mod project;
pub mod translation;
