//! Persistence layer: one repository trait per aggregate, backed by SeaORM.

pub(crate) mod base;
pub mod entities;

mod consultation_repository;
mod department_repository;
mod emergency_repository;
mod linkable;
mod medication_repository;
mod patient_repository;
mod staff_repository;
mod user_repository;
mod warehouse_repository;

pub use base::DbHandle;
pub use consultation_repository::*;
pub use department_repository::*;
pub use emergency_repository::*;
pub use linkable::*;
pub use medication_repository::*;
pub use patient_repository::*;
pub use staff_repository::*;
pub use user_repository::*;
pub use warehouse_repository::*;
