//! Business services. Each service owns its validation and talks to
//! persistence only through the [`UnitOfWork`](crate::infra::UnitOfWork).

mod consultation_service;
mod department_service;
mod emergency_service;
mod lookup;
mod medication_service;
mod patient_service;
mod staff_service;
mod warehouse_service;

pub use consultation_service::*;
pub use department_service::*;
pub use emergency_service::*;
pub use medication_service::*;
pub use patient_service::*;
pub use staff_service::*;
pub use warehouse_service::*;
