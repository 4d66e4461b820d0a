//! HTTP handlers, one module per aggregate.

pub mod auth_handler;
pub mod consultation_handler;
pub mod department_handler;
pub mod emergency_handler;
pub mod health_handler;
pub mod medication_handler;
pub mod patient_handler;
pub mod staff_handler;
pub mod usage_handler;
pub mod warehouse_handler;

pub use auth_handler::{account_routes, auth_routes};
pub use consultation_handler::{
    consultation_derivation_routes, consultation_referral_routes, derivation_routes,
    referral_routes,
};
pub use department_handler::{department_routes, external_post_routes};
pub use emergency_handler::{emergency_care_routes, emergency_room_routes};
pub use health_handler::health_routes;
pub use medication_handler::{medication_routes, stock_routes};
pub use patient_handler::patient_routes;
pub use staff_handler::{
    department_head_routes, doctor_routes, nurse_routes, warehouse_manager_routes,
};
pub use usage_handler::medication_usage_routes;
pub use warehouse_handler::warehouse_request_routes;
