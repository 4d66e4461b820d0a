//! SeaORM entities, one module per table.
//!
//! Each module converts its `Model` into the matching domain type and the
//! domain type back into an `ActiveModel`.

pub mod consultation_derivation;
pub mod consultation_referral;
pub mod department;
pub mod department_head;
pub mod derivation;
pub mod doctor;
pub mod emergency_room;
pub mod emergency_room_care;
pub mod external_post;
pub mod medication;
pub mod medication_derivation;
pub mod medication_emergency;
pub mod medication_referral;
pub mod medication_request;
pub mod nurse;
pub mod patient;
pub mod referral;
pub mod stock_department;
pub mod user;
pub mod user_role;
pub mod warehouse_manager;
pub mod warehouse_request;
