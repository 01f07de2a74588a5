//! Domain models and request/response types

pub mod enums;
pub mod equipment;
pub mod history;
pub mod holder;
pub mod loan;
