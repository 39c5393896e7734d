pub mod inventory;
pub mod reference;
