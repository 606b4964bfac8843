pub mod bbox;
pub mod collision;
