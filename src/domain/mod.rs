pub mod campaign;
pub mod error;
pub mod import;
pub mod recipient;
pub mod segment;
pub mod table;
