pub mod entities;
pub mod tokens;
pub mod value_objects;
