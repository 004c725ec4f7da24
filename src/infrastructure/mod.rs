pub mod http;
pub mod markup;
