pub mod error_mapper;
pub mod literal_address;

pub use error_mapper::ErrorMapper;
pub use literal_address::{parse_literal, strip_brackets};
