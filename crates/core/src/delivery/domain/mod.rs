pub mod result_payload;
pub mod sanitizer;
