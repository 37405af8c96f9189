pub mod course;

pub use course::{Course, decode_courses};
