pub mod controller;
pub mod error;
pub mod models;
pub mod source;
pub mod state;
pub mod view;

pub use controller::FetchController;
pub use error::FetchError;
pub use models::Course;
pub use source::{CourseSource, HttpCourseSource, SourceConfig};
pub use state::{CourseStore, FetchState};
