pub mod course;

pub use course::{CoursePayload, CourseStatus, TrackedCourse};
