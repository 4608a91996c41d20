pub mod add;
pub mod edit;
pub mod form;
pub mod list;

pub use add::AddCourseView;
pub use edit::EditCourseView;
pub use form::{CourseForm, FormField};
pub use list::{CourseListView, DELETE_PROMPT};
