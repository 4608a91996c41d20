//! Presentation helpers: row view-models and plain-text rendering of the
//! three pages.

use std::fmt::{self, Write};

use crate::models::{CourseStatus, TrackedCourse};
use crate::query::SortKey;
use crate::views::form::{CourseForm, FormField};
use crate::views::{AddCourseView, CourseListView, EditCourseView};

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressDisplay {
    /// Proportional bar, shown for ongoing courses.
    Bar(u8),
    Percent(u8),
}

impl ProgressDisplay {
    pub fn for_course(course: &TrackedCourse) -> Self {
        let progress = course.progress.min(100);
        match course.status {
            CourseStatus::Ongoing => ProgressDisplay::Bar(progress),
            _ => ProgressDisplay::Percent(progress),
        }
    }
}

impl fmt::Display for ProgressDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ProgressDisplay::Bar(progress) => {
                let filled = usize::from(progress) * BAR_WIDTH / 100;
                write!(
                    f,
                    "[{}{}] {}%",
                    "#".repeat(filled),
                    ".".repeat(BAR_WIDTH - filled),
                    progress
                )
            }
            ProgressDisplay::Percent(progress) => write!(f, "{}%", progress),
        }
    }
}

/// Outbound link for a stored certificate value. Values without an http(s)
/// scheme get `http://` prepended; the record itself is left untouched.
pub fn certificate_href(link: &str) -> String {
    let link = link.trim();
    if link.starts_with("http://") || link.starts_with("https://") {
        link.to_string()
    } else {
        format!("http://{}", link)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRow {
    pub id: String,
    pub course_name: String,
    pub status: CourseStatus,
    pub completion_date: String,
    pub progress: ProgressDisplay,
    pub edit_path: String,
    pub certificate_href: Option<String>,
}

impl CourseRow {
    pub fn from_course(course: &TrackedCourse) -> Self {
        Self {
            id: course.id.clone(),
            course_name: course.course_name.clone(),
            status: course.status,
            completion_date: course
                .completion_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
            progress: ProgressDisplay::for_course(course),
            edit_path: format!("/edit-tracked/{}", course.id),
            certificate_href: course
                .certificate_link
                .as_deref()
                .filter(|link| !link.trim().is_empty())
                .map(certificate_href),
        }
    }
}

pub fn render_list(view: &CourseListView) -> String {
    let mut out = String::new();
    let query = view.query();

    let _ = writeln!(out, "== My Tracked Courses ==");
    let _ = write!(out, "Filter by Status: {} | Sort by: {}", query.status, query.sort_key);
    if query.sort_key != SortKey::None {
        let _ = write!(out, " ({})", query.direction);
    }
    out.push('\n');

    if let Some(err) = view.fetch_error() {
        let _ = writeln!(out, "! {}", err);
    }
    if let Some(err) = view.delete_error() {
        let _ = writeln!(out, "! {}", err);
    }

    let rows = view.rows();
    if rows.is_empty() {
        if !view.requires_login() && view.fetch_error().is_none() {
            let _ = writeln!(out, "(no courses)");
        }
        return out;
    }

    let _ = writeln!(
        out,
        "{:>3}  {:<32} {:<10} {:<12} {:<28} Actions",
        "#", "Course Name", "Status", "Completed", "Progress"
    );
    for (index, row) in rows.iter().enumerate() {
        let mut actions = format!("edit: {}", row.edit_path);
        if let Some(href) = &row.certificate_href {
            let _ = write!(actions, " | certificate: {}", href);
        }
        let _ = writeln!(
            out,
            "{:>3}  {:<32} {:<10} {:<12} {:<28} {}",
            index + 1,
            row.course_name,
            row.status,
            row.completion_date,
            row.progress.to_string(),
            actions
        );
    }
    out
}

pub fn render_add(view: &AddCourseView) -> String {
    let mut out = String::from("== Add New Tracked Course ==\n");
    push_banners(&mut out, view.message(), view.error());
    push_form(&mut out, view.form());
    out
}

pub fn render_edit(view: &EditCourseView) -> String {
    let mut out = String::from("== Edit Tracked Course ==\n");
    if let Some(err) = view.load_error() {
        let _ = writeln!(out, "! {}", err);
    }
    push_banners(&mut out, view.message(), view.error());
    if let Some(form) = view.form() {
        push_form(&mut out, form);
    }
    out
}

fn push_banners(out: &mut String, message: Option<&str>, error: Option<&str>) {
    if let Some(message) = message {
        let _ = writeln!(out, "* {}", message);
    }
    if let Some(error) = error {
        let _ = writeln!(out, "! {}", error);
    }
}

fn push_form(out: &mut String, form: &CourseForm) {
    for field in FormField::ALL {
        let _ = writeln!(out, "  {:<28} [{}] {}", field.label(), field, form.value(field));
    }
}
