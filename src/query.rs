//! Client-side filtering and sorting of the fetched course list.
//!
//! Everything here borrows from the source list and never reorders or
//! mutates it.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::{CourseStatus, TrackedCourse};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(CourseStatus),
}

impl StatusFilter {
    pub fn matches(self, course: &TrackedCourse) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => course.status == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("All"),
            StatusFilter::Only(status) => status.fmt(f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    None,
    CourseName,
    CompletionDate,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::None => "None",
            SortKey::CourseName => "Course Name",
            SortKey::CompletionDate => "Completion Date",
        })
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(SortKey::None),
            "name" | "coursename" => Ok(SortKey::CourseName),
            "date" | "completiondate" => Ok(SortKey::CompletionDate),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Ascending => "Ascending",
            SortDirection::Descending => "Descending",
        })
    }
}

/// The list view's filter and sort selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub status: StatusFilter,
    pub sort_key: SortKey,
    pub direction: SortDirection,
}

impl ListQuery {
    /// Flips the direction. Returns `false` (and does nothing) while no sort
    /// key is selected.
    pub fn toggle_direction(&mut self) -> bool {
        if self.sort_key == SortKey::None {
            return false;
        }
        self.direction = self.direction.toggled();
        true
    }

    /// Filters first, then sorts the surviving rows.
    pub fn apply<'a>(&self, courses: &'a [TrackedCourse]) -> Vec<&'a TrackedCourse> {
        let mut rows = filter_by_status(courses, self.status);
        sort_courses(&mut rows, self.sort_key, self.direction);
        rows
    }
}

pub fn filter_by_status(courses: &[TrackedCourse], filter: StatusFilter) -> Vec<&TrackedCourse> {
    courses.iter().filter(|c| filter.matches(c)).collect()
}

/// Stable sort. Courses without a completion date always end up last.
pub fn sort_courses(rows: &mut [&TrackedCourse], key: SortKey, direction: SortDirection) {
    match key {
        SortKey::None => {}
        SortKey::CourseName => rows.sort_by(|a, b| {
            direction.orient(
                a.course_name
                    .to_lowercase()
                    .cmp(&b.course_name.to_lowercase()),
            )
        }),
        SortKey::CompletionDate => {
            rows.sort_by(|a, b| match (a.completion_date, b.completion_date) {
                (Some(x), Some(y)) => direction.orient(x.cmp(&y)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
        }
    }
}
