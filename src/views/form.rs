use std::fmt;
use std::str::FromStr;

use crate::error::AppError;
use crate::models::course::calendar_date;
use crate::models::{CoursePayload, CourseStatus, TrackedCourse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    CourseName,
    Status,
    Instructor,
    CompletionDate,
    CertificateLink,
    Progress,
    Notes,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::CourseName,
        FormField::Status,
        FormField::Instructor,
        FormField::CompletionDate,
        FormField::CertificateLink,
        FormField::Progress,
        FormField::Notes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::CourseName => "Course Name",
            FormField::Status => "Status",
            FormField::Instructor => "Instructor (Optional)",
            FormField::CompletionDate => "Completion Date (Optional)",
            FormField::CertificateLink => "Certificate Link (Optional)",
            FormField::Progress => "Progress (%)",
            FormField::Notes => "Notes (Optional)",
        }
    }

    fn key(self) -> &'static str {
        match self {
            FormField::CourseName => "name",
            FormField::Status => "status",
            FormField::Instructor => "instructor",
            FormField::CompletionDate => "date",
            FormField::CertificateLink => "certificate",
            FormField::Progress => "progress",
            FormField::Notes => "notes",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let alias = match wanted.as_str() {
            "coursename" => "name",
            "completiondate" => "date",
            "certificatelink" | "cert" => "certificate",
            other => other,
        };
        FormField::ALL
            .into_iter()
            .find(|field| field.key() == alias)
            .ok_or_else(|| format!("Unknown field: {}", s.trim()))
    }
}

/// Raw input of the add/edit form, kept the way the user typed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseForm {
    pub course_name: String,
    pub status: CourseStatus,
    pub instructor: String,
    pub completion_date: String,
    pub certificate_link: String,
    pub progress: String,
    pub notes: String,
}

impl Default for CourseForm {
    fn default() -> Self {
        Self {
            course_name: String::new(),
            status: CourseStatus::default(),
            instructor: String::new(),
            completion_date: String::new(),
            certificate_link: String::new(),
            progress: "0".to_string(),
            notes: String::new(),
        }
    }
}

impl CourseForm {
    /// Pre-fills the form from a stored record; absent values become empty.
    pub fn from_course(course: &TrackedCourse) -> Self {
        Self {
            course_name: course.course_name.clone(),
            status: course.status,
            instructor: course.instructor.clone().unwrap_or_default(),
            completion_date: course
                .completion_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            certificate_link: course.certificate_link.clone().unwrap_or_default(),
            progress: course.progress.to_string(),
            notes: course.notes.clone().unwrap_or_default(),
        }
    }

    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) -> Result<(), AppError> {
        let value = value.into();
        match field {
            FormField::CourseName => self.course_name = value,
            FormField::Status => {
                self.status = value.parse().map_err(AppError::Validation)?;
            }
            FormField::Instructor => self.instructor = value,
            FormField::CompletionDate => self.completion_date = value,
            FormField::CertificateLink => self.certificate_link = value,
            FormField::Progress => self.progress = value,
            FormField::Notes => self.notes = value,
        }
        Ok(())
    }

    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::CourseName => self.course_name.clone(),
            FormField::Status => self.status.to_string(),
            FormField::Instructor => self.instructor.clone(),
            FormField::CompletionDate => self.completion_date.clone(),
            FormField::CertificateLink => self.certificate_link.clone(),
            FormField::Progress => self.progress.clone(),
            FormField::Notes => self.notes.clone(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validates the input and builds the wire payload for `user_id`.
    /// Nothing is sent unless this succeeds.
    pub fn to_payload(&self, user_id: &str) -> Result<CoursePayload, AppError> {
        let course_name = self.course_name.trim();
        if course_name.is_empty() {
            return Err(AppError::Validation("Course Name is required.".to_string()));
        }

        let progress: i64 = self
            .progress
            .trim()
            .parse()
            .map_err(|_| AppError::Validation("Progress must be a whole number.".to_string()))?;
        let progress = u8::try_from(progress)
            .ok()
            .filter(|p| *p <= 100)
            .ok_or_else(|| {
                AppError::Validation("Progress must be between 0 and 100.".to_string())
            })?;

        let completion_date = match self.completion_date.trim() {
            "" => None,
            raw => Some(calendar_date::parse(raw).ok_or_else(|| {
                AppError::Validation(
                    "Completion date must be a valid date (YYYY-MM-DD).".to_string(),
                )
            })?),
        };

        Ok(CoursePayload {
            user_id: user_id.to_string(),
            course_name: course_name.to_string(),
            status: self.status,
            instructor: optional(&self.instructor),
            completion_date,
            certificate_link: optional(&self.certificate_link),
            progress,
            notes: optional(&self.notes),
        })
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
