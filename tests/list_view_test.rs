mod common;

use std::sync::Arc;

use course_tracker::models::CourseStatus;
use course_tracker::query::{SortKey, StatusFilter};
use course_tracker::session::UserContext;
use course_tracker::views::{CourseListView, DELETE_PROMPT};

use common::{FakeGateway, USER, course, three_courses};

fn list_view(gateway: &Arc<FakeGateway>) -> CourseListView {
    CourseListView::new(gateway.clone())
}

#[tokio::test]
async fn missing_user_shows_login_state_without_fetching() {
    let gateway = Arc::new(FakeGateway::with_courses(three_courses()));
    let mut view = list_view(&gateway);

    view.activate(&UserContext::anonymous()).await;

    assert!(view.requires_login());
    assert_eq!(view.fetch_error(), Some("Please log in to view your courses."));
    assert!(view.courses().is_empty());
    assert_eq!(FakeGateway::count(&gateway.list_calls), 0);
}

#[tokio::test]
async fn fetch_failure_uses_backend_message_or_fallback() {
    let gateway = Arc::new(FakeGateway::with_courses(three_courses()));
    gateway.fail_with(500, None);

    let mut view = list_view(&gateway);
    view.activate(&UserContext::new(USER)).await;
    assert_eq!(view.fetch_error(), Some("Failed to load courses."));
    assert!(view.courses().is_empty());

    gateway.fail_with(403, Some("Not authorized to view these courses"));
    view.reload().await;
    assert_eq!(view.fetch_error(), Some("Not authorized to view these courses"));

    gateway.recover();
    view.reload().await;
    assert_eq!(view.fetch_error(), None);
    assert_eq!(view.courses().len(), 3);
}

#[tokio::test]
async fn completed_filter_over_three_statuses_shows_one_row() {
    let gateway = Arc::new(FakeGateway::with_courses(three_courses()));
    let mut view = list_view(&gateway);
    view.activate(&UserContext::new(USER)).await;
    assert_eq!(view.rows().len(), 3);

    view.set_status_filter(StatusFilter::Only(CourseStatus::Completed));
    let rows = view.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].course_name, "Linear Algebra");
    assert_eq!(view.courses().len(), 3);
}

#[tokio::test]
async fn same_user_does_not_refetch() {
    let gateway = Arc::new(FakeGateway::with_courses(three_courses()));
    let mut view = list_view(&gateway);
    let user = UserContext::new(USER);

    view.activate(&user).await;
    view.activate(&user).await;
    assert_eq!(FakeGateway::count(&gateway.list_calls), 1);

    view.activate(&UserContext::new("someone-else")).await;
    assert_eq!(FakeGateway::count(&gateway.list_calls), 2);
    assert!(view.courses().is_empty());
}

#[tokio::test]
async fn confirmed_delete_removes_exactly_one_row() {
    let gateway = Arc::new(FakeGateway::with_courses(three_courses()));
    let mut view = list_view(&gateway);
    view.activate(&UserContext::new(USER)).await;

    let mut asked = None;
    let removed = view
        .delete("b2", |prompt| {
            asked = Some(prompt.to_string());
            true
        })
        .await;

    assert!(removed);
    assert_eq!(asked.as_deref(), Some(DELETE_PROMPT));
    assert_eq!(FakeGateway::count(&gateway.delete_calls), 1);
    assert_eq!(FakeGateway::count(&gateway.list_calls), 1);
    let ids: Vec<&str> = view.courses().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "c3"]);
}

#[tokio::test]
async fn declined_delete_issues_no_request() {
    let gateway = Arc::new(FakeGateway::with_courses(three_courses()));
    let mut view = list_view(&gateway);
    view.activate(&UserContext::new(USER)).await;

    assert!(!view.delete("b2", |_| false).await);
    assert_eq!(FakeGateway::count(&gateway.delete_calls), 0);
    assert_eq!(view.courses().len(), 3);
}

#[tokio::test]
async fn failed_delete_keeps_list_and_next_attempt_clears_error() {
    let gateway = Arc::new(FakeGateway::with_courses(three_courses()));
    let mut view = list_view(&gateway);
    view.activate(&UserContext::new(USER)).await;

    gateway.fail_with(500, None);
    assert!(!view.delete("a1", |_| true).await);
    assert_eq!(view.delete_error(), Some("Failed to delete course."));
    assert_eq!(view.courses().len(), 3);

    gateway.recover();
    assert!(view.delete("a1", |_| true).await);
    assert_eq!(view.delete_error(), None);
    assert_eq!(view.courses().len(), 2);
}

#[tokio::test]
async fn sorting_by_date_keeps_dateless_rows_last() {
    let gateway = Arc::new(FakeGateway::with_courses(vec![
        course("x", "No Date", CourseStatus::Planned, None),
        course("y", "Early", CourseStatus::Completed, Some("2022-01-01")),
        course("z", "Late", CourseStatus::Completed, Some("2024-01-01")),
    ]));
    let mut view = list_view(&gateway);
    view.activate(&UserContext::new(USER)).await;

    view.set_sort_key(SortKey::CompletionDate);
    let names: Vec<String> = view.rows().into_iter().map(|r| r.course_name).collect();
    assert_eq!(names, vec!["Early", "Late", "No Date"]);

    assert!(view.toggle_sort_direction());
    let names: Vec<String> = view.rows().into_iter().map(|r| r.course_name).collect();
    assert_eq!(names, vec!["Late", "Early", "No Date"]);
}
