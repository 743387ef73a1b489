use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use services::{Clock, TodoService, TodoServiceError};
use storage::repository::InMemoryRepository;
use workout_core::model::{
    Priority, SortOrder, TodoDraft, TodoFilter, TodoPatch, TodoQuery, TodoSortBy,
};
use workout_core::time::fixed_now;

fn service_at(clock: Clock, repo: &InMemoryRepository) -> TodoService {
    TodoService::new(clock, Arc::new(repo.clone()))
}

#[tokio::test]
async fn buy_mat_scenario() {
    let repo = InMemoryRepository::new();
    let service = service_at(Clock::fixed(fixed_now()), &repo);

    let todo = service.create(TodoDraft::titled("Buy mat")).await.unwrap();
    assert_eq!(todo.priority, Priority::Medium);
    assert!(!todo.completed);

    let toggled = service.toggle_complete(todo.id).await.unwrap();
    assert!(toggled.completed);

    let completed = service
        .get_all(TodoQuery::filtered(TodoFilter::Completed))
        .await
        .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].title, "Buy mat");

    assert_eq!(service.delete_completed().await.unwrap(), 1);
    assert!(service.get_all(TodoQuery::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn filters_hold_under_every_sort() {
    let repo = InMemoryRepository::new();
    let mut clock = Clock::fixed(fixed_now());

    let specs = [
        ("Stretch", Priority::Low, NaiveDate::from_ymd_opt(2024, 5, 3)),
        ("Book physio", Priority::High, None),
        ("Buy chalk", Priority::Medium, NaiveDate::from_ymd_opt(2024, 5, 1)),
        ("Foam roll", Priority::Low, None),
    ];
    for (title, priority, due_date) in specs {
        service_at(clock, &repo)
            .create(TodoDraft {
                title: title.into(),
                description: None,
                priority,
                due_date,
            })
            .await
            .unwrap();
        clock.advance(Duration::minutes(1));
    }

    let service = service_at(clock, &repo);
    let all = service.get_all(TodoQuery::default()).await.unwrap();
    service.toggle_complete(all[0].id).await.unwrap();
    service.toggle_complete(all[2].id).await.unwrap();

    for sort_by in [TodoSortBy::CreatedAt, TodoSortBy::DueDate, TodoSortBy::Priority] {
        for sort_order in [SortOrder::Asc, SortOrder::Desc] {
            let query = |filter| TodoQuery {
                filter,
                sort_by,
                sort_order,
            };
            let active = service.get_all(query(TodoFilter::Active)).await.unwrap();
            let done = service.get_all(query(TodoFilter::Completed)).await.unwrap();
            let every = service.get_all(query(TodoFilter::All)).await.unwrap();

            assert!(active.iter().all(|t| !t.completed));
            assert!(done.iter().all(|t| t.completed));
            assert_eq!(active.len(), 2);
            assert_eq!(done.len(), 2);
            assert_eq!(every.len(), 4);
        }
    }

    let by_priority = service
        .get_all(TodoQuery {
            filter: TodoFilter::All,
            sort_by: TodoSortBy::Priority,
            sort_order: SortOrder::Desc,
        })
        .await
        .unwrap();
    assert_eq!(by_priority[0].title, "Book physio");
    assert_eq!(by_priority[3].priority, Priority::Low);

    let stats = service.stats().await.unwrap();
    assert_eq!((stats.remaining, stats.total), (2, 4));
}

#[tokio::test]
async fn update_validates_and_stamps() {
    let repo = InMemoryRepository::new();
    let service = service_at(Clock::fixed(fixed_now()), &repo);
    let todo = service.create(TodoDraft::titled("Plan week")).await.unwrap();
    assert_eq!(todo.updated_at, None);

    let err = service
        .update(
            todo.id,
            TodoPatch {
                title: Some("   ".into()),
                ..TodoPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TodoServiceError::Validation(_)));

    let due = NaiveDate::from_ymd_opt(2024, 7, 1);
    let updated = service
        .update(
            todo.id,
            TodoPatch {
                title: Some(" Plan next week ".into()),
                due_date: due,
                ..TodoPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Plan next week");
    assert_eq!(updated.due_date, due);
    assert_eq!(updated.updated_at, Some(fixed_now()));
    assert_eq!(
        service.get_by_id(todo.id).await.unwrap().as_ref(),
        Some(&updated)
    );
}
