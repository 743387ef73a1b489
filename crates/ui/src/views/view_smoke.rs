use std::sync::Arc;

use services::CompleteSetRequest;
use storage::repository::{Storage, StorageError, TodoRepository};
use workout_core::model::{NewTodo, SessionStatus, Todo, TodoDraft, TodoId, TodoQuery};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_todo_repo};

#[tokio::test(flavor = "current_thread")]
async fn workout_list_smoke_renders_day_cards() {
    let mut harness = setup_view_harness().await;
    harness.mount(ViewKind::WorkoutList);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("STRONGHER Build"), "missing program in {html}");
    assert!(html.contains("Day 1"), "missing day in {html}");
    assert!(html.contains("Bonus Day"), "missing bonus day in {html}");
    assert!(html.contains("Ready"), "missing badge in {html}");
    assert!(html.contains("Start Workout"), "missing start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn workout_list_smoke_marks_finished_day() {
    let mut harness = setup_view_harness().await;
    let session_id = harness.start_first_day().await;
    harness
        .workouts
        .finish_session(session_id)
        .await
        .expect("finish");

    harness.mount(ViewKind::WorkoutList);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Completed"), "missing completed badge in {html}");
    assert!(
        html.contains("Last completed: Nov 14, 2023"),
        "missing last completed date in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn session_view_smoke_renders_progress_and_cards() {
    let mut harness = setup_view_harness().await;
    let session_id = harness.start_first_day().await;

    harness.mount(ViewKind::Session(session_id));
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("0 of 5 exercises completed"),
        "missing progress in {html}"
    );
    assert!(
        html.contains("Barbell Romanian Deadlift"),
        "missing exercise in {html}"
    );
    assert!(html.contains("Set 1 of 3"), "missing set input in {html}");
    assert!(!html.contains("Finish Workout"), "finish shown early in {html}");

    let session = harness
        .storage
        .sessions
        .get_session(session_id)
        .await
        .expect("read session")
        .expect("session exists");
    assert_eq!(session.status, SessionStatus::InProgress);
}

#[tokio::test(flavor = "current_thread")]
async fn session_view_smoke_offers_finish_when_all_sets_done() {
    let mut harness = setup_view_harness().await;
    let session_id = harness.start_first_day().await;
    let exercises = harness
        .workouts
        .get_session_exercises(session_id)
        .await
        .expect("exercises");
    for exercise in &exercises {
        for set_number in exercise.set_numbers() {
            harness
                .workouts
                .complete_set(CompleteSetRequest {
                    session_id,
                    exercise_id: exercise.id,
                    set_number,
                    weight: Some(20.0),
                    reps: Some(8),
                })
                .await
                .expect("complete set");
        }
    }

    harness.mount(ViewKind::Session(session_id));
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("5 of 5 exercises completed"),
        "missing progress in {html}"
    );
    assert!(html.contains("Finish Workout"), "missing finish in {html}");
    assert!(html.contains("20 kg"), "missing set weight in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn todos_view_smoke_renders_items_and_stats() {
    let mut harness = setup_view_harness().await;
    let first = harness
        .todos
        .create(TodoDraft::titled("Buy mat"))
        .await
        .expect("create");
    harness
        .todos
        .create(TodoDraft::titled("Book physio"))
        .await
        .expect("create");
    harness
        .todos
        .toggle_complete(first.id)
        .await
        .expect("toggle");

    harness.mount(ViewKind::Todos);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Buy mat"), "missing todo in {html}");
    assert!(html.contains("Book physio"), "missing todo in {html}");
    assert!(
        html.contains("1 of 2 tasks remaining"),
        "missing stats in {html}"
    );
    assert!(html.contains("Clear Completed"), "missing clear in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn todos_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness().await;
    harness.mount(ViewKind::Todos);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("No todos yet"), "missing empty state in {html}");
    assert!(!html.contains("Clear Completed"), "unexpected clear in {html}");
}

struct FailingTodoRepo;

#[async_trait::async_trait]
impl TodoRepository for FailingTodoRepo {
    async fn insert_todo(&self, _todo: NewTodo) -> Result<Todo, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_todo(&self, _id: TodoId) -> Result<Option<Todo>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_todos(&self, _query: TodoQuery) -> Result<Vec<Todo>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn save_todo(&self, _todo: &Todo) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn delete_todo(&self, _id: TodoId) -> Result<bool, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn delete_completed(&self) -> Result<u64, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn todos_view_smoke_renders_error_state() {
    let mut harness =
        setup_view_harness_with_todo_repo(Storage::in_memory(), Arc::new(FailingTodoRepo)).await;
    harness.mount(ViewKind::Todos);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}
