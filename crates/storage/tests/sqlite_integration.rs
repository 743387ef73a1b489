use chrono::{Duration, NaiveDate};
use storage::repository::{
    NewSessionRecord, ProgramRepository, SessionRepository, SetRepository, StorageError,
    TodoRepository,
};
use storage::sqlite::SqliteRepository;
use workout_core::model::{
    ExerciseDraft, ExerciseId, Priority, ProgramDraft, SessionId, SessionStatus, SessionUpdate,
    SetEntry, SetKey, SortOrder, TodoDraft, TodoFilter, TodoQuery, TodoSortBy, WorkoutDayDraft,
    WorkoutDayId,
};
use workout_core::time::fixed_now;

async fn connect(name: &str) -> SqliteRepository {
    let repo = SqliteRepository::connect(&format!("sqlite:file:{name}?mode=memory&cache=shared"))
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

async fn seed_day(repo: &SqliteRepository) -> (WorkoutDayId, Vec<ExerciseId>) {
    let program = repo
        .insert_program(ProgramDraft {
            name: "STRONGHER Build".into(),
            description: None,
            duration: Some("6 weeks".into()),
        })
        .await
        .unwrap();
    let day = repo
        .insert_day(WorkoutDayDraft {
            program_id: program,
            name: "Day 1".into(),
            focus: Some("Posterior Chain Strength".into()),
            notes: Some("Glute + hamstring focus".into()),
            order: 1,
        })
        .await
        .unwrap();

    let mut exercises = Vec::new();
    for (order, (name, reps)) in [("Lat Pulldown", "10"), ("Barbell Romanian Deadlift", "8")]
        .into_iter()
        .enumerate()
    {
        let id = repo
            .insert_exercise(ExerciseDraft {
                day_id: day,
                name: name.into(),
                description: None,
                sets: 3,
                reps: reps.into(),
                // Inserted in reverse display order.
                order: 2 - u32::try_from(order).unwrap(),
                muscles_worked: None,
                how_to_do: None,
            })
            .await
            .unwrap();
        exercises.push(id);
    }
    (day, exercises)
}

#[tokio::test]
async fn sqlite_catalog_round_trip() {
    let repo = connect("memdb_catalog").await;
    let (day, _) = seed_day(&repo).await;

    let programs = repo.list_programs().await.unwrap();
    assert_eq!(programs.len(), 1);
    assert_eq!(programs[0].duration.as_deref(), Some("6 weeks"));
    assert!(
        repo.find_program_by_name("STRONGHER Build")
            .await
            .unwrap()
            .is_some()
    );

    let days = repo.list_days(programs[0].id).await.unwrap();
    assert_eq!(days[0].id, day);
    assert_eq!(days[0].notes.as_deref(), Some("Glute + hamstring focus"));

    let exercises = repo.list_exercises(day).await.unwrap();
    let names: Vec<_> = exercises.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Barbell Romanian Deadlift", "Lat Pulldown"]);
}

#[tokio::test]
async fn sqlite_session_lifecycle_and_history() {
    let repo = connect("memdb_sessions").await;
    let (day, _) = seed_day(&repo).await;

    let first = repo
        .insert_session(NewSessionRecord::in_progress(day, fixed_now()))
        .await
        .unwrap();
    assert_eq!(
        repo.find_in_progress(day).await.unwrap().map(|s| s.id),
        Some(first.id)
    );

    let finished_at = fixed_now() + Duration::minutes(50);
    let updated = repo
        .update_session(first.id, &SessionUpdate::completed(finished_at))
        .await
        .unwrap();
    assert_eq!(updated.status, SessionStatus::Completed);
    assert_eq!(updated.started_at, fixed_now());
    assert_eq!(updated.completed_at, Some(finished_at));
    assert!(repo.find_in_progress(day).await.unwrap().is_none());

    let second = repo
        .insert_session(NewSessionRecord::in_progress(day, fixed_now()))
        .await
        .unwrap();
    let history = repo.sessions_for_day(day).await.unwrap();
    let ids: Vec<_> = history.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    let err = repo
        .update_session(
            SessionId::new(999),
            &SessionUpdate::status(SessionStatus::InProgress),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn sqlite_set_upsert_and_last_performance() {
    let repo = connect("memdb_sets").await;
    let (day, exercises) = seed_day(&repo).await;
    let exercise = exercises[0];

    let session = repo
        .insert_session(NewSessionRecord::in_progress(day, fixed_now()))
        .await
        .unwrap();
    let key = SetKey::new(session.id, exercise, 1).unwrap();

    let inserted = repo
        .insert_completed_set(key, SetEntry::new(Some(40.0), Some(10)).unwrap(), fixed_now())
        .await
        .unwrap();
    let found = repo.find_set(key).await.unwrap().expect("set stored");
    assert_eq!(found.id, inserted.id);

    let later = fixed_now() + Duration::minutes(2);
    let updated = repo
        .complete_existing_set(inserted.id, SetEntry::new(Some(42.5), Some(8)).unwrap(), later)
        .await
        .unwrap();
    assert_eq!(updated.weight, Some(42.5));
    assert_eq!(updated.reps, Some(8));
    assert_eq!(updated.completed_at, Some(later));
    assert_eq!(repo.sets_for_session(session.id).await.unwrap().len(), 1);

    assert!(repo.last_performance(exercise).await.unwrap().is_none());

    repo.update_session(session.id, &SessionUpdate::completed(later))
        .await
        .unwrap();
    let last = repo.last_performance(exercise).await.unwrap().expect("last");
    assert_eq!(last.session_id, session.id);
    assert_eq!(last.weight, Some(42.5));
}

#[tokio::test]
async fn sqlite_todos_sort_filter_and_clear() {
    let repo = connect("memdb_todos").await;

    let specs = [
        ("Buy mat", Priority::Medium, NaiveDate::from_ymd_opt(2024, 6, 1)),
        ("Book physio", Priority::High, None),
        ("Stretch", Priority::Low, NaiveDate::from_ymd_opt(2024, 5, 1)),
    ];
    let mut ids = Vec::new();
    for (offset, (title, priority, due_date)) in specs.into_iter().enumerate() {
        let draft = TodoDraft {
            title: title.into(),
            description: None,
            priority,
            due_date,
        };
        let now = fixed_now() + Duration::minutes(i64::try_from(offset).unwrap());
        ids.push(repo.insert_todo(draft.validate(now).unwrap()).await.unwrap().id);
    }

    let by_priority = repo
        .list_todos(TodoQuery {
            filter: TodoFilter::All,
            sort_by: TodoSortBy::Priority,
            sort_order: SortOrder::Asc,
        })
        .await
        .unwrap();
    let titles: Vec<_> = by_priority.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Stretch", "Buy mat", "Book physio"]);

    let by_due = repo
        .list_todos(TodoQuery {
            filter: TodoFilter::All,
            sort_by: TodoSortBy::DueDate,
            sort_order: SortOrder::Asc,
        })
        .await
        .unwrap();
    let titles: Vec<_> = by_due.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Book physio", "Stretch", "Buy mat"]);

    let newest = repo.list_todos(TodoQuery::default()).await.unwrap();
    assert_eq!(newest[0].id, ids[2]);

    let mut todo = repo.get_todo(ids[0]).await.unwrap().expect("todo");
    todo.completed = true;
    todo.updated_at = Some(fixed_now());
    repo.save_todo(&todo).await.unwrap();

    let completed = repo
        .list_todos(TodoQuery::filtered(TodoFilter::Completed))
        .await
        .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].updated_at, Some(fixed_now()));
    assert_eq!(
        completed[0].due_date,
        NaiveDate::from_ymd_opt(2024, 6, 1)
    );

    assert_eq!(repo.delete_completed().await.unwrap(), 1);
    assert!(repo.get_todo(ids[0]).await.unwrap().is_none());
    assert!(repo.delete_todo(ids[1]).await.unwrap());
    assert!(!repo.delete_todo(ids[1]).await.unwrap());
    assert_eq!(repo.list_todos(TodoQuery::default()).await.unwrap().len(), 1);
}
