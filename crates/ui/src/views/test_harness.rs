use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{Clock, TodoService, WorkoutService, seed_default_program};
use storage::repository::{Storage, TodoRepository};
use workout_core::model::{ProgramId, SessionId};
use workout_core::time::fixed_now;

use crate::context::{UiApp, build_app_context};
use crate::views::{TodosView, WorkoutListView, WorkoutSessionView};

#[derive(Clone)]
struct TestApp {
    program_id: ProgramId,
    workouts: Arc<WorkoutService>,
    todos: Arc<TodoService>,
}

impl UiApp for TestApp {
    fn program_id(&self) -> ProgramId {
        self.program_id
    }

    fn workouts(&self) -> Arc<WorkoutService> {
        Arc::clone(&self.workouts)
    }

    fn todos(&self) -> Arc<TodoService> {
        Arc::clone(&self.todos)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    WorkoutList,
    Session(SessionId),
    Todos,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::WorkoutList => rsx! { WorkoutListView {} },
        ViewKind::Session(session_id) => rsx! { WorkoutSessionView { session_id: session_id.value() } },
        ViewKind::Todos => rsx! { TodosView {} },
    }
}

/// Seeded services plus a `VirtualDom` rendering one view.
///
/// Build state through the services first, then call `settle` and `render`.
pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub program_id: ProgramId,
    pub workouts: Arc<WorkoutService>,
    pub todos: Arc<TodoService>,
}

impl ViewHarness {
    pub fn mount(&mut self, view: ViewKind) {
        let app = Arc::new(TestApp {
            program_id: self.program_id,
            workouts: Arc::clone(&self.workouts),
            todos: Arc::clone(&self.todos),
        });
        self.dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Let resources resolve and dependent renders run.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    /// Start a session on the program's first day.
    pub async fn start_first_day(&self) -> SessionId {
        let days = self
            .workouts
            .get_workout_days(self.program_id)
            .await
            .expect("days");
        self.workouts
            .get_or_create_session(days[0].id)
            .await
            .expect("session")
            .id
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness() -> ViewHarness {
    let storage = Storage::in_memory();
    let todos = Arc::clone(&storage.todos);
    setup_view_harness_with_todo_repo(storage, todos).await
}

pub async fn setup_view_harness_with_todo_repo(
    storage: Storage,
    todo_repo: Arc<dyn TodoRepository>,
) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let program_id = seed_default_program(storage.programs.as_ref())
        .await
        .expect("seed program")
        .program_id();
    let workouts = Arc::new(WorkoutService::from_storage(clock, &storage));
    let todos = Arc::new(TodoService::new(clock, todo_repo));

    ViewHarness {
        dom: VirtualDom::new(|| rsx! {}),
        storage,
        program_id,
        workouts,
        todos,
    }
}
