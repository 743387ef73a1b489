use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{TodosView, WorkoutListView, WorkoutSessionView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", WorkoutListView)] Home {},
        #[route("/workout/:session_id", WorkoutSessionView)] Workout { session_id: u64 },
        #[route("/todos", TodosView)] Todos {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Workout" }
            ul {
                li { Link { to: Route::Home {}, "Workouts" } }
                li { Link { to: Route::Todos {}, "Todos" } }
            }
        }
    }
}
