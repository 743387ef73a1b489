use dioxus::prelude::*;
use dioxus_router::use_navigator;
use workout_core::model::{ProgramId, WorkoutDayId};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource, workout_view_error};
use crate::vm::{DayCardVm, ProgramHeaderVm, ProgramOptionVm, map_day_cards, map_program_options};

#[derive(Clone, Debug, PartialEq)]
struct WorkoutListData {
    programs: Vec<ProgramOptionVm>,
    header: Option<ProgramHeaderVm>,
    days: Vec<DayCardVm>,
}

#[component]
pub fn WorkoutListView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let workouts = ctx.workouts();
    let selected = use_signal(|| ctx.program_id());
    let action_error = use_signal(|| None::<ViewError>);

    let resource = {
        let workouts = workouts.clone();
        use_resource(move || {
            let workouts = workouts.clone();
            let preferred = selected();
            async move {
                let programs = workouts
                    .get_programs()
                    .await
                    .map_err(|e| workout_view_error("load programs", &e))?;
                let Some(program) = workouts
                    .resolve_program(preferred)
                    .await
                    .map_err(|e| workout_view_error("resolve program", &e))?
                else {
                    return Ok(WorkoutListData {
                        programs: Vec::new(),
                        header: None,
                        days: Vec::new(),
                    });
                };
                let overviews = workouts
                    .day_overviews(program.id)
                    .await
                    .map_err(|e| workout_view_error("load days", &e))?;
                Ok::<_, ViewError>(WorkoutListData {
                    programs: map_program_options(&programs, program.id),
                    header: Some(ProgramHeaderVm::from(&program)),
                    days: map_day_cards(&overviews),
                })
            }
        })
    };
    let state = view_state_from_resource(resource);

    let on_start = use_callback(move |day_id: WorkoutDayId| {
        let workouts = workouts.clone();
        let mut action_error = action_error;
        spawn(async move {
            match workouts.get_or_create_session(day_id).await {
                Ok(session) => {
                    action_error.set(None);
                    navigator.push(Route::Workout {
                        session_id: session.id.value(),
                    });
                }
                Err(err) => {
                    action_error.set(Some(workout_view_error("start workout", &err)));
                }
            }
        });
    });

    let on_program_change = use_callback(move |raw: String| {
        let mut selected = selected;
        if let Ok(id) = raw.parse::<ProgramId>() {
            selected.set(id);
        }
    });

    rsx! {
        div { class: "page workout-list",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading workouts..." }
                },
                ViewState::Ready(data) => rsx! {
                    if let Some(program) = data.header {
                        header { class: "program-header",
                            h2 { "{program.name}" }
                            if let Some(duration) = program.duration {
                                span { class: "program-duration", "{duration}" }
                            }
                            if let Some(description) = program.description {
                                p { class: "program-description", "{description}" }
                            }
                        }
                    } else {
                        h2 { "Workouts" }
                        p { "No programs yet. Run the seed command to add one." }
                    }
                    if data.programs.len() > 1 {
                        select {
                            class: "program-select",
                            title: "Program",
                            onchange: move |evt| on_program_change.call(evt.value()),
                            for choice in data.programs {
                                option {
                                    value: "{choice.id}",
                                    selected: choice.selected,
                                    "{choice.name}"
                                }
                            }
                        }
                    }
                    if let Some(err) = action_error() {
                        p { class: "error", "{err.message()}" }
                    }
                    div { class: "day-grid",
                        for card in data.days {
                            DayCard { key: "{card.day_id}", card, on_start }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
            }
        }
    }
}

#[component]
fn DayCard(card: DayCardVm, on_start: EventHandler<WorkoutDayId>) -> Element {
    let day_id = card.day_id;
    rsx! {
        article { class: "day-card",
            div { class: "day-card-head",
                h3 { "{card.name}" }
                span { class: card.badge.class(), "{card.badge.label()}" }
            }
            if let Some(focus) = card.focus {
                p { class: "day-focus", "{focus}" }
            }
            if let Some(notes) = card.notes {
                p { class: "day-notes", "{notes}" }
            }
            p { class: "day-meta", "{card.exercise_count_label}" }
            if let Some(last) = card.last_completed {
                p { class: "day-meta", "{last}" }
            }
            button {
                class: "btn btn-primary",
                onclick: move |_| on_start.call(day_id),
                "Start Workout"
            }
        }
    }
}
