use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::Link;
use services::UpdateSessionRequest;
use workout_core::model::{SessionId, SessionStatus};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource, workout_view_error};
use crate::vm::{
    ExerciseCardState, ExerciseCardVm, RestTimer, SessionScreenVm, TickOutcome, TimerPhase,
    map_session_screen, next_exercise_index,
};

#[component]
pub fn WorkoutSessionView(session_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let workouts = ctx.workouts();
    let session_id = SessionId::new(session_id);

    let screen = use_signal(|| None::<SessionScreenVm>);
    let timer = use_signal(RestTimer::default);
    let focused = use_signal(|| 0_usize);
    let resumed = use_signal(|| false);
    let action_error = use_signal(|| None::<ViewError>);

    let resource = {
        let workouts = workouts.clone();
        use_resource(move || {
            let workouts = workouts.clone();
            let mut screen = screen;
            let mut resumed = resumed;
            async move {
                let mut overview = workouts
                    .session_overview(session_id)
                    .await
                    .map_err(|e| workout_view_error("load session", &e))?;

                // Opening an unfinished session marks it in progress once.
                if !*resumed.peek() && !overview.session.is_completed() {
                    overview.session = workouts
                        .update_session(UpdateSessionRequest {
                            session_id,
                            status: SessionStatus::InProgress,
                            started_at: Some(overview.session.started_at),
                            completed_at: None,
                        })
                        .await
                        .map_err(|e| workout_view_error("resume session", &e))?;
                    resumed.set(true);
                }

                let mut last = Vec::with_capacity(overview.exercises.len());
                for exercise in &overview.exercises {
                    if let Some(perf) = workouts
                        .get_last_completed_session(exercise.id)
                        .await
                        .map_err(|e| workout_view_error("load last performance", &e))?
                    {
                        last.push((exercise.id, perf));
                    }
                }

                screen.set(Some(map_session_screen(&overview, &last)));
                Ok::<_, ViewError>(())
            }
        })
    };
    let state = view_state_from_resource(resource);

    use_future(move || {
        let mut timer = timer;
        let mut focused = focused;
        async move {
            loop {
                tokio::time::sleep(Duration::from_secs(1)).await;
                if !timer.peek().is_running() {
                    continue;
                }
                let outcome = timer.write().tick();
                if outcome == TickOutcome::Finished {
                    let total = screen.peek().as_ref().map_or(0, |s| s.cards.len());
                    let next = next_exercise_index(*focused.peek(), total);
                    focused.set(next);
                }
            }
        }
    });

    use_effect(move || {
        let index = focused();
        let js = format!(
            "document.getElementById('exercise-{index}')?.scrollIntoView({{behavior: 'smooth', block: 'start'}});"
        );
        let _ = document::eval(&js);
    });

    let on_set_complete = use_callback(move |()| {
        let mut timer = timer;
        let mut resource = resource;
        timer.write().start();
        resource.restart();
    });

    let on_focus = use_callback(move |index: usize| {
        let mut focused = focused;
        if *focused.peek() != index {
            focused.set(index);
        }
    });

    let on_toggle_timer = use_callback(move |()| {
        let mut timer = timer;
        timer.write().toggle_pause();
    });

    let on_stop_timer = use_callback(move |()| {
        let mut timer = timer;
        timer.write().stop();
    });

    let on_finish = use_callback(move |()| {
        let workouts = workouts.clone();
        let mut action_error = action_error;
        let mut resource = resource;
        let mut timer = timer;
        spawn(async move {
            match workouts.finish_session(session_id).await {
                Ok(_) => {
                    action_error.set(None);
                    timer.write().stop();
                    resource.restart();
                }
                Err(err) => {
                    action_error.set(Some(workout_view_error("finish workout", &err)));
                }
            }
        });
    });

    let load_error = match state {
        ViewState::Error(err) => Some(err),
        ViewState::Idle | ViewState::Loading | ViewState::Ready(()) => None,
    };
    let focused_index = focused();

    rsx! {
        div { class: "page workout-session",
            RestTimerBar {
                timer: timer(),
                on_toggle: on_toggle_timer,
                on_stop: on_stop_timer,
            }

            match screen() {
                Some(SessionScreenVm { header: heading, cards }) => rsx! {
                    header { class: "session-header",
                        Link { class: "back-link", to: Route::Home {}, "Back to Workouts" }
                        h2 { "{heading.title}" }
                        p { class: "session-summary", "{heading.summary}" }
                        div { class: "progress-track",
                            div { class: "progress-fill", style: "width: {heading.percent}%" }
                        }
                    }
                    if let Some(err) = load_error.or(action_error()) {
                        p { class: "error", "{err.message()}" }
                    }
                    div { class: "exercise-list",
                        for (index, card) in cards.into_iter().enumerate() {
                            ExerciseCard {
                                key: "{card.exercise_id}",
                                card,
                                index,
                                session_id: session_id.value(),
                                focused: index == focused_index,
                                readonly: heading.finished,
                                on_set_complete,
                                on_focus,
                            }
                        }
                    }
                    if heading.can_finish() {
                        div { class: "session-complete",
                            h3 { "Every exercise is done" }
                            button {
                                class: "btn btn-primary",
                                onclick: move |_| on_finish.call(()),
                                "Finish Workout"
                            }
                        }
                    }
                    if heading.finished {
                        div { class: "session-complete",
                            h3 { "Workout Complete!" }
                            p { "Incredible work. Another step toward your strength goals." }
                            Link { class: "btn btn-primary", to: Route::Home {}, "Back to Workouts" }
                        }
                    }
                },
                None => rsx! {
                    if let Some(err) = load_error {
                        p { class: "error", "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            onclick: move |_| {
                                let mut resource = resource;
                                resource.restart();
                            },
                            "Retry"
                        }
                        Link { class: "back-link", to: Route::Home {}, "Back to Workouts" }
                    } else {
                        p { "Loading your workout..." }
                    }
                },
            }
        }
    }
}

#[component]
fn RestTimerBar(timer: RestTimer, on_toggle: EventHandler<()>, on_stop: EventHandler<()>) -> Element {
    if !timer.is_active() {
        return rsx! {};
    }
    let pause_label = if timer.phase() == TimerPhase::Paused {
        "Resume"
    } else {
        "Pause"
    };

    rsx! {
        div { class: "rest-timer",
            div { class: "rest-timer-row",
                span { class: "rest-timer-clock", "{timer.display()}" }
                span { class: "rest-timer-label", "Rest Timer" }
                button {
                    class: "btn btn-secondary",
                    title: pause_label,
                    onclick: move |_| on_toggle.call(()),
                    "{pause_label}"
                }
                button {
                    class: "btn btn-secondary",
                    title: "Stop Timer",
                    onclick: move |_| on_stop.call(()),
                    "Stop"
                }
            }
            div { class: "progress-track",
                div { class: "progress-fill", style: "width: {timer.progress_percent()}%" }
            }
        }
    }
}

#[component]
fn ExerciseCard(
    card: ExerciseCardVm,
    index: usize,
    session_id: u64,
    focused: bool,
    readonly: bool,
    on_set_complete: EventHandler<()>,
    on_focus: EventHandler<usize>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let workouts = ctx.workouts();
    let session_id = SessionId::new(session_id);
    let state = use_signal(|| ExerciseCardState::new(&card));
    let saving = use_signal(|| false);
    let error = use_signal(|| None::<ViewError>);

    let submit = use_callback(move |()| {
        if *saving.peek() {
            return;
        }
        let Some(request) = state.peek().request(session_id) else {
            return;
        };
        let workouts = workouts.clone();
        let mut state = state;
        let mut saving = saving;
        let mut error = error;
        saving.set(true);
        spawn(async move {
            match workouts.complete_set(request).await {
                Ok(_) => {
                    state.write().advance();
                    error.set(None);
                    on_set_complete.call(());
                }
                Err(err) => {
                    error.set(Some(workout_view_error("complete set", &err)));
                }
            }
            saving.set(false);
        });
    });

    let current = state();
    let is_saving = saving();
    let card_class = if focused {
        "exercise-card focused"
    } else {
        "exercise-card"
    };
    let instructions_label = if current.show_instructions {
        "Hide instructions"
    } else {
        "Instructions"
    };

    rsx! {
        article {
            id: "exercise-{index}",
            class: card_class,
            onclick: move |_| on_focus.call(index),
            div { class: "exercise-head",
                div {
                    h3 { "{card.name}" }
                    span { class: "exercise-prescription", "{card.prescription}" }
                    span { class: "exercise-order", "{card.order_label}" }
                }
                if card.has_instructions() {
                    button {
                        class: "btn btn-link",
                        onclick: move |_| {
                            let mut state = state;
                            state.write().toggle_instructions();
                        },
                        "{instructions_label}"
                    }
                }
            }

            if current.show_instructions {
                div { class: "instructions",
                    if let Some(how) = card.how_to_do.clone() {
                        h4 { "How to do it:" }
                        p { "{how}" }
                    }
                    if let Some(muscles) = card.muscles_worked.clone() {
                        h4 { "Muscles worked:" }
                        p { "{muscles}" }
                    }
                }
            }

            if let Some(last) = card.last_label.clone() {
                p { class: "last-performance", "{last}" }
            }

            div { class: "sets-progress",
                div { class: "sets-progress-head",
                    span { "Sets Progress" }
                    span { "{card.progress_label}" }
                }
                div { class: "set-grid",
                    for slot in card.slots.clone() {
                        div {
                            key: "{slot.number}",
                            class: slot.class(),
                            div { "Set {slot.number}" }
                            if let Some(ref weight) = slot.weight_label {
                                div { "{weight}" }
                            }
                            if let Some(ref reps) = slot.reps_label {
                                div { "{reps}" }
                            }
                        }
                    }
                }
            }

            if !readonly {
                if current.is_done() {
                    div { class: "exercise-complete",
                        h4 { "Exercise Complete!" }
                        p { "Great work! Ready for the next exercise." }
                    }
                } else {
                    div { class: "set-input",
                        h4 { "Set {current.current_set} of {current.total_sets}" }
                        label {
                            "Weight (kg)"
                            input {
                                r#type: "number",
                                min: "0",
                                step: "0.5",
                                placeholder: "0",
                                value: "{current.weight_input}",
                                oninput: move |evt| {
                                    let mut state = state;
                                    state.write().weight_input = evt.value();
                                },
                            }
                        }
                        label {
                            "Reps"
                            input {
                                r#type: "number",
                                min: "0",
                                placeholder: "0",
                                value: "{current.reps_input}",
                                oninput: move |evt| {
                                    let mut state = state;
                                    state.write().reps_input = evt.value();
                                },
                            }
                        }
                        button {
                            class: "btn btn-accent",
                            disabled: !current.can_submit() || is_saving,
                            onclick: move |_| submit.call(()),
                            if is_saving { "Saving..." } else { "Mark Set Complete" }
                        }
                        if let Some(err) = error() {
                            p { class: "error", "{err.message()}" }
                        }
                    }
                }
            }
        }
    }
}
