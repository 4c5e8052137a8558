//! Student lessons: the assigned list and the exercise player.
//!
//! SYSTEM CONTEXT
//! ==============
//! The list shows every lesson assigned to the signed-in student with its
//! completion and best score. Opening one mounts [`LessonPlayer`], which
//! drives a `flows::LessonSession` against the student service. The list
//! reloads as soon as a lesson completes, and again when the player closes,
//! so a finished lesson shows its new score.
//!
//! DESIGN
//! ======
//! The session lives in a signal. Commands are performed one at a time on
//! the local executor and their outcome is applied back with `try_update`,
//! so no borrow of the session is held across an await. Leaving the player
//! closes its scope; a response or timer landing afterwards is dropped.

#[cfg(test)]
#[path = "lessons_test.rs"]
mod lessons_test;

use flows::lesson::{self, ApiLessonPort, Command, Event, LessonPort, LessonSession, Phase};
use flows::{Route, ViewScope, search};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wire::RequestError;
use wire::types::StudentLesson;

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::page_header::PageHeader;
use crate::components::search_box::SearchBox;
use crate::net::api::api_from;
use crate::state::config::ConfigState;
use crate::state::notice::NoticeState;
use crate::state::session::SessionState;
use crate::util::scope::{sleep, spawn_browser, view_scope};

pub(crate) fn status_label(lesson: &StudentLesson) -> String {
    if lesson.completed {
        format!("Completed - score {}", lesson.score)
    } else if lesson.score > 0 {
        format!("In progress - score {}", lesson.score)
    } else {
        "Not started".to_owned()
    }
}

pub(crate) fn completion_message(title: &str, score: i64) -> String {
    format!("Finished \"{title}\" with a score of {score}")
}

pub(crate) fn feedback_message(phase: Phase) -> Option<&'static str> {
    match phase {
        Phase::CorrectFeedback => Some("Correct!"),
        Phase::WrongFeedback { exhausted: false } => Some("Not quite. Try again."),
        Phase::WrongFeedback { exhausted: true } => Some("Out of attempts. Moving on..."),
        Phase::Loading | Phase::Active | Phase::Finished => None,
    }
}

#[component]
pub fn LessonsPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let config = expect_context::<RwSignal<ConfigState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    crate::util::auth::install_route_guard(Route::Lessons, session, use_navigate());
    let scope = view_scope();

    let lessons = RwSignal::new(None::<Vec<StudentLesson>>);
    let term = RwSignal::new(String::new());
    let playing = RwSignal::new(None::<StudentLesson>);
    let generation = RwSignal::new(0_u32);

    Effect::new(move || {
        generation.track();
        if !config.get().loaded {
            return;
        }
        let Some(student_id) = session.get().user_id() else {
            return;
        };
        let scope = scope.clone();
        spawn_browser(async move {
            match scope.run(api_from(config).student().lessons(student_id)).await {
                Some(Ok(list)) => lessons.set(Some(list)),
                Some(Err(error)) => notices.update(|n| n.failed("Could not load lessons", &error)),
                None => {}
            }
        });
    });

    let last_result = RwSignal::new(None::<(String, i64)>);
    let on_complete = Callback::new(move |score: i64| {
        if let Some(lesson) = playing.get_untracked() {
            last_result.set(Some((lesson.title, score)));
        }
        generation.update(|g| *g += 1);
    });
    let on_exit = Callback::new(move |()| {
        playing.set(None);
        generation.update(|g| *g += 1);
    });

    let cards = move || {
        lessons.with(|all| {
            let all = all.as_deref().unwrap_or_default();
            term.with(|t| {
                search::filter(all, t)
                    .into_iter()
                    .cloned()
                    .map(|lesson| {
                        let status = status_label(&lesson);
                        let chosen = lesson.clone();
                        view! {
                            <div class="lesson-card">
                                <h3 class="lesson-card__title">{lesson.title}</h3>
                                <p class="lesson-card__description">{lesson.description}</p>
                                <p class="lesson-card__meta">
                                    {format!("{} - {} steps", lesson.difficulty.as_str(), lesson.total_steps)}
                                </p>
                                <p class="lesson-card__status">{status}</p>
                                <button class="btn btn--primary" on:click=move |_| playing.set(Some(chosen.clone()))>
                                    {if lesson.completed { "Play again" } else { "Start" }}
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            })
        })
    };

    view! {
        <Show
            when=move || session.get().allows(Route::Lessons)
            fallback=|| view! { <div class="loading-page"><p>"Loading..."</p></div> }
        >
            <div class="lessons-page">
                <PageHeader title="My lessons">
                    <a class="btn" href=Route::Dashboard.path()>"Home"</a>
                </PageHeader>
                <main class="lessons-page__body">
                    {move || match playing.get() {
                        Some(lesson) => view! { <LessonPlayer lesson=lesson on_complete=on_complete on_exit=on_exit/> }.into_any(),
                        None => view! {
                            {move || {
                                last_result
                                    .get()
                                    .map(|(title, score)| {
                                        view! { <p class="lessons-page__result">{completion_message(&title, score)}</p> }
                                    })
                            }}
                            <div class="crud-view__toolbar">
                                <SearchBox placeholder="Search lessons" on_search=Callback::new(move |value: String| term.set(value))/>
                            </div>
                            <Show when=move || lessons.with(Option::is_some) fallback=|| view! { <p>"Loading lessons..."</p> }>
                                <Show
                                    when=move || lessons.with(|l| l.as_ref().is_some_and(|l| !l.is_empty()))
                                    fallback=|| view! { <p>"No lessons assigned yet."</p> }
                                >
                                    <div class="card-grid">{cards}</div>
                                </Show>
                            </Show>
                        }
                            .into_any(),
                    }}
                </main>
            </div>
        </Show>
    }
}

/// Perform `first` and every command that follows from it until the player
/// needs the student again. `apply` feeds each outcome back into the session
/// and returns what to do next.
///
/// Returns the final score once the lesson completed.
pub(crate) async fn advance<P, F>(port: &P, first: Command, mut apply: F) -> Result<Option<i64>, RequestError>
where
    P: LessonPort + ?Sized,
    F: FnMut(Event) -> Option<Command>,
{
    let mut next = Some(first);
    while let Some(command) = next.take() {
        if let Command::Complete { score } = command {
            return Ok(Some(score));
        }
        if let Some(event) = lesson::perform(port, &command).await? {
            next = apply(event);
        }
    }
    Ok(None)
}

fn run(
    session: RwSignal<LessonSession>,
    config: RwSignal<ConfigState>,
    scope: ViewScope,
    on_complete: Callback<i64>,
    first: Command,
) {
    spawn_browser(async move {
        let api = api_from(config);
        let port = ApiLessonPort::new(&api, sleep);
        let alive = scope.clone();
        let apply = move |event: Event| {
            if !alive.is_alive() {
                return None;
            }
            session.try_update(|s| s.apply(event)).flatten()
        };
        match scope.run(advance(&port, first, apply)).await {
            Some(Ok(Some(score))) => on_complete.run(score),
            Some(Ok(None)) | None => {}
            Some(Err(error)) => session.update(|s| s.fail(&error)),
        }
    });
}

#[component]
fn LessonPlayer(lesson: StudentLesson, on_complete: Callback<i64>, on_exit: Callback<()>) -> impl IntoView {
    let session_state = expect_context::<RwSignal<SessionState>>();
    let config = expect_context::<RwSignal<ConfigState>>();
    let scope = view_scope();
    let student_id = session_state.get_untracked().user_id().unwrap_or_default();
    let player = RwSignal::new(LessonSession::new(student_id, lesson.id.clone()));
    let confirm_leave = RwSignal::new(false);

    let dispatch = {
        let scope = scope.clone();
        move |command: Option<Command>| {
            if let Some(command) = command {
                run(player, config, scope.clone(), on_complete, command);
            }
        }
    };

    {
        let dispatch = dispatch.clone();
        Effect::new(move || {
            if config.get().loaded && player.with_untracked(|p| p.session_id().is_none() && !p.is_busy()) {
                dispatch(player.try_update(LessonSession::start));
            }
        });
    }

    let submit = {
        let dispatch = dispatch.clone();
        move || dispatch(player.try_update(LessonSession::submit).flatten())
    };
    let on_retry = {
        let dispatch = dispatch.clone();
        move |_| dispatch(player.try_update(LessonSession::start))
    };
    let on_skip_confirm = {
        let dispatch = dispatch.clone();
        Callback::new(move |()| dispatch(player.try_update(LessonSession::confirm_skip).flatten()))
    };
    let on_skip_cancel = Callback::new(move |()| player.update(LessonSession::cancel_skip));
    let on_leave = Callback::new(move |()| on_exit.run(()));
    let on_leave_cancel = Callback::new(move |()| confirm_leave.set(false));

    let phase = move || player.with(LessonSession::phase);
    let on_back = move |_| {
        if player.with_untracked(LessonSession::is_finished) {
            on_exit.run(());
        } else {
            confirm_leave.set(true);
        }
    };

    view! {
        <section class="player">
            <div class="player__bar">
                <button class="btn" on:click=on_back>"Back"</button>
                <h2 class="player__title">{lesson.title}</h2>
                <span class="player__progress">
                    {move || player.with(|p| p.progress().map(|(step, total)| format!("Step {step} / {total}")).unwrap_or_default())}
                </span>
                <span class="player__score">{move || format!("Score {}", player.with(LessonSession::score))}</span>
                <span class="player__streak">{move || format!("Streak {}", player.with(LessonSession::streak))}</span>
            </div>

            <Show when=move || phase() == Phase::Finished>
                <div class="player__finished">
                    <h3>"Lesson complete!"</h3>
                    <p>{move || format!("Final score: {}", player.with(LessonSession::score))}</p>
                    <button class="btn btn--primary" on:click=move |_| on_exit.run(())>"Back to lessons"</button>
                </div>
            </Show>

            <Show when=move || phase() == Phase::Loading && player.with(|p| p.error().is_none())>
                <p>"Loading..."</p>
            </Show>

            <Show when=move || player.with(|p| p.error().is_some())>
                <div class="player__error">
                    <p>{move || player.with(|p| p.error().unwrap_or_default().to_owned())}</p>
                    <button class="btn" on:click=on_retry.clone()>"Retry"</button>
                </div>
            </Show>

            <Show when=move || player.with(|p| p.prompt().is_some()) && !matches!(phase(), Phase::Loading | Phase::Finished)>
                <div class="player__prompt">
                    <p class="player__prompt-text">
                        {move || player.with(|p| p.prompt().map(|prompt| prompt.prompt.clone()).unwrap_or_default())}
                    </p>
                    <div class="player__attempts" aria-label="Attempts">
                        {move || {
                            player
                                .with(LessonSession::attempt_marks)
                                .into_iter()
                                .map(|used| {
                                    let class = if used { "player__attempt player__attempt--used" } else { "player__attempt" };
                                    view! { <span class=class></span> }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </div>
                    <input
                        class="player__answer"
                        type="text"
                        autocomplete="off"
                        placeholder="Your answer"
                        prop:value=move || player.with(|p| p.answer().to_owned())
                        prop:disabled=move || player.with(LessonSession::is_busy)
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            player.update(|p| p.set_answer(value));
                        }
                        on:keydown={
                            let submit = submit.clone();
                            move |ev: leptos::ev::KeyboardEvent| {
                                if ev.key() == "Enter" {
                                    ev.prevent_default();
                                    submit();
                                }
                            }
                        }
                    />
                    <div class="player__actions">
                        <button
                            class="btn btn--primary"
                            disabled=move || player.with(LessonSession::is_busy)
                            on:click={
                                let submit = submit.clone();
                                move |_| submit()
                            }
                        >
                            "Check"
                        </button>
                        <button class="btn" on:click=move |_| player.update(LessonSession::reveal_hint)>"Hint"</button>
                        <button
                            class="btn"
                            disabled=move || player.with(LessonSession::is_busy)
                            on:click=move |_| player.update(LessonSession::request_skip)
                        >
                            "Skip"
                        </button>
                    </div>
                    <p class="player__feedback">{move || feedback_message(phase()).unwrap_or_default()}</p>
                    <Show when=move || player.with(|p| p.hint().is_some())>
                        <p class="player__hint">
                            "Hint: "
                            {move || player.with(|p| p.hint().unwrap_or_default().to_owned())}
                        </p>
                    </Show>
                </div>
            </Show>

            <Show when=move || player.with(LessonSession::is_confirming_skip)>
                <ConfirmDialog
                    title="Skip this step?"
                    message="The step counts as not answered."
                    confirm_label="Skip"
                    on_confirm=on_skip_confirm
                    on_cancel=on_skip_cancel
                />
            </Show>
            <Show when=move || confirm_leave.get()>
                <ConfirmDialog
                    title="Leave the lesson?"
                    message="Your progress on the current step will be lost."
                    confirm_label="Leave"
                    on_confirm=on_leave
                    on_cancel=on_leave_cancel
                />
            </Show>
        </section>
    }
}
