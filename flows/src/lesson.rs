//! Lesson player state machine.
//!
//! SYSTEM CONTEXT
//! ==============
//! A student plays a lesson as a server-side session: the student backend
//! serves one prompt at a time, grades every answer and decides when the
//! lesson is over. This module holds the player's local view of that session
//! (lives, score, streak, hint, feedback phase) and decides what the front
//! end must do next.
//!
//! DESIGN
//! ======
//! The machine does no I/O. Every input returns an optional [`Command`]; the
//! front end carries it out (directly, or through [`perform`] over a
//! [`LessonPort`]) and feeds the outcome back as an [`Event`]. Feedback pauses
//! are commands too ([`Command::Wait`]), so tests drive the whole flow
//! without a clock.
//!
//! ```text
//! Loading -> Active -> CorrectFeedback ------------> Loading | Finished
//!              |    -> WrongFeedback{exhausted} ---> Loading
//!              |    -> WrongFeedback{retry} -------> Active
//!              +-- skip (confirmed) ---------------> Loading
//! ```
//!
//! Pass/fail is never decided locally. The answer is only normalized
//! (trimmed, upper-cased) before it is sent.

#[cfg(test)]
#[path = "lesson_test.rs"]
mod lesson_test;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use wire::{ApiClient, Credentials, RequestError, Transport};
use wire::types::{Prompt, PromptReply, SubmitOutcome};

/// Pause after a correct answer before moving on.
pub const CORRECT_DELAY: Duration = Duration::from_millis(1500);
/// Pause after a wrong answer before the input is cleared for a retry.
pub const RETRY_DELAY: Duration = Duration::from_millis(1500);
/// Pause while the hint is shown after the last attempt, before advancing.
pub const EXHAUSTED_DELAY: Duration = Duration::from_millis(3000);

/// Points for a correct answer when the backend does not report any.
pub const DEFAULT_POINTS: i64 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Active,
    CorrectFeedback,
    WrongFeedback { exhausted: bool },
    Finished,
}

/// Which pause just elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timer {
    AfterCorrect { finished: bool },
    AfterRetry,
    AfterExhausted,
}

/// Work the front end must carry out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    StartSession { student_id: i64, lesson_id: String },
    FetchPrompt { session_id: String },
    Submit { session_id: String, answer: String },
    Skip { session_id: String },
    Wait { delay: Duration, then: Timer },
    /// Terminal: report the final score to whoever opened the player.
    Complete { score: i64 },
}

/// Outcome of a performed command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Started(String),
    Prompt(PromptReply),
    Submitted(SubmitOutcome),
    Skipped,
    Elapsed(Timer),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonSession {
    student_id: i64,
    lesson_id: String,
    session_id: Option<String>,
    phase: Phase,
    prompt: Option<Prompt>,
    answer: String,
    lives: u32,
    score: i64,
    streak: u32,
    hint: Option<String>,
    confirming_skip: bool,
    in_flight: bool,
    error: Option<String>,
}

impl LessonSession {
    #[must_use]
    pub fn new(student_id: i64, lesson_id: impl Into<String>) -> Self {
        Self {
            student_id,
            lesson_id: lesson_id.into(),
            session_id: None,
            phase: Phase::Loading,
            prompt: None,
            answer: String::new(),
            lives: 0,
            score: 0,
            streak: 0,
            hint: None,
            confirming_skip: false,
            in_flight: false,
            error: None,
        }
    }

    // ---- accessors ----

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn lesson_id(&self) -> &str {
        &self.lesson_id
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Hint text while it is shown.
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn is_confirming_skip(&self) -> bool {
        self.confirming_skip
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight || !matches!(self.phase, Phase::Active)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// `(current, total)` with a one-based current step.
    pub fn progress(&self) -> Option<(u32, u32)> {
        let prompt = self.prompt.as_ref()?;
        let total = prompt.total_steps?;
        Some((prompt.step_index + 1, total.max(prompt.step_index + 1)))
    }

    /// One mark per allowed attempt; `true` marks an attempt already used.
    pub fn attempt_marks(&self) -> Vec<bool> {
        let Some(prompt) = self.prompt.as_ref() else {
            return Vec::new();
        };
        let used = prompt.max_attempts.saturating_sub(self.lives);
        (0..prompt.max_attempts).map(|slot| slot < used).collect()
    }

    // ---- user input ----

    /// First command of a fresh player.
    pub fn start(&mut self) -> Command {
        self.phase = Phase::Loading;
        self.in_flight = true;
        self.error = None;
        match self.session_id.clone() {
            Some(session_id) => Command::FetchPrompt { session_id },
            None => Command::StartSession {
                student_id: self.student_id,
                lesson_id: self.lesson_id.clone(),
            },
        }
    }

    /// Typing is only accepted while a prompt waits for an answer.
    pub fn set_answer(&mut self, text: impl Into<String>) {
        if self.phase == Phase::Active && !self.in_flight {
            self.answer = text.into();
        }
    }

    /// Send the current answer. Blank answers and busy states send nothing.
    pub fn submit(&mut self) -> Option<Command> {
        if self.is_busy() {
            return None;
        }
        let answer = normalize_answer(&self.answer);
        if answer.is_empty() {
            return None;
        }
        let session_id = self.session_id.clone()?;
        self.in_flight = true;
        self.error = None;
        Some(Command::Submit { session_id, answer })
    }

    pub fn reveal_hint(&mut self) {
        if let Some(prompt) = self.prompt.as_ref().filter(|p| !p.hint.trim().is_empty()) {
            self.hint = Some(prompt.hint.clone());
        }
    }

    /// Skipping asks for confirmation first.
    pub fn request_skip(&mut self) {
        if !self.is_busy() {
            self.confirming_skip = true;
        }
    }

    pub fn cancel_skip(&mut self) {
        self.confirming_skip = false;
    }

    pub fn confirm_skip(&mut self) -> Option<Command> {
        if !std::mem::take(&mut self.confirming_skip) || self.is_busy() {
            return None;
        }
        let session_id = self.session_id.clone()?;
        self.in_flight = true;
        Some(Command::Skip { session_id })
    }

    // ---- server and timer outcomes ----

    pub fn apply(&mut self, event: Event) -> Option<Command> {
        self.in_flight = false;
        match event {
            Event::Started(session_id) => {
                self.session_id = Some(session_id.clone());
                self.in_flight = true;
                Some(Command::FetchPrompt { session_id })
            }
            Event::Prompt(reply) => self.on_prompt(reply),
            Event::Submitted(outcome) => Some(self.on_submitted(outcome)),
            Event::Skipped => self.fetch_next(),
            Event::Elapsed(timer) => self.on_elapsed(timer),
        }
    }

    /// A request failed. The player keeps its last good state.
    pub fn fail(&mut self, error: &RequestError) {
        self.in_flight = false;
        self.error = Some(error.to_string());
    }

    fn on_prompt(&mut self, reply: PromptReply) -> Option<Command> {
        match reply {
            PromptReply::Finished { score } => Some(self.finish(score)),
            PromptReply::Step(prompt) => {
                self.score = prompt.score;
                self.lives = prompt.max_attempts.saturating_sub(prompt.attempts);
                self.prompt = Some(prompt);
                self.answer.clear();
                self.hint = None;
                self.confirming_skip = false;
                self.error = None;
                self.phase = Phase::Active;
                None
            }
        }
    }

    fn on_submitted(&mut self, outcome: SubmitOutcome) -> Command {
        if outcome.correct {
            self.score += outcome.points.unwrap_or(DEFAULT_POINTS);
            self.streak += 1;
            self.phase = Phase::CorrectFeedback;
            return Command::Wait {
                delay: CORRECT_DELAY,
                then: Timer::AfterCorrect {
                    finished: outcome.finished,
                },
            };
        }
        if outcome.finished {
            return self.finish(self.score);
        }

        self.lives = self.lives.saturating_sub(1);
        self.streak = 0;
        let max_attempts = self.prompt.as_ref().map_or(0, |p| p.max_attempts);
        let exhausted = self.lives == 0 || outcome.attempts >= max_attempts;
        self.phase = Phase::WrongFeedback { exhausted };
        if exhausted {
            let fallback = self.prompt.as_ref().map(|p| p.hint.clone());
            self.hint = outcome.hint.or(fallback).filter(|hint| !hint.trim().is_empty());
            Command::Wait {
                delay: EXHAUSTED_DELAY,
                then: Timer::AfterExhausted,
            }
        } else {
            Command::Wait {
                delay: RETRY_DELAY,
                then: Timer::AfterRetry,
            }
        }
    }

    fn on_elapsed(&mut self, timer: Timer) -> Option<Command> {
        match (self.phase, timer) {
            (Phase::CorrectFeedback, Timer::AfterCorrect { finished: true }) => Some(self.finish(self.score)),
            (Phase::CorrectFeedback, Timer::AfterCorrect { finished: false })
            | (Phase::WrongFeedback { exhausted: true }, Timer::AfterExhausted) => self.fetch_next(),
            (Phase::WrongFeedback { exhausted: false }, Timer::AfterRetry) => {
                self.answer.clear();
                self.phase = Phase::Active;
                None
            }
            // stale timer from an earlier phase
            _ => None,
        }
    }

    fn fetch_next(&mut self) -> Option<Command> {
        let session_id = self.session_id.clone()?;
        self.phase = Phase::Loading;
        self.in_flight = true;
        Some(Command::FetchPrompt { session_id })
    }

    fn finish(&mut self, score: i64) -> Command {
        self.score = score;
        self.phase = Phase::Finished;
        self.confirming_skip = false;
        Command::Complete { score }
    }
}

/// Answers are compared upper-cased and without surrounding whitespace.
#[must_use]
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Student backend operations plus a clock, as seen by the player.
#[async_trait(?Send)]
pub trait LessonPort {
    async fn start_session(&self, student_id: i64, lesson_id: &str) -> Result<String, RequestError>;
    async fn prompt(&self, session_id: &str) -> Result<PromptReply, RequestError>;
    async fn submit(&self, session_id: &str, answer: &str) -> Result<SubmitOutcome, RequestError>;
    async fn skip(&self, session_id: &str) -> Result<(), RequestError>;
    async fn sleep(&self, delay: Duration);
}

/// [`LessonPort`] backed by the student API and the front end's own timer.
pub struct ApiLessonPort<'a, T, C, Z> {
    client: &'a ApiClient<T, C>,
    sleep: Z,
}

impl<'a, T, C, Z> ApiLessonPort<'a, T, C, Z> {
    pub fn new(client: &'a ApiClient<T, C>, sleep: Z) -> Self {
        Self { client, sleep }
    }
}

#[async_trait(?Send)]
impl<T, C, Z, F> LessonPort for ApiLessonPort<'_, T, C, Z>
where
    T: Transport,
    C: Credentials,
    Z: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    async fn start_session(&self, student_id: i64, lesson_id: &str) -> Result<String, RequestError> {
        self.client.student().start_session(student_id, lesson_id).await
    }

    async fn prompt(&self, session_id: &str) -> Result<PromptReply, RequestError> {
        self.client.student().prompt(session_id).await
    }

    async fn submit(&self, session_id: &str, answer: &str) -> Result<SubmitOutcome, RequestError> {
        self.client.student().submit(session_id, answer).await
    }

    async fn skip(&self, session_id: &str) -> Result<(), RequestError> {
        self.client.student().skip(session_id).await
    }

    async fn sleep(&self, delay: Duration) {
        (self.sleep)(delay).await;
    }
}

/// Carry out one command. [`Command::Complete`] has nothing to perform and
/// yields `None`.
///
/// # Errors
///
/// Propagates the port's request failure.
pub async fn perform<P: LessonPort + ?Sized>(port: &P, command: &Command) -> Result<Option<Event>, RequestError> {
    let event = match command {
        Command::StartSession { student_id, lesson_id } => {
            Event::Started(port.start_session(*student_id, lesson_id).await?)
        }
        Command::FetchPrompt { session_id } => Event::Prompt(port.prompt(session_id).await?),
        Command::Submit { session_id, answer } => Event::Submitted(port.submit(session_id, answer).await?),
        Command::Skip { session_id } => {
            port.skip(session_id).await?;
            Event::Skipped
        }
        Command::Wait { delay, then } => {
            port.sleep(*delay).await;
            Event::Elapsed(*then)
        }
        Command::Complete { .. } => return Ok(None),
    };
    Ok(Some(event))
}

/// Run commands until the player needs input again.
///
/// Returns `Some(score)` once the lesson completed, `None` when the player
/// is waiting for the student.
///
/// # Errors
///
/// Returns the first request failure after recording it on the session.
pub async fn drive<P: LessonPort + ?Sized>(
    session: &mut LessonSession,
    port: &P,
    command: Command,
) -> Result<Option<i64>, RequestError> {
    let mut next = Some(command);
    while let Some(command) = next.take() {
        if let Command::Complete { score } = command {
            return Ok(Some(score));
        }
        match perform(port, &command).await {
            Ok(Some(event)) => next = session.apply(event),
            Ok(None) => {}
            Err(error) => {
                session.fail(&error);
                return Err(error);
            }
        }
    }
    Ok(None)
}
