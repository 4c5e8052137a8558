//! Student commands: the assigned lesson list and the terminal player.
//!
//! DESIGN
//! ======
//! The player is the same `flows::LessonSession` the browser uses, driven by
//! `flows::lesson::drive` with tokio's timer. Input is one line at a time:
//! anything typed is an answer, and a few `:` commands cover the buttons.
//! [`TerminalPort`] wraps the student API so each verdict is printed the
//! moment it arrives, before the feedback pause runs.

#[cfg(test)]
#[path = "student_test.rs"]
mod student_test;

use std::time::Duration;

use async_trait::async_trait;
use clap::Subcommand;
use flows::Route;
use flows::lesson::{ApiLessonPort, LessonPort, LessonSession, drive};
use tokio::io::{AsyncBufReadExt, BufReader};
use wire::RequestError;
use wire::types::{PromptReply, SubmitOutcome};

use crate::{CliError, Context, print_json};

#[derive(Subcommand, Debug)]
pub(crate) enum StudentCommand {
    /// Assigned lessons with completion and score.
    Lessons,
    /// Play a lesson interactively.
    Play { lesson_id: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    Answer(String),
    Hint,
    Skip,
    Retry,
    Quit,
    Empty,
}

pub(crate) fn parse_input(line: &str) -> Input {
    match line.trim() {
        "" => Input::Empty,
        ":h" | ":hint" => Input::Hint,
        ":s" | ":skip" => Input::Skip,
        ":r" | ":retry" => Input::Retry,
        ":q" | ":quit" => Input::Quit,
        answer => Input::Answer(answer.to_owned()),
    }
}

pub(crate) fn is_yes(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub(crate) fn verdict(outcome: &SubmitOutcome) -> String {
    if outcome.correct {
        return "Correct!".to_owned();
    }
    let exhausted = outcome.max_attempts.is_some_and(|max| outcome.attempts >= max);
    if !exhausted {
        return "Not quite. Try again.".to_owned();
    }
    match outcome.hint.as_deref().filter(|hint| !hint.trim().is_empty()) {
        Some(hint) => format!("Out of attempts. Hint: {hint}"),
        None => "Out of attempts.".to_owned(),
    }
}

/// Status line and prompt for the current step.
pub(crate) fn render_prompt(session: &LessonSession) -> String {
    let Some(prompt) = session.prompt() else {
        return String::new();
    };
    let progress = session
        .progress()
        .map(|(step, total)| format!("Step {step}/{total}"))
        .unwrap_or_default();
    let attempts: String = session
        .attempt_marks()
        .into_iter()
        .map(|used| if used { 'x' } else { 'o' })
        .collect();
    format!(
        "{progress}  score {}  streak {}  attempts [{attempts}]\n{}",
        session.score(),
        session.streak(),
        prompt.prompt
    )
}

struct TerminalPort<P> {
    inner: P,
}

#[async_trait(?Send)]
impl<P: LessonPort> LessonPort for TerminalPort<P> {
    async fn start_session(&self, student_id: i64, lesson_id: &str) -> Result<String, RequestError> {
        self.inner.start_session(student_id, lesson_id).await
    }

    async fn prompt(&self, session_id: &str) -> Result<PromptReply, RequestError> {
        self.inner.prompt(session_id).await
    }

    async fn submit(&self, session_id: &str, answer: &str) -> Result<SubmitOutcome, RequestError> {
        let outcome = self.inner.submit(session_id, answer).await?;
        println!("{}", verdict(&outcome));
        Ok(outcome)
    }

    async fn skip(&self, session_id: &str) -> Result<(), RequestError> {
        self.inner.skip(session_id).await?;
        println!("Skipped.");
        Ok(())
    }

    async fn sleep(&self, delay: Duration) {
        self.inner.sleep(delay).await;
    }
}

pub(crate) async fn run(ctx: &Context, command: StudentCommand) -> Result<(), CliError> {
    let user = ctx.require(Route::Lessons)?;
    match command {
        StudentCommand::Lessons => print_json(&ctx.api().student().lessons(user.id).await?),
        StudentCommand::Play { lesson_id } => play(ctx, user.id, lesson_id).await,
    }
}

async fn play(ctx: &Context, student_id: i64, lesson_id: String) -> Result<(), CliError> {
    let api = ctx.api();
    let port = TerminalPort {
        inner: ApiLessonPort::new(&api, tokio::time::sleep),
    };
    let mut session = LessonSession::new(student_id, lesson_id);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Type an answer and press Enter. Commands: :hint  :skip  :retry  :quit");

    let mut next = Some(session.start());
    loop {
        if let Some(command) = next.take() {
            match drive(&mut session, &port, command).await {
                Ok(Some(score)) => {
                    println!("Lesson complete! Final score: {score}");
                    return Ok(());
                }
                Ok(None) => println!("\n{}", render_prompt(&session)),
                Err(error) => {
                    tracing::warn!(%error, "lesson request failed");
                    eprintln!("{error} (type :retry to try again)");
                }
            }
        }

        print!("> ");
        std::io::Write::flush(&mut std::io::stdout())?;
        let Some(line) = lines.next_line().await? else {
            println!("\nLesson abandoned.");
            return Ok(());
        };
        next = match parse_input(&line) {
            Input::Empty => None,
            Input::Quit => {
                println!("Lesson abandoned.");
                return Ok(());
            }
            Input::Hint => {
                session.reveal_hint();
                match session.hint() {
                    Some(hint) => println!("Hint: {hint}"),
                    None => println!("No hint for this step."),
                }
                None
            }
            Input::Retry => Some(session.start()),
            Input::Skip => {
                session.request_skip();
                if session.is_confirming_skip() {
                    print!("Skip this step? It counts as not answered. [y/N] ");
                    std::io::Write::flush(&mut std::io::stdout())?;
                    let confirmed = lines.next_line().await?.is_some_and(|answer| is_yes(&answer));
                    if confirmed {
                        session.confirm_skip()
                    } else {
                        session.cancel_skip();
                        None
                    }
                } else {
                    None
                }
            }
            Input::Answer(answer) => {
                session.set_answer(answer);
                session.submit()
            }
        };
    }
}
