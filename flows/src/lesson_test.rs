use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use futures::executor::block_on;
use wire::RequestError;
use wire::types::{Prompt, PromptReply, SubmitOutcome};

use super::*;

const SESSION: &str = "0123456789abcdef";

struct Step {
    target: &'static str,
    hint: &'static str,
    max_attempts: u32,
}

#[derive(Default)]
struct ServerState {
    solved: usize,
    attempts: HashMap<usize, u32>,
    score: i64,
    sleeps: Vec<Duration>,
    submitted: Vec<String>,
    prompts_served: usize,
    skips: usize,
}

/// In-memory student backend grading the way the real one does.
struct FakeLessonServer {
    steps: Vec<Step>,
    points: Option<i64>,
    state: RefCell<ServerState>,
    fail_next_prompt: RefCell<bool>,
}

impl FakeLessonServer {
    fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            points: None,
            state: RefCell::new(ServerState::default()),
            fail_next_prompt: RefCell::new(false),
        }
    }

    fn sleeps(&self) -> Vec<Duration> {
        self.state.borrow().sleeps.clone()
    }
}

#[async_trait(?Send)]
impl LessonPort for FakeLessonServer {
    async fn start_session(&self, _student_id: i64, _lesson_id: &str) -> Result<String, RequestError> {
        Ok(SESSION.to_owned())
    }

    async fn prompt(&self, session_id: &str) -> Result<PromptReply, RequestError> {
        assert_eq!(session_id, SESSION);
        if self.fail_next_prompt.replace(false) {
            return Err(RequestError::Network("connection reset".to_owned()));
        }
        let mut state = self.state.borrow_mut();
        state.prompts_served += 1;
        let index = state.solved;
        let Some(step) = self.steps.get(index) else {
            return Ok(PromptReply::Finished { score: state.score });
        };
        Ok(PromptReply::Step(Prompt {
            prompt: format!("Show the letter {}", step.target),
            target: step.target.to_owned(),
            hint: step.hint.to_owned(),
            step_index: u32::try_from(index).unwrap(),
            max_attempts: step.max_attempts,
            attempts: state.attempts.get(&index).copied().unwrap_or(0),
            score: state.score,
            total_steps: Some(u32::try_from(self.steps.len()).unwrap()),
        }))
    }

    async fn submit(&self, _session_id: &str, answer: &str) -> Result<SubmitOutcome, RequestError> {
        let mut state = self.state.borrow_mut();
        state.submitted.push(answer.to_owned());
        let index = state.solved;
        let Some(step) = self.steps.get(index) else {
            return Ok(SubmitOutcome {
                finished: true,
                ..SubmitOutcome::default()
            });
        };
        let attempts = state.attempts.entry(index).or_insert(0);
        *attempts += 1;
        let attempts = *attempts;
        let correct = answer == step.target.to_uppercase();
        let mut outcome = SubmitOutcome {
            correct,
            attempts,
            max_attempts: Some(step.max_attempts),
            points: self.points,
            ..SubmitOutcome::default()
        };
        if correct {
            state.score += self.points.unwrap_or(1);
            state.solved += 1;
            outcome.finished = state.solved == self.steps.len();
        } else if attempts >= step.max_attempts {
            outcome.hint = Some(if step.hint.is_empty() {
                format!("The answer is {}", step.target)
            } else {
                step.hint.to_owned()
            });
        }
        Ok(outcome)
    }

    async fn skip(&self, _session_id: &str) -> Result<(), RequestError> {
        let mut state = self.state.borrow_mut();
        state.skips += 1;
        let index = state.solved;
        *state.attempts.entry(index).or_insert(0) += 1;
        Ok(())
    }

    async fn sleep(&self, delay: Duration) {
        self.state.borrow_mut().sleeps.push(delay);
    }
}

fn vowels() -> FakeLessonServer {
    FakeLessonServer::new(vec![
        Step {
            target: "A",
            hint: "Point 1 only",
            max_attempts: 3,
        },
        Step {
            target: "E",
            hint: "Points 1 and 5",
            max_attempts: 3,
        },
    ])
}

fn started(server: &FakeLessonServer) -> LessonSession {
    let mut session = LessonSession::new(5, "l1");
    let first = session.start();
    assert_eq!(
        first,
        Command::StartSession {
            student_id: 5,
            lesson_id: "l1".to_owned()
        }
    );
    assert_eq!(block_on(drive(&mut session, server, first)).unwrap(), None);
    assert_eq!(session.phase(), Phase::Active);
    session
}

fn answer(session: &mut LessonSession, server: &FakeLessonServer, text: &str) -> Option<i64> {
    session.set_answer(text);
    let command = session.submit().expect("answer should be sent");
    block_on(drive(session, server, command)).unwrap()
}

#[test]
fn start_loads_first_prompt_with_full_lives() {
    let server = vowels();
    let session = started(&server);
    assert_eq!(session.session_id(), Some(SESSION));
    assert_eq!(session.prompt().unwrap().target, "A");
    assert_eq!(session.lives(), 3);
    assert_eq!(session.progress(), Some((1, 2)));
    assert_eq!(session.attempt_marks(), [false, false, false]);
}

#[test]
fn correct_answer_scores_and_advances_after_pause() {
    let server = vowels();
    let mut session = started(&server);

    session.set_answer("  a ");
    let command = session.submit().unwrap();
    assert_eq!(
        command,
        Command::Submit {
            session_id: SESSION.to_owned(),
            answer: "A".to_owned()
        }
    );
    let next = block_on(perform(&server, &command)).unwrap().unwrap();
    let wait = session.apply(next).unwrap();
    assert_eq!(session.phase(), Phase::CorrectFeedback);
    assert_eq!(session.score(), 1);
    assert_eq!(session.streak(), 1);
    assert_eq!(
        wait,
        Command::Wait {
            delay: CORRECT_DELAY,
            then: Timer::AfterCorrect { finished: false }
        }
    );

    block_on(drive(&mut session, &server, wait)).unwrap();
    assert_eq!(session.phase(), Phase::Active);
    assert_eq!(session.prompt().unwrap().target, "E");
    assert_eq!(session.answer(), "");
    assert_eq!(server.sleeps(), [Duration::from_millis(1500)]);
}

#[test]
fn reported_points_replace_default() {
    let mut server = vowels();
    server.points = Some(10);
    let mut session = started(&server);
    session.set_answer("A");
    let command = session.submit().unwrap();
    let event = block_on(perform(&server, &command)).unwrap().unwrap();
    session.apply(event);
    assert_eq!(session.score(), 10);
}

#[test]
fn wrong_answer_costs_a_life_and_allows_retry() {
    let server = vowels();
    let mut session = started(&server);
    answer(&mut session, &server, "A");
    assert_eq!(session.streak(), 1);

    session.set_answer("x");
    let command = session.submit().unwrap();
    let event = block_on(perform(&server, &command)).unwrap().unwrap();
    let wait = session.apply(event).unwrap();
    assert_eq!(session.phase(), Phase::WrongFeedback { exhausted: false });
    assert_eq!(session.lives(), 2);
    assert_eq!(session.streak(), 0);
    assert_eq!(session.hint(), None);
    assert_eq!(
        wait,
        Command::Wait {
            delay: RETRY_DELAY,
            then: Timer::AfterRetry
        }
    );

    block_on(drive(&mut session, &server, wait)).unwrap();
    assert_eq!(session.phase(), Phase::Active);
    assert_eq!(session.answer(), "");
    assert_eq!(session.prompt().unwrap().target, "E");
    assert_eq!(session.attempt_marks(), [true, false, false]);
}

#[test]
fn exhausting_attempts_shows_hint_then_advances_without_input() {
    let server = vowels();
    let mut session = started(&server);
    let prompts_before = server.state.borrow().prompts_served;

    answer(&mut session, &server, "B");
    answer(&mut session, &server, "C");
    assert_eq!(session.lives(), 1);

    session.set_answer("D");
    let command = session.submit().unwrap();
    let event = block_on(perform(&server, &command)).unwrap().unwrap();
    let wait = session.apply(event).unwrap();
    assert_eq!(session.phase(), Phase::WrongFeedback { exhausted: true });
    assert_eq!(session.hint(), Some("Point 1 only"));
    assert_eq!(
        wait,
        Command::Wait {
            delay: EXHAUSTED_DELAY,
            then: Timer::AfterExhausted
        }
    );

    block_on(drive(&mut session, &server, wait)).unwrap();
    assert_eq!(session.phase(), Phase::Active);
    assert_eq!(session.hint(), None);
    assert_eq!(server.state.borrow().prompts_served, prompts_before + 1);
    assert_eq!(
        server.sleeps(),
        [
            Duration::from_millis(1500),
            Duration::from_millis(1500),
            Duration::from_millis(3000)
        ]
    );
}

#[test]
fn exhausted_without_server_hint_falls_back_to_prompt_hint() {
    let server = FakeLessonServer::new(vec![Step {
        target: "O",
        hint: "Points 1, 3 and 5",
        max_attempts: 1,
    }]);
    let mut session = started(&server);
    let outcome = SubmitOutcome {
        correct: false,
        attempts: 1,
        ..SubmitOutcome::default()
    };
    session.apply(Event::Submitted(outcome));
    assert_eq!(session.phase(), Phase::WrongFeedback { exhausted: true });
    assert_eq!(session.hint(), Some("Points 1, 3 and 5"));
}

#[test]
fn blank_answers_are_never_sent() {
    let server = vowels();
    let mut session = started(&server);
    session.set_answer("   ");
    assert_eq!(session.submit(), None);
    assert!(server.state.borrow().submitted.is_empty());
}

#[test]
fn no_second_submit_while_waiting_for_verdict() {
    let server = vowels();
    let mut session = started(&server);
    session.set_answer("A");
    assert!(session.submit().is_some());
    assert_eq!(session.submit(), None);
}

#[test]
fn finishing_last_step_completes_with_score() {
    let server = vowels();
    let mut session = started(&server);
    assert_eq!(answer(&mut session, &server, "a"), None);
    assert_eq!(answer(&mut session, &server, "e"), Some(2));
    assert!(session.is_finished());
    assert_eq!(session.score(), 2);
}

#[test]
fn already_finished_session_completes_on_load() {
    let server = FakeLessonServer::new(Vec::new());
    let mut session = LessonSession::new(5, "l1");
    let first = session.start();
    assert_eq!(block_on(drive(&mut session, &server, first)).unwrap(), Some(0));
    assert_eq!(session.phase(), Phase::Finished);
}

#[test]
fn skip_requires_confirmation_and_refetches() {
    let server = vowels();
    let mut session = started(&server);

    assert_eq!(session.confirm_skip(), None);
    session.request_skip();
    session.cancel_skip();
    assert_eq!(session.confirm_skip(), None);

    session.request_skip();
    assert!(session.is_confirming_skip());
    let command = session.confirm_skip().unwrap();
    assert_eq!(
        command,
        Command::Skip {
            session_id: SESSION.to_owned()
        }
    );
    block_on(drive(&mut session, &server, command)).unwrap();
    assert_eq!(server.state.borrow().skips, 1);
    assert_eq!(session.phase(), Phase::Active);
    assert_eq!(session.lives(), 2);
}

#[test]
fn hint_request_reveals_prompt_hint() {
    let server = vowels();
    let mut session = started(&server);
    assert_eq!(session.hint(), None);
    session.reveal_hint();
    assert_eq!(session.hint(), Some("Point 1 only"));
}

#[test]
fn stale_timer_is_ignored() {
    let server = vowels();
    let mut session = started(&server);
    let before = session.clone();
    assert_eq!(session.apply(Event::Elapsed(Timer::AfterExhausted)), None);
    assert_eq!(session, before);
}

#[test]
fn failed_request_keeps_last_prompt() {
    let server = vowels();
    let mut session = started(&server);
    answer(&mut session, &server, "x");
    *server.fail_next_prompt.borrow_mut() = true;

    session.set_answer("A");
    let command = session.submit().unwrap();
    let event = block_on(perform(&server, &command)).unwrap().unwrap();
    let wait = session.apply(event).unwrap();
    let error = block_on(drive(&mut session, &server, wait)).unwrap_err();

    assert_eq!(error, RequestError::Network("connection reset".to_owned()));
    assert_eq!(session.error(), Some("server unreachable: connection reset"));
    assert_eq!(session.prompt().unwrap().target, "A");
    assert_eq!(session.score(), 1);
}

#[test]
fn normalize_trims_and_uppercases() {
    assert_eq!(normalize_answer("  b \n"), "B");
    assert_eq!(normalize_answer("ñ"), "Ñ");
}
