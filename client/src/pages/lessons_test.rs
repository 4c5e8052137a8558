use futures::executor::block_on;
use wire::types::{Difficulty, PromptReply, SubmitOutcome};

use super::*;

fn lesson(completed: bool, score: i64) -> StudentLesson {
    StudentLesson {
        id: "l1".to_owned(),
        title: "Vowels".to_owned(),
        description: String::new(),
        difficulty: Difficulty::Beginner,
        order_index: 0,
        total_steps: 5,
        completed,
        score,
    }
}

#[test]
fn status_reflects_completion_and_score() {
    assert_eq!(status_label(&lesson(true, 4)), "Completed - score 4");
    assert_eq!(status_label(&lesson(false, 2)), "In progress - score 2");
    assert_eq!(status_label(&lesson(false, 0)), "Not started");
}

#[test]
fn feedback_only_during_feedback_phases() {
    assert_eq!(feedback_message(Phase::CorrectFeedback), Some("Correct!"));
    assert_eq!(
        feedback_message(Phase::WrongFeedback { exhausted: true }),
        Some("Out of attempts. Moving on...")
    );
    assert_eq!(feedback_message(Phase::Active), None);
}

/// Student service double: replies to prompts from a script, accepts every
/// answer and never actually sleeps.
struct ScriptedPort {
    prompts: std::cell::RefCell<Vec<PromptReply>>,
}

impl ScriptedPort {
    fn new(prompts: Vec<PromptReply>) -> Self {
        Self {
            prompts: std::cell::RefCell::new(prompts),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl LessonPort for ScriptedPort {
    async fn start_session(&self, _student_id: i64, _lesson_id: &str) -> Result<String, RequestError> {
        Ok("s1".to_owned())
    }

    async fn prompt(&self, _session_id: &str) -> Result<PromptReply, RequestError> {
        let mut prompts = self.prompts.borrow_mut();
        if prompts.is_empty() {
            return Err(RequestError::Network("script exhausted".to_owned()));
        }
        Ok(prompts.remove(0))
    }

    async fn submit(&self, _session_id: &str, _answer: &str) -> Result<SubmitOutcome, RequestError> {
        Err(RequestError::Network("not scripted".to_owned()))
    }

    async fn skip(&self, _session_id: &str) -> Result<(), RequestError> {
        Ok(())
    }

    async fn sleep(&self, _delay: std::time::Duration) {}
}

fn step(prompt: &str) -> PromptReply {
    serde_json::from_value(serde_json::json!({
        "prompt": prompt,
        "target": "A",
        "hint": "dot 1",
        "max_attempts": 3,
        "total_steps": 2,
    }))
    .unwrap()
}

#[test]
fn advance_reports_final_score_when_lesson_finishes() {
    let port = ScriptedPort::new(vec![PromptReply::Finished { score: 7 }]);
    let mut session = LessonSession::new(5, "l1".to_owned());
    let first = session.start();
    let score = block_on(advance(&port, first, |event| session.apply(event))).unwrap();
    assert_eq!(score, Some(7));
    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.score(), 7);
}

#[test]
fn advance_stops_without_score_while_waiting_for_student() {
    let port = ScriptedPort::new(vec![step("Show the letter A")]);
    let mut session = LessonSession::new(5, "l1".to_owned());
    let first = session.start();
    let score = block_on(advance(&port, first, |event| session.apply(event))).unwrap();
    assert_eq!(score, None);
    assert_eq!(session.phase(), Phase::Active);
}

#[test]
fn advance_surfaces_request_failure() {
    let port = ScriptedPort::new(Vec::new());
    let mut session = LessonSession::new(5, "l1".to_owned());
    let first = session.start();
    let result = block_on(advance(&port, first, |event| session.apply(event)));
    assert!(matches!(result, Err(RequestError::Network(_))));
}

#[test]
fn completion_message_names_lesson_and_score() {
    assert_eq!(completion_message("Vowels", 7), "Finished \"Vowels\" with a score of 7");
}
