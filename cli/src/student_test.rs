use flows::Event;
use wire::types::Prompt;

use super::*;

#[test]
fn colon_commands_map_to_buttons() {
    assert_eq!(parse_input(":hint"), Input::Hint);
    assert_eq!(parse_input(" :s "), Input::Skip);
    assert_eq!(parse_input(":q"), Input::Quit);
    assert_eq!(parse_input(":retry"), Input::Retry);
    assert_eq!(parse_input("   "), Input::Empty);
    assert_eq!(parse_input(" b "), Input::Answer("b".to_owned()));
}

#[test]
fn only_explicit_yes_confirms() {
    assert!(is_yes("Y"));
    assert!(is_yes(" yes"));
    assert!(!is_yes(""));
    assert!(!is_yes("no"));
}

#[test]
fn verdict_reports_exhausted_hint() {
    let correct = SubmitOutcome {
        correct: true,
        ..SubmitOutcome::default()
    };
    assert_eq!(verdict(&correct), "Correct!");

    let retry = SubmitOutcome {
        attempts: 1,
        max_attempts: Some(3),
        ..SubmitOutcome::default()
    };
    assert_eq!(verdict(&retry), "Not quite. Try again.");

    let exhausted = SubmitOutcome {
        attempts: 3,
        max_attempts: Some(3),
        hint: Some("dots 1 and 5".to_owned()),
        ..SubmitOutcome::default()
    };
    assert_eq!(verdict(&exhausted), "Out of attempts. Hint: dots 1 and 5");
}

#[test]
fn prompt_shows_progress_and_attempts() {
    let mut session = LessonSession::new(5, "l1");
    assert_eq!(render_prompt(&session), "");

    session.start();
    session.apply(Event::Started("s1".to_owned()));
    session.apply(Event::Prompt(PromptReply::Step(Prompt {
        prompt: "Show the letter E".to_owned(),
        target: "E".to_owned(),
        hint: String::new(),
        step_index: 1,
        max_attempts: 3,
        attempts: 1,
        score: 2,
        total_steps: Some(4),
    })));
    assert_eq!(
        render_prompt(&session),
        "Step 2/4  score 2  streak 0  attempts [xoo]\nShow the letter E"
    );
}
