use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;

use super::AppState;
use crate::domain::models::Action;
use crate::domain::models::RemixError;
use crate::domain::models::RemixResponse;
use crate::domain::models::RemixSession;
use crate::domain::services::Scroll;

impl Default for AppState {
    fn default() -> AppState {
        return AppState {
            session: RemixSession::default(),
            scroll: Scroll::default(),
            last_known_width: 100,
            last_known_height: 30,
        };
    }
}

fn to_prompt(action: Option<Action>) -> Result<(String, u64)> {
    let prompt = match action.unwrap() {
        Action::BackendRequest(prompt) => prompt,
        _ => bail!("Wrong type from recv"),
    };

    return Ok((prompt.text, prompt.generation));
}

#[test]
fn it_rejects_whitespace_only_input() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::default();

    let submitted = app_state.submit("  ", &tx)?;

    assert!(!submitted);
    assert!(!app_state.session.waiting_for_backend);
    assert!(app_state.session.output_text.is_empty());
    assert!(app_state.session.error.is_none());
    assert!(rx.try_recv().is_err());

    return Ok(());
}

#[test]
fn it_submits_trimmed_input() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::default();

    let submitted = app_state.submit("  Hello world  ", &tx)?;

    assert!(submitted);
    assert!(app_state.session.waiting_for_backend);

    let (text, generation) = to_prompt(rx.blocking_recv())?;
    assert_eq!(text, "Hello world");
    assert_eq!(generation, 1);

    return Ok(());
}

#[test]
fn it_applies_a_successful_response() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::default();
    app_state.submit("Hello world", &tx)?;
    let (_, generation) = to_prompt(rx.blocking_recv())?;

    app_state.handle_response(RemixResponse {
        generation,
        result: Ok("Greetings, planet!".to_string()),
    });

    assert_eq!(app_state.session.output_text, "Greetings, planet!");
    assert!(app_state.session.error.is_none());
    assert!(!app_state.session.waiting_for_backend);
    assert_eq!(app_state.scroll.position, 0);

    return Ok(());
}

#[test]
fn it_applies_a_failed_response() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::default();
    app_state.submit("Hello world", &tx)?;
    let (_, generation) = to_prompt(rx.blocking_recv())?;

    app_state.handle_response(RemixResponse {
        generation,
        result: Err(RemixError::Request("network down".to_string())),
    });

    assert_eq!(app_state.session.error, Some("network down".to_string()));
    assert!(app_state.session.output_text.is_empty());
    assert!(!app_state.session.waiting_for_backend);

    return Ok(());
}

#[test]
fn it_discards_a_stale_response_after_resubmission() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::default();

    app_state.submit("first", &tx)?;
    let (_, first_generation) = to_prompt(rx.blocking_recv())?;
    app_state.abort(&tx)?;
    app_state.submit("second", &tx)?;

    app_state.handle_response(RemixResponse {
        generation: first_generation,
        result: Ok("late first answer".to_string()),
    });

    assert!(app_state.session.output_text.is_empty());
    assert!(app_state.session.waiting_for_backend);

    return Ok(());
}

#[test]
fn it_aborts_a_waiting_attempt() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::default();
    app_state.submit("Hello world", &tx)?;
    rx.blocking_recv();

    app_state.abort(&tx)?;

    assert!(!app_state.session.waiting_for_backend);
    match rx.blocking_recv().unwrap() {
        Action::BackendAbort() => (),
        _ => bail!("Wrong type from recv"),
    }

    return Ok(());
}

#[test]
fn it_ignores_abort_when_idle() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::default();

    app_state.abort(&tx)?;

    assert!(rx.try_recv().is_err());

    return Ok(());
}
