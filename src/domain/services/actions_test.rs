use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use super::ActionsService;
use crate::domain::models::Action;
use crate::domain::models::Backend;
use crate::domain::models::Event;
use crate::domain::models::RemixError;
use crate::domain::models::RemixPrompt;
use crate::domain::models::RemixResponse;

struct EchoBackend {}

#[async_trait]
impl Backend for EchoBackend {
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn get_completion(&self, text: &str) -> Result<String, RemixError> {
        return Ok(format!("remixed: {text}"));
    }
}

struct FailingBackend {}

#[async_trait]
impl Backend for FailingBackend {
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn get_completion(&self, _text: &str) -> Result<String, RemixError> {
        return Err(RemixError::Request("network down".to_string()));
    }
}

fn to_res(event: Option<Event>) -> Result<RemixResponse> {
    let res = match event.unwrap() {
        Event::RemixResponse(res) => res,
        _ => bail!("Wrong type from recv"),
    };

    return Ok(res);
}

#[tokio::test]
async fn it_forwards_a_successful_completion() -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let service = tokio::spawn(async move {
        return ActionsService::start(Arc::new(EchoBackend {}), event_tx, &mut action_rx).await;
    });

    action_tx.send(Action::BackendRequest(RemixPrompt::new(
        "Hello world".to_string(),
        3,
    )))?;

    let res = to_res(event_rx.recv().await)?;
    assert_eq!(res.generation, 3);
    assert_eq!(res.result, Ok("remixed: Hello world".to_string()));

    service.abort();

    return Ok(());
}

#[tokio::test]
async fn it_forwards_a_failed_completion() -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let service = tokio::spawn(async move {
        return ActionsService::start(Arc::new(FailingBackend {}), event_tx, &mut action_rx).await;
    });

    action_tx.send(Action::BackendRequest(RemixPrompt::new(
        "Hello world".to_string(),
        1,
    )))?;

    let res = to_res(event_rx.recv().await)?;
    assert_eq!(res.generation, 1);
    assert_eq!(
        res.result,
        Err(RemixError::Request("network down".to_string()))
    );

    service.abort();

    return Ok(());
}
