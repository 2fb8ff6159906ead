#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::models::Action;
use crate::domain::models::BackendBox;
use crate::domain::models::Event;
use crate::domain::models::RemixPrompt;
use crate::domain::models::RemixResponse;

pub fn help_text() -> String {
    let text = r#"
HOTKEYS:
- Enter - Submit the entered text for a remix.
- CTRL+C - Interrupt waiting for a remix response if in progress, otherwise exit.
- Up arrow - Scroll the output up.
- Down arrow - Scroll the output down.
- CTRL+U - Page up.
- CTRL+D - Page down.
    "#;

    return text.trim().to_string();
}

async fn completion_worker(
    backend: BackendBox,
    prompt: RemixPrompt,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let result = backend.get_completion(&prompt.text).await;
    if let Err(err) = &result {
        tracing::error!(error = %err, generation = prompt.generation, "remix attempt failed");
    }

    tx.send(Event::RemixResponse(RemixResponse {
        generation: prompt.generation,
        result,
    }))?;

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        backend: BackendBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        // Lazy default.
        let mut worker: JoinHandle<Result<()>> = tokio::spawn(async {
            return Ok(());
        });

        while let Some(action) = rx.recv().await {
            match action {
                Action::BackendAbort() => {
                    worker.abort();
                }
                Action::BackendRequest(prompt) => {
                    let worker_backend = backend.clone();
                    let worker_tx = tx.clone();
                    worker = tokio::spawn(async move {
                        return completion_worker(worker_backend, prompt, worker_tx).await;
                    });
                }
            }
        }

        return Ok(());
    }
}
