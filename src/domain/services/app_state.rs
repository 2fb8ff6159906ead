#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::Scroll;
use crate::domain::models::Action;
use crate::domain::models::BackendBox;
use crate::domain::models::RemixPrompt;
use crate::domain::models::RemixResponse;
use crate::domain::models::RemixSession;

pub struct AppState {
    pub session: RemixSession,
    pub scroll: Scroll,
    pub last_known_width: u16,
    pub last_known_height: u16,
}

impl AppState {
    pub async fn new(backend: &BackendBox) -> Result<AppState> {
        let mut app_state = AppState {
            session: RemixSession::default(),
            scroll: Scroll::default(),
            last_known_width: 0,
            last_known_height: 0,
        };

        if let Err(err) = backend.health_check().await {
            app_state.session.error = Some(format!(
                "The backend doesn't look ready to take requests. You should double check your configuration before submitting anything.\n\nError: {err}"
            ));
        }

        return Ok(app_state);
    }

    /// Kicks off one remix attempt. Input that is empty after trimming is
    /// rejected before any request is issued, leaving the session untouched.
    pub fn submit(&mut self, input: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        let text = input.trim();
        if text.is_empty() {
            return Ok(false);
        }

        let generation = self.session.begin_attempt();
        self.sync_dependants();
        tx.send(Action::BackendRequest(RemixPrompt::new(
            text.to_string(),
            generation,
        )))?;

        return Ok(true);
    }

    /// Interrupts an outstanding attempt. Should the aborted worker still get
    /// a response out, the session rejects it as stale.
    pub fn abort(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if !self.session.waiting_for_backend {
            return Ok(());
        }

        tx.send(Action::BackendAbort())?;
        self.session.abort_attempt();

        return Ok(());
    }

    pub fn handle_response(&mut self, res: RemixResponse) {
        if !self.session.resolve(res.generation, res.result) {
            tracing::debug!(generation = res.generation, "discarded stale remix response");
            return;
        }

        self.scroll.top();
        self.sync_dependants();
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        // Account for the output block borders on both axes.
        let line_count = self
            .session
            .as_string_lines(self.last_known_width.saturating_sub(2) as usize)
            .len();

        self.scroll
            .set_state(line_count as u16, self.last_known_height.saturating_sub(2));
    }
}
