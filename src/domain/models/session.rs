#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use super::RemixError;

/// Transient state backing the remix screen. Nothing here is persisted; the
/// session is discarded when the app exits.
///
/// After any completed transition exactly one of the following holds: the
/// output is non-empty, the error is set, or both are empty while a request
/// is outstanding.
pub struct RemixSession {
    pub output_text: String,
    pub error: Option<String>,
    pub waiting_for_backend: bool,
    generation: u64,
}

impl Default for RemixSession {
    fn default() -> RemixSession {
        return RemixSession {
            output_text: "".to_string(),
            error: None,
            waiting_for_backend: false,
            generation: 0,
        };
    }
}

impl RemixSession {
    /// Starts a new attempt: clears any previous output and error, raises the
    /// waiting flag, and returns the generation tag the attempt's response
    /// must carry in order to be applied.
    pub fn begin_attempt(&mut self) -> u64 {
        self.generation += 1;
        self.output_text = "".to_string();
        self.error = None;
        self.waiting_for_backend = true;

        return self.generation;
    }

    /// Drops the current attempt. A late response from it is rejected by
    /// [`RemixSession::resolve`] as the waiting flag is no longer raised.
    pub fn abort_attempt(&mut self) {
        self.waiting_for_backend = false;
    }

    /// Applies a completed attempt to the session. Responses tagged with a
    /// stale generation, or arriving after the attempt was aborted, leave
    /// state untouched and return false.
    pub fn resolve(&mut self, generation: u64, result: Result<String, RemixError>) -> bool {
        if generation != self.generation || !self.waiting_for_backend {
            return false;
        }

        self.waiting_for_backend = false;
        match result {
            Ok(text) => self.output_text = text.replace('\t', "  "),
            Err(err) => self.error = Some(err.to_string()),
        }

        return true;
    }

    /// Wraps the output text on word boundaries for rendering in a viewport
    /// of the given width.
    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        let mut lines: Vec<String> = vec![];

        for full_line in self.output_text.split('\n') {
            if full_line.trim().is_empty() {
                lines.push(" ".to_string());
                continue;
            }

            let mut char_count = 0;
            let mut current_line: Vec<&str> = vec![];

            for word in full_line.split(' ') {
                if word.len() + char_count + 1 > line_max_width && !current_line.is_empty() {
                    lines.push(current_line.join(" ").trim_end().to_string());
                    current_line = vec![];
                    char_count = 0;
                }

                current_line.push(word);
                char_count += word.len() + 1;
            }

            if !current_line.is_empty() {
                lines.push(current_line.join(" ").trim_end().to_string());
            }
        }

        return lines;
    }
}
