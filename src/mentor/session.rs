use super::{
    ChatRequest, StreamUpdate, Turn, DESYNC_MESSAGE, PERSONA_INSTRUCTION, SEED_MESSAGE,
    TEMPERATURE,
};

/// Transcript plus the idle/streaming state machine behind the mentor widget.
pub struct ChatSession {
    transcript: Vec<Turn>,
    input: String,
    streaming: bool,
    generation: u64,
    accumulated: String,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            transcript: vec![Turn::assistant(SEED_MESSAGE)],
            input: String::new(),
            streaming: false,
            generation: 0,
            accumulated: String::new(),
        }
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Streaming and nothing has arrived yet.
    pub fn awaiting_first_chunk(&self) -> bool {
        self.streaming && self.transcript.last().is_some_and(|t| t.text.is_empty())
    }

    pub fn can_submit(&self) -> bool {
        !self.streaming && !self.input.trim().is_empty()
    }

    /// Moves the input into the transcript and returns the request to issue.
    /// Returns `None` (and changes nothing) while streaming or on blank input.
    pub fn submit(&mut self) -> Option<ChatRequest> {
        if !self.can_submit() {
            return None;
        }
        let text = std::mem::take(&mut self.input);
        self.transcript.push(Turn::user(text));
        let history = self.transcript.clone();
        self.transcript.push(Turn::assistant(""));

        self.streaming = true;
        self.generation += 1;
        self.accumulated.clear();

        Some(ChatRequest {
            generation: self.generation,
            history,
            system_instruction: PERSONA_INSTRUCTION.to_string(),
            temperature: TEMPERATURE,
        })
    }

    /// Applies stream progress for `generation`. Returns whether the transcript changed.
    pub fn apply(&mut self, generation: u64, update: StreamUpdate) -> bool {
        if !self.streaming || generation != self.generation {
            log::debug!(
                "[mentor] dropping update for generation {} (current {}, streaming {})",
                generation,
                self.generation,
                self.streaming
            );
            return false;
        }
        match update {
            StreamUpdate::Chunk(text) => {
                if text.is_empty() {
                    return false;
                }
                self.accumulated.push_str(&text);
                self.set_placeholder(self.accumulated.clone());
            }
            StreamUpdate::Finished => {
                log::info!(
                    "[mentor] stream {} finished ({} chars)",
                    generation,
                    self.accumulated.len()
                );
                self.finish();
            }
            StreamUpdate::Failed(reason) => {
                log::error!("[mentor] neural desync on stream {}: {}", generation, reason);
                self.set_placeholder(DESYNC_MESSAGE.to_string());
                self.finish();
            }
        }
        true
    }

    fn set_placeholder(&mut self, text: String) {
        if let Some(last) = self.transcript.last_mut() {
            last.text = text;
        }
    }

    fn finish(&mut self) {
        self.streaming = false;
        self.accumulated.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mentor::Role;

    fn session_with_input(text: &str) -> ChatSession {
        let mut s = ChatSession::new();
        *s.input_mut() = text.to_string();
        s
    }

    #[test]
    fn starts_with_seed_turn() {
        let s = ChatSession::new();
        assert_eq!(s.transcript(), &[Turn::assistant(SEED_MESSAGE)]);
        assert!(!s.is_streaming());
    }

    #[test]
    fn blank_input_is_rejected() {
        for blank in ["", "   ", "\n\t "] {
            let mut s = session_with_input(blank);
            assert!(s.submit().is_none());
            assert_eq!(s.transcript().len(), 1);
            assert!(!s.is_streaming());
        }
    }

    #[test]
    fn submit_appends_user_and_placeholder_and_clears_input() {
        let mut s = session_with_input("Build me a grid.");
        let req = s.submit().expect("request issued");

        assert_eq!(s.input(), "");
        assert!(s.is_streaming());
        assert!(s.awaiting_first_chunk());
        assert_eq!(
            s.transcript(),
            &[
                Turn::assistant(SEED_MESSAGE),
                Turn::user("Build me a grid."),
                Turn::assistant(""),
            ]
        );

        assert_eq!(req.history.len(), 2);
        assert_eq!(req.history[1], Turn::user("Build me a grid."));
        assert_eq!(
            req.history.iter().filter(|t| t.role == Role::User).count(),
            1
        );
        assert_eq!(req.temperature, TEMPERATURE);
        assert_eq!(req.system_instruction, PERSONA_INSTRUCTION);
    }

    #[test]
    fn submit_while_streaming_is_noop() {
        let mut s = session_with_input("first");
        s.submit().unwrap();
        *s.input_mut() = "second".into();

        assert!(s.submit().is_none());
        assert_eq!(s.transcript().len(), 3);
        assert_eq!(s.input(), "second");
    }

    #[test]
    fn chunks_accumulate_into_placeholder() {
        let mut s = session_with_input("status?");
        let gen = s.submit().unwrap().generation;

        let mut seen = Vec::new();
        for chunk in ["Gr", "id ", "online."] {
            assert!(s.apply(gen, StreamUpdate::Chunk(chunk.into())));
            seen.push(s.transcript().last().unwrap().text.clone());
        }
        assert_eq!(seen, ["Gr", "Grid ", "Grid online."]);

        s.apply(gen, StreamUpdate::Finished);
        assert!(!s.is_streaming());
        assert_eq!(s.transcript().last().unwrap(), &Turn::assistant("Grid online."));
    }

    #[test]
    fn empty_stream_finishes_with_empty_text() {
        let mut s = session_with_input("hello");
        let gen = s.submit().unwrap().generation;
        assert!(!s.apply(gen, StreamUpdate::Chunk(String::new())));
        s.apply(gen, StreamUpdate::Finished);
        assert!(!s.is_streaming());
        assert_eq!(s.transcript().last().unwrap().text, "");
    }

    #[test]
    fn failure_writes_diagnostic_and_returns_to_idle() {
        let mut s = session_with_input("hello");
        let gen = s.submit().unwrap().generation;
        s.apply(gen, StreamUpdate::Chunk("partial".into()));
        s.apply(gen, StreamUpdate::Failed("401 Unauthorized".into()));

        assert!(!s.is_streaming());
        assert_eq!(s.transcript().last().unwrap().text, DESYNC_MESSAGE);

        *s.input_mut() = "retry".into();
        let next = s.submit().expect("idle again");
        assert_eq!(next.generation, gen + 1);
        assert_eq!(s.transcript().len(), 5);
        assert_eq!(s.transcript()[3], Turn::user("retry"));
    }

    #[test]
    fn history_carries_prior_turns_in_order() {
        let mut s = session_with_input("one");
        let gen = s.submit().unwrap().generation;
        s.apply(gen, StreamUpdate::Chunk("ack one".into()));
        s.apply(gen, StreamUpdate::Finished);

        *s.input_mut() = "two".into();
        let req = s.submit().unwrap();
        let texts: Vec<&str> = req.history.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, [SEED_MESSAGE, "one", "ack one", "two"]);
    }

    #[test]
    fn stale_and_post_finish_updates_are_ignored() {
        let mut s = session_with_input("hello");
        let gen = s.submit().unwrap().generation;
        assert!(!s.apply(gen + 7, StreamUpdate::Chunk("ghost".into())));
        s.apply(gen, StreamUpdate::Chunk("real".into()));
        s.apply(gen, StreamUpdate::Finished);

        assert!(!s.apply(gen, StreamUpdate::Chunk(" more".into())));
        assert!(!s.apply(gen, StreamUpdate::Failed("late".into())));
        assert_eq!(s.transcript().last().unwrap().text, "real");
    }
}
