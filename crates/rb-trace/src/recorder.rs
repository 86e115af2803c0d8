//! Step log of the most recent operation, with a playback cursor.

use crate::step::{Direction, Step};
use crate::types::NodeIdentification;

/// Text of the step handed out when nothing has been recorded.
pub const IDLE_TEXT: &str = "No animation is playing";

/// A step handed out by the player together with the way it must be applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cue<'a> {
    pub step: &'a Step,
    pub direction: Direction,
}

/// Ordered step log and playback cursor.
///
/// The cursor counts the steps already played forward, so it ranges over
/// `0..=len()`. [`next`](Recorder::next) hands out the step at the cursor and
/// advances it, [`previous`](Recorder::previous) moves it back and hands out
/// the step to undo.
#[derive(Clone, Debug)]
pub struct Recorder {
    steps: Vec<Step>,
    cursor: usize,
    idle: Step,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            cursor: 0,
            idle: Step::note(IDLE_TEXT),
        }
    }

    /// Drops every step and rewinds the cursor.
    pub fn reset(&mut self) {
        self.steps.clear();
        self.cursor = 0;
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn note(&mut self, text: impl Into<String>) {
        self.push(Step::note(text));
    }

    pub fn highlight(&mut self, nodes: Vec<NodeIdentification>, text: impl Into<String>) {
        self.push(Step::highlight(nodes, text));
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether every step has been played forward.
    pub fn is_finished(&self) -> bool {
        self.cursor == self.steps.len()
    }

    /// Next step to play forward. Past the end the last step is handed out
    /// again.
    pub fn next(&mut self) -> Cue<'_> {
        if self.steps.is_empty() {
            return Cue {
                step: &self.idle,
                direction: Direction::Forward,
            };
        }
        let at = self.cursor.min(self.steps.len() - 1);
        self.cursor = (self.cursor + 1).min(self.steps.len());
        Cue {
            step: &self.steps[at],
            direction: Direction::Forward,
        }
    }

    /// Step to undo. At the start the first step is handed out again.
    pub fn previous(&mut self) -> Cue<'_> {
        if self.steps.is_empty() {
            return Cue {
                step: &self.idle,
                direction: Direction::Backward,
            };
        }
        self.cursor = self.cursor.saturating_sub(1);
        Cue {
            step: &self.steps[self.cursor],
            direction: Direction::Backward,
        }
    }

    /// Moves the cursor past the last step. The caller redraws from the
    /// current tree instead of replaying.
    pub fn skip(&mut self) {
        self.cursor = self.steps.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(texts: &[&str]) -> Recorder {
        let mut r = Recorder::new();
        for t in texts {
            r.note(*t);
        }
        r
    }

    #[test]
    fn empty_log_hands_out_idle_note() {
        let mut r = Recorder::new();
        assert_eq!(r.next().step.description(), IDLE_TEXT);
        let cue = r.previous();
        assert_eq!(cue.step.description(), IDLE_TEXT);
        assert_eq!(cue.direction, Direction::Backward);
        r.skip();
        assert_eq!(r.cursor(), 0);
    }

    #[test]
    fn next_advances_and_clamps_on_last_step() {
        let mut r = recorder(&["a", "b"]);
        assert_eq!(r.next().step.description(), "a");
        assert_eq!(r.next().step.description(), "b");
        assert!(r.is_finished());
        assert_eq!(r.next().step.description(), "b");
        assert_eq!(r.cursor(), 2);
    }

    #[test]
    fn previous_undoes_in_reverse_order_and_clamps_at_start() {
        let mut r = recorder(&["a", "b", "c"]);
        r.skip();
        let undone: Vec<String> = (0..4)
            .map(|_| r.previous().step.description().to_string())
            .collect();
        assert_eq!(undone, vec!["c", "b", "a", "a"]);
        assert_eq!(r.cursor(), 0);
    }

    #[test]
    fn next_after_previous_replays_the_undone_step() {
        let mut r = recorder(&["a", "b"]);
        r.next();
        r.next();
        assert_eq!(r.previous().step.description(), "b");
        let cue = r.next();
        assert_eq!(cue.step.description(), "b");
        assert_eq!(cue.direction, Direction::Forward);
    }

    #[test]
    fn reset_clears_log_and_cursor() {
        let mut r = recorder(&["a"]);
        r.next();
        r.reset();
        assert!(r.is_empty());
        assert_eq!(r.cursor(), 0);
        assert_eq!(r.len(), 0);
    }
}
