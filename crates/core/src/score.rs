//! Score module - session score and process-lifetime high score
//!
//! The score only grows while a session is playing. When the session ends it
//! is compared against the high score and reset to zero. The high score lives
//! as long as the process (there is no persistence).

use crate::types::SCORE_DISPLAY_MAX;

/// Score and high score for the running process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Scoreboard {
    score: u32,
    high_score: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Add the merge score of an applied move
    pub fn add(&mut self, delta: u32) {
        self.score = self.score.saturating_add(delta);
    }

    /// End the session: raise the high score if beaten, then zero the score.
    ///
    /// Returns true when a new high score was set.
    pub fn close_session(&mut self) -> bool {
        let beaten = self.score > self.high_score;
        if beaten {
            self.high_score = self.score;
        }
        self.score = 0;
        beaten
    }
}

/// Clamp a score to what the 4-digit display can show
pub fn display_score(score: u32) -> u32 {
    score.min(SCORE_DISPLAY_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates() {
        let mut board = Scoreboard::new();
        board.add(4);
        board.add(12);
        assert_eq!(board.score(), 16);
        assert_eq!(board.high_score(), 0);
    }

    #[test]
    fn test_close_session_records_high_score() {
        let mut board = Scoreboard::new();
        board.add(100);
        assert!(board.close_session());
        assert_eq!(board.score(), 0);
        assert_eq!(board.high_score(), 100);

        // Lower and equal scores leave the high score alone.
        board.add(40);
        assert!(!board.close_session());
        board.add(100);
        assert!(!board.close_session());
        assert_eq!(board.high_score(), 100);
        assert_eq!(board.score(), 0);
    }

    #[test]
    fn test_display_clamps() {
        assert_eq!(display_score(0), 0);
        assert_eq!(display_score(9999), 9999);
        assert_eq!(display_score(123_456), SCORE_DISPLAY_MAX);
    }
}
