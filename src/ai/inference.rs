//! Pips the opponent provably lacks, inferred from how the board and boneyard change between turns.

use crate::domino::{Board, HAND_SIZE, MAX_PIP, TOTAL_TILES};

/// Remembers the position right after this player's last decision and compares it with the next
/// one it is shown.
#[derive(Debug, Clone, PartialEq)]
pub struct AbsenceTracker {
    last_board: Board,
    last_boneyard_size: usize,
    // the next observation follows this player's own draw, not an opponent turn
    awaiting_draw: bool,
    absent: u8,
}

impl Default for AbsenceTracker {
    fn default() -> Self {
        Self {
            last_board: Board::new(),
            last_boneyard_size: TOTAL_TILES - 2 * HAND_SIZE,
            awaiting_draw: false,
            absent: 0,
        }
    }
}

impl AbsenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absent_pips(&self) -> Vec<u8> {
        (0..=MAX_PIP).filter(|pip| self.absent & (1 << pip) != 0).collect()
    }

    /// Updates the absent pips from the position this player is now asked to move in.
    pub fn observe(&mut self, board: &Board, boneyard_size: usize) {
        // a shorter board means a new round
        if board.len() < self.last_board.len() {
            *self = Self::default();
        }

        if std::mem::take(&mut self.awaiting_draw) {
            self.last_board = *board;
            self.last_boneyard_size = boneyard_size;
            return;
        }

        let added = board.tiles().difference(self.last_board.tiles()).len();
        let drawn = self.last_boneyard_size.saturating_sub(boneyard_size);

        // freshly drawn tiles may carry anything
        if drawn > added {
            self.absent = 0;
        }

        if added == 0 {
            // the opponent passed or drew without finding a play
            if let Some((left, right)) = board.open_ends() {
                self.mark(left);
                self.mark(right);
            }
        } else if added == 1 && drawn >= 1 {
            // it had to draw before playing, so nothing it kept matched the old ends
            if let Some((left, right)) = self.last_board.open_ends() {
                self.mark(left);
                self.mark(right);
            }
        }

        self.last_board = *board;
        self.last_boneyard_size = boneyard_size;
    }

    /// Records the position this player leaves behind: the board after its placement, or the
    /// boneyard it is about to draw from.
    pub fn record_decision(&mut self, board_after: &Board, boneyard_after: usize, drew: bool) {
        self.last_board = *board_after;
        self.last_boneyard_size = boneyard_after;
        self.awaiting_draw = drew;
    }

    fn mark(&mut self, pip: u8) {
        self.absent |= 1 << pip;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domino::{End, Placement, Tile};

    fn t(a: u8, b: u8) -> Tile {
        Tile::new(a, b).unwrap()
    }

    fn board(placements: &[(u8, u8, End)]) -> Board {
        Board::from_placements(placements.iter().map(|(a, b, end)| Placement::new(t(*a, *b), *end)))
            .unwrap()
    }

    #[test]
    fn opponent_pass_marks_both_ends() {
        let mut tracker = AbsenceTracker::new();
        let mine = board(&[(2, 4, End::Left)]);
        tracker.record_decision(&mine, 0, false);

        // the opponent did nothing with an empty boneyard
        tracker.observe(&mine, 0);
        assert_eq!(tracker.absent_pips(), vec![2, 4]);
    }

    #[test]
    fn draw_then_play_marks_the_old_ends() {
        let mut tracker = AbsenceTracker::new();
        let mine = board(&[(2, 4, End::Left)]);
        tracker.record_decision(&mine, 10, false);

        let after = board(&[(2, 4, End::Left), (4, 6, End::Right)]);
        tracker.observe(&after, 9);
        assert_eq!(tracker.absent_pips(), vec![2, 4]);
    }

    #[test]
    fn plain_reply_learns_nothing() {
        let mut tracker = AbsenceTracker::new();
        let mine = board(&[(2, 4, End::Left)]);
        tracker.record_decision(&mine, 10, false);

        let after = board(&[(2, 4, End::Left), (4, 6, End::Right)]);
        tracker.observe(&after, 10);
        assert!(tracker.absent_pips().is_empty());
    }

    #[test]
    fn extra_draws_forget_old_certainties() {
        let mut tracker = AbsenceTracker::new();
        let mine = board(&[(2, 4, End::Left)]);
        tracker.record_decision(&mine, 10, false);
        tracker.observe(&mine, 10);
        assert_eq!(tracker.absent_pips(), vec![2, 4]);

        let next = board(&[(2, 4, End::Left), (4, 5, End::Right)]);
        tracker.record_decision(&next, 10, false);

        // the opponent drew three and played one
        let after = board(&[(2, 4, End::Left), (4, 5, End::Right), (5, 5, End::Right)]);
        tracker.observe(&after, 7);
        assert_eq!(tracker.absent_pips(), vec![2, 5]);
    }

    #[test]
    fn own_draw_is_not_mistaken_for_an_opponent_pass() {
        let mut tracker = AbsenceTracker::new();
        let mine = board(&[(2, 4, End::Left)]);
        tracker.record_decision(&mine, 9, true);

        tracker.observe(&mine, 9);
        assert!(tracker.absent_pips().is_empty());
    }

    #[test]
    fn new_round_resets() {
        let mut tracker = AbsenceTracker::new();
        let mine = board(&[(2, 4, End::Left), (4, 4, End::Right)]);
        tracker.record_decision(&mine, 0, false);
        tracker.observe(&mine, 0);
        assert!(!tracker.absent_pips().is_empty());

        tracker.observe(&board(&[(1, 1, End::Left)]), 14);
        assert!(tracker.absent_pips().is_empty());
    }
}
