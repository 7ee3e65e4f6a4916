//! Regulation ten-pin scoring: a single forward pass over the ten frames,
//! with strike/spare bonuses read from the following frames and the tenth
//! frame carrying its own bonus rolls.

use thiserror::Error;

pub const FRAMES_PER_GAME: usize = 10;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ScoreError {
    #[error("a game has exactly {FRAMES_PER_GAME} frames, got {0}")]
    WrongFrameCount(usize),
    #[error("frame numbers must be a permutation of 1 through {FRAMES_PER_GAME}")]
    BadFrameNumbers,
}

/// Raw pinfall for one frame. `roll3` is only ever nonzero in the tenth
/// frame, where the bonus rolls live in the frame itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRolls {
    pub roll1: u8,
    pub roll2: u8,
    pub roll3: u8,
}

impl FrameRolls {
    pub fn new(roll1: u8, roll2: u8, roll3: u8) -> Self {
        Self { roll1, roll2, roll3 }
    }

    pub fn is_strike(&self) -> bool {
        self.roll1 == 10
    }

    pub fn is_spare(&self) -> bool {
        !self.is_strike() && self.roll1 + self.roll2 == 10
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameScore {
    pub frame_score: u32,
    pub running_total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredGame {
    pub frames: Vec<FrameScore>,
    pub total: u32,
}

/// Scores a complete game. `rolls` must be the ten frames in order.
///
/// Roll-value sanity (pin counts, two-roll sums) is the caller's problem;
/// this function only refuses input it cannot index safely.
pub fn score_game(rolls: &[FrameRolls]) -> Result<ScoredGame, ScoreError> {
    if rolls.len() != FRAMES_PER_GAME {
        return Err(ScoreError::WrongFrameCount(rolls.len()));
    }

    let last = FRAMES_PER_GAME - 1;
    let mut frames = Vec::with_capacity(FRAMES_PER_GAME);
    let mut running_total = 0u32;

    for (i, frame) in rolls.iter().enumerate() {
        let frame_score = if frame.is_strike() {
            let bonus = if i == last {
                // The tenth frame's bonus balls are its own second and third rolls.
                u32::from(frame.roll2) + u32::from(frame.roll3)
            } else if i == last - 1 && rolls[last].is_strike() {
                // Ninth frame strike followed by a tenth-frame strike: the
                // second bonus ball is the tenth frame's own second roll,
                // not a roll from a frame after it.
                10 + u32::from(rolls[last].roll2)
            } else if rolls[i + 1].is_strike() {
                10 + u32::from(rolls[i + 2].roll1)
            } else {
                u32::from(rolls[i + 1].roll1) + u32::from(rolls[i + 1].roll2)
            };
            10 + bonus
        } else if frame.is_spare() {
            let bonus = if i == last {
                u32::from(frame.roll3)
            } else {
                u32::from(rolls[i + 1].roll1)
            };
            10 + bonus
        } else {
            // Open frame. roll3 is zero outside the tenth frame, so this is
            // roll1 + roll2 everywhere it needs to be.
            u32::from(frame.roll1) + u32::from(frame.roll2) + u32::from(frame.roll3)
        };

        running_total += frame_score;
        frames.push(FrameScore {
            frame_score,
            running_total,
        });
    }

    Ok(ScoredGame {
        frames,
        total: running_total,
    })
}

/// Scores frames tagged with their 1-based frame number, in any order.
/// Fails if the numbers are not exactly the set 1..=10.
pub fn score_numbered(frames: &[(u8, FrameRolls)]) -> Result<ScoredGame, ScoreError> {
    if frames.len() != FRAMES_PER_GAME {
        return Err(ScoreError::WrongFrameCount(frames.len()));
    }

    let mut ordered: [Option<FrameRolls>; FRAMES_PER_GAME] = [None; FRAMES_PER_GAME];
    for &(number, rolls) in frames {
        let slot = ordered
            .get_mut(usize::from(number).wrapping_sub(1))
            .ok_or(ScoreError::BadFrameNumbers)?;
        if slot.replace(rolls).is_some() {
            return Err(ScoreError::BadFrameNumbers);
        }
    }

    // Ten entries, no duplicates, every number in range: all slots are filled.
    let ordered: Vec<FrameRolls> = ordered.into_iter().flatten().collect();
    score_game(&ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(roll1: u8, roll2: u8) -> FrameRolls {
        FrameRolls::new(roll1, roll2, 0)
    }

    fn strike() -> FrameRolls {
        FrameRolls::new(10, 0, 0)
    }

    #[test]
    fn gutter_game_scores_zero() {
        let scored = score_game(&[open(0, 0); 10]).unwrap();
        assert_eq!(scored.total, 0);
        assert!(scored.frames.iter().all(|f| f.frame_score == 0));
        assert!(scored.frames.iter().all(|f| f.running_total == 0));
    }

    #[test]
    fn perfect_game_scores_300() {
        let mut rolls = vec![strike(); 9];
        rolls.push(FrameRolls::new(10, 10, 10));

        let scored = score_game(&rolls).unwrap();
        assert_eq!(scored.total, 300);
        assert!(scored.frames.iter().all(|f| f.frame_score == 30));
        assert_eq!(scored.frames[0].running_total, 30);
        assert_eq!(scored.frames[9].running_total, 300);
    }

    #[test]
    fn all_spares_scores_150() {
        let mut rolls = vec![open(5, 5); 9];
        rolls.push(FrameRolls::new(5, 5, 5));

        let scored = score_game(&rolls).unwrap();
        assert_eq!(scored.total, 150);
        assert!(scored.frames.iter().all(|f| f.frame_score == 15));
    }

    #[test]
    fn single_strike_then_open_frames() {
        let mut rolls = vec![strike()];
        rolls.extend(vec![open(3, 4); 9]);

        let scored = score_game(&rolls).unwrap();
        assert_eq!(scored.frames[0].frame_score, 17);
        assert_eq!(scored.frames[1].frame_score, 7);
        assert_eq!(scored.total, 17 + 9 * 7);
    }

    #[test]
    fn ninth_frame_strike_reads_both_tenth_frame_rolls() {
        let mut rolls = vec![open(2, 3); 8];
        rolls.push(strike());
        rolls.push(open(4, 3));

        let scored = score_game(&rolls).unwrap();
        assert_eq!(scored.frames[8].frame_score, 17);
        assert_eq!(scored.total, 8 * 5 + 17 + 7);
    }

    #[test]
    fn ninth_and_tenth_frame_strikes() {
        let mut rolls = vec![open(0, 0); 8];
        rolls.push(strike());
        rolls.push(FrameRolls::new(10, 7, 2));

        let scored = score_game(&rolls).unwrap();
        // Ninth frame bonus is the tenth frame's first two balls: 10 and 7.
        assert_eq!(scored.frames[8].frame_score, 27);
        assert_eq!(scored.frames[9].frame_score, 19);
        assert_eq!(scored.total, 46);
    }

    #[test]
    fn eighth_frame_strike_looks_two_frames_ahead() {
        let mut rolls = vec![open(0, 0); 7];
        rolls.push(strike());
        rolls.push(strike());
        rolls.push(open(3, 4));

        let scored = score_game(&rolls).unwrap();
        // Frame 8's second bonus ball is frame 10's first roll.
        assert_eq!(scored.frames[7].frame_score, 23);
        assert_eq!(scored.frames[8].frame_score, 17);
        assert_eq!(scored.frames[9].frame_score, 7);
        assert_eq!(scored.total, 47);
    }

    #[test]
    fn spare_bonus_is_next_first_roll() {
        let mut rolls = vec![open(7, 3), open(4, 2)];
        rolls.extend(vec![open(0, 0); 8]);

        let scored = score_game(&rolls).unwrap();
        assert_eq!(scored.frames[0].frame_score, 14);
        assert_eq!(scored.total, 14 + 6);
    }

    #[test]
    fn tenth_frame_spare_bonus_is_its_own_third_roll() {
        let mut rolls = vec![open(0, 0); 9];
        rolls.push(FrameRolls::new(6, 4, 8));

        let scored = score_game(&rolls).unwrap();
        assert_eq!(scored.frames[9].frame_score, 18);
        assert_eq!(scored.total, 18);
    }

    #[test]
    fn running_total_is_monotone_and_ends_at_total() {
        let rolls = [
            strike(),
            open(7, 3),
            open(4, 4),
            strike(),
            strike(),
            open(0, 9),
            open(5, 5),
            open(2, 6),
            strike(),
            FrameRolls::new(9, 1, 7),
        ];

        let scored = score_game(&rolls).unwrap();
        let mut prev = 0;
        for frame in &scored.frames {
            assert!(frame.running_total >= prev);
            prev = frame.running_total;
        }
        assert_eq!(scored.frames[9].running_total, scored.total);
    }

    #[test]
    fn scoring_is_idempotent() {
        let mut rolls = vec![strike(), open(9, 1), open(8, 1)];
        rolls.extend(vec![open(5, 4); 6]);
        rolls.push(FrameRolls::new(10, 3, 6));

        let first = score_game(&rolls).unwrap();
        let second = score_game(&rolls).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn wrong_frame_count_is_rejected() {
        assert_eq!(
            score_game(&[open(0, 0); 9]),
            Err(ScoreError::WrongFrameCount(9))
        );
        assert_eq!(
            score_game(&[open(0, 0); 11]),
            Err(ScoreError::WrongFrameCount(11))
        );
    }

    #[test]
    fn numbered_frames_may_arrive_out_of_order() {
        let mut numbered: Vec<(u8, FrameRolls)> = (1..=9).map(|n| (n, open(3, 4))).collect();
        numbered.push((10, open(3, 4)));
        numbered.reverse();

        let scored = score_numbered(&numbered).unwrap();
        assert_eq!(scored.total, 70);
    }

    #[test]
    fn duplicate_or_out_of_range_frame_numbers_are_rejected() {
        let mut duplicated: Vec<(u8, FrameRolls)> = (1..=9).map(|n| (n, open(0, 0))).collect();
        duplicated.push((9, open(0, 0)));
        assert_eq!(score_numbered(&duplicated), Err(ScoreError::BadFrameNumbers));

        let mut out_of_range: Vec<(u8, FrameRolls)> = (1..=9).map(|n| (n, open(0, 0))).collect();
        out_of_range.push((11, open(0, 0)));
        assert_eq!(
            score_numbered(&out_of_range),
            Err(ScoreError::BadFrameNumbers)
        );

        // Frame numbers are 1-based; 0 must not wrap into a valid slot.
        let mut zero_numbered: Vec<(u8, FrameRolls)> = (1..=9).map(|n| (n, open(0, 0))).collect();
        zero_numbered.push((0, open(0, 0)));
        assert_eq!(
            score_numbered(&zero_numbered),
            Err(ScoreError::BadFrameNumbers)
        );
    }
}
