use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Frame, NewFrame};
use crate::scoring::FRAMES_PER_GAME;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub date: NaiveDate,
    pub total_score: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A complete game as entered by the user: always all ten frames at once,
/// never frame-by-frame.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub frames: Vec<NewFrame>,
}

/// Shape of one game in the `--export` JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct GameExport {
    #[serde(flatten)]
    pub game: Game,
    pub frames: Vec<Frame>,
}

impl NewGame {
    /// Parses a game line: ten comma-separated frames, rolls separated by
    /// spaces, a trailing `s` marking a split, and an optional `(note)`
    /// annotation at the end of a frame. A lone `10` is a strike; the tenth
    /// frame takes three rolls when it ends in a strike or spare.
    ///
    /// Example: `10, 9 1, 7 2s (washout), 10, 8 2, 0 0, 5 4, 10, 9 1, 10 10 10`
    ///
    /// This is where roll-value sanity is enforced; the scorer itself
    /// trusts its input.
    pub fn parse_rolls(line: &str) -> Result<Vec<NewFrame>> {
        let groups: Vec<&str> = line.split(',').map(str::trim).collect();
        if groups.len() != FRAMES_PER_GAME {
            return Err(AppError::InvalidGame(format!(
                "expected {} comma-separated frames, got {}",
                FRAMES_PER_GAME,
                groups.len()
            )));
        }

        let mut frames = Vec::with_capacity(FRAMES_PER_GAME);
        for (i, group) in groups.iter().enumerate() {
            let number = i + 1;

            // Optional trailing "(note)" annotation. Notes cannot contain
            // commas since those separate frames.
            let (group, notes) = match group.rfind('(') {
                Some(start) if group.ends_with(')') => {
                    let note = group[start + 1..group.len() - 1].trim();
                    (
                        group[..start].trim_end(),
                        (!note.is_empty()).then(|| note.to_string()),
                    )
                }
                _ => (*group, None),
            };

            let (group, is_split) = match group.strip_suffix(['s', 'S']) {
                Some(rest) => (rest.trim_end(), true),
                None => (group, false),
            };

            let mut rolls = Vec::new();
            for token in group.split_whitespace() {
                let pins: u8 = token.parse().map_err(|_| {
                    AppError::InvalidGame(format!("frame {number}: '{token}' is not a roll"))
                })?;
                if pins > 10 {
                    return Err(AppError::InvalidGame(format!(
                        "frame {number}: a roll cannot exceed 10 pins"
                    )));
                }
                rolls.push(pins);
            }

            let frame = if number < FRAMES_PER_GAME {
                Self::parse_regular_frame(number, &rolls)?
            } else {
                Self::parse_tenth_frame(&rolls)?
            };

            frames.push(NewFrame {
                roll1: frame.0,
                roll2: frame.1,
                roll3: frame.2,
                is_split,
                notes,
            });
        }

        Ok(frames)
    }

    fn parse_regular_frame(number: usize, rolls: &[u8]) -> Result<(u8, u8, u8)> {
        match rolls {
            [10] => Ok((10, 0, 0)),
            [_] => Err(AppError::InvalidGame(format!(
                "frame {number}: only a strike may be entered as a single roll"
            ))),
            [roll1, roll2] => {
                if roll1 + roll2 > 10 {
                    return Err(AppError::InvalidGame(format!(
                        "frame {number}: two rolls cannot total more than 10 pins"
                    )));
                }
                Ok((*roll1, *roll2, 0))
            }
            _ => Err(AppError::InvalidGame(format!(
                "frame {number}: expected one or two rolls"
            ))),
        }
    }

    fn parse_tenth_frame(rolls: &[u8]) -> Result<(u8, u8, u8)> {
        match rolls {
            [roll1, roll2] => {
                if *roll1 == 10 || roll1 + roll2 == 10 {
                    return Err(AppError::InvalidGame(
                        "frame 10: a strike or spare earns a third roll".to_string(),
                    ));
                }
                if roll1 + roll2 > 10 {
                    return Err(AppError::InvalidGame(
                        "frame 10: an open frame cannot total more than 10 pins".to_string(),
                    ));
                }
                Ok((*roll1, *roll2, 0))
            }
            [roll1, roll2, roll3] => {
                if *roll1 != 10 && roll1 + roll2 != 10 {
                    return Err(AppError::InvalidGame(
                        "frame 10: a third roll requires a strike or spare".to_string(),
                    ));
                }
                // After a strike, the second and third balls share a rack
                // unless the second is itself a strike.
                if *roll1 == 10 && *roll2 != 10 && roll2 + roll3 > 10 {
                    return Err(AppError::InvalidGame(
                        "frame 10: bonus rolls cannot total more than 10 pins".to_string(),
                    ));
                }
                Ok((*roll1, *roll2, *roll3))
            }
            _ => Err(AppError::InvalidGame(
                "frame 10: expected two or three rolls".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_mixed_game() {
        let frames =
            NewGame::parse_rolls("10, 9 1, 7 2s, 10, 8 2, 0 0, 5 4, 10, 9 1, 10 10 10").unwrap();
        assert_eq!(frames.len(), 10);

        assert_eq!((frames[0].roll1, frames[0].roll2), (10, 0));
        assert!(!frames[0].is_split);
        assert!(frames[2].is_split);
        assert_eq!((frames[2].roll1, frames[2].roll2), (7, 2));
        assert_eq!(
            (frames[9].roll1, frames[9].roll2, frames[9].roll3),
            (10, 10, 10)
        );
    }

    #[test]
    fn frame_notes_come_from_parenthesized_annotations() {
        let line = "10, 9 1 (left the 7 pin), 7 2s (washout), 10, 8 2, 0 0, 5 4, 10, 9 1, 10 10 10";
        let frames = NewGame::parse_rolls(line).unwrap();

        assert!(frames[0].notes.is_none());
        assert_eq!(frames[1].notes.as_deref(), Some("left the 7 pin"));
        assert_eq!((frames[1].roll1, frames[1].roll2), (9, 1));

        // Split marker and note combine on one frame.
        assert!(frames[2].is_split);
        assert_eq!(frames[2].notes.as_deref(), Some("washout"));
        assert_eq!((frames[2].roll1, frames[2].roll2), (7, 2));
    }

    #[test]
    fn empty_annotation_is_dropped() {
        let line = "0 0 (), 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0";
        let frames = NewGame::parse_rolls(line).unwrap();
        assert!(frames[0].notes.is_none());
    }

    #[test]
    fn tenth_frame_open_takes_two_rolls() {
        let line = "0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 4 3";
        let frames = NewGame::parse_rolls(line).unwrap();
        assert_eq!(
            (frames[9].roll1, frames[9].roll2, frames[9].roll3),
            (4, 3, 0)
        );
    }

    #[test]
    fn tenth_frame_spare_requires_third_roll() {
        let line = "0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 6 4";
        assert!(NewGame::parse_rolls(line).is_err());

        let line = "0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 6 4 8";
        assert!(NewGame::parse_rolls(line).is_ok());
    }

    #[test]
    fn third_roll_without_a_mark_is_rejected() {
        let line = "0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 3 4 2";
        assert!(NewGame::parse_rolls(line).is_err());
    }

    #[test]
    fn rejects_wrong_frame_count() {
        assert!(NewGame::parse_rolls("10, 10, 10").is_err());
    }

    #[test]
    fn rejects_excess_pins() {
        let line = "7 9, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0";
        assert!(NewGame::parse_rolls(line).is_err());

        let line = "11, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0";
        assert!(NewGame::parse_rolls(line).is_err());
    }

    #[test]
    fn rejects_single_roll_open_frame() {
        let line = "7, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0";
        assert!(NewGame::parse_rolls(line).is_err());
    }
}
