use serde::{Deserialize, Serialize};

use crate::scoring::FrameRolls;

/// One stored frame of a game. Strike/spare are derived from the rolls
/// rather than stored, so the flags can never disagree with the pinfall.
/// `is_split` stays stored because a split is a judgment about pin layout,
/// not something the rolls encode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub id: i64,
    pub game_id: i64,
    pub frame_number: u8,
    pub roll1: u8,
    pub roll2: u8,
    pub roll3: u8,
    pub is_split: bool,
    pub notes: Option<String>,
    pub frame_score: i64,
    pub running_total: i64,
}

impl Frame {
    pub fn rolls(&self) -> FrameRolls {
        FrameRolls::new(self.roll1, self.roll2, self.roll3)
    }

    pub fn is_strike(&self) -> bool {
        self.rolls().is_strike()
    }

    pub fn is_spare(&self) -> bool {
        self.rolls().is_spare()
    }
}

/// Frame data as entered by the user, before scoring and persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFrame {
    pub roll1: u8,
    pub roll2: u8,
    pub roll3: u8,
    pub is_split: bool,
    pub notes: Option<String>,
}

impl NewFrame {
    pub fn rolls(&self) -> FrameRolls {
        FrameRolls::new(self.roll1, self.roll2, self.roll3)
    }
}
