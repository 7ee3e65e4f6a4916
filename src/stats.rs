//! Aggregate statistics over the stored games, the numbers behind the
//! dashboard pane and `--stats`.

use crate::models::{Frame, Game};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarkStats {
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameStats {
    pub total_games: usize,
    pub avg_score: f64,
    pub high_score: i64,
    pub low_score: i64,
    /// Mean frame score per frame number, index 0 = frame 1.
    pub frame_averages: [f64; 10],
    pub strikes: MarkStats,
    pub spares: MarkStats,
    pub splits: MarkStats,
}

pub fn compute(games: &[Game], frames: &[Frame]) -> GameStats {
    if games.is_empty() {
        return GameStats::default();
    }

    let total_games = games.len();
    let score_sum: i64 = games.iter().map(|g| g.total_score).sum();
    let avg_score = score_sum as f64 / total_games as f64;
    let high_score = games.iter().map(|g| g.total_score).max().unwrap_or(0);
    let low_score = games.iter().map(|g| g.total_score).min().unwrap_or(0);

    let mut frame_averages = [0.0; 10];
    for (i, avg) in frame_averages.iter_mut().enumerate() {
        let number = (i + 1) as u8;
        let scores: Vec<i64> = frames
            .iter()
            .filter(|f| f.frame_number == number)
            .map(|f| f.frame_score)
            .collect();
        if !scores.is_empty() {
            *avg = scores.iter().sum::<i64>() as f64 / scores.len() as f64;
        }
    }

    let total_frames = frames.len();
    let strikes = frames.iter().filter(|f| f.is_strike()).count();
    let spares = frames.iter().filter(|f| f.is_spare()).count();
    let splits = frames.iter().filter(|f| f.is_split).count();

    GameStats {
        total_games,
        avg_score,
        high_score,
        low_score,
        frame_averages,
        strikes: mark_stats(strikes, total_frames),
        spares: mark_stats(spares, total_frames),
        splits: mark_stats(splits, total_frames),
    }
}

fn mark_stats(count: usize, total_frames: usize) -> MarkStats {
    let percentage = if total_frames > 0 {
        count as f64 / total_frames as f64 * 100.0
    } else {
        0.0
    };
    MarkStats { count, percentage }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn game(id: i64, total_score: i64) -> Game {
        Game {
            id,
            date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            total_score,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn frame(game_id: i64, frame_number: u8, rolls: (u8, u8, u8), score: i64) -> Frame {
        Frame {
            id: 0,
            game_id,
            frame_number,
            roll1: rolls.0,
            roll2: rolls.1,
            roll3: rolls.2,
            is_split: false,
            notes: None,
            frame_score: score,
            running_total: 0,
        }
    }

    #[test]
    fn empty_store_yields_zeroed_stats() {
        let stats = compute(&[], &[]);
        assert_eq!(stats, GameStats::default());
    }

    #[test]
    fn aggregates_scores_and_marks() {
        let games = vec![game(1, 100), game(2, 150)];
        let mut frames = vec![
            frame(1, 1, (10, 0, 0), 20), // strike
            frame(1, 2, (7, 3, 0), 15),  // spare
            frame(2, 1, (5, 2, 0), 7),   // open
        ];
        frames[2].is_split = true;

        let stats = compute(&games, &frames);
        assert_eq!(stats.total_games, 2);
        assert_eq!(stats.avg_score, 125.0);
        assert_eq!(stats.high_score, 150);
        assert_eq!(stats.low_score, 100);

        assert_eq!(stats.strikes.count, 1);
        assert_eq!(stats.spares.count, 1);
        assert_eq!(stats.splits.count, 1);
        assert!((stats.strikes.percentage - 100.0 / 3.0).abs() < 1e-9);

        // Frame 1 averages over both games, frame 2 only has one sample.
        assert_eq!(stats.frame_averages[0], 13.5);
        assert_eq!(stats.frame_averages[1], 15.0);
        assert_eq!(stats.frame_averages[9], 0.0);
    }
}
