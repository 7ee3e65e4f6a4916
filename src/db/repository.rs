use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tokio_rusqlite::Connection;

use crate::error::Result;
use crate::models::{Frame, Game, NewGame};
use crate::scoring::ScoredGame;

use super::schema::SCHEMA;

pub struct Repository {
    conn: Connection,
}

impl Repository {
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).await?;

        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    // Game operations

    /// Inserts a game together with its ten scored frames, atomically.
    pub async fn insert_game(&self, game: NewGame, scored: &ScoredGame) -> Result<i64> {
        let scored = scored.clone();
        let id = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                tx.execute(
                    "INSERT INTO games (date, total_score, notes) VALUES (?1, ?2, ?3)",
                    params![game.date.to_string(), scored.total, game.notes],
                )?;
                let game_id = tx.last_insert_rowid();

                for (i, (frame, score)) in game.frames.iter().zip(&scored.frames).enumerate() {
                    tx.execute(
                        r#"INSERT INTO frames
                               (game_id, frame_number, roll1, roll2, roll3,
                                is_split, notes, frame_score, running_total)
                           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"#,
                        params![
                            game_id,
                            (i + 1) as i64,
                            frame.roll1,
                            frame.roll2,
                            frame.roll3,
                            frame.is_split,
                            frame.notes,
                            score.frame_score,
                            score.running_total,
                        ],
                    )?;
                }

                tx.commit()?;
                Ok(game_id)
            })
            .await?;
        Ok(id)
    }

    pub async fn get_all_games(&self) -> Result<Vec<Game>> {
        let games = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, date, total_score, notes, created_at FROM games
                     ORDER BY date DESC, created_at DESC",
                )?;
                let games = stmt
                    .query_map([], |row| Ok(game_from_row(row)))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(games)
            })
            .await?;
        Ok(games)
    }

    pub async fn get_game(&self, id: i64) -> Result<Option<Game>> {
        let game = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, date, total_score, notes, created_at FROM games WHERE id = ?1",
                )?;
                let game = stmt
                    .query_row(params![id], |row| Ok(game_from_row(row)))
                    .optional()?;
                Ok(game)
            })
            .await?;
        Ok(game)
    }

    pub async fn delete_game(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                tx.execute("DELETE FROM frames WHERE game_id = ?1", params![id])?;
                tx.execute("DELETE FROM games WHERE id = ?1", params![id])?;
                tx.commit()?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    /// Rewrites the stored per-frame scores and game total (used by rescore).
    pub async fn update_scores(&self, game_id: i64, scored: &ScoredGame) -> Result<()> {
        let scored = scored.clone();
        self.conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                for (i, score) in scored.frames.iter().enumerate() {
                    tx.execute(
                        "UPDATE frames SET frame_score = ?1, running_total = ?2
                         WHERE game_id = ?3 AND frame_number = ?4",
                        params![
                            score.frame_score,
                            score.running_total,
                            game_id,
                            (i + 1) as i64
                        ],
                    )?;
                }
                tx.execute(
                    "UPDATE games SET total_score = ?1 WHERE id = ?2",
                    params![scored.total, game_id],
                )?;
                tx.commit()?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    // Frame operations

    pub async fn get_frames(&self, game_id: i64) -> Result<Vec<Frame>> {
        let frames = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, game_id, frame_number, roll1, roll2, roll3,
                            is_split, notes, frame_score, running_total
                     FROM frames WHERE game_id = ?1 ORDER BY frame_number",
                )?;
                let frames = stmt
                    .query_map(params![game_id], |row| Ok(frame_from_row(row)))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(frames)
            })
            .await?;
        Ok(frames)
    }

    pub async fn get_all_frames(&self) -> Result<Vec<Frame>> {
        let frames = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, game_id, frame_number, roll1, roll2, roll3,
                            is_split, notes, frame_score, running_total
                     FROM frames ORDER BY game_id, frame_number",
                )?;
                let frames = stmt
                    .query_map([], |row| Ok(frame_from_row(row)))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(frames)
            })
            .await?;
        Ok(frames)
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    // Try RFC3339 first (e.g., "2026-01-11T12:34:56+00:00")
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Try SQLite datetime format (e.g., "2026-01-11 12:34:56")
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    None
}

fn game_from_row(row: &Row) -> Game {
    Game {
        id: row.get(0).unwrap(),
        date: row
            .get::<_, String>(1)
            .ok()
            .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok())
            .unwrap_or_else(|| Utc::now().date_naive()),
        total_score: row.get(2).unwrap(),
        notes: row.get(3).unwrap(),
        created_at: row
            .get::<_, String>(4)
            .ok()
            .and_then(|s| parse_datetime(&s))
            .unwrap_or_else(Utc::now),
    }
}

fn frame_from_row(row: &Row) -> Frame {
    Frame {
        id: row.get(0).unwrap(),
        game_id: row.get(1).unwrap(),
        frame_number: row.get(2).unwrap(),
        roll1: row.get(3).unwrap(),
        roll2: row.get(4).unwrap(),
        roll3: row.get(5).unwrap(),
        is_split: row.get::<_, i64>(6).unwrap() != 0,
        notes: row.get(7).unwrap(),
        frame_score: row.get(8).unwrap(),
        running_total: row.get(9).unwrap(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::models::NewGame;
    use crate::scoring::{self, FrameRolls};

    async fn open_repo(dir: &tempfile::TempDir) -> Repository {
        let db_path = dir.path().join("games.db");
        Repository::new(db_path.to_str().unwrap()).await.unwrap()
    }

    fn sample_game(date: &str, line: &str) -> (NewGame, ScoredGame) {
        let frames = NewGame::parse_rolls(line).unwrap();
        let rolls: Vec<FrameRolls> = frames.iter().map(|f| f.rolls()).collect();
        let scored = scoring::score_game(&rolls).unwrap();
        let game = NewGame {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            notes: Some("league night".to_string()),
            frames,
        };
        (game, scored)
    }

    #[tokio::test]
    async fn insert_and_fetch_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = open_repo(&dir).await;

        let (game, scored) = sample_game(
            "2026-08-01",
            "10, 9 1, 7 2s (washout), 10, 8 2, 0 0, 5 4, 10, 9 1, 10 10 10",
        );
        let id = repo.insert_game(game, &scored).await.unwrap();

        let games = repo.get_all_games().await.unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].id, id);
        assert_eq!(games[0].total_score, i64::from(scored.total));
        assert_eq!(games[0].notes.as_deref(), Some("league night"));

        let frames = repo.get_frames(id).await.unwrap();
        assert_eq!(frames.len(), 10);
        assert_eq!(frames[0].frame_number, 1);
        assert!(frames[0].is_strike());
        assert!(frames[2].is_split);
        assert_eq!(frames[2].notes.as_deref(), Some("washout"));
        assert!(frames[0].notes.is_none());
        assert_eq!(frames[9].running_total, i64::from(scored.total));

        let fetched = repo.get_game(id).await.unwrap().unwrap();
        assert_eq!(fetched.total_score, games[0].total_score);
        assert!(repo.get_game(id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn games_are_sorted_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let repo = open_repo(&dir).await;

        let gutter = "0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0, 0 0";
        let (older, scored) = sample_game("2026-07-01", gutter);
        repo.insert_game(older, &scored).await.unwrap();
        let (newer, scored) = sample_game("2026-08-15", gutter);
        let newer_id = repo.insert_game(newer, &scored).await.unwrap();

        let games = repo.get_all_games().await.unwrap();
        assert_eq!(games[0].id, newer_id);
    }

    #[tokio::test]
    async fn delete_game_removes_its_frames() {
        let dir = tempfile::tempdir().unwrap();
        let repo = open_repo(&dir).await;

        let (game, scored) = sample_game(
            "2026-08-01",
            "5 4, 5 4, 5 4, 5 4, 5 4, 5 4, 5 4, 5 4, 5 4, 5 4",
        );
        let id = repo.insert_game(game, &scored).await.unwrap();
        assert_eq!(repo.get_all_frames().await.unwrap().len(), 10);

        repo.delete_game(id).await.unwrap();
        assert!(repo.get_all_games().await.unwrap().is_empty());
        assert!(repo.get_all_frames().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_scores_rewrites_stored_totals() {
        let dir = tempfile::tempdir().unwrap();
        let repo = open_repo(&dir).await;

        let line = "10, 3 4, 3 4, 3 4, 3 4, 3 4, 3 4, 3 4, 3 4, 3 4";
        let (game, scored) = sample_game("2026-08-01", line);
        let id = repo.insert_game(game, &scored).await.unwrap();

        // Rescore from the stored rolls and write the result back.
        let frames = repo.get_frames(id).await.unwrap();
        let numbered: Vec<(u8, FrameRolls)> =
            frames.iter().map(|f| (f.frame_number, f.rolls())).collect();
        let rescored = scoring::score_numbered(&numbered).unwrap();
        repo.update_scores(id, &rescored).await.unwrap();

        let game = repo.get_game(id).await.unwrap().unwrap();
        assert_eq!(game.total_score, i64::from(scored.total));
        let frames = repo.get_frames(id).await.unwrap();
        assert_eq!(frames[0].frame_score, 17);
    }
}
