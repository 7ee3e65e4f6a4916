pub const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

-- games table
CREATE TABLE IF NOT EXISTS games (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    total_score INTEGER NOT NULL DEFAULT 0,
    notes TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_games_date ON games(date DESC);

-- frames table
CREATE TABLE IF NOT EXISTS frames (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    game_id INTEGER NOT NULL REFERENCES games(id) ON DELETE CASCADE,
    frame_number INTEGER NOT NULL,
    roll1 INTEGER NOT NULL DEFAULT 0,
    roll2 INTEGER NOT NULL DEFAULT 0,
    roll3 INTEGER NOT NULL DEFAULT 0,
    is_split INTEGER NOT NULL DEFAULT 0,
    notes TEXT,
    frame_score INTEGER NOT NULL DEFAULT 0,
    running_total INTEGER NOT NULL DEFAULT 0,
    UNIQUE(game_id, frame_number)
);

CREATE INDEX IF NOT EXISTS idx_frames_game_id ON frames(game_id);
"#;
