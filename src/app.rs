use std::path::Path;

use chrono::Local;

use crate::config::Config;
use crate::db::Repository;
use crate::error::Result;
use crate::models::{Frame, Game, GameExport, NewFrame, NewGame};
use crate::scoring::{self, FrameRolls};
use crate::stats::{self, GameStats};
use crate::tui::AppAction;

/// What the right-hand pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RightPane {
    #[default]
    Detail,
    Stats,
}

impl RightPane {
    pub fn toggle(self) -> Self {
        match self {
            RightPane::Detail => RightPane::Stats,
            RightPane::Stats => RightPane::Detail,
        }
    }
}

pub struct App {
    // Data
    pub games: Vec<Game>,
    /// Frames of the selected game.
    pub frames: Vec<Frame>,
    pub stats: GameStats,

    // UI State
    pub selected_index: usize,
    pub pane: RightPane,
    pub show_help: bool,
    pub roll_input_active: bool,
    pub roll_input: String,
    pub notes_input_active: bool,
    pub notes_input: String,
    pub status: Option<String>,
    pub recent_games: usize,
    pending_frames: Option<Vec<NewFrame>>,

    // Services
    pub repository: Repository,
}

impl App {
    pub async fn new(config: &Config) -> Result<Self> {
        let repository = Repository::new(&config.db_path).await?;

        let mut app = Self {
            games: Vec::new(),
            frames: Vec::new(),
            stats: GameStats::default(),
            selected_index: 0,
            pane: RightPane::Detail,
            show_help: false,
            roll_input_active: false,
            roll_input: String::new(),
            notes_input_active: false,
            notes_input: String::new(),
            status: None,
            recent_games: config.recent_games,
            pending_frames: None,
            repository,
        };
        app.reload().await?;
        app.on_selection_changed().await?;
        Ok(app)
    }

    pub fn selected_game(&self) -> Option<&Game> {
        self.games.get(self.selected_index)
    }

    pub async fn handle_action(&mut self, action: AppAction) -> Result<bool> {
        match action {
            AppAction::Quit => return Ok(true),

            AppAction::MoveUp => {
                if !self.games.is_empty() && self.selected_index > 0 {
                    self.selected_index -= 1;
                    self.on_selection_changed().await?;
                }
            }

            AppAction::MoveDown => {
                let len = self.games.len();
                if len > 0 && self.selected_index < len - 1 {
                    self.selected_index += 1;
                    self.on_selection_changed().await?;
                }
            }

            AppAction::MoveToTop => {
                if !self.games.is_empty() {
                    self.selected_index = 0;
                    self.on_selection_changed().await?;
                }
            }

            AppAction::MoveToBottom => {
                if !self.games.is_empty() {
                    self.selected_index = self.games.len() - 1;
                    self.on_selection_changed().await?;
                }
            }

            AppAction::TogglePane => {
                self.pane = self.pane.toggle();
            }

            AppAction::AddGame => {
                self.roll_input_active = true;
                self.roll_input.clear();
                self.status = None;
            }

            AppAction::DeleteGame => {
                if let Some(game) = self.selected_game() {
                    let id = game.id;
                    self.repository.delete_game(id).await?;
                    tracing::info!("Deleted game {}", id);
                    self.reload().await?;
                    let len = self.games.len();
                    if len > 0 && self.selected_index >= len {
                        self.selected_index = len - 1;
                    }
                    self.on_selection_changed().await?;
                    self.status = Some("Game deleted".to_string());
                }
            }

            AppAction::ShowHelp => {
                self.show_help = true;
            }

            AppAction::HideHelp => {
                self.show_help = false;
            }

            AppAction::RollInputChar(c) => {
                self.roll_input.push(c);
            }

            AppAction::RollInputBackspace => {
                self.roll_input.pop();
            }

            AppAction::RollInputConfirm => match NewGame::parse_rolls(&self.roll_input) {
                Ok(frames) => {
                    self.pending_frames = Some(frames);
                    self.roll_input_active = false;
                    self.notes_input_active = true;
                    self.notes_input.clear();
                    self.status = None;
                }
                Err(e) => {
                    // Stay in the input so the line can be corrected.
                    self.status = Some(e.to_string());
                }
            },

            AppAction::RollInputCancel => {
                self.roll_input_active = false;
                self.roll_input.clear();
                self.status = None;
            }

            AppAction::NotesInputChar(c) => {
                self.notes_input.push(c);
            }

            AppAction::NotesInputBackspace => {
                self.notes_input.pop();
            }

            AppAction::NotesInputConfirm => {
                self.save_pending_game().await?;
            }

            AppAction::NotesInputCancel => {
                self.notes_input_active = false;
                self.notes_input.clear();
                self.pending_frames = None;
            }
        }

        Ok(false)
    }

    async fn save_pending_game(&mut self) -> Result<()> {
        let Some(frames) = self.pending_frames.take() else {
            self.notes_input_active = false;
            return Ok(());
        };

        let notes = self.notes_input.trim();
        let notes = (!notes.is_empty()).then(|| notes.to_string());
        let (id, total) = self.store_game(frames, notes).await?;

        self.notes_input_active = false;
        self.notes_input.clear();
        self.status = Some(format!("Game {} saved: {}", id, total));
        Ok(())
    }

    /// Scores and persists a finished game, then refreshes everything
    /// derived from the store.
    async fn store_game(&mut self, frames: Vec<NewFrame>, notes: Option<String>) -> Result<(i64, u32)> {
        let rolls: Vec<FrameRolls> = frames.iter().map(|f| f.rolls()).collect();
        let scored = scoring::score_game(&rolls)?;

        let game = NewGame {
            date: Local::now().date_naive(),
            notes,
            frames,
        };
        let id = self.repository.insert_game(game, &scored).await?;
        tracing::info!("Saved game {} with total {}", id, scored.total);

        self.reload().await?;
        self.selected_index = 0;
        self.on_selection_changed().await?;
        Ok((id, scored.total))
    }

    /// Headless `--add`: parse a roll line, score it, store it.
    pub async fn add_game_line(&mut self, line: &str) -> Result<u32> {
        let frames = NewGame::parse_rolls(line)?;
        let (_, total) = self.store_game(frames, None).await?;
        Ok(total)
    }

    /// Headless `--export`: every game with its frames, as pretty JSON.
    pub async fn export_json(&self, path: &Path) -> Result<usize> {
        let games = self.repository.get_all_games().await?;
        let mut export = Vec::with_capacity(games.len());
        for game in games {
            let frames = self.repository.get_frames(game.id).await?;
            export.push(GameExport { game, frames });
        }

        let json = serde_json::to_string_pretty(&export)?;
        std::fs::write(path, json)?;
        Ok(export.len())
    }

    /// Headless `--rescore`: recompute every stored game from its rolls and
    /// rewrite the stored scores. A game whose frames are not exactly
    /// numbered 1..=10 fails the whole run rather than being skipped.
    pub async fn rescore_all(&mut self) -> Result<usize> {
        let games = self.repository.get_all_games().await?;
        let count = games.len();

        for game in &games {
            let frames = self.repository.get_frames(game.id).await?;
            let numbered: Vec<(u8, FrameRolls)> =
                frames.iter().map(|f| (f.frame_number, f.rolls())).collect();
            let scored = scoring::score_numbered(&numbered)?;

            if i64::from(scored.total) != game.total_score {
                tracing::warn!(
                    "Game {}: stored total {} corrected to {}",
                    game.id,
                    game.total_score,
                    scored.total
                );
            }
            self.repository.update_scores(game.id, &scored).await?;
        }

        self.reload().await?;
        self.on_selection_changed().await?;
        Ok(count)
    }

    async fn reload(&mut self) -> Result<()> {
        self.games = self.repository.get_all_games().await?;
        let frames = self.repository.get_all_frames().await?;
        self.stats = stats::compute(&self.games, &frames);
        Ok(())
    }

    async fn on_selection_changed(&mut self) -> Result<()> {
        let game_id = self.selected_game().map(|g| g.id);
        self.frames = match game_id {
            Some(id) => self.repository.get_frames(id).await?,
            None => Vec::new(),
        };
        Ok(())
    }
}
