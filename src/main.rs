use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::KeyEventKind;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

mod app;
mod config;
mod db;
mod error;
mod models;
mod scoring;
mod stats;
mod tui;

use app::App;
use config::Config;
use error::Result;
use tui::{draw, handle_key_event};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (only show warnings and errors by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    // Load configuration
    let config = Config::load()?;

    // Initialize app
    let mut app = App::new(&config).await?;

    // Headless modes: print or mutate the store and exit
    if args.len() >= 2 {
        match args[1].as_str() {
            "--stats" => {
                print_stats(&app);
                return Ok(());
            }
            "--add" if args.len() >= 3 => {
                let total = app.add_game_line(&args[2]).await?;
                println!("Game saved, total score {total}");
                return Ok(());
            }
            "--export" if args.len() >= 3 => {
                let path = PathBuf::from(&args[2]);
                let count = app.export_json(&path).await?;
                println!("Exported {} games to {:?}", count, path);
                return Ok(());
            }
            "--rescore" => {
                let count = app.rescore_all().await?;
                println!("Rescored {count} games");
                return Ok(());
            }
            _ => {}
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        // Poll for events with a timeout so the loop stays responsive
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = handle_key_event(
                        key,
                        app.roll_input_active,
                        app.notes_input_active,
                        app.show_help,
                    ) {
                        let should_quit = app.handle_action(action).await?;
                        if should_quit {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}

fn print_stats(app: &App) {
    let stats = &app.stats;
    println!("Games:     {}", stats.total_games);
    println!("Average:   {:.1}", stats.avg_score);
    println!("High game: {}", stats.high_score);
    println!("Low game:  {}", stats.low_score);
    println!();
    println!(
        "Strikes: {} ({:.1}%)",
        stats.strikes.count, stats.strikes.percentage
    );
    println!(
        "Spares:  {} ({:.1}%)",
        stats.spares.count, stats.spares.percentage
    );
    println!(
        "Splits:  {} ({:.1}%)",
        stats.splits.count, stats.splits.percentage
    );
    println!();
    println!("Frame averages:");
    for (i, avg) in stats.frame_averages.iter().enumerate() {
        println!("  {:>2}: {:.1}", i + 1, avg);
    }
    println!();
    println!("Recent games:");
    for game in app.games.iter().take(app.recent_games) {
        println!("  {}  {:>3}", game.date, game.total_score);
    }
}
