use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, RightPane};

pub fn draw(frame: &mut Frame, app: &App) {
    // Main horizontal split: 1/3 left, 2/3 right
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3), // Left pane: game list
            Constraint::Ratio(2, 3), // Right pane: detail or stats
        ])
        .split(frame.area());

    // Left pane: header + game list + status
    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(0),    // Game list
            Constraint::Length(1), // Status line
        ])
        .split(main_chunks[0]);

    // Right pane: title + content
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Selected game summary
            Constraint::Min(0),    // Frame table or stats
        ])
        .split(main_chunks[1]);

    render_header(frame, app, left_chunks[0]);
    render_game_list(frame, app, left_chunks[1]);
    render_left_status(frame, app, left_chunks[2]);

    render_game_title(frame, app, right_chunks[0]);
    match app.pane {
        RightPane::Detail => render_game_detail(frame, app, right_chunks[1]),
        RightPane::Stats => render_stats(frame, app, right_chunks[1]),
    }

    if app.roll_input_active {
        render_roll_input(frame, app);
    }

    if app.notes_input_active {
        render_notes_input(frame, app);
    }

    if app.show_help {
        render_help(frame);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = " Tenpin ".to_string();
    let summary = format!(
        " {} Games | Avg {:.1} | High {}",
        app.stats.total_games, app.stats.avg_score, app.stats.high_score
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let paragraph = Paragraph::new(summary).style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, inner);
}

fn render_game_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .games
        .iter()
        .map(|game| {
            let score_style = if game.total_score >= 200 {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };

            let notes_marker = if game.notes.is_some() { " ≡" } else { "" };
            let line = Line::from(vec![
                Span::styled(format!("{}  ", game.date), Style::default().fg(Color::Blue)),
                Span::styled(format!("{:>3}", game.total_score), score_style),
                Span::styled(notes_marker, Style::default().fg(Color::DarkGray)),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_left_status(frame: &mut Frame, app: &App, area: Rect) {
    let hints = "j/k:nav  a:add  d:delete  v:stats  ?:help  q:quit";
    let status = app.status.as_deref().unwrap_or(hints);

    let paragraph = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn render_game_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = app
        .selected_game()
        .map(|g| format!("{} - total {}", g.date, g.total_score))
        .unwrap_or_else(|| "No game selected".to_string());

    let block = Block::default()
        .title(" Game ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let paragraph = Paragraph::new(title).block(block).wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_game_detail(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    if app.frames.is_empty() {
        lines.push(Line::from("No games yet. Press 'a' to enter one."));
    } else {
        lines.push(Line::from(Span::styled(
            "  #  Rolls     Score  Total",
            Style::default().add_modifier(Modifier::BOLD),
        )));

        for f in &app.frames {
            let mark_style = if f.is_strike() {
                Style::default().fg(Color::Yellow)
            } else if f.is_spare() {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };

            let split = if f.is_split { "  split" } else { "" };
            let line = Line::from(vec![
                Span::raw(format!(" {:>2}  ", f.frame_number)),
                Span::styled(format!("{:<9}", frame_marks(f)), mark_style),
                Span::raw(format!("{:>6} {:>6}", f.frame_score, f.running_total)),
                Span::styled(split, Style::default().fg(Color::Red)),
            ]);
            lines.push(line);

            if let Some(notes) = &f.notes {
                lines.push(Line::from(Span::styled(
                    format!("       {notes}"),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }

        if let Some(notes) = app.selected_game().and_then(|g| g.notes.clone()) {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                notes,
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let block = Block::default()
        .title(" Frames ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let stats = &app.stats;

    let mut lines = vec![
        Line::from(format!(" Games:     {}", stats.total_games)),
        Line::from(format!(" Average:   {:.1}", stats.avg_score)),
        Line::from(format!(" High game: {}", stats.high_score)),
        Line::from(format!(" Low game:  {}", stats.low_score)),
        Line::from(""),
        Line::from(format!(
            " Strikes:   {:>3} ({:.1}%)",
            stats.strikes.count, stats.strikes.percentage
        )),
        Line::from(format!(
            " Spares:    {:>3} ({:.1}%)",
            stats.spares.count, stats.spares.percentage
        )),
        Line::from(format!(
            " Splits:    {:>3} ({:.1}%)",
            stats.splits.count, stats.splits.percentage
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Frame averages",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    for (i, avg) in stats.frame_averages.iter().enumerate() {
        lines.push(Line::from(format!("   {:>2}: {:>5.1}", i + 1, avg)));
    }

    let block = Block::default()
        .title(" Stats ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Scorecard notation for one frame's rolls.
fn frame_marks(frame: &crate::models::Frame) -> String {
    if frame.frame_number < 10 {
        if frame.is_strike() {
            "X".to_string()
        } else if frame.is_spare() {
            format!("{} /", frame.roll1)
        } else {
            format!("{} {}", frame.roll1, frame.roll2)
        }
    } else {
        let second = if !frame.is_strike() && frame.roll1 + frame.roll2 == 10 {
            "/".to_string()
        } else {
            roll_token(frame.roll2)
        };
        if frame.is_strike() || frame.is_spare() {
            format!(
                "{} {} {}",
                roll_token(frame.roll1),
                second,
                roll_token(frame.roll3)
            )
        } else {
            format!("{} {}", roll_token(frame.roll1), second)
        }
    }
}

fn roll_token(pins: u8) -> String {
    if pins == 10 {
        "X".to_string()
    } else {
        pins.to_string()
    }
}

fn render_roll_input(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 25, frame.area());

    let block = Block::default()
        .title(" New game - rolls per frame, comma separated ('s' marks a split) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);

    // Clear the area first
    frame.render_widget(ratatui::widgets::Clear, area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(format!("> {}_", app.roll_input)),
        Line::from(""),
        Line::from(Span::styled(
            "e.g. 10, 9 1, 7 2s, 10, 8 2, 0 0, 5 4, 10, 9 1, 10 10 10",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, inner);
}

fn render_notes_input(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 20, frame.area());

    let block = Block::default()
        .title(" Game notes (optional, Enter to save) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);

    frame.render_widget(ratatui::widgets::Clear, area);
    frame.render_widget(block, area);

    let input_text = format!("> {}_", app.notes_input);
    let paragraph = Paragraph::new(input_text).style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, inner);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(50, 60, frame.area());

    let help_text = vec![
        "",
        " Navigation:",
        "   j / ↓    Move down",
        "   k / ↑    Move up",
        "   <  >     First / last game",
        "",
        " Actions:",
        "   a        Add a game",
        "   d        Delete selected game",
        "   v        Toggle detail / stats pane",
        "",
        " Entering a game:",
        "   Ten frames, comma separated.",
        "   '10' alone is a strike; 's' after a",
        "   frame marks a split; '(note)' adds a",
        "   frame note; the tenth frame takes",
        "   three rolls after a mark.",
        "",
        " General:",
        "   ?        Toggle this help",
        "   q        Quit",
        "",
        " Press any key to close",
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text.join("\n"))
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(ratatui::widgets::Clear, area);
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
