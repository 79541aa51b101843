//! Play command implementation - interactive TUI.

use super::{init_logging, open_store, resolve_seed, CliError, GridArgs};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use hexzoe::progression::JsonFileStore;
use hexzoe::{
    ActionKind, Coord, GameSession, Outcome, Phase, Rejection, SessionPhase, Snapshot, Tile, TileState,
    TileType,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::stdout;
use std::time::Duration;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the settings are invalid or the TUI fails.
pub(crate) fn execute(grid_args: &GridArgs) -> Result<(), CliError> {
    let settings = grid_args.settings()?;
    let store = open_store(&settings)?;
    init_logging(true)?;

    let seed = resolve_seed(settings.seed);
    log::info!("session starting with seed {seed} on {}", settings.grid);
    let session = GameSession::new(settings.grid, seed, store);

    run_tui(session)
}

/// A question waiting for `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Confirm {
    EndTurn,
    Rest,
    ResetProfile,
}

/// App state for the TUI.
struct App {
    session: GameSession<JsonFileStore>,
    cursor: Coord,
    highlights: Vec<Coord>,
    confirm: Option<Confirm>,
    message: String,
}

impl App {
    fn new(session: GameSession<JsonFileStore>) -> Self {
        let cursor = session.engine().player().position;
        Self {
            session,
            cursor,
            highlights: Vec::new(),
            confirm: None,
            message: "Find Zoe, then reach the goal.".to_string(),
        }
    }

    fn move_cursor(&mut self, d_row: i16, d_col: i16) {
        let grid = self.session.grid();
        let row = (i16::from(self.cursor.row) + d_row).clamp(0, i16::from(grid.rows()) - 1);
        let col = (i16::from(self.cursor.col) + d_col).clamp(0, i16::from(grid.cols()) - 1);
        if let (Ok(row), Ok(col)) = (u8::try_from(row), u8::try_from(col)) {
            self.cursor = Coord::new(row, col);
        }
    }

    fn select(&mut self, kind: ActionKind) {
        self.highlights = self.session.select_action(kind);
        self.message = format!("{kind:?}: pick a highlighted tile and press Enter.");
    }

    fn cancel(&mut self) {
        self.session.cancel_action();
        self.highlights.clear();
        self.message = "Action cancelled.".to_string();
    }

    fn resolve_target(&mut self) {
        let outcome = self.session.attempt(self.cursor);
        if !matches!(outcome, Outcome::Rejected(_)) {
            self.highlights.clear();
        }
        self.report(outcome);
    }

    fn end_turn(&mut self, confirmed: bool) {
        let outcome = self.session.end_turn(confirmed);
        if outcome == Outcome::NeedsConfirmation {
            self.confirm = Some(Confirm::EndTurn);
            self.message = "Movement points left. End the turn anyway? [y/n]".to_string();
        } else {
            self.report(outcome);
        }
    }

    fn rest(&mut self, confirmed: bool) {
        let outcome = self.session.rest(confirmed);
        if outcome == Outcome::NeedsConfirmation {
            self.confirm = Some(Confirm::Rest);
            self.message = "Movement points left. Rest anyway? [y/n]".to_string();
        } else {
            self.report(outcome);
        }
    }

    fn answer(&mut self, yes: bool) {
        let Some(question) = self.confirm.take() else {
            return;
        };
        if !yes {
            self.message = "Never mind.".to_string();
            return;
        }
        match question {
            Confirm::EndTurn => self.end_turn(true),
            Confirm::Rest => self.rest(true),
            Confirm::ResetProfile => {
                self.session.reset_profile();
                self.message = "Profile reset. It applies from the next level.".to_string();
            }
        }
    }

    fn next_level(&mut self) {
        let started = match self.session.phase() {
            SessionPhase::AwaitingContinue => self.session.continue_level(),
            SessionPhase::AwaitingRestart => self.session.restart_level(),
            SessionPhase::Playing => false,
        };
        if started {
            self.cursor = self.session.engine().player().position;
            self.highlights.clear();
            self.message = format!("Level {} begins.", self.session.level());
        }
    }

    fn resize(&mut self, delta: i32) {
        let dims = self.session.dims();
        let rows = u32::from(dims.rows()).saturating_add_signed(delta);
        let cols = u32::from(dims.cols()).saturating_add_signed(delta);
        self.message = match self.session.resize(rows, cols) {
            Ok(()) => format!("Next level will be {}.", self.session.dims()),
            Err(e) => e.to_string(),
        };
    }

    fn report(&mut self, outcome: Outcome) {
        self.message = match outcome {
            Outcome::Resolved => String::new(),
            Outcome::Won => "You made it with Zoe! Press [c] to continue.".to_string(),
            Outcome::Lost => "Out of energy. Press [c] to try again.".to_string(),
            Outcome::NeedsConfirmation => "Confirm with [y].".to_string(),
            Outcome::Rejected(why) => rejection_text(why).to_string(),
        };
    }
}

fn rejection_text(why: Rejection) -> &'static str {
    match why {
        Rejection::WrongPhase => "That does not work right now.",
        Rejection::OutOfBounds => "That is off the map.",
        Rejection::OutOfRange => "Too far away.",
        Rejection::NoMovementPoints => "No movement points left this turn.",
        Rejection::Blocked => "That way is blocked.",
    }
}

fn run_tui(session: GameSession<JsonFileStore>) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let mut app = App::new(session);

    loop {
        let snapshot = app.session.snapshot();
        terminal
            .draw(|f| ui(f, &app, &snapshot))
            .map_err(|e| CliError::new(e.to_string()))?;

        // Handle input with timeout
        if event::poll(Duration::from_millis(100)).map_err(|e| CliError::new(e.to_string()))?
            && let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            if app.confirm.is_some() {
                app.answer(matches!(key.code, KeyCode::Char('y' | 'Y')));
                continue;
            }
            match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Esc => app.cancel(),
                KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1, 0),
                KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1, 0),
                KeyCode::Left | KeyCode::Char('h') => app.move_cursor(0, -1),
                KeyCode::Right | KeyCode::Char('l') => app.move_cursor(0, 1),
                KeyCode::Char('m') => app.select(ActionKind::Move),
                KeyCode::Char('s') => app.select(ActionKind::Sense),
                KeyCode::Char('p') => app.select(ActionKind::Poke),
                KeyCode::Enter | KeyCode::Char(' ') => app.resolve_target(),
                KeyCode::Char('e') => app.end_turn(false),
                KeyCode::Char('r') => app.rest(false),
                KeyCode::Char('c') => app.next_level(),
                KeyCode::Char('+' | '=') => app.resize(1),
                KeyCode::Char('-') => app.resize(-1),
                KeyCode::Char('X') => {
                    app.confirm = Some(Confirm::ResetProfile);
                    app.message = "Reset the whole profile? [y/n]".to_string();
                }
                _ => {}
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

fn ui(f: &mut Frame, app: &App, snapshot: &Snapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(4), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], snapshot);

    // Main content - map and stats
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);

    render_map(f, main_chunks[0], app, snapshot);
    render_stats(f, main_chunks[1], snapshot);

    render_footer(f, chunks[2], app, snapshot);
}

fn render_header(f: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let status = match snapshot.session_phase {
        SessionPhase::Playing => match snapshot.phase {
            Phase::ActionPending(kind) => format!("{kind:?}"),
            _ => "PLAYING".to_string(),
        },
        SessionPhase::AwaitingContinue => "LEVEL WON".to_string(),
        SessionPhase::AwaitingRestart => "LEVEL LOST".to_string(),
    };

    let title = format!(
        " Hexzoe | Level {} | Turn {} | {} | Generation {} ({:?}) ",
        snapshot.level, snapshot.stats.turns, status, snapshot.generation, snapshot.evolution_stage
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_map(f: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let grid = &snapshot.grid;
    let mut lines: Vec<Line> = Vec::new();

    for row in 0..grid.rows() {
        let mut spans = Vec::new();
        if row % 2 == 1 {
            spans.push(Span::raw(" "));
        }
        for col in 0..grid.cols() {
            let coord = Coord::new(row, col);
            let Some(tile) = grid.get(coord) else {
                continue;
            };

            let (glyph, mut style) = if coord == snapshot.player.position {
                ('@', Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                tile_glyph(tile)
            };
            if app.highlights.contains(&coord) {
                style = style.bg(Color::Blue);
            }
            if coord == app.cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }

            spans.push(Span::styled(glyph.to_string(), style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    let map_widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Map "));

    f.render_widget(map_widget, area);
}

fn tile_glyph(tile: &Tile) -> (char, Style) {
    if !tile.explored {
        return ('?', Style::default().fg(Color::DarkGray));
    }

    let color = match tile.tile_type {
        TileType::Normal => Color::Gray,
        TileType::Blocked => Color::White,
        TileType::Water => Color::Blue,
        TileType::Energy => Color::Green,
        TileType::Key => Color::Yellow,
        TileType::Zoe => Color::Magenta,
        TileType::Goal => Color::LightRed,
    };

    let mut style = Style::default().fg(color);
    if tile.state == TileState::Consumed {
        style = style.add_modifier(Modifier::DIM);
    }
    (tile.tile_type.glyph(), style)
}

fn render_stats(f: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let player = &snapshot.player;
    let stats = &snapshot.stats;
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Energy ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(player.energy.to_string(), Style::default().fg(energy_color(player.energy))),
        ]),
        Line::from(format!("Moves left: {}", player.movement_points)),
        Line::from(format!("Zoe: {}", if player.has_found_zoe_this_level { "with you" } else { "missing" })),
        Line::from(format!("Key: {}", if player.has_key { "yes" } else { "no" })),
        Line::from(""),
        Line::from(format!("Moved {}  Sensed {}  Poked {}", stats.tiles_moved, stats.tiles_sensed, stats.tiles_interacted)),
        Line::from(format!("Energy used {}  Rests {}", stats.energy_used, stats.rests_used)),
        Line::from(""),
        Line::from(format!("XP: {}", snapshot.xp)),
    ];

    let traits: Vec<String> = snapshot.traits.iter().map(ToString::to_string).collect();
    lines.push(Line::from(format!(
        "Traits: {}",
        if traits.is_empty() { "none".to_string() } else { traits.join(", ") }
    )));

    if let Some(result) = &snapshot.last_result {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            if result.won { "Last level: won" } else { "Last level: lost" },
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("  {} turns, {} energy", result.turns, result.energy_used)));
        for (id, value) in &result.affinities {
            lines.push(Line::from(format!("  {id:<12} {value:5.1}")));
        }
        for id in &result.new_traits {
            lines.push(Line::from(Span::styled(
                format!("  + {id}"),
                Style::default().fg(Color::Green),
            )));
        }
        if result.generation_advanced {
            lines.push(Line::from("  A new generation begins."));
        }
    }

    let stats_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Status "))
        .wrap(Wrap { trim: false });

    f.render_widget(stats_widget, area);
}

fn energy_color(energy: i32) -> Color {
    match energy {
        i32::MIN..=5 => Color::Red,
        6..=15 => Color::Yellow,
        _ => Color::Green,
    }
}

fn render_footer(f: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let controls = if snapshot.session_phase == SessionPhase::Playing {
        " [m/s/p] Move/Sense/Poke  [Enter] Target  [Esc] Cancel  [e] End turn  [r] Rest  [+/-] Size  [X] Reset  [q] Quit "
    } else {
        " [c] Next level  [+/-] Size  [X] Reset profile  [q] Quit "
    };

    let footer = Paragraph::new(vec![
        Line::from(Span::styled(app.message.clone(), Style::default().fg(Color::White))),
        Line::from(Span::styled(controls, Style::default().fg(Color::Gray))),
    ])
    .block(Block::default().borders(Borders::TOP));

    f.render_widget(footer, area);
}
