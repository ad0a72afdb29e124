//! Interactive terminal front-end.

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use twenty48_engine::engine::SIZE;
use twenty48_engine::game::{Game, Status};
use twenty48_engine::tile::{BOARD_BACKGROUND, Rgb, Tile};

use crate::config::Ui;
use crate::keymap::{self, Action};
use crate::notice;

const TILE_WIDTH: u16 = 9;
const TILE_HEIGHT: u16 = 5;

struct App {
    game: Game,
    notice: Option<String>,
    show_help: bool,
}

impl App {
    fn new(game: Game, show_help: bool) -> Self {
        Self { game, notice: None, show_help }
    }

    /// Apply one action. Returns false when the user asked to quit.
    fn handle(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => false,
            Action::Game(command) => {
                let result = self.game.apply(command);
                if let Err(e) = &result {
                    log::warn!("{command}: {e}");
                }
                self.notice = notice::describe(&result, &self.game);
                true
            }
        }
    }
}

/// Raw mode and the alternate screen, undone on drop.
///
/// Created right after raw mode is on, so a failure anywhere later in setup
/// or in the event loop still hands the terminal back.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let guard = TerminalGuard;
        execute!(stdout(), EnterAlternateScreen).context("failed to enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = run_all(&[disable_raw_mode, leave_screen]) {
            log::warn!("failed to restore terminal: {e}");
        }
    }
}

fn leave_screen() -> io::Result<()> {
    execute!(stdout(), LeaveAlternateScreen, Show)
}

/// Run every step even if an earlier one fails; report the first error.
fn run_all(steps: &[fn() -> io::Result<()>]) -> io::Result<()> {
    let mut first = Ok(());
    for step in steps {
        if let Err(e) = step()
            && first.is_ok()
        {
            first = Err(e);
        }
    }
    first
}

/// Run the UI until the user quits. Teardown is best effort: raw mode, the
/// alternate screen and the cursor are each restored on the way out, whether
/// setup, the event loop, or an earlier teardown step failed.
pub fn run(game: Game, ui: &Ui) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout())).context("failed to set up terminal")?;

    let mut app = App::new(game, ui.show_help);
    event_loop(&mut terminal, &mut app, Duration::from_millis(ui.poll_ms))
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, poll: Duration) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app)).context("failed to draw")?;

        if !event::poll(poll).context("failed to poll terminal events")? {
            continue;
        }
        if let Event::Key(key) = event::read().context("failed to read terminal event")?
            && key.kind == KeyEventKind::Press
            && let Some(action) = keymap::action_for(key)
            && !app.handle(action)
        {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                             // Header
            Constraint::Min(TILE_HEIGHT * SIZE as u16 + 2),    // Board
            Constraint::Length(4),                             // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], &app.game);
    render_board(f, chunks[1], &app.game);
    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, game: &Game) {
    let status = match game.status() {
        Status::Playing => Span::raw(""),
        Status::Won => Span::styled("   You Win!", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Status::Lost => Span::styled("   Game Over", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
    };
    let line = Line::from(vec![
        Span::styled(format!("Score: {}", game.score()), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::raw(format!("Highest Score: {}", game.high_score())),
        status,
    ]);
    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" 2048 "));
    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, area: Rect, game: &Game) {
    let size = SIZE as u16;
    let board = centered(area, TILE_WIDTH * size + 2, TILE_HEIGHT * size + 2);
    let frame = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color(BOARD_BACKGROUND)))
        .style(Style::default().bg(color(BOARD_BACKGROUND)));
    let inner = frame.inner(board);
    f.render_widget(frame, board);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(TILE_HEIGHT); SIZE])
        .split(inner);
    for (row, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(TILE_WIDTH); SIZE])
            .split(*row_area);
        for (col, cell_area) in cols.iter().enumerate() {
            f.render_widget(tile_widget(game.cell(row, col)), *cell_area);
        }
    }
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::with_capacity(2);
    lines.push(match &app.notice {
        Some(text) => Line::from(Span::styled(text.clone(), Style::default().fg(Color::Yellow))),
        None => Line::default(),
    });
    if app.show_help {
        lines.push(Line::from(Span::styled(keymap::HELP, Style::default().fg(Color::DarkGray))));
    }
    let footer = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(footer, area);
}

fn tile_widget(tile: Tile) -> Paragraph<'static> {
    let label = if tile.is_empty() { String::new() } else { tile.to_string() };
    let mut style = Style::default().bg(color(tile.background())).fg(color(tile.foreground()));
    // Terminals have one font size; keep the large labels bold.
    if tile.font_size() >= 32 {
        style = style.add_modifier(Modifier::BOLD);
    }
    Paragraph::new(vec![Line::default(), Line::from(label), Line::default()])
        .alignment(Alignment::Center)
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color(BOARD_BACKGROUND))),
        )
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r(), rgb.g(), rgb.b())
}

/// Rect of at most `width` x `height` centered in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
