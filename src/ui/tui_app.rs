use std::io::{Stdout, stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, TableState, Tabs, Wrap},
};

use crate::engine::{
    client::ContentGenerator,
    error::RunError,
    input::parse_features,
    prompt::PromptBuilder,
    session::{OptimizerSession, RunOutcome},
};
use crate::ui::chart::BubbleChart;
use crate::ui::pane::NavigablePane;
use crate::ui::table::results_table;

const HELP_TEXT: &str =
    "Tab: Next field | Ctrl-R: Optimize | ←/→: Chart/Table | ↑/↓: Scroll | Esc: Quit";

const CURSOR: &str = "▌";

/// Display settings that do not change during the session.
#[derive(Debug, Clone)]
pub struct ViewSettings {
    pub bubble_scale: f64,
    pub model: String,
    pub template_label: String,
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiAction {
    Optimize,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Goal,
    ApiKey,
    Features,
    Optimize,
    Results,
}

impl Field {
    const ALL: [Field; 5] = [
        Field::Goal,
        Field::ApiKey,
        Field::Features,
        Field::Optimize,
        Field::Results,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn title(self) -> &'static str {
        match self {
            Field::Goal => " 1. Business Goal ",
            Field::ApiKey => " Gemini API Key ",
            Field::Features => " 2. Features (one per line) ",
            Field::Optimize => "",
            Field::Results => " Results ",
        }
    }
}

/// Tab/Shift-Tab focus order over the form and the results pane.
#[derive(Debug, Clone, Copy)]
pub struct FocusRing {
    pub current: Field,
}

impl NavigablePane for FocusRing {
    fn next(&mut self) {
        let i = (self.current.index() + 1) % Field::ALL.len();
        self.current = Field::ALL[i];
    }

    fn previous(&mut self) {
        let len = Field::ALL.len();
        let i = (self.current.index() + len - 1) % len;
        self.current = Field::ALL[i];
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTab {
    Chart,
    Table,
}

/// The chart/table tabs and the table's scroll position.
pub struct ResultsPane {
    pub tab: ResultTab,
    pub table_state: TableState,
    pub rows: usize,
}

impl ResultsPane {
    fn reset(&mut self, rows: usize) {
        self.tab = ResultTab::Chart;
        self.rows = rows;
        self.table_state = TableState::default();
        if rows > 0 {
            self.table_state.select(Some(0));
        }
    }

    fn switch_tab(&mut self) {
        self.tab = match self.tab {
            ResultTab::Chart => ResultTab::Table,
            ResultTab::Table => ResultTab::Chart,
        };
    }
}

impl NavigablePane for ResultsPane {
    fn next(&mut self) {
        if self.rows == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => (i + 1) % self.rows,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn previous(&mut self) {
        if self.rows == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => self.rows - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }
}

pub enum RunStatus {
    Idle,
    Running { features: usize },
    Done(RunOutcome),
    Failed { message: String, raw: Option<String> },
}

pub enum AppMode {
    Normal,
    /// Shows the raw model reply after a malformed response.
    RawResponse { scroll: u16 },
}

pub struct App {
    pub session: OptimizerSession,
    pub view: ViewSettings,
    pub focus: FocusRing,
    pub results: ResultsPane,
    pub status: RunStatus,
    pub mode: AppMode,
}

impl App {
    pub fn new(session: OptimizerSession, view: ViewSettings) -> Self {
        Self {
            session,
            view,
            focus: FocusRing {
                current: Field::Goal,
            },
            results: ResultsPane {
                tab: ResultTab::Chart,
                table_state: TableState::default(),
                rows: 0,
            },
            status: RunStatus::Idle,
            mode: AppMode::Normal,
        }
    }

    fn active_pane(&mut self) -> &mut dyn NavigablePane {
        if self.focus.current == Field::Results {
            &mut self.results
        } else {
            &mut self.focus
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus.current {
            Field::Goal => Some(&mut self.session.goal),
            Field::ApiKey => Some(&mut self.session.credential),
            Field::Features => Some(&mut self.session.features_text),
            Field::Optimize | Field::Results => None,
        }
    }

    /// Drops the previous run's output; called when a new run starts.
    pub fn begin_run(&mut self) {
        let features = parse_features(&self.session.features_text).len();
        self.status = RunStatus::Running { features };
        self.mode = AppMode::Normal;
        self.results.reset(0);
    }

    pub fn finish_run(&mut self, result: Result<RunOutcome, RunError>) {
        match result {
            Ok(outcome) => {
                self.results.reset(outcome.scores.len());
                self.focus.current = Field::Results;
                self.status = RunStatus::Done(outcome);
            }
            Err(e) => {
                log::warn!("Run failed: {e}");
                if matches!(e, RunError::MissingCredential) {
                    self.focus.current = Field::ApiKey;
                }
                let raw = e.raw_response().map(str::to_owned);
                if raw.is_some() {
                    self.mode = AppMode::RawResponse { scroll: 0 };
                }
                self.status = RunStatus::Failed {
                    message: e.to_string(),
                    raw,
                };
            }
        }
    }

    fn paste(&mut self, text: &str) {
        let single_line = !matches!(self.focus.current, Field::Features);
        if let Some(buf) = self.focused_text() {
            if single_line {
                buf.extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
            } else {
                buf.push_str(&text.replace("\r\n", "\n"));
            }
        }
    }
}

/// Runs the pipeline for the current fields and records the outcome.
/// `on_start` sees the app in its running state before the blocking model
/// call; the event loop draws the status frame there.
pub fn trigger_run(
    app: &mut App,
    client: &dyn ContentGenerator,
    prompt: &PromptBuilder,
    on_start: impl FnOnce(&mut App) -> Result<()>,
) -> Result<()> {
    app.begin_run();
    on_start(app)?;
    let result = app.session.optimize(client, prompt);
    app.finish_run(result);
    Ok(())
}

struct TerminalGuard(Terminal<CrosstermBackend<Stdout>>);

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal(&mut self.0);
    }
}

/// Opens the full-screen session and runs until the user quits.
pub fn run_app(
    session: OptimizerSession,
    view: ViewSettings,
    client: &dyn ContentGenerator,
    prompt: &PromptBuilder,
) -> Result<()> {
    let terminal = setup_terminal()?;
    let mut guard = TerminalGuard(terminal);

    drain_input_buffer()?;

    let mut app = App::new(session, view);
    run_event_loop(&mut guard.0, &mut app, client, prompt)
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    client: &dyn ContentGenerator,
    prompt: &PromptBuilder,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;
        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
            Event::Paste(text) => {
                app.paste(&text);
                None
            }
            Event::Mouse(mouse_event) => {
                handle_mouse_event(app, mouse_event);
                None
            }
            _ => None,
        };

        match action {
            Some(TuiAction::Quit) => return Ok(()),
            Some(TuiAction::Optimize) => {
                trigger_run(app, client, prompt, |app| {
                    terminal.draw(|f| ui(f, app))?;
                    Ok(())
                })?;
                // Keys typed while the request was in flight are not replayed.
                drain_input_buffer()?;
            }
            None => {}
        }
    }
}

fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::ScrollUp => app.active_pane().previous(),
        MouseEventKind::ScrollDown => app.active_pane().next(),
        _ => {}
    }
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<TuiAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(TuiAction::Quit);
    }

    if let AppMode::RawResponse { scroll } = &mut app.mode {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => app.mode = AppMode::Normal,
            KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
            _ => {}
        }
        return None;
    }

    if (ctrl && key.code == KeyCode::Char('r')) || key.code == KeyCode::F(5) {
        return Some(TuiAction::Optimize);
    }

    match key.code {
        KeyCode::Esc => return Some(TuiAction::Quit),
        KeyCode::Tab => app.focus.next(),
        KeyCode::BackTab => app.focus.previous(),
        _ => return handle_field_key(app, key, ctrl),
    }
    None
}

fn handle_field_key(app: &mut App, key: KeyEvent, ctrl: bool) -> Option<TuiAction> {
    match app.focus.current {
        Field::Results => match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                app.results.switch_tab()
            }
            KeyCode::Char('1') | KeyCode::Char('c') => app.results.tab = ResultTab::Chart,
            KeyCode::Char('2') | KeyCode::Char('t') => app.results.tab = ResultTab::Table,
            KeyCode::Up | KeyCode::Char('k') => app.results.previous(),
            KeyCode::Down | KeyCode::Char('j') => app.results.next(),
            _ => {}
        },
        Field::Optimize => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => return Some(TuiAction::Optimize),
            KeyCode::Up => app.focus.previous(),
            KeyCode::Down => app.focus.next(),
            _ => {}
        },
        field => {
            let multiline = field == Field::Features;
            match key.code {
                KeyCode::Enter if multiline => app.session.features_text.push('\n'),
                KeyCode::Enter | KeyCode::Down if !multiline => app.focus.next(),
                KeyCode::Up if !multiline => app.focus.previous(),
                KeyCode::Char('u') if ctrl => {
                    if let Some(buf) = app.focused_text() {
                        buf.clear();
                    }
                }
                KeyCode::Char(c) if !ctrl => {
                    if let Some(buf) = app.focused_text() {
                        buf.push(c);
                    }
                }
                KeyCode::Backspace => {
                    if let Some(buf) = app.focused_text() {
                        buf.pop();
                    }
                }
                _ => {}
            }
        }
    }
    None
}

/// A helper to create a styled block for a form field or pane.
fn pane_block(title: &str, active: bool) -> Block<'_> {
    let (border_style, title_style) = if active {
        (
            Style::default().fg(Color::Yellow),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (Style::default(), Style::default())
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(title, title_style))
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    f.render_widget(
        Paragraph::new(format!(
            "📈 AI Roadmap Optimizer ▸ {} ▸ template: {}",
            app.view.model, app.view.template_label
        ))
        .style(Style::default().add_modifier(Modifier::BOLD)),
        chunks[0],
    );

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(33), Constraint::Percentage(67)])
        .split(chunks[1]);

    render_form(f, app, content_chunks[0]);
    render_results(f, app, content_chunks[1]);
    render_footer(f, app, chunks[2]);

    if matches!(app.mode, AppMode::RawResponse { .. }) {
        render_raw_popup(f, app);
    }
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    let focus = app.focus.current;
    let with_cursor = |text: String, field: Field| {
        if focus == field {
            format!("{text}{CURSOR}")
        } else {
            text
        }
    };

    let goal = with_cursor(app.session.goal.clone(), Field::Goal);
    f.render_widget(
        Paragraph::new(goal).block(pane_block(Field::Goal.title(), focus == Field::Goal)),
        rows[0],
    );

    let masked = "•".repeat(app.session.credential.chars().count());
    f.render_widget(
        Paragraph::new(with_cursor(masked, Field::ApiKey))
            .block(pane_block(Field::ApiKey.title(), focus == Field::ApiKey)),
        rows[1],
    );

    let features = with_cursor(app.session.features_text.clone(), Field::Features);
    let visible = rows[2].height.saturating_sub(2) as usize;
    let line_count = features.split('\n').count();
    let scroll = line_count.saturating_sub(visible) as u16;
    f.render_widget(
        Paragraph::new(features)
            .block(pane_block(
                Field::Features.title(),
                focus == Field::Features,
            ))
            .scroll((scroll, 0)),
        rows[2],
    );

    let button_style = if focus == Field::Optimize {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(" 🚀 Optimize Roadmap ", button_style)).centered())
            .block(pane_block("", focus == Field::Optimize)),
        rows[3],
    );
}

fn render_results(f: &mut Frame, app: &mut App, area: Rect) {
    let active = app.focus.current == Field::Results;
    let block = pane_block(Field::Results.title(), active);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let selected = match app.results.tab {
        ResultTab::Chart => 0,
        ResultTab::Table => 1,
    };
    f.render_widget(
        Tabs::new(vec!["📊 Matrix Chart", "📋 Data Table"])
            .select(selected)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        parts[0],
    );

    let body = parts[1];
    match &app.status {
        RunStatus::Idle => f.render_widget(
            Paragraph::new("Fill in the form and press Ctrl-R to optimize the roadmap.")
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true }),
            body,
        ),
        RunStatus::Running { features } => f.render_widget(
            Paragraph::new(format!(
                "🧠 AI is calculating RICE scores for {features} features..."
            )),
            body,
        ),
        RunStatus::Failed { message, raw } => {
            let mut text = Text::from(Line::from(Span::styled(
                format!("⚠️ {message}"),
                Style::default().fg(Color::Red),
            )));
            if raw.is_some() {
                text.push_line(Line::from("Press Ctrl-R to retry. The raw response was shown in a popup."));
            }
            f.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), body);
        }
        RunStatus::Done(outcome) => match app.results.tab {
            ResultTab::Chart => {
                let chart = BubbleChart::new(&outcome.goal, &outcome.scores, app.view.bubble_scale);
                f.render_widget(chart.canvas(body), body);
            }
            ResultTab::Table => {
                f.render_stateful_widget(
                    results_table(&outcome.scores),
                    body,
                    &mut app.results.table_state,
                );
            }
        },
    }
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let status: Span = match &app.status {
        RunStatus::Done(outcome) => Span::styled(
            format!(" Analysis Complete! {} features scored ", outcome.scores.len()),
            Style::default().fg(Color::Black).bg(Color::Green),
        ),
        RunStatus::Failed { .. } => Span::styled(
            " Run failed ",
            Style::default().fg(Color::White).bg(Color::Red),
        ),
        RunStatus::Running { .. } => Span::styled(
            " Working… ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
        RunStatus::Idle => Span::raw(""),
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![Span::raw(HELP_TEXT), Span::raw("  "), status]))
            .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn render_raw_popup(f: &mut Frame, app: &App) {
    let (RunStatus::Failed { message, raw: Some(raw) }, AppMode::RawResponse { scroll }) =
        (&app.status, &app.mode)
    else {
        return;
    };

    let mut text = Text::from(Line::from(Span::styled(
        message.clone(),
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    for line in raw.lines() {
        text.push_line(Line::from(line.to_owned()));
    }

    let popup = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Raw model response (Esc to close) "),
        )
        .wrap(Wrap { trim: false })
        .scroll((*scroll, 0));

    let area = centered_rect(80, 70, f.area());
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = stdout();
    enable_raw_mode()?;
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn drain_input_buffer() -> Result<()> {
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }
    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Helper to create a centered rectangle for popups.
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
