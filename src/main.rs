use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use typeline::app::{App, AppScreen};
use typeline::config::Config;
use typeline::event::{AppEvent, EventHandler};
use typeline::logging;
use typeline::session::typing_test::Phase;
use typeline::ui::components::chart::ProgressChart;
use typeline::ui::components::history_table::HistoryTable;
use typeline::ui::components::previous_line::PreviousLine;
use typeline::ui::components::queue_preview::QueuePreview;
use typeline::ui::components::typing_area::TypingArea;
use typeline::ui::layout::{ProgressLayout, TestLayout, pack_hint_lines};

#[derive(Parser)]
#[command(name = "typeline", version, about = "Timed line-by-line typing test")]
struct Cli {
    #[arg(short, long, help = "Test length in seconds")]
    duration: Option<u64>,

    #[arg(long, help = "Use only the local text list")]
    offline: bool,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Write the effective configuration to the config file and exit")]
    write_config: bool,
}

const TEST_HINTS: &[&str] = &[
    "[Enter] Restart",
    "[Ctrl+R] Reset history",
    "[Tab] Progress",
    "[Esc] Quit",
];
const PROGRESS_HINTS: &[&str] = &["[Tab] Back", "[Enter] Restart", "[Esc] Quit"];

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(duration) = cli.duration {
        config.duration_secs = duration;
    }
    if cli.offline {
        config.remote_enabled = false;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    config.validate();

    if cli.write_config {
        config.save()?;
        println!("{}", Config::config_path().display());
        return Ok(());
    }

    if let Err(err) = logging::init_logging(&config.log_level, &Config::log_path()) {
        eprintln!("warning: logging disabled: {err}");
    }

    let events = EventHandler::new(Duration::from_millis(100));
    let mut app = App::new(config, events.sender())?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start();
    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = ?err, "event loop failed");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Paste(text) => {
                if app.screen == AppScreen::Test {
                    app.paste(&text);
                }
            }
            AppEvent::Tick => app.tick(),
            AppEvent::Resize(_, _) => {}
            fetched => app.on_fetched(fetched),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.should_quit = true,
            KeyCode::Char('r') => app.reset(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter => app.restart(),
        KeyCode::Tab => app.toggle_progress(),
        KeyCode::Backspace if app.screen == AppScreen::Test => app.backspace(),
        KeyCode::Char(ch) if app.screen == AppScreen::Test => app.type_char(ch),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Test => render_test(frame, app),
        AppScreen::Progress => render_progress(frame, app),
    }
}

fn header_line<'a>(text: String, app: &App) -> Paragraph<'a> {
    let colors = &app.theme.colors;
    Paragraph::new(Line::from(Span::styled(
        text,
        Style::default()
            .fg(colors.header_fg)
            .bg(colors.header_bg)
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(colors.header_bg))
}

fn footer_lines<'a>(hints: &[&str], width: u16, app: &App) -> Vec<Line<'a>> {
    pack_hint_lines(hints, width as usize)
        .into_iter()
        .map(|hint| {
            Line::from(Span::styled(
                hint,
                Style::default().fg(app.theme.colors.text_pending),
            ))
        })
        .collect()
}

fn render_test(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let view = &app.view;

    let footer = footer_lines(TEST_HINTS, area.width, app);
    let layout = TestLayout::new(
        area,
        app.config.lookahead as u16,
        &view.reference,
        footer.len() as u16,
    );

    let status = match view.phase {
        Phase::Idle | Phase::Loading => "Loading",
        Phase::Running => "Typing",
        Phase::Ended => "Finished",
    };
    let header_text = format!(
        " {status} | Time: {}s | WPM: {} | Acc: {}% ",
        view.remaining_secs, view.metrics.wpm, view.metrics.accuracy
    );
    frame.render_widget(header_line(header_text, app), layout.header);

    frame.render_widget(QueuePreview::new(&view.upcoming, app.theme), layout.preview);

    let placeholder = if view.error.is_some() { "" } else { "Loading text..." };
    frame.render_widget(
        TypingArea::new(&view.reference, &view.typed, app.theme).placeholder(placeholder),
        layout.typing,
    );

    let previous = view
        .previous
        .as_ref()
        .map(|(reference, typed)| (reference.as_str(), typed.as_str()));
    frame.render_widget(PreviousLine::new(previous, app.theme), layout.previous);

    let message = if let Some(ref error) = view.error {
        Span::styled(format!(" {error}"), Style::default().fg(colors.error))
    } else if view.phase == Phase::Ended {
        Span::styled(
            format!(
                " Time's up: {} WPM, {}% accuracy ({}/{} chars). Press Enter to go again.",
                view.metrics.wpm,
                view.metrics.accuracy,
                view.metrics.correct_chars,
                view.metrics.total_chars
            ),
            Style::default().fg(colors.success),
        )
    } else {
        Span::raw("")
    };
    frame.render_widget(Paragraph::new(Line::from(message)), layout.message);

    frame.render_widget(Paragraph::new(footer), layout.footer);
}

fn render_progress(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let history = &app.view.history;

    let footer = footer_lines(PROGRESS_HINTS, area.width, app);
    let layout = ProgressLayout::new(area, footer.len() as u16);

    let header_text = format!(" Progress | {} tests ", history.len());
    frame.render_widget(header_line(header_text, app), layout.header);

    frame.render_widget(HistoryTable::new(history, app.theme), layout.table);
    frame.render_widget(ProgressChart::new(history, app.theme), layout.chart);
    frame.render_widget(Paragraph::new(footer), layout.footer);
}
