use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Instant;

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::Config;
use crate::event::AppEvent;
use crate::session::queue::{QueueSeed, RefillTicket};
use crate::session::typing_test::{Fetcher, Phase, TestEvent, TestSettings, TypingTest};
use crate::store::MetricsStore;
use crate::store::json_store::JsonStore;
use crate::text::{DEFAULT_TEXT, LineSource, RandomText};
use crate::ui::theme::Theme;
use crate::ui::view::TestView;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Test,
    Progress,
}

/// Runs every fetch on its own thread and posts the result back into the
/// event loop.
pub struct ThreadFetcher {
    source: Arc<dyn LineSource>,
    lookahead: usize,
    tx: Sender<AppEvent>,
}

impl ThreadFetcher {
    pub fn new(source: Arc<dyn LineSource>, lookahead: usize, tx: Sender<AppEvent>) -> Self {
        Self {
            source,
            lookahead,
            tx,
        }
    }
}

impl Fetcher for ThreadFetcher {
    fn fetch_seed(&self, generation: u64) {
        let source = Arc::clone(&self.source);
        let lookahead = self.lookahead;
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = QueueSeed::draw(&*source, lookahead);
            if tx.send(AppEvent::SeedFetched { generation, result }).is_err() {
                debug!(generation, "event loop gone, dropping seed");
            }
        });
    }

    fn fetch_line(&self, ticket: RefillTicket) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let line = source.fetch_line().unwrap_or_else(|err| {
                warn!(ticket = ticket.0, error = %err, "refill failed, using default text");
                DEFAULT_TEXT.to_string()
            });
            if tx.send(AppEvent::LineFetched { ticket, line }).is_err() {
                debug!(ticket = ticket.0, "event loop gone, dropping refill");
            }
        });
    }
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub test: TypingTest,
    pub view: TestView,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, tx: Sender<AppEvent>) -> Result<Self> {
        let store = JsonStore::new()?;
        let source: Arc<dyn LineSource> = Arc::new(RandomText::from_config(&config));
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        Ok(Self::with_parts(config, theme, source, Box::new(store), tx))
    }

    pub fn with_parts(
        config: Config,
        theme: &'static Theme,
        source: Arc<dyn LineSource>,
        store: Box<dyn MetricsStore>,
        tx: Sender<AppEvent>,
    ) -> Self {
        let settings = TestSettings {
            duration: config.duration(),
            lookahead: config.lookahead,
            metrics_interval: config.metrics_interval(),
        };
        let fetcher = ThreadFetcher::new(source, config.lookahead, tx);
        let test = TypingTest::new(settings, Box::new(fetcher), store);

        Self {
            screen: AppScreen::Test,
            config,
            theme,
            test,
            view: TestView::new(),
            should_quit: false,
        }
    }

    pub fn start(&mut self) {
        self.test.show_history(&mut self.view);
        self.dispatch(TestEvent::Restart);
    }

    fn dispatch(&mut self, event: TestEvent) {
        self.test.handle(event, &mut self.view);
    }

    fn input_changed(&mut self, raw: String, backspace: bool) {
        self.dispatch(TestEvent::InputChanged {
            raw,
            backspace,
            at: Instant::now(),
        });
    }

    pub fn type_char(&mut self, ch: char) {
        let mut raw = self.view.input.clone();
        raw.push(ch);
        self.input_changed(raw, false);
    }

    pub fn backspace(&mut self) {
        let mut raw = self.view.input.clone();
        raw.pop();
        self.input_changed(raw, true);
    }

    /// Pasted text lands in the field in one go, like any multi-char edit.
    pub fn paste(&mut self, text: &str) {
        let mut raw = self.view.input.clone();
        raw.extend(text.chars().filter(|c| !c.is_control()));
        self.input_changed(raw, false);
    }

    pub fn restart(&mut self) {
        self.screen = AppScreen::Test;
        self.dispatch(TestEvent::Restart);
    }

    pub fn reset(&mut self) {
        self.screen = AppScreen::Test;
        self.dispatch(TestEvent::Reset);
    }

    pub fn toggle_progress(&mut self) {
        self.screen = match self.screen {
            AppScreen::Test => {
                self.test.show_history(&mut self.view);
                AppScreen::Progress
            }
            AppScreen::Progress => AppScreen::Test,
        };
    }

    pub fn tick(&mut self) {
        self.dispatch(TestEvent::Tick(Instant::now()));
    }

    /// Feeds worker results back into the test. Other events are ignored.
    pub fn on_fetched(&mut self, event: AppEvent) {
        match event {
            AppEvent::SeedFetched { generation, result } => {
                self.dispatch(TestEvent::SeedFetched { generation, result })
            }
            AppEvent::LineFetched { ticket, line } => {
                self.dispatch(TestEvent::LineFetched { ticket, line })
            }
            _ => {}
        }
    }

    pub fn is_running(&self) -> bool {
        self.test.phase() == Phase::Running
    }
}
