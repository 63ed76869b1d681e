use crate::session::metrics::Metrics;
use crate::session::typing_test::{Phase, Presenter};
use crate::store::schema::MetricsSnapshot;

/// Everything the test screen shows, as last pushed by the orchestrator.
///
/// `input` is the raw field contents; key handling edits it and hands the new
/// value to the test, which may overwrite it again through `set_input`.
#[derive(Clone, Debug)]
pub struct TestView {
    pub phase: Phase,
    pub reference: String,
    pub typed: String,
    pub input: String,
    pub upcoming: Vec<String>,
    pub previous: Option<(String, String)>,
    pub remaining_secs: u64,
    pub metrics: Metrics,
    pub error: Option<String>,
    pub history: Vec<MetricsSnapshot>,
}

impl TestView {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            reference: String::new(),
            typed: String::new(),
            input: String::new(),
            upcoming: Vec::new(),
            previous: None,
            remaining_secs: 0,
            metrics: Metrics::default(),
            error: None,
            history: Vec::new(),
        }
    }
}

impl Default for TestView {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for TestView {
    fn render_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    fn render_reference(&mut self, reference: &str, typed: &str) {
        self.reference = reference.to_string();
        self.typed = typed.to_string();
    }

    fn render_queue_preview(&mut self, upcoming: &[String]) {
        self.upcoming = upcoming.to_vec();
    }

    fn render_previous(&mut self, previous: Option<(&str, &str)>) {
        self.previous = previous.map(|(r, t)| (r.to_string(), t.to_string()));
    }

    fn render_timer(&mut self, remaining_secs: u64) {
        self.remaining_secs = remaining_secs;
    }

    fn render_metrics(&mut self, metrics: &Metrics) {
        self.metrics = *metrics;
    }

    fn render_error(&mut self, message: Option<&str>) {
        self.error = message.map(str::to_string);
    }

    fn render_history_table(&mut self, history: &[MetricsSnapshot]) {
        self.history = history.to_vec();
    }

    fn set_input(&mut self, raw: &str) {
        self.input = raw.to_string();
    }
}
