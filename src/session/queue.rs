use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::text::{DEFAULT_TEXT, LineSource, TextError};

/// Redraws allowed when a fetched line duplicates one already queued.
pub const MAX_REDRAWS: usize = 5;

/// Identifies one in-flight replenishment fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RefillTicket(pub u64);

/// Lines needed to start a test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueSeed {
    pub current: String,
    pub lookahead: Vec<String>,
    pub buffer: String,
}

impl QueueSeed {
    /// Draw current, `lookahead` upcoming lines and one buffer line, each
    /// distinct from the ones before it when the source allows.
    pub fn draw(source: &dyn LineSource, lookahead: usize) -> Result<Self, TextError> {
        let mut taken: Vec<String> = Vec::with_capacity(lookahead + 2);
        let current = draw_distinct(source, &taken)?;
        taken.push(current.clone());

        let mut upcoming = Vec::with_capacity(lookahead);
        for _ in 0..lookahead {
            let line = draw_distinct(source, &taken)?;
            taken.push(line.clone());
            upcoming.push(line);
        }

        let buffer = draw_distinct(source, &taken)?;
        Ok(Self {
            current,
            lookahead: upcoming,
            buffer,
        })
    }
}

fn draw_distinct(source: &dyn LineSource, taken: &[String]) -> Result<String, TextError> {
    let mut line = source.fetch_line()?;
    for _ in 0..MAX_REDRAWS {
        if !taken.contains(&line) {
            break;
        }
        line = source.fetch_line()?;
    }
    Ok(line)
}

#[derive(Debug, PartialEq, Eq)]
pub struct Advance {
    pub line: String,
    /// A replenishment to start, if none was already in flight.
    pub refill: Option<RefillTicket>,
}

/// Upcoming lines plus one buffered line. At most one replenishment is in
/// flight; its ticket is the only one whose result is accepted.
#[derive(Debug)]
pub struct LineQueue {
    capacity: usize,
    lookahead: VecDeque<String>,
    buffer: Option<String>,
    pending: Option<RefillTicket>,
    next_ticket: u64,
    redraws: usize,
}

impl LineQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            lookahead: VecDeque::new(),
            buffer: None,
            pending: None,
            next_ticket: 0,
            redraws: 0,
        }
    }

    /// Replace the contents with a fresh seed and return its current line.
    pub fn install(&mut self, seed: QueueSeed) -> String {
        self.clear();
        self.lookahead.extend(seed.lookahead);
        self.buffer = Some(seed.buffer);
        seed.current
    }

    /// Drops every line and forgets the pending ticket, so results of
    /// fetches started before the clear are treated as stale.
    pub fn clear(&mut self) {
        self.lookahead.clear();
        self.buffer = None;
        self.pending = None;
        self.redraws = 0;
    }

    pub fn advance(&mut self) -> Advance {
        let line = match self.lookahead.pop_front() {
            Some(line) => line,
            None => {
                warn!("lookahead queue empty, substituting default line");
                DEFAULT_TEXT.to_string()
            }
        };
        if self.lookahead.len() < self.capacity {
            if let Some(buffered) = self.buffer.take() {
                self.lookahead.push_back(buffered);
            }
        }
        let refill = self.request_refill();
        Advance { line, refill }
    }

    /// Put a line back at the head, e.g. the line abandoned by going back.
    pub fn restore_front(&mut self, line: String) {
        self.lookahead.push_front(line);
        if self.lookahead.len() > self.capacity && self.buffer.is_none() {
            self.buffer = self.lookahead.pop_back();
        }
    }

    /// Store the result of a replenishment fetch. Returns a follow-up fetch
    /// to start, if any.
    pub fn complete_refill(
        &mut self,
        ticket: RefillTicket,
        line: String,
        current: &str,
    ) -> Option<RefillTicket> {
        if self.pending != Some(ticket) {
            debug!(ticket = ticket.0, "dropping stale refill");
            return None;
        }
        self.pending = None;

        if self.contains(&line, current) && self.redraws < MAX_REDRAWS {
            self.redraws += 1;
            debug!(redraws = self.redraws, "refill duplicated a queued line");
            return Some(self.issue_ticket());
        }
        self.redraws = 0;

        if self.lookahead.len() < self.capacity {
            self.lookahead.push_back(line);
        } else if self.buffer.is_none() {
            self.buffer = Some(line);
        } else {
            // A go-back refilled the slot while this fetch was in flight.
            debug!(ticket = ticket.0, "buffer already occupied, dropping refill");
        }
        self.request_refill()
    }

    fn contains(&self, line: &str, current: &str) -> bool {
        line == current
            || self.lookahead.iter().any(|l| l == line)
            || self.buffer.as_deref() == Some(line)
    }

    fn request_refill(&mut self) -> Option<RefillTicket> {
        if self.pending.is_some() || self.buffer.is_some() {
            return None;
        }
        Some(self.issue_ticket())
    }

    fn issue_ticket(&mut self) -> RefillTicket {
        self.next_ticket += 1;
        let ticket = RefillTicket(self.next_ticket);
        self.pending = Some(ticket);
        ticket
    }

    /// Lines shown in the queue preview, nearest first.
    pub fn upcoming(&self) -> Vec<String> {
        self.lookahead.iter().take(self.capacity).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lookahead.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookahead.is_empty()
    }

    pub fn buffer(&self) -> Option<&str> {
        self.buffer.as_deref()
    }

    pub fn pending(&self) -> Option<RefillTicket> {
        self.pending
    }
}
