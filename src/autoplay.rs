use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::app::App;

/// Selectable pacing for one card (milliseconds from front to advance).
pub const SPEEDS_MS: &[u64] = &[3000, 5000, 8000];

/// Lead-in before each pronunciation step.
const LEAD_MS: u64 = 500;

/// The timed steps of one autoplay pass over a card. Speech synthesis is a
/// presentation concern; the steps still exist because they pace the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SpeakFront,
    Flip,
    SpeakBack,
    Advance,
}

/// Proof that a continuation belongs to the current autoplay run. Stale
/// tickets (from a stopped or restarted run) are inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// Autoplay ownership state. While `active`, the driver task owns the
/// cursor: manual advance, flip and rating are locked out.
pub struct Autoplay {
    generation: u64,
    active: bool,
    pub speed_ms: u64,
}

impl Autoplay {
    pub fn new() -> Self {
        Self {
            generation: 0,
            active: false,
            speed_ms: SPEEDS_MS[1],
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&mut self) -> Ticket {
        self.generation += 1;
        self.active = true;
        Ticket {
            generation: self.generation,
        }
    }

    /// Idempotent. Bumping the generation invalidates every outstanding
    /// ticket, so no pending continuation can fire into a later run.
    pub fn stop(&mut self) {
        self.active = false;
        self.generation += 1;
    }

    pub fn is_live(&self, ticket: Ticket) -> bool {
        self.active && ticket.generation == self.generation
    }

    pub fn cycle_speed(&mut self) {
        let idx = SPEEDS_MS
            .iter()
            .position(|&s| s == self.speed_ms)
            .unwrap_or(0);
        self.speed_ms = SPEEDS_MS[(idx + 1) % SPEEDS_MS.len()];
    }
}

/// Per-card cadence: delay before each action, relative to the previous one.
/// front … 0.5s … speak … flip at speed/2 … 0.5s … speak … advance at speed.
pub fn schedule(speed_ms: u64) -> [(Duration, Action); 4] {
    let half = (speed_ms / 2).max(2 * LEAD_MS);
    [
        (Duration::from_millis(LEAD_MS), Action::SpeakFront),
        (Duration::from_millis(half - LEAD_MS), Action::Flip),
        (Duration::from_millis(LEAD_MS), Action::SpeakBack),
        (Duration::from_millis(half - LEAD_MS), Action::Advance),
    ]
}

/// Drives one autoplay run until its ticket goes stale. Every continuation
/// revalidates the ticket after waking, so a run stopped mid-sleep leaves
/// nothing behind.
pub fn spawn_driver(app: Arc<Mutex<App>>, ticket: Ticket) {
    tokio::spawn(async move {
        loop {
            let speed_ms = {
                let guard = app.lock().await;
                if !guard.autoplay.is_live(ticket) {
                    return;
                }
                guard.autoplay.speed_ms
            };

            for (delay, action) in schedule(speed_ms) {
                tokio::time::sleep(delay).await;
                let mut guard = app.lock().await;
                if !guard.autoplay_apply(ticket, action) {
                    return;
                }
            }
        }
    });
}
