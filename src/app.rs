use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::autoplay::{Action, Autoplay, Ticket};
use crate::data::Catalog;
use crate::db::Db;
use crate::deck::DeckSession;
use crate::error::Error;
use crate::models::{Direction, Item, Mode, ReviewRecord};
use crate::srs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Study,
}

/// Feedback line after a rating: what was pressed and when the item returns.
pub struct RatingOutcome {
    pub quality: u8,
    pub interval_days: u32,
}

pub struct App {
    pub db: Db,
    pub catalog: Catalog,
    /// Working copy of the record store; written through on every rating.
    pub records: HashMap<String, ReviewRecord>,
    pub deck: DeckSession,
    pub screen: Screen,
    pub mode: Mode,
    pub chapter_start: u32,
    pub chapter_end: u32,
    pub shuffled: bool,
    /// Flashcard mode: back side showing.
    pub flipped: bool,
    /// Quiz/review mode: answer and rating row showing.
    pub revealed: bool,
    pub last_outcome: Option<RatingOutcome>,
    pub autoplay: Autoplay,
    pending_autoplay: Option<Ticket>,
    pub due_today: usize,
    pub exit: bool,
}

impl App {
    pub async fn new(db: Db) -> Result<Self, Error> {
        let catalog = Catalog::load();
        let records = db.load_all().await?;
        let (lo, hi) = catalog.chapter_bounds().unwrap_or((1, 1));

        let mut app = Self {
            db,
            catalog,
            records,
            deck: DeckSession::empty(Mode::Flashcard),
            screen: Screen::Dashboard,
            mode: Mode::Flashcard,
            chapter_start: 3u32.clamp(lo, hi),
            chapter_end: 3u32.clamp(lo, hi),
            shuffled: false,
            flipped: false,
            revealed: false,
            last_outcome: None,
            autoplay: Autoplay::new(),
            pending_autoplay: None,
            due_today: 0,
            exit: false,
        };
        app.due_today = app.due_count();
        Ok(app)
    }

    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn due_count(&self) -> usize {
        let today = Self::today();
        self.catalog
            .items()
            .iter()
            .filter(|item| {
                self.records
                    .get(&item.id)
                    .is_some_and(|record| record.is_due(today))
            })
            .count()
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.deck.current()
    }

    /// Rebuilds the working set from the current selection. Any running
    /// autoplay is stopped first; the cursor and card faces reset.
    pub fn rebuild_deck(&mut self) {
        self.autoplay.stop();
        self.deck = DeckSession::build(
            &self.catalog,
            &self.records,
            self.chapter_start,
            self.chapter_end,
            self.mode,
            self.shuffled,
            Self::today(),
        );
        self.flipped = false;
        self.revealed = false;
        self.last_outcome = None;
    }

    /// Range bounds stay ordered by dragging the other end along, the same
    /// clamp the original chapter selectors applied.
    pub fn adjust_chapter_start(&mut self, delta: i32) {
        let (lo, hi) = self.catalog.chapter_bounds().unwrap_or((1, 1));
        self.chapter_start = self
            .chapter_start
            .saturating_add_signed(delta)
            .clamp(lo, hi);
        if self.chapter_start > self.chapter_end {
            self.chapter_end = self.chapter_start;
        }
    }

    pub fn adjust_chapter_end(&mut self, delta: i32) {
        let (lo, hi) = self.catalog.chapter_bounds().unwrap_or((1, 1));
        self.chapter_end = self.chapter_end.saturating_add_signed(delta).clamp(lo, hi);
        if self.chapter_start > self.chapter_end {
            self.chapter_start = self.chapter_end;
        }
    }

    /// Whole-selection update for API callers. Order and catalog bounds are
    /// enforced here so the deck build can assume an ordered range.
    pub fn set_selection(&mut self, chapter_start: u32, chapter_end: u32, mode: Mode, shuffled: bool) {
        let (lo, hi) = self.catalog.chapter_bounds().unwrap_or((1, 1));
        let start = chapter_start.clamp(lo, hi);
        let end = chapter_end.clamp(lo, hi);
        self.chapter_start = start.min(end);
        self.chapter_end = start.max(end);
        self.mode = mode;
        self.shuffled = shuffled;
    }

    pub fn cycle_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Flashcard => Mode::Quiz,
            Mode::Quiz => Mode::Review,
            Mode::Review => Mode::Flashcard,
        };
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffled = !self.shuffled;
    }

    /// Manual cursor move. Ignored while autoplay owns the cursor.
    pub fn advance(&mut self, direction: Direction) {
        if self.autoplay.is_active() {
            return;
        }
        self.deck.advance(direction);
        self.flipped = false;
        self.revealed = false;
    }

    pub fn flip(&mut self) {
        if self.autoplay.is_active() {
            return;
        }
        self.flipped = !self.flipped;
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    /// The only mutating entry point into record storage: schedules the
    /// current item, writes the record through, then moves the session on.
    /// Nothing is mutated unless the write succeeds.
    pub async fn submit_rating(&mut self, quality: u8) -> Result<ReviewRecord, Error> {
        if self.autoplay.is_active() {
            return Err(Error::AutoplayActive);
        }
        let item = self.deck.current().ok_or(Error::NoCurrentItem)?.clone();

        let updated = srs::next_record(self.records.get(&item.id), quality, Self::today())?;
        self.db.put(&item.id, &updated).await?;
        self.records.insert(item.id.clone(), updated.clone());

        self.last_outcome = Some(RatingOutcome {
            quality,
            interval_days: updated.interval_days,
        });

        if self.deck.mode() == Mode::Review {
            // Rated items are done for this review session.
            self.deck.remove_current();
        } else {
            self.deck.advance(Direction::Next);
        }
        self.flipped = false;
        self.revealed = false;
        self.due_today = self.due_count();

        Ok(updated)
    }

    pub fn toggle_autoplay(&mut self) {
        if self.autoplay.is_active() {
            self.autoplay.stop();
        } else if self.mode == Mode::Flashcard && !self.deck.is_empty() {
            self.flipped = false;
            let ticket = self.autoplay.start();
            self.pending_autoplay = Some(ticket);
        }
    }

    pub fn cycle_autoplay_speed(&mut self) {
        self.autoplay.cycle_speed();
        if self.autoplay.is_active() {
            // Restart so the new cadence takes effect from the top of a card.
            self.autoplay.stop();
            self.flipped = false;
            let ticket = self.autoplay.start();
            self.pending_autoplay = Some(ticket);
        }
    }

    /// A freshly started run whose driver task still needs spawning.
    pub fn take_pending_autoplay(&mut self) -> Option<Ticket> {
        self.pending_autoplay.take()
    }

    /// One timed autoplay step. Returns false once the ticket is stale or
    /// the set is empty, telling the driver to die quietly.
    pub fn autoplay_apply(&mut self, ticket: Ticket, action: Action) -> bool {
        if !self.autoplay.is_live(ticket) {
            return false;
        }
        if self.deck.is_empty() {
            self.autoplay.stop();
            return false;
        }
        match action {
            Action::SpeakFront => {
                if let Some(item) = self.deck.current() {
                    log::debug!("autoplay: front {}", item.front);
                }
            }
            Action::Flip => self.flipped = true,
            Action::SpeakBack => {
                if let Some(item) = self.deck.current() {
                    log::debug!("autoplay: back {}", item.meaning_secondary);
                }
            }
            Action::Advance => {
                self.deck.advance(Direction::Next);
                self.flipped = false;
            }
        }
        true
    }

    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Result<(), Error> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        match self.screen {
            Screen::Dashboard => self.handle_dashboard_key(key.code),
            Screen::Study => self.handle_study_key(key.code).await?,
        }
        Ok(())
    }

    fn handle_dashboard_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.exit = true,
            KeyCode::Up => self.adjust_chapter_start(1),
            KeyCode::Down => self.adjust_chapter_start(-1),
            KeyCode::Right => self.adjust_chapter_end(1),
            KeyCode::Left => self.adjust_chapter_end(-1),
            KeyCode::Tab => self.cycle_mode(),
            KeyCode::Char('s') => self.toggle_shuffle(),
            KeyCode::Enter => {
                self.rebuild_deck();
                self.screen = Screen::Study;
            }
            _ => {}
        }
    }

    async fn handle_study_key(&mut self, code: KeyCode) -> Result<(), Error> {
        match code {
            KeyCode::Char('q') => self.exit = true,
            KeyCode::Esc => {
                self.autoplay.stop();
                self.screen = Screen::Dashboard;
                self.due_today = self.due_count();
            }
            KeyCode::Left if self.mode == Mode::Flashcard => self.advance(Direction::Prev),
            KeyCode::Right if self.mode == Mode::Flashcard => self.advance(Direction::Next),
            KeyCode::Char(' ') => match self.mode {
                Mode::Flashcard => self.flip(),
                Mode::Quiz | Mode::Review => self.reveal(),
            },
            KeyCode::Char('a') if self.mode == Mode::Flashcard => self.toggle_autoplay(),
            KeyCode::Char('v') if self.mode == Mode::Flashcard => self.cycle_autoplay_speed(),
            KeyCode::Char(c @ '0'..='5') if self.mode != Mode::Flashcard => {
                // Rating row only accepts input once the answer is showing.
                if self.revealed && !self.autoplay.is_active() {
                    let quality = c as u8 - b'0';
                    match self.submit_rating(quality).await {
                        Ok(_) => {}
                        Err(Error::NoCurrentItem | Error::AutoplayActive) => {}
                        Err(err) => return Err(err),
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }
}
