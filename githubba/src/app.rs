//! Central application state for githubba.
//!
//! `AppState` owns the card stack, the repository feed and all transient UI
//! state (mode, drag in progress, settings draft, spinner frame). It holds no
//! rendering logic: `ui` reads it and `ui::keybindings` mutates it.

use githubba_core::feed::{LinkOpener, RepositoryFeed};
use githubba_core::gesture::{SwipeGesture, DEFAULT_SWIPE_THRESHOLD};
use githubba_core::stack::{CardStack, SwipeOutcome};
use githubba_core::timer::{TimerFired, TimerSink};
use githubba_core::types::{FeedType, SwipeDirection};
use ratatui::layout::{Position, Rect};
use tokio::sync::mpsc::UnboundedSender;

use crate::config::Config;
use crate::feed::{Applied, FeedRequest, FeedResultPayload, FeedState};

/// Languages offered in the settings popup, after "All Languages".
pub const LANGUAGES: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "Go",
    "Rust",
    "C++",
    "Ruby",
    "PHP",
    "Swift",
];

pub const ALL_LANGUAGES: &str = "All Languages";

/// Which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Help overlay shown above the stack.
    HelpOverlay,
    /// Settings popup shown above the stack.
    Settings,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    #[default]
    Language,
    Feed,
}

/// Unsaved edits in the settings popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDraft {
    /// Row in the language list; 0 is "All Languages".
    pub language_row: usize,
    pub feed: FeedType,
    pub field: SettingsField,
}

impl SettingsDraft {
    /// Draft pre-filled from the running settings. A language outside the
    /// built-in list shows as "All Languages".
    pub fn from_current(language: Option<&str>, feed: FeedType) -> Self {
        let language_row = language
            .and_then(|l| LANGUAGES.iter().position(|known| known.eq_ignore_ascii_case(l)))
            .map_or(0, |i| i + 1);
        Self { language_row, feed, field: SettingsField::Language }
    }

    /// Number of rows in the language list.
    pub fn language_rows() -> usize {
        LANGUAGES.len() + 1
    }

    pub fn language_label(row: usize) -> &'static str {
        match row {
            0 => ALL_LANGUAGES,
            n => LANGUAGES.get(n - 1).copied().unwrap_or(ALL_LANGUAGES),
        }
    }

    pub fn language(&self) -> Option<String> {
        match self.language_row {
            0 => None,
            n => LANGUAGES.get(n - 1).map(|l| (*l).to_owned()),
        }
    }

    pub fn next_language(&mut self) {
        self.language_row = (self.language_row + 1) % Self::language_rows();
    }

    pub fn prev_language(&mut self) {
        self.language_row = (self.language_row + Self::language_rows() - 1) % Self::language_rows();
    }

    pub fn toggle_field(&mut self) {
        self.field = match self.field {
            SettingsField::Language => SettingsField::Feed,
            SettingsField::Feed => SettingsField::Language,
        };
    }
}

/// Builds the link opener for each new card stack.
pub type OpenerFactory = fn() -> Box<dyn LinkOpener + Send>;

pub struct AppState {
    pub mode: Mode,
    /// Running settings. Saving the settings popup updates these in memory.
    pub config: Config,
    pub feed: FeedState,
    pub stack: CardStack,
    /// Mouse drag on the top card, if one is in progress.
    pub drag: Option<SwipeGesture>,
    pub settings: SettingsDraft,
    pub help_scroll: u16,
    /// Loading spinner frame, advanced on every tick.
    pub spinner: usize,
    /// Where the top card was last drawn, for mouse hit-testing.
    pub card_area: Rect,
    sink: TimerSink,
    make_opener: OpenerFactory,
}

impl AppState {
    /// Creates the state and starts the first feed session.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        config: Config,
        feed_tx: Option<UnboundedSender<FeedRequest>>,
        sink: TimerSink,
        make_opener: OpenerFactory,
    ) -> Self {
        let feed = FeedState::new(feed_tx);
        let stack = CardStack::new(config.stack_config(), make_opener(), sink.clone());
        let settings = SettingsDraft::from_current(config.language.as_deref(), config.feed);
        let mut state = Self {
            mode: Mode::default(),
            config,
            feed,
            stack,
            drag: None,
            settings,
            help_scroll: 0,
            spinner: 0,
            card_area: Rect::default(),
            sink,
            make_opener,
        };
        state.feed.start_session(
            state.config.feed,
            state.config.language.clone(),
            chrono::Local::now().date_naive(),
            session_seed(),
        );
        state
    }

    /// Throws away the current stack and feed and starts over with the
    /// running settings. The old stack's timers die with it.
    pub fn new_session(&mut self) {
        self.drag = None;
        self.stack = CardStack::new(self.config.stack_config(), (self.make_opener)(), self.sink.clone());
        self.feed.start_session(
            self.config.feed,
            self.config.language.clone(),
            chrono::Local::now().date_naive(),
            session_seed(),
        );
    }

    /// Swipes the top card from the keyboard.
    pub fn swipe(&mut self, direction: SwipeDirection) -> SwipeOutcome {
        let index = self.stack.current_index();
        self.stack.on_swipe_completed(direction, index, &self.feed)
    }

    pub fn on_timer(&mut self, fired: TimerFired) {
        self.stack.handle_timer(fired, &mut self.feed);
    }

    pub fn on_feed_result(&mut self, payload: FeedResultPayload) {
        match self.feed.apply(payload) {
            Applied::Discarded | Applied::Retried => {}
            Applied::Appended { .. } => self.stack.acknowledge_page(&mut self.feed),
            // Picked up again by `tick` once the feed's backoff runs out.
            Applied::Failed => {}
        }
    }

    pub fn tick(&mut self) {
        self.spinner = self.spinner.wrapping_add(1);
        if self.feed.tick() {
            self.stack.acknowledge_page(&mut self.feed);
        }
    }

    /// Starts tracking a drag if it begins on the top card.
    pub fn begin_drag(&mut self, column: u16, row: u16) {
        let on_card = self.card_area.contains(Position { x: column, y: row });
        if !on_card || self.stack.is_exhausted(self.feed.records().len()) {
            self.drag = None;
            return;
        }
        let mut gesture = SwipeGesture::new(self.stack.current_index(), true, DEFAULT_SWIPE_THRESHOLD);
        gesture.press(column, row);
        self.drag = Some(gesture);
    }

    pub fn drag_to(&mut self, column: u16, row: u16) {
        if let Some(gesture) = self.drag.as_mut() {
            gesture.drag(column, row);
        }
    }

    /// Finishes a drag. Returns the stack's verdict when the drag was a swipe.
    pub fn end_drag(&mut self, column: u16, row: u16) -> Option<SwipeOutcome> {
        let mut gesture = self.drag.take()?;
        let direction = gesture.release(column, row)?;
        Some(self.stack.on_swipe_completed(direction, gesture.record_index(), &self.feed))
    }

    /// Live horizontal offset of the top card while it is being dragged.
    pub fn drag_offset(&self) -> i32 {
        self.drag.as_ref().map_or(0, SwipeGesture::offset)
    }

    pub fn open_settings(&mut self) {
        self.settings = SettingsDraft::from_current(self.config.language.as_deref(), self.config.feed);
        self.mode = Mode::Settings;
    }

    /// Applies the draft and starts a new session with it.
    pub fn save_settings(&mut self) {
        self.config.language = self.settings.language();
        self.config.feed = self.settings.feed;
        self.mode = Mode::Normal;
        tracing::info!(feed = %self.config.feed, language = ?self.config.language, "settings changed");
        self.new_session();
    }
}

fn session_seed() -> u64 {
    rand::random::<u64>()
}
