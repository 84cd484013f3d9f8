use std::time::Instant;

use crate::config::Config;
use crate::content::ContentRegistry;
use crate::generator::spawner::ItemId;
use crate::keyboard::ime::{ImeEvent, ImeMode, TextInput};
use crate::session::game::{Game, GamePhase, Snapshot};
use crate::ui::theme::Theme;

/// Front-end state around a [`Game`]: the text field, the theme and which
/// course the selection cursor is on.
pub struct App {
    pub game: Game,
    pub theme: &'static Theme,
    pub config: Config,
    pub course_selected: usize,
    pub should_quit: bool,
    input: Box<dyn TextInput>,
    input_item: Option<ItemId>,
    last_frame: Instant,
}

impl App {
    pub fn new(config: Config, content: ContentRegistry) -> Self {
        let theme = Theme::load(&config.theme).unwrap_or_else(|| {
            log::warn!("theme '{}' not found, using default", config.theme);
            Theme::default()
        });
        let theme: &'static Theme = Box::leak(Box::new(theme));

        let course_selected = content
            .courses()
            .iter()
            .position(|c| c.id.eq_ignore_ascii_case(&config.default_course))
            .unwrap_or(0);
        let game = Game::new(content, config.game_settings());

        Self {
            game,
            theme,
            input: config.ime.text_input(),
            config,
            course_selected,
            should_quit: false,
            input_item: None,
            last_frame: Instant::now(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.game.phase()
    }

    pub fn ime(&self) -> ImeMode {
        self.config.ime
    }

    pub fn snapshot(&self) -> Snapshot {
        self.game.snapshot()
    }

    /// Moves the game clock by the wall time since the previous call.
    pub fn on_frame(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.game.advance(dt);
        if self.live_item() != self.input_item {
            self.input_item = self.live_item();
            if self.phase() == GamePhase::Playing {
                // A plate went by; the pre-edit carries over like after a completion.
                for carried in self.input.clear_committed() {
                    self.dispatch(carried);
                }
            } else {
                self.input.reset();
            }
        }
    }

    pub fn set_theme(&mut self, name: &str) -> bool {
        match Theme::load(name) {
            Some(theme) => {
                self.theme = Box::leak(Box::new(theme));
                self.config.theme = name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn next_course(&mut self) {
        let n = self.game.content().courses().len();
        if n > 0 {
            self.course_selected = (self.course_selected + 1) % n;
        }
    }

    pub fn prev_course(&mut self) {
        let n = self.game.content().courses().len();
        if n > 0 {
            self.course_selected = (self.course_selected + n - 1) % n;
        }
    }

    pub fn open_course_select(&mut self) {
        if let Err(e) = self.game.open_course_select() {
            log::warn!("{e}");
        }
    }

    pub fn go_to_title(&mut self) {
        if let Err(e) = self.game.go_to_title() {
            log::warn!("{e}");
        }
    }

    pub fn start_selected(&mut self) {
        let Some(course) = self.game.content().courses().get(self.course_selected) else {
            return;
        };
        let id = course.id.clone();
        self.start_course(&id);
    }

    pub fn start_course(&mut self, course_id: &str) {
        match self.game.start_game(course_id) {
            Ok(_) => {
                if let Some(idx) = self
                    .game
                    .content()
                    .courses()
                    .iter()
                    .position(|c| c.id.eq_ignore_ascii_case(course_id))
                {
                    self.course_selected = idx;
                }
                self.config.default_course = course_id.to_ascii_uppercase();
                self.reset_input();
            }
            Err(e) => log::warn!("{e}"),
        }
    }

    pub fn retry(&mut self) {
        match self.game.retry() {
            Ok(_) => self.reset_input(),
            Err(e) => log::warn!("{e}"),
        }
    }

    pub fn stop(&mut self) {
        match self.game.stop() {
            Ok(()) => self.reset_input(),
            Err(e) => log::warn!("{e}"),
        }
    }

    pub fn type_char(&mut self, ch: char) {
        let events = self.input.key(ch);
        self.feed(events);
    }

    pub fn backspace(&mut self) {
        let events = self.input.backspace();
        self.feed(events);
    }

    /// Space/Enter: finish the pre-edit.
    pub fn commit(&mut self) {
        let events = self.input.commit();
        self.feed(events);
    }

    /// Text that arrives already committed (terminal IME or paste).
    pub fn commit_text(&mut self, text: &str) {
        let events: Vec<ImeEvent> = text.chars().flat_map(|ch| self.input.key(ch)).collect();
        self.feed(events);
        let events = self.input.commit();
        self.feed(events);
    }

    /// Saves the last course and theme. Failures only cost the preference.
    pub fn save_config(&self) {
        if let Err(e) = self.config.save() {
            log::warn!("could not save config: {e}");
        }
    }

    fn live_item(&self) -> Option<ItemId> {
        self.game
            .round()
            .and_then(|r| r.item.as_ref())
            .map(|item| item.id)
    }

    fn reset_input(&mut self) {
        self.input.reset();
        self.input_item = self.live_item();
    }

    fn feed(&mut self, events: Vec<ImeEvent>) {
        for event in events {
            self.dispatch(event);
            if self.live_item() != self.input_item {
                // The field is cleared for the next plate. Whatever is still
                // being composed stays, the rest of this batch is stale.
                self.input_item = self.live_item();
                for carried in self.input.clear_committed() {
                    self.dispatch(carried);
                }
                return;
            }
        }
    }

    fn dispatch(&mut self, event: ImeEvent) {
        match event {
            ImeEvent::CompositionStart => self.game.handle_composition_start(),
            ImeEvent::Change { value, .. } => {
                self.game.handle_text_change(&value);
            }
            ImeEvent::CompositionEnd { value } => {
                self.game.handle_composition_end(&value);
            }
        }
    }
}
