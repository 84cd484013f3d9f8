use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use thiserror::Error;

use crate::content::{ContentError, ContentRegistry};
use crate::engine::combo::BonusEvent;
use crate::engine::stats::RoundStats;
use crate::generator::spawner::{ItemId, ItemSpawner};
use crate::session::input::MatchResult;
use crate::session::round::{BonusFlash, Round};
use crate::session::schedule::{RoundId, Scheduler, Timer, TimerKind};

pub const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_BONUS_FLASH: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Idle,
    Selecting,
    Playing,
    Ended,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::Idle => "idle",
            GamePhase::Selecting => "selecting",
            GamePhase::Playing => "playing",
            GamePhase::Ended => "ended",
        };
        f.write_str(name)
    }
}

/// Rejected commands. The game is left exactly as it was.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("unknown course '{0}'")]
    UnknownCourse(String),
    #[error("course cannot be played: {0}")]
    Content(#[from] ContentError),
    #[error("cannot {command} while {phase}")]
    InvalidTransition {
        command: &'static str,
        phase: GamePhase,
    },
}

#[derive(Clone, Copy, Debug)]
pub struct GameSettings {
    pub bonus_flash: Duration,
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            bonus_flash: DEFAULT_BONUS_FLASH,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ItemView {
    pub id: ItemId,
    pub word: String,
    pub price: u32,
    pub travel_secs: f64,
    pub emoji: String,
    pub progress: f64,
}

/// Read-only view of the game for the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub course_id: Option<String>,
    pub course_title: Option<String>,
    pub course_cost: u32,
    pub remaining_time: u32,
    pub total_time: u32,
    pub item: Option<ItemView>,
    pub input: String,
    pub composing: bool,
    pub combo: u32,
    pub combo_percent: f64,
    pub bonus_seconds: Option<u32>,
    pub score: u64,
    pub correct_keys: u64,
    pub mistypes: u64,
    pub misses: u32,
    pub plate_counts: BTreeMap<u32, u32>,
    pub stats: Option<RoundStats>,
}

/// The session state machine. Every stimulus (text entry, countdown tick,
/// item travel completion) is handled to completion before the next one.
pub struct Game {
    content: ContentRegistry,
    settings: GameSettings,
    phase: GamePhase,
    round: Option<Round>,
    next_round: u64,
    next_flash: u64,
    spawner: ItemSpawner,
    scheduler: Scheduler,
    rng: SmallRng,
    clock: Duration,
}

impl Game {
    pub fn new(content: ContentRegistry, settings: GameSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            content,
            settings,
            phase: GamePhase::Idle,
            round: None,
            next_round: 0,
            next_flash: 0,
            spawner: ItemSpawner::new(),
            scheduler: Scheduler::new(),
            rng,
            clock: Duration::ZERO,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn content(&self) -> &ContentRegistry {
        &self.content
    }

    /// Game-clock time, advanced only by [`Game::advance`].
    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    pub fn open_course_select(&mut self) -> Result<(), GameError> {
        match self.phase {
            GamePhase::Idle | GamePhase::Selecting => {
                self.phase = GamePhase::Selecting;
                Ok(())
            }
            GamePhase::Playing | GamePhase::Ended => self.stop(),
        }
    }

    pub fn go_to_title(&mut self) -> Result<(), GameError> {
        match self.phase {
            GamePhase::Idle | GamePhase::Selecting | GamePhase::Ended => {
                self.cancel_round_timers();
                self.phase = GamePhase::Idle;
                Ok(())
            }
            GamePhase::Playing => Err(GameError::InvalidTransition {
                command: "return to title",
                phase: self.phase,
            }),
        }
    }

    /// Starts (or restarts) a round on `course_id`, replacing any current one.
    pub fn start_game(&mut self, course_id: &str) -> Result<RoundId, GameError> {
        let course = self
            .content
            .course(course_id)
            .ok_or_else(|| GameError::UnknownCourse(course_id.to_string()))?;
        self.content.validate_course(course)?;
        let course = course.clone();

        self.cancel_round_timers();

        let id = RoundId(self.next_round);
        self.next_round += 1;
        log::info!(
            "{id}: starting course {} ({}s, cost {})",
            course.id,
            course.time_limit,
            course.cost
        );

        self.round = Some(Round::new(id, course, &self.content.prices()));
        self.spawner.reset();
        self.phase = GamePhase::Playing;
        self.scheduler
            .schedule(self.clock + COUNTDOWN_INTERVAL, id, TimerKind::Countdown);
        self.spawn_next();
        Ok(id)
    }

    /// Restarts the course of the round that just ended.
    pub fn retry(&mut self) -> Result<RoundId, GameError> {
        let course_id = match (&self.phase, &self.round) {
            (GamePhase::Ended, Some(round)) => round.course.id.clone(),
            _ => {
                return Err(GameError::InvalidTransition {
                    command: "retry",
                    phase: self.phase,
                });
            }
        };
        self.start_game(&course_id)
    }

    /// Abandons the round and returns to course selection.
    pub fn stop(&mut self) -> Result<(), GameError> {
        match self.phase {
            GamePhase::Playing | GamePhase::Ended => {
                if self.phase == GamePhase::Playing {
                    if let Some(round) = &self.round {
                        log::info!("{}: abandoned with {}s left", round.id, round.remaining_time);
                    }
                }
                self.cancel_round_timers();
                if let Some(round) = self.round.as_mut() {
                    round.bonus = None;
                    round.input.clear();
                }
                self.phase = GamePhase::Selecting;
                Ok(())
            }
            GamePhase::Idle | GamePhase::Selecting => Err(GameError::InvalidTransition {
                command: "stop",
                phase: self.phase,
            }),
        }
    }

    pub fn handle_composition_start(&mut self) {
        if let Some(round) = self.playing_round_mut() {
            round.input.begin_composition();
        }
    }

    pub fn handle_text_change(&mut self, value: &str) -> MatchResult {
        let Some(round) = self.playing_round_mut() else {
            return MatchResult::Ignored;
        };
        let target = round.item.as_ref().map(|item| item.word.clone());
        let result = round.input.update(value, target.as_deref());
        self.apply_match(result);
        result
    }

    pub fn handle_composition_end(&mut self, value: &str) -> MatchResult {
        let Some(round) = self.playing_round_mut() else {
            return MatchResult::Ignored;
        };
        let target = round.item.as_ref().map(|item| item.word.clone());
        let result = round.input.commit_text(value, target.as_deref());
        self.apply_match(result);
        result
    }

    /// The live item fell off the belt: combo breaks, next item comes.
    pub fn on_item_travel_complete(&mut self) {
        let Some(round) = self.playing_round_mut() else {
            return;
        };
        let Some(item) = round.item.as_ref() else {
            return;
        };
        log::debug!(
            "{}: missed {} '{}' at combo {}",
            round.id,
            item.id,
            item.word,
            round.combo.count()
        );
        round.combo.on_miss();
        round.misses += 1;
        self.spawn_next();
    }

    /// One second of countdown. Ends the round when time runs out.
    pub fn tick(&mut self) {
        let Some(round) = self.playing_round_mut() else {
            return;
        };
        if round.remaining_time <= 1 {
            round.remaining_time = 0;
            self.end_round();
        } else {
            round.remaining_time -= 1;
        }
    }

    /// Moves the game clock forward by `dt`, firing every timer that falls
    /// due on the way in order.
    pub fn advance(&mut self, dt: Duration) {
        let until = self.clock + dt;
        while let Some(timer) = self.scheduler.pop_due(until) {
            self.clock = self.clock.max(timer.due);
            self.fire(timer);
        }
        self.clock = until;
    }

    pub fn snapshot(&self) -> Snapshot {
        let round = self.round.as_ref();
        let item = round.and_then(|r| r.item.as_ref()).map(|item| ItemView {
            id: item.id,
            word: item.word.clone(),
            price: item.price,
            travel_secs: item.travel_secs,
            emoji: item.emoji.clone(),
            progress: item.progress(self.clock),
        });
        Snapshot {
            phase: self.phase,
            course_id: round.map(|r| r.course.id.clone()),
            course_title: round.map(|r| r.course.title.clone()),
            course_cost: round.map_or(0, |r| r.course.cost),
            remaining_time: round.map_or(0, |r| r.remaining_time),
            total_time: round.map_or(0, |r| r.total_time),
            item,
            input: round.map(|r| r.input.value().to_string()).unwrap_or_default(),
            composing: round.is_some_and(|r| r.input.is_composing()),
            combo: round.map_or(0, |r| r.combo.count()),
            combo_percent: round.map_or(0.0, |r| r.combo.meter_percent()),
            bonus_seconds: round.and_then(|r| r.bonus).map(|b| b.seconds),
            score: round.map_or(0, |r| r.score),
            correct_keys: round.map_or(0, |r| r.correct_keys),
            mistypes: round.map_or(0, |r| r.mistypes),
            misses: round.map_or(0, |r| r.misses),
            plate_counts: round.map(|r| r.plate_counts.clone()).unwrap_or_default(),
            stats: round.map(Round::stats),
        }
    }

    fn playing_round_mut(&mut self) -> Option<&mut Round> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        self.round.as_mut()
    }

    fn fire(&mut self, timer: Timer) {
        let current = self.round.as_ref().map(|r| r.id);
        if current != Some(timer.round) {
            log::debug!("discarding stale {:?} timer from {}", timer.kind, timer.round);
            return;
        }
        match timer.kind {
            TimerKind::Countdown => {
                self.tick();
                if self.phase == GamePhase::Playing {
                    self.scheduler
                        .schedule(timer.due + COUNTDOWN_INTERVAL, timer.round, TimerKind::Countdown);
                }
            }
            TimerKind::TravelComplete(item_id) => {
                let live = self
                    .round
                    .as_ref()
                    .and_then(|r| r.item.as_ref())
                    .map(|item| item.id);
                if live == Some(item_id) {
                    self.on_item_travel_complete();
                } else {
                    log::debug!("discarding travel timer for resolved item {item_id}");
                }
            }
            TimerKind::BonusClear(flash_id) => {
                if let Some(round) = self.round.as_mut() {
                    if round.bonus.is_some_and(|b| b.id == flash_id) {
                        round.bonus = None;
                    }
                }
            }
        }
    }

    fn apply_match(&mut self, result: MatchResult) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        match result {
            MatchResult::Completed { correct_keys } => {
                round.correct_keys += correct_keys;
                let Some(price) = round.item.as_ref().map(|item| item.price) else {
                    return;
                };
                round.score += u64::from(price);
                *round.plate_counts.entry(price).or_insert(0) += 1;
                if let Some(bonus) = round.combo.on_word_completed() {
                    self.grant_bonus(bonus);
                }
                self.spawn_next();
            }
            MatchResult::Progress { correct_keys } => round.correct_keys += correct_keys,
            MatchResult::Mistype => round.mistypes += 1,
            MatchResult::Ignored
            | MatchResult::Deferred
            | MatchResult::Absorbed
            | MatchResult::Invalid => {}
        }
    }

    fn grant_bonus(&mut self, bonus: BonusEvent) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        round.remaining_time += bonus.seconds;
        round.total_time += bonus.seconds;

        let flash_id = self.next_flash;
        self.next_flash += 1;
        round.bonus = Some(BonusFlash {
            id: flash_id,
            seconds: bonus.seconds,
        });
        log::info!(
            "{}: combo {} grants +{}s ({}s left)",
            round.id,
            bonus.combo,
            bonus.seconds,
            round.remaining_time
        );
        self.scheduler.schedule(
            self.clock + self.settings.bonus_flash,
            round.id,
            TimerKind::BonusClear(flash_id),
        );
    }

    /// Resolves the live item (if any) and puts the next one on the belt.
    fn spawn_next(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if let Some(old) = round.item.take() {
            self.scheduler
                .cancel(round.id, TimerKind::TravelComplete(old.id));
        }
        round.input.reset();

        match self
            .spawner
            .spawn(&round.course, &self.content, &mut self.rng, self.clock)
        {
            Some(item) => {
                self.scheduler.schedule(
                    self.clock + item.travel(),
                    round.id,
                    TimerKind::TravelComplete(item.id),
                );
                round.item = Some(item);
            }
            None => log::error!("{}: course {} has nothing to spawn", round.id, round.course.id),
        }
    }

    fn end_round(&mut self) {
        self.cancel_round_timers();
        self.phase = GamePhase::Ended;
        if let Some(round) = self.round.as_mut() {
            round.bonus = None;
            round.input.clear();
            let stats = round.stats();
            log::info!(
                "{}: ended, score {} ({:+}), {} keys/s, {} mistypes",
                round.id,
                round.score,
                stats.profit_or_loss,
                stats.avg_keys_display(),
                round.mistypes
            );
        }
    }

    fn cancel_round_timers(&mut self) {
        if let Some(round) = &self.round {
            let dropped = self.scheduler.cancel_round(round.id);
            if dropped > 0 {
                log::debug!("{}: cancelled {dropped} pending timers", round.id);
            }
        }
    }
}
