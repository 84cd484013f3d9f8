use std::fmt;
use std::time::Duration;

use crate::generator::spawner::ItemId;

/// Identity of one round. A replaced round's timers never fire into its
/// successor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoundId(pub u64);

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "round {}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// One second of the round countdown.
    Countdown,
    /// The item reached the end of the belt.
    TravelComplete(ItemId),
    /// Hide the bonus notification with this flash id.
    BonusClear(u64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timer {
    pub due: Duration,
    pub round: RoundId,
    pub kind: TimerKind,
    seq: u64,
}

/// Pending callbacks on the game clock, fired in `(due, insertion)` order.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Duration, round: RoundId, kind: TimerKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer {
            due,
            round,
            kind,
            seq,
        });
    }

    pub fn cancel_round(&mut self, round: RoundId) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| t.round != round);
        before - self.timers.len()
    }

    pub fn cancel(&mut self, round: RoundId, kind: TimerKind) {
        self.timers.retain(|t| !(t.round == round && t.kind == kind));
    }

    /// Removes and returns the earliest timer due at or before `until`.
    pub fn pop_due(&mut self, until: Duration) -> Option<Timer> {
        let (idx, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.seq))?;
        Some(self.timers.swap_remove(idx))
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.due).min()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
