//! Per-user conversation memory.
//!
//! Each user owns a bounded ring buffer of turns plus the emotional pattern derived from
//! it. The [`MemoryStore`] trait is the seam the engine depends on; [`InMemoryStore`] is
//! the default implementation.

use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use super::pattern::EmotionalPattern;
use super::turn::Turn;
use crate::models::UserId;
use crate::respond::Tone;

/// Sizing for every memory created by a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryLimits {
    /// Maximum turns retained per user
    pub history_cap: usize,
    /// Analyzed person turns considered for the pattern
    pub trend_window: usize,
}

impl Default for MemoryLimits {
    fn default() -> Self {
        Self {
            history_cap: 100,
            trend_window: 10,
        }
    }
}

/// Serializable state of one user's memory, exchanged with persistence hooks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub turns: Vec<Turn>,
    #[serde(default)]
    pub tone: Option<Tone>,
}

/// One user's conversation memory
#[derive(Debug, Clone)]
pub struct UserMemory {
    turns: VecDeque<Turn>,
    pattern: EmotionalPattern,
    tone: Option<Tone>,
    limits: MemoryLimits,
}

impl UserMemory {
    pub fn new(limits: MemoryLimits) -> Self {
        let limits = MemoryLimits {
            history_cap: limits.history_cap.max(1),
            trend_window: limits.trend_window.max(1),
        };
        Self {
            turns: VecDeque::with_capacity(limits.history_cap),
            pattern: EmotionalPattern::default(),
            tone: None,
            limits,
        }
    }

    /// Append a turn, evicting the oldest one first when full, then refresh the pattern.
    pub fn push(&mut self, turn: Turn) {
        if self.turns.len() >= self.limits.history_cap {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
        self.refresh_pattern();
    }

    fn refresh_pattern(&mut self) {
        let mut window: Vec<_> = self
            .turns
            .iter()
            .rev()
            .filter_map(|turn| {
                turn.analysis()
                    .filter(|_| turn.is_analyzed_person_turn())
                    .map(|a| (a.mood, a.emotion))
            })
            .take(self.limits.trend_window)
            .collect();
        window.reverse();
        self.pattern = EmotionalPattern::from_window(&window);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn pattern(&self) -> &EmotionalPattern {
        &self.pattern
    }

    pub fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            turns: self.turns.iter().cloned().collect(),
            tone: self.tone,
        }
    }

    /// Replace the contents with a snapshot, keeping only the most recent turns.
    pub fn restore(&mut self, snapshot: MemorySnapshot) {
        let skip = snapshot.turns.len().saturating_sub(self.limits.history_cap);
        self.turns = snapshot.turns.into_iter().skip(skip).collect();
        self.tone = snapshot.tone;
        self.refresh_pattern();
    }
}

/// Storage of conversation memories keyed by user.
///
/// Implementations must keep users fully independent and make append + eviction +
/// pattern refresh a single atomic step.
pub trait MemoryStore: Send + Sync {
    /// Append a turn and return the refreshed pattern
    fn record(&self, user_id: &UserId, turn: Turn) -> EmotionalPattern;

    /// Current pattern; unknown users get the default pattern
    fn pattern(&self, user_id: &UserId) -> EmotionalPattern;

    /// Retained turns, oldest first
    fn history(&self, user_id: &UserId) -> Vec<Turn>;

    fn tone(&self, user_id: &UserId) -> Option<Tone>;

    fn set_tone(&self, user_id: &UserId, tone: Tone);

    /// Whether the user's memory is currently held by the store
    fn is_resident(&self, user_id: &UserId) -> bool;

    fn snapshot(&self, user_id: &UserId) -> MemorySnapshot;

    fn restore(&self, user_id: &UserId, snapshot: MemorySnapshot);
}

/// In-process store. Holds at most `max_users` memories; the least recently used one is
/// dropped when a new user arrives at capacity.
pub struct InMemoryStore {
    memories: Mutex<LruCache<UserId, UserMemory>>,
    limits: MemoryLimits,
}

impl InMemoryStore {
    pub const DEFAULT_MAX_USERS: NonZeroUsize = match NonZeroUsize::new(10_000) {
        Some(n) => n,
        None => NonZeroUsize::MIN,
    };

    pub fn new(limits: MemoryLimits) -> Self {
        Self::with_max_users(limits, Self::DEFAULT_MAX_USERS)
    }

    pub fn with_max_users(limits: MemoryLimits, max_users: NonZeroUsize) -> Self {
        Self {
            memories: Mutex::new(LruCache::new(max_users)),
            limits,
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<UserId, UserMemory>> {
        // a panic while holding the lock cannot leave a memory half-written: every
        // mutation is a single push or restore
        self.memories.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn with_memory<T>(&self, user_id: &UserId, f: impl FnOnce(&mut UserMemory) -> T) -> T {
        let mut memories = self.lock();
        let limits = self.limits;
        let memory = memories.get_or_insert_mut(user_id.clone(), || {
            debug!(user = %user_id, "Creating conversation memory");
            UserMemory::new(limits)
        });
        f(memory)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(MemoryLimits::default())
    }
}

impl MemoryStore for InMemoryStore {
    fn record(&self, user_id: &UserId, turn: Turn) -> EmotionalPattern {
        self.with_memory(user_id, |memory| {
            memory.push(turn);
            memory.pattern().clone()
        })
    }

    fn pattern(&self, user_id: &UserId) -> EmotionalPattern {
        self.with_memory(user_id, |memory| memory.pattern().clone())
    }

    fn history(&self, user_id: &UserId) -> Vec<Turn> {
        self.with_memory(user_id, |memory| memory.turns().cloned().collect())
    }

    fn tone(&self, user_id: &UserId) -> Option<Tone> {
        self.lock().peek(user_id).and_then(|memory| memory.tone)
    }

    fn set_tone(&self, user_id: &UserId, tone: Tone) {
        self.with_memory(user_id, |memory| memory.tone = Some(tone));
    }

    fn is_resident(&self, user_id: &UserId) -> bool {
        self.lock().contains(user_id)
    }

    fn snapshot(&self, user_id: &UserId) -> MemorySnapshot {
        self.lock()
            .peek(user_id)
            .map(UserMemory::snapshot)
            .unwrap_or_default()
    }

    fn restore(&self, user_id: &UserId, snapshot: MemorySnapshot) {
        self.with_memory(user_id, |memory| memory.restore(snapshot));
    }
}
