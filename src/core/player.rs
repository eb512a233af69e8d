//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe player identifier, assigned in catalog registration order.
//!
//! ## PlayerMap
//!
//! Per-player data backed by a `Vec` for O(1) access. Used for snapshots
//! such as every player's modifier state at a point in the game.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::{AttachmentError, Result};

/// Most players a game may register.
pub const MAX_PLAYERS: usize = u8::MAX as usize;

/// Player identifier supporting up to 255 players.
///
/// Player indices are 0-based: the first registered player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use wargame_rules::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..u8::MAX).take(player_count).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use wargame_rules::core::{PlayerId, PlayerMap};
///
/// let mut income: PlayerMap<i32> = PlayerMap::new(3, |_| 10)?;
/// income[PlayerId::new(1)] = 25;
/// assert_eq!(income[PlayerId::new(0)], 10);
/// assert_eq!(income[PlayerId::new(1)], 25);
/// # Ok::<(), wargame_rules::core::AttachmentError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// An empty map is allowed: a game definition may declare no players.
    /// More than [`MAX_PLAYERS`] is an `IllegalState` error.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Result<Self> {
        if player_count > MAX_PLAYERS {
            return Err(AttachmentError::IllegalState(format!(
                "{player_count} players exceeds the limit of {MAX_PLAYERS}"
            )));
        }
        let data = PlayerId::all(player_count).map(factory).collect();
        Ok(Self { data })
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Result<Self>
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
