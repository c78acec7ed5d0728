//! Player and PlayerDelta data structures.

use crate::models::game::MatchId;
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in events and lookups).
pub type PlayerId = Uuid;

/// A player in the league.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team_id: TeamId,
    pub goals: u32,
    pub assists: u32,
    pub photo_url: Option<String>,
    pub market_value: Option<u32>,
    pub yellow_cards: u32,
    pub red_cards: u32,
    /// Match in which the suspension was earned; served by the team's next finished match.
    pub suspended_until: Option<MatchId>,
}

impl Player {
    /// Create a new player on the given team. Counters start at zero.
    pub fn new(name: impl Into<String>, team_id: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            team_id,
            goals: 0,
            assists: 0,
            photo_url: None,
            market_value: None,
            yellow_cards: 0,
            red_cards: 0,
            suspended_until: None,
        }
    }

    pub fn apply(&mut self, delta: &PlayerDelta) {
        self.goals += delta.goals;
        self.assists += delta.assists;
    }

    /// Suspended for `match_id`: booked in an earlier match and not yet served.
    pub fn is_suspended_for(&self, match_id: MatchId) -> bool {
        matches!(self.suspended_until, Some(booked_in) if booked_in != match_id)
    }
}

/// Goals and assists one settlement adds to a player.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerDelta {
    pub goals: u32,
    pub assists: u32,
}
