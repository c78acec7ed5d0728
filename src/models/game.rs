//! Match, its lifecycle, events, substitutions and in-match stats.

use crate::models::error::ArenaError;
use crate::models::player::PlayerId;
use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Lifecycle of a match. Moves forward only.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Live,
    Finished,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::Pending => write!(f, "pending"),
            MatchStatus::Live => write!(f, "live"),
            MatchStatus::Finished => write!(f, "finished"),
        }
    }
}

/// Tournament phase the match belongs to.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Group,
    Semifinal,
    Final,
}

impl Phase {
    pub fn is_knockout(self) -> bool {
        !matches!(self, Phase::Group)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Group => write!(f, "group"),
            Phase::Semifinal => write!(f, "semifinal"),
            Phase::Final => write!(f, "final"),
        }
    }
}

/// Half-time sub-state of a live match (timer display only).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Half {
    First,
    Second,
    Finished,
}

/// Which side of a match a team plays on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

/// Scoring events recorded during a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Goal,
    Assist,
}

impl FromStr for EventKind {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "goal" => Ok(EventKind::Goal),
            "assist" => Ok(EventKind::Assist),
            other => Err(ArenaError::UnknownEventKind(other.to_string())),
        }
    }
}

/// A goal or assist credited to a player of one team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub timestamp: DateTime<Utc>,
}

impl MatchEvent {
    pub fn new(kind: EventKind, player_id: PlayerId, team_id: TeamId) -> Self {
        Self {
            kind,
            player_id,
            team_id,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Yellow,
    Red,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Substitution {
    pub id: Uuid,
    pub team_id: TeamId,
    pub player_out_id: PlayerId,
    pub player_in_id: PlayerId,
    pub minute: u32,
    /// Half during which the change was made.
    pub half: Half,
    pub recorded_at: DateTime<Utc>,
}

/// In-match statistics for one side.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchStats {
    /// Percentage, 0..=100.
    pub possession: u8,
    pub shots_on_target: u32,
    pub fouls: u32,
    pub corners: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchTeamStats {
    pub team_a: MatchStats,
    pub team_b: MatchStats,
}

impl MatchTeamStats {
    pub fn side_mut(&mut self, side: Side) -> &mut MatchStats {
        match side {
            Side::A => &mut self.team_a,
            Side::B => &mut self.team_b,
        }
    }
}

/// A single match between two teams.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub team_a_id: TeamId,
    pub team_b_id: TeamId,
    pub score_a: u32,
    pub score_b: u32,
    pub status: MatchStatus,
    pub phase: Phase,
    /// Goals and assists in the order they were recorded.
    pub events: Vec<MatchEvent>,
    pub substitutions: Vec<Substitution>,
    /// Players shown a red card (or a second yellow) in this match.
    #[serde(default)]
    pub sent_off: Vec<PlayerId>,
    pub stats: MatchTeamStats,
    /// Only set while live (and kept once finished).
    pub half: Option<Half>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    /// Set once the result has been applied to the counters.
    pub settled_at: Option<DateTime<Utc>>,
}

impl Match {
    pub fn new(team_a_id: TeamId, team_b_id: TeamId, phase: Phase) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_a_id,
            team_b_id,
            score_a: 0,
            score_b: 0,
            status: MatchStatus::Pending,
            phase,
            events: Vec::new(),
            substitutions: Vec::new(),
            sent_off: Vec::new(),
            stats: MatchTeamStats::default(),
            half: None,
            created_at: Utc::now(),
            started_at: None,
            settled_at: None,
        }
    }

    pub fn side_of(&self, team_id: TeamId) -> Option<Side> {
        if team_id == self.team_a_id {
            Some(Side::A)
        } else if team_id == self.team_b_id {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.side_of(team_id).is_some()
    }

    pub fn is_sent_off(&self, player_id: PlayerId) -> bool {
        self.sent_off.contains(&player_id)
    }

    /// `(team score, opponent score)` from the given side's point of view.
    pub fn score_for(&self, side: Side) -> (u32, u32) {
        match side {
            Side::A => (self.score_a, self.score_b),
            Side::B => (self.score_b, self.score_a),
        }
    }

    /// Score pair as counted from the goal events.
    pub fn goals_from_events(&self) -> (u32, u32) {
        self.events
            .iter()
            .filter(|e| e.kind == EventKind::Goal)
            .fold((0, 0), |(a, b), e| match self.side_of(e.team_id) {
                Some(Side::A) => (a + 1, b),
                Some(Side::B) => (a, b + 1),
                None => (a, b),
            })
    }

    /// Winning team id, `None` on a draw.
    pub fn winner(&self) -> Option<TeamId> {
        match self.score_a.cmp(&self.score_b) {
            std::cmp::Ordering::Greater => Some(self.team_a_id),
            std::cmp::Ordering::Less => Some(self.team_b_id),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Goals scored by one player in this match.
    pub fn goals_by(&self, player_id: PlayerId) -> u32 {
        self.events
            .iter()
            .filter(|e| e.kind == EventKind::Goal && e.player_id == player_id)
            .count() as u32
    }

    /// pending -> live; the first half begins.
    pub fn start(&mut self) -> Result<(), ArenaError> {
        if self.status != MatchStatus::Pending {
            return Err(ArenaError::InvalidTransition {
                from: self.status,
                to: MatchStatus::Live,
            });
        }
        self.status = MatchStatus::Live;
        self.half = Some(Half::First);
        self.started_at = Some(Utc::now());
        Ok(())
    }

    /// first -> second -> finished. Does not end the match.
    pub fn advance_half(&mut self) -> Result<Half, ArenaError> {
        if self.status != MatchStatus::Live {
            return Err(ArenaError::MatchNotLive(self.id));
        }
        let next = match self.half {
            None | Some(Half::First) => Half::Second,
            Some(Half::Second) | Some(Half::Finished) => Half::Finished,
        };
        self.half = Some(next);
        Ok(next)
    }

    /// live -> finished. Finished is terminal.
    pub fn finish(&mut self) -> Result<(), ArenaError> {
        if self.status != MatchStatus::Live {
            return Err(ArenaError::InvalidTransition {
                from: self.status,
                to: MatchStatus::Finished,
            });
        }
        self.status = MatchStatus::Finished;
        self.half = Some(Half::Finished);
        Ok(())
    }

    /// Record a goal for `team_id` and bump the matching score.
    pub fn record_goal(&mut self, player_id: PlayerId, team_id: TeamId) -> Result<(), ArenaError> {
        let side = self.side_of(team_id).ok_or(ArenaError::PlayerNotInMatch {
            match_id: self.id,
            player_id,
        })?;
        if self.status != MatchStatus::Live {
            return Err(ArenaError::MatchNotLive(self.id));
        }
        self.events.push(MatchEvent::new(EventKind::Goal, player_id, team_id));
        match side {
            Side::A => self.score_a += 1,
            Side::B => self.score_b += 1,
        }
        Ok(())
    }
}
