//! Errors returned by the arena and its engines.

use crate::models::game::{MatchId, MatchStatus, Phase};
use crate::models::player::PlayerId;
use crate::models::team::{Group, TeamId};
use thiserror::Error;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ArenaError {
    /// Settlement attempted on a knockout match.
    #[error("Match {match_id} is a {phase} match; only group matches are settled")]
    InvalidPhase { match_id: MatchId, phase: Phase },

    /// A team or player id could not be resolved.
    #[error("Match {match_id} references unknown {entity} {id}")]
    DanglingReference {
        match_id: MatchId,
        entity: &'static str,
        id: uuid::Uuid,
    },

    /// The match outcome was already applied to the counters.
    #[error("Match {0} has already been settled")]
    AlreadySettled(MatchId),

    #[error("Match {0} is not finished")]
    MatchNotFinished(MatchId),

    /// Lifecycle moves only forward: pending -> live -> finished.
    #[error("Cannot move match from {from} to {to}")]
    InvalidTransition { from: MatchStatus, to: MatchStatus },

    #[error("Match {0} is not live")]
    MatchNotLive(MatchId),

    #[error("A match needs two different teams")]
    SameTeam,

    #[error("Team {0} not found")]
    TeamNotFound(TeamId),

    #[error("Player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("Match {0} not found")]
    MatchNotFound(MatchId),

    /// Player does not belong to either side of the match.
    #[error("Player {player_id} does not play in match {match_id}")]
    PlayerNotInMatch { match_id: MatchId, player_id: PlayerId },

    #[error("Player {0} is suspended")]
    PlayerSuspended(PlayerId),

    #[error("Player {player_id} was sent off in match {match_id}")]
    PlayerSentOff { match_id: MatchId, player_id: PlayerId },

    /// Substitution or assist naming the same player twice.
    #[error("Player {0} cannot be paired with themselves")]
    SamePlayer(PlayerId),

    #[error("Unknown event type: {0}")]
    UnknownEventKind(String),

    #[error("Name cannot be empty")]
    EmptyName,

    /// Semifinals need the top two of each group.
    #[error("Group {group} needs at least 2 teams")]
    NotEnoughTeams { group: Group },

    #[error("Finish both semifinal matches first")]
    SemifinalsIncomplete,

    /// Knockout matches need a winner.
    #[error("Knockout match {0} ended level")]
    KnockoutDraw(MatchId),
}

impl ArenaError {
    /// True for lookups that failed (mapped to 404 by the web layer).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ArenaError::TeamNotFound(_) | ArenaError::PlayerNotFound(_) | ArenaError::MatchNotFound(_)
        )
    }
}
