//! Data structures for the arena: teams, players, matches, errors and the arena state.

mod arena;
mod error;
mod game;
mod player;
mod team;

pub use arena::{Arena, PlayerUpdate, TeamUpdate};
pub use error::ArenaError;
pub use game::{
    CardKind, EventKind, Half, Match, MatchEvent, MatchId, MatchStats, MatchStatus, MatchTeamStats,
    Phase, Side, Substitution,
};
pub use player::{Player, PlayerDelta, PlayerId};
pub use team::{Group, Team, TeamDelta, TeamId};
