//! Five-a-side arena: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    advance_half, compare_standing, create_final, create_semifinals, detect_notifications,
    finish_match, leader, match_timeline, player_history, rank, rank_all, rank_with, record_card,
    record_goal, record_substitution, set_match_stats, settle, settle_match, start_match,
    top_assisters, top_scorers, tournament_summary, Notification, PlayerMatchLine,
    SettlementSummary, TieBreak, TimelineEntry, TournamentSummary,
};
pub use models::{
    Arena, ArenaError, CardKind, EventKind, Group, Half, Match, MatchEvent, MatchId, MatchStats,
    MatchStatus, Phase, Player, PlayerDelta, PlayerId, PlayerUpdate, Side, Substitution, Team,
    TeamDelta, TeamId, TeamUpdate,
};
