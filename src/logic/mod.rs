//! Arena business logic: ranking, settlement, match lifecycle, knockout, stats.

mod knockout;
mod lifecycle;
mod notifications;
mod ranking;
mod seed;
mod settlement;
mod stats;

pub use knockout::{final_pairing, semifinal_pairings};
pub use lifecycle::{
    advance_half, create_final, create_semifinals, finish_match, record_card, record_goal,
    record_substitution, set_match_stats, settle_match, start_match,
};
pub use notifications::{detect_notifications, Notification};
pub use ranking::{compare_standing, rank, rank_all, rank_with, TieBreak};
pub(crate) use seed::{initial_league, placeholder_squad};
pub use settlement::{player_deltas, settle, team_deltas, Settled, SettlementSummary};
pub use stats::{
    leader, match_timeline, player_history, top_assisters, top_scorers, tournament_summary,
    PlayerMatchLine, TimelineEntry, TournamentSummary,
};
