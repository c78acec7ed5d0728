//! Match settlement: turn a finished group match into team and player deltas.

use crate::models::{
    ArenaError, EventKind, Match, MatchEvent, MatchId, MatchStatus, Phase, PlayerDelta, PlayerId,
    Team, TeamDelta,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Settled copies of both teams plus the per-player deltas.
pub type Settled = (Team, Team, BTreeMap<PlayerId, PlayerDelta>);

/// What one settlement applied, for callers that report it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SettlementSummary {
    pub match_id: MatchId,
    pub team_a: TeamDelta,
    pub team_b: TeamDelta,
    pub players: BTreeMap<PlayerId, PlayerDelta>,
}

/// Settle a finished group match.
///
/// Returns copies of `team_a` and `team_b` with the result added, and the goal/assist delta of
/// every player who appears in the event log. Nothing is mutated: the caller applies the result
/// and marks the match settled.
///
/// Fails on knockout matches, unfinished or already settled matches, and on team references
/// that do not line up with the match.
pub fn settle(m: &Match, team_a: &Team, team_b: &Team) -> Result<Settled, ArenaError> {
    if m.status != MatchStatus::Finished {
        return Err(ArenaError::MatchNotFinished(m.id));
    }
    if m.phase != Phase::Group {
        return Err(ArenaError::InvalidPhase {
            match_id: m.id,
            phase: m.phase,
        });
    }
    if m.settled_at.is_some() {
        return Err(ArenaError::AlreadySettled(m.id));
    }
    if team_a.id != m.team_a_id {
        return Err(dangling_team(m.id, m.team_a_id));
    }
    if team_b.id != m.team_b_id {
        return Err(dangling_team(m.id, m.team_b_id));
    }
    if let Some(e) = m.events.iter().find(|e| !m.involves(e.team_id)) {
        return Err(dangling_team(m.id, e.team_id));
    }

    let (delta_a, delta_b) = team_deltas(m);
    let mut settled_a = team_a.clone();
    let mut settled_b = team_b.clone();
    settled_a.apply(&delta_a);
    settled_b.apply(&delta_b);

    Ok((settled_a, settled_b, player_deltas(&m.events)))
}

/// Deltas for side A and side B from the match score.
pub fn team_deltas(m: &Match) -> (TeamDelta, TeamDelta) {
    (
        TeamDelta::from_score(m.score_a, m.score_b),
        TeamDelta::from_score(m.score_b, m.score_a),
    )
}

/// One increment per event; a player scoring twice gets two goals.
pub fn player_deltas(events: &[MatchEvent]) -> BTreeMap<PlayerId, PlayerDelta> {
    let mut deltas: BTreeMap<PlayerId, PlayerDelta> = BTreeMap::new();
    for e in events {
        let delta = deltas.entry(e.player_id).or_default();
        match e.kind {
            EventKind::Goal => delta.goals += 1,
            EventKind::Assist => delta.assists += 1,
        }
    }
    deltas
}

fn dangling_team(match_id: MatchId, id: uuid::Uuid) -> ArenaError {
    ArenaError::DanglingReference {
        match_id,
        entity: "team",
        id,
    }
}
