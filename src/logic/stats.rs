//! Player leaderboards, tournament totals and per-player match history.

use crate::logic::ranking::{rank_all, TieBreak};
use crate::models::{EventKind, Half, Match, MatchId, MatchStatus, Player, PlayerId, Team, TeamId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Headline numbers for the stats page.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct TournamentSummary {
    /// Sum of settled player goals.
    pub total_goals: u32,
    pub total_assists: u32,
    pub active_players: usize,
    /// Goals plus assists.
    pub goal_contributions: u32,
    /// Sum of team goals-for (group stage only).
    pub team_goals: u32,
    pub total_matches: usize,
    pub live_matches: usize,
}

pub fn tournament_summary(teams: &[Team], players: &[Player], matches: &[Match]) -> TournamentSummary {
    let total_goals: u32 = players.iter().map(|p| p.goals).sum();
    let total_assists: u32 = players.iter().map(|p| p.assists).sum();
    TournamentSummary {
        total_goals,
        total_assists,
        active_players: players.len(),
        goal_contributions: total_goals + total_assists,
        team_goals: teams.iter().map(|t| t.gf).sum(),
        total_matches: matches.len(),
        live_matches: matches
            .iter()
            .filter(|m| m.status == MatchStatus::Live)
            .count(),
    }
}

/// Top `n` players by goals. Ties keep input order.
pub fn top_scorers(players: &[Player], n: usize) -> Vec<&Player> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by(|a, b| b.goals.cmp(&a.goals));
    sorted.truncate(n);
    sorted
}

/// Top `n` players by assists. Ties keep input order.
pub fn top_assisters(players: &[Player], n: usize) -> Vec<&Player> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by(|a, b| b.assists.cmp(&a.assists));
    sorted.truncate(n);
    sorted
}

/// Best team across both groups, as shown on the dashboard.
pub fn leader(teams: &[Team]) -> Option<&Team> {
    rank_all(teams, TieBreak::GoalDifference).into_iter().next()
}

/// One finished match from a player's point of view.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PlayerMatchLine {
    pub match_id: MatchId,
    pub opponent_id: TeamId,
    pub team_score: u32,
    pub opponent_score: u32,
    pub goals: u32,
}

/// Finished matches of the player's current team, with the goals the player scored in each.
pub fn player_history(player: &Player, matches: &[Match]) -> Vec<PlayerMatchLine> {
    matches
        .iter()
        .filter(|m| m.status == MatchStatus::Finished)
        .filter_map(|m| {
            let side = m.side_of(player.team_id)?;
            let (team_score, opponent_score) = m.score_for(side);
            let opponent_id = if m.team_a_id == player.team_id {
                m.team_b_id
            } else {
                m.team_a_id
            };
            Some(PlayerMatchLine {
                match_id: m.id,
                opponent_id,
                team_score,
                opponent_score,
                goals: m.goals_by(player.id),
            })
        })
        .collect()
}

/// One highlight of a match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineEntry {
    Goal {
        team_id: TeamId,
        player_id: PlayerId,
        at: DateTime<Utc>,
    },
    Substitution {
        team_id: TeamId,
        player_out_id: PlayerId,
        player_in_id: PlayerId,
        minute: u32,
        half: Half,
        at: DateTime<Utc>,
    },
}

impl TimelineEntry {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            TimelineEntry::Goal { at, .. } | TimelineEntry::Substitution { at, .. } => *at,
        }
    }
}

/// Goals and substitutions of one match, oldest first.
pub fn match_timeline(m: &Match) -> Vec<TimelineEntry> {
    let goals = m
        .events
        .iter()
        .filter(|e| e.kind == EventKind::Goal)
        .map(|e| TimelineEntry::Goal {
            team_id: e.team_id,
            player_id: e.player_id,
            at: e.timestamp,
        });
    let subs = m.substitutions.iter().map(|s| TimelineEntry::Substitution {
        team_id: s.team_id,
        player_out_id: s.player_out_id,
        player_in_id: s.player_in_id,
        minute: s.minute,
        half: s.half,
        at: s.recorded_at,
    });
    let mut timeline: Vec<TimelineEntry> = goals.chain(subs).collect();
    timeline.sort_by_key(TimelineEntry::at);
    timeline
}
