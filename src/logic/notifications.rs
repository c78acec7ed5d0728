//! Goal and kick-off notifications from two snapshots of the match list.

use crate::models::{Match, MatchId, MatchStatus, Player, Team, TeamId};
use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    Goal {
        match_id: MatchId,
        player_name: String,
        score_a: u32,
        score_b: u32,
    },
    KickOff {
        match_id: MatchId,
        team_a: String,
        team_b: String,
    },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Goal {
                player_name,
                score_a,
                score_b,
                ..
            } => write!(f, "GOAL! {} scores! ({}-{})", player_name, score_a, score_b),
            Notification::KickOff { team_a, team_b, .. } => {
                write!(f, "{} vs {} has just kicked off!", team_a, team_b)
            }
        }
    }
}

/// Compare `previous` with `current` and report new goals and matches that went live.
///
/// Matches missing from `previous` are skipped. A goal is reported against the last recorded
/// event; if its player cannot be found the goal is not announced.
pub fn detect_notifications(
    previous: &[Match],
    current: &[Match],
    teams: &[Team],
    players: &[Player],
) -> Vec<Notification> {
    let mut out = Vec::new();
    for new in current {
        let Some(old) = previous.iter().find(|m| m.id == new.id) else {
            continue;
        };

        if new.score_a > old.score_a || new.score_b > old.score_b {
            let scorer = new
                .events
                .last()
                .and_then(|e| players.iter().find(|p| p.id == e.player_id));
            if let Some(p) = scorer {
                out.push(Notification::Goal {
                    match_id: new.id,
                    player_name: p.name.clone(),
                    score_a: new.score_a,
                    score_b: new.score_b,
                });
            }
        }

        if old.status == MatchStatus::Pending && new.status == MatchStatus::Live {
            let name = |id: TeamId| {
                teams
                    .iter()
                    .find(|t| t.id == id)
                    .map(|t| t.name.clone())
                    .unwrap_or_default()
            };
            out.push(Notification::KickOff {
                match_id: new.id,
                team_a: name(new.team_a_id),
                team_b: name(new.team_b_id),
            });
        }
    }
    out
}
