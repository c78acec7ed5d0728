//! Group standings: order teams by points, goal difference and goals scored.

use crate::models::{Group, Team};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How far the comparison goes before falling back to input order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Points, then goal difference. Used by the compact dashboard table.
    GoalDifference,
    /// Points, goal difference, then goals scored. The standard for standings.
    #[default]
    GoalsScored,
}

/// Compare two teams for standings, best first.
pub fn compare_standing(a: &Team, b: &Team, tie_break: TieBreak) -> Ordering {
    let primary = b
        .points
        .cmp(&a.points)
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()));
    match tie_break {
        TieBreak::GoalDifference => primary,
        TieBreak::GoalsScored => primary.then_with(|| b.gf.cmp(&a.gf)),
    }
}

/// Standings of one group using the standard tie-break.
pub fn rank(teams: &[Team], group: Group) -> Vec<&Team> {
    rank_with(teams, group, TieBreak::default())
}

/// Standings of one group. Teams equal under `tie_break` keep their input order.
pub fn rank_with(teams: &[Team], group: Group, tie_break: TieBreak) -> Vec<&Team> {
    let mut ranked: Vec<&Team> = teams.iter().filter(|t| t.group == group).collect();
    ranked.sort_by(|a, b| compare_standing(a, b, tie_break));
    ranked
}

/// All teams regardless of group (dashboard leader board).
pub fn rank_all(teams: &[Team], tie_break: TieBreak) -> Vec<&Team> {
    let mut ranked: Vec<&Team> = teams.iter().collect();
    ranked.sort_by(|a, b| compare_standing(a, b, tie_break));
    ranked
}
