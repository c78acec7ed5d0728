//! Knockout stage: semifinal pairings from the group tables, final from the semifinal winners.

use crate::logic::ranking::rank;
use crate::models::{ArenaError, Group, Match, MatchStatus, Phase, Team, TeamId};

/// Semifinal pairings: winner of A against runner-up of B, winner of B against runner-up of A.
pub fn semifinal_pairings(teams: &[Team]) -> Result<[(TeamId, TeamId); 2], ArenaError> {
    let group_a = rank(teams, Group::A);
    let group_b = rank(teams, Group::B);
    if group_a.len() < 2 {
        return Err(ArenaError::NotEnoughTeams { group: Group::A });
    }
    if group_b.len() < 2 {
        return Err(ArenaError::NotEnoughTeams { group: Group::B });
    }
    Ok([
        (group_a[0].id, group_b[1].id),
        (group_b[0].id, group_a[1].id),
    ])
}

/// Final pairing from the first two finished semifinals (in creation order).
pub fn final_pairing(matches: &[Match]) -> Result<(TeamId, TeamId), ArenaError> {
    let semis: Vec<&Match> = matches
        .iter()
        .filter(|m| m.phase == Phase::Semifinal && m.status == MatchStatus::Finished)
        .take(2)
        .collect();
    if semis.len() < 2 {
        return Err(ArenaError::SemifinalsIncomplete);
    }
    let first = semis[0].winner().ok_or(ArenaError::KnockoutDraw(semis[0].id))?;
    let second = semis[1].winner().ok_or(ArenaError::KnockoutDraw(semis[1].id))?;
    Ok((first, second))
}
