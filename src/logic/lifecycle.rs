//! Match lifecycle: kick-off, live recording (goals, cards, substitutions, stats) and the
//! finish transition that settles group matches exactly once.

use crate::logic::knockout::{final_pairing, semifinal_pairings};
use crate::logic::settlement::{settle, team_deltas, SettlementSummary};
use crate::models::{
    Arena, ArenaError, CardKind, EventKind, Half, Match, MatchEvent, MatchId, MatchStats,
    MatchStatus, Phase, PlayerId, Substitution, TeamId,
};
use chrono::Utc;
use uuid::Uuid;

/// pending -> live.
pub fn start_match(arena: &mut Arena, match_id: MatchId) -> Result<(), ArenaError> {
    arena.get_match_mut(match_id)?.start()?;
    log::info!("Match {} kicked off", match_id);
    Ok(())
}

/// first -> second -> finished half. Returns the new half.
pub fn advance_half(arena: &mut Arena, match_id: MatchId) -> Result<Half, ArenaError> {
    arena.get_match_mut(match_id)?.advance_half()
}

/// Record a goal by `scorer`, optionally assisted by a teammate.
///
/// The scorer's current team decides which side scores. The score and the event log are
/// updated together, so the score always equals the number of goal events per side.
/// Player goal/assist counters are untouched until the match is settled.
pub fn record_goal(
    arena: &mut Arena,
    match_id: MatchId,
    scorer: PlayerId,
    assist: Option<PlayerId>,
) -> Result<(), ArenaError> {
    let team_id = playing_team(arena, match_id, scorer)?;
    if let Some(assister) = assist {
        if assister == scorer {
            return Err(ArenaError::SamePlayer(scorer));
        }
        if playing_team(arena, match_id, assister)? != team_id {
            return Err(ArenaError::PlayerNotInMatch {
                match_id,
                player_id: assister,
            });
        }
    }

    let m = arena.get_match_mut(match_id)?;
    if m.status != MatchStatus::Live {
        return Err(ArenaError::MatchNotLive(match_id));
    }
    // assist goes first so the goal is the latest event
    if let Some(assister) = assist {
        m.events
            .push(MatchEvent::new(EventKind::Assist, assister, team_id));
    }
    m.record_goal(scorer, team_id)?;
    log::info!(
        "Goal in match {}: {}-{}",
        match_id,
        m.score_a,
        m.score_b
    );
    Ok(())
}

/// Book a player. A red card, or every second yellow, sends the player off for the rest of
/// this match and suspends them for the team's next match.
pub fn record_card(
    arena: &mut Arena,
    match_id: MatchId,
    player_id: PlayerId,
    card: CardKind,
) -> Result<(), ArenaError> {
    let team_id = arena.player(player_id)?.team_id;
    let m = arena.get_match_mut(match_id)?;
    let side = m.side_of(team_id).ok_or(ArenaError::PlayerNotInMatch {
        match_id,
        player_id,
    })?;
    if m.status != MatchStatus::Live {
        return Err(ArenaError::MatchNotLive(match_id));
    }
    if m.is_sent_off(player_id) {
        return Err(ArenaError::PlayerSentOff {
            match_id,
            player_id,
        });
    }
    let stats = m.stats.side_mut(side);
    match card {
        CardKind::Yellow => stats.yellow_cards += 1,
        CardKind::Red => stats.red_cards += 1,
    }

    let player = arena.player_mut(player_id)?;
    let sent_off = match card {
        CardKind::Yellow => {
            player.yellow_cards += 1;
            player.yellow_cards % 2 == 0
        }
        CardKind::Red => {
            player.red_cards += 1;
            true
        }
    };
    if sent_off {
        player.suspended_until = Some(match_id);
        log::info!("{} sent off and suspended for the next match", player.name);
        arena.get_match_mut(match_id)?.sent_off.push(player_id);
    }
    Ok(())
}

/// Swap `player_out` for `player_in`; both must be on the same team in this match.
pub fn record_substitution(
    arena: &mut Arena,
    match_id: MatchId,
    player_out: PlayerId,
    player_in: PlayerId,
    minute: u32,
) -> Result<Substitution, ArenaError> {
    if player_out == player_in {
        return Err(ArenaError::SamePlayer(player_out));
    }
    let team_id = arena.player(player_out)?.team_id;
    if playing_team(arena, match_id, player_in)? != team_id {
        return Err(ArenaError::PlayerNotInMatch {
            match_id,
            player_id: player_in,
        });
    }
    let m = arena.get_match_mut(match_id)?;
    if !m.involves(team_id) {
        return Err(ArenaError::PlayerNotInMatch {
            match_id,
            player_id: player_out,
        });
    }
    if m.status != MatchStatus::Live {
        return Err(ArenaError::MatchNotLive(match_id));
    }
    let sub = Substitution {
        id: Uuid::new_v4(),
        team_id,
        player_out_id: player_out,
        player_in_id: player_in,
        minute,
        half: match m.half {
            Some(Half::Second) | Some(Half::Finished) => Half::Second,
            _ => Half::First,
        },
        recorded_at: Utc::now(),
    };
    m.substitutions.push(sub.clone());
    Ok(sub)
}

/// Overwrite the tracked stats for one side of a live match. Card counts are kept from the
/// card flow.
pub fn set_match_stats(
    arena: &mut Arena,
    match_id: MatchId,
    team_id: TeamId,
    stats: MatchStats,
) -> Result<(), ArenaError> {
    let m = arena.get_match_mut(match_id)?;
    let side = m.side_of(team_id).ok_or(ArenaError::TeamNotFound(team_id))?;
    if m.status != MatchStatus::Live {
        return Err(ArenaError::MatchNotLive(match_id));
    }
    let current = m.stats.side_mut(side);
    *current = MatchStats {
        possession: stats.possession.min(100),
        yellow_cards: current.yellow_cards,
        red_cards: current.red_cards,
        ..stats
    };
    Ok(())
}

/// live -> finished. Group matches are settled in the same step; knockout matches leave every
/// counter alone. Returns what was applied, if anything.
///
/// All references are resolved before anything is written, so a failure leaves the arena
/// exactly as it was.
pub fn finish_match(
    arena: &mut Arena,
    match_id: MatchId,
) -> Result<Option<SettlementSummary>, ArenaError> {
    let mut finished = arena.get_match(match_id)?.clone();
    finished.finish()?;

    let summary = if finished.phase.is_knockout() {
        log::debug!(
            "Match {} is a {} match; counters unchanged",
            match_id,
            finished.phase
        );
        None
    } else {
        Some(apply_settlement(arena, &mut finished)?)
    };

    serve_suspensions(arena, &finished.id, [finished.team_a_id, finished.team_b_id]);
    *arena.get_match_mut(match_id)? = finished;
    log::info!("Match {} finished", match_id);
    Ok(summary)
}

/// Settle a match that is already finished but was never applied (e.g. restored from a store).
pub fn settle_match(arena: &mut Arena, match_id: MatchId) -> Result<SettlementSummary, ArenaError> {
    let mut m = arena.get_match(match_id)?.clone();
    let summary = apply_settlement(arena, &mut m)?;
    *arena.get_match_mut(match_id)? = m;
    Ok(summary)
}

/// Create both semifinals from the current group tables.
pub fn create_semifinals(arena: &mut Arena) -> Result<[MatchId; 2], ArenaError> {
    let [(a1, b2), (b1, a2)] = semifinal_pairings(&arena.teams)?;
    let first = arena.add_match(a1, b2, Phase::Semifinal)?;
    let second = arena.add_match(b1, a2, Phase::Semifinal)?;
    Ok([first, second])
}

/// Create the final between the two semifinal winners.
pub fn create_final(arena: &mut Arena) -> Result<MatchId, ArenaError> {
    let (first, second) = final_pairing(&arena.matches)?;
    arena.add_match(first, second, Phase::Final)
}

/// Team the player currently plays for, if that team is in the match and the player may
/// still take part in it.
fn playing_team(arena: &Arena, match_id: MatchId, player_id: PlayerId) -> Result<TeamId, ArenaError> {
    let player = arena.player(player_id)?;
    let m = arena.get_match(match_id)?;
    if !m.involves(player.team_id) {
        return Err(ArenaError::PlayerNotInMatch { match_id, player_id });
    }
    if m.is_sent_off(player_id) {
        return Err(ArenaError::PlayerSentOff { match_id, player_id });
    }
    if player.is_suspended_for(match_id) {
        return Err(ArenaError::PlayerSuspended(player_id));
    }
    Ok(player.team_id)
}

/// Run the settlement engine on `m` and write the result into the arena. On success `m` is
/// stamped as settled; the caller stores it.
fn apply_settlement(
    arena: &mut Arena,
    m: &mut Match,
) -> Result<SettlementSummary, ArenaError> {
    let dangling = |entity: &'static str, id: Uuid| ArenaError::DanglingReference {
        match_id: m.id,
        entity,
        id,
    };
    let team_a = arena
        .team(m.team_a_id)
        .map_err(|_| dangling("team", m.team_a_id))?;
    let team_b = arena
        .team(m.team_b_id)
        .map_err(|_| dangling("team", m.team_b_id))?;

    let (settled_a, settled_b, players) = match settle(m, team_a, team_b) {
        Ok(settled) => settled,
        Err(e) => {
            log::warn!("Settlement of match {} rejected: {}", m.id, e);
            return Err(e);
        }
    };
    if let Some(missing) = players.keys().find(|id| arena.player(**id).is_err()) {
        return Err(dangling("player", *missing));
    }

    let (delta_a, delta_b) = team_deltas(m);
    *arena.team_mut(m.team_a_id)? = settled_a;
    *arena.team_mut(m.team_b_id)? = settled_b;
    for (id, delta) in &players {
        arena.player_mut(*id)?.apply(delta);
    }
    m.settled_at = Some(Utc::now());
    log::info!(
        "Settled match {} ({}-{}), {} player(s) credited",
        m.id,
        m.score_a,
        m.score_b,
        players.len()
    );

    Ok(SettlementSummary {
        match_id: m.id,
        team_a: delta_a,
        team_b: delta_b,
        players,
    })
}

/// Clear suspensions earned before this match for both squads.
fn serve_suspensions(arena: &mut Arena, match_id: &MatchId, teams: [TeamId; 2]) {
    for p in arena
        .players
        .iter_mut()
        .filter(|p| teams.contains(&p.team_id))
    {
        if p.is_suspended_for(*match_id) {
            p.suspended_until = None;
        }
    }
}
