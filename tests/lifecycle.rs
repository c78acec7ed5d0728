//! Integration tests for the match lifecycle driven through the arena.

use fives_arena::{
    advance_half, finish_match, record_card, record_goal, record_substitution, set_match_stats,
    settle_match, start_match, Arena, ArenaError, CardKind, Group, Half, MatchId, MatchStats,
    MatchStatus, Phase, PlayerId, PlayerUpdate, TeamId, TeamUpdate,
};

/// Two group-A teams with their placeholder squads.
fn arena_with_two_teams() -> (Arena, TeamId, TeamId) {
    let mut arena = Arena::new();
    let a = arena.add_team("Lightning FC", "#fbbf24", Group::A).unwrap();
    let b = arena.add_team("Iron Titans", "#64748b", Group::A).unwrap();
    (arena, a, b)
}

fn squad(arena: &Arena, team: TeamId) -> Vec<PlayerId> {
    arena.players_of(team).map(|p| p.id).collect()
}

fn live_match(arena: &mut Arena, a: TeamId, b: TeamId, phase: Phase) -> MatchId {
    let id = arena.add_match(a, b, phase).unwrap();
    start_match(arena, id).unwrap();
    id
}

#[test]
fn new_team_gets_seven_players() {
    let (arena, a, _) = arena_with_two_teams();
    assert_eq!(squad(&arena, a).len(), 7);
    assert_eq!(arena.team(a).unwrap().points, 0);
}

#[test]
fn match_needs_two_different_teams() {
    let (mut arena, a, _) = arena_with_two_teams();
    assert_eq!(arena.add_match(a, a, Phase::Group), Err(ArenaError::SameTeam));
}

#[test]
fn goals_are_only_recorded_while_live() {
    let (mut arena, a, b) = arena_with_two_teams();
    let scorer = squad(&arena, a)[0];
    let id = arena.add_match(a, b, Phase::Group).unwrap();
    assert_eq!(
        record_goal(&mut arena, id, scorer, None),
        Err(ArenaError::MatchNotLive(id))
    );
}

#[test]
fn score_follows_recorded_goals() {
    let (mut arena, a, b) = arena_with_two_teams();
    let (sa, sb) = (squad(&arena, a), squad(&arena, b));
    let id = live_match(&mut arena, a, b, Phase::Group);

    record_goal(&mut arena, id, sa[0], Some(sa[1])).unwrap();
    record_goal(&mut arena, id, sb[2], None).unwrap();
    record_goal(&mut arena, id, sa[0], None).unwrap();

    let m = arena.get_match(id).unwrap();
    assert_eq!((m.score_a, m.score_b), (2, 1));
    assert_eq!(m.goals_from_events(), (2, 1));
    assert_eq!(m.events.len(), 4);
    // counters wait for settlement
    assert_eq!(arena.player(sa[0]).unwrap().goals, 0);
}

#[test]
fn assist_must_come_from_a_teammate() {
    let (mut arena, a, b) = arena_with_two_teams();
    let (sa, sb) = (squad(&arena, a), squad(&arena, b));
    let id = live_match(&mut arena, a, b, Phase::Group);

    assert!(matches!(
        record_goal(&mut arena, id, sa[0], Some(sb[0])),
        Err(ArenaError::PlayerNotInMatch { .. })
    ));
    assert_eq!(
        record_goal(&mut arena, id, sa[0], Some(sa[0])),
        Err(ArenaError::SamePlayer(sa[0]))
    );
    assert_eq!(arena.get_match(id).unwrap().score_a, 0);
}

#[test]
fn finishing_a_group_match_settles_once() {
    let (mut arena, a, b) = arena_with_two_teams();
    let sa = squad(&arena, a);
    let id = live_match(&mut arena, a, b, Phase::Group);
    record_goal(&mut arena, id, sa[0], Some(sa[1])).unwrap();
    record_goal(&mut arena, id, sa[0], None).unwrap();

    let summary = finish_match(&mut arena, id).unwrap().unwrap();
    assert_eq!(summary.team_a.points, 3);
    assert_eq!(summary.players[&sa[0]].goals, 2);

    let team_a = arena.team(a).unwrap().clone();
    let team_b = arena.team(b).unwrap().clone();
    assert_eq!((team_a.won, team_a.points, team_a.gf), (1, 3, 2));
    assert_eq!((team_b.lost, team_b.points, team_b.ga), (1, 0, 2));
    assert_eq!(arena.player(sa[0]).unwrap().goals, 2);
    assert_eq!(arena.player(sa[1]).unwrap().assists, 1);

    let m = arena.get_match(id).unwrap();
    assert_eq!(m.status, MatchStatus::Finished);
    assert!(m.settled_at.is_some());

    // a second finish or settle attempt changes nothing
    assert_eq!(
        finish_match(&mut arena, id),
        Err(ArenaError::InvalidTransition {
            from: MatchStatus::Finished,
            to: MatchStatus::Finished
        })
    );
    assert_eq!(settle_match(&mut arena, id), Err(ArenaError::AlreadySettled(id)));
    assert_eq!(arena.team(a).unwrap(), &team_a);
    assert_eq!(arena.team(b).unwrap(), &team_b);
    assert_eq!(arena.player(sa[0]).unwrap().goals, 2);
}

#[test]
fn finishing_a_semifinal_leaves_counters_alone() {
    let (mut arena, a, b) = arena_with_two_teams();
    let sa = squad(&arena, a);
    let id = live_match(&mut arena, a, b, Phase::Semifinal);
    record_goal(&mut arena, id, sa[0], None).unwrap();
    let before = arena.teams.clone();

    assert_eq!(finish_match(&mut arena, id), Ok(None));
    assert_eq!(arena.teams, before);
    assert_eq!(arena.player(sa[0]).unwrap().goals, 0);
    assert_eq!(arena.get_match(id).unwrap().status, MatchStatus::Finished);
}

#[test]
fn unknown_scorer_fails_without_partial_writes() {
    let (mut arena, a, b) = arena_with_two_teams();
    let sa = squad(&arena, a);
    let id = live_match(&mut arena, a, b, Phase::Group);
    record_goal(&mut arena, id, sa[0], None).unwrap();
    arena.players.retain(|p| p.id != sa[0]);
    let before = arena.teams.clone();

    assert!(matches!(
        finish_match(&mut arena, id),
        Err(ArenaError::DanglingReference { entity: "player", .. })
    ));
    assert_eq!(arena.teams, before);
    assert_eq!(arena.get_match(id).unwrap().status, MatchStatus::Live);
}

#[test]
fn cannot_finish_a_pending_match() {
    let (mut arena, a, b) = arena_with_two_teams();
    let id = arena.add_match(a, b, Phase::Group).unwrap();
    assert_eq!(
        finish_match(&mut arena, id),
        Err(ArenaError::InvalidTransition {
            from: MatchStatus::Pending,
            to: MatchStatus::Finished
        })
    );
}

#[test]
fn halves_advance_in_order() {
    let (mut arena, a, b) = arena_with_two_teams();
    let id = live_match(&mut arena, a, b, Phase::Group);
    assert_eq!(arena.get_match(id).unwrap().half, Some(Half::First));
    assert_eq!(advance_half(&mut arena, id), Ok(Half::Second));
    assert_eq!(advance_half(&mut arena, id), Ok(Half::Finished));
    assert_eq!(advance_half(&mut arena, id), Ok(Half::Finished));
    assert_eq!(arena.get_match(id).unwrap().status, MatchStatus::Live);
}

#[test]
fn substitution_records_the_current_half() {
    let (mut arena, a, b) = arena_with_two_teams();
    let (sa, sb) = (squad(&arena, a), squad(&arena, b));
    let id = live_match(&mut arena, a, b, Phase::Group);
    advance_half(&mut arena, id).unwrap();

    let sub = record_substitution(&mut arena, id, sa[4], sa[5], 27).unwrap();
    assert_eq!(sub.half, Half::Second);
    assert_eq!(sub.team_id, a);
    assert!(record_substitution(&mut arena, id, sa[4], sb[5], 28).is_err());
    assert_eq!(arena.get_match(id).unwrap().substitutions.len(), 1);
}

#[test]
fn red_card_suspends_until_the_next_match_is_played() {
    let (mut arena, a, b) = arena_with_two_teams();
    let sa = squad(&arena, a);
    let first = live_match(&mut arena, a, b, Phase::Group);
    record_card(&mut arena, first, sa[2], CardKind::Red).unwrap();
    assert_eq!(arena.get_match(first).unwrap().stats.team_a.red_cards, 1);
    finish_match(&mut arena, first).unwrap();

    let second = live_match(&mut arena, a, b, Phase::Group);
    assert_eq!(
        record_goal(&mut arena, second, sa[2], None),
        Err(ArenaError::PlayerSuspended(sa[2]))
    );
    finish_match(&mut arena, second).unwrap();
    assert_eq!(arena.player(sa[2]).unwrap().suspended_until, None);

    let third = live_match(&mut arena, a, b, Phase::Group);
    assert!(record_goal(&mut arena, third, sa[2], None).is_ok());
}

#[test]
fn sent_off_player_takes_no_further_part() {
    let (mut arena, a, b) = arena_with_two_teams();
    let sa = squad(&arena, a);
    let id = live_match(&mut arena, a, b, Phase::Group);
    record_card(&mut arena, id, sa[0], CardKind::Red).unwrap();

    let sent_off = Err(ArenaError::PlayerSentOff {
        match_id: id,
        player_id: sa[0],
    });
    assert_eq!(record_goal(&mut arena, id, sa[0], None), sent_off);
    assert_eq!(record_goal(&mut arena, id, sa[1], Some(sa[0])), sent_off);
    assert_eq!(
        record_substitution(&mut arena, id, sa[1], sa[0], 30).map(|_| ()),
        sent_off
    );
    assert_eq!(record_card(&mut arena, id, sa[0], CardKind::Yellow), sent_off);

    let m = arena.get_match(id).unwrap();
    assert_eq!(m.sent_off, vec![sa[0]]);
    assert!(m.events.is_empty() && m.substitutions.is_empty());
    assert_eq!(m.stats.team_a.red_cards, 1);

    finish_match(&mut arena, id).unwrap();
    assert_eq!(arena.player(sa[0]).unwrap().goals, 0);
}

#[test]
fn second_yellow_suspends() {
    let (mut arena, a, b) = arena_with_two_teams();
    let sb = squad(&arena, b);
    let id = live_match(&mut arena, a, b, Phase::Group);
    record_card(&mut arena, id, sb[0], CardKind::Yellow).unwrap();
    assert_eq!(arena.player(sb[0]).unwrap().suspended_until, None);
    record_card(&mut arena, id, sb[0], CardKind::Yellow).unwrap();
    assert_eq!(arena.player(sb[0]).unwrap().suspended_until, Some(id));
    assert_eq!(arena.get_match(id).unwrap().stats.team_b.yellow_cards, 2);
    assert!(arena.get_match(id).unwrap().is_sent_off(sb[0]));
    assert!(matches!(
        record_goal(&mut arena, id, sb[0], None),
        Err(ArenaError::PlayerSentOff { .. })
    ));
}

#[test]
fn stats_are_clamped_and_keep_card_counts() {
    let (mut arena, a, b) = arena_with_two_teams();
    let sb = squad(&arena, b);
    let id = live_match(&mut arena, a, b, Phase::Group);
    record_card(&mut arena, id, sb[3], CardKind::Yellow).unwrap();

    let entered = MatchStats {
        possession: 140,
        shots_on_target: 5,
        fouls: 2,
        corners: 4,
        yellow_cards: 9,
        red_cards: 9,
    };
    set_match_stats(&mut arena, id, b, entered).unwrap();
    let stats = arena.get_match(id).unwrap().stats.team_b;
    assert_eq!(
        stats,
        MatchStats {
            possession: 100,
            shots_on_target: 5,
            fouls: 2,
            corners: 4,
            yellow_cards: 1,
            red_cards: 0,
        }
    );

    let stranger = arena.add_team("Neon Stars", "#d946ef", Group::B).unwrap();
    assert_eq!(
        set_match_stats(&mut arena, id, stranger, entered),
        Err(ArenaError::TeamNotFound(stranger))
    );
}

#[test]
fn stats_only_change_while_live() {
    let (mut arena, a, b) = arena_with_two_teams();
    let id = arena.add_match(a, b, Phase::Group).unwrap();
    let entered = MatchStats {
        possession: 60,
        ..MatchStats::default()
    };
    assert_eq!(
        set_match_stats(&mut arena, id, a, entered),
        Err(ArenaError::MatchNotLive(id))
    );

    start_match(&mut arena, id).unwrap();
    finish_match(&mut arena, id).unwrap();
    assert_eq!(
        set_match_stats(&mut arena, id, a, entered),
        Err(ArenaError::MatchNotLive(id))
    );
    assert_eq!(arena.get_match(id).unwrap().stats.team_a, MatchStats::default());
}

#[test]
fn deleting_a_team_cascades() {
    let (mut arena, a, b) = arena_with_two_teams();
    let c = arena.add_team("Phoenix United", "#ef4444", Group::A).unwrap();
    arena.add_match(a, b, Phase::Group).unwrap();
    let kept = arena.add_match(b, c, Phase::Group).unwrap();

    arena.delete_team(a).unwrap();
    assert!(arena.team(a).is_err());
    assert_eq!(arena.players_of(a).count(), 0);
    assert_eq!(arena.matches.len(), 1);
    assert_eq!(arena.matches[0].id, kept);
}

#[test]
fn deleting_a_match_leaves_the_rest() {
    let (mut arena, a, b) = arena_with_two_teams();
    let gone = arena.add_match(a, b, Phase::Group).unwrap();
    let kept = arena.add_match(b, a, Phase::Group).unwrap();

    arena.delete_match(gone).unwrap();
    assert_eq!(arena.matches.len(), 1);
    assert_eq!(arena.matches[0].id, kept);
    assert!(arena.team(a).is_ok() && arena.team(b).is_ok());
    assert_eq!(arena.delete_match(gone), Err(ArenaError::MatchNotFound(gone)));
}

#[test]
fn renames_reject_blank_names() {
    let (mut arena, a, _) = arena_with_two_teams();
    let p = squad(&arena, a)[0];

    let blank_team = TeamUpdate {
        name: Some("   ".to_string()),
        color: Some("#000000".to_string()),
        group: Some(Group::B),
    };
    assert_eq!(arena.update_team(a, blank_team), Err(ArenaError::EmptyName));
    let team = arena.team(a).unwrap();
    assert_eq!((team.name.as_str(), team.group), ("Lightning FC", Group::A));

    let renamed = TeamUpdate {
        name: Some("  Thunder FC ".to_string()),
        ..TeamUpdate::default()
    };
    arena.update_team(a, renamed).unwrap();
    assert_eq!(arena.team(a).unwrap().name, "Thunder FC");

    let blank_player = PlayerUpdate {
        name: Some(String::new()),
        ..PlayerUpdate::default()
    };
    assert_eq!(arena.update_player(p, blank_player), Err(ArenaError::EmptyName));
    assert_eq!(arena.player(p).unwrap().name, "New Player 1");

    let valued = PlayerUpdate {
        market_value: Some(25_000),
        ..PlayerUpdate::default()
    };
    arena.update_player(p, valued).unwrap();
    assert_eq!(arena.player(p).unwrap().market_value, Some(25_000));
}

#[test]
fn transfer_moves_player_between_teams() {
    let (mut arena, a, b) = arena_with_two_teams();
    let p = squad(&arena, a)[0];
    arena.transfer_player(p, b).unwrap();
    assert_eq!(arena.player(p).unwrap().team_id, b);
    assert_eq!(squad(&arena, b).len(), 8);
    let missing = uuid::Uuid::new_v4();
    assert_eq!(arena.transfer_player(p, missing), Err(ArenaError::TeamNotFound(missing)));
}

#[test]
fn reset_restores_the_default_league() {
    let mut arena = Arena::seeded();
    assert_eq!(arena.teams.len(), 8);
    assert_eq!(arena.players.len(), 56);
    let a = arena.teams[0].id;
    arena.delete_team(a).unwrap();
    arena.reset();
    assert_eq!(arena.teams.len(), 8);
    assert!(arena.matches.is_empty());
    assert!(arena
        .players
        .iter()
        .all(|p| matches!(p.market_value, Some(v) if (10_000..60_000).contains(&v))));
}
