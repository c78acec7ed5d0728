//! Integration tests for settling finished matches.

use fives_arena::{
    settle, ArenaError, EventKind, Group, Match, MatchEvent, MatchStatus, Phase, Team,
};
use uuid::Uuid;

fn teams() -> (Team, Team) {
    (
        Team::new("Cobalt Sharks", "#3b82f6", Group::B),
        Team::new("Neon Stars", "#d946ef", Group::B),
    )
}

fn finished(a: &Team, b: &Team, phase: Phase, score_a: u32, score_b: u32) -> Match {
    let mut m = Match::new(a.id, b.id, phase);
    m.status = MatchStatus::Finished;
    m.score_a = score_a;
    m.score_b = score_b;
    m
}

#[test]
fn three_one_win() {
    let (a, b) = teams();
    let m = finished(&a, &b, Phase::Group, 3, 1);
    let (a, b, _) = settle(&m, &a, &b).unwrap();

    assert_eq!(
        (a.played, a.won, a.drawn, a.lost, a.points, a.gf, a.ga),
        (1, 1, 0, 0, 3, 3, 1)
    );
    assert_eq!(
        (b.played, b.won, b.drawn, b.lost, b.points, b.gf, b.ga),
        (1, 0, 0, 1, 0, 1, 3)
    );
    assert!(a.is_consistent() && b.is_consistent());
}

#[test]
fn two_two_draw() {
    let (a, b) = teams();
    let m = finished(&a, &b, Phase::Group, 2, 2);
    let (a, b, _) = settle(&m, &a, &b).unwrap();
    for t in [&a, &b] {
        assert_eq!((t.played, t.drawn, t.points, t.gf, t.ga), (1, 1, 1, 2, 2));
    }
}

#[test]
fn brace_counts_twice() {
    let (a, b) = teams();
    let p1 = Uuid::new_v4();
    let mut m = finished(&a, &b, Phase::Group, 2, 0);
    m.events.push(MatchEvent::new(EventKind::Goal, p1, a.id));
    m.events.push(MatchEvent::new(EventKind::Goal, p1, a.id));

    let (_, _, players) = settle(&m, &a, &b).unwrap();
    assert_eq!(players[&p1].goals, 2);
    assert_eq!(players[&p1].assists, 0);
    assert_eq!(players.len(), 1);
}

#[test]
fn assists_are_credited_per_event() {
    let (a, b) = teams();
    let scorer = Uuid::new_v4();
    let provider = Uuid::new_v4();
    let mut m = finished(&a, &b, Phase::Group, 0, 1);
    m.events.push(MatchEvent::new(EventKind::Assist, provider, b.id));
    m.events.push(MatchEvent::new(EventKind::Goal, scorer, b.id));

    let (_, _, players) = settle(&m, &a, &b).unwrap();
    assert_eq!(players[&provider].assists, 1);
    assert_eq!(players[&scorer].goals, 1);
}

#[test]
fn knockout_matches_are_rejected() {
    let (a, b) = teams();
    for phase in [Phase::Semifinal, Phase::Final] {
        let m = finished(&a, &b, phase, 4, 0);
        assert_eq!(
            settle(&m, &a, &b),
            Err(ArenaError::InvalidPhase {
                match_id: m.id,
                phase
            })
        );
    }
}

#[test]
fn settled_match_is_rejected() {
    let (a, b) = teams();
    let mut m = finished(&a, &b, Phase::Group, 1, 0);
    m.settled_at = Some(chrono::Utc::now());
    assert_eq!(settle(&m, &a, &b), Err(ArenaError::AlreadySettled(m.id)));
}

#[test]
fn swapped_teams_are_dangling() {
    let (a, b) = teams();
    let m = finished(&a, &b, Phase::Group, 1, 0);
    assert!(matches!(
        settle(&m, &b, &a),
        Err(ArenaError::DanglingReference { entity: "team", .. })
    ));
}

#[test]
fn unknown_event_tags_do_not_parse() {
    assert_eq!("goal".parse::<EventKind>(), Ok(EventKind::Goal));
    assert_eq!(
        "own_goal".parse::<EventKind>(),
        Err(ArenaError::UnknownEventKind("own_goal".to_string()))
    );
}
