//! Default league: eight teams over two groups, seven players each.

use crate::models::{Group, Player, Team, TeamId};
use rand::Rng;

/// Players created with every new team.
pub const SQUAD_SIZE: usize = 7;

/// Market value given to placeholder players of teams added later.
pub const DEFAULT_MARKET_VALUE: u32 = 10_000;

pub const DEFAULT_PHOTO_URL: &str =
    "https://images.unsplash.com/photo-1511367461989-f85a21fda167?w=400&h=400&fit=crop";

const PLAYER_PHOTOS: [&str; 7] = [
    "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1539571696357-5a69c17a67c6?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1527980965255-d3b416303d12?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1531427186611-ecfd6d936c79?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1519345182560-3f2917c472ef?w=400&h=400&fit=crop",
];

const INITIAL_TEAMS: [(&str, &str, Group); 8] = [
    ("Lightning FC", "#fbbf24", Group::A),
    ("Iron Titans", "#64748b", Group::A),
    ("Phoenix United", "#ef4444", Group::A),
    ("Emerald Dragons", "#10b981", Group::A),
    ("Cobalt Sharks", "#3b82f6", Group::B),
    ("Shadow Ninjas", "#1e293b", Group::B),
    ("Neon Stars", "#d946ef", Group::B),
    ("Golden Lions", "#f59e0b", Group::B),
];

/// The default teams and their squads. Market values are random in 10 000..60 000.
pub fn initial_league() -> (Vec<Team>, Vec<Player>) {
    let mut rng = rand::thread_rng();
    let mut teams = Vec::with_capacity(INITIAL_TEAMS.len());
    let mut players = Vec::with_capacity(INITIAL_TEAMS.len() * SQUAD_SIZE);

    for (name, color, group) in INITIAL_TEAMS {
        let team = Team::new(name, color, group);
        players.extend((0..SQUAD_SIZE).map(|i| {
            let mut p = Player::new(format!("Player {}", i + 1), team.id);
            p.photo_url = Some(PLAYER_PHOTOS[i % PLAYER_PHOTOS.len()].to_string());
            p.market_value = Some(rng.gen_range(10_000..60_000));
            p
        }));
        teams.push(team);
    }
    (teams, players)
}

/// Placeholder squad for a team created through the API.
pub fn placeholder_squad(team_id: TeamId) -> Vec<Player> {
    (0..SQUAD_SIZE)
        .map(|i| {
            let mut p = Player::new(format!("New Player {}", i + 1), team_id);
            p.photo_url = Some(DEFAULT_PHOTO_URL.to_string());
            p.market_value = Some(DEFAULT_MARKET_VALUE);
            p
        })
        .collect()
}
