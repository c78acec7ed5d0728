//! Arena: the authoritative league state (teams, players, matches).

use crate::logic::{initial_league, placeholder_squad};
use crate::models::error::ArenaError;
use crate::models::game::{Match, MatchId, Phase};
use crate::models::player::{Player, PlayerId};
use crate::models::team::{Group, Team, TeamId};
use serde::{Deserialize, Serialize};

/// Partial update for a team's editable fields. Counters are not editable.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
    pub group: Option<Group>,
}

/// Partial update for a player's profile.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub market_value: Option<u32>,
}

/// Full league state. Matches are kept in creation order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Arena {
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub matches: Vec<Match>,
}

impl Arena {
    /// Empty arena: no teams, players or matches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arena with the default eight teams and their squads.
    pub fn seeded() -> Self {
        let (teams, players) = initial_league();
        Self {
            teams,
            players,
            matches: Vec::new(),
        }
    }

    /// Drop everything and go back to the default league.
    pub fn reset(&mut self) {
        *self = Self::seeded();
    }

    pub fn team(&self, id: TeamId) -> Result<&Team, ArenaError> {
        self.teams
            .iter()
            .find(|t| t.id == id)
            .ok_or(ArenaError::TeamNotFound(id))
    }

    pub fn team_mut(&mut self, id: TeamId) -> Result<&mut Team, ArenaError> {
        self.teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ArenaError::TeamNotFound(id))
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, ArenaError> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(ArenaError::PlayerNotFound(id))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, ArenaError> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ArenaError::PlayerNotFound(id))
    }

    pub fn get_match(&self, id: MatchId) -> Result<&Match, ArenaError> {
        self.matches
            .iter()
            .find(|m| m.id == id)
            .ok_or(ArenaError::MatchNotFound(id))
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Result<&mut Match, ArenaError> {
        self.matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(ArenaError::MatchNotFound(id))
    }

    /// Squad of one team.
    pub fn players_of(&self, team_id: TeamId) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.team_id == team_id)
    }

    /// Add a team with a placeholder squad. Returns the new team's id.
    pub fn add_team(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
        group: Group,
    ) -> Result<TeamId, ArenaError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(ArenaError::EmptyName);
        }
        let team = Team::new(name, color, group);
        let id = team.id;
        self.players.extend(placeholder_squad(id));
        self.teams.push(team);
        log::info!("Added team {} to group {}", name, group);
        Ok(id)
    }

    pub fn update_team(&mut self, id: TeamId, update: TeamUpdate) -> Result<(), ArenaError> {
        let team = self.team_mut(id)?;
        if let Some(name) = update.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(ArenaError::EmptyName);
            }
            team.name = name.to_string();
        }
        if let Some(color) = update.color {
            team.color = color;
        }
        if let Some(group) = update.group {
            team.group = group;
        }
        Ok(())
    }

    /// Remove a team together with its players and every match it appears in.
    pub fn delete_team(&mut self, id: TeamId) -> Result<(), ArenaError> {
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == id)
            .ok_or(ArenaError::TeamNotFound(id))?;
        let team = self.teams.remove(idx);
        self.players.retain(|p| p.team_id != id);
        let before = self.matches.len();
        self.matches.retain(|m| !m.involves(id));
        log::info!(
            "Deleted team {} and {} match(es)",
            team.name,
            before - self.matches.len()
        );
        Ok(())
    }

    pub fn update_player(&mut self, id: PlayerId, update: PlayerUpdate) -> Result<(), ArenaError> {
        let player = self.player_mut(id)?;
        if let Some(name) = update.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(ArenaError::EmptyName);
            }
            player.name = name.to_string();
        }
        if let Some(url) = update.photo_url {
            player.photo_url = Some(url);
        }
        if let Some(value) = update.market_value {
            player.market_value = Some(value);
        }
        Ok(())
    }

    /// Move a player to another team. Goals and assists travel with the player.
    pub fn transfer_player(&mut self, id: PlayerId, target: TeamId) -> Result<(), ArenaError> {
        self.team(target)?;
        let player = self.player_mut(id)?;
        player.team_id = target;
        Ok(())
    }

    /// Schedule a pending match between two different, existing teams.
    pub fn add_match(
        &mut self,
        team_a_id: TeamId,
        team_b_id: TeamId,
        phase: Phase,
    ) -> Result<MatchId, ArenaError> {
        if team_a_id == team_b_id {
            return Err(ArenaError::SameTeam);
        }
        self.team(team_a_id)?;
        self.team(team_b_id)?;
        let m = Match::new(team_a_id, team_b_id, phase);
        let id = m.id;
        self.matches.push(m);
        Ok(id)
    }

    pub fn delete_match(&mut self, id: MatchId) -> Result<(), ArenaError> {
        let idx = self
            .matches
            .iter()
            .position(|m| m.id == id)
            .ok_or(ArenaError::MatchNotFound(id))?;
        self.matches.remove(idx);
        Ok(())
    }
}
