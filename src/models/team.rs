//! Team, Group and the per-match TeamDelta.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// Group-stage label.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Group {
    #[default]
    #[serde(alias = "a")]
    A,
    #[serde(alias = "b")]
    B,
}

impl Group {
    pub const ALL: [Group; 2] = [Group::A, Group::B];
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::A => write!(f, "A"),
            Group::B => write!(f, "B"),
        }
    }
}

impl FromStr for Group {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(Group::A),
            "B" | "b" => Ok(Group::B),
            other => Err(format!("unknown group: {other}")),
        }
    }
}

/// A team and its accumulated group-stage record.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Display color, e.g. `#fbbf24`.
    pub color: String,
    pub group: Group,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    /// Goals for.
    pub gf: u32,
    /// Goals against.
    pub ga: u32,
    pub points: u32,
}

impl Team {
    /// Create a new team with every counter at zero.
    pub fn new(name: impl Into<String>, color: impl Into<String>, group: Group) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: color.into(),
            group,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            gf: 0,
            ga: 0,
            points: 0,
        }
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.gf) - i64::from(self.ga)
    }

    /// Add one match's delta to the counters.
    pub fn apply(&mut self, delta: &TeamDelta) {
        self.played += delta.played;
        self.won += delta.won;
        self.drawn += delta.drawn;
        self.lost += delta.lost;
        self.gf += delta.gf;
        self.ga += delta.ga;
        self.points += delta.points;
    }

    /// `points == 3*won + drawn` and `played == won + drawn + lost`.
    pub fn is_consistent(&self) -> bool {
        self.points == 3 * self.won + self.drawn && self.played == self.won + self.drawn + self.lost
    }
}

/// Change to a team's counters produced by settling one match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamDelta {
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub gf: u32,
    pub ga: u32,
    pub points: u32,
}

impl TeamDelta {
    /// Delta for a team that scored `my_score` and conceded `opp_score`.
    pub fn from_score(my_score: u32, opp_score: u32) -> Self {
        let mut delta = Self {
            played: 1,
            gf: my_score,
            ga: opp_score,
            ..Self::default()
        };
        if my_score > opp_score {
            delta.won = 1;
            delta.points = 3;
        } else if my_score == opp_score {
            delta.drawn = 1;
            delta.points = 1;
        } else {
            delta.lost = 1;
        }
        delta
    }
}
