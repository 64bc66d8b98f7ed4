//! Seeded in-memory fixtures shared by the service tests.

use crate::dto::player::CreatePlayerRequest;
use crate::dto::team::CreateTeamRequest;
use crate::models::{GoalSubmission, Match, MatchSchedule, Player, Position, Team};
use crate::store::{EntityStore, MemoryStore};

/// Three teams with one striker each. `home` and `away` meet in
/// [`League::schedule`]; `third` and its `outsider` take no part in it.
pub(crate) struct League {
    pub store: MemoryStore,
    pub home: Team,
    pub away: Team,
    pub third: Team,
    pub home_striker: Player,
    pub away_striker: Player,
    pub outsider: Player,
}

impl League {
    pub async fn seed() -> Self {
        let store = MemoryStore::new();
        let home = add_team(&store, "Persija").await;
        let away = add_team(&store, "Persib").await;
        let third = add_team(&store, "Arema").await;
        let home_striker = add_player(&store, &home, "Bambang", 9).await;
        let away_striker = add_player(&store, &away, "Ciro", 10).await;
        let outsider = add_player(&store, &third, "Dendi", 7).await;

        Self {
            store,
            home,
            away,
            third,
            home_striker,
            away_striker,
            outsider,
        }
    }

    pub fn schedule(&self) -> MatchSchedule {
        MatchSchedule {
            home_team_id: self.home.team_id,
            away_team_id: self.away.team_id,
            match_date: "2025-06-15".to_string(),
            match_time: "19:30".to_string(),
        }
    }

    pub async fn scheduled_match(&self) -> Match {
        self.store.create_match(&self.schedule()).await.unwrap()
    }
}

pub(crate) async fn add_team(store: &MemoryStore, name: &str) -> Team {
    store
        .create_team(&CreateTeamRequest {
            name: name.to_string(),
            logo_url: None,
            founded_year: Some(1928),
            address: None,
            city: Some("Jakarta".to_string()),
        })
        .await
        .unwrap()
}

pub(crate) async fn add_player(store: &MemoryStore, team: &Team, name: &str, jersey: i32) -> Player {
    store
        .create_player(
            team.team_id,
            &CreatePlayerRequest {
                name: name.to_string(),
                height: Some(178),
                weight: Some(72),
                position: Position::Attacker,
                jersey_number: jersey,
            },
        )
        .await
        .unwrap()
}

/// A goal by `player` for the team they are registered with.
pub(crate) fn goal(player: &Player, minute: i32) -> GoalSubmission {
    GoalSubmission {
        player_id: player.player_id,
        team_id: player.team_id,
        minute,
    }
}
