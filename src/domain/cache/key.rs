//! Cache keys for team lookups

use std::collections::BTreeSet;
use std::fmt;

use crate::domain::team::{Sport, Team, TeamId};
use crate::domain::user::UserId;

/// Key of a cached team query result
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TeamCacheKey {
    /// Every team
    AllTeams,
    /// A single team by ID
    Team(TeamId),
    /// Teams whose roster contains the player
    TeamsByPlayer(UserId),
    /// Teams managed by the user
    TeamsByManager(UserId),
    /// Teams playing the sport
    TeamsBySport(Sport),
}

impl TeamCacheKey {
    /// Short lookup name, used as a metrics label
    pub fn lookup(&self) -> &'static str {
        match self {
            Self::AllTeams => "all_teams",
            Self::Team(_) => "team",
            Self::TeamsByPlayer(_) => "teams_by_player",
            Self::TeamsByManager(_) => "teams_by_manager",
            Self::TeamsBySport(_) => "teams_by_sport",
        }
    }

    /// Every key whose cached value may include the given team document
    ///
    /// Pass the document as it was before and after a write so that
    /// entries indexed under both the old and the new values are covered.
    pub fn affected_by<'a>(teams: impl IntoIterator<Item = &'a Team>) -> BTreeSet<TeamCacheKey> {
        let mut keys = BTreeSet::new();
        keys.insert(Self::AllTeams);

        for team in teams {
            keys.insert(Self::Team(*team.id()));
            keys.insert(Self::TeamsByManager(*team.manager_id()));
            keys.insert(Self::TeamsBySport(team.sport()));

            for player_id in team.player_ids() {
                keys.insert(Self::TeamsByPlayer(*player_id));
            }
        }

        keys
    }
}

impl fmt::Display for TeamCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllTeams => write!(f, "allTeams"),
            Self::Team(id) => write!(f, "team/{}", id),
            Self::TeamsByPlayer(id) => write!(f, "teamsByPlayer/{}", id),
            Self::TeamsByManager(id) => write!(f, "teamsByManager/{}", id),
            Self::TeamsBySport(sport) => write!(f, "teamsBySport/{}", sport),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::team::{CountryCode, NewTeam};

    fn team(manager: UserId, players: Vec<UserId>, sport: Sport) -> Team {
        NewTeam {
            name: "Wolves".to_string(),
            sport,
            location: CountryCode::parse("USA").unwrap(),
            manager_id: manager,
            player_ids: players,
        }
        .into_team(TeamId::generate())
    }

    #[test]
    fn test_key_format() {
        let team_id = TeamId::generate();
        let user_id = UserId::generate();

        assert_eq!(TeamCacheKey::AllTeams.to_string(), "allTeams");
        assert_eq!(
            TeamCacheKey::Team(team_id).to_string(),
            format!("team/{}", team_id)
        );
        assert_eq!(
            TeamCacheKey::TeamsByPlayer(user_id).to_string(),
            format!("teamsByPlayer/{}", user_id)
        );
        assert_eq!(
            TeamCacheKey::TeamsByManager(user_id).to_string(),
            format!("teamsByManager/{}", user_id)
        );
        assert_eq!(
            TeamCacheKey::TeamsBySport(Sport::Soccer).to_string(),
            "teamsBySport/Soccer"
        );
    }

    #[test]
    fn test_affected_by_covers_old_and_new_values() {
        let old_manager = UserId::generate();
        let new_manager = UserId::generate();
        let kept_player = UserId::generate();
        let dropped_player = UserId::generate();

        let before = team(old_manager, vec![kept_player, dropped_player], Sport::Soccer);
        let mut after = before.clone();
        after.apply(&crate::domain::team::TeamUpdate::set(
            crate::domain::team::TeamChanges {
                manager_id: Some(new_manager),
                player_ids: Some(vec![kept_player]),
                sport: Some(Sport::Rugby),
                ..Default::default()
            },
        ));

        let keys = TeamCacheKey::affected_by([&before, &after]);

        assert!(keys.contains(&TeamCacheKey::AllTeams));
        assert!(keys.contains(&TeamCacheKey::Team(*before.id())));
        assert!(keys.contains(&TeamCacheKey::TeamsByManager(old_manager)));
        assert!(keys.contains(&TeamCacheKey::TeamsByManager(new_manager)));
        assert!(keys.contains(&TeamCacheKey::TeamsByPlayer(dropped_player)));
        assert!(keys.contains(&TeamCacheKey::TeamsByPlayer(kept_player)));
        assert!(keys.contains(&TeamCacheKey::TeamsBySport(Sport::Soccer)));
        assert!(keys.contains(&TeamCacheKey::TeamsBySport(Sport::Rugby)));
        assert_eq!(keys.len(), 8);
    }
}
