pub mod goal;
pub mod matches;
pub mod player;
pub mod team;

pub use goal::{Goal, GoalSubmission, NewGoal};
pub use matches::{
    GoalDetail, Match, MatchDetails, MatchOutcome, MatchSchedule, MatchStatus, MatchWithTeams,
};
pub use player::{Player, Position};
pub use team::Team;
