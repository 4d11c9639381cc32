pub mod json_api;

pub use json_api::{
    player_report_json, team_leaderboard_json, LeaderboardRequest, LeaderboardResponse,
    PlayerReportRequest, PlayerReportResponse, API_SCHEMA_VERSION,
};
