pub mod snapshot_service;
pub mod team_service;
