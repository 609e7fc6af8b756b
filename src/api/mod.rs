pub mod health;
pub mod metrics;
pub mod snapshots;
pub mod swagger;
pub mod team;
