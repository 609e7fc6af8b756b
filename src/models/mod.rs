pub mod snapshot;
pub mod team_member;
pub mod user;

pub use snapshot::*;
pub use team_member::*;
pub use user::*;
