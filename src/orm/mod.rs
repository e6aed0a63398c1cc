pub mod conferences;
pub mod sessions;
pub mod user_roles;
pub mod users;
pub mod votes;
