pub mod aggregate;
pub mod branches;
pub mod commits;
pub mod counters;
pub mod crawler;
pub mod paginator;
pub mod profile;
pub mod repositories;
