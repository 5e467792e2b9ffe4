pub mod cache;
pub mod directory;
pub mod error;
pub mod handlers;
pub mod invitations;
pub mod models;
pub mod routes;
pub mod value;
