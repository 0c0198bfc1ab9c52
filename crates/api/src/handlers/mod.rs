pub mod milestone;
pub mod project;
pub mod slot;
pub mod specialty;
pub mod user;
