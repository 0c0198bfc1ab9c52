//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO carrying raw caller input
//! - Where needed, a validated insert/patch struct built by the board layer
//!
//! Enumerated `TEXT` columns decode through `TryFrom<String>`, so a row with
//! an unknown value fails at the store boundary instead of leaking through.

pub mod audit;
pub mod milestone;
pub mod profile;
pub mod project;
pub mod resource;
pub mod slot;
pub mod specialty;
pub mod user;
