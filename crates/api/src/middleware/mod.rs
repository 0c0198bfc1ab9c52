//! Request extractors for caller identity.
//!
//! Authentication happens upstream; the authenticator forwards the user ID
//! in the `x-user-id` header.
//!
//! - [`caller::CallerIdentity`] -- Requires a known caller (401 otherwise).
//! - [`caller::OptionalCaller`] -- Resolves the caller if the header is present.

pub mod caller;
