//! Field resolvers.
//!
//! Each resolver is a function of the request context and the owning record. Errors are local to
//! the field that produced them; the GraphQL engine attaches them to the field path and keeps
//! resolving siblings.

pub mod proposal;
pub mod query;
pub mod tally;
pub mod vote;
