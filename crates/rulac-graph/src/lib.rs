//! RULAC Graph — read access to the conflict knowledge graph.
//!
//! Report builds never talk to Neo4j directly. They go through the
//! [`ConflictGraph`] trait, implemented by a Neo4j read snapshot for
//! production and by [`InMemoryGraph`] for fixtures and tests.

pub mod access;
pub mod client;
pub mod memory;
pub mod queries;

pub use access::{ConflictGraph, LocatedConflict, PartyLink};
pub use client::{GraphClient, GraphConfig, GraphError};
pub use memory::InMemoryGraph;
pub use queries::ReadSnapshot;
