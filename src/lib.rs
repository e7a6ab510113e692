//! Seed file generation for the curation admin backend.
//!
//! Exports curated content tables (modules, resources, skills, terms,
//! tracks and their relationship tables) from the remote database into
//! JSON seed files used to prime local development databases.

pub mod cli;
pub mod config;
pub mod db;
pub mod sync;
pub mod tunnel;
