//! # Services Module
//!
//! Owner-scoped services. Each service is constructed from an explicit
//! `Database` handle, the owner id of the authenticated user, and a
//! `ChangeFeed` clone for publishing mutations.

pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod expenses;
pub mod ledger;
