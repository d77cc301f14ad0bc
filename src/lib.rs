//! Pokedex TUI - a terminal client for a REST Pokemon collection
//!
//! The library exposes every module so the binary and the integration tests
//! share one reducer, one API client and one set of components.

pub mod action;
pub mod adapters;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod form;
pub mod list;
pub mod model;
pub mod pagination;
pub mod reducer;
pub mod state;
