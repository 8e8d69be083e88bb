//! Stamp API Library
//!
//! User registration and login, stamp storage, and server-side rendering
//! of text images with toy pixel effects.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod render;
pub mod state;
pub mod usecase;
