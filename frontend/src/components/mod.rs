//! UI Components for the Tokenforge application.
//!
//! This module contains all Leptos components organized by function:
//!
//! # Layout Components
//! - [`Header`] - Navigation bar with wallet connection
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`TokenForm`] - The token creation form and pipeline launcher
//! - [`StatusSection`] - Pipeline progress, pinned links, result banners

mod footer;
mod form;
mod header;
mod hero;
mod status;

pub use footer::*;
pub use form::*;
pub use header::*;
pub use hero::*;
pub use status::*;
