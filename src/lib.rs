//! Three small utility engines and the plumbing around them.
//!
//! - [`calculator`]: four-function calculator state machine with memory
//! - [`converter`]: unit conversion over six fixed categories
//! - [`color`]: hex / RGB / HSL color conversion
//!
//! Saved items and profiles go through a [`store::RecordStore`], on behalf of
//! the user a [`session::IdentityProvider`] reports as signed in.

pub mod calculator;
pub mod clipboard;
pub mod color;
pub mod config;
pub mod converter;
pub mod format;
pub mod history;
pub mod items;
pub mod session;
pub mod store;
pub mod ui;
