//! Core 2-D curved-background complex field simulation library.
//!
//! Main components:
//! - [`cell`] — per-cell field state.
//! - [`gravity`] — background gravity bias models.
//! - [`seed`] — initial field seeding from grid coordinates.
//! - [`stencil`] — one-cell evolution rules.
//! - [`color`] — polar colorization of field values.
//! - [`grid`] — grid topology and the double-buffered driver.
//! - [`config`] — global configuration for a simulation run.

pub mod cell;
pub mod color;
pub mod config;
pub mod gravity;
pub mod grid;
pub mod seed;
pub mod stencil;
