//! Ticket pricing under log utility versus an approximate market price.
//!
//! `core` holds the pricing formulas and the seeded population simulation,
//! `render` turns their output into dark-mode aware SVG charts, and
//! `pipeline::run` wires the two together for the binary.

pub mod core;
pub mod error;
pub mod pipeline;
pub mod render;

pub use error::{Result, TicketError};
