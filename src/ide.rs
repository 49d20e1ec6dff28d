//! IDE features module.

pub mod backend;
mod handlers;
pub mod hover;
pub mod lookup;
pub mod state;
