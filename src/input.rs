//! Input data parsed from translation files.

pub mod translation;
