//! # Amelia - events and registrations administration
//!
//! A console tool for managing events and the registrations collected for
//! them, backed by a single SQLite file.
//!
//! ## Features
//!
//! - **Record Model**: typed fields with validation, persisted through
//!   transactional database sessions
//! - **Admin Menu**: nested console menus to add, browse, edit and delete records
//! - **Reports**: CSV export of all registrations
//!
//! ## Usage
//!
//! ```rust,no_run
//! use amelia::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
