//! Core library modules for the amelia application.
//!
//! ## Features
//!
//! - **Records**: field framework, generic record model, events and registrations
//! - **Console**: input boundary and the recursive menu engine
//! - **Reporting**: CSV registration report and event tables
//! - **Infrastructure**: configuration, data storage, messages
//!
//! ## Usage
//!
//! ```rust,no_run
//! use amelia::db::db::Db;
//! use amelia::libs::config::Config;
//! use amelia::libs::event::Event;
//! use amelia::libs::record::Model;
//!
//! let db = Db::new(&Config::read()?);
//! let mut event = Event::new();
//! event.set_data(&db, [
//!     ("name", "Spring Fair"),
//!     ("start_date", "2024-05-01"),
//!     ("end_date", "2024-05-02"),
//!     ("location", "Hall A"),
//!     ("description", "Annual fair"),
//! ])?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod console;
pub mod data_storage;
pub mod event;
pub mod export;
pub mod fields;
pub mod menu;
pub mod messages;
pub mod record;
pub mod registration;
pub mod view;
