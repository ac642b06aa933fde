//! # Mentorboard
//!
//! Admin backend for a mentorship platform: tasks, submission review,
//! mentors and the reference lists shown on student sign-up forms. Usable as
//! a standalone binary and as a library.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mentorboard::auth::JwtSigner;
//! use mentorboard::cache::MemoryCache;
//! use mentorboard::notify::LogNotifier;
//! use mentorboard::server::{AppState, create_router};
//! use mentorboard::service::AdminService;
//! use mentorboard::store::{SqliteStore, Store};
//!
//! let store = SqliteStore::new("./data/mentorboard.db")?;
//! store.initialize()?;
//!
//! let service = AdminService::new(
//!     Arc::new(store),
//!     Arc::new(MemoryCache::new()),
//!     Arc::new(LogNotifier),
//!     Arc::new(JwtSigner::new(b"change-me")?),
//! );
//! let router = create_router(Arc::new(AppState { service: Arc::new(service) }));
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): builds the `mentorboard` binary.

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod notify;
pub mod server;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod testing;
