//! # Borders Quiz Client Library
//!
//! Client-side coordination for the border-countries quiz: the player fills in
//! every country that borders a target country, and a remote authority checks
//! each answer and returns the updated game.
//!
//! ## Architecture Overview
//!
//! UI events flow through three pieces:
//!
//! ```text
//! UI events -> InputCoordinator (debounce) -> GameClient (requests) -> GameStore -> UI
//! ```
//!
//! ### Authority Is the Source of Truth
//! The client never judges answers. Every successful response replaces the
//! mirrored [`GameState`](borders_shared::GameState) wholesale, so there is no
//! merge logic; a failed request leaves the last good state in place.
//!
//! ### Debounced Typing, Immediate Commits
//! Keystrokes are held for a short quiet period in a single pending slot
//! shared by all fields. Each new update, typed or committed, cancels whatever
//! is still waiting there. Commits (Enter, picking a suggestion) bypass the
//! wait and return the authority's response directly. Requests that are
//! already on the wire are never cancelled; if two overlap, the later response
//! wins.
//!
//! ### Failures Become Signals
//! [`GameClient`](game::GameClient) operations never return errors. Failures
//! are logged and written to the `message` or `show_hint` signals for the UI to
//! display.
//!
//! ## Module Organization
//!
//! - [`store`]: observable [`Signal`](store::Signal) cells and the [`GameStore`](store::GameStore)
//! - [`input`]: the [`InputCoordinator`](input::InputCoordinator) pending-update slot
//! - [`network`]: the [`Authority`](network::Authority) trait and its HTTP implementation
//! - [`game`]: the [`GameClient`](game::GameClient) operations
//! - [`config`], [`error`]: settings and the request failure taxonomy
//! - [`command`], [`rendering`]: terminal front end helpers
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use borders_client::config::ClientConfig;
//! use borders_client::game::GameClient;
//! use borders_client::network::HttpAuthority;
//! use borders_client::store::GameStore;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), borders_client::error::ClientError> {
//! let config = ClientConfig::default();
//! let authority = Arc::new(HttpAuthority::new(&config.api_base)?);
//! let store = GameStore::new();
//! store.message.subscribe(|message: &String| println!("{}", message));
//!
//! let client = GameClient::new(authority, store, config);
//! client.get_current_game().await;
//! client.update_field(0, "Spa", false).await;
//! client.update_field(0, "Spain", true).await;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod network;
pub mod rendering;
pub mod store;
