//! Game operations against the authority, reconciled into the [`GameStore`].
//!
//! Every operation swallows its own failures: the error is logged and turned
//! into a user-facing string on `message` (or `show_hint`), and the caller gets
//! `None`/an empty value back. The game state is only ever replaced wholesale
//! by a successful response, so a failure always leaves the last good state.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::input::InputCoordinator;
use crate::network::Authority;
use crate::store::{GameStore, LoadingGuard};
use borders_shared::{
    GameState, SuggestionsRequest, UpdateFieldRequest, UpdateFieldResponse, NO_HINT_AVAILABLE,
};
use log::{debug, error, info, warn};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tokio::time::sleep;

#[derive(Clone)]
pub struct GameClient {
    authority: Arc<dyn Authority>,
    store: GameStore,
    coordinator: InputCoordinator,
    config: ClientConfig,
}

impl GameClient {
    pub fn new(authority: Arc<dyn Authority>, store: GameStore, config: ClientConfig) -> Self {
        Self {
            authority,
            store,
            coordinator: InputCoordinator::new(),
            config,
        }
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    pub fn coordinator(&self) -> &InputCoordinator {
        &self.coordinator
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Starts a fresh game and returns its state, or `None` on failure.
    ///
    /// `is_loading` goes true and `message`/`show_hint` are cleared as soon as
    /// this is called, before the returned future is polled. The loading flag
    /// is released when the future completes or is dropped.
    pub fn start_new_game(&self) -> impl Future<Output = Option<GameState>> + Send + '_ {
        let loading = LoadingGuard::acquire(&self.store.is_loading);
        self.store.message.set(String::new());
        self.store.show_hint.set(String::new());

        async move {
            let _loading = loading;

            match self.authority.start_game().await {
                Ok(envelope) => {
                    let state = envelope.game_state;
                    info!(
                        "New game: {} ({} bordering countries)",
                        state.target_country, state.total_fields
                    );
                    let message = format!(
                        "Fill in all {} countries that border {}!",
                        state.total_fields, state.target_country
                    );
                    self.store.game_state.set(state.clone());
                    self.store.message.set(message);
                    Some(state)
                }
                Err(err) => {
                    error!("Failed to start game: {}", err);
                    self.store
                        .message
                        .set(format!("Error starting game: {}", err));
                    None
                }
            }
        }
    }

    /// Submits `country_name` for `field_id`.
    ///
    /// Any update still waiting out its debounce is cancelled immediately, for
    /// whichever field it was. With `immediate` the update is sent right away
    /// and its response returned. Otherwise it is scheduled for after the
    /// debounce delay and the returned future resolves to `None` at once; the
    /// outcome only shows up in the store.
    pub fn update_field(
        &self,
        field_id: u32,
        country_name: &str,
        immediate: bool,
    ) -> impl Future<Output = Option<UpdateFieldResponse>> + Send + '_ {
        let request = UpdateFieldRequest {
            field_id,
            country_name: country_name.to_string(),
        };

        // Scheduling replaces the slot itself; only the bypass clears it here.
        let request = if immediate {
            self.coordinator.cancel_pending();
            Some(request)
        } else {
            debug!("Debouncing update for field {}", field_id);
            let client = self.clone();
            self.coordinator
                .schedule(self.config.debounce_delay, async move {
                    client.perform_update(request).await;
                });
            None
        };

        async move {
            match request {
                Some(request) => self.perform_update(request).await,
                None => None,
            }
        }
    }

    async fn perform_update(&self, request: UpdateFieldRequest) -> Option<UpdateFieldResponse> {
        match self.authority.update_field(&request).await {
            Ok(response) => {
                self.store.game_state.set(response.game_state.clone());

                // A blank submission means the player cleared the field.
                if request.country_name.trim().is_empty() {
                    self.store.message.set(String::new());
                } else {
                    self.store.message.set(response.message.clone());
                }
                Some(response)
            }
            Err(err) => {
                warn!("Failed to update field {}: {}", request.field_id, err);
                self.store
                    .message
                    .set(format!("Error updating field: {}", err));
                None
            }
        }
    }

    /// Restores the authority's current game, starting a new one if there is none.
    pub async fn get_current_game(&self) -> Option<GameState> {
        match self.authority.current_game().await {
            Ok(envelope) => {
                let state = envelope.game_state;
                self.store.game_state.set(state.clone());
                Some(state)
            }
            Err(ClientError::NotFound { .. }) => {
                info!("No active game, starting a new one");
                self.start_new_game().await
            }
            Err(err) => {
                error!("Failed to get current game: {}", err);
                self.store
                    .message
                    .set(format!("Error getting game state: {}", err));
                None
            }
        }
    }

    /// Shows a hint for the hint-clear delay. Falls back to a fixed text on failure.
    pub async fn get_hint(&self) -> Option<String> {
        match self.authority.hint().await {
            Ok(response) => {
                self.store.show_hint.set(response.hint.clone());

                let show_hint = self.store.show_hint.clone();
                let delay = self.config.hint_clear_delay;
                tokio::spawn(async move {
                    sleep(delay).await;
                    show_hint.set(String::new());
                });

                Some(response.hint)
            }
            Err(err) => {
                warn!("Failed to get hint: {}", err);
                self.store.show_hint.set(NO_HINT_AVAILABLE.to_string());
                None
            }
        }
    }

    /// Fetches the full solution. The game state is left as it is.
    pub async fn reveal_answers(&self) -> Option<Value> {
        match self.authority.reveal().await {
            Ok(response) => Some(response.revealed_answers),
            Err(err) => {
                error!("Failed to reveal answers: {}", err);
                self.store
                    .message
                    .set(format!("Error revealing answers: {}", err));
                None
            }
        }
    }

    /// Country names matching `query`, for autocomplete. Empty on failure.
    pub async fn get_suggestions(&self, query: &str, limit: Option<u32>) -> Vec<String> {
        let request = SuggestionsRequest {
            query: query.to_string(),
            limit,
        };

        match self.authority.suggestions(&request).await {
            Ok(response) => response.suggestions,
            Err(err) => {
                warn!("Failed to get suggestions for {:?}: {}", query, err);
                Vec::new()
            }
        }
    }
}
