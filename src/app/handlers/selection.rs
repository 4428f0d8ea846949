//! Zone and rule-set selection plus overview/detail loading
//!
//! Handles the message variants that move the editor between zones and
//! rule sets, and the completions of the async fetches they kick off.
//! Every detail fetch carries a token; completions for superseded fetches
//! are dropped so a slow response never overwrites a newer selection.

use crate::api::ApiClient;
use crate::app::{Banner, Message, State};
use crate::core::editor::{FetchRequest, Selection};
use crate::core::ruleset::{RuleSetDetail, ZoneSnapshot};
use iced::Task;
use uuid::Uuid;

/// Fires the zone overview request.
pub(crate) fn load_overview(api: ApiClient) -> Task<Message> {
    Task::perform(
        async move { api.fetch_overview().await.map_err(|e| e.to_string()) },
        Message::OverviewLoaded,
    )
}

/// Fires a detail request for one rule set, tagged with its fetch token.
pub(crate) fn fetch_detail(api: ApiClient, request: FetchRequest) -> Task<Message> {
    let FetchRequest { token, name } = request;
    let request_name = name.clone();
    Task::perform(
        async move {
            api.fetch_rule_set(&request_name)
                .await
                .map_err(|e| e.to_string())
        },
        move |result| Message::DetailLoaded {
            token,
            name: name.clone(),
            result,
        },
    )
}

/// Handles the refresh button: re-fetches the overview unless a reorder
/// is pending.
pub(crate) fn handle_refresh(state: &mut State) -> Task<Message> {
    let Some(api) = state.api_client() else {
        return Task::none();
    };
    if state.editor.store.is_dirty() {
        state.banner = Some(Banner::warning(
            "Save or discard the pending order before refreshing",
        ));
        return Task::none();
    }
    state.busy.overview = true;
    load_overview(api)
}

/// Handles overview completion: reconciles zones/membership and follows up
/// with a detail fetch when the selection survived.
pub(crate) fn handle_overview_loaded(
    state: &mut State,
    result: Result<ZoneSnapshot, String>,
) -> Task<Message> {
    state.busy.overview = false;
    match result {
        Ok(snapshot) => {
            if let Some(request) = state.editor.apply_zone_update(snapshot) {
                if let Some(api) = state.api_client() {
                    state.busy.detail = true;
                    return fetch_detail(api, request);
                }
            }
            Task::none()
        }
        Err(msg) => {
            state.banner = Some(Banner::from_api_error(&msg));
            Task::none()
        }
    }
}

/// Handles a zone click in the sidebar.
pub(crate) fn handle_zone_selected(state: &mut State, zone: String) -> Task<Message> {
    state.close_forms();
    match state.editor.select_zone(&zone) {
        Ok(Selection::Fetch(request)) => {
            if let Some(api) = state.api_client() {
                state.busy.detail = true;
                return fetch_detail(api, request);
            }
            Task::none()
        }
        Ok(Selection::Cleared) => Task::none(),
        Err(e) => {
            state.banner = Some(Banner::warning(e.to_string()));
            Task::none()
        }
    }
}

/// Handles a rule-set click in the sidebar.
pub(crate) fn handle_rule_set_selected(state: &mut State, name: String) -> Task<Message> {
    state.close_forms();
    let zone = state.editor.selected_zone.clone().unwrap_or_default();
    match state.editor.select_rule_set(&name, &zone) {
        Ok(request) => {
            if let Some(api) = state.api_client() {
                state.busy.detail = true;
                return fetch_detail(api, request);
            }
            Task::none()
        }
        Err(e) => {
            state.banner = Some(Banner::warning(e.to_string()));
            Task::none()
        }
    }
}

/// Handles detail completion. Stale tokens are dropped without touching
/// the store.
pub(crate) fn handle_detail_loaded(
    state: &mut State,
    token: Uuid,
    name: &str,
    result: Result<RuleSetDetail, String>,
) -> Task<Message> {
    if !state.editor.fetch_is_current(token) {
        tracing::debug!("Dropping superseded detail response for {}", name);
        return Task::none();
    }
    state.busy.detail = false;
    match result {
        Ok(detail) => state.editor.apply_detail(name, detail),
        Err(msg) => state.banner = Some(Banner::from_api_error(&msg)),
    }
    Task::none()
}
