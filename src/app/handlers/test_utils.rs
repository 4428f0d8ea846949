//! Shared test utilities for handler modules

#[cfg(test)]
pub fn create_test_state() -> crate::app::State {
    let mut state = crate::app::State::new().0;
    // Handler tests never hit the network
    state.api = None;
    state
}

#[cfg(test)]
pub fn state_with_rules(numbers: &[u32]) -> crate::app::State {
    use crate::core::test_helpers::detail_with_numbers;

    let mut state = create_test_state();
    state.editor.selected_zone = Some("LAN".to_string());
    state.editor.selected_name = Some("lan-wan".to_string());
    state
        .editor
        .apply_detail("lan-wan", detail_with_numbers(numbers));
    state
}
