use super::*;

#[test]
fn notices_accumulate_in_order() {
    let mut state = UiState::default();
    state.push_success("Order placed successfully!");
    state.push_error("Failed to place order. Please try again.");

    assert_eq!(state.notices.len(), 2);
    assert_eq!(state.notices[0].kind, NoticeKind::Success);
    assert_eq!(state.notices[1].kind, NoticeKind::Error);
}

#[test]
fn dismiss_removes_only_the_matching_notice() {
    let mut state = UiState::default();
    state.push_success("one");
    state.push_success("two");

    let first = state.notices[0].id.clone();
    state.dismiss(&first);

    assert_eq!(state.notices.len(), 1);
    assert_eq!(state.notices[0].text, "two");
}
