use super::*;

#[test]
fn auth_state_default_is_anonymous() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(!state.is_authenticated());
}

#[test]
fn auth_state_with_user_is_authenticated() {
    let state = AuthState {
        user: Some(User {
            id: 1,
            username: "ada".to_owned(),
            email: "ada@example.com".to_owned(),
            created_at: None,
        }),
        loading: false,
    };
    assert!(state.is_authenticated());
}
