use super::*;

fn reply(message: &str, suggestions: &[&str]) -> ChatReply {
    ChatReply {
        message: message.to_owned(),
        session_id: "sess-1".to_owned(),
        products: Vec::new(),
        suggestions: suggestions.iter().map(|s| (*s).to_owned()).collect(),
        conversation_type: None,
    }
}

#[test]
fn welcome_opens_with_an_assistant_greeting_and_chips() {
    let state = ChatState::welcome();
    assert_eq!(state.entries.len(), 1);
    assert_eq!(state.entries[0].role, ChatRole::Assistant);
    assert!(!state.current_suggestions().is_empty());
    assert!(state.session_id.is_none());
}

#[test]
fn push_user_marks_the_conversation_pending() {
    let mut state = ChatState::welcome();
    state.push_user("show me laptops");

    assert!(state.pending);
    assert_eq!(state.entries.last().map(|e| e.role), Some(ChatRole::User));
    assert!(state.current_suggestions().is_empty());
}

#[test]
fn push_reply_adopts_the_server_session_id() {
    let mut state = ChatState::welcome();
    state.push_user("show me laptops");
    state.push_reply(reply("Here are some laptops", &["Under $500?"]));

    assert!(!state.pending);
    assert_eq!(state.session_id.as_deref(), Some("sess-1"));
    assert_eq!(state.current_suggestions(), vec!["Under $500?".to_owned()]);
}
