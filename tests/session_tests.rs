//! Tests for conversation state and the session store.

use pretty_assertions::assert_eq;
use tangent::error::TangentError;
use tangent::session::{Conversation, InMemorySessionStore, SessionGate, SessionStore};
use tangent::types::{Message, ToolCall};

#[tokio::test]
async fn load_unseen_id_returns_empty_conversation() {
    let store = InMemorySessionStore::new();
    let conversation = store.load("never-seen").await;
    assert!(conversation.is_empty());
    // Loading must not implicitly create stored state.
    assert!(store.session_ids().await.is_empty());
}

#[tokio::test]
async fn save_load_roundtrip_preserves_order() {
    let store = InMemorySessionStore::new();
    let mut conversation = Conversation::new();
    conversation.append(Message::user("first"));
    conversation.append(Message::assistant("second"));
    conversation.append(Message::user("third"));
    store.save("s", &conversation).await.unwrap();

    let loaded = store.load("s").await;
    assert_eq!(loaded, conversation);
    let texts: Vec<String> = loaded.messages().iter().map(|m| m.text()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn save_overwrites_not_merges() {
    let store = InMemorySessionStore::new();
    let mut long = Conversation::new();
    long.append(Message::user("a"));
    long.append(Message::assistant("b"));
    store.save("s", &long).await.unwrap();

    let mut short = Conversation::new();
    short.append(Message::user("only"));
    store.save("s", &short).await.unwrap();

    let loaded = store.load("s").await;
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.messages()[0].text(), "only");
}

#[tokio::test]
async fn sessions_are_isolated() {
    let store = InMemorySessionStore::new();
    let mut a = Conversation::new();
    a.append(Message::user("secret for A"));
    store.save("A", &a).await.unwrap();

    let b = store.load("B").await;
    assert!(b.is_empty());

    let mut b = Conversation::new();
    b.append(Message::user("B talks"));
    store.save("B", &b).await.unwrap();

    // A unchanged by B's traffic.
    let a_again = store.load("A").await;
    assert_eq!(a_again.len(), 1);
    assert_eq!(a_again.messages()[0].text(), "secret for A");
}

#[test]
fn append_returns_new_length() {
    let mut conversation = Conversation::new();
    assert_eq!(conversation.append(Message::user("one")), 1);
    assert_eq!(conversation.append(Message::assistant("two")), 2);
}

#[test]
fn conversation_serde_roundtrip_is_a_plain_list() {
    let mut conversation = Conversation::new();
    conversation.append(Message::user("hi"));
    conversation.append(Message::assistant("hello"));

    let json = serde_json::to_value(&conversation).unwrap();
    assert!(json.is_array(), "persistence layout is one list per session");
    let back: Conversation = serde_json::from_value(json).unwrap();
    assert_eq!(back, conversation);
}

#[test]
fn orphan_tool_results_detected() {
    let mut conversation = Conversation::new();
    conversation.append(Message::user("q"));
    conversation.append(Message::assistant_tool_calls(
        None,
        vec![ToolCall {
            id: "call_1".into(),
            name: "lookup".into(),
            arguments: serde_json::json!({}),
        }],
    ));
    conversation.append(Message::tool_result("call_1", serde_json::json!(1), false));
    assert!(conversation.orphan_tool_results().is_empty());

    // A result with no matching earlier call violates the invariant.
    conversation.append(Message::tool_result("call_2", serde_json::json!(2), false));
    assert_eq!(conversation.orphan_tool_results(), vec!["call_2".to_string()]);
}

#[test]
fn result_before_call_is_an_orphan() {
    let mut conversation = Conversation::new();
    conversation.append(Message::tool_result("call_1", serde_json::json!(1), false));
    conversation.append(Message::assistant_tool_calls(
        None,
        vec![ToolCall {
            id: "call_1".into(),
            name: "lookup".into(),
            arguments: serde_json::json!({}),
        }],
    ));
    assert_eq!(conversation.orphan_tool_results(), vec!["call_1".to_string()]);
}

#[test]
fn gate_rejects_second_claim_and_releases_on_drop() {
    let gate = SessionGate::new();
    let permit = gate.acquire("s").unwrap();

    let err = gate.acquire("s").unwrap_err();
    assert!(matches!(err, TangentError::SessionConflict { session_id } if session_id == "s"));

    // Distinct ids never contend.
    let _other = gate.acquire("t").unwrap();

    drop(permit);
    assert!(gate.acquire("s").is_ok());
}
