use super::wrap_lines;
use super::Message;
use super::Role;

#[test]
fn it_executes_new() {
    let msg = Message::new(Role::Assistant, "Hi there!");
    assert_eq!(msg.role, Role::Assistant);
    assert_eq!(msg.content, "Hi there!".to_string());
}

#[test]
fn it_keeps_content_verbatim() {
    let msg = Message::user("a\tb");
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.content, "a\tb".to_string());
}

#[test]
fn it_draws_tabs_as_spaces() {
    let msg = Message::user("\t\tHi there!");
    assert_eq!(msg.as_string_lines(50), vec!["    Hi there!"]);
}

#[test]
fn it_builds_system_turn() {
    let msg = Message::system("ALTAM is a helpful assistant.");
    assert_eq!(msg.role, Role::System);
    assert_eq!(msg.content, "ALTAM is a helpful assistant.");
}

#[test]
fn it_serializes_lowercase_roles() {
    let res = serde_json::to_string(&Message::assistant("Hello")).unwrap();
    assert_eq!(res, r#"{"role":"assistant","content":"Hello"}"#);
}

#[test]
fn it_wraps_long_lines() {
    let lines = wrap_lines("one two three four five", 11);
    assert_eq!(lines, vec!["one two", "three four", "five"]);
}

#[test]
fn it_keeps_blank_lines() {
    let lines = wrap_lines("first\n\nsecond", 50);
    assert_eq!(lines, vec!["first", " ", "second"]);
}

#[test]
fn it_does_not_split_single_long_words() {
    let lines = wrap_lines("supercalifragilistic", 5);
    assert_eq!(lines, vec!["supercalifragilistic"]);
}

#[test]
fn it_wraps_message_content() {
    let msg = Message::user("Hello there world");
    assert_eq!(msg.as_string_lines(12), vec!["Hello there", "world"]);
}

#[test]
fn it_names_roles_in_lowercase() {
    assert_eq!(Role::System.to_string(), "system");
    assert_eq!(Role::Assistant.to_string(), "assistant");
}
