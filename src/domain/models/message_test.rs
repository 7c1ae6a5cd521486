use super::Author;
use super::Message;
use super::MessageType;

#[test]
fn it_executes_new() {
    let msg = Message::new(Author::Solace, "Hi there!");
    assert_eq!(msg.author, Author::Solace);
    assert_eq!(msg.author.to_string(), "Solace");
    assert_eq!(msg.text, "Hi there!".to_string());
    assert_eq!(msg.mtype, MessageType::Normal);
    assert_eq!(msg.language(), None);
}

#[test]
fn it_executes_new_replacing_tabs() {
    let msg = Message::new(Author::Solace, "\t\tHi there!");
    assert_eq!(msg.text, "    Hi there!".to_string());
}

#[test]
fn it_executes_new_with_type() {
    let msg = Message::new_with_type(Author::Solace, MessageType::Error, "It broke!");
    assert_eq!(msg.author, Author::Solace);
    assert_eq!(msg.text, "It broke!".to_string());
    assert_eq!(msg.mtype, MessageType::Error);
}

#[test]
fn it_executes_new_with_language() {
    let msg = Message::new_with_language(Author::Model, MessageType::Normal, "नमस्ते", "hi");
    assert_eq!(msg.author, Author::Model);
    assert_eq!(msg.text, "नमस्ते".to_string());
    assert_eq!(msg.language(), Some("hi"));
}

#[test]
fn it_executes_new_with_language_crisis() {
    let msg = Message::new_with_language(
        Author::Model,
        MessageType::Crisis,
        "You are not alone.",
        "en",
    );
    assert_eq!(msg.message_type(), MessageType::Crisis);
    assert_eq!(msg.language(), Some("en"));
}

#[test]
fn it_executes_message_type() {
    let msg = Message::new_with_type(Author::Solace, MessageType::Error, "It broke!");
    assert_eq!(msg.message_type(), MessageType::Error);
}
