use super::Message;

pub enum Event {
    ConversationMessage(Message),
}
