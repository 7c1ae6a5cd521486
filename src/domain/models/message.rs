#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Author;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    Normal,
    Error,
    Crisis,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Message {
    pub author: Author,
    pub text: String,
    mtype: MessageType,
    language: Option<String>,
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        return Message {
            author: author.clone(),
            text: text.to_string().replace('\t', "  "),
            mtype: MessageType::Normal,
            language: None,
        };
    }

    pub fn new_with_type(author: Author, mtype: MessageType, text: &str) -> Message {
        return Message {
            author: author.clone(),
            text: text.to_string().replace('\t', "  "),
            mtype,
            language: None,
        };
    }

    pub fn new_with_language(
        author: Author,
        mtype: MessageType,
        text: &str,
        language: &str,
    ) -> Message {
        return Message {
            author: author.clone(),
            text: text.to_string().replace('\t', "  "),
            mtype,
            language: Some(language.to_string()),
        };
    }

    pub fn message_type(&self) -> MessageType {
        return self.mtype;
    }

    pub fn language(&self) -> Option<&str> {
        return self.language.as_deref();
    }
}
