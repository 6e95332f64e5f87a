//! Support Models

use jiff::Timestamp;

use crate::{domain::accounts::models::UserUuid, uuids::TypedUuid};

/// Support Message UUID
pub type MessageUuid = TypedUuid<SupportMessage>;

/// Message Reply UUID
pub type ReplyUuid = TypedUuid<MessageReply>;

/// A customer's message on the support board.
#[derive(Debug, Clone)]
pub struct SupportMessage {
    pub uuid: MessageUuid,
    pub customer_uuid: UserUuid,
    pub customer_email: String,
    pub body: String,
    pub created_at: Timestamp,
    pub replies: Vec<MessageReply>,
}

/// An administrator's reply to a message.
#[derive(Debug, Clone)]
pub struct MessageReply {
    pub uuid: ReplyUuid,
    pub message_uuid: MessageUuid,
    pub administrator_uuid: UserUuid,
    pub body: String,
    pub created_at: Timestamp,
}

/// New Support Message Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewSupportMessage {
    pub uuid: MessageUuid,
    pub body: String,
}

/// New Message Reply Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessageReply {
    pub uuid: ReplyUuid,
    pub body: String,
}
