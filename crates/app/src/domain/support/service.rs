//! Support service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        accounts::models::UserUuid,
        support::{
            errors::SupportServiceError,
            models::{
                MessageReply, MessageUuid, NewMessageReply, NewSupportMessage, SupportMessage,
            },
            repository::PgSupportRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgSupportService {
    db: Db,
    repository: PgSupportRepository,
}

impl PgSupportService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSupportRepository::new(),
        }
    }

    async fn attach_replies(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        mut messages: Vec<SupportMessage>,
    ) -> Result<Vec<SupportMessage>, SupportServiceError> {
        for message in &mut messages {
            message.replies = self
                .repository
                .get_replies_for_message(tx, message.uuid)
                .await?;
        }

        Ok(messages)
    }
}

#[async_trait]
impl SupportService for PgSupportService {
    async fn post_message(
        &self,
        customer: UserUuid,
        message: NewSupportMessage,
    ) -> Result<SupportMessage, SupportServiceError> {
        if message.body.trim().is_empty() {
            return Err(SupportServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_message(&mut tx, customer, &message)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_messages(&self) -> Result<Vec<SupportMessage>, SupportServiceError> {
        let mut tx = self.db.begin().await?;

        let messages = self.repository.list_messages(&mut tx).await?;
        let messages = self.attach_replies(&mut tx, messages).await?;

        tx.commit().await?;

        Ok(messages)
    }

    async fn list_messages_for_customer(
        &self,
        customer: UserUuid,
    ) -> Result<Vec<SupportMessage>, SupportServiceError> {
        let mut tx = self.db.begin().await?;

        let messages = self
            .repository
            .list_messages_for_customer(&mut tx, customer)
            .await?;
        let messages = self.attach_replies(&mut tx, messages).await?;

        tx.commit().await?;

        Ok(messages)
    }

    async fn get_message(
        &self,
        message: MessageUuid,
    ) -> Result<SupportMessage, SupportServiceError> {
        let mut tx = self.db.begin().await?;

        let mut found = self
            .repository
            .get_message(&mut tx, message)
            .await?
            .ok_or(SupportServiceError::NotFound)?;

        found.replies = self
            .repository
            .get_replies_for_message(&mut tx, found.uuid)
            .await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn reply_to_message(
        &self,
        administrator: UserUuid,
        message: MessageUuid,
        reply: NewMessageReply,
    ) -> Result<MessageReply, SupportServiceError> {
        if reply.body.trim().is_empty() {
            return Err(SupportServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        if self.repository.get_message(&mut tx, message).await?.is_none() {
            return Err(SupportServiceError::NotFound);
        }

        let created = self
            .repository
            .create_reply(&mut tx, message, administrator, &reply)
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait SupportService: Send + Sync {
    /// Post a customer message to the board.
    async fn post_message(
        &self,
        customer: UserUuid,
        message: NewSupportMessage,
    ) -> Result<SupportMessage, SupportServiceError>;

    /// Every message with replies, for administrators.
    async fn list_messages(&self) -> Result<Vec<SupportMessage>, SupportServiceError>;

    /// The customer's own messages with replies.
    async fn list_messages_for_customer(
        &self,
        customer: UserUuid,
    ) -> Result<Vec<SupportMessage>, SupportServiceError>;

    /// One message with replies. Ownership is checked by the caller.
    async fn get_message(&self, message: MessageUuid)
    -> Result<SupportMessage, SupportServiceError>;

    /// Administrator reply to an existing message.
    async fn reply_to_message(
        &self,
        administrator: UserUuid,
        message: MessageUuid,
        reply: NewMessageReply,
    ) -> Result<MessageReply, SupportServiceError>;
}
