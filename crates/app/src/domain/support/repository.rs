//! Support Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    accounts::models::UserUuid,
    support::models::{
        MessageReply, MessageUuid, NewMessageReply, NewSupportMessage, SupportMessage,
    },
};

const CREATE_MESSAGE_SQL: &str = include_str!("sql/create_message.sql");
const LIST_MESSAGES_SQL: &str = include_str!("sql/list_messages.sql");
const LIST_MESSAGES_FOR_CUSTOMER_SQL: &str = include_str!("sql/list_messages_for_customer.sql");
const GET_MESSAGE_SQL: &str = include_str!("sql/get_message.sql");
const CREATE_REPLY_SQL: &str = include_str!("sql/create_reply.sql");
const GET_REPLIES_FOR_MESSAGE_SQL: &str = include_str!("sql/get_replies_for_message.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSupportRepository;

impl PgSupportRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_message(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
        message: &NewSupportMessage,
    ) -> Result<SupportMessage, sqlx::Error> {
        query_as::<Postgres, SupportMessage>(CREATE_MESSAGE_SQL)
            .bind(message.uuid.into_uuid())
            .bind(customer.into_uuid())
            .bind(&message.body)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_messages(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<SupportMessage>, sqlx::Error> {
        query_as::<Postgres, SupportMessage>(LIST_MESSAGES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_messages_for_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
    ) -> Result<Vec<SupportMessage>, sqlx::Error> {
        query_as::<Postgres, SupportMessage>(LIST_MESSAGES_FOR_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_message(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        message: MessageUuid,
    ) -> Result<Option<SupportMessage>, sqlx::Error> {
        query_as::<Postgres, SupportMessage>(GET_MESSAGE_SQL)
            .bind(message.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_reply(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        message: MessageUuid,
        administrator: UserUuid,
        reply: &NewMessageReply,
    ) -> Result<MessageReply, sqlx::Error> {
        query_as::<Postgres, MessageReply>(CREATE_REPLY_SQL)
            .bind(reply.uuid.into_uuid())
            .bind(message.into_uuid())
            .bind(administrator.into_uuid())
            .bind(&reply.body)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_replies_for_message(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        message: MessageUuid,
    ) -> Result<Vec<MessageReply>, sqlx::Error> {
        query_as::<Postgres, MessageReply>(GET_REPLIES_FOR_MESSAGE_SQL)
            .bind(message.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for SupportMessage {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            customer_uuid: row.try_get::<Uuid, _>("customer_uuid")?.into(),
            customer_email: row.try_get("customer_email")?,
            body: row.try_get("body")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            replies: Vec::new(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for MessageReply {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            message_uuid: row.try_get::<Uuid, _>("message_uuid")?.into(),
            administrator_uuid: row.try_get::<Uuid, _>("administrator_uuid")?.into(),
            body: row.try_get("body")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
