//! Users Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::accounts::models::{CustomerAccount, CustomerProfile, User, UserUuid};

const CREATE_USER_SQL: &str = include_str!("../sql/create_user.sql");
const CREATE_CUSTOMER_PROFILE_SQL: &str = include_str!("../sql/create_customer_profile.sql");
const GET_CUSTOMER_ACCOUNT_SQL: &str = include_str!("../sql/get_customer_account.sql");
const LIST_ADMINISTRATORS_SQL: &str = include_str!("../sql/list_administrators.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[expect(clippy::too_many_arguments, reason = "flat column list for the insert")]
    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: UserUuid,
        email: &str,
        first_name: &str,
        last_name: &str,
        password_salt: &str,
        password_digest: &str,
        is_staff: bool,
        is_superuser: bool,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(CREATE_USER_SQL)
            .bind(uuid.into_uuid())
            .bind(email)
            .bind(first_name)
            .bind(last_name)
            .bind(password_salt)
            .bind(password_digest)
            .bind(is_staff)
            .bind(is_superuser)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_customer_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: &CustomerProfile,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_CUSTOMER_PROFILE_SQL)
            .bind(profile.user_uuid.into_uuid())
            .bind(&profile.document_id)
            .bind(SqlxDate::from(profile.birth_date))
            .bind(profile.receive_news)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_customer_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<CustomerAccount, sqlx::Error> {
        query_as::<Postgres, CustomerAccount>(GET_CUSTOMER_ACCOUNT_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_administrators(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<User>, sqlx::Error> {
        query_as::<Postgres, User>(LIST_ADMINISTRATORS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            email: row.try_get("email")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            is_active: row.try_get("is_active")?,
            is_staff: row.try_get("is_staff")?,
            is_superuser: row.try_get("is_superuser")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CustomerAccount {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let user = User::from_row(row)?;

        Ok(Self {
            profile: CustomerProfile {
                user_uuid: user.uuid,
                document_id: row.try_get("document_id")?,
                birth_date: row.try_get::<SqlxDate, _>("birth_date")?.to_jiff(),
                receive_news: row.try_get("receive_news")?,
            },
            user,
        })
    }
}
