//! Addresses Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::accounts::models::{Address, AddressUpdate, AddressUuid, NewAddress, UserUuid};

const LIST_ADDRESSES_SQL: &str = include_str!("../sql/list_addresses.sql");
const CREATE_ADDRESS_SQL: &str = include_str!("../sql/create_address.sql");
const UPDATE_ADDRESS_SQL: &str = include_str!("../sql/update_address.sql");
const DEACTIVATE_ADDRESS_SQL: &str = include_str!("../sql/deactivate_address.sql");
const ADDRESS_IS_ACTIVE_SQL: &str = include_str!("../sql/address_is_active.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAddressesRepository;

impl PgAddressesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_addresses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
    ) -> Result<Vec<Address>, sqlx::Error> {
        query_as::<Postgres, Address>(LIST_ADDRESSES_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
        address: &NewAddress,
    ) -> Result<Address, sqlx::Error> {
        query_as::<Postgres, Address>(CREATE_ADDRESS_SQL)
            .bind(address.uuid.into_uuid())
            .bind(customer.into_uuid())
            .bind(&address.detail)
            .bind(&address.country)
            .bind(&address.region)
            .bind(&address.city)
            .bind(&address.postal_code)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
        address: AddressUuid,
        update: &AddressUpdate,
    ) -> Result<Address, sqlx::Error> {
        query_as::<Postgres, Address>(UPDATE_ADDRESS_SQL)
            .bind(address.into_uuid())
            .bind(customer.into_uuid())
            .bind(update.detail.as_deref())
            .bind(update.country.as_deref())
            .bind(update.region.as_deref())
            .bind(update.city.as_deref())
            .bind(update.postal_code.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn deactivate_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
        address: AddressUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DEACTIVATE_ADDRESS_SQL)
            .bind(address.into_uuid())
            .bind(customer.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn address_is_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
        address: AddressUuid,
    ) -> Result<bool, sqlx::Error> {
        let row = query_as::<Postgres, (bool,)>(ADDRESS_IS_ACTIVE_SQL)
            .bind(address.into_uuid())
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(row.0)
    }
}

impl<'r> FromRow<'r, PgRow> for Address {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            customer_uuid: row.try_get::<Uuid, _>("customer_uuid")?.into(),
            detail: row.try_get("detail")?,
            country: row.try_get("country")?,
            region: row.try_get("region")?,
            city: row.try_get("city")?,
            postal_code: row.try_get("postal_code")?,
            active: row.try_get("active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
