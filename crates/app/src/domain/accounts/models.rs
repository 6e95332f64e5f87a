//! Account Models

use jiff::{Timestamp, civil::Date};
use uuid::Uuid;

use crate::{domain::orders::models::OrderUuid, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// Address UUID
pub type AddressUuid = TypedUuid<Address>;

/// Payment Method UUID
pub type PaymentMethodUuid = TypedUuid<PaymentMethod>;

/// Purchase Record UUID
pub type PurchaseRecordUuid = TypedUuid<PurchaseRecord>;

/// User Model
#[derive(Debug, Clone)]
pub struct User {
    pub uuid: UserUuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: Timestamp,
}

/// Customer profile fields attached to a user.
#[derive(Debug, Clone)]
pub struct CustomerProfile {
    pub user_uuid: UserUuid,
    pub document_id: String,
    pub birth_date: Date,
    pub receive_news: bool,
}

/// Customer account: user plus profile.
#[derive(Debug, Clone)]
pub struct CustomerAccount {
    pub user: User,
    pub profile: CustomerProfile,
}

/// New customer registration payload (raw password; the service salts and
/// digests it before persistence).
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub uuid: UserUuid,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub document_id: String,
    pub birth_date: Date,
    pub receive_news: bool,
}

/// New administrator payload; only root may submit one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAdministrator {
    pub uuid: UserUuid,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Address Model
#[derive(Debug, Clone)]
pub struct Address {
    pub uuid: AddressUuid,
    pub customer_uuid: UserUuid,
    pub detail: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub postal_code: String,
    pub active: bool,
    pub created_at: Timestamp,
}

/// New Address Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewAddress {
    pub uuid: AddressUuid,
    pub detail: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub postal_code: String,
}

/// Partial address update; absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressUpdate {
    pub detail: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
}

/// Payment Method Model
#[derive(Debug, Clone)]
pub struct PaymentMethod {
    pub uuid: PaymentMethodUuid,
    pub customer_uuid: UserUuid,
    pub card_number: String,
    pub holder_name: String,
    pub expires: Date,
    pub active: bool,
    pub created_at: Timestamp,
}

impl PaymentMethod {
    /// Last four digits for display; the full number never leaves the API.
    #[must_use]
    pub fn masked_number(&self) -> String {
        let last4: String = self
            .card_number
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();

        format!("**** **** **** {last4}")
    }
}

/// New Payment Method Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewPaymentMethod {
    pub uuid: PaymentMethodUuid,
    pub card_number: String,
    pub holder_name: String,
    pub expires: Date,
}

/// Append-only purchase-history entry, kept per customer and separate from
/// the order tables. Return eligibility reads this log.
#[derive(Debug, Clone)]
pub struct PurchaseRecord {
    pub uuid: PurchaseRecordUuid,
    pub customer_uuid: UserUuid,
    pub order_uuid: OrderUuid,
    pub total: u64,
    pub purchased_at: Timestamp,
    pub address_uuid: AddressUuid,
    pub payment_method_uuid: PaymentMethodUuid,
    pub copy_codes: Vec<Uuid>,
}
