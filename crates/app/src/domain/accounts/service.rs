//! Accounts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::{generate_password_salt, hash_password},
    database::Db,
    domain::accounts::{
        errors::AccountsServiceError,
        models::{
            Address, AddressUpdate, AddressUuid, CustomerAccount, CustomerProfile, NewAddress,
            NewAdministrator, NewCustomer, NewPaymentMethod, PaymentMethod, PaymentMethodUuid,
            PurchaseRecord, User, UserUuid,
        },
        repositories::{
            PgAddressesRepository, PgPaymentMethodsRepository, PgPurchasesRepository,
            PgUsersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgAccountsService {
    db: Db,
    users_repository: PgUsersRepository,
    addresses_repository: PgAddressesRepository,
    payment_methods_repository: PgPaymentMethodsRepository,
    purchases_repository: PgPurchasesRepository,
}

impl PgAccountsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            users_repository: PgUsersRepository::new(),
            addresses_repository: PgAddressesRepository::new(),
            payment_methods_repository: PgPaymentMethodsRepository::new(),
            purchases_repository: PgPurchasesRepository::new(),
        }
    }
}

#[async_trait]
impl AccountsService for PgAccountsService {
    async fn register_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerAccount, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let salt = generate_password_salt();
        let digest = hash_password(&salt, &customer.password);

        let user = self
            .users_repository
            .create_user(
                &mut tx,
                customer.uuid,
                &customer.email,
                &customer.first_name,
                &customer.last_name,
                &salt,
                &digest,
                false,
                false,
            )
            .await?;

        let profile = CustomerProfile {
            user_uuid: user.uuid,
            document_id: customer.document_id,
            birth_date: customer.birth_date,
            receive_news: customer.receive_news,
        };

        self.users_repository
            .create_customer_profile(&mut tx, &profile)
            .await?;

        tx.commit().await?;

        Ok(CustomerAccount { user, profile })
    }

    async fn create_administrator(
        &self,
        administrator: NewAdministrator,
    ) -> Result<User, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let salt = generate_password_salt();
        let digest = hash_password(&salt, &administrator.password);

        let user = self
            .users_repository
            .create_user(
                &mut tx,
                administrator.uuid,
                &administrator.email,
                &administrator.first_name,
                &administrator.last_name,
                &salt,
                &digest,
                true,
                false,
            )
            .await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn create_root(
        &self,
        root: NewAdministrator,
    ) -> Result<User, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let salt = generate_password_salt();
        let digest = hash_password(&salt, &root.password);

        let user = self
            .users_repository
            .create_user(
                &mut tx,
                root.uuid,
                &root.email,
                &root.first_name,
                &root.last_name,
                &salt,
                &digest,
                true,
                true,
            )
            .await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn list_administrators(&self) -> Result<Vec<User>, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let administrators = self.users_repository.list_administrators(&mut tx).await?;

        tx.commit().await?;

        Ok(administrators)
    }

    async fn get_customer_account(
        &self,
        customer: UserUuid,
    ) -> Result<CustomerAccount, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let account = self
            .users_repository
            .get_customer_account(&mut tx, customer)
            .await?;

        tx.commit().await?;

        Ok(account)
    }

    async fn list_addresses(
        &self,
        customer: UserUuid,
    ) -> Result<Vec<Address>, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let addresses = self
            .addresses_repository
            .list_addresses(&mut tx, customer)
            .await?;

        tx.commit().await?;

        Ok(addresses)
    }

    async fn create_address(
        &self,
        customer: UserUuid,
        address: NewAddress,
    ) -> Result<Address, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .addresses_repository
            .create_address(&mut tx, customer, &address)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_address(
        &self,
        customer: UserUuid,
        address: AddressUuid,
        update: AddressUpdate,
    ) -> Result<Address, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .addresses_repository
            .update_address(&mut tx, customer, address, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn deactivate_address(
        &self,
        customer: UserUuid,
        address: AddressUuid,
    ) -> Result<(), AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .addresses_repository
            .deactivate_address(&mut tx, customer, address)
            .await?;

        if rows_affected == 0 {
            return Err(AccountsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_payment_methods(
        &self,
        customer: UserUuid,
    ) -> Result<Vec<PaymentMethod>, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let methods = self
            .payment_methods_repository
            .list_payment_methods(&mut tx, customer)
            .await?;

        tx.commit().await?;

        Ok(methods)
    }

    async fn create_payment_method(
        &self,
        customer: UserUuid,
        method: NewPaymentMethod,
    ) -> Result<PaymentMethod, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .payment_methods_repository
            .create_payment_method(&mut tx, customer, &method)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn deactivate_payment_method(
        &self,
        customer: UserUuid,
        method: PaymentMethodUuid,
    ) -> Result<(), AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .payment_methods_repository
            .deactivate_payment_method(&mut tx, customer, method)
            .await?;

        if rows_affected == 0 {
            return Err(AccountsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_purchases(
        &self,
        customer: UserUuid,
    ) -> Result<Vec<PurchaseRecord>, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let purchases = self
            .purchases_repository
            .list_purchase_records(&mut tx, customer)
            .await?;

        tx.commit().await?;

        Ok(purchases)
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Create a customer account with its profile.
    async fn register_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerAccount, AccountsServiceError>;

    /// Create a staff account. Root-only; the HTTP layer enforces the role.
    async fn create_administrator(
        &self,
        administrator: NewAdministrator,
    ) -> Result<User, AccountsServiceError>;

    /// Create the superuser account; used by the operator CLI at bootstrap.
    async fn create_root(&self, root: NewAdministrator) -> Result<User, AccountsServiceError>;

    /// All staff accounts. Root-only.
    async fn list_administrators(&self) -> Result<Vec<User>, AccountsServiceError>;

    /// A customer's user row plus profile.
    async fn get_customer_account(
        &self,
        customer: UserUuid,
    ) -> Result<CustomerAccount, AccountsServiceError>;

    /// Active addresses owned by the customer.
    async fn list_addresses(&self, customer: UserUuid)
    -> Result<Vec<Address>, AccountsServiceError>;

    /// Add an address.
    async fn create_address(
        &self,
        customer: UserUuid,
        address: NewAddress,
    ) -> Result<Address, AccountsServiceError>;

    /// Patch an active owned address.
    async fn update_address(
        &self,
        customer: UserUuid,
        address: AddressUuid,
        update: AddressUpdate,
    ) -> Result<Address, AccountsServiceError>;

    /// Soft-delete an owned address.
    async fn deactivate_address(
        &self,
        customer: UserUuid,
        address: AddressUuid,
    ) -> Result<(), AccountsServiceError>;

    /// Active payment methods owned by the customer.
    async fn list_payment_methods(
        &self,
        customer: UserUuid,
    ) -> Result<Vec<PaymentMethod>, AccountsServiceError>;

    /// Register a payment method.
    async fn create_payment_method(
        &self,
        customer: UserUuid,
        method: NewPaymentMethod,
    ) -> Result<PaymentMethod, AccountsServiceError>;

    /// Soft-delete an owned payment method.
    async fn deactivate_payment_method(
        &self,
        customer: UserUuid,
        method: PaymentMethodUuid,
    ) -> Result<(), AccountsServiceError>;

    /// The customer's append-only purchase history, newest first.
    async fn list_purchases(
        &self,
        customer: UserUuid,
    ) -> Result<Vec<PurchaseRecord>, AccountsServiceError>;
}
