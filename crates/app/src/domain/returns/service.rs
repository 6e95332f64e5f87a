//! Returns service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{error, warn};

use crate::{
    clock::Clock,
    database::Db,
    domain::{
        accounts::{PgPurchasesRepository, PgUsersRepository, models::UserUuid},
        catalog::PgCopiesRepository,
        orders::PgOrdersRepository,
        returns::{
            eligibility::{Eligibility, check_return_window},
            errors::ReturnsServiceError,
            models::{NewReturn, Return},
            receipt::{receipt_content, render_receipt_png},
            repository::PgReturnsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgReturnsService {
    db: Db,
    repository: PgReturnsRepository,
    orders_repository: PgOrdersRepository,
    copies_repository: PgCopiesRepository,
    users_repository: PgUsersRepository,
    purchases_repository: PgPurchasesRepository,
    clock: Arc<dyn Clock>,
}

impl PgReturnsService {
    #[must_use]
    pub fn new(db: Db, clock: Arc<dyn Clock>) -> Self {
        Self {
            db,
            repository: PgReturnsRepository::new(),
            orders_repository: PgOrdersRepository::new(),
            copies_repository: PgCopiesRepository::new(),
            users_repository: PgUsersRepository::new(),
            purchases_repository: PgPurchasesRepository::new(),
            clock,
        }
    }
}

#[async_trait]
impl ReturnsService for PgReturnsService {
    async fn request_return(
        &self,
        customer: UserUuid,
        request: NewReturn,
    ) -> Result<Return, ReturnsServiceError> {
        let mut tx = self.db.begin().await?;

        let copy = self
            .copies_repository
            .get_copy_with_title(&mut tx, request.copy_uuid)
            .await?
            .ok_or(ReturnsServiceError::NotFound)?;

        let order = self
            .orders_repository
            .find_order_for_customer_copy(&mut tx, customer, request.copy_uuid)
            .await?
            .ok_or(ReturnsServiceError::NotFound)?;

        let records = self
            .purchases_repository
            .list_purchase_records(&mut tx, customer)
            .await?;

        let now = self.clock.now();

        match check_return_window(&records, order, now) {
            Eligibility::Eligible => {}
            Eligibility::WindowClosed => return Err(ReturnsServiceError::Expired),
            Eligibility::MissingFromLog => {
                // The order tables know this purchase but the history log,
                // which decides eligibility, does not.
                warn!(
                    %customer,
                    %order,
                    "purchase history log diverges from order records"
                );

                return Err(ReturnsServiceError::Expired);
            }
        }

        let account = self
            .users_repository
            .get_customer_account(&mut tx, customer)
            .await?;

        let mut created = self
            .repository
            .create_return(
                &mut tx,
                request.uuid,
                customer,
                request.copy_uuid,
                request.cause,
                &request.reason,
                now,
            )
            .await?;

        // The return row is committed before receipt rendering: a receipt
        // failure must not discard the return.
        tx.commit().await?;

        let content = receipt_content(created.uuid, &account.user.email, &copy.title, now);

        match render_receipt_png(&content) {
            Ok(png) => {
                let mut tx = self.db.begin().await?;

                self.repository
                    .attach_receipt(&mut tx, created.uuid, &png)
                    .await?;

                tx.commit().await?;

                created.receipt_png = Some(png);
            }
            Err(receipt_error) => {
                error!(ret = %created.uuid, "receipt rendering failed: {receipt_error}");
            }
        }

        Ok(created)
    }

    async fn list_returns(&self, customer: UserUuid) -> Result<Vec<Return>, ReturnsServiceError> {
        let mut tx = self.db.begin().await?;

        let returns = self
            .repository
            .list_returns_for_customer(&mut tx, customer)
            .await?;

        tx.commit().await?;

        Ok(returns)
    }
}

#[automock]
#[async_trait]
pub trait ReturnsService: Send + Sync {
    /// Request a return for a purchased copy. Fails `NotFound` when the copy
    /// never appeared in the customer's orders and `Expired` when the
    /// purchase-history window has closed. The receipt QR is attached as a
    /// second step after the return is persisted.
    async fn request_return(
        &self,
        customer: UserUuid,
        request: NewReturn,
    ) -> Result<Return, ReturnsServiceError>;

    /// The customer's returns, newest first.
    async fn list_returns(&self, customer: UserUuid) -> Result<Vec<Return>, ReturnsServiceError>;
}
