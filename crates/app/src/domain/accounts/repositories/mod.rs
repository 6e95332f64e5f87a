//! Accounts Repositories

mod addresses;
mod payment_methods;
mod purchases;
mod users;

pub(crate) use addresses::PgAddressesRepository;
pub(crate) use payment_methods::PgPaymentMethodsRepository;
pub(crate) use purchases::PgPurchasesRepository;
pub(crate) use users::PgUsersRepository;
