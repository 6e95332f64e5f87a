//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use octavo_app::{
    auth::{AuthenticatedUser, MockAuthService, Role},
    context::AppContext,
    domain::{
        accounts::{MockAccountsService, models::UserUuid},
        carts::MockCartsService,
        catalog::MockCatalogService,
        orders::MockOrdersService,
        reservations::MockReservationsService,
        returns::MockReturnsService,
        support::MockSupportService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_CUSTOMER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) fn test_customer() -> AuthenticatedUser {
    AuthenticatedUser {
        uuid: TEST_CUSTOMER_UUID,
        email: "reader@example.com".to_string(),
        role: Role::Customer,
    }
}

pub(crate) fn test_administrator() -> AuthenticatedUser {
    AuthenticatedUser {
        uuid: UserUuid::from_uuid(Uuid::from_u128(1)),
        email: "staff@example.com".to_string(),
        role: Role::Administrator,
    }
}

pub(crate) fn test_root() -> AuthenticatedUser {
    AuthenticatedUser {
        uuid: UserUuid::from_uuid(Uuid::from_u128(2)),
        email: "root@example.com".to_string(),
        role: Role::Root,
    }
}

/// Middleware stand-in that injects a fixed identity.
pub(crate) struct InjectIdentity(pub(crate) AuthenticatedUser);

#[salvo::async_trait]
impl Handler for InjectIdentity {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_authenticated_user(self.0.clone());
        ctrl.call_next(req, depot, res).await;
    }
}

/// Mock services with no expectations: any call panics the test.
fn base_app_context() -> AppContext {
    AppContext {
        auth: Arc::new(MockAuthService::new()),
        accounts: Arc::new(MockAccountsService::new()),
        catalog: Arc::new(MockCatalogService::new()),
        carts: Arc::new(MockCartsService::new()),
        reservations: Arc::new(MockReservationsService::new()),
        orders: Arc::new(MockOrdersService::new()),
        returns: Arc::new(MockReturnsService::new()),
        support: Arc::new(MockSupportService::new()),
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    let mut app = base_app_context();
    app.auth = Arc::new(auth);
    Arc::new(State::new(app))
}

pub(crate) fn state_with_accounts(accounts: MockAccountsService) -> Arc<State> {
    let mut app = base_app_context();
    app.accounts = Arc::new(accounts);
    Arc::new(State::new(app))
}

pub(crate) fn state_with_catalog(catalog: MockCatalogService) -> Arc<State> {
    let mut app = base_app_context();
    app.catalog = Arc::new(catalog);
    Arc::new(State::new(app))
}

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    let mut app = base_app_context();
    app.carts = Arc::new(carts);
    Arc::new(State::new(app))
}

pub(crate) fn state_with_reservations(reservations: MockReservationsService) -> Arc<State> {
    let mut app = base_app_context();
    app.reservations = Arc::new(reservations);
    Arc::new(State::new(app))
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    let mut app = base_app_context();
    app.orders = Arc::new(orders);
    Arc::new(State::new(app))
}

pub(crate) fn state_with_returns(returns: MockReturnsService) -> Arc<State> {
    let mut app = base_app_context();
    app.returns = Arc::new(returns);
    Arc::new(State::new(app))
}

pub(crate) fn state_with_support(support: MockSupportService) -> Arc<State> {
    let mut app = base_app_context();
    app.support = Arc::new(support);
    Arc::new(State::new(app))
}

/// Build a service with the given state, a fixed identity, and a route.
pub(crate) fn authed_service(
    state: Arc<State>,
    identity: AuthenticatedUser,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(InjectIdentity(identity))
            .push(route),
    )
}

pub(crate) fn service_with_auth(auth: MockAuthService, route: Router) -> Service {
    authed_service(state_with_auth(auth), test_customer(), route)
}

pub(crate) fn service_with_accounts(accounts: MockAccountsService, route: Router) -> Service {
    authed_service(state_with_accounts(accounts), test_customer(), route)
}

pub(crate) fn service_with_catalog(catalog: MockCatalogService, route: Router) -> Service {
    authed_service(state_with_catalog(catalog), test_customer(), route)
}

pub(crate) fn service_with_carts(carts: MockCartsService, route: Router) -> Service {
    authed_service(state_with_carts(carts), test_customer(), route)
}

pub(crate) fn service_with_reservations(
    reservations: MockReservationsService,
    route: Router,
) -> Service {
    authed_service(state_with_reservations(reservations), test_customer(), route)
}

pub(crate) fn service_with_orders(orders: MockOrdersService, route: Router) -> Service {
    authed_service(state_with_orders(orders), test_customer(), route)
}

pub(crate) fn service_with_returns(returns: MockReturnsService, route: Router) -> Service {
    authed_service(state_with_returns(returns), test_customer(), route)
}

pub(crate) fn service_with_support(support: MockSupportService, route: Router) -> Service {
    authed_service(state_with_support(support), test_customer(), route)
}
