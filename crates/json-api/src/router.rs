//! App Router

use salvo::Router;

use crate::{accounts, auth, carts, catalog, orders, reservations, returns, support};

pub(crate) fn app_router() -> Router {
    Router::new()
        // Public surface: registration, login, and catalog browsing.
        .push(
            Router::with_path("auth")
                .push(Router::with_path("register").post(auth::handlers::register::handler))
                .push(Router::with_path("login").post(auth::handlers::login::handler)),
        )
        .push(
            Router::with_path("catalog")
                .get(catalog::handlers::index::handler)
                .push(Router::with_path("{book}").get(catalog::handlers::get::handler)),
        )
        // Everything below requires a bearer token.
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("auth/logout").post(auth::handlers::logout::handler))
                .push(Router::with_path("profile").get(accounts::handlers::profile::handler))
                .push(
                    Router::with_path("addresses")
                        .get(accounts::handlers::addresses::index)
                        .post(accounts::handlers::addresses::create)
                        .push(
                            Router::with_path("{address}")
                                .put(accounts::handlers::addresses::update)
                                .delete(accounts::handlers::addresses::delete),
                        ),
                )
                .push(
                    Router::with_path("payment-methods")
                        .get(accounts::handlers::payment_methods::index)
                        .post(accounts::handlers::payment_methods::create)
                        .push(
                            Router::with_path("{method}")
                                .delete(accounts::handlers::payment_methods::delete),
                        ),
                )
                .push(Router::with_path("purchases").get(accounts::handlers::purchases::handler))
                .push(
                    Router::with_path("administrators")
                        .get(accounts::handlers::administrators::index)
                        .post(accounts::handlers::administrators::create),
                )
                .push(
                    Router::with_path("books")
                        .post(catalog::handlers::create::handler)
                        .push(
                            Router::with_path("exhausted")
                                .get(catalog::handlers::exhausted::handler),
                        )
                        .push(
                            Router::with_path("{book}")
                                .put(catalog::handlers::update::handler)
                                .delete(catalog::handlers::delete::handler)
                                .push(
                                    Router::with_path("restore")
                                        .put(catalog::handlers::restore::handler),
                                )
                                .push(
                                    Router::with_path("copies")
                                        .post(catalog::handlers::copies::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("cart")
                        .get(carts::handlers::get::handler)
                        .push(
                            Router::with_path("items")
                                .post(carts::handlers::add_item::handler)
                                .push(
                                    Router::with_path("{item}")
                                        .delete(carts::handlers::remove_item::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("reservations")
                        .get(reservations::handlers::index::handler)
                        .post(reservations::handlers::create::handler)
                        .push(
                            Router::with_path("sweep").post(reservations::handlers::sweep::handler),
                        )
                        .push(
                            Router::with_path("{reservation}/cancel")
                                .post(reservations::handlers::cancel::handler),
                        ),
                )
                .push(Router::with_path("checkout").post(orders::handlers::checkout::handler))
                .push(
                    Router::with_path("orders")
                        .get(orders::handlers::index::handler)
                        .push(
                            Router::with_path("advance").post(orders::handlers::advance::handler),
                        ),
                )
                .push(
                    Router::with_path("returns")
                        .get(returns::handlers::index::handler)
                        .post(returns::handlers::create::handler),
                )
                .push(
                    Router::with_path("support/messages")
                        .get(support::handlers::index::handler)
                        .post(support::handlers::create::handler)
                        .push(
                            Router::with_path("{message}")
                                .get(support::handlers::get::handler)
                                .push(
                                    Router::with_path("replies")
                                        .post(support::handlers::reply::handler),
                                ),
                        ),
                ),
        )
}
