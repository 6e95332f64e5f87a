//! End-to-end workflow tests against a live `PostgreSQL` database.
//!
//! Ignored by default. Point `DATABASE_URL` at a scratch database and run
//! `cargo test -p octavo-app -- --ignored`.

use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use uuid::Uuid;

use octavo_app::{
    clock::ManualClock,
    context::AppContext,
    database,
    domain::{
        accounts::models::{
            AddressUuid, NewAddress, NewCustomer, NewPaymentMethod, PaymentMethodUuid, UserUuid,
        },
        carts::models::{CartItemUuid, NewCartItem},
        catalog::models::{BookUuid, BookWithCopies, CopyCondition, NewBook, NewCopies},
        orders::OrderState,
        reservations::ReservationsServiceError,
    },
};

const SCHEMA_SQL: &str = include_str!("../db/schema.sql");

async fn context(clock: Arc<ManualClock>) -> AppContext {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a scratch database");

    let pool = database::connect(&url).await.expect("database should be reachable");

    sqlx::raw_sql(SCHEMA_SQL)
        .execute(&pool)
        .await
        .expect("schema should apply");

    AppContext::from_database_url(&url, clock)
        .await
        .expect("app context should initialize")
}

async fn register_customer(ctx: &AppContext) -> UserUuid {
    let account = ctx
        .accounts
        .register_customer(NewCustomer {
            uuid: UserUuid::new(),
            email: format!("reader-{}@example.com", Uuid::now_v7().simple()),
            password: "hunter2".to_string(),
            first_name: "Jordan".to_string(),
            last_name: "Reader".to_string(),
            document_id: "CC-1".to_string(),
            birth_date: jiff::civil::date(1990, 7, 14),
            receive_news: false,
        })
        .await
        .expect("registration should succeed");

    account.user.uuid
}

async fn seed_book(ctx: &AppContext, copies: u32, price: u64) -> BookWithCopies {
    ctx.catalog
        .create_book(
            NewBook {
                uuid: BookUuid::new(),
                title: "El amor en los tiempos del cólera".to_string(),
                author: "Gabriel García Márquez".to_string(),
                publication_year: 1985,
                publication_date: jiff::civil::date(1985, 9, 5),
                genre: "Novel".to_string(),
                page_count: 348,
                publisher: "Oveja Negra".to_string(),
                issn: "0000-0003".to_string(),
                language: "es".to_string(),
                category: "Fiction".to_string(),
                cover_image: None,
                synopsis: String::new(),
                featured: false,
            },
            NewCopies {
                count: copies,
                price,
                condition: CopyCondition::New,
            },
        )
        .await
        .expect("book creation should succeed")
}

async fn checkout_essentials(
    ctx: &AppContext,
    customer: UserUuid,
) -> (AddressUuid, PaymentMethodUuid) {
    let address = ctx
        .accounts
        .create_address(
            customer,
            NewAddress {
                uuid: AddressUuid::new(),
                detail: "Calle 12 #3-45".to_string(),
                country: "Colombia".to_string(),
                region: "Antioquia".to_string(),
                city: "Medellín".to_string(),
                postal_code: "050001".to_string(),
            },
        )
        .await
        .expect("address creation should succeed");

    let method = ctx
        .accounts
        .create_payment_method(
            customer,
            NewPaymentMethod {
                uuid: PaymentMethodUuid::new(),
                card_number: "4111111111111234".to_string(),
                holder_name: "Jordan Reader".to_string(),
                expires: jiff::civil::date(2030, 1, 1),
            },
        )
        .await
        .expect("payment method creation should succeed");

    (address.uuid, method.uuid)
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL database"]
async fn reserving_a_held_copy_fails_unavailable() {
    let clock = Arc::new(ManualClock::starting_at(Timestamp::now()));
    let ctx = context(Arc::clone(&clock)).await;

    let customer = register_customer(&ctx).await;
    let book = seed_book(&ctx, 1, 20_00).await;
    let copy = book.copies[0].uuid;

    let reservation = ctx
        .reservations
        .create_reservation(customer, copy)
        .await
        .expect("first reservation should succeed");

    assert!(reservation.active);

    let other = register_customer(&ctx).await;
    let second = ctx.reservations.create_reservation(other, copy).await;

    assert!(
        matches!(second, Err(ReservationsServiceError::Unavailable)),
        "a held copy must not be re-reservable, got {second:?}"
    );
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL database"]
async fn sweep_releases_only_expired_reservations() {
    let clock = Arc::new(ManualClock::starting_at(Timestamp::now()));
    let ctx = context(Arc::clone(&clock)).await;

    let customer = register_customer(&ctx).await;
    let book = seed_book(&ctx, 2, 20_00).await;

    ctx.reservations
        .create_reservation(customer, book.copies[0].uuid)
        .await
        .expect("first reservation should succeed");

    clock.advance(SignedDuration::from_hours(23));

    ctx.reservations
        .create_reservation(customer, book.copies[1].uuid)
        .await
        .expect("second reservation should succeed");

    // First reservation is now past its deadline; the second is one hour in.
    clock.advance(SignedDuration::from_hours(1));

    let released = ctx
        .reservations
        .sweep_expired()
        .await
        .expect("sweep should succeed");

    assert_eq!(released, 1, "only the expired reservation may be released");

    let active = ctx
        .reservations
        .list_reservations(customer, true)
        .await
        .expect("listing should succeed");

    assert_eq!(active.len(), 1);
    assert_eq!(active[0].copy_uuid, book.copies[1].uuid);
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL database"]
async fn checkout_produces_order_items_and_advances_over_time() {
    let clock = Arc::new(ManualClock::starting_at(Timestamp::now()));
    let ctx = context(Arc::clone(&clock)).await;

    let customer = register_customer(&ctx).await;
    let dear = seed_book(&ctx, 1, 20_00).await;
    let cheap = seed_book(&ctx, 1, 15_00).await;
    let (address, method) = checkout_essentials(&ctx, customer).await;

    ctx.carts
        .add_item(
            customer,
            NewCartItem {
                uuid: CartItemUuid::new(),
                copy_uuid: dear.copies[0].uuid,
                quantity: 2,
            },
        )
        .await
        .expect("adding the first item should succeed");

    ctx.carts
        .add_item(
            customer,
            NewCartItem {
                uuid: CartItemUuid::new(),
                copy_uuid: cheap.copies[0].uuid,
                quantity: 1,
            },
        )
        .await
        .expect("adding the second item should succeed");

    let order = ctx
        .orders
        .checkout(customer, address, method)
        .await
        .expect("checkout should succeed");

    assert_eq!(order.total, 55_00);
    assert_eq!(order.items.len(), 2);
    assert_eq!(
        order.items.iter().map(|i| i.subtotal()).sum::<u64>(),
        order.total
    );
    assert_eq!(order.state, OrderState::Preparing);

    let cart = ctx.carts.get_cart(customer).await.expect("cart should load");
    assert!(cart.items.is_empty(), "checkout must empty the cart");

    let purchases = ctx
        .accounts
        .list_purchases(customer)
        .await
        .expect("history should load");
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0].order_uuid, order.uuid);

    // Below the threshold nothing moves.
    clock.advance(SignedDuration::from_secs(60));
    let advanced = ctx.orders.advance_orders().await.expect("advance should succeed");
    assert!(advanced.is_empty());

    // Past 120 s the order ships; past 240 s it is delivered, one step at a
    // time.
    clock.advance(SignedDuration::from_secs(60));
    let advanced = ctx.orders.advance_orders().await.expect("advance should succeed");
    assert_eq!(advanced.len(), 1);
    assert_eq!(advanced[0].state, OrderState::Shipped);

    clock.advance(SignedDuration::from_secs(120));
    let advanced = ctx.orders.advance_orders().await.expect("advance should succeed");
    assert_eq!(advanced.len(), 1);
    assert_eq!(advanced[0].state, OrderState::Delivered);
}
