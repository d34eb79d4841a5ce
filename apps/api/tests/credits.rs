//! Ledger integration tests against a live Postgres database.

use uuid::Uuid;

use api::credits::{self, GENERATION_COST, STARTING_CREDITS};
use api::errors::AppError;

/// First touch creates the account with the welcome bonus; a second read
/// returns the same balance without crediting the bonus again.
#[sqlx::test]
async fn lazy_init_is_idempotent(pool: sqlx::PgPool) {
    let user = Uuid::new_v4();

    let first = credits::get_balance(&pool, user).await.unwrap();
    let second = credits::get_balance(&pool, user).await.unwrap();
    assert_eq!(first, STARTING_CREDITS);
    assert_eq!(second, STARTING_CREDITS);

    let transactions = credits::list_transactions(&pool, user, 20).await.unwrap();
    assert_eq!(transactions.len(), 1, "exactly one welcome transaction");
    assert_eq!(transactions[0].transaction_type, "credit");
    assert_eq!(transactions[0].amount, STARTING_CREDITS);
}

/// A debit larger than the balance returns None and writes nothing.
#[sqlx::test]
async fn overdraw_leaves_balance_unchanged(pool: sqlx::PgPool) {
    let user = Uuid::new_v4();

    let result = credits::debit(&pool, user, STARTING_CREDITS + 50, "Overdraw attempt")
        .await
        .unwrap();
    assert!(result.is_none());

    assert_eq!(
        credits::get_balance(&pool, user).await.unwrap(),
        STARTING_CREDITS
    );
    let transactions = credits::list_transactions(&pool, user, 20).await.unwrap();
    assert!(
        transactions.iter().all(|t| t.transaction_type == "credit"),
        "no debit row for the failed attempt"
    );
}

/// Draining the balance to exactly the operation cost: the first charge
/// succeeds and leaves zero, the second is blocked and changes nothing.
#[sqlx::test]
async fn exact_balance_charge_then_block(pool: sqlx::PgPool) {
    let user = Uuid::new_v4();

    // Leave exactly one generation's worth of credits.
    let drained = credits::debit(
        &pool,
        user,
        STARTING_CREDITS - GENERATION_COST,
        "Drain to one generation",
    )
    .await
    .unwrap();
    assert_eq!(drained, Some(GENERATION_COST));

    let remaining = credits::charge_generation(&pool, user, "Assignment generation")
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    let blocked = credits::charge_generation(&pool, user, "Assignment generation").await;
    assert!(matches!(
        blocked,
        Err(AppError::InsufficientCredits {
            balance: 0,
            required: GENERATION_COST,
        })
    ));
    assert_eq!(credits::get_balance(&pool, user).await.unwrap(), 0);
}

/// Balance always reconciles to the signed sum of the transaction log
/// (credits positive, debits negative).
#[sqlx::test]
async fn transactions_reconcile_to_balance(pool: sqlx::PgPool) {
    let user = Uuid::new_v4();

    credits::get_balance(&pool, user).await.unwrap();
    credits::debit(&pool, user, 30, "First debit").await.unwrap();
    credits::debit(&pool, user, 20, "Second debit").await.unwrap();

    let balance = credits::get_balance(&pool, user).await.unwrap();
    let transactions = credits::list_transactions(&pool, user, 50).await.unwrap();
    let signed_sum: i64 = transactions
        .iter()
        .map(|t| match t.transaction_type.as_str() {
            "debit" => -t.amount,
            _ => t.amount,
        })
        .sum();
    assert_eq!(balance, STARTING_CREDITS - 50);
    assert_eq!(signed_sum, balance);
}
