// src/services/checkout.rs
//
// The checkout transaction: converts the current contents of a cart into a
// durable order, computes money amounts deterministically, and leaves the
// cart empty — or fails leaving both cart and order store unchanged. All
// writes happen inside one database transaction, and the cart row is locked
// for its duration so concurrent checkouts on the same cart serialize: the
// second one observes an empty cart and fails cleanly.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::order::PlaceOrderRequest;
use crate::models::payment::ProcessPaymentRequest;

pub const DEFAULT_SHIPPING_ADDRESS: &str = "Default Shipping Address";
pub const DEFAULT_BILLING_ADDRESS: &str = "Default Billing Address";

// Flat tax rate and flat shipping fee, applied uniformly regardless of
// region or order size.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutPolicy {
    pub tax_rate: f64,
    pub shipping_fee: f64,
}

// Cart line as read at order time. Quantity and price stay optional so a
// missing value counts as zero instead of failing the whole checkout.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CartLine {
    pub game_id: i32,
    pub quantity: Option<i32>,
    pub unit_price: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub shipping_cost: f64,
    pub total_amount: f64,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// Per-line amount, recomputed at insert time rather than reusing the
// aggregate rounding.
pub fn line_subtotal(line: &CartLine) -> f64 {
    line.quantity.unwrap_or(0) as f64 * line.unit_price.unwrap_or(0.0)
}

pub fn compute_totals(lines: &[CartLine], policy: &CheckoutPolicy) -> Result<OrderTotals> {
    if lines.is_empty() {
        return Err(AppError::EmptyCart);
    }

    let subtotal = round2(lines.iter().map(line_subtotal).sum());
    if !subtotal.is_finite() || subtotal <= 0.0 {
        return Err(AppError::InvalidCart);
    }

    let tax_amount = round2(subtotal * policy.tax_rate);
    let shipping_cost = policy.shipping_fee;
    let total_amount = round2(subtotal + tax_amount + shipping_cost);

    Ok(OrderTotals {
        subtotal,
        tax_amount,
        shipping_cost,
        total_amount,
    })
}

pub fn transaction_reference() -> String {
    format!("TR-{}", Uuid::new_v4().simple())
}

impl PlaceOrderRequest {
    pub fn shipping_address_or_default(&self) -> &str {
        self.shipping_address.as_deref().unwrap_or(DEFAULT_SHIPPING_ADDRESS)
    }

    pub fn billing_address_or_default(&self) -> &str {
        self.billing_address.as_deref().unwrap_or(DEFAULT_BILLING_ADDRESS)
    }
}

pub async fn place_order(pool: &PgPool, policy: &CheckoutPolicy, request: &PlaceOrderRequest) -> Result<i32> {
    let user_id = request
        .user_id
        .ok_or_else(|| AppError::invalid_data("User ID is required"))?;
    let cart_id = request
        .cart_id
        .ok_or_else(|| AppError::invalid_data("Cart ID is required"))?;

    let mut tx = pool.begin().await?;

    // Serialize concurrent checkouts on the same cart. A second checkout
    // blocks here until the first commits, then sees an empty cart.
    sqlx::query("SELECT cart_id FROM carts WHERE cart_id = $1 FOR UPDATE")
        .bind(cart_id)
        .fetch_optional(&mut *tx)
        .await?;

    // Join with games so each line carries the live catalog price
    let lines = sqlx::query_as::<_, CartLine>(
        r#"
        SELECT ci.game_id, ci.quantity, g.price AS unit_price
        FROM cart_items ci
        JOIN games g ON ci.game_id = g.game_id
        WHERE ci.cart_id = $1
        "#,
    )
    .bind(cart_id)
    .fetch_all(&mut *tx)
    .await?;

    let totals = compute_totals(&lines, policy)?;
    tracing::debug!("cart {} subtotal: {:.2}", cart_id, totals.subtotal);

    let order_id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO orders (user_id, order_date, subtotal, tax_amount, shipping_cost,
                            total_amount, status, shipping_address, billing_address, updated_at)
        VALUES ($1, NOW(), $2, $3, $4, $5, 'Completed', $6, $7, NOW())
        RETURNING order_id
        "#,
    )
    .bind(user_id)
    .bind(totals.subtotal)
    .bind(totals.tax_amount)
    .bind(totals.shipping_cost)
    .bind(totals.total_amount)
    .bind(request.shipping_address_or_default())
    .bind(request.billing_address_or_default())
    .fetch_one(&mut *tx)
    .await?;

    for line in &lines {
        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, game_id, quantity, unit_price, subtotal)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(order_id)
        .bind(line.game_id)
        .bind(line.quantity.unwrap_or(0))
        .bind(line.unit_price.unwrap_or(0.0))
        .bind(line_subtotal(line))
        .execute(&mut *tx)
        .await?;
    }

    // Back-fill the payment's order association. A missing payment id
    // matches zero rows and is not an error.
    sqlx::query("UPDATE payments SET order_id = $1 WHERE payment_id = $2")
        .bind(order_id)
        .bind(request.payment_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
        .bind(cart_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        "✅ Order {} placed for user {} (total {:.2})",
        order_id,
        user_id,
        totals.total_amount
    );

    Ok(order_id)
}

pub async fn process_payment(pool: &PgPool, request: &ProcessPaymentRequest) -> Result<i32> {
    let reference = transaction_reference();

    let payment_id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO payments (payment_date, amount, payment_method, status,
                              transaction_id, card_last4, paypal_email, upi_id)
        VALUES (NOW(), $1, $2, 'completed', $3, $4, $5, $6)
        RETURNING payment_id
        "#,
    )
    .bind(request.amount)
    .bind(&request.payment_method)
    .bind(&reference)
    .bind(&request.card_last4)
    .bind(&request.paypal_email)
    .bind(&request.upi_id)
    .fetch_one(pool)
    .await?;

    tracing::info!(
        "💳 Payment {} recorded ({} {:.2}, user {:?}, cart {:?})",
        payment_id,
        request.payment_method,
        request.amount,
        request.user_id,
        request.cart_id
    );

    Ok(payment_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> CheckoutPolicy {
        CheckoutPolicy {
            tax_rate: 0.08,
            shipping_fee: 5.00,
        }
    }

    fn line(quantity: Option<i32>, unit_price: Option<f64>) -> CartLine {
        CartLine {
            game_id: 1,
            quantity,
            unit_price,
        }
    }

    #[test]
    fn totals_for_worked_example() {
        let lines = vec![line(Some(2), Some(19.99)), line(Some(1), Some(5.00))];
        let totals = compute_totals(&lines, &policy()).unwrap();

        assert_eq!(totals.subtotal, 44.98);
        assert_eq!(totals.tax_amount, 3.60);
        assert_eq!(totals.shipping_cost, 5.00);
        assert_eq!(totals.total_amount, 53.58);
    }

    #[test]
    fn missing_price_counts_as_zero() {
        let lines = vec![line(Some(3), None), line(Some(1), Some(10.00))];
        let totals = compute_totals(&lines, &policy()).unwrap();

        assert_eq!(totals.subtotal, 10.00);
    }

    #[test]
    fn missing_quantity_counts_as_zero() {
        let lines = vec![line(None, Some(59.99)), line(Some(1), Some(10.00))];
        let totals = compute_totals(&lines, &policy()).unwrap();

        assert_eq!(totals.subtotal, 10.00);
    }

    #[test]
    fn empty_cart_is_rejected() {
        assert!(matches!(compute_totals(&[], &policy()), Err(AppError::EmptyCart)));
    }

    #[test]
    fn zero_subtotal_is_rejected() {
        let lines = vec![line(Some(2), None), line(None, Some(19.99))];
        assert!(matches!(compute_totals(&lines, &policy()), Err(AppError::InvalidCart)));
    }

    #[test]
    fn line_subtotal_uses_per_line_arithmetic() {
        assert_eq!(line_subtotal(&line(Some(3), Some(19.99))), 59.97);
        assert_eq!(line_subtotal(&line(None, Some(19.99))), 0.0);
    }

    #[test]
    fn policy_values_are_injected_not_hard_coded() {
        let custom = CheckoutPolicy {
            tax_rate: 0.20,
            shipping_fee: 12.50,
        };
        let lines = vec![line(Some(1), Some(100.00))];
        let totals = compute_totals(&lines, &custom).unwrap();

        assert_eq!(totals.tax_amount, 20.00);
        assert_eq!(totals.shipping_cost, 12.50);
        assert_eq!(totals.total_amount, 132.50);
    }

    #[test]
    fn rounding_is_to_two_decimals() {
        let lines = vec![line(Some(3), Some(0.333))];
        let totals = compute_totals(&lines, &policy()).unwrap();

        assert_eq!(totals.subtotal, 1.00);
    }

    #[test]
    fn addresses_default_to_the_literal_placeholders() {
        let request = crate::models::order::PlaceOrderRequest {
            user_id: Some(1),
            cart_id: Some(1),
            payment_id: None,
            shipping_address: None,
            billing_address: None,
        };

        assert_eq!(request.shipping_address_or_default(), "Default Shipping Address");
        assert_eq!(request.billing_address_or_default(), "Default Billing Address");
    }

    #[test]
    fn provided_addresses_are_kept_verbatim() {
        let request = crate::models::order::PlaceOrderRequest {
            user_id: Some(1),
            cart_id: Some(1),
            payment_id: Some(7),
            shipping_address: Some("12 High St".to_string()),
            billing_address: Some("PO Box 9".to_string()),
        };

        assert_eq!(request.shipping_address_or_default(), "12 High St");
        assert_eq!(request.billing_address_or_default(), "PO Box 9");
    }

    #[test]
    fn transaction_references_are_unique_and_prefixed() {
        let a = transaction_reference();
        let b = transaction_reference();

        assert!(a.starts_with("TR-"));
        assert!(b.starts_with("TR-"));
        assert_ne!(a, b);
    }
}
