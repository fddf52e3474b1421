//! Checkout submission and pricing derivation.
//!
//! Pricing applies identically in the cart view and the checkout summary:
//! free shipping above a subtotal of 50.00, a flat 9.99 otherwise, and 8%
//! tax on the subtotal. Checkout itself is a demo no-op on the payment
//! side; the order service only records the order.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::instrument;

use shopfront_core::order::Order;

use crate::api::{ApiClient, ApiError};
use crate::cart::CartManager;
use crate::session::SessionManager;

/// Subtotal above which shipping is free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
/// Flat shipping charge below the threshold.
pub const SHIPPING_FLAT: Decimal = Decimal::from_parts(999, 0, 0, false, 2);
/// Tax rate applied to the subtotal.
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Errors that can occur while submitting a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart holds no line items.
    #[error("cart is empty")]
    EmptyCart,

    /// No user is logged in.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The order service rejected the submission or the transport failed.
    #[error("{0}")]
    Service(#[from] ApiError),
}

impl CheckoutError {
    /// Displayable message for the UI layer: the service's own message
    /// verbatim when it sent one, else a generic fallback.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::EmptyCart => "Your cart is empty.".to_owned(),
            Self::NotAuthenticated => "Please log in to check out.".to_owned(),
            Self::Service(api) => api
                .service_message()
                .map_or_else(
                    || "Failed to place order. Please try again.".to_owned(),
                    std::borrow::ToOwned::to_owned,
                ),
        }
    }
}

/// Shipping form fields collected at checkout.
///
/// The phone number is collected but is not part of the formatted address
/// line sent to the order service.
#[derive(Debug, Clone)]
pub struct ShippingForm {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
}

impl ShippingForm {
    /// Single shipping-address line, fields concatenated in fixed order.
    #[must_use]
    pub fn formatted_address(&self) -> String {
        format!(
            "{} {}, {}, {}, {} {}",
            self.first_name, self.last_name, self.address, self.city, self.state, self.zip_code
        )
    }
}

/// Derived pricing for a given cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingQuote {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl PricingQuote {
    /// Derive shipping, tax, and total from a subtotal.
    ///
    /// Tax is rounded to cents so the persisted totals match what the
    /// summary displays.
    #[must_use]
    pub fn for_subtotal(subtotal: Decimal) -> Self {
        let shipping = if subtotal > FREE_SHIPPING_THRESHOLD {
            Decimal::ZERO
        } else {
            SHIPPING_FLAT
        };
        let tax = (subtotal * TAX_RATE).round_dp(2);

        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// Derive the quote for the cart's current subtotal.
    #[must_use]
    pub fn for_cart(cart: &CartManager) -> Self {
        Self::for_subtotal(cart.total_price())
    }

    /// How much more to spend for free shipping, if shipping is charged.
    #[must_use]
    pub fn free_shipping_gap(&self) -> Option<Decimal> {
        (self.shipping > Decimal::ZERO && self.subtotal > Decimal::ZERO)
            .then(|| FREE_SHIPPING_THRESHOLD - self.subtotal)
            .filter(|gap| *gap > Decimal::ZERO)
    }
}

/// Submit the current cart as an order.
///
/// Composes one order-creation request from the cart lines and the
/// formatted shipping address. On acceptance the cart is cleared; on
/// rejection the cart is left untouched for retry and the service's error
/// message is carried in the returned error.
///
/// # Errors
///
/// [`CheckoutError::NotAuthenticated`] without a logged-in user,
/// [`CheckoutError::EmptyCart`] for an empty cart, and
/// [`CheckoutError::Service`] when the order service rejects the request.
#[instrument(skip(api, session, cart, shipping))]
pub async fn place_order(
    api: &ApiClient,
    session: &SessionManager,
    cart: &mut CartManager,
    shipping: &ShippingForm,
) -> Result<Order, CheckoutError> {
    if !session.is_authenticated() {
        return Err(CheckoutError::NotAuthenticated);
    }
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let request = cart.to_order_request(shipping.formatted_address());
    let order = api.create_order(&request).await?;

    tracing::info!(order_id = %order.id, "Order placed");
    cart.clear();
    Ok(order)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_quote_below_threshold() {
        let quote = PricingQuote::for_subtotal(dec("40.00"));
        assert_eq!(quote.shipping, dec("9.99"));
        assert_eq!(quote.tax, dec("3.20"));
        assert_eq!(quote.total, dec("53.19"));
    }

    #[test]
    fn test_quote_above_threshold() {
        let quote = PricingQuote::for_subtotal(dec("60.00"));
        assert_eq!(quote.shipping, Decimal::ZERO);
        assert_eq!(quote.tax, dec("4.80"));
        assert_eq!(quote.total, dec("64.80"));
    }

    #[test]
    fn test_quote_at_exact_threshold_still_charges_shipping() {
        // Free shipping requires strictly more than 50.00.
        let quote = PricingQuote::for_subtotal(dec("50.00"));
        assert_eq!(quote.shipping, dec("9.99"));
    }

    #[test]
    fn test_tax_rounds_to_cents() {
        // 10.55 * 0.08 = 0.844 -> 0.84
        let quote = PricingQuote::for_subtotal(dec("10.55"));
        assert_eq!(quote.tax, dec("0.84"));
        assert_eq!(quote.total, dec("21.38"));
    }

    #[test]
    fn test_free_shipping_gap() {
        let quote = PricingQuote::for_subtotal(dec("42.50"));
        assert_eq!(quote.free_shipping_gap(), Some(dec("7.50")));

        let free = PricingQuote::for_subtotal(dec("60.00"));
        assert_eq!(free.free_shipping_gap(), None);

        let empty = PricingQuote::for_subtotal(Decimal::ZERO);
        assert_eq!(empty.free_shipping_gap(), None);
    }

    #[test]
    fn test_formatted_address_fixed_order_without_phone() {
        let form = ShippingForm {
            first_name: "Jane".to_owned(),
            last_name: "Doe".to_owned(),
            address: "1 Main St".to_owned(),
            city: "Springfield".to_owned(),
            state: "IL".to_owned(),
            zip_code: "62704".to_owned(),
            phone: "555-0100".to_owned(),
        };

        let address = form.formatted_address();
        assert_eq!(address, "Jane Doe, 1 Main St, Springfield, IL 62704");
        assert!(!address.contains("555-0100"));
    }

    #[test]
    fn test_display_message_fallbacks() {
        assert_eq!(
            CheckoutError::EmptyCart.display_message(),
            "Your cart is empty."
        );

        let rejected = CheckoutError::Service(ApiError::Service {
            status: 400,
            message: Some("Insufficient stock".to_owned()),
        });
        assert_eq!(rejected.display_message(), "Insufficient stock");

        let opaque = CheckoutError::Service(ApiError::Service {
            status: 500,
            message: None,
        });
        assert_eq!(
            opaque.display_message(),
            "Failed to place order. Please try again."
        );
    }
}
