//! The cart-to-order checkout driver.
//!
//! Order submission itself is side-effect-free on the server; the client
//! owns the follow-up: clearing the cart and recording the receipt in the
//! bounded history. Both happen only after a successful response, so a
//! failed or retried submission never loses the cart.

use seva_core::{Address, AddressError, Cart, Order, OrderHistory};

use crate::api::{ApiError, PincodeInfo, SevaApi};

/// Errors from checkout.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("Cart is empty")]
    EmptyCart,

    /// The address failed validation.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// Submission failed; the cart is untouched and retry is safe (at the
    /// cost of a possible duplicate display id, which is accepted).
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Submit the cart as an order.
///
/// On success the cart is cleared, the order is recorded at the front of
/// `history`, and the full receipt is returned.
///
/// # Errors
///
/// `EmptyCart` or `Address` before any network call; `Api` if submission
/// fails - in every error case the cart and history are left untouched.
pub async fn checkout<A: SevaApi + ?Sized>(
    api: &A,
    cart: &mut Cart,
    history: &mut OrderHistory,
    address: &Address,
) -> Result<Order, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    address.validate()?;

    let items = cart.snapshot();
    let receipt = api.place_order(&items, address).await?;

    let order = Order {
        order_id: receipt.order_id,
        payment_id: receipt.payment_id,
        amount_to_pay: receipt.amount_to_pay,
        items,
        address: address.clone(),
    };

    cart.clear();
    history.record(order.clone());
    tracing::info!(order_id = order.order_id, "order placed");

    Ok(order)
}

/// Fill in city and state from the pincode lookup, leaving the address
/// untouched when the pincode is unknown.
///
/// Returns whether the lookup matched.
///
/// # Errors
///
/// Propagates transport failures; a 404 is not an error here.
pub async fn autofill_city_state<A: SevaApi + ?Sized>(
    api: &A,
    address: &mut Address,
) -> Result<bool, ApiError> {
    match api.lookup_pincode(address.pincode.trim()).await? {
        Some(PincodeInfo { city, state }) => {
            address.city = city;
            address.state = state;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use seva_core::{CartItem, Price, SevaId};

    use super::*;
    use crate::testing::FakeApi;

    fn item(id: i32, price: i64) -> CartItem {
        CartItem {
            seva_id: SevaId::new(id),
            title: format!("Seva {id}"),
            discounted_price: Price::new(price),
            media: String::new(),
        }
    }

    fn address() -> Address {
        Address {
            name: "Asha Rao".to_owned(),
            contact: "9876543210".to_owned(),
            addr_line1: "12 Temple Street".to_owned(),
            pincode: "560001".to_owned(),
            city: "Bengaluru".to_owned(),
            state: "Karnataka".to_owned(),
            ..Address::default()
        }
    }

    #[tokio::test]
    async fn successful_checkout_clears_cart_and_records_history() {
        let api = FakeApi::new();
        let mut cart = Cart::new();
        cart.add(item(1, 500));
        cart.add(item(2, 300));
        let mut history = OrderHistory::new();

        let order = checkout(&api, &mut cart, &mut history, &address())
            .await
            .expect("checkout");

        assert_eq!(order.amount_to_pay, Price::new(800));
        assert_eq!(order.items.len(), 2);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().map(|o| o.order_id), Some(order.order_id));
    }

    #[tokio::test]
    async fn empty_cart_is_rejected_without_an_api_call() {
        let api = FakeApi::new();
        let mut cart = Cart::new();
        let mut history = OrderHistory::new();

        let err = checkout(&api, &mut cart, &mut history, &address())
            .await
            .expect_err("empty cart");
        assert!(matches!(err, CheckoutError::EmptyCart));
        assert_eq!(api.order_calls(), 0);
    }

    #[tokio::test]
    async fn invalid_address_is_rejected_without_an_api_call() {
        let api = FakeApi::new();
        let mut cart = Cart::new();
        cart.add(item(1, 500));
        let mut history = OrderHistory::new();

        let bad = Address {
            city: String::new(),
            ..address()
        };
        let err = checkout(&api, &mut cart, &mut history, &bad)
            .await
            .expect_err("missing city");
        assert!(matches!(
            err,
            CheckoutError::Address(AddressError::MissingCity)
        ));
        assert_eq!(api.order_calls(), 0);
        assert!(!cart.is_empty());
    }

    #[tokio::test]
    async fn failed_submission_leaves_cart_and_history_untouched() {
        let api = FakeApi::new();
        api.fail_orders(true);
        let mut cart = Cart::new();
        cart.add(item(1, 500));
        let mut history = OrderHistory::new();

        let err = checkout(&api, &mut cart, &mut history, &address())
            .await
            .expect_err("server down");
        assert!(matches!(err, CheckoutError::Api(_)));
        assert_eq!(cart.len(), 1);
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn history_keeps_three_newest() {
        let api = FakeApi::new();
        let mut history = OrderHistory::new();

        let mut order_ids = Vec::new();
        for i in 1..=4 {
            let mut cart = Cart::new();
            cart.add(item(i, 100 * i64::from(i)));
            let order = checkout(&api, &mut cart, &mut history, &address())
                .await
                .expect("checkout");
            order_ids.push(order.order_id);
        }

        assert_eq!(history.len(), 3);
        let kept: Vec<u64> = history.orders().map(|o| o.order_id).collect();
        assert_eq!(kept, vec![order_ids[3], order_ids[2], order_ids[1]]);
    }

    #[tokio::test]
    async fn autofill_from_known_and_unknown_pincode() {
        let api = FakeApi::new();

        let mut addr = Address {
            city: String::new(),
            state: String::new(),
            ..address()
        };
        assert!(
            autofill_city_state(&api, &mut addr)
                .await
                .expect("transport")
        );
        assert_eq!(addr.city, "Bengaluru");
        assert_eq!(addr.state, "Karnataka");

        let mut unknown = Address {
            pincode: "999999".to_owned(),
            city: "Keep".to_owned(),
            ..address()
        };
        assert!(
            !autofill_city_state(&api, &mut unknown)
                .await
                .expect("transport")
        );
        assert_eq!(unknown.city, "Keep");
    }
}
