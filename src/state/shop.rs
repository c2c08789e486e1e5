//! Shop slice: credit balance, catalogue and past orders.

use crate::mvi::{Reducer, Slice};

use super::models::{Order, PageCursor, Product};
use super::replace_where;
use super::transition::Transition;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShopState {
    pub available_credit: f64,
    pub products: Vec<Product>,
    pub products_cursor: PageCursor,
    pub past_orders: Vec<Order>,
    pub orders_cursor: PageCursor,
    /// Order most recently fetched by id.
    pub order: Option<Order>,
}

impl Slice for ShopState {}

pub struct ShopReducer;

impl Reducer for ShopReducer {
    type State = ShopState;
    type Message = Transition;

    fn reduce(state: Self::State, message: &Self::Message) -> Self::State {
        match message {
            Transition::BalanceChanged { available_credit } => ShopState {
                available_credit: *available_credit,
                ..state
            },
            Transition::FetchedProducts { products, cursor } => ShopState {
                products: products.clone(),
                products_cursor: cursor.clone(),
                ..state
            },
            Transition::FetchedOrders { orders, cursor } => ShopState {
                past_orders: orders.clone(),
                orders_cursor: cursor.clone(),
                ..state
            },
            Transition::FetchedOrder { order_id, order } => ShopState {
                past_orders: replace_where(
                    state.past_orders,
                    |o| o.id == *order_id,
                    |_| order.clone(),
                ),
                order: Some(order.clone()),
                ..state
            },
            Transition::OrderReturned { order_id, order } => ShopState {
                past_orders: replace_where(
                    state.past_orders,
                    |o| o.id == *order_id,
                    |_| order.clone(),
                ),
                ..state
            },
            _ => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Offset;
    use serde_json::json;

    fn order(id: u64, status: &str) -> Order {
        serde_json::from_value(json!({"id": id, "status": status, "quantity": 1})).unwrap()
    }

    fn with_orders() -> ShopState {
        ShopState {
            past_orders: vec![order(1, "delivered"), order(2, "delivered"), order(3, "delivered")],
            ..ShopState::default()
        }
    }

    #[test]
    fn fetched_products_replaces_list_and_cursor() {
        let product: Product = serde_json::from_value(json!({"id": 9, "name": "Seat"})).unwrap();
        let cursor = PageCursor::new(Some(Offset::Number(0)), Some(Offset::Number(60)));
        let next = ShopReducer::reduce(
            ShopState::default(),
            &Transition::FetchedProducts {
                products: vec![product.clone()],
                cursor: cursor.clone(),
            },
        );
        assert_eq!(next.products, vec![product]);
        assert_eq!(next.products_cursor, cursor);
        assert_eq!(next.orders_cursor, PageCursor::default());
    }

    #[test]
    fn returned_order_replaces_only_matching_entry() {
        let state = with_orders();
        let next = ShopReducer::reduce(
            state.clone(),
            &Transition::OrderReturned {
                order_id: 2,
                order: order(2, "return pending"),
            },
        );
        assert_eq!(next.past_orders.len(), 3);
        assert_eq!(next.past_orders[0], state.past_orders[0]);
        assert_eq!(next.past_orders[1].status.as_deref(), Some("return pending"));
        assert_eq!(next.past_orders[2], state.past_orders[2]);
        assert!(next.order.is_none());
    }

    #[test]
    fn unknown_order_id_leaves_list_unchanged() {
        let state = with_orders();
        let next = ShopReducer::reduce(
            state.clone(),
            &Transition::OrderReturned {
                order_id: 99,
                order: order(99, "return pending"),
            },
        );
        assert_eq!(next.past_orders, state.past_orders);
    }

    #[test]
    fn fetched_order_records_current_order() {
        let next = ShopReducer::reduce(
            with_orders(),
            &Transition::FetchedOrder {
                order_id: 3,
                order: order(3, "returned"),
            },
        );
        assert_eq!(next.order, Some(order(3, "returned")));
        assert_eq!(next.past_orders[2].status.as_deref(), Some("returned"));
    }

    #[test]
    fn balance_changed_updates_credit() {
        let next = ShopReducer::reduce(
            ShopState::default(),
            &Transition::BalanceChanged {
                available_credit: 70.0,
            },
        );
        assert_eq!(next.available_credit, 70.0);
    }

    #[test]
    fn logout_keeps_shop_state() {
        let state = with_orders();
        assert_eq!(ShopReducer::reduce(state.clone(), &Transition::LogOut), state);
    }
}
