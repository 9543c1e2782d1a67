//! Cart store
//!
//! Owns the session's [`CartState`] and is handed to whatever presents it.
//! All writes go through [`CartStore::dispatch`].

use std::{fmt, mem};

use rusty_money::iso::Currency;
use tracing::debug;

use crate::products::{Product, ProductId};

use super::{CartCommand, CartState};

type Listener = Box<dyn FnMut(&CartState) + Send>;

/// Owner of the cart for one session.
#[derive(Default)]
pub struct CartStore {
    state: CartState,
    listeners: Vec<Listener>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl CartStore {
    /// Create a store with an empty cart in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        CartStore {
            state: CartState::new(currency),
            listeners: Vec::new(),
        }
    }

    /// Current cart.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Register a callback invoked with the new state after every dispatch.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartState) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Apply `command` to the cart and notify listeners.
    pub fn dispatch(&mut self, command: CartCommand) -> &CartState {
        debug!(?command, "cart dispatch");

        let current = mem::take(&mut self.state);
        self.state = current.apply(command);

        debug!(
            lines = self.state.len(),
            total_items = self.state.total_items(),
            total_price = %self.state.total_price(),
            "cart updated"
        );

        for listener in &mut self.listeners {
            listener(&self.state);
        }

        &self.state
    }

    /// Add one unit of `product`.
    pub fn add(&mut self, product: Product) -> &CartState {
        self.dispatch(CartCommand::Add(product))
    }

    /// Remove the line for `id`.
    pub fn remove(&mut self, id: ProductId) -> &CartState {
        self.dispatch(CartCommand::Remove(id))
    }

    /// Set the quantity for `id`; zero or below removes the line.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> &CartState {
        self.dispatch(CartCommand::SetQuantity { id, quantity })
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> &CartState {
        self.dispatch(CartCommand::Clear)
    }

    /// Remove `product` when it is in the cart, otherwise add it.
    pub fn toggle(&mut self, product: Product) -> &CartState {
        if self.state.contains(product.id) {
            self.remove(product.id)
        } else {
            self.add(product)
        }
    }

    /// Raise the quantity of an existing line by one.
    pub fn increment(&mut self, id: ProductId) -> &CartState {
        let quantity = self.state.quantity_of(id);

        if quantity == 0 {
            return &self.state;
        }

        self.set_quantity(id, to_signed(quantity).saturating_add(1))
    }

    /// Lower the quantity of an existing line by one, removing it at zero.
    pub fn decrement(&mut self, id: ProductId) -> &CartState {
        let quantity = self.state.quantity_of(id);

        if quantity == 0 {
            return &self.state;
        }

        self.set_quantity(id, to_signed(quantity) - 1)
    }
}

fn to_signed(quantity: u64) -> i64 {
    i64::try_from(quantity).unwrap_or(i64::MAX)
}
