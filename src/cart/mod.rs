//! Cart
//!
//! The cart is a single aggregate: an ordered list of lines, unique by product
//! id, plus running totals. Every change goes through [`CartState::apply`],
//! which moves the totals in the same step as the line it touches.

use rusty_money::{
    Money,
    iso::{self, Currency},
};
use tracing::warn;

use crate::{
    prices::Price,
    products::{Product, ProductId},
};

pub mod store;

pub use store::CartStore;

/// A product in the cart together with how many of it were ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    product: Product,
    quantity: u64,
}

impl CartLine {
    fn new(product: Product) -> Self {
        CartLine {
            product,
            quantity: 1,
        }
    }

    /// The product on this line.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Product id of this line.
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Quantity ordered, always at least one.
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Unit price stored when the line was created.
    pub fn unit_price(&self) -> Price {
        self.product.current_price
    }

    /// Unit price times quantity.
    pub fn subtotal(&self) -> Price {
        self.unit_price().times(self.quantity)
    }
}

/// Commands accepted by the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    /// Add one unit of a product.
    Add(Product),

    /// Drop the line for a product.
    Remove(ProductId),

    /// Replace the quantity of a line; zero or below removes it.
    SetQuantity {
        /// Product whose line changes
        id: ProductId,

        /// Requested quantity
        quantity: i64,
    },

    /// Empty the cart.
    Clear,
}

/// Cart contents and running totals.
#[derive(Debug, Clone, PartialEq)]
pub struct CartState {
    lines: Vec<CartLine>,
    total_items: u64,
    total_price: Price,
    currency: &'static Currency,
}

impl Default for CartState {
    fn default() -> Self {
        CartState::new(iso::GBP)
    }
}

impl CartState {
    /// Create an empty cart priced in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        CartState {
            lines: Vec::new(),
            total_items: 0,
            total_price: Price::ZERO,
            currency,
        }
    }

    /// Apply a command, returning the resulting state.
    #[must_use]
    pub fn apply(self, command: CartCommand) -> Self {
        match command {
            CartCommand::Add(product) => self.add(product),
            CartCommand::Remove(id) => self.remove(id),
            CartCommand::SetQuantity { id, quantity } => self.set_quantity(id, quantity),
            CartCommand::Clear => self.clear(),
        }
    }

    /// Add one unit of `product`, appending a new line if it is not in the cart yet.
    ///
    /// An add that would take the totals past [`Price::MAX`] or `u64::MAX`
    /// items leaves the cart untouched.
    #[must_use]
    pub fn add(mut self, product: Product) -> Self {
        let position = self.position(product.id);

        let unit_price = match position.and_then(|position| self.lines.get(position)) {
            Some(line) => {
                if line.unit_price() != product.current_price {
                    warn!(
                        product_id = %product.id,
                        line_price = %line.unit_price(),
                        incoming_price = %product.current_price,
                        "price changed for product already in cart; keeping line price"
                    );
                }

                line.unit_price()
            }
            None => product.current_price,
        };

        let (Some(total_items), Some(total_price)) = (
            self.total_items.checked_add(1),
            self.total_price.checked_add(unit_price),
        ) else {
            warn!(product_id = %product.id, "cart totals at their limit; add ignored");
            return self;
        };

        match position.and_then(|position| self.lines.get_mut(position)) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine::new(product)),
        }

        self.total_items = total_items;
        self.total_price = total_price;

        self
    }

    /// Remove the line for `id`. Unknown ids leave the cart untouched.
    #[must_use]
    pub fn remove(mut self, id: ProductId) -> Self {
        let Some(position) = self.position(id) else {
            return self;
        };

        let line = self.lines.remove(position);

        // Totals always cover every line, so neither subtraction can underflow.
        self.total_items -= line.quantity;
        self.total_price = Price::new(*self.total_price - *line.subtotal());

        self
    }

    /// Set the quantity of the line for `id`.
    ///
    /// A quantity of zero or below behaves like [`CartState::remove`]. Unknown
    /// ids leave the cart untouched. A quantity that would take the totals
    /// past [`Price::MAX`] or `u64::MAX` items is lowered to the largest one
    /// that fits, and that value is what the line stores.
    #[must_use]
    pub fn set_quantity(mut self, id: ProductId, quantity: i64) -> Self {
        let Ok(requested @ 1..) = u64::try_from(quantity) else {
            return self.remove(id);
        };

        let Some(line) = self.lines.iter_mut().find(|line| line.id() == id) else {
            return self;
        };

        let unit_price = line.unit_price();
        let other_items = self.total_items - line.quantity;
        let other_price = *self.total_price - *line.subtotal();

        // A zero price leaves only the item count to bound the quantity.
        let price_room = (*Price::MAX - other_price)
            .checked_div(*unit_price)
            .unwrap_or(u64::MAX);
        let quantity = requested.min(u64::MAX - other_items).min(price_room);

        if quantity < requested {
            warn!(
                product_id = %id,
                requested,
                quantity,
                "quantity exceeds cart limits; capped"
            );
        }

        line.quantity = quantity;

        self.total_items = other_items + quantity;
        self.total_price = Price::new(other_price + *unit_price.times(quantity));

        self
    }

    /// Empty the cart, keeping its currency.
    #[must_use]
    pub fn clear(self) -> Self {
        CartState::new(self.currency)
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if present.
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Quantity of `id` in the cart, zero when absent.
    pub fn quantity_of(&self, id: ProductId) -> u64 {
        self.line(id).map_or(0, CartLine::quantity)
    }

    /// Whether a line for `id` exists.
    pub fn contains(&self, id: ProductId) -> bool {
        self.line(id).is_some()
    }

    /// Sum of all line quantities.
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Sum of unit price times quantity over all lines.
    pub fn total_price(&self) -> Price {
        self.total_price
    }

    /// [`CartState::total_price`] as money in the cart currency.
    pub fn total_money(&self) -> Money<'static, Currency> {
        self.total_price.to_money(self.currency)
    }

    /// Currency the cart is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.lines.iter().position(|line| line.id() == id)
    }
}

/// Pure transition from `state` under `command`.
#[must_use]
pub fn reduce(state: CartState, command: CartCommand) -> CartState {
    state.apply(command)
}
