//! Interactive shopping session.

use std::{io, str::FromStr};

use clap::ValueEnum;
use rust_decimal::Decimal;
use skiphire::prelude::*;
use thiserror::Error;

const HELP: &str = "\
Commands:
  list                    show the catalog with the current filter and sort
  add <id>                add one skip to the cart
  toggle <id>             add a skip, or remove it if it is already in the cart
  remove <id>             remove a skip from the cart
  qty <id> <n>            set the quantity of a skip (0 or less removes it)
  inc <id> / dec <id>     change the quantity of a skip by one
  clear                   empty the cart
  show                    show the cart
  checkout                pay for the cart (demo only, nothing is charged)
  filter heavy            toggle showing only heavy waste skips
  filter road             toggle hiding skips not allowed on the road
  filter min <amount>     set the minimum price, or `filter min -` to unset it
  filter max <amount>     set the maximum price, or `filter max -` to unset it
  filter reset            clear all filters
  sort <name|price|hire-period>
                          sort by a field; repeating a field flips the order
  reload                  fetch the catalog again
  help                    show this help
  quit                    leave the shop";

/// Errors raised while parsing a shop command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    /// Empty input.
    #[error("no command given; type `help` for a list of commands")]
    Empty,

    /// Unrecognised command word.
    #[error("unknown command `{0}`; type `help` for a list of commands")]
    Unknown(String),

    /// Missing or malformed argument.
    #[error("usage: {0}")]
    Usage(&'static str),

    /// Price argument could not be used.
    #[error("invalid price: {0}")]
    InvalidPrice(String),
}

/// A change to the catalog filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChange {
    /// Flip the heavy waste filter
    HeavyWaste,

    /// Flip the on-road filter
    Road,

    /// Set or unset the minimum price
    Min(Option<Price>),

    /// Set or unset the maximum price
    Max(Option<Price>),

    /// Clear every filter
    Reset,
}

impl FilterChange {
    fn apply(self, filter: &mut CatalogFilter) {
        match self {
            FilterChange::HeavyWaste => filter.heavy_waste_only = !filter.heavy_waste_only,
            FilterChange::Road => {
                filter.hide_not_allowed_on_road = !filter.hide_not_allowed_on_road;
            }
            FilterChange::Min(price) => filter.min_price = price,
            FilterChange::Max(price) => filter.max_price = price,
            FilterChange::Reset => *filter = CatalogFilter::default(),
        }
    }
}

/// A line of shop input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopCommand {
    /// Show the catalog
    List,

    /// Add one unit
    Add(ProductId),

    /// Add, or remove when present
    Toggle(ProductId),

    /// Remove a line
    Remove(ProductId),

    /// Set a quantity
    Quantity(ProductId, i64),

    /// Raise a quantity by one
    Increment(ProductId),

    /// Lower a quantity by one
    Decrement(ProductId),

    /// Empty the cart
    Clear,

    /// Show the cart
    Show,

    /// Mock payment
    Checkout,

    /// Change the filter
    Filter(FilterChange),

    /// Change the sort
    Sort(SortKey),

    /// Fetch the catalog again
    Reload,

    /// Show help
    Help,

    /// Leave
    Quit,
}

impl FromStr for ShopCommand {
    type Err = ParseCommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut words = input.split_whitespace();
        let command = words.next().ok_or(ParseCommandError::Empty)?;
        let args: Vec<&str> = words.collect();

        let parsed = match (command.to_lowercase().as_str(), args.as_slice()) {
            ("list" | "ls", []) => ShopCommand::List,
            ("add", [id]) => ShopCommand::Add(product_id(id, "add <id>")?),
            ("toggle", [id]) => ShopCommand::Toggle(product_id(id, "toggle <id>")?),
            ("remove" | "rm", [id]) => ShopCommand::Remove(product_id(id, "remove <id>")?),
            ("qty", [id, quantity]) => ShopCommand::Quantity(
                product_id(id, "qty <id> <n>")?,
                quantity
                    .parse()
                    .map_err(|_err| ParseCommandError::Usage("qty <id> <n>"))?,
            ),
            ("inc", [id]) => ShopCommand::Increment(product_id(id, "inc <id>")?),
            ("dec", [id]) => ShopCommand::Decrement(product_id(id, "dec <id>")?),
            ("clear", []) => ShopCommand::Clear,
            ("show" | "cart", []) => ShopCommand::Show,
            ("checkout", []) => ShopCommand::Checkout,
            ("filter", args) => ShopCommand::Filter(filter_change(args)?),
            ("sort", [key]) => ShopCommand::Sort(
                SortKey::from_str(key, true)
                    .map_err(|_err| ParseCommandError::Usage("sort <name|price|hire-period>"))?,
            ),
            ("reload", []) => ShopCommand::Reload,
            ("help" | "?", []) => ShopCommand::Help,
            ("quit" | "exit", []) => ShopCommand::Quit,
            (
                "list" | "ls" | "add" | "toggle" | "remove" | "rm" | "qty" | "inc" | "dec"
                | "clear" | "show" | "cart" | "checkout" | "sort" | "reload" | "help" | "?"
                | "quit" | "exit",
                _,
            ) => return Err(ParseCommandError::Usage(usage_for(command))),
            (other, _) => return Err(ParseCommandError::Unknown(other.to_string())),
        };

        Ok(parsed)
    }
}

fn product_id(input: &str, usage: &'static str) -> Result<ProductId, ParseCommandError> {
    input
        .parse::<u64>()
        .map(ProductId)
        .map_err(|_err| ParseCommandError::Usage(usage))
}

fn price_bound(input: &str) -> Result<Option<Price>, ParseCommandError> {
    if input == "-" {
        return Ok(None);
    }

    let amount = input
        .parse::<Decimal>()
        .map_err(|err| ParseCommandError::InvalidPrice(err.to_string()))?;

    Price::from_major(amount)
        .map(Some)
        .map_err(|err| ParseCommandError::InvalidPrice(err.to_string()))
}

fn filter_change(args: &[&str]) -> Result<FilterChange, ParseCommandError> {
    const USAGE: &str = "filter <heavy|road|reset> | filter <min|max> <amount|->";

    match args {
        ["heavy"] => Ok(FilterChange::HeavyWaste),
        ["road"] => Ok(FilterChange::Road),
        ["reset"] => Ok(FilterChange::Reset),
        ["min", amount] => Ok(FilterChange::Min(price_bound(amount)?)),
        ["max", amount] => Ok(FilterChange::Max(price_bound(amount)?)),
        _ => Err(ParseCommandError::Usage(USAGE)),
    }
}

fn usage_for(command: &str) -> &'static str {
    match command.to_lowercase().as_str() {
        "add" => "add <id>",
        "toggle" => "toggle <id>",
        "remove" | "rm" => "remove <id>",
        "qty" => "qty <id> <n>",
        "inc" => "inc <id>",
        "dec" => "dec <id>",
        "sort" => "sort <name|price|hire-period>",
        _ => "the command takes no arguments",
    }
}

/// What the caller should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command
    Continue,

    /// Fetch the catalog again, then continue
    Reload,

    /// Stop reading commands
    Quit,
}

/// State of one shopping session: the catalog on display and the cart.
#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    cart: CartStore,
    filter: CatalogFilter,
    sort: Sort,
}

impl Session {
    /// Start a session over `catalog` with the given cart.
    pub fn new(catalog: Catalog, cart: CartStore) -> Self {
        Self {
            catalog,
            cart,
            filter: CatalogFilter::default(),
            sort: Sort::default(),
        }
    }

    /// Swap in a freshly loaded catalog. The cart keeps its lines.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
    }

    /// The cart.
    pub fn cart(&self) -> &CartState {
        self.cart.state()
    }

    /// Run one command, writing any output to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn handle(
        &mut self,
        command: ShopCommand,
        out: &mut impl io::Write,
    ) -> Result<Flow, ReceiptError> {
        match command {
            ShopCommand::List => self.list(out)?,
            ShopCommand::Add(id) => {
                if let Some(product) = self.product(id, out)? {
                    self.cart.add(product);
                    self.report_line(id, out)?;
                }
            }
            ShopCommand::Toggle(id) => {
                if let Some(product) = self.product(id, out)? {
                    self.cart.toggle(product);
                    self.report_line(id, out)?;
                }
            }
            ShopCommand::Remove(id) => {
                self.cart.remove(id);
                self.report_line(id, out)?;
            }
            ShopCommand::Quantity(id, quantity) => {
                self.cart.set_quantity(id, quantity);
                self.report_line(id, out)?;
            }
            ShopCommand::Increment(id) => {
                self.cart.increment(id);
                self.report_line(id, out)?;
            }
            ShopCommand::Decrement(id) => {
                self.cart.decrement(id);
                self.report_line(id, out)?;
            }
            ShopCommand::Clear => {
                self.cart.clear();
                writeln!(out, "Cart cleared.")?;
            }
            ShopCommand::Show => write_cart(&mut *out, self.cart.state())?,
            ShopCommand::Checkout => self.checkout(out)?,
            ShopCommand::Filter(change) => {
                change.apply(&mut self.filter);
                self.list(out)?;
            }
            ShopCommand::Sort(key) => {
                self.sort = self.sort.toggle(key);
                self.list(out)?;
            }
            ShopCommand::Reload => return Ok(Flow::Reload),
            ShopCommand::Help => writeln!(out, "{HELP}")?,
            ShopCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn list(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let view = self.catalog.view(&self.filter, self.sort);

        write_catalog(&mut *out, &view, self.cart.state())
    }

    fn product(
        &self,
        id: ProductId,
        out: &mut impl io::Write,
    ) -> Result<Option<Product>, ReceiptError> {
        let product = self.catalog.find(id).cloned();

        if product.is_none() {
            writeln!(out, "No skip with id {id} in the catalog.")?;
        }

        Ok(product)
    }

    fn report_line(&self, id: ProductId, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let cart = self.cart.state();

        writeln!(
            out,
            "In cart ({}): {} item(s), {}",
            cart.quantity_of(id),
            cart.total_items(),
            cart.total_money()
        )?;

        Ok(())
    }

    fn checkout(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        if self.cart.state().is_empty() {
            writeln!(out, "Your cart is empty; add a skip before checking out.")?;
            return Ok(());
        }

        write_cart(&mut *out, self.cart.state())?;
        writeln!(
            out,
            "Payment complete. This is a demo storefront; nothing was charged."
        )?;

        Ok(())
    }
}
