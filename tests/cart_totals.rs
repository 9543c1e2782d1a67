//! Cart totals against the built-in catalog.
//!
//! Every state reached through the reducer must report the same totals as a
//! recomputation from its lines.

use testresult::TestResult;

use skiphire::prelude::*;

fn assert_consistent(cart: &CartState) {
    let items: u64 = cart.lines().iter().map(CartLine::quantity).sum();
    let price: u64 = cart.lines().iter().map(|line| *line.subtotal()).sum();

    assert_eq!(cart.total_items(), items, "item count drifted: {cart:?}");
    assert_eq!(*cart.total_price(), price, "total drifted: {cart:?}");
    assert!(
        cart.lines().iter().all(|line| line.quantity() >= 1),
        "empty line kept: {cart:?}"
    );
}

#[test]
fn reducer_keeps_totals_in_step_with_lines() -> TestResult {
    let products = fallback_products()?;
    let mut cart = CartState::default();

    let mut commands: Vec<CartCommand> = Vec::new();

    for (index, product) in products.iter().enumerate() {
        commands.push(CartCommand::Add(product.clone()));

        if index % 2 == 0 {
            commands.push(CartCommand::Add(product.clone()));
        }

        if index % 3 == 0 {
            commands.push(CartCommand::SetQuantity {
                id: product.id,
                quantity: i64::try_from(index)? + 2,
            });
        }
    }

    commands.push(CartCommand::SetQuantity {
        id: ProductId(17_937),
        quantity: i64::MAX,
    });
    commands.push(CartCommand::Add(products.first().cloned().ok_or("empty fallback")?));
    commands.push(CartCommand::Remove(ProductId(17_935)));
    commands.push(CartCommand::SetQuantity {
        id: ProductId(17_936),
        quantity: -3,
    });
    commands.push(CartCommand::Remove(ProductId(1)));

    for command in commands {
        cart = reduce(cart, command);
        assert_consistent(&cart);
    }

    assert!(!cart.contains(ProductId(17_935)));
    assert!(!cart.contains(ProductId(17_936)));
    assert_eq!(cart.len(), products.len() - 2);

    let cart = cart.apply(CartCommand::Clear);
    assert_consistent(&cart);
    assert!(cart.is_empty());
    assert_eq!(cart.total_price(), Price::ZERO);

    Ok(())
}

#[test]
fn reference_scenario() -> TestResult {
    let products = fallback_products()?;
    let four_yard = products
        .iter()
        .find(|product| product.id == ProductId(17_933))
        .cloned()
        .ok_or("4 yard skip missing from fallback")?;

    let cart = CartState::default().add(four_yard.clone());
    assert_eq!((cart.total_items(), cart.total_price()), (1, Price::new(27_800)));

    let cart = cart.add(four_yard);
    assert_eq!((cart.total_items(), cart.total_price()), (2, Price::new(55_600)));

    let cart = cart.set_quantity(ProductId(17_933), 5);
    assert_eq!((cart.total_items(), cart.total_price()), (5, Price::new(139_000)));

    let cart = cart.remove(ProductId(17_933));
    assert!(cart.is_empty());
    assert_eq!((cart.total_items(), cart.total_price()), (0, Price::ZERO));

    Ok(())
}

#[test]
fn store_listeners_see_every_change() -> TestResult {
    use std::sync::{Arc, Mutex};

    let products = fallback_products()?;
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut store = CartStore::default();

    let sink = Arc::clone(&seen);
    store.subscribe(move |state: &CartState| {
        if let Ok(mut seen) = sink.lock() {
            seen.push(state.total_items());
        }
    });

    let product = products.first().cloned().ok_or("empty fallback")?;
    let id = product.id;

    store.add(product.clone());
    store.increment(id);
    store.decrement(id);
    store.toggle(product);

    let seen = seen.lock().map_err(|err| err.to_string())?;
    assert_eq!(*seen, [1, 2, 1, 0]);
    assert!(store.state().is_empty());

    Ok(())
}
