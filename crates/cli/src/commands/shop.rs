//! Shop client commands.
//!
//! Session state decides where the cart lives: with no stored token the cart
//! is the guest shadow on disk; once logged in every cart command goes to the
//! server. Each command reads from exactly one of the two sources, never
//! both. The only bridge is `cart merge`, which the user invokes explicitly.

// The shop client's job is printing to stdout.
#![allow(clippy::print_stdout)]

use atelier_core::ProductId;

use crate::client::ApiClient;
use crate::guest_cart::{GuestCart, GuestCartItem};
use crate::session::ClientState;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn client(state: &ClientState) -> ApiClient {
    ApiClient::new(ApiClient::base_url_from_env(), state.token())
}

/// Anonymous client for the public catalogue routes.
fn public_client() -> ApiClient {
    ApiClient::new(ApiClient::base_url_from_env(), None)
}

/// Register a new account. Does not log in; run `login` afterwards.
pub async fn register(name: &str, email: &str, password: &str) -> CommandResult {
    let message = public_client().register(name, email, password).await?;
    println!("{message}");
    Ok(())
}

/// Login and store the bearer token for subsequent commands.
pub async fn login(email: &str, password: &str) -> CommandResult {
    let state = ClientState::from_env();
    let token = public_client().login(email, password).await?;
    state.save_token(&token)?;

    let cart = GuestCart::load(&state.guest_cart_path())?;
    if cart.is_empty() {
        println!("Logged in as {email}.");
    } else {
        // The guest shadow is never merged automatically
        println!(
            "Logged in as {email}. Your guest cart still holds {} item(s); run `cart merge` to move them to your account.",
            cart.len()
        );
    }
    Ok(())
}

/// Discard the stored token. The guest shadow is untouched.
pub fn logout() -> CommandResult {
    let state = ClientState::from_env();
    state.clear_token()?;
    println!("Logged out.");
    Ok(())
}

/// Show the logged-in user's profile.
pub async fn whoami() -> CommandResult {
    let state = ClientState::from_env();
    let profile = client(&state).profile().await?;
    println!("{} <{}>", profile.name, profile.email);
    Ok(())
}

/// List the catalogue.
pub async fn list_products() -> CommandResult {
    let products = public_client().products().await?;

    if products.is_empty() {
        println!("No products found.");
        return Ok(());
    }

    for product in products {
        println!("{:>4}  {}  ${}", product.id, product.name, product.price);
    }
    Ok(())
}

/// Show a single product.
pub async fn show_product(id: i32) -> CommandResult {
    let product = public_client().product(ProductId::new(id)).await?;

    println!("{} (#{})", product.name, product.id);
    println!("${}", product.price);
    println!("{}", product.description);
    if !product.designer_notes.is_empty() {
        println!("Designer notes: {}", product.designer_notes);
    }
    Ok(())
}

/// Add a product to the cart.
///
/// Logged in: the server cart. Guest: snapshot the product into the shadow,
/// incrementing an existing line for the same product.
pub async fn cart_add(product_id: i32, quantity: u32) -> CommandResult {
    let state = ClientState::from_env();
    let product_id = ProductId::new(product_id);

    if state.token().is_some() {
        let cart = client(&state).cart_add(product_id, quantity).await?;
        println!("Added to cart ({} item(s)).", cart.items.len());
        return Ok(());
    }

    let product = public_client().product(product_id).await?;

    let path = state.guest_cart_path();
    let mut cart = GuestCart::load(&path)?;
    cart.add(GuestCartItem {
        id: product.id,
        name: product.name.clone(),
        price: product.price,
        image: product.image_url,
        quantity,
    });
    cart.save(&path)?;

    println!(
        "{} added to your guest cart ({} item(s)).",
        product.name,
        cart.len()
    );
    Ok(())
}

/// Remove a product from the cart.
pub async fn cart_remove(product_id: i32) -> CommandResult {
    let state = ClientState::from_env();
    let product_id = ProductId::new(product_id);

    if state.token().is_some() {
        let cart = client(&state).cart_remove(product_id).await?;
        println!("Item removed from cart ({} item(s) left).", cart.items.len());
        return Ok(());
    }

    let path = state.guest_cart_path();
    let mut cart = GuestCart::load(&path)?;
    cart.remove(product_id);
    cart.save(&path)?;

    println!("Item removed from guest cart ({} item(s) left).", cart.len());
    Ok(())
}

/// Show the cart's items.
pub async fn cart_show() -> CommandResult {
    let state = ClientState::from_env();

    if state.token().is_some() {
        let cart = client(&state).cart_fetch().await?;
        if cart.items.is_empty() {
            println!("Your cart is empty.");
            return Ok(());
        }
        for item in cart.items {
            println!("{:>3} x {}  ${}", item.quantity, item.name, item.price);
        }
        return Ok(());
    }

    let cart = GuestCart::load(&state.guest_cart_path())?;
    if cart.is_empty() {
        println!("Your guest cart is empty.");
        return Ok(());
    }
    for item in cart.items() {
        println!("{:>3} x {}  ${}", item.quantity, item.name, item.price);
    }
    Ok(())
}

/// Show the cart's distinct item count from exactly one source: the server
/// cart when logged in, the guest shadow otherwise.
pub async fn cart_count() -> CommandResult {
    let state = ClientState::from_env();

    let count = if state.token().is_some() {
        client(&state).cart_fetch().await?.items.len()
    } else {
        GuestCart::load(&state.guest_cart_path())?.len()
    };

    println!("{count}");
    Ok(())
}

/// Replay the guest shadow into the server cart, then clear the shadow.
///
/// Quantities merge under the server's rules: lines already in the server
/// cart are incremented, new ones are appended with a fresh snapshot.
pub async fn cart_merge() -> CommandResult {
    let state = ClientState::from_env();

    if state.token().is_none() {
        return Err("not logged in; run `login` first".into());
    }

    let path = state.guest_cart_path();
    let guest = GuestCart::load(&path)?;
    if guest.is_empty() {
        println!("Guest cart is empty; nothing to merge.");
        return Ok(());
    }

    let api = client(&state);
    let mut merged = 0usize;
    for item in guest.items() {
        api.cart_add(item.id, item.quantity).await?;
        merged += 1;
    }

    GuestCart::clear(&path)?;

    let cart = api.cart_fetch().await?;
    println!(
        "Merged {merged} guest item(s); your cart now holds {} item(s).",
        cart.items.len()
    );
    Ok(())
}
