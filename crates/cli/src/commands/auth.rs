//! Session commands: `login`, `register`, `logout`, `whoami`.
//!
//! # Usage
//!
//! ```bash
//! marketplace login -e mike@example.com
//! marketplace register -u mike -e mike@example.com
//! marketplace whoami
//! marketplace logout
//! ```
//!
//! A successful sign-in is persisted, so later invocations (and `shop`)
//! start signed in.

use std::error::Error;

use tracing::info;

use marketplace_client::Storefront;
use marketplace_core::Email;

/// Sign in with the given email, reading the password separately.
pub async fn login(storefront: &mut Storefront, email: &str) -> Result<(), Box<dyn Error>> {
    let email = Email::parse(email)?;
    let password = super::read_password()?;

    let session = storefront.login(&email, &password).await?;
    info!(username = %session.username, "signed in");
    Ok(())
}

/// Create an account and sign in.
pub async fn register(
    storefront: &mut Storefront,
    username: &str,
    email: &str,
) -> Result<(), Box<dyn Error>> {
    let email = Email::parse(email)?;
    let password = super::read_password()?;

    let session = storefront.register(username, &email, &password).await?;
    info!(username = %session.username, "account created and signed in");
    Ok(())
}

/// Sign out and discard the persisted session.
pub fn logout(storefront: &mut Storefront) {
    storefront.logout();
    info!("signed out");
}

/// Show the signed-in account, if any.
pub fn whoami(storefront: &Storefront) {
    match storefront.session().current() {
        Some(session) => {
            let role = if session.is_admin { "admin" } else { "customer" };
            info!(
                user_id = %session.user_id,
                username = %session.username,
                email = %session.email,
                role,
                "signed in"
            );
        }
        None => info!("not signed in"),
    }
}
