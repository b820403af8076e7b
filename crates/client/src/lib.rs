//! Sweet Shop client SDK.
//!
//! This crate owns the client side of the Sweet Shop e-commerce system:
//! the authenticated session, its durable persistence, and the local
//! mirrors of the remote cart and wishlist.
//!
//! # Architecture
//!
//! - The gateway is the source of truth. Cart and wishlist mirrors are
//!   replaced wholesale with each successful mutation response; the client
//!   never edits them field by field.
//! - The session survives restarts through two durable entries (token +
//!   profile) managed by a [`store::SessionStore`].
//! - Everything hangs off one [`SweetShop`] handle, constructed once and
//!   passed to whoever needs it. Cloning is cheap (`Arc` inside); there is
//!   no ambient global.
//!
//! # Example
//!
//! ```rust,ignore
//! use sweetshop_client::{ClientConfig, SweetShop};
//!
//! let shop = SweetShop::new(&ClientConfig::from_env()?)?;
//! shop.login("jane@example.com", "hunter2!").await?;
//! shop.add_to_cart(&sweet.id, 2).await?;
//! println!("{} items, total {}", shop.cart_item_count(), shop.cart_total());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod session;
pub mod store;
pub mod sync;
pub mod totals;

pub use auth::{NewAccount, SocialProfile, SocialProvider};
pub use client::SweetShop;
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use session::AuthState;
