//! # Commands
//!
//! One function per shopper action. Each returns a response value that can
//! be printed as text or as JSON (`--json`).
//!
//! ## Command Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  product.rs   products            home page listing                     │
//! │               product <id>        detail page                           │
//! │                                                                         │
//! │  cart.rs      cart show/add/remove/set/inc/dec/clear                    │
//! │               summary [--select <id>...] [--all]                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod product;

use serde::Serialize;
use std::fmt::Display;

use crate::error::AppResult;

/// Renders a response as pretty JSON or as its text form.
pub fn render<T>(response: &T, json: bool) -> AppResult<String>
where
    T: Serialize + Display,
{
    if json {
        Ok(serde_json::to_string_pretty(response)?)
    } else {
        Ok(response.to_string())
    }
}
