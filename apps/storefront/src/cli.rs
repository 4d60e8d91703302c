//! # Command Line Interface
//!
//! Argument definitions (clap derive). Dispatch lives in `lib.rs`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browse the product catalog and manage a shopping cart that persists
/// between runs.
#[derive(Parser, Debug)]
#[command(name = "storefront", version, about)]
pub struct Cli {
    /// Print responses (and errors) as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file to use instead of the platform default
    #[arg(long, global = true, env = "STOREFRONT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every product in the catalog
    Products,

    /// Show one product
    Product {
        /// Product id
        id: String,
    },

    /// View or change the cart
    #[command(subcommand)]
    Cart(CartAction),

    /// Order summary for the selected cart lines
    Summary {
        /// Select a line for checkout (repeatable)
        #[arg(long = "select", value_name = "ID")]
        select: Vec<String>,

        /// Select every line
        #[arg(long)]
        all: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Show cart lines and totals
    Show,

    /// Add a product (looked up in the catalog)
    Add {
        id: String,

        /// Units to put in the cart; values below one count as one
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Remove a line
    Remove { id: String },

    /// Set a line's quantity; zero or less removes it
    Set {
        id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// One more unit
    Inc { id: String },

    /// One less unit; the line goes away below one
    Dec { id: String },

    /// Empty the cart
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cart_add() {
        let cli = Cli::try_parse_from(["storefront", "--json", "cart", "add", "3", "-q", "2"]).unwrap();
        assert!(cli.json);
        assert_eq!(
            cli.command,
            Command::Cart(CartAction::Add {
                id: "3".to_string(),
                quantity: 2
            })
        );
    }

    #[test]
    fn test_parse_summary_and_negative_set() {
        let cli = Cli::try_parse_from(["storefront", "summary", "--select", "1", "--select", "4"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Summary {
                select: vec!["1".to_string(), "4".to_string()],
                all: false
            }
        );

        let cli = Cli::try_parse_from(["storefront", "cart", "set", "2", "-1"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Cart(CartAction::Set {
                id: "2".to_string(),
                quantity: -1
            })
        );
    }
}
