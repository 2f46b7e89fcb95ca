//! The semantic command inventory of the terminal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic operator commands a key can be bound to.
///
/// The engine never interprets a command beyond `Help` and `Cancel`, which
/// also drive help-overlay visibility; everything else is an opaque host
/// handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandId {
    /// Toggle the help overlay.
    Help,
    /// Focus the product search.
    SearchProduct,
    /// Attach a customer account to the sale.
    SelectCustomer,
    /// Apply a discount to the current line or sale.
    Discount,
    /// Park the current cart and start a new one.
    HoldCart,
    /// Open the cash drawer.
    OpenDrawer,
    /// Empty the cart.
    ClearCart,
    /// Start payment.
    Payment,
    /// Increase the selected line's quantity.
    IncreaseQuantity,
    /// Decrease the selected line's quantity.
    DecreaseQuantity,
    /// Remove the selected line.
    DeleteLine,
    /// Cancel the current operation; always hides the help overlay.
    Cancel,
}

impl CommandId {
    /// Every command, in catalog order.
    pub const ALL: [Self; 12] = [
        Self::Help,
        Self::SearchProduct,
        Self::SelectCustomer,
        Self::Discount,
        Self::HoldCart,
        Self::OpenDrawer,
        Self::ClearCart,
        Self::Payment,
        Self::IncreaseQuantity,
        Self::DecreaseQuantity,
        Self::DeleteLine,
        Self::Cancel,
    ];

    /// Snake-case identifier, as written in keymap files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::SearchProduct => "search_product",
            Self::SelectCustomer => "select_customer",
            Self::Discount => "discount",
            Self::HoldCart => "hold_cart",
            Self::OpenDrawer => "open_drawer",
            Self::ClearCart => "clear_cart",
            Self::Payment => "payment",
            Self::IncreaseQuantity => "increase_quantity",
            Self::DecreaseQuantity => "decrease_quantity",
            Self::DeleteLine => "delete_line",
            Self::Cancel => "cancel",
        }
    }

    /// Parse a snake-case identifier.
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == s)
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
