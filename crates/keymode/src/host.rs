//! Host configuration: the optional handlers and blocking flags a screen supplies.

use std::{collections::HashMap, error::Error as StdError, fmt, sync::Arc};

use crate::CommandId;

/// Boxed error returned by host handlers.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result of a host handler invocation.
pub type HandlerResult = Result<(), BoxError>;

/// A zero-argument host callback bound to one command.
#[derive(Clone)]
pub struct Handler(Arc<dyn Fn() -> HandlerResult + Send + Sync>);

impl Handler {
    /// Wrap a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> HandlerResult + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the callback. Errors are returned untouched.
    pub fn call(&self) -> HandlerResult {
        (self.0)()
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

/// Immutable snapshot of what the embedding screen supplied on its last render.
///
/// A missing handler is not an error: the command turns into a silent no-op
/// and is reported as disabled in the catalog.
#[derive(Debug, Clone, Default)]
pub struct HostConfig {
    handlers: HashMap<CommandId, Handler>,
    blocking_dialog_open: bool,
    search_open: bool,
}

macro_rules! named_handlers {
    ( $( $(#[$doc:meta])* $fn_name:ident => $cmd:ident, )* ) => {
        impl HostConfig {
            $(
                $(#[$doc])*
                pub fn $fn_name<F>(self, f: F) -> Self
                where
                    F: Fn() -> HandlerResult + Send + Sync + 'static,
                {
                    self.on(CommandId::$cmd, f)
                }
            )*
        }
    };
}

named_handlers! {
    /// Handler for the help key (in addition to the overlay toggle).
    on_help => Help,
    /// Handler for product search.
    on_search_product => SearchProduct,
    /// Handler for customer selection.
    on_select_customer => SelectCustomer,
    /// Handler for discounts.
    on_discount => Discount,
    /// Handler for parking the cart.
    on_hold_cart => HoldCart,
    /// Handler for opening the cash drawer.
    on_open_drawer => OpenDrawer,
    /// Handler for clearing the cart.
    on_clear_cart => ClearCart,
    /// Handler for payment.
    on_payment => Payment,
    /// Handler for quantity increase.
    on_increase_quantity => IncreaseQuantity,
    /// Handler for quantity decrease.
    on_decrease_quantity => DecreaseQuantity,
    /// Handler for line deletion.
    on_delete_line => DeleteLine,
    /// Handler for cancel (in addition to hiding the overlay).
    on_cancel => Cancel,
}

impl HostConfig {
    /// An empty configuration: every command disabled, no dialog open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a closure to a command, replacing any previous handler.
    pub fn on<F>(self, command: CommandId, f: F) -> Self
    where
        F: Fn() -> HandlerResult + Send + Sync + 'static,
    {
        self.with_handler(command, Handler::new(f))
    }

    /// Bind an existing handler to a command.
    pub fn with_handler(mut self, command: CommandId, handler: Handler) -> Self {
        self.handlers.insert(command, handler);
        self
    }

    /// Set whether a blocking dialog (e.g. payment in progress) is open.
    pub fn blocking_dialog(mut self, open: bool) -> Self {
        self.blocking_dialog_open = open;
        self
    }

    /// Set whether the auxiliary search surface is open.
    pub fn search_open(mut self, open: bool) -> Self {
        self.search_open = open;
        self
    }

    /// Handler supplied for `command`, if any.
    pub fn handler(&self, command: CommandId) -> Option<&Handler> {
        self.handlers.get(&command)
    }

    /// True if the host supplied a handler for `command`.
    pub fn provides(&self, command: CommandId) -> bool {
        self.handlers.contains_key(&command)
    }

    /// Blocking dialog flag.
    pub fn is_blocking_dialog_open(&self) -> bool {
        self.blocking_dialog_open
    }

    /// Search surface flag.
    pub fn is_search_open(&self) -> bool {
        self.search_open
    }
}
