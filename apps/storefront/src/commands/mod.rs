//! # Shell Commands Module
//!
//! Everything the shopper can type at the `>` prompt.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (parsing, dispatch)
//! ├── session.rs  ◄─── Navigation, login, logout
//! ├── product.rs  ◄─── Filter, search, edit/delete requests
//! ├── cart.rs     ◄─── Cart drawer and checkout
//! └── admin.rs    ◄─── Admin product form
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin: "qty 7 3"                                                       │
//! │         │                                                               │
//! │         ▼  Command::from_str                                            │
//! │  Command::Qty { product_id: 7, quantity: 3 }                            │
//! │         │                                                               │
//! │         ▼  execute(&mut Shell, command)                                 │
//! │  cart::set_quantity(shell, 7, 3) -> AppResult<Outcome>                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Shell prints the message (or error), then the next frame               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod admin;
pub mod cart;
pub mod product;
pub mod session;

use std::str::FromStr;

use shopsphere_core::Credentials;

use crate::error::{AppError, AppResult};
use crate::shell::Shell;
use crate::state::FormField;

/// Shown by `help`.
pub const HELP: &str = "\
Navigation:  products | admin | login-page
Session:     login [<user> <password>] | logout
Browse:      filter <category>|all | search [<text>]
Cart:        add <id> | remove <id> | qty <id> <n> | cart | close-cart | checkout
Admin:       new | edit <id> | delete <id> | set <field> <value> | save | cancel
Modals:      confirm | dismiss
Other:       help | quit";

/// A parsed shell command.
#[derive(Debug, Clone)]
pub enum Command {
    Help,
    Products,
    Admin,
    LoginPage,
    /// Without credentials this opens the login modal.
    Login(Option<Credentials>),
    Logout,
    Filter(Option<String>),
    Search(String),
    Add(u32),
    Remove(u32),
    Qty { product_id: u32, quantity: u32 },
    Cart,
    CloseCart,
    Checkout,
    Edit(u32),
    New,
    Set(FormField, String),
    Save,
    Cancel,
    Delete(u32),
    Confirm,
    Dismiss,
    Quit,
}

/// What the shell does after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the optional message, then the next frame.
    Continue(Option<String>),
    Quit,
}

impl Outcome {
    pub fn message(text: impl Into<String>) -> Self {
        Outcome::Continue(Some(text.into()))
    }

    pub fn silent() -> Self {
        Outcome::Continue(None)
    }
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words
            .next()
            .ok_or_else(|| AppError::invalid_command("empty command"))?
            .to_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match (name.as_str(), args.as_slice()) {
            ("help" | "?", []) => Command::Help,
            ("products" | "home", []) => Command::Products,
            ("admin", []) => Command::Admin,
            ("login-page", []) => Command::LoginPage,
            ("login", []) => Command::Login(None),
            ("login", [user, password]) => Command::Login(Some(Credentials::new(*user, *password))),
            ("logout", []) => Command::Logout,
            ("filter", []) => return Err(usage("filter <category>|all")),
            ("filter", [all]) if all.eq_ignore_ascii_case("all") => Command::Filter(None),
            ("filter", words) => Command::Filter(Some(words.join(" "))),
            ("search", words) => Command::Search(words.join(" ")),
            ("add", [id]) => Command::Add(parse_id(id)?),
            ("remove", [id]) => Command::Remove(parse_id(id)?),
            ("qty", [id, n]) => Command::Qty {
                product_id: parse_id(id)?,
                quantity: parse_number("quantity", n)?,
            },
            ("cart", []) => Command::Cart,
            ("close-cart", []) => Command::CloseCart,
            ("checkout", []) => Command::Checkout,
            ("edit", [id]) => Command::Edit(parse_id(id)?),
            ("new", []) => Command::New,
            ("set", [field, value @ ..]) if !value.is_empty() => {
                Command::Set(field.parse()?, value.join(" "))
            }
            ("save", []) => Command::Save,
            ("cancel", []) => Command::Cancel,
            ("delete", [id]) => Command::Delete(parse_id(id)?),
            ("confirm", []) => Command::Confirm,
            ("dismiss", []) => Command::Dismiss,
            ("quit" | "exit", []) => Command::Quit,

            ("login", _) => return Err(usage("login <user> <password>")),
            ("add" | "remove" | "edit" | "delete", _) => {
                return Err(usage(&format!("{} <id>", name)))
            }
            ("qty", _) => return Err(usage("qty <id> <n>")),
            ("set", _) => return Err(usage("set <field> <value>")),
            (
                "help" | "?" | "products" | "home" | "admin" | "login-page" | "logout" | "cart"
                | "close-cart" | "checkout" | "new" | "save" | "cancel" | "confirm" | "dismiss"
                | "quit" | "exit",
                _,
            ) => return Err(AppError::invalid_command(format!("'{}' takes no arguments", name))),
            _ => {
                return Err(AppError::invalid_command(format!(
                    "unknown command '{}', type 'help'",
                    name
                )))
            }
        };

        Ok(command)
    }
}

fn usage(text: &str) -> AppError {
    AppError::invalid_command(format!("usage: {}", text))
}

fn parse_id(raw: &str) -> AppResult<u32> {
    parse_number("product id", raw)
}

fn parse_number(what: &str, raw: &str) -> AppResult<u32> {
    raw.parse::<u32>()
        .map_err(|_| AppError::invalid_command(format!("{} must be a whole number, got '{}'", what, raw)))
}

/// Runs one command against the shell state.
pub async fn execute(shell: &mut Shell, command: Command) -> AppResult<Outcome> {
    match command {
        Command::Help => Ok(Outcome::message(HELP)),
        Command::Quit => Ok(Outcome::Quit),

        Command::Products => session::show_products(shell),
        Command::Admin => session::show_admin(shell),
        Command::LoginPage => session::show_login_page(shell),
        Command::Login(None) => session::open_login(shell),
        Command::Login(Some(credentials)) => session::login(shell, credentials).await,
        Command::Logout => session::logout(shell),

        Command::Filter(category) => product::filter(shell, category).await,
        Command::Search(query) => product::search(shell, &query),
        Command::Edit(id) => product::edit(shell, id).await,
        Command::New => product::create(shell),
        Command::Delete(id) => product::request_delete(shell, id),
        Command::Confirm => product::confirm_delete(shell),
        Command::Dismiss => product::dismiss(shell),

        Command::Add(id) => cart::add(shell, id).await,
        Command::Remove(id) => cart::remove(shell, id),
        Command::Qty {
            product_id,
            quantity,
        } => cart::set_quantity(shell, product_id, quantity),
        Command::Cart => cart::open(shell),
        Command::CloseCart => cart::close(shell),
        Command::Checkout => cart::checkout(shell).await,

        Command::Set(field, value) => admin::set_field(shell, field, value),
        Command::Save => admin::save(shell).await,
        Command::Cancel => admin::cancel(shell),
    }
}
