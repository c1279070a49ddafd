//! # Text Rendering
//!
//! Turns a [`Frame`] into the text the shell prints.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ShopSphere                     [products] [admin]  cart (3)  login     │ header
//! │  ─────────────────────────────────────────────────────────────────────  │
//! │  * Product 7 deleted                                                    │ notice
//! │                                                                         │
//! │  main screen (loading / login / products / admin form)                  │
//! │                                                                         │
//! │  ── Cart ──────────                                                     │ drawer
//! │  [!] modal                                                              │ modals
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::{self, Display, Formatter};

use shopsphere_core::Product;

use crate::state::{
    AppConfig, CartSnapshot, FormField, Frame, ProductCatalog, ProductForm, Screen, Session,
};

const RULE: &str = "------------------------------------------------------------";

/// Everything needed to print one frame.
pub struct FrameView<'a> {
    pub frame: &'a Frame,
    pub config: &'a AppConfig,
    pub session: &'a Session,
    pub cart_quantity: u32,
    pub catalog: &'a ProductCatalog,
    pub form: Option<&'a ProductForm>,
    pub notice: Option<&'a str>,
}

impl Display for FrameView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.frame.screen == Screen::Loading {
            return writeln!(f, "Loading...");
        }

        self.header(f)?;

        if let Some(notice) = self.notice {
            writeln!(f, "* {}", notice)?;
        }
        writeln!(f)?;

        match &self.frame.screen {
            Screen::Loading => {}
            Screen::Login => self.login_screen(f)?,
            Screen::Products => self.product_list(f)?,
            Screen::Admin { editing } => self.admin_form(f, editing.as_ref())?,
        }

        if let Some(cart) = &self.frame.cart_drawer {
            self.cart_drawer(f, cart)?;
        }

        if self.frame.login_modal {
            writeln!(f)?;
            writeln!(f, "[!] Admin access requires an admin login.")?;
            writeln!(f, "    login <user> <password>   or   dismiss")?;
        }

        if let Some(id) = self.frame.delete_modal {
            writeln!(f)?;
            writeln!(f, "[?] Delete product {}? This cannot be undone.", id)?;
            writeln!(f, "    confirm   or   dismiss")?;
        }

        Ok(())
    }
}

impl FrameView<'_> {
    fn money(&self, product: &Product) -> String {
        self.config.format_currency(product.price)
    }

    fn header(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let account = match &self.session.user {
            Some(user) if self.session.is_authenticated => {
                format!("{} ({}) | logout", user.username, user.role)
            }
            _ => "login".to_string(),
        };

        writeln!(
            f,
            "{}   [products] [admin]   cart ({})   {}",
            self.config.store_name, self.cart_quantity, account
        )?;
        writeln!(f, "{}", RULE)
    }

    fn login_screen(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Log in to continue.")?;
        writeln!(f, "  login <user> <password>")?;
        writeln!(f, "  products   (back to the shop)")
    }

    fn product_list(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let categories = self.catalog.categories();
        let active = self.catalog.category();

        write!(f, "Categories: ")?;
        write!(f, "{}", if active.is_none() { "[all]" } else { "all" })?;
        for category in &categories {
            let selected = active.map_or(false, |a| a.eq_ignore_ascii_case(category));
            if selected {
                write!(f, " | [{}]", category)?;
            } else {
                write!(f, " | {}", category)?;
            }
        }
        writeln!(f)?;

        if !self.catalog.query().is_empty() {
            writeln!(f, "Search: \"{}\"", self.catalog.query())?;
        }
        writeln!(f)?;

        let visible = self.catalog.visible();
        if visible.is_empty() {
            writeln!(f, "  No products found.")?;
        }

        for product in visible {
            let stock = if product.in_stock() {
                format!("{} in stock", product.stock)
            } else {
                "sold out".to_string()
            };
            writeln!(
                f,
                "  #{:<4} {:<40} {:<12} {:>10}  {}",
                product.id,
                product.name,
                product.category,
                self.money(product),
                stock
            )?;
        }

        writeln!(f)?;
        if self.session.role.is_admin() {
            writeln!(f, "add <id> | edit <id> | delete <id> | new | filter | search")
        } else {
            writeln!(f, "add <id> | cart | filter <category>|all | search <text>")
        }
    }

    fn admin_form(&self, f: &mut Formatter<'_>, editing: Option<&Product>) -> fmt::Result {
        match editing {
            Some(product) => writeln!(f, "Admin / Edit product #{}", product.id)?,
            None => writeln!(f, "Admin / New product")?,
        }
        writeln!(f)?;

        if let Some(form) = self.form {
            for field in FormField::ALL {
                writeln!(f, "  {:<9} {}", field, form.get(field))?;
            }
        }

        writeln!(f)?;
        writeln!(f, "set <field> <value> | save | cancel")
    }

    fn cart_drawer(&self, f: &mut Formatter<'_>, cart: &CartSnapshot) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "-- Cart --")?;

        if cart.is_empty() {
            writeln!(f, "  Your cart is empty.")?;
        } else {
            for item in &cart.items {
                writeln!(
                    f,
                    "  #{:<4} {:<40} x{:<4} {:>10}",
                    item.product_id(),
                    item.product.name,
                    item.quantity,
                    self.config.format_currency(item.line_total())
                )?;
            }
            writeln!(
                f,
                "  Subtotal ({} items): {}",
                cart.total_quantity,
                self.config.format_currency(cart.subtotal)
            )?;
        }

        writeln!(f, "qty <id> <n> | remove <id> | checkout | close-cart")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopsphere_core::{CartItem, Money, Role, User};
    use tokio::sync::broadcast;

    fn session(user: Option<(&str, Role)>) -> Session {
        let mut s = Session {
            is_authenticated: false,
            role: Role::Customer,
            is_loading: false,
            token: None,
            user: None,
        };
        if let Some((name, role)) = user {
            s.is_authenticated = true;
            s.role = role;
            s.token = Some("t".to_string());
            s.user = Some(User {
                id: 1,
                username: name.to_string(),
                role,
            });
        }
        s
    }

    fn frame(screen: Screen) -> Frame {
        Frame {
            screen,
            cart_drawer: None,
            login_modal: false,
            delete_modal: None,
        }
    }

    fn print(frame: &Frame, session: &Session, form: Option<&ProductForm>) -> String {
        let (_tx, rx) = broadcast::channel(1);
        let catalog = ProductCatalog::new(rx);
        let config = AppConfig::default();
        FrameView {
            frame,
            config: &config,
            session,
            cart_quantity: 2,
            catalog: &catalog,
            form,
            notice: Some("Product 7 deleted"),
        }
        .to_string()
    }

    #[test]
    fn test_loading_prints_only_placeholder() {
        let out = print(&frame(Screen::Loading), &session(None), None);
        assert_eq!(out, "Loading...\n");
    }

    #[test]
    fn test_header_shows_account_and_badge() {
        let out = print(&frame(Screen::Products), &session(Some(("admin", Role::Admin))), None);
        assert!(out.starts_with("ShopSphere"));
        assert!(out.contains("cart (2)"));
        assert!(out.contains("admin (admin) | logout"));
        assert!(out.contains("* Product 7 deleted"));
        assert!(out.contains("No products found."));
    }

    #[test]
    fn test_modals_are_printed() {
        let mut f = frame(Screen::Products);
        f.login_modal = true;
        f.delete_modal = Some(42);
        let out = print(&f, &session(None), None);
        assert!(out.contains("[!] Admin access requires an admin login."));
        assert!(out.contains("[?] Delete product 42?"));
    }

    #[test]
    fn test_admin_form_fields() {
        let product = Product {
            id: 9,
            name: "Desk Lamp".to_string(),
            category: "Home".to_string(),
            price: Money::from_cents(3200),
            image_url: "https://picsum.photos/seed/desk-lamp/400/300".to_string(),
            stock: 4,
        };
        let form = ProductForm::edit(&product);
        let out = print(
            &frame(Screen::Admin {
                editing: Some(product),
            }),
            &session(Some(("admin", Role::Admin))),
            Some(&form),
        );
        assert!(out.contains("Admin / Edit product #9"));
        assert!(out.contains("price     32.00"));
    }

    #[test]
    fn test_cart_drawer_totals() {
        let lamp = Product {
            id: 3,
            name: "Desk Lamp".to_string(),
            category: "Home".to_string(),
            price: Money::from_cents(3200),
            image_url: "https://picsum.photos/seed/desk-lamp/400/300".to_string(),
            stock: 4,
        };
        let mut f = frame(Screen::Products);
        f.cart_drawer = Some(CartSnapshot {
            items: vec![CartItem {
                product: lamp,
                quantity: 2,
            }],
            item_count: 1,
            total_quantity: 2,
            subtotal: Money::from_cents(6400),
        });

        let out = print(&f, &session(None), None);
        assert!(out.contains("-- Cart --"));
        assert!(out.contains("Subtotal (2 items): $64.00"));
    }
}
