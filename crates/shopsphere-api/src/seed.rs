//! # Demo Catalog
//!
//! The products the mock API starts with.
//!
//! Each category lists `(name, base price in cents)`. Stock and the final
//! price are derived from the product's position so the catalog is the same
//! on every run, with a few sold-out items to exercise the stock checks.

use shopsphere_core::{Money, Product};

const CATEGORIES: &[(&str, &[(&str, i64)])] = &[
    (
        "Electronics",
        &[
            ("Wireless Earbuds", 5999),
            ("Bluetooth Speaker", 3499),
            ("USB-C Charger", 1999),
            ("Mechanical Keyboard", 8999),
            ("Webcam 1080p", 4499),
        ],
    ),
    (
        "Apparel",
        &[
            ("Linen Shirt", 4500),
            ("Denim Jacket", 7900),
            ("Wool Beanie", 1800),
            ("Canvas Sneakers", 5500),
        ],
    ),
    (
        "Home",
        &[
            ("Ceramic Vase", 2900),
            ("Throw Blanket", 3900),
            ("Desk Lamp", 3200),
            ("Wall Clock", 2400),
        ],
    ),
    (
        "Kitchen",
        &[
            ("Enamel Mug", 1250),
            ("Chef's Knife", 6900),
            ("Cast Iron Skillet", 4200),
            ("French Press", 2800),
        ],
    ),
    (
        "Books",
        &[
            ("The Rust Programming Language", 3995),
            ("Designing Data-Intensive Applications", 4599),
            ("Cooking for Engineers", 2250),
        ],
    ),
];

/// Builds the demo catalog with ids starting at 1.
pub fn demo_catalog() -> Vec<Product> {
    let mut products = Vec::new();
    let mut id = 1u32;

    for (category, items) in CATEGORIES {
        for (name, base_cents) in items.iter() {
            products.push(generate_product(id, category, name, *base_cents));
            id += 1;
        }
    }

    products
}

fn generate_product(id: u32, category: &str, name: &str, base_cents: i64) -> Product {
    let seed = id as usize;

    // Every seventh product is sold out.
    let stock = if seed % 7 == 0 {
        0
    } else {
        ((seed * 13) % 40 + 3) as u32
    };

    let slug: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");

    Product {
        id,
        name: name.to_string(),
        category: category.to_string(),
        price: Money::from_cents(base_cents),
        image_url: format!("https://picsum.photos/seed/{}/400/300", slug),
        stock,
    }
}
