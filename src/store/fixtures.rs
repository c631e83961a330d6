use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::{
    dto::{
        customers::NewCustomer,
        orders::NewOrder,
        products::{NewCategory, NewProduct},
    },
    models::{OrderItem, OrderStatus, PaymentStatus, ShippingAddress},
};

pub fn sample_products() -> Vec<NewProduct> {
    let rows = vec![
        (
            "Wireless Noise-Cancelling Headphones",
            249.99,
            Some(299.99),
            "electronics",
            "Over-ear headphones with 30 hours of battery life",
            Some("SoundCore"),
            4.7,
            1284,
        ),
        (
            "Smart Fitness Watch",
            179.0,
            None,
            "electronics",
            "Heart rate, GPS and sleep tracking in a slim case",
            Some("Pulse"),
            4.4,
            862,
        ),
        (
            "Organic Cotton T-Shirt",
            24.5,
            Some(32.0),
            "clothing",
            "Relaxed fit tee made from certified organic cotton",
            None,
            4.2,
            311,
        ),
        (
            "Waterproof Hiking Jacket",
            139.0,
            None,
            "clothing",
            "Breathable shell with taped seams and packable hood",
            Some("Ridgeline"),
            4.6,
            205,
        ),
        (
            "Ceramic Pour-Over Coffee Set",
            58.0,
            None,
            "home",
            "Dripper, carafe and two cups in matte stoneware",
            None,
            4.8,
            97,
        ),
        (
            "Memory Foam Pillow",
            45.0,
            Some(60.0),
            "home",
            "Contoured pillow with a removable bamboo cover",
            Some("RestWell"),
            4.3,
            540,
        ),
        (
            "Yoga Mat Pro",
            68.0,
            None,
            "sports",
            "6mm non-slip mat with alignment markings",
            Some("Flowfit"),
            4.5,
            423,
        ),
        (
            "Hardcover Recipe Journal",
            19.99,
            None,
            "books",
            "Blank recipe book with tabbed sections",
            None,
            4.1,
            58,
        ),
    ];

    rows.into_iter()
        .map(
            |(name, price, original_price, category, description, brand, rating, reviews)| {
                let slug = name.to_lowercase().replace(' ', "-");
                let image = format!("/images/products/{slug}.jpg");
                let mut specifications = BTreeMap::new();
                specifications.insert("category".to_string(), category.to_string());
                if let Some(brand) = brand {
                    specifications.insert("brand".to_string(), brand.to_string());
                }
                NewProduct {
                    name: name.to_string(),
                    price,
                    original_price,
                    images: vec![image.clone(), format!("/images/products/{slug}-2.jpg")],
                    image,
                    category: category.to_string(),
                    description: description.to_string(),
                    rating: Some(rating),
                    reviews: Some(reviews),
                    in_stock: Some(true),
                    brand: brand.map(str::to_string),
                    features: Some(vec![description.to_string()]),
                    specifications: Some(specifications),
                }
            },
        )
        .collect()
}

pub fn sample_categories() -> Vec<NewCategory> {
    let rows = vec![
        ("Electronics", "Phones, audio and wearables", "cpu", 2, true),
        ("Clothing", "Everyday wear and outerwear", "shirt", 2, true),
        ("Home", "Kitchen, bedding and decor", "home", 2, true),
        ("Sports", "Gear for training and the outdoors", "dumbbell", 1, false),
        ("Books", "Notebooks, journals and reading", "book", 1, false),
    ];

    rows.into_iter()
        .map(|(name, description, icon, product_count, featured)| NewCategory {
            image: format!("/images/categories/{}.jpg", name.to_lowercase()),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            product_count,
            featured,
        })
        .collect()
}

/// One delivered order for the fixture customer, placed a week before `now`.
pub fn sample_order(now: DateTime<Utc>) -> NewOrder {
    NewOrder {
        customer_id: "1".to_string(),
        items: vec![
            OrderItem {
                product_id: "1".to_string(),
                name: "Wireless Noise-Cancelling Headphones".to_string(),
                quantity: 1,
                price: 249.99,
                image: "/images/products/wireless-noise-cancelling-headphones.jpg".to_string(),
            },
            OrderItem {
                product_id: "3".to_string(),
                name: "Organic Cotton T-Shirt".to_string(),
                quantity: 2,
                price: 24.5,
                image: "/images/products/organic-cotton-t-shirt.jpg".to_string(),
            },
        ],
        total: 298.99,
        status: OrderStatus::Delivered,
        payment_status: PaymentStatus::Paid,
        shipping_address: ShippingAddress {
            street: "12 Harbour Lane".to_string(),
            city: "Portland".to_string(),
            state: "OR".to_string(),
            zip_code: "97201".to_string(),
            country: "US".to_string(),
        },
        order_date: now - Duration::days(7),
        delivery_date: Some(now - Duration::days(3)),
        tracking_number: Some("TRK1000001".to_string()),
    }
}

pub fn sample_customer(now: DateTime<Utc>) -> NewCustomer {
    NewCustomer {
        first_name: "Jordan".to_string(),
        last_name: "Lee".to_string(),
        email: "jordan.lee@example.com".to_string(),
        phone: Some("+1 503 555 0142".to_string()),
        avatar: None,
        join_date: now - Duration::days(120),
        total_orders: 1,
        total_spent: 298.99,
        loyalty_points: 299,
    }
}
