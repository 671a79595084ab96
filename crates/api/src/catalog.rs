//! Service catalog.
//!
//! The catalog is built once at startup and shared read-only by every
//! request. Cart operations look items up here by option ID.

use serde::Serialize;
use smart_laundry_core::Price;

/// Languages the frontend ships translations for.
pub const LANGUAGES: [&str; 3] = ["en", "hi", "mr"];

/// Category entry that matches every service.
pub const ALL_CATEGORIES: &str = "All";

/// A laundry service (e.g. "Wash & Fold") and the items it accepts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: &'static str,
    pub name: &'static str,
    pub name_key: &'static str,
    pub category: &'static str,
    pub icon: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub desc_key: &'static str,
    pub tagline: &'static str,
    pub tagline_key: &'static str,
    /// Typical turnaround elsewhere.
    pub before: &'static str,
    /// Our turnaround.
    pub after: &'static str,
    pub steps: Vec<Step>,
    pub options: Vec<CatalogOption>,
    pub perks: Vec<Perk>,
}

/// A purchasable item within a service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOption {
    pub id: &'static str,
    pub label: &'static str,
    pub label_key: &'static str,
    pub price: Price,
    pub emoji: &'static str,
}

/// One step of how a service is carried out.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub key: &'static str,
    pub text: &'static str,
}

/// A selling point of a service.
#[derive(Debug, Clone, Serialize)]
pub struct Perk {
    pub key: &'static str,
    pub text: &'static str,
}

/// The full, immutable catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    services: Vec<Service>,
}

impl Catalog {
    /// Create a catalog from a list of services.
    #[must_use]
    pub const fn new(services: Vec<Service>) -> Self {
        Self { services }
    }

    /// All services, in display order.
    #[must_use]
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// A service by ID.
    #[must_use]
    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// The first option with this ID across all services.
    #[must_use]
    pub fn find_option(&self, item_id: &str) -> Option<&CatalogOption> {
        self.services
            .iter()
            .flat_map(|s| s.options.iter())
            .find(|o| o.id == item_id)
    }

    /// `"All"` followed by each distinct service category, in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&'static str> {
        let mut categories = vec![ALL_CATEGORIES];
        for service in &self.services {
            if !categories.contains(&service.category) {
                categories.push(service.category);
            }
        }
        categories
    }

    /// The catalog the store currently sells.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![wash_fold(), dry_clean(), shoe_care(), home_care()])
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// =============================================================================
// Builtin Catalog
// =============================================================================

const fn step(key: &'static str, text: &'static str) -> Step {
    Step { key, text }
}

const fn perk(text: &'static str) -> Perk {
    Perk { key: text, text }
}

fn option(
    id: &'static str,
    label: &'static str,
    label_key: &'static str,
    price: i64,
    emoji: &'static str,
) -> CatalogOption {
    CatalogOption {
        id,
        label,
        label_key,
        price: Price::from_whole(price),
        emoji,
    }
}

fn wash_fold() -> Service {
    Service {
        id: "wash-fold",
        name: "Wash & Fold",
        name_key: "services.wash_fold.name",
        category: "Laundry",
        icon: "👔",
        emoji: "👔",
        description: "Regular clothes washing and folding",
        desc_key: "services.wash_fold.desc",
        tagline: "Fresh & Clean Every Time",
        tagline_key: "services.wash_fold.tagline",
        before: "2 days",
        after: "Same day",
        steps: vec![
            step("pickup", "Free Pickup"),
            step("wash", "Professional Wash"),
            step("dry", "Gentle Drying"),
            step("deliver", "Doorstep Delivery"),
        ],
        options: vec![
            option("shirt", "Shirt", "items.shirt", 25, "👔"),
            option("tshirt", "T-Shirt", "items.tshirt", 20, "👕"),
            option("jeans", "Jeans", "items.jeans", 40, "👖"),
            option("dress", "Dress", "items.dress", 60, "👗"),
        ],
        perks: vec![
            perk("Free pickup & delivery"),
            perk("24-hour service"),
            perk("Eco-friendly detergents"),
        ],
    }
}

fn dry_clean() -> Service {
    Service {
        id: "dry-clean",
        name: "Dry Cleaning",
        name_key: "services.dry_clean.name",
        category: "Laundry",
        icon: "🧥",
        emoji: "🧥",
        description: "Professional dry cleaning for delicate items",
        desc_key: "services.dry_clean.desc",
        tagline: "Premium Care for Premium Clothes",
        tagline_key: "services.dry_clean.tagline",
        before: "5 days",
        after: "2 days",
        steps: vec![
            step("inspect", "Quality Inspection"),
            step("clean", "Dry Clean Process"),
            step("press", "Professional Pressing"),
            step("package", "Careful Packaging"),
        ],
        options: vec![
            option("suit", "Suit", "items.suit", 200, "🤵"),
            option("blazer", "Blazer", "items.blazer", 150, "🧥"),
            option("coat", "Coat", "items.coat", 180, "🧥"),
            option("saree", "Saree", "items.saree", 100, "🥻"),
        ],
        perks: vec![
            perk("Expert stain removal"),
            perk("Fabric protection"),
            perk("Premium packaging"),
        ],
    }
}

fn shoe_care() -> Service {
    Service {
        id: "shoe-care",
        name: "Shoe Care",
        name_key: "services.shoe_care.name",
        category: "Accessories",
        icon: "👞",
        emoji: "👞",
        description: "Complete shoe cleaning and care",
        desc_key: "services.shoe_care.desc",
        tagline: "Step Out in Style",
        tagline_key: "services.shoe_care.tagline",
        before: "3 days",
        after: "1 day",
        steps: vec![
            step("clean", "Deep Cleaning"),
            step("polish", "Premium Polish"),
            step("protect", "Weather Protection"),
            step("shine", "Final Shine"),
        ],
        options: vec![
            option("leather-shoes", "Leather Shoes", "items.leather_shoes", 80, "👞"),
            option("sports-shoes", "Sports Shoes", "items.sports_shoes", 60, "👟"),
            option("boots", "Boots", "items.boots", 100, "👢"),
            option("sandals", "Sandals", "items.sandals", 40, "👡"),
        ],
        perks: vec![
            perk("Professional cleaning"),
            perk("Leather conditioning"),
            perk("Waterproof treatment"),
        ],
    }
}

fn home_care() -> Service {
    Service {
        id: "home-care",
        name: "Home Care",
        name_key: "services.home_care.name",
        category: "Home Care",
        icon: "🏠",
        emoji: "🏠",
        description: "Curtains, carpets, and home textiles",
        desc_key: "services.home_care.desc",
        tagline: "Clean Home, Happy Life",
        tagline_key: "services.home_care.tagline",
        before: "7 days",
        after: "3 days",
        steps: vec![
            step("pickup", "Home Pickup"),
            step("clean", "Specialized Cleaning"),
            step("sanitize", "Deep Sanitization"),
            step("deliver", "Safe Delivery"),
        ],
        options: vec![
            option("curtains", "Curtains", "items.curtains", 120, "🪟"),
            option("carpet", "Carpet", "items.carpet", 200, "🧸"),
            option("sofa-cover", "Sofa Cover", "items.sofa_cover", 150, "🛋️"),
            option("bedsheets", "Bed Sheets", "items.bedsheets", 80, "🛏️"),
        ],
        perks: vec![
            perk("Home pickup available"),
            perk("Dust mite removal"),
            perk("Anti-bacterial treatment"),
        ],
    }
}
