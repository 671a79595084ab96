//! Catalog listing.

use std::fmt::Write;

use smart_laundry_api::catalog::Catalog;

/// Render the builtin catalog.
pub fn render_builtin() -> String {
    render(&Catalog::builtin())
}

/// One block per service: a heading, then each option's ID, label and price.
fn render(catalog: &Catalog) -> String {
    let mut out = String::new();
    for service in catalog.services() {
        let _ = writeln!(
            out,
            "{} {} [{}] ({})",
            service.emoji, service.name, service.id, service.category
        );
        for option in &service.options {
            let _ = writeln!(
                out,
                "    {:<14} {:<14} {}",
                option.id, option.label, option.price
            );
        }
    }
    out
}
