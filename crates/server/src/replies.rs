//! HTML fragments sent back as the bot's final reply.
//!
//! Catalog text is escaped before it is embedded; the surrounding markup is
//! trusted and rendered as-is by the chat page.

use catalog::Product;
use pipeline::Selection;
use tera::escape_html;

const INTRO: &str = "🧴 Let me find the perfect products for your features...";

/// Final reply for a completed questionnaire
pub fn compose(selection: &Selection) -> String {
    let body = match selection {
        Selection::Products { category, products } => product_list(category, products),
        Selection::NoMatches { category } => no_matches(category),
        Selection::CatalogUnavailable => data_unavailable(),
    };
    format!("{}<br><br>{}", INTRO, body)
}

pub fn product_list(category: &str, products: &[Product]) -> String {
    let mut html = format!(
        "🌟 These <b>{}</b> products should suit you!<br>",
        escape_html(category)
    );
    for product in products {
        html.push_str(&product_entry(product));
    }
    html.push_str("<br>💖 Enjoy your glow! Type 'restart' to start over.");
    html
}

fn product_entry(product: &Product) -> String {
    format!(
        "<br><b>🛍️ {}</b><br>⭐ <b>Rating</b>: {}<br>🔗 <a href=\"{}\" target=\"_blank\" rel=\"noopener\">View Product</a><br>",
        escape_html(&product.name),
        product.rating_label(),
        escape_html(&product.url),
    )
}

/// Apology for a category with no catalog rows
pub fn no_matches(category: &str) -> String {
    format!(
        "Sorry, I couldn't find any <b>{}</b> products for your profile. Type 'restart' to try different details.",
        escape_html(category)
    )
}

pub fn data_unavailable() -> String {
    "Sorry, I'm having trouble accessing product data right now. Please try again later.".to_string()
}
