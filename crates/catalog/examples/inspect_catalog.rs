use catalog::Catalog;
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = Path::new("data/skincare_products.csv");

    println!("Loading product catalog...\n");

    let start = Instant::now();
    let catalog = Catalog::load_from_file(path)
        .expect("Failed to load catalog");
    let elapsed = start.elapsed();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Products: {}", catalog.len());

    let counts = catalog.category_counts();
    for category in catalog.categories() {
        println!("  {:<20} {}", category, counts[category]);
    }
}
