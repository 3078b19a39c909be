use anyhow::Result;
use std::env;

use hdb_resale::logging::init_logging;
use hdb_resale::{print_search_results, Catalog, CatalogConfig, SearchQuery};

const DEFAULT_CSV_PATH: &str = "resale2024.csv";

fn main() -> Result<()> {
    init_logging("info");

    // hdb-resale [CSV_PATH] [CONFIG_JSON]
    let args: Vec<String> = env::args().collect();
    let csv_path = args.get(1).map(String::as_str).unwrap_or(DEFAULT_CSV_PATH);
    let config = match args.get(2) {
        Some(path) => CatalogConfig::from_file(path)?,
        None => CatalogConfig::default(),
    };

    let mut catalog = Catalog::new(config);
    catalog.load(csv_path)?;

    let searches = [
        (
            "Search using all 4 parameters: ",
            SearchQuery::new()
                .town(["YISHUN", "ANG MO KIO"])
                .flat_type(["5 ROOM"])
                .flat_model(["IMPROVED", "DBSS"])
                .min_price_psf(2500.0),
        ),
        (
            "Search using any 3 parameters:",
            SearchQuery::new()
                .town(["BISHAN"])
                .flat_type(["4 ROOM"])
                .flat_model(["NEW GENERATION", "STANDARD"]),
        ),
        (
            "Search using any 2 parameters:",
            SearchQuery::new().town(["ANG MO KIO"]).flat_type(["EXECUTIVE"]),
        ),
        (
            "Search using 1 parameter:",
            SearchQuery::new().town(["BEDOK"]),
        ),
    ];

    for (heading, query) in &searches {
        println!("\n{}", heading);
        print_search_results(&catalog.search(query))?;
    }

    Ok(())
}
