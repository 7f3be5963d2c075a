use listing_search::app::load_catalogs;
use listing_search::domain::ListingKind;
use listing_search::infra::config;
use sqlx::postgres::PgPoolOptions;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n\
         Optional:\n\
           PORT, DB_MAX_CONNECTIONS, SEARCH_STRATEGY,\n\
           CHAIR_CONDITION_PATH, ESTATE_CONDITION_PATH, FEATURES_BIT_PATH\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    // Force-read config (nice error messages if missing)
    let database_url = config::database_url()?;
    let port = config::port()?;
    let max_connections = config::db_max_connections()?;
    let strategy = config::search_strategy()?;

    println!("> Preflight:");
    println!("  PORT={}", port);
    println!("  DB_MAX_CONNECTIONS={}", max_connections);
    println!("  SEARCH_STRATEGY={}", strategy);

    let (chairs, estates) = load_catalogs()?;
    for (kind, catalog) in [(ListingKind::Chair, &chairs), (ListingKind::Estate, &estates)] {
        println!("  {} catalog:", kind.table());
        for range in catalog.ranges() {
            println!(
                "    {} -> {} buckets ({})",
                range.attr.param,
                range.buckets().len(),
                range.attr.range_column
            );
        }
        println!("    features: {}", catalog.features().names().count());
    }

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to DATABASE_URL: {}", e))?;
    let version: String = sqlx::query_scalar("SHOW server_version")
        .fetch_one(&pool)
        .await?;
    println!("  Postgres version: {}", version);

    for table in ["chair", "estate"] {
        let exists: bool = sqlx::query_scalar("SELECT to_regclass($1) IS NOT NULL")
            .bind(table)
            .fetch_one(&pool)
            .await?;
        if exists {
            let rows: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
                .fetch_one(&pool)
                .await?;
            println!("  table {}: {} rows", table, rows);
        } else {
            println!("  table {}: missing (created by api_server on start)", table);
        }
    }

    println!("> Preflight OK.");
    Ok(())
}
