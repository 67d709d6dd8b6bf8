//! ConvData Binary
//!
//! Lists the available categories and units, or converts a single value:
//! `convdata <category> <value> <from> <to>`.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use convdata_common::{CategoryId, ConverterDataLoader, CurrencyDataLoader};
use convdata_service::{ConversionService, ServiceConfig, TracingCallback};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
        .init();

    info!("Starting ConvData");

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    let service = ConversionService::from_config(&config).await?;
    service.set_view_model_callback(Arc::new(TracingCallback));
    service.load_data().await;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => list(&service),
        [category, value, from, to] => {
            let category = parse_category(category)?;
            let value: f64 = value
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid value: {}", value))?;

            let result = service.convert(category, value, from, to).map_err(|e| {
                error!(error = %e, code = e.error_code(), "Conversion failed");
                anyhow::anyhow!("{}", e)
            })?;
            println!("{} {} = {} {}", value, from, result, to);

            if category == CategoryId::Currency {
                print_currency_details(&service, from, to);
            }
        }
        _ => {
            return Err(anyhow::anyhow!(
                "Usage: convdata [<category> <value> <from-abbreviation> <to-abbreviation>]"
            ))
        }
    }

    info!("ConvData finished");
    Ok(())
}

fn parse_category(name: &str) -> anyhow::Result<CategoryId> {
    CategoryId::ALL
        .iter()
        .copied()
        .find(|id| id.resource_key().eq_ignore_ascii_case(name))
        .ok_or_else(|| anyhow::anyhow!("Unknown category: {}", name))
}

fn list(service: &ConversionService) {
    for category in service.load_ordered_categories() {
        println!("{} ({})", category.name, category.id.resource_key());
        for unit in service.load_ordered_units(&category) {
            let mut marks = String::new();
            if unit.is_conversion_source {
                marks.push_str(" [from]");
            }
            if unit.is_conversion_target {
                marks.push_str(" [to]");
            }
            println!("  {}{}", unit, marks);
        }
    }

    let timestamp = service.currency().get_currency_timestamp();
    if !timestamp.is_empty() {
        println!("{}", timestamp);
    }
}

fn print_currency_details(service: &ConversionService, from: &str, to: &str) {
    let Some(currency) = service.category(CategoryId::Currency) else {
        return;
    };
    let (Some(from), Some(to)) = (service.find_unit(&currency, from), service.find_unit(&currency, to)) else {
        return;
    };

    let (equality, _) = service.currency().get_currency_ratio_equality(&from, &to);
    let (from_symbol, to_symbol) = service.currency().get_currency_symbols(&from, &to);
    if !equality.is_empty() {
        println!("{} ({} → {})", equality, from_symbol, to_symbol);
    }
    println!("{}", service.currency().get_currency_timestamp());
}
