//! JAWS i18n - translation sync
//!
//! Machine-translates new or changed default-locale strings into every other
//! catalog locale and rewrites the locale files in place.
//!
//! Environment variables:
//!   DEEPL_API_KEY  - DeepL API key (required)
//!   DEEPL_API_FREE - "false" selects the paid API endpoint

use anyhow::Context;
use jaws_i18n::catalog::list_locales;
use jaws_i18n::core::Config;
use jaws_i18n::i18n::{flatten, Document};
use jaws_i18n::sync::{sync_locale, translatable_count, DeeplClient, SyncStats};
use std::path::PathBuf;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = pico_args::Arguments::from_env();
    let dir_arg: Option<PathBuf> = args.opt_value_from_str("--dir")?;

    let config = Config::load_or_default().context("invalid configuration")?;
    let translate = config.translate.clone().with_env_overrides();

    let client = match DeeplClient::from_config(&translate) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("To set it:");
            eprintln!("  export DEEPL_API_KEY=your-api-key");
            std::process::exit(1);
        }
    };

    let dir = dir_arg
        .or_else(|| config.general.locales_dir.clone())
        .unwrap_or_else(|| PathBuf::from("locales"));
    let default_locale = config.default_locale()?;

    let source_path = dir.join(format!("{}.json", default_locale));
    let content = std::fs::read_to_string(&source_path)
        .with_context(|| format!("source file not found: {}", source_path.display()))?;
    let source = flatten(&Document::parse(default_locale.as_str(), &content)?);
    let total = translatable_count(&source);

    println!("Found {} strings in {}.", total, source_path.display());

    let mut totals = SyncStats::default();
    for locale in list_locales().iter().filter(|l| l.code != default_locale) {
        println!("\n[{}] {}", locale.code, locale.name);

        match sync_locale(&client, &translate, locale, &source, &dir).await {
            Ok(stats) => {
                totals.translated += stats.translated;
                totals.skipped += stats.skipped;
                println!("  Done: {} translated, {} skipped", stats.translated, stats.skipped);
            }
            Err(e) => {
                log::error!("Failed to sync {}: {}", locale.code, e);
                println!("  Failed: {}", e);
            }
        }
    }

    println!("\nSummary");
    println!("  Total strings: {}", total);
    println!("  Translated: {}", totals.translated);
    println!("  Skipped (already translated): {}", totals.skipped);

    Ok(())
}
