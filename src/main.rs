//! JAWS i18n - operator CLI
//!
//! Inspect the locale catalog, resolve translation keys and manage a client's
//! persisted locale from the command line.

use anyhow::{bail, Context};
use jaws_i18n::catalog::Scope;
use jaws_i18n::core::Config;
use jaws_i18n::db::Database;
use jaws_i18n::i18n::{detect_ambient_locale, locale_from_cookie, LocaleSession, TranslationStore};
use std::sync::Arc;

const HELP: &str = "\
jaws-i18n - locale catalog and translation lookup

USAGE:
  jaws-i18n [OPTIONS] <COMMAND>

COMMANDS:
  locales               List locales selectable in the scope
  current               Show the locale a new session starts with
  set <LOCALE>          Select and persist a locale for the client
  t <KEY> [FALLBACK]    Translate a key in the client's locale
  check                 Report keys missing from each locale

OPTIONS:
  --scope <SCOPE>       public, dashboard or admin [default: public]
  --client <ID>         Client the preference belongs to [default: local]
  --lang <TAG>          Ambient locale instead of the system one
  --cookie <HEADER>     Cookie request header carrying a locale
  -h, --help            Print help
";

struct Args {
    scope: String,
    client: String,
    lang: Option<String>,
    cookie: Option<String>,
    command: Vec<String>,
}

fn parse_args() -> anyhow::Result<Option<Args>> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let scope = args
        .opt_value_from_str("--scope")?
        .unwrap_or_else(|| "public".to_string());
    let client = args
        .opt_value_from_str("--client")?
        .unwrap_or_else(|| "local".to_string());
    let lang = args.opt_value_from_str("--lang")?;
    let cookie = args.opt_value_from_str("--cookie")?;

    let command = args
        .finish()
        .into_iter()
        .map(|s| s.into_string().map_err(|s| anyhow::anyhow!("invalid argument: {:?}", s)))
        .collect::<anyhow::Result<Vec<String>>>()?;

    Ok(Some(Args {
        scope,
        client,
        lang,
        cookie,
        command,
    }))
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = parse_args()? else {
        print!("{}", HELP);
        return Ok(());
    };

    let config = Config::load_or_default().context("invalid configuration")?;

    let scope: Scope = args.scope.parse()?;
    let store = Arc::new(TranslationStore::from_config(&config).context("failed to load translations")?);
    let db = Database::new(&config).context("failed to open preference database")?;

    let mut session = LocaleSession::with_storage(
        Arc::clone(&store),
        scope,
        db.client(&args.client),
        &config.storage,
    );

    // Cookie (server-side hint) wins over the OS locale
    let ambient = args
        .cookie
        .as_deref()
        .and_then(|header| locale_from_cookie(header, &config.storage.cookie_name))
        .map(|code| code.to_string())
        .or(args.lang.clone())
        .or_else(detect_ambient_locale);
    session.initialize(ambient.as_deref());

    let command: Vec<&str> = args.command.iter().map(String::as_str).collect();
    match command.as_slice() {
        ["locales"] => {
            let current = session.current_locale().code;
            for locale in session.available_locales() {
                let marker = if locale.code == current { "*" } else { " " };
                println!("{} {:<6} {:<6} {}", marker, locale.code, locale.label, locale.name);
            }
        }
        ["current"] => {
            let locale = session.current_locale();
            println!("{} ({}) lang={}", locale.code, locale.name, session.html_lang());
        }
        ["set", candidate] => {
            session.try_set_locale(candidate)?;
            println!("{}", session.cookie_header());
        }
        ["t", key] => println!("{}", session.translate(key, None)),
        ["t", key, fallback] => println!("{}", session.translate(key, Some(*fallback))),
        ["check"] => {
            let total = store
                .document(store.default_locale())
                .map(|doc| doc.leaf_keys().len())
                .unwrap_or_default();
            for locale in session.available_locales() {
                let missing = store.missing_keys(locale.code);
                println!(
                    "{:<6} {:>4}/{} translated, {} missing",
                    locale.code,
                    total - missing.len(),
                    total,
                    missing.len()
                );
                for key in missing {
                    log::debug!("  {} missing {}", locale.code, key);
                }
            }
        }
        [] => {
            print!("{}", HELP);
        }
        other => bail!("unknown command: {}", other.join(" ")),
    }

    Ok(())
}
