//! Internationalization module
//!
//! Translation documents for every catalog locale, key resolution with
//! default-locale fallback, and the per-session locale context.
//! Supports automatic language detection based on stored preference and
//! system locale.

mod bundled;
mod detect;
mod document;
mod flat;
mod resolve;
mod session;
mod store;

pub use detect::{detect_ambient_locale, match_ambient, normalize_tag};
pub use document::{Document, Group, TranslationValue};
pub use flat::{flatten, unflatten, FlatMap};
pub use session::{locale_from_cookie, locale_from_default_cookie, LocaleSession, SessionState};
pub use store::TranslationStore;
