//! JAWS i18n library
//!
//! Locale catalog, translation documents and resolution, per-session locale
//! state and the offline translation sync used by the website, the client
//! portal and the admin console.

pub mod catalog;
pub mod core;
pub mod db;
pub mod i18n;
pub mod prefs;
pub mod sync;
