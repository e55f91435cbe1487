//! Translation documents compiled into the binary

use crate::catalog::LocaleCode;

/// Raw JSON shipped for `code`
pub fn source(code: LocaleCode) -> &'static str {
    match code {
        LocaleCode::En => include_str!("../../locales/en.json"),
        LocaleCode::ZhTw => include_str!("../../locales/zh-TW.json"),
        LocaleCode::ZhCn => include_str!("../../locales/zh-CN.json"),
        LocaleCode::Ja => include_str!("../../locales/ja.json"),
        LocaleCode::It => include_str!("../../locales/it.json"),
        LocaleCode::Fr => include_str!("../../locales/fr.json"),
        LocaleCode::Es => include_str!("../../locales/es.json"),
        LocaleCode::De => include_str!("../../locales/de.json"),
    }
}
