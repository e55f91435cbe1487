//! DeepL API client

use crate::core::{Error, Result, TranslateConfig};
use serde::{Deserialize, Serialize};

const FREE_HOST: &str = "api-free.deepl.com";
const PRO_HOST: &str = "api.deepl.com";

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a [String],
    target_lang: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
struct TranslatedText {
    text: String,
}

/// Machine translation over the DeepL v2 REST API
pub struct DeeplClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl DeeplClient {
    pub fn new(api_key: &str, free: bool) -> Self {
        let host = if free { FREE_HOST } else { PRO_HOST };
        Self::with_base_url(api_key, &format!("https://{}", host))
    }

    /// Client for a DeepL-compatible server at `base_url` (scheme and host)
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: format!("{}/v2/translate", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        }
    }

    /// Client from settings; the API key is required
    pub fn from_config(config: &TranslateConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config("DEEPL_API_KEY environment variable not set".to_string()))?;
        Ok(Self::new(api_key, config.api_free))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Translate `texts` into `target_lang`, one result per input, in order
    pub async fn translate(&self, texts: &[String], target_lang: &str) -> Result<Vec<String>> {
        let response = self
            .http
            .post(&self.url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .json(&TranslateRequest { text: texts, target_lang })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Translation(format!("DeepL API error: {} - {}", status, body)));
        }

        let body = response.text().await?;
        parse_response(&body, texts.len())
    }
}

fn parse_response(body: &str, expected: usize) -> Result<Vec<String>> {
    let parsed: TranslateResponse = serde_json::from_str(body)
        .map_err(|e| Error::Translation(format!("Failed to parse DeepL response: {}", e)))?;

    if parsed.translations.len() != expected {
        return Err(Error::Translation(format!(
            "DeepL returned {} translations for {} texts",
            parsed.translations.len(),
            expected
        )));
    }

    Ok(parsed.translations.into_iter().map(|t| t.text).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_endpoint_selection() {
        assert_eq!(DeeplClient::new("k", true).url(), "https://api-free.deepl.com/v2/translate");
        assert_eq!(DeeplClient::new("k", false).url(), "https://api.deepl.com/v2/translate");
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = TranslateConfig::default();
        assert!(matches!(DeeplClient::from_config(&config), Err(Error::Config(_))));

        let config = TranslateConfig {
            api_key: Some("secret:fx".into()),
            api_free: false,
            ..Default::default()
        };
        assert_eq!(DeeplClient::from_config(&config).unwrap().url(), "https://api.deepl.com/v2/translate");
    }

    #[test]
    fn test_request_body() {
        let texts = vec!["Home".to_string(), "Products".to_string()];
        let body = serde_json::to_value(TranslateRequest { text: &texts, target_lang: "FR" }).unwrap();
        assert_eq!(body, serde_json::json!({"text": ["Home", "Products"], "target_lang": "FR"}));
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{"translations": [
            {"detected_source_language": "EN", "text": "Accueil"},
            {"detected_source_language": "EN", "text": "Produits"}
        ]}"#;
        assert_eq!(parse_response(body, 2).unwrap(), vec!["Accueil", "Produits"]);
        assert!(matches!(parse_response(body, 3), Err(Error::Translation(_))));
        assert!(parse_response("not json", 1).is_err());
    }

    #[test]
    fn test_base_url() {
        let client = DeeplClient::with_base_url("k", "http://127.0.0.1:8080/");
        assert_eq!(client.url(), "http://127.0.0.1:8080/v2/translate");
    }

    #[tokio::test]
    async fn test_translate_posts_texts_with_auth_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/translate"))
            .and(header("Authorization", "DeepL-Auth-Key secret"))
            .and(body_json(serde_json::json!({"text": ["Home", "About"], "target_lang": "DE"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "translations": [{"text": "Startseite"}, {"text": "Über uns"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = DeeplClient::with_base_url("secret", &server.uri());
        let texts = vec!["Home".to_string(), "About".to_string()];
        assert_eq!(client.translate(&texts, "DE").await.unwrap(), vec!["Startseite", "Über uns"]);
    }

    #[tokio::test]
    async fn test_translate_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
            .mount(&server)
            .await;

        let client = DeeplClient::with_base_url("bad", &server.uri());
        let err = client.translate(&["Home".to_string()], "FR").await.unwrap_err();
        assert!(matches!(err, Error::Translation(ref msg) if msg.contains("403")));
    }
}
