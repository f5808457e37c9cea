use crate::config::ApiConfig;
use crate::error::AppError;
use crate::model::{Token, TokenList};

pub struct ScreenerRestClient {
    http: reqwest::Client,
    base_url: String,
    token_list_path: String,
}

impl ScreenerRestClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_list_path: config.token_list_path.clone(),
        }
    }

    /// Fetch the full leaderboard token list.
    ///
    /// The `_t` query parameter and no-cache headers defeat intermediary
    /// caching so every call hits the origin. The body must be a JSON array;
    /// any other shape is a hard format error.
    pub async fn fetch_token_list(&self) -> Result<TokenList, AppError> {
        let cache_buster = chrono::Utc::now().timestamp_millis();
        let url = format!(
            "{}{}?compact=false&_t={}",
            self.base_url, self.token_list_path, cache_buster
        );

        let response = self
            .http
            .get(&url)
            .header("Cache-Control", "no-cache, no-store, must-revalidate")
            .header("Pragma", "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "token list request failed");
            return Err(AppError::ApiStatus {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let body: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| AppError::InvalidResponseFormat(format!("body is not valid JSON: {e}")))?;
        let tokens = Self::decode_token_list(body)?;
        tracing::debug!(count = tokens.len(), "fetched token list");
        Ok(tokens)
    }

    fn decode_token_list(body: serde_json::Value) -> Result<TokenList, AppError> {
        let items = match body {
            serde_json::Value::Array(items) => items,
            other => {
                return Err(AppError::InvalidResponseFormat(format!(
                    "expected a JSON array of tokens, got {}",
                    json_kind(&other)
                )))
            }
        };
        items
            .into_iter()
            .map(|item| serde_json::from_value::<Token>(item).map_err(AppError::from))
            .collect()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_array_body_is_a_format_error() {
        let body = serde_json::json!({"detail": "rate limited"});
        let err = ScreenerRestClient::decode_token_list(body).unwrap_err();
        assert_eq!(err.code(), "INVALID_RESPONSE_FORMAT");
    }

    #[test]
    fn array_body_decodes_tokens_with_missing_fields() {
        let body = serde_json::json!([
            {"token_address": "addr1", "token_symbol": "AAA", "price_usd": 1.5},
            {"token_address": "addr2"}
        ]);
        let tokens = ScreenerRestClient::decode_token_list(body).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].price_usd, Some(1.5));
        assert_eq!(tokens[1].token_symbol, "");
        assert_eq!(tokens[1].price_usd, None);
        assert!(!tokens[1].is_new);
    }
}
