//! Weather, news and stock lookups
//!
//! Each lookup is a single HTTP GET plus reply formatting. Every failure path
//! produces user-readable text instead of an error, so a data-lookup agent can
//! hand the result straight back to the caller.

use crate::types::Result;
use crate::utils::toml_config::{JarvisConfig, LiveDataConfig};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LiveDataLookup: Send + Sync {
    /// Current conditions for a city
    async fn weather(&self, city: &str) -> String;

    /// Latest headlines for a topic
    async fn news(&self, topic: &str) -> String;

    /// Global quote for a ticker symbol
    async fn stock(&self, symbol: &str) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Service {
    Weather,
    News,
    Stock,
}

impl Service {
    fn name(&self) -> &'static str {
        match self {
            Service::Weather => "weather",
            Service::News => "news",
            Service::Stock => "stock",
        }
    }

    fn subject(&self) -> &'static str {
        match self {
            Service::Weather => "weather",
            Service::News => "news",
            Service::Stock => "stock data",
        }
    }
}

/// API keys for the live data services; `None` disables the lookup
#[derive(Debug, Clone, Default)]
pub struct LiveDataKeys {
    pub weather: Option<String>,
    pub news: Option<String>,
    pub stock: Option<String>,
}

pub struct LiveDataClient {
    client: Client,
    config: LiveDataConfig,
    keys: LiveDataKeys,
}

impl LiveDataClient {
    pub fn new(config: LiveDataConfig, keys: LiveDataKeys) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            config,
            keys,
        })
    }

    /// Build a client, resolving API keys from the environment
    pub fn from_config(config: &JarvisConfig) -> Result<Self> {
        let live = &config.live_data;
        let keys = LiveDataKeys {
            weather: config.resolve_env(&live.weather_api_key_env),
            news: config.resolve_env(&live.news_api_key_env),
            stock: config.resolve_env(&live.stock_api_key_env),
        };

        Self::new(live.clone(), keys)
    }

    fn key(&self, service: Service) -> std::result::Result<&str, String> {
        let (key, env) = match service {
            Service::Weather => (&self.keys.weather, &self.config.weather_api_key_env),
            Service::News => (&self.keys.news, &self.config.news_api_key_env),
            Service::Stock => (&self.keys.stock, &self.config.stock_api_key_env),
        };

        key.as_deref().ok_or_else(|| {
            format!(
                "❌ The {} service is not configured (set {}).",
                service.name(),
                env
            )
        })
    }

    async fn get(
        &self,
        service: Service,
        url: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<(StatusCode, Value), String> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| failure_message(service, &e))?;

        let status = response.status();
        let data = response
            .json::<Value>()
            .await
            .map_err(|e| failure_message(service, &e))?;

        tracing::debug!(service = service.name(), status = status.as_u16(), "Live data response");
        Ok((status, data))
    }
}

#[async_trait]
impl LiveDataLookup for LiveDataClient {
    async fn weather(&self, city: &str) -> String {
        let key = match self.key(Service::Weather) {
            Ok(key) => key,
            Err(message) => return message,
        };

        let query = [("q", city), ("appid", key), ("units", "metric")];
        match self.get(Service::Weather, &self.config.weather_url, &query).await {
            Ok((status, data)) => format_weather(city, status, &data),
            Err(message) => message,
        }
    }

    async fn news(&self, topic: &str) -> String {
        let key = match self.key(Service::News) {
            Ok(key) => key,
            Err(message) => return message,
        };

        let page_size = self.config.news_page_size.to_string();
        let query = [("q", topic), ("apiKey", key), ("pageSize", page_size.as_str())];
        match self.get(Service::News, &self.config.news_url, &query).await {
            Ok((status, data)) => format_news(status, &data),
            Err(message) => message,
        }
    }

    async fn stock(&self, symbol: &str) -> String {
        let key = match self.key(Service::Stock) {
            Ok(key) => key,
            Err(message) => return message,
        };

        let query = [
            ("function", "GLOBAL_QUOTE"),
            ("symbol", symbol),
            ("apikey", key),
        ];
        match self.get(Service::Stock, &self.config.stock_url, &query).await {
            Ok((_, data)) => format_stock(symbol, &data),
            Err(message) => message,
        }
    }
}

fn failure_message(service: Service, err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("❌ Request to {} service timed out.", service.name())
    } else if err.is_connect() || err.is_request() {
        format!(
            "❌ Network error: could not reach the {} service.",
            service.name()
        )
    } else {
        format!("❌ Unexpected error fetching {}: {}", service.subject(), err)
    }
}

/// Error text carried by a non-200 body, or the status code
fn api_error(status: StatusCode, data: &Value) -> String {
    data.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}

pub fn format_weather(city: &str, status: StatusCode, data: &Value) -> String {
    if status != StatusCode::OK {
        return format!("❌ Weather error: {}", api_error(status, data));
    }

    let description = data
        .pointer("/weather/0/description")
        .and_then(Value::as_str);
    let temp = data.pointer("/main/temp").filter(|v| v.is_number());
    let humidity = data.pointer("/main/humidity").filter(|v| v.is_number());

    match (description, temp, humidity) {
        (Some(description), Some(temp), Some(humidity)) => format!(
            "🌤️ Weather in {}:\n• {}\n• Temperature: {}°C\n• Humidity: {}%",
            title_case(city),
            title_case(description),
            temp,
            humidity
        ),
        _ => "❌ Unexpected error fetching weather: incomplete response".to_string(),
    }
}

pub fn format_news(status: StatusCode, data: &Value) -> String {
    if status != StatusCode::OK {
        return format!("❌ News error: {}", api_error(status, data));
    }

    let articles = data
        .get("articles")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    if articles.is_empty() {
        return "ℹ️ No news articles found.".to_string();
    }

    let lines: Vec<String> = articles
        .iter()
        .map(|article| {
            let title = article
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or("No title");
            let source = article
                .pointer("/source/name")
                .and_then(Value::as_str)
                .unwrap_or("Unknown");
            let link = article.get("url").and_then(Value::as_str).unwrap_or("");
            format!("- **{}** ({})\n  {}", title, source, link)
        })
        .collect();

    format!("📰 Latest news:\n{}", lines.join("\n"))
}

pub fn format_stock(symbol: &str, data: &Value) -> String {
    let symbol = symbol.to_uppercase();
    let field = |name: &str| {
        data.get("Global Quote")
            .and_then(|quote| quote.get(name))
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
    };

    match field("05. price") {
        Some(price) => format!(
            "💹 {} Quote:\n• Price: ${}\n• Change: {} ({})",
            symbol,
            price,
            field("09. change").unwrap_or("n/a"),
            field("10. change percent").unwrap_or("n/a")
        ),
        None => format!("ℹ️ No data found for symbol '{}'.", symbol),
    }
}

/// Upper-case the first letter of every word, lower-case the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}
