//! JSON-RPC request handling and tools

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, info};
use unitary::{
    toggle_favorite, ConversionError, Engine, ErrorReport, FavoriteStore, InMemoryFavoriteStore, Locale,
    Number, RateSource,
};

pub const PROTOCOL_VERSION: &str = "2025-11-25";
pub const SERVER_NAME: &str = "unitary";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

// MCP Protocol types
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

impl McpResponse {
    pub fn failure(id: Option<JsonValue>, error: McpError) -> Self {
        McpResponse {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl McpError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        McpError { code, message: message.into(), data: None }
    }

    fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }
}

/// Everything a request handler needs
pub struct Server {
    engine: Engine,
    favorites: Box<dyn FavoriteStore>,
    source: Option<Arc<dyn RateSource>>,
    locale: Locale,
}

impl Server {
    pub fn new(engine: Engine, source: Option<Arc<dyn RateSource>>, locale: Locale) -> Self {
        Server {
            engine,
            favorites: Box::new(InMemoryFavoriteStore::new()),
            source,
            locale,
        }
    }

    pub async fn handle_request(&self, request: &McpRequest) -> McpResponse {
        let result = match request.method.as_str() {
            // Lifecycle
            "initialize" => handle_initialize(&request.params),
            "initialized" | "notifications/initialized" => Ok(json!({})),
            "ping" => Ok(json!({})),

            // Tools
            "tools/list" => handle_tools_list(),
            "tools/call" => self.handle_tool_call(&request.params).await,

            _ => Err(McpError::new(METHOD_NOT_FOUND, format!("Method not found: {}", request.method))),
        };

        match result {
            Ok(r) => McpResponse {
                jsonrpc: "2.0".to_string(),
                id: request.id.clone(),
                result: Some(r),
                error: None,
            },
            Err(e) => McpResponse::failure(request.id.clone(), e),
        }
    }

    async fn handle_tool_call(&self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let params = params
            .as_ref()
            .ok_or_else(|| McpError::invalid_params("Missing params"))?;

        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

        let args = params.get("arguments").cloned().unwrap_or(json!({}));
        debug!(tool = name, "tool call");

        match name {
            "list_categories" => self.tool_list_categories(&args),
            "list_units" => self.tool_list_units(&args),
            "convert" => self.tool_convert(&args),
            "refresh_rates" => self.tool_refresh_rates().await,
            "toggle_favorite" => self.tool_toggle_favorite(&args),
            "list_favorites" => self.tool_list_favorites(),
            "clear_favorites" => self.tool_clear_favorites(),
            _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
        }
    }

    fn tool_list_categories(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let filter = args.get("group").and_then(|v| v.as_str());
        let groups: Vec<_> = self
            .engine
            .groups()
            .into_iter()
            .filter(|g| filter.map_or(true, |f| g.group.label().eq_ignore_ascii_case(f)))
            .collect();

        let mut text = String::new();
        for group in &groups {
            text.push_str(&format!("## {}\n", group.group.label()));
            for c in &group.categories {
                text.push_str(&format!("- {} ({}): {}\n", c.label, c.id, c.description));
            }
            text.push('\n');
        }

        Ok(json!({
            "content": [{ "type": "text", "text": text.trim_end() }],
            "groups": to_json(&groups)?
        }))
    }

    fn tool_list_units(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let category = required_str(args, "category")?;
        let units = match self.engine.units_of(category) {
            Ok(units) => units,
            Err(err) => return Ok(tool_error(&err)),
        };

        let text = units
            .iter()
            .map(|u| format!("- {} ({})", u.name, u.symbol))
            .collect::<Vec<_>>()
            .join("\n");

        let mut result = json!({
            "content": [{ "type": "text", "text": text }],
            "category": category,
            "units": to_json(&units)?
        });
        if category == "Currency" {
            result["rates"] = to_json(&self.engine.currency().mode())?;
        }
        Ok(result)
    }

    fn tool_convert(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let category = required_str(args, "category")?;
        let from = required_str(args, "from")?;
        let to = required_str(args, "to")?;
        let locale = args
            .get("locale")
            .and_then(|v| v.as_str())
            .map(Locale::from_tag)
            .unwrap_or(self.locale);

        // Text follows the caller's locale; JSON numbers always use a period
        let converted = match args.get("value") {
            Some(JsonValue::String(s)) => self.engine.convert_detailed(category, from, to, s, &locale),
            Some(JsonValue::Number(n)) => {
                let text = n.to_string();
                Number::from_str(&text)
                    .map_err(|_| ConversionError::MalformedInput(text))
                    .and_then(|input| self.engine.convert_number(category, from, to, input, &locale))
            }
            _ => return Err(McpError::invalid_params("Missing value argument")),
        };
        let outcome = match converted {
            Ok(outcome) => outcome,
            Err(err) => return Ok(tool_error(&err)),
        };

        let input = self.engine.formatter().format_localized(&outcome.input, &locale);
        let mut text = format!("{} {} = {} {}", input, outcome.from_unit, outcome.display, outcome.to_unit);
        if outcome.is_placeholder() {
            text.push_str("\n\nNote: exchange rates are not loaded; this uses placeholder 1:1 rates. Call refresh_rates.");
        }

        Ok(json!({
            "content": [{ "type": "text", "text": text }],
            "result": to_json(&outcome)?,
            "isError": false
        }))
    }

    async fn tool_refresh_rates(&self) -> Result<JsonValue, McpError> {
        let Some(source) = &self.source else {
            return Ok(tool_error(&ConversionError::RateFetchFailed {
                reason: "no rate source configured; set UNITARY_RATES_URL or UNITARY_RATES_FILE".to_string(),
                retryable: false,
            }));
        };

        match self.engine.refresh_rates(source.as_ref()).await {
            Ok(snapshot) => {
                let text = format!(
                    "Loaded {} exchange rates (base {}) fetched at {}",
                    snapshot.len(),
                    snapshot.base_code(),
                    snapshot.fetched_at().to_rfc3339()
                );
                Ok(json!({
                    "content": [{ "type": "text", "text": text }],
                    "base_code": snapshot.base_code(),
                    "count": snapshot.len(),
                    "fetched_at": snapshot.fetched_at().to_rfc3339(),
                    "phase": to_json(&self.engine.currency().phase())?,
                    "isError": false
                }))
            }
            Err(err) => {
                let mut result = tool_error(&err);
                result["phase"] = to_json(&self.engine.currency().phase())?;
                Ok(result)
            }
        }
    }

    fn tool_toggle_favorite(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let category = required_str(args, "category")?;
        let from = required_str(args, "from")?;
        let to = required_str(args, "to")?;

        let key = match self.engine.favorite_key(category, from, to) {
            Ok(key) => key,
            Err(err) => return Ok(tool_error(&err)),
        };
        let favorite = toggle_favorite(self.favorites.as_ref(), &key);
        info!(favorite, key = %key, "favorite toggled");

        let verb = if favorite { "Added" } else { "Removed" };
        Ok(json!({
            "content": [{ "type": "text", "text": format!("{} favorite {}", verb, key) }],
            "favorite": favorite,
            "key": to_json(&key)?
        }))
    }

    fn tool_list_favorites(&self) -> Result<JsonValue, McpError> {
        let favorites = self.favorites.list();
        let text = if favorites.is_empty() {
            "No favorites".to_string()
        } else {
            favorites.iter().map(|k| format!("- {}", k)).collect::<Vec<_>>().join("\n")
        };
        Ok(json!({
            "content": [{ "type": "text", "text": text }],
            "favorites": to_json(&favorites)?
        }))
    }

    fn tool_clear_favorites(&self) -> Result<JsonValue, McpError> {
        let removed = self.favorites.list().len();
        self.favorites.clear();
        Ok(json!({
            "content": [{ "type": "text", "text": format!("Cleared {} favorites", removed) }],
            "removed": removed
        }))
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params
        .as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Unit conversion across engineering, physics and currency categories"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Unitary converts quantities between units of the same category. Use list_categories to find a category id and list_units for its unit names or symbols, then call convert. Currency results carry a rate mode; 'fallback' means placeholder 1:1 rates, not a real conversion."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    let pair_schema = json!({
        "type": "object",
        "properties": {
            "category": { "type": "string", "description": "Category id, e.g. Length" },
            "from": { "type": "string", "description": "Source unit name or symbol" },
            "to": { "type": "string", "description": "Target unit name or symbol" }
        },
        "required": ["category", "from", "to"]
    });

    Ok(json!({
        "tools": [
            {
                "name": "list_categories",
                "description": "List unit categories grouped for menus.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "group": {
                            "type": "string",
                            "description": "Only this group, e.g. Engineering"
                        }
                    }
                }
            },
            {
                "name": "list_units",
                "description": "List the units of a category in display order.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": { "type": "string", "description": "Category id, e.g. Pressure" }
                    },
                    "required": ["category"]
                }
            },
            {
                "name": "convert",
                "description": "Convert a value between two units of the same category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": { "type": "string", "description": "Category id, e.g. Length" },
                        "from": { "type": "string", "description": "Source unit name or symbol" },
                        "to": { "type": "string", "description": "Target unit name or symbol" },
                        "value": { "type": "string", "description": "Number as typed, e.g. 1.5e3" },
                        "locale": { "type": "string", "description": "Locale tag for parsing and display, e.g. de-DE" }
                    },
                    "required": ["category", "from", "to", "value"]
                }
            },
            {
                "name": "refresh_rates",
                "description": "Fetch current exchange rates from the configured source.",
                "inputSchema": { "type": "object", "properties": {} }
            },
            {
                "name": "toggle_favorite",
                "description": "Add a conversion pair to favorites, or remove it if present.",
                "inputSchema": pair_schema
            },
            {
                "name": "list_favorites",
                "description": "List favorite conversion pairs.",
                "inputSchema": { "type": "object", "properties": {} }
            },
            {
                "name": "clear_favorites",
                "description": "Remove all favorite conversion pairs.",
                "inputSchema": { "type": "object", "properties": {} }
            }
        ]
    }))
}

fn required_str<'a>(args: &'a JsonValue, key: &str) -> Result<&'a str, McpError> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params(format!("Missing {} argument", key)))
}

fn to_json<T: Serialize>(value: &T) -> Result<JsonValue, McpError> {
    serde_json::to_value(value).map_err(|e| McpError::new(INTERNAL_ERROR, e.to_string()))
}

/// A failed conversion is a tool result, not a protocol error
fn tool_error(err: &ConversionError) -> JsonValue {
    let report = ErrorReport::from(err);
    json!({
        "content": [{ "type": "text", "text": report.to_string() }],
        "error": report,
        "isError": true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitary_currency::{RateFetchError, RateSet, StaticRateSource};

    fn server(source: Option<Arc<dyn RateSource>>) -> Server {
        Server::new(Engine::new().unwrap(), source, Locale::POSIX)
    }

    fn request(method: &str, params: JsonValue) -> McpRequest {
        McpRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    async fn call(server: &Server, tool: &str, arguments: JsonValue) -> JsonValue {
        let response = server
            .handle_request(&request("tools/call", json!({ "name": tool, "arguments": arguments })))
            .await;
        assert!(response.error.is_none(), "{:?}", response.error);
        response.result.unwrap()
    }

    fn live_source() -> Arc<dyn RateSource> {
        Arc::new(StaticRateSource::new(
            RateSet::new("USD")
                .with_rate("USD", Number::from_str("1").unwrap())
                .with_rate("EUR", Number::from_str("0.5").unwrap()),
        ))
    }

    #[tokio::test]
    async fn test_initialize() {
        let s = server(None);
        let response = s
            .handle_request(&request("initialize", json!({ "protocolVersion": "2025-03-26" })))
            .await;
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2025-03-26");
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
    }

    #[tokio::test]
    async fn test_tools_list() {
        let s = server(None);
        let result = s.handle_request(&request("tools/list", json!({}))).await.result.unwrap();
        let names: Vec<&str> = result["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            ["list_categories", "list_units", "convert", "refresh_rates", "toggle_favorite", "list_favorites", "clear_favorites"]
        );
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let s = server(None);
        let response = s.handle_request(&request("resources/list", json!({}))).await;
        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_categories_filter() {
        let s = server(None);
        let result = call(&s, "list_categories", json!({ "group": "radiology" })).await;
        let groups = result["groups"].as_array().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0]["group"], "Radiology");
    }

    #[tokio::test]
    async fn test_list_units() {
        let s = server(None);
        let result = call(&s, "list_units", json!({ "category": "Length" })).await;
        assert_eq!(result["units"][0]["name"], "Meters");
        assert!(result.get("rates").is_none());

        let result = call(&s, "list_units", json!({ "category": "Currency" })).await;
        assert_eq!(result["rates"]["mode"], "fallback");
    }

    #[tokio::test]
    async fn test_convert() {
        let s = server(None);
        let result = call(&s, "convert", json!({ "category": "Temperature", "from": "°C", "to": "°F", "value": "100" })).await;
        assert_eq!(result["isError"], false);
        assert_eq!(result["result"]["display"], "212");
        assert_eq!(result["content"][0]["text"], "100 Celsius = 212 Fahrenheit");
    }

    #[tokio::test]
    async fn test_convert_numeric_value_and_locale() {
        let s = server(None);
        let result = call(&s, "convert", json!({ "category": "Length", "from": "m", "to": "km", "value": 500, "locale": "de-DE" })).await;
        assert_eq!(result["result"]["display"], "0,5");

        let result = call(&s, "convert", json!({ "category": "Length", "from": "km", "to": "m", "value": 1.5, "locale": "de-DE" })).await;
        assert_eq!(result["isError"], false, "{}", result);
        assert_eq!(result["result"]["display"], "1500");
        assert_eq!(result["content"][0]["text"], "1,5 Kilometers = 1500 Meters");
    }

    #[tokio::test]
    async fn test_convert_fractional_number_under_comma_default() {
        let s = Server::new(Engine::new().unwrap(), None, Locale::from_tag("fr-FR"));
        let result = call(&s, "convert", json!({ "category": "Length", "from": "m", "to": "km", "value": -2.5 })).await;
        assert_eq!(result["isError"], false, "{}", result);
        assert_eq!(result["result"]["display"], "-0,0025");

        let result = call(&s, "convert", json!({ "category": "Length", "from": "m", "to": "km", "value": "2,5" })).await;
        assert_eq!(result["result"]["display"], "0,0025");
    }

    #[tokio::test]
    async fn test_convert_error_is_tool_result() {
        let s = server(None);
        let result = call(&s, "convert", json!({ "category": "Length", "from": "m", "to": "Kilograms", "value": "1" })).await;
        assert_eq!(result["isError"], true);
        assert_eq!(result["error"]["code"], "CROSS_CATEGORY_UNIT");
        assert_eq!(result["error"]["severity"], "error");
    }

    #[tokio::test]
    async fn test_convert_missing_argument() {
        let s = server(None);
        let response = s
            .handle_request(&request("tools/call", json!({ "name": "convert", "arguments": { "category": "Length" } })))
            .await;
        assert_eq!(response.error.unwrap().code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_currency_placeholder_note() {
        let s = server(None);
        let result = call(&s, "convert", json!({ "category": "Currency", "from": "USD", "to": "EUR", "value": "10" })).await;
        assert_eq!(result["result"]["display"], "10");
        assert_eq!(result["result"]["rates"]["mode"], "fallback");
        assert!(result["content"][0]["text"].as_str().unwrap().contains("placeholder"));
    }

    #[tokio::test]
    async fn test_refresh_then_convert_live() {
        let s = server(Some(live_source()));
        let result = call(&s, "refresh_rates", json!({})).await;
        assert_eq!(result["count"], 2);
        assert_eq!(result["phase"], "ready");

        let result = call(&s, "convert", json!({ "category": "Currency", "from": "USD", "to": "EUR", "value": "10" })).await;
        assert_eq!(result["result"]["display"], "5");
        assert_eq!(result["result"]["rates"]["mode"], "live");
    }

    #[tokio::test]
    async fn test_refresh_without_source() {
        let s = server(None);
        let result = call(&s, "refresh_rates", json!({})).await;
        assert_eq!(result["isError"], true);
        assert_eq!(result["error"]["code"], "RATE_FETCH_FAILED");
        assert_eq!(result["error"]["retryable"], false);
    }

    #[tokio::test]
    async fn test_refresh_failure_degrades() {
        let source: Arc<dyn RateSource> = Arc::new(StaticRateSource::failing(RateFetchError::Status(503)));
        let s = server(Some(source));
        let result = call(&s, "refresh_rates", json!({})).await;
        assert_eq!(result["isError"], true);
        assert_eq!(result["error"]["severity"], "warning");
        assert_eq!(result["phase"], "degraded");
    }

    #[tokio::test]
    async fn test_favorites_round() {
        let s = server(None);
        let result = call(&s, "toggle_favorite", json!({ "category": "Length", "from": "m", "to": "ft" })).await;
        assert_eq!(result["favorite"], true);
        assert_eq!(result["key"]["from_unit"], "Meters");

        let result = call(&s, "list_favorites", json!({})).await;
        assert_eq!(result["favorites"].as_array().unwrap().len(), 1);
        assert_eq!(result["content"][0]["text"], "- Length: Meters -> Feet");

        let result = call(&s, "toggle_favorite", json!({ "category": "Length", "from": "Meters", "to": "Feet" })).await;
        assert_eq!(result["favorite"], false);

        call(&s, "toggle_favorite", json!({ "category": "Length", "from": "ft", "to": "m" })).await;
        let result = call(&s, "clear_favorites", json!({})).await;
        assert_eq!(result["removed"], 1);
        let result = call(&s, "list_favorites", json!({})).await;
        assert_eq!(result["content"][0]["text"], "No favorites");
    }
}
