//! Tool definitions and handlers
//!
//! Every handler returns `Result<JsonValue, ConvertlyError>`; the caller turns
//! an `Err` into a tool result with `isError: true` so the client sees the
//! structured error instead of a failed request.

use convertly::{swap, Convertly, Display};
use convertly_core::{parse_input, Category, ConvertlyError};
use convertly_docs::{DocumentAction, SourceType};
use convertly_units::CATALOG;
use serde_json::{json, Value as JsonValue};
use tracing::debug;

pub type ToolResult = Result<JsonValue, ConvertlyError>;

pub fn tool_list() -> JsonValue {
    let category_ids: Vec<&str> = Category::ALL.iter().map(|c| c.id()).collect();

    json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a value between two units of a category. Currency and crypto use a fresh rate snapshot.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": {
                            "type": ["number", "string"],
                            "description": "Value to convert; strings are read like a typed input field"
                        },
                        "from": { "type": "string", "description": "Source unit id (e.g. 'meter', 'USD')" },
                        "to": { "type": "string", "description": "Target unit id" },
                        "category": { "type": "string", "enum": category_ids }
                    },
                    "required": ["value", "from", "to", "category"]
                }
            },
            {
                "name": "list_categories",
                "description": "List converters with their default units and capabilities.",
                "inputSchema": { "type": "object", "properties": {} }
            },
            {
                "name": "list_units",
                "description": "List the units of a category, or the actions and accepted file types of document processing.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": { "type": "string", "enum": category_ids }
                    },
                    "required": ["category"]
                }
            },
            {
                "name": "get_rates",
                "description": "Current rate table for 'currency' (units per USD) or 'crypto' (USD per coin).",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": { "type": "string", "enum": ["currency", "crypto"] }
                    },
                    "required": ["category"]
                }
            },
            {
                "name": "swap",
                "description": "Exchange source and target units; the previous output becomes the new input.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": { "type": "string", "enum": category_ids },
                        "from": { "type": "string" },
                        "to": { "type": "string" },
                        "output": { "type": "string", "description": "Currently shown output", "default": "" }
                    },
                    "required": ["category", "from", "to"]
                }
            },
            {
                "name": "process_document",
                "description": "Summarize text or reformat it as Markdown with the AI text service.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "text": { "type": "string", "description": "Document text" },
                        "action": {
                            "type": "string",
                            "enum": ["summarize", "to-markdown"],
                            "default": "summarize"
                        },
                        "file_name": { "type": "string", "description": "Original file name, checked for .txt/.md" },
                        "mime_type": { "type": "string" }
                    },
                    "required": ["text"]
                }
            }
        ]
    })
}

pub async fn call(engine: &Convertly, name: &str, args: &JsonValue) -> Option<ToolResult> {
    debug!(tool = name, "tool call");
    let result = match name {
        "convert" => tool_convert(engine, args).await,
        "list_categories" => tool_list_categories(engine),
        "list_units" => tool_list_units(engine, args),
        "get_rates" => tool_get_rates(engine, args).await,
        "swap" => tool_swap(args),
        "process_document" => tool_process_document(engine, args).await,
        _ => return None,
    };
    Some(result)
}

/// Tool result for a failed call
pub fn tool_error(err: &ConvertlyError) -> JsonValue {
    let mut text = err.message.clone();
    if let Some(suggestion) = &err.suggestion {
        text.push_str(&format!("\n\nSuggestion: {}", suggestion));
    }
    json!({
        "content": [{ "type": "text", "text": text }],
        "error": err,
        "isError": true
    })
}

fn arg_str<'a>(tool: &str, args: &'a JsonValue, name: &str) -> Result<&'a str, ConvertlyError> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Err(ConvertlyError::arg_missing(tool, name)),
        Some(v) => v
            .as_str()
            .ok_or_else(|| ConvertlyError::arg_type(tool, name, "a string")),
    }
}

fn arg_category(tool: &str, args: &JsonValue) -> Result<Category, ConvertlyError> {
    let raw = arg_str(tool, args, "category")?;
    raw.parse().map_err(|_| ConvertlyError::unknown_category(raw))
}

fn arg_value(tool: &str, args: &JsonValue) -> Result<f64, ConvertlyError> {
    let parsed = match args.get("value") {
        None | Some(JsonValue::Null) => return Err(ConvertlyError::arg_missing(tool, "value")),
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) => parse_input(s),
        Some(_) => None,
    };
    parsed.ok_or_else(|| ConvertlyError::arg_type(tool, "value", "a number"))
}

fn unit_label(category: Category, id: &str) -> String {
    CATALOG
        .get(category, id)
        .map(|u| u.symbol.clone())
        .unwrap_or_else(|| id.to_string())
}

async fn tool_convert(engine: &Convertly, args: &JsonValue) -> ToolResult {
    let category = arg_category("convert", args)?;
    let from = arg_str("convert", args, "from")?;
    let to = arg_str("convert", args, "to")?;
    let value = arg_value("convert", args)?;

    let result = engine.convert(value, from, to, category).await?;
    let text = format!(
        "{} {} = {} {}",
        convertly_core::format_result(value),
        unit_label(category, from),
        result.formatted,
        unit_label(category, to)
    );

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "category": category,
        "from": from,
        "to": to,
        "value": result.value,
        "display": Display::Value(result.formatted)
    }))
}

fn tool_list_categories(engine: &Convertly) -> ToolResult {
    let definitions = engine.definitions();
    let text = definitions
        .iter()
        .map(|d| format!("- {} ({}): {} -> {}", d.title, d.id, d.default_from, d.default_to))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "data": definitions,
        "document_processing_enabled": engine.has_text_service()
    }))
}

fn tool_list_units(engine: &Convertly, args: &JsonValue) -> ToolResult {
    let category = arg_category("list_units", args)?;

    if category == Category::Document {
        let actions: Vec<JsonValue> = DocumentAction::ALL
            .iter()
            .map(|a| json!({ "id": a.id(), "name": a.name(), "symbol": a.symbol() }))
            .collect();
        let sources: Vec<JsonValue> = SourceType::ALL
            .iter()
            .map(|s| json!({ "id": s.id(), "name": s.name(), "extension": s.extension(), "mime_type": s.mime_type() }))
            .collect();
        let text = DocumentAction::ALL
            .iter()
            .map(|a| format!("- {} ({})", a.name(), a.id()))
            .collect::<Vec<_>>()
            .join("\n");

        return Ok(json!({
            "content": [{ "type": "text", "text": text }],
            "category": category,
            "actions": actions,
            "source_types": sources
        }));
    }

    let units = engine.units(category);
    let text = units
        .iter()
        .map(|u| format!("- {} [{}]", u, u.id))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "category": category,
        "units": units
    }))
}

async fn tool_get_rates(engine: &Convertly, args: &JsonValue) -> ToolResult {
    let category = arg_category("get_rates", args)?;
    let table = engine.rates(category).await?;

    let mut text = format!("{} rates (base {}):\n", category.name(), table.base());
    for (id, rate) in table.sorted() {
        text.push_str(&format!("- {}: {}\n", id, rate));
    }

    Ok(json!({
        "content": [{ "type": "text", "text": text.trim_end() }],
        "data": table
    }))
}

fn tool_swap(args: &JsonValue) -> ToolResult {
    let category = arg_category("swap", args)?;
    let from = arg_str("swap", args, "from")?;
    let to = arg_str("swap", args, "to")?;
    let output = match args.get("output") {
        None | Some(JsonValue::Null) => "",
        Some(_) => arg_str("swap", args, "output")?,
    };

    let definition = CATALOG
        .definition(category)
        .ok_or_else(|| ConvertlyError::internal(format!("no converter for {}", category)))?;
    let swapped = swap(definition, from, to, output)?;

    Ok(json!({
        "content": [{ "type": "text", "text": format!("{} -> {}", swapped.from, swapped.to) }],
        "data": swapped
    }))
}

async fn tool_process_document(engine: &Convertly, args: &JsonValue) -> ToolResult {
    let text = arg_str("process_document", args, "text")?;
    let action = match args.get("action") {
        None | Some(JsonValue::Null) => DocumentAction::Summarize,
        Some(_) => arg_str("process_document", args, "action")?.parse::<DocumentAction>()?,
    };

    if let Some(file_name) = args.get("file_name").and_then(|v| v.as_str()) {
        let mime = args.get("mime_type").and_then(|v| v.as_str());
        SourceType::detect(file_name, mime)?;
    }

    let result = engine.process_document(text, action).await?;

    Ok(json!({
        "content": [{ "type": "text", "text": result }],
        "action": action
    }))
}
