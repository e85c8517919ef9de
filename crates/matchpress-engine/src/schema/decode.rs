use serde_json::Value;

use super::{Block, DecodeError, Document, EmbedService, SchemaVersion};

/// Decodes a raw JSON string into a [`Document`].
///
/// The envelope must be a JSON object with a `blocks` array; everything else
/// is permissive. Unknown top-level fields are ignored, `createdAt` is
/// optional, and any block that fails its kind's minimal shape degrades to
/// [`Block::Unknown`] so the rest of the document still renders.
pub fn decode_document(raw: &str) -> Result<Document, DecodeError> {
    let value: Value = serde_json::from_str(raw)?;
    let obj = value.as_object().ok_or(DecodeError::InvalidEnvelope)?;

    let schema_version = match obj.get("schemaVersion") {
        None | Some(Value::Null) => SchemaVersion::Number(1),
        Some(Value::Number(n)) => SchemaVersion::Number(n.as_i64().unwrap_or(1)),
        Some(Value::String(s)) => SchemaVersion::Tag(s.clone()),
        Some(_) => return Err(DecodeError::InvalidEnvelope),
    };

    let created_at = obj.get("createdAt").and_then(timestamp_millis);

    let raw_blocks = obj
        .get("blocks")
        .and_then(Value::as_array)
        .ok_or(DecodeError::MissingBlocks)?;

    let blocks = raw_blocks
        .iter()
        .enumerate()
        .map(|(index, value)| {
            decode_block(value, index).unwrap_or_else(|_| {
                log::debug!("block {index} degraded to unknown");
                Block::Unknown {
                    caption: value.get("caption").and_then(opt_string),
                }
            })
        })
        .collect();

    Ok(Document {
        schema_version,
        created_at,
        blocks,
    })
}

/// Strict single-block decode, surfacing [`DecodeError::MalformedBlock`]
/// instead of degrading. The document decode above wraps this and swallows
/// the error; producers and tests use it directly.
pub fn decode_block(value: &Value, index: usize) -> Result<Block, DecodeError> {
    let obj = value
        .as_object()
        .ok_or(DecodeError::MalformedBlock(index))?;
    let kind = obj
        .get("kind")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MalformedBlock(index))?;

    let caption = obj.get("caption").and_then(opt_string);
    let block = match kind {
        "paragraph" => Block::Paragraph {
            text: required_string(obj.get("text"), index)?,
            caption,
        },
        "header" => Block::Header {
            text: required_string(obj.get("text"), index)?,
            level: obj.get("level").and_then(Value::as_i64),
            caption,
        },
        "quote" => Block::Quote {
            text: required_string(obj.get("text"), index)?,
            caption,
        },
        "warning" => Block::Warning {
            text: required_string(obj.get("text"), index)?,
            caption,
        },
        "list" => {
            let items = obj
                .get("items")
                .and_then(Value::as_array)
                .ok_or(DecodeError::MalformedBlock(index))?
                .iter()
                .filter_map(opt_string)
                .collect();
            Block::List {
                items,
                ordered: obj.get("ordered").and_then(Value::as_bool).unwrap_or(false),
            }
        }
        "table" => {
            let rows = obj
                .get("rows")
                .and_then(Value::as_array)
                .ok_or(DecodeError::MalformedBlock(index))?
                .iter()
                .filter_map(Value::as_array)
                .map(|row| row.iter().filter_map(opt_string).collect())
                .collect();
            Block::Table {
                rows,
                has_header: obj
                    .get("hasHeader")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            }
        }
        "image" => Block::Image {
            src: required_string(obj.get("src"), index)?,
            alt: obj.get("alt").and_then(opt_string),
            caption,
        },
        "embed" => Block::Embed {
            service: obj
                .get("service")
                .and_then(Value::as_str)
                .map(EmbedService::from_label)
                .unwrap_or(EmbedService::Other),
            source_url: required_string(obj.get("sourceUrl"), index)?,
            embed_url: obj.get("embedUrl").and_then(opt_string),
            caption,
        },
        "delimiter" => Block::Delimiter,
        "raw" => Block::Raw {
            html: required_string(obj.get("html"), index)?,
        },
        _ => Block::Unknown { caption },
    };

    Ok(block)
}

fn required_string(value: Option<&Value>, index: usize) -> Result<String, DecodeError> {
    value
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(DecodeError::MalformedBlock(index))
}

fn opt_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

/// Accepts epoch-millisecond numbers and numeric strings.
fn timestamp_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
