use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::Value;

/// The on-disk layout of a GNU Radio Companion (`.grc`) flow graph.
///
/// Only the keys the converter needs are modelled; `options`, `metadata` and
/// per-block `states` are ignored. `blocks`, `connections` and each block's
/// `parameters` are required, as GRC always writes them.
#[derive(Debug, Deserialize)]
pub struct RawFlowGraph {
    pub blocks: Vec<RawBlock>,
    pub connections: Vec<RawConnection>,
}

/// A single block entry as written by GNU Radio Companion.
#[derive(Debug, Deserialize)]
pub struct RawBlock {
    pub name: String,
    pub id: String,
    pub parameters: IndexMap<String, Value>,
}

/// A stream connection: `[src_block, src_port, dst_block, dst_port]`.
#[derive(Debug, Deserialize)]
pub struct RawConnection(pub String, pub Value, pub String, pub Value);

impl RawConnection {
    pub fn source(&self) -> &str {
        &self.0
    }

    pub fn destination(&self) -> &str {
        &self.2
    }
}

/// Renders a YAML parameter value back to the text GNU Radio would show for it.
///
/// GRC quotes almost every value, but hand-edited files may contain bare numbers,
/// booleans or empty entries.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => String::new(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
