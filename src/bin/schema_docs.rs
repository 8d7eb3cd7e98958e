//! Write markdown schema docs for the log wire format, the config file, and
//! the chart output shapes.
//!
//! Run:
//! - cargo run --bin schema_docs

use std::error::Error;
use std::fs;
use std::path::Path;

use schemars::{schema_for, Schema};
use serde_json::{Map, Value};

use voicetide::config::AppConfig;
use voicetide::core::event::LogEvent;
use voicetide::core::resample::BucketedSample;
use voicetide::core::sound::SoundInterval;

fn main() -> Result<(), Box<dyn Error>> {
    let out_dir = Path::new("docs/schemas");
    fs::create_dir_all(out_dir)?;

    write_schema_markdown("log_event", &schema_for!(LogEvent), out_dir)?;
    write_schema_markdown("app_config", &schema_for!(AppConfig), out_dir)?;
    write_schema_markdown("user_activity_sample", &schema_for!(BucketedSample), out_dir)?;
    write_schema_markdown("sound_interval", &schema_for!(SoundInterval), out_dir)?;

    println!("Saved schema docs to {}", out_dir.display());
    Ok(())
}

fn write_schema_markdown(name: &str, root: &Schema, out_dir: &Path) -> Result<(), Box<dyn Error>> {
    let mut output = String::new();
    append_section(&mut output, "Root", root.as_object());

    if let Some(defs) = root
        .as_object()
        .and_then(|obj| obj.get("$defs"))
        .and_then(Value::as_object)
    {
        let mut names: Vec<_> = defs.keys().collect();
        names.sort();
        for def_name in names {
            output.push('\n');
            output.push_str(&format!("## {def_name}\n\n"));
            append_section(&mut output, def_name, defs[def_name].as_object());
        }
    }

    fs::write(out_dir.join(format!("{name}.md")), output)?;
    Ok(())
}

fn append_section(output: &mut String, label: &str, obj: Option<&Map<String, Value>>) {
    let Some(obj) = obj else {
        output.push_str(&format!("{label}: any\n"));
        return;
    };

    if let Some(properties) = obj.get("properties").and_then(Value::as_object) {
        output.push_str("| Field | Type | Description |\n");
        output.push_str("| --- | --- | --- |\n");
        let mut keys: Vec<_> = properties.keys().collect();
        keys.sort();
        for key in keys {
            let schema = &properties[key];
            output.push_str(&format!(
                "| {key} | {} | {} |\n",
                type_name(schema),
                description(schema)
            ));
        }
        output.push('\n');
        return;
    }

    if let Some(values) = obj.get("enum").and_then(Value::as_array) {
        let items = values
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        output.push_str(&format!("Enum values: {items}\n"));
        return;
    }

    output.push_str(&format!("{label}: see JSON schema\n"));
}

fn type_name(schema: &Value) -> String {
    let Some(obj) = schema.as_object() else {
        return "any".to_string();
    };
    if let Some(reference) = obj.get("$ref").and_then(Value::as_str) {
        return reference
            .rsplit('/')
            .next()
            .unwrap_or(reference)
            .to_string();
    }
    match obj.get("type") {
        Some(Value::String(t)) if t == "array" => {
            let item = obj.get("items").map(type_name).unwrap_or_default();
            format!("{item}[]")
        }
        Some(Value::String(t)) => t.clone(),
        Some(Value::Array(list)) => {
            let mut names: Vec<String> = list
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
            names.sort();
            names.join(" or ")
        }
        _ => "object".to_string(),
    }
}

fn description(schema: &Value) -> String {
    schema
        .as_object()
        .and_then(|obj| obj.get("description"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
