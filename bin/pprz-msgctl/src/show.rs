//! ---
//! pprz_section: "05-external-interfaces"
//! pprz_subsection: "binary"
//! pprz_type: "source"
//! pprz_scope: "code"
//! pprz_description: "Command line inspection of schema-described messages."
//! pprz_version: "v0.0.0-prealpha"
//! pprz_owner: "tbd"
//! ---
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use pprz_logging::{msg_info, LogContext};
use pprz_msg::{log_message, FieldValue, Message, MessageDirection, SchemaLookup};

/// Rendering of a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `class.name {field : value, ...}`
    Display,
    /// JSON object keyed by field name.
    Json,
    /// One `key: value` line per mapping entry.
    Mapping,
    /// Space separated bus payload.
    Payload,
}

/// Options for rendering one message.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Message class.
    #[arg(short, long = "class", default_value = "telemetry")]
    pub class: String,
    /// Message name within the class.
    #[arg(short, long)]
    pub name: String,
    /// Field values as a JSON array, e.g. `[1200, 3400, 900, 153.2]`.
    #[arg(long, value_name = "JSON")]
    pub values: Option<String>,
    /// Reject values whose shape does not match the field type.
    #[arg(long)]
    pub strict: bool,
    /// Omit `msgname`/`msgclass` from JSON and mapping output.
    #[arg(long)]
    pub payload_only: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Display)]
    pub format: OutputFormat,
}

/// Build the requested message, apply values and render it.
pub fn run(lookup: &dyn SchemaLookup, args: &ShowArgs) -> Result<String> {
    let mut message = Message::new(lookup, &args.class, &args.name)?;
    if let Some(raw) = &args.values {
        let values: Vec<FieldValue> =
            serde_json::from_str(raw).context("--values must be a JSON array")?;
        if args.strict {
            message.set_values_strict(values)?;
        } else {
            message.set_values(values)?;
        }
    }
    log_message(MessageDirection::Outbound, &message);
    msg_info!(
        context = LogContext::new()
            .with_class(&args.class)
            .with_name(&args.name),
        "rendering message as {:?}",
        args.format
    );
    render(&message, args.format, args.payload_only)
}

fn render(message: &Message, format: OutputFormat, payload_only: bool) -> Result<String> {
    Ok(match format {
        OutputFormat::Display => message.to_string(),
        OutputFormat::Json => message.to_json(payload_only)?,
        OutputFormat::Mapping => message
            .to_mapping(payload_only)
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Payload => message.encode_payload(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::registry;

    fn args(format: OutputFormat, values: Option<&str>) -> ShowArgs {
        ShowArgs {
            class: "telemetry".to_owned(),
            name: "GPS".to_owned(),
            values: values.map(str::to_owned),
            strict: false,
            payload_only: false,
            format,
        }
    }

    #[test]
    fn renders_each_format() {
        let values = Some("[1200, 3400, 900, 153.2]");
        let registry = registry();
        assert_eq!(
            run(&registry, &args(OutputFormat::Payload, values)).unwrap(),
            "1200 3400 900 153.2 "
        );
        assert_eq!(
            run(&registry, &args(OutputFormat::Display, values)).unwrap(),
            "telemetry.GPS {utm_east : 1200, utm_north : 3400, course : 900, alt : 153.2}"
        );
        let mapping = run(&registry, &args(OutputFormat::Mapping, values)).unwrap();
        assert!(mapping.starts_with("msgname: GPS\nmsgclass: telemetry\n"));
        let json = run(&registry, &args(OutputFormat::Json, None)).unwrap();
        assert!(json.contains(r#""utm_east":0"#));
    }

    #[test]
    fn wrong_value_count_is_reported() {
        let err = run(&registry(), &args(OutputFormat::Payload, Some("[1, 2]"))).unwrap_err();
        assert!(err.to_string().contains("expected 4 values, found 2"));
    }

    #[test]
    fn strict_mode_rejects_wrong_shape() {
        let mut show = args(OutputFormat::Payload, Some(r#"[1, 2, "x", 4]"#));
        assert!(run(&registry(), &show).is_ok());
        show.strict = true;
        assert!(run(&registry(), &show).is_err());
    }
}
