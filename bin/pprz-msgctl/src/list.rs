//! ---
//! pprz_section: "05-external-interfaces"
//! pprz_subsection: "binary"
//! pprz_type: "source"
//! pprz_scope: "code"
//! pprz_description: "Command line inspection of schema-described messages."
//! pprz_version: "v0.0.0-prealpha"
//! pprz_owner: "tbd"
//! ---
use anyhow::Result;
use clap::Args;
use pprz_common::config::ToolConfig;
use pprz_logging::{msg_debug, LogContext};
use pprz_msg::{Message, SchemaLookup};

/// Options for listing a message class.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Message class to list; defaults to the configured class.
    #[arg(short, long = "class")]
    pub class: Option<String>,
}

/// Build every message of the class and render the listing.
pub fn run(lookup: &dyn SchemaLookup, config: &ToolConfig, args: &ListArgs) -> Result<String> {
    let class = args.class.as_deref().unwrap_or(&config.default_class);
    let messages = lookup
        .message_names(class)?
        .iter()
        .map(|name| Message::new(lookup, class, name))
        .collect::<pprz_msg::Result<Vec<_>>>()?;

    let mut lines = Vec::with_capacity(messages.len() + 1);
    lines.push(format!(
        "Listing {} messages in '{}' msg_class",
        messages.len(),
        class
    ));
    for message in &messages {
        msg_debug!(
            context = LogContext::new()
                .with_class(message.class_name())
                .with_name(message.msg_name()),
            "listing message id {}",
            message.id()
        );
        lines.push(message.to_string());
    }
    Ok(lines.join("\n"))
}
