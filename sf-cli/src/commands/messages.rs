//! Device message commands.

use clap::Subcommand;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use console::style;

use sf_api::MessageQuery;
use sf_core::codec::parse_instant;
use sf_core::config::ConfigHandle;
use sf_core::error::{SfError, SfResult};
use sf_models::DeviceMessage;

use crate::OutputFormat;

#[derive(Subcommand)]
pub enum MessagesAction {
    /// List a device's messages, newest first.
    List {
        /// Device identifier.
        device: String,
        /// Follow pagination and list every message in the window.
        #[arg(short, long)]
        all: bool,
        /// Only messages at or after this instant (epoch ms or ISO 8601, naive = UTC).
        #[arg(long)]
        since: Option<String>,
        /// Only messages before this instant (epoch ms or ISO 8601, naive = UTC).
        #[arg(long)]
        before: Option<String>,
        /// Page size requested from the server.
        #[arg(short = 'n', long)]
        limit: Option<u32>,
    },
}

fn instant_arg(name: &str, value: Option<String>) -> SfResult<Option<i64>> {
    value
        .map(|v| {
            parse_instant(&v).ok_or_else(|| SfError::Config(format!("invalid --{name} value: {v}")))
        })
        .transpose()
}

pub async fn run(config: ConfigHandle, action: MessagesAction, format: OutputFormat) -> SfResult<()> {
    let api = super::create_api_client(&config).await?;

    match action {
        MessagesAction::List { device, all, since, before, limit } => {
            let query = MessageQuery {
                list_all: all,
                since: instant_arg("since", since)?,
                before: instant_arg("before", before)?,
                limit,
                ..MessageQuery::default()
            };
            let raw = api.list_device_messages(&device, &query).await?;

            match format {
                OutputFormat::Json => super::print_json(&serde_json::Value::Array(raw)),
                OutputFormat::Text => {
                    let messages = raw
                        .iter()
                        .map(DeviceMessage::from_server_map)
                        .collect::<SfResult<Vec<_>>>()?;
                    print_message_table(&device, &messages);
                }
            }
        }
    }

    Ok(())
}

fn print_message_table(device: &str, messages: &[DeviceMessage]) {
    if messages.is_empty() {
        println!("No messages found for {device}.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["Time", "Seq", "Payload", "LQI"]);

    for m in messages {
        table.add_row(vec![
            super::format_millis(Some(m.time)),
            m.seq_number.map(|s| s.to_string()).unwrap_or_else(|| "-".into()),
            m.data.clone().unwrap_or_else(|| "-".into()),
            m.lqi.map(|l| l.to_string()).unwrap_or_else(|| "-".into()),
        ]);
    }

    println!("{table}");
    println!("\n{} message(s) for {}", style(messages.len()).bold(), style(device).cyan());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_arg() {
        assert_eq!(instant_arg("since", None).unwrap(), None);
        assert_eq!(
            instant_arg("since", Some("2021-02-22T08:58:41".into())).unwrap(),
            Some(1_613_984_321_000)
        );
        assert!(matches!(
            instant_arg("before", Some("tomorrow".into())),
            Err(SfError::Config(_))
        ));
    }
}
