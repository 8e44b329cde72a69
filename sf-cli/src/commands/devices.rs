//! Device commands.

use clap::Subcommand;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use console::style;

use sf_api::DeviceQuery;
use sf_core::config::ConfigHandle;
use sf_core::error::SfResult;
use sf_models::Device;

use crate::OutputFormat;

#[derive(Subcommand)]
pub enum DevicesAction {
    /// List devices.
    List {
        /// Follow pagination and list every device.
        #[arg(short, long)]
        all: bool,
        /// Page size requested from the server.
        #[arg(short = 'n', long)]
        limit: Option<u32>,
    },
    /// Show a single device.
    Get {
        /// Device identifier.
        id: String,
    },
}

pub async fn run(config: ConfigHandle, action: DevicesAction, format: OutputFormat) -> SfResult<()> {
    let api = super::create_api_client(&config).await?;

    match action {
        DevicesAction::List { all, limit } => {
            let query = DeviceQuery {
                list_all: all,
                limit,
                ..DeviceQuery::default()
            };
            let raw = api.list_devices(&query).await?;

            match format {
                OutputFormat::Json => super::print_json(&serde_json::Value::Array(raw)),
                OutputFormat::Text => {
                    let devices = raw
                        .iter()
                        .map(Device::from_server_map)
                        .collect::<SfResult<Vec<_>>>()?;
                    print_device_table(&devices);
                }
            }
        }
        DevicesAction::Get { id } => {
            let raw = api.device(&id).await?;
            match format {
                OutputFormat::Json => super::print_json(&raw),
                OutputFormat::Text => {
                    let device = Device::from_server_map(&raw)?;
                    println!("{}", style(device.title()).bold());
                    println!("  id:          {}", device.id);
                    println!("  state:       {}", label(device.state));
                    println!("  com state:   {}", label(device.com_state));
                    println!("  lqi:         {}", label(device.lqi));
                    println!("  last seen:   {}", super::format_millis(device.last_com));
                    println!("  device type: {}", device.device_type_id.as_deref().unwrap_or("-"));
                    println!("  group:       {}", device.group_id.as_deref().unwrap_or("-"));
                }
            }
        }
    }

    Ok(())
}

fn label<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn print_device_table(devices: &[Device]) {
    if devices.is_empty() {
        println!("No devices found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["Id", "Name", "State", "Com", "LQI", "Last seen"]);

    for d in devices {
        table.add_row(vec![
            d.id.clone(),
            super::truncate(d.title(), 30),
            label(d.state),
            label(d.com_state),
            label(d.lqi),
            super::format_millis(d.last_com),
        ]);
    }

    println!("{table}");
    println!("\n{} device(s)", style(devices.len()).bold());
}
