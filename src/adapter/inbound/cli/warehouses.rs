//! Warehouse directory commands.

use serde_json::json;
use tabled::Tabled;

use super::command::WarehouseListArgs;
use super::output::{self, Mode};
use crate::domain::WarehouseKind;
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap::{build_fetcher, open_store};

#[derive(Tabled)]
struct WarehouseRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
}

/// Download the warehouse directory and store it.
pub async fn sync(config_path: &std::path::Path) -> Result<()> {
    let config = super::load_config(config_path)?;
    let fetcher = build_fetcher(&config)?;
    let store = open_store(&config)?;

    let directory = fetcher.fetch_warehouses().await?;
    store.replace_warehouses(&directory)?;

    if output::mode() == Mode::Json {
        output::json(&json!({
            "command": "warehouses.sync",
            "count": directory.len(),
        }));
    } else {
        output::success(&format!("Stored {} warehouse(s)", directory.len()));
    }
    Ok(())
}

/// Print the stored warehouse directory.
pub fn list(args: &WarehouseListArgs) -> Result<()> {
    let config = super::load_config(&args.config.config)?;
    let store = open_store(&config)?;
    let kind = if args.service_centers {
        WarehouseKind::ServiceCenter
    } else {
        WarehouseKind::Warehouse
    };
    let directory = store.list_warehouses(Some(kind)).map_err(Error::from)?;

    if output::mode() == Mode::Json {
        let entries: Vec<_> = directory
            .iter()
            .map(|w| json!({ "id": w.id.get(), "name": w.name }))
            .collect();
        output::json(&json!({
            "command": "warehouses.list",
            "warehouses": entries,
        }));
        return Ok(());
    }

    if directory.is_empty() {
        output::warning("Warehouse directory is empty");
        output::hint("run `slotwatch warehouses sync` first");
        return Ok(());
    }

    output::table(directory.into_iter().map(|w| WarehouseRow {
        id: w.id.get(),
        name: w.name,
    }));
    Ok(())
}
