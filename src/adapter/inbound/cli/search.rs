//! One-shot slot search against a fresh snapshot.

use chrono::Utc;
use serde_json::json;
use tabled::Tabled;

use super::command::SearchArgs;
use super::output::{self, Mode};
use crate::application::dispatch::DATE_FORMAT;
use crate::application::{search, SubscriptionRules};
use crate::error::Result;
use crate::infrastructure::bootstrap::build_fetcher;

#[derive(Tabled)]
struct SlotRow {
    #[tabled(rename = "Warehouse")]
    warehouse: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Coefficient")]
    coefficient: i32,
    #[tabled(rename = "Type")]
    box_type: String,
}

/// Fetch the current snapshot and print the slots matching the query.
pub async fn execute(args: &SearchArgs) -> Result<()> {
    let config = super::load_config(&args.config.config)?;
    let box_type = SubscriptionRules::from(&config.matching).canonical_box_type(&args.box_type)?;
    let fetcher = build_fetcher(&config)?;

    let records = fetcher.fetch_coefficients().await?;
    let today = Utc::now().date_naive();
    let found = search(
        &records,
        &box_type,
        args.lead_days,
        args.max_coefficient,
        today,
    );

    if output::mode() == Mode::Json {
        let slots: Vec<_> = found
            .iter()
            .map(|r| {
                json!({
                    "warehouse": r.warehouse_name,
                    "date": r.date.to_string(),
                    "coefficient": r.coefficient,
                    "box_type": r.box_type_name,
                })
            })
            .collect();
        output::json(&json!({
            "command": "search",
            "box_type": box_type,
            "lead_days": args.lead_days,
            "max_coefficient": args.max_coefficient,
            "snapshot_size": records.len(),
            "slots": slots,
        }));
        return Ok(());
    }

    output::title("Search");
    output::field("Box type", &box_type);
    output::field("Lead days", args.lead_days);
    output::field("Max coefficient", args.max_coefficient);
    output::field("Snapshot", format!("{} records", records.len()));

    if found.is_empty() {
        output::warning("No matching slots right now");
        return Ok(());
    }

    let rows: Vec<SlotRow> = found
        .iter()
        .map(|r| SlotRow {
            warehouse: r.warehouse_name.clone(),
            date: r.date.format(DATE_FORMAT).to_string(),
            coefficient: r.coefficient,
            box_type: r.box_type_name.clone(),
        })
        .collect();
    output::table(rows);
    output::success(&format!("{} slot(s) found", found.len()));
    Ok(())
}
