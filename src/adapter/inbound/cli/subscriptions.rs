//! Subscription management commands against the local database.

use serde_json::json;
use tabled::Tabled;

use super::command::{OwnerArgs, SubscriptionAddArgs, SubscriptionRemoveArgs};
use super::output::{self, Mode};
use crate::application::{SubscriptionRequest, SubscriptionService};
use crate::domain::OwnerId;
use crate::error::Result;
use crate::infrastructure::bootstrap::{build_subscription_service, open_store};
use crate::port::outbound::store::StoredSubscription;

#[derive(Tabled)]
struct SubscriptionRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Warehouse")]
    warehouse: String,
    #[tabled(rename = "Types")]
    box_types: String,
    #[tabled(rename = "Max coefficient")]
    max_coefficient: i32,
    #[tabled(rename = "Lead days")]
    lead_days: i32,
}

impl From<&StoredSubscription> for SubscriptionRow {
    fn from(stored: &StoredSubscription) -> Self {
        let sub = &stored.subscription;
        Self {
            id: stored.id,
            warehouse: sub.warehouses.to_string(),
            box_types: sub
                .box_types
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            max_coefficient: sub.max_coefficient,
            lead_days: sub.min_lead_days,
        }
    }
}

fn subscription_json(stored: &StoredSubscription) -> serde_json::Value {
    let sub = &stored.subscription;
    json!({
        "id": stored.id,
        "owner": sub.owner.get(),
        "warehouse": sub.warehouses.to_string(),
        "box_types": sub.box_types.iter().collect::<Vec<_>>(),
        "max_coefficient": sub.max_coefficient,
        "min_lead_days": sub.min_lead_days,
    })
}

#[allow(clippy::result_large_err)]
fn service(args: &OwnerArgs) -> Result<SubscriptionService> {
    let config = super::load_config(&args.config.config)?;
    let store = open_store(&config)?;
    Ok(build_subscription_service(&config, store))
}

/// Add a subscription for an owner.
pub fn add(args: &SubscriptionAddArgs) -> Result<()> {
    let service = service(&args.owner)?;
    let stored = service.add(&SubscriptionRequest {
        owner: OwnerId::new(args.owner.owner),
        warehouse: args.warehouse.clone(),
        max_coefficient: args.max_coefficient,
        min_lead_days: args.lead_days,
        box_type: args.box_type.clone(),
    })?;

    if output::mode() == Mode::Json {
        output::json(&json!({
            "command": "subscriptions.add",
            "subscription": subscription_json(&stored),
        }));
    } else {
        output::success(&format!(
            "Subscription #{} added for {}",
            stored.id,
            output::emphasis(&stored.subscription.warehouses)
        ));
    }
    Ok(())
}

/// Remove an owner's subscriptions for a warehouse.
pub fn remove(args: &SubscriptionRemoveArgs) -> Result<()> {
    let service = service(&args.owner)?;
    let removed = service.remove(OwnerId::new(args.owner.owner), &args.warehouse)?;

    if output::mode() == Mode::Json {
        output::json(&json!({
            "command": "subscriptions.remove",
            "removed": removed,
        }));
    } else if removed == 0 {
        output::warning("No matching subscriptions");
    } else {
        output::success(&format!("Removed {removed} subscription(s)"));
    }
    Ok(())
}

/// List an owner's subscriptions.
pub fn list(args: &OwnerArgs) -> Result<()> {
    let service = service(args)?;
    let subscriptions = service.list(OwnerId::new(args.owner))?;

    if output::mode() == Mode::Json {
        let entries: Vec<_> = subscriptions.iter().map(subscription_json).collect();
        output::json(&json!({
            "command": "subscriptions.list",
            "owner": args.owner,
            "subscriptions": entries,
        }));
        return Ok(());
    }

    if subscriptions.is_empty() {
        output::warning("No subscriptions");
        return Ok(());
    }

    output::table(subscriptions.iter().map(SubscriptionRow::from));
    Ok(())
}
