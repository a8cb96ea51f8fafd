//! List records through the REST API and print them as JSON.

use serde::Serialize;
use storedash_client::endpoint::{Billboards, Categories, Colors, Orders, Products, Sizes};
use storedash_client::{ClientError, DashboardClient, Endpoint};
use storedash_core::{ResourceKind, StoreId};

async fn fetch<E: Endpoint>(
    client: &DashboardClient,
    store: StoreId,
) -> Result<serde_json::Value, Box<dyn std::error::Error>>
where
    E::Entity: Serialize,
{
    let records = client.list::<E>(store).await?;
    Ok(serde_json::to_value(records)?)
}

/// Print every record of `kind` in `store`.
///
/// # Errors
///
/// Returns an error for an invalid base URL, an unknown store, a missing
/// owner when listing orders, or a transport failure.
pub async fn run(
    kind: ResourceKind,
    store: StoreId,
    owner: Option<&str>,
    base_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut client = DashboardClient::new(base_url)?;
    if let Some(owner) = owner {
        client = client.with_owner(owner);
    } else if kind == ResourceKind::Orders {
        return Err(ClientError::Unauthorized.into());
    }

    let records = match kind {
        ResourceKind::Billboards => fetch::<Billboards>(&client, store).await?,
        ResourceKind::Categories => fetch::<Categories>(&client, store).await?,
        ResourceKind::Sizes => fetch::<Sizes>(&client, store).await?,
        ResourceKind::Colors => fetch::<Colors>(&client, store).await?,
        ResourceKind::Products => fetch::<Products>(&client, store).await?,
        ResourceKind::Orders => fetch::<Orders>(&client, store).await?,
    };

    tracing::info!(%kind, count = records.as_array().map_or(0, Vec::len), "Fetched");

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&records)?);
    }
    Ok(())
}
