//! Handler for the `query` command.

use std::time::Duration;

use super::command::QueryArgs;
use crate::adapter::inbound::tcp::client;
use crate::domain::{PlayerRequest, RequestBatch};
use crate::error::Result;

/// Build the batch for `args`: request ids `1..=N` in argument order.
#[must_use]
pub fn batch(args: &QueryArgs) -> RequestBatch {
    args.account_ids
        .iter()
        .zip(1..)
        .map(|(&account_id, id)| PlayerRequest::new(id, args.realm.as_str(), account_id))
        .collect()
}

/// Send the batch and print the ratings as pretty JSON.
///
/// # Errors
///
/// Returns an error if the exchange with the server fails.
pub async fn execute(args: &QueryArgs) -> Result<()> {
    let requests = batch(args);
    let mut ratings = client::query(
        args.addr.as_str(),
        &requests,
        Duration::from_secs(args.timeout),
    )
    .await?;
    ratings.sort_by_key(|rating| rating.id);

    println!("{}", serde_json::to_string_pretty(&ratings)?);
    Ok(())
}
