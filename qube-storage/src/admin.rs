use qube_result::Result;
use tracing::debug;
use uuid::Uuid;

use crate::client::{StoreClient, TableDescriptor, TABLE_OWNER_TAG, TABLE_UUID_TAG};

/// Create a table with the given column families unless it already exists.
///
/// Every created table is stamped with a random [`TABLE_UUID_TAG`]; when an
/// `owner` is given (the deployment's metadata prefix) it lands in
/// [`TABLE_OWNER_TAG`], which the cleanup job later checks before dropping.
pub fn create_table_if_needed(
    client: &dyn StoreClient,
    name: &str,
    families: &[&str],
    owner: Option<&str>,
) -> Result<()> {
    if client.table_exists(name)? {
        debug!("table '{name}' already exists");
        return Ok(());
    }

    debug!("creating table '{name}'");
    let mut descriptor = TableDescriptor::new(name);
    for family in families {
        descriptor = descriptor.with_family(*family);
    }
    descriptor.set_tag(TABLE_UUID_TAG, Uuid::new_v4().to_string());
    if let Some(owner) = owner {
        descriptor.set_tag(TABLE_OWNER_TAG, owner);
    }
    client.create_table(descriptor)?;
    debug!("table '{name}' created");
    Ok(())
}

/// Drop a table if it exists; dropping an absent table is not an error.
pub fn drop_table_if_exists(client: &dyn StoreClient, name: &str) -> Result<()> {
    if !client.table_exists(name)? {
        debug!("table '{name}' does not exist");
        return Ok(());
    }

    client.drop_table(name)?;
    debug!("table '{name}' dropped");
    Ok(())
}
