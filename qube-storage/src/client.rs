use std::time::Duration;

use qube_result::Result;
use rustc_hash::FxHashMap;

/// Tag carrying the random id stamped on every table this deployment creates.
pub const TABLE_UUID_TAG: &str = "uuid";

/// Tag naming the deployment (by metadata prefix) that owns a table. The
/// cleanup job refuses to drop tables whose owner tag does not match.
pub const TABLE_OWNER_TAG: &str = "owner";

/// Descriptor of one physical table: its column families plus free-form tags.
#[derive(Clone, Debug, Default)]
pub struct TableDescriptor {
    pub name: String,
    pub families: Vec<String>,
    pub tags: FxHashMap<String, String>,
}

impl TableDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            families: Vec::new(),
            tags: FxHashMap::default(),
        }
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.families.push(family.into());
        self
    }

    pub fn set_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// Client retry configuration applied when a connection is built.
///
/// The store's own client performs `max_client_retries` bounded retries with
/// `retry_pause` between attempts and fails an operation after
/// `operation_timeout`; this struct only carries the numbers to the client
/// factory.
#[derive(Clone, Debug)]
pub struct RetryOptions {
    pub max_client_retries: u32,
    pub retry_pause: Duration,
    pub operation_timeout: Duration,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            max_client_retries: 5,
            retry_pause: Duration::from_secs(3),
            operation_timeout: Duration::from_secs(60),
        }
    }
}

/// Connection to the clustered store, scoped to table administration.
///
/// Implementations are shareable across threads; one connection per storage
/// URL is cached in the [`StorePool`](crate::pool::StorePool) and handed out
/// as `Arc`s.
pub trait StoreClient: Send + Sync {
    fn url(&self) -> &str;

    fn is_closed(&self) -> bool;

    fn close(&self);

    fn table_exists(&self, name: &str) -> Result<bool>;

    fn table_descriptor(&self, name: &str) -> Result<Option<TableDescriptor>>;

    fn create_table(&self, descriptor: TableDescriptor) -> Result<()>;

    fn drop_table(&self, name: &str) -> Result<()>;
}
