use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use qube_result::{Error, Result};
use rustc_hash::FxHashMap;

use crate::client::{StoreClient, TableDescriptor};

/// In-memory store client used for tests and single-process deployments.
pub struct MemStoreClient {
    url: String,
    closed: AtomicBool,
    tables: RwLock<FxHashMap<String, TableDescriptor>>,
}

impl MemStoreClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            closed: AtomicBool::new(false),
            tables: RwLock::new(FxHashMap::default()),
        }
    }

    fn guard_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(Error::Storage(format!(
                "connection to '{}' is closed",
                self.url
            )));
        }
        Ok(())
    }
}

impl StoreClient for MemStoreClient {
    fn url(&self) -> &str {
        &self.url
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed)
    }

    fn close(&self) {
        self.closed.store(true, Ordering::Relaxed);
    }

    fn table_exists(&self, name: &str) -> Result<bool> {
        self.guard_open()?;
        let tables = self
            .tables
            .read()
            .expect("MemStoreClient tables read lock poisoned");
        Ok(tables.contains_key(name))
    }

    fn table_descriptor(&self, name: &str) -> Result<Option<TableDescriptor>> {
        self.guard_open()?;
        let tables = self
            .tables
            .read()
            .expect("MemStoreClient tables read lock poisoned");
        Ok(tables.get(name).cloned())
    }

    fn create_table(&self, descriptor: TableDescriptor) -> Result<()> {
        self.guard_open()?;
        let mut tables = self
            .tables
            .write()
            .expect("MemStoreClient tables write lock poisoned");
        if tables.contains_key(&descriptor.name) {
            return Err(Error::Storage(format!(
                "table '{}' already exists",
                descriptor.name
            )));
        }
        tables.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    fn drop_table(&self, name: &str) -> Result<()> {
        self.guard_open()?;
        let mut tables = self
            .tables
            .write()
            .expect("MemStoreClient tables write lock poisoned");
        match tables.remove(name) {
            Some(_) => Ok(()),
            None => Err(Error::Storage(format!("table '{name}' does not exist"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_exists_drop_cycle() {
        let client = MemStoreClient::new("store://main");
        assert!(!client.table_exists("T1").unwrap());

        client
            .create_table(TableDescriptor::new("T1").with_family("F1"))
            .unwrap();
        assert!(client.table_exists("T1").unwrap());
        assert_eq!(
            client.table_descriptor("T1").unwrap().unwrap().families,
            vec!["F1".to_string()]
        );

        client.drop_table("T1").unwrap();
        assert!(!client.table_exists("T1").unwrap());
    }

    #[test]
    fn duplicate_create_and_missing_drop_are_storage_errors() {
        let client = MemStoreClient::new("store://main");
        client.create_table(TableDescriptor::new("T1")).unwrap();
        assert!(matches!(
            client.create_table(TableDescriptor::new("T1")),
            Err(Error::Storage(_))
        ));
        assert!(matches!(client.drop_table("T2"), Err(Error::Storage(_))));
    }

    #[test]
    fn closed_connection_rejects_operations() {
        let client = MemStoreClient::new("store://main");
        client.close();
        assert!(client.is_closed());
        assert!(matches!(client.table_exists("T1"), Err(Error::Storage(_))));
    }
}
