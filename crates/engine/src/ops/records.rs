use crate::{Engine, EngineError, Record, RecordFields, ResultEngine};

impl Engine {
    /// Stores a new record and returns it with its freshly assigned id.
    pub async fn insert(&self, fields: RecordFields) -> Record {
        let record = Record::new(fields);
        self.records.write().await.push(record.clone());
        record
    }

    /// Returns every record in insertion order.
    pub async fn records(&self) -> Vec<Record> {
        self.records.read().await.clone()
    }

    /// Returns the record with the given id.
    pub async fn record(&self, id: &str) -> ResultEngine<Record> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))
    }

    /// Replaces every field of an existing record, keeping its id and its
    /// position in the collection.
    pub async fn update(&self, id: &str, fields: RecordFields) -> ResultEngine<Record> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;
        *slot = Record::with_id(id.to_string(), fields);
        Ok(slot.clone())
    }

    /// Removes the record with the given id.
    ///
    /// Deleting an unknown id is not an error. Returns whether something was
    /// removed.
    pub async fn delete(&self, id: &str) -> bool {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| record.id != id);
        records.len() != before
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
