// src/repository.rs

use futures::stream::TryStreamExt;
use log::debug;
use mongodb::bson::doc;
use mongodb::error::Result as MongoResult;
use mongodb::{options::ClientOptions, Client, Collection, Database};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Category, Task};

pub struct MongoDB {
    pub client: Client,
    pub db: Database,
}

impl MongoDB {
    pub async fn init(uri: &str, db_name: &str) -> MongoResult<Self> {
        let client_options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);
        Ok(MongoDB { client, db })
    }
}

/// A document kind kept in its own collection, keyed by a string id and
/// scoped to the user who owns it.
pub trait Record: Serialize + DeserializeOwned + Unpin + Send + Sync {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

impl Record for Task {
    const COLLECTION: &'static str = "tasks";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Category {
    const COLLECTION: &'static str = "categories";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Stored shape: the record's own fields plus its owner.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Owned<T> {
    user_id: String,
    #[serde(flatten)]
    record: T,
}

/// list / get / create / update / delete over one collection.
pub struct Repository<T: Record> {
    coll: Collection<Owned<T>>,
}

impl<T: Record> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Repository {
            coll: self.coll.clone(),
        }
    }
}

impl<T: Record> Repository<T> {
    pub fn new(db: &Database) -> Self {
        Repository {
            coll: db.collection(T::COLLECTION),
        }
    }

    /// Ids are assigned here, never by clients.
    pub fn next_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// All of the user's records in insertion order.
    pub async fn list(&self, user_id: &str) -> MongoResult<Vec<T>> {
        let docs: Vec<Owned<T>> = self
            .coll
            .find(doc! { "userId": user_id })
            .sort(doc! { "_id": 1 })
            .await?
            .try_collect()
            .await?;
        debug!("Loaded {} {} for {}", docs.len(), T::COLLECTION, user_id);
        Ok(docs.into_iter().map(|d| d.record).collect())
    }

    pub async fn get(&self, user_id: &str, id: &str) -> MongoResult<Option<T>> {
        let found = self.coll.find_one(doc! { "userId": user_id, "id": id }).await?;
        Ok(found.map(|d| d.record))
    }

    pub async fn create(&self, user_id: &str, record: T) -> MongoResult<T> {
        let owned = Owned {
            user_id: user_id.to_string(),
            record,
        };
        self.coll.insert_one(&owned).await?;
        Ok(owned.record)
    }

    /// Replaces the stored record. Returns false when it no longer exists.
    pub async fn update(&self, user_id: &str, record: T) -> MongoResult<bool> {
        let filter = doc! { "userId": user_id, "id": record.id() };
        let owned = Owned {
            user_id: user_id.to_string(),
            record,
        };
        let res = self.coll.replace_one(filter, &owned).await?;
        Ok(res.matched_count == 1)
    }

    /// Permanently removes the record, handing back what was deleted.
    pub async fn delete(&self, user_id: &str, id: &str) -> MongoResult<Option<T>> {
        let removed = self
            .coll
            .find_one_and_delete(doc! { "userId": user_id, "id": id })
            .await?;
        Ok(removed.map(|d| d.record))
    }
}

impl Repository<Category> {
    /// Moves a category's `taskCount` by `delta`, never below zero.
    pub async fn adjust_task_count(&self, user_id: &str, id: &str, delta: i64) -> MongoResult<()> {
        let mut filter = doc! { "userId": user_id, "id": id };
        if delta < 0 {
            filter.insert("taskCount", doc! { "$gte": -delta });
        }
        self.coll
            .update_one(filter, doc! { "$inc": { "taskCount": delta } })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{in_category, task};
    use mongodb::bson::{self, Bson};

    #[test]
    fn owned_task_flattens_into_one_document() {
        let owned = Owned {
            user_id: "u1".to_string(),
            record: in_category(task("t1"), "work"),
        };
        let doc = bson::to_document(&owned).unwrap();
        assert_eq!(doc.get_str("userId").unwrap(), "u1");
        assert_eq!(doc.get_str("id").unwrap(), "t1");
        assert_eq!(doc.get_str("status").unwrap(), "Not Started");
        assert_eq!(doc.get("startTime"), Some(&Bson::Null));
        assert_eq!(doc.get_document("category").unwrap().get_str("id").unwrap(), "work");
    }

    #[test]
    fn stored_document_reads_back_ignoring_object_id() {
        let mut doc = bson::to_document(&Owned {
            user_id: "u1".to_string(),
            record: task("t1"),
        })
        .unwrap();
        doc.insert("_id", bson::oid::ObjectId::new());
        let back: Owned<Task> = bson::from_document(doc).unwrap();
        assert_eq!(back.user_id, "u1");
        assert_eq!(back.record, task("t1"));
    }

    #[test]
    fn ids_are_unique_uuids() {
        let a = Repository::<Task>::next_id();
        let b = Repository::<Task>::next_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }
}
