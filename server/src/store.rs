//! フィクスチャストア
//!
//! JSONファイルから読み込んだコレクションをメモリ内で管理し、
//! 書き込み系の操作のたびにファイルへ書き戻す

use fixture_api_common::{
    error::{FixtureApiError, FixtureResult},
    protocol::{field_key, id_key},
};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};
use uuid::Uuid;

type Db = Map<String, Value>;

/// フィクスチャストア
///
/// トップレベルのキーがコレクション名、値がレコードの配列。
/// 配列以外の値（オブジェクト等）は単一リソースとして扱う。
#[derive(Clone)]
pub struct FixtureStore {
    db: Arc<RwLock<Db>>,
    path: Option<Arc<PathBuf>>,
}

impl FixtureStore {
    /// JSONファイルを読み込んでストアを作成
    pub async fn load(path: impl Into<PathBuf>) -> FixtureResult<Self> {
        let path = path.into();
        let raw = tokio::fs::read(&path).await?;
        let db = into_db(serde_json::from_slice(&raw)?)?;

        info!(
            path = %path.display(),
            collections = db.len(),
            "Fixture store loaded"
        );

        Ok(Self {
            db: Arc::new(RwLock::new(db)),
            path: Some(Arc::new(path)),
        })
    }

    /// ファイルに書き戻さないストアを作成
    pub fn in_memory(db: Value) -> FixtureResult<Self> {
        Ok(Self {
            db: Arc::new(RwLock::new(into_db(db)?)),
            path: None,
        })
    }

    /// 書き戻し先のファイルパス
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref().map(PathBuf::as_path)
    }

    /// ストア全体のスナップショット
    pub async fn snapshot(&self) -> Value {
        Value::Object(self.db.read().await.clone())
    }

    /// IDでレコードを取得
    pub async fn get(&self, collection: &str, id: &str) -> FixtureResult<Value> {
        let db = self.db.read().await;
        let resource = resource(&db, collection)?;

        resource
            .as_array()
            .and_then(|records| records.iter().find(|record| matches_id(record, id)))
            .cloned()
            .ok_or_else(|| record_not_found(collection, id))
    }

    /// コレクション全体を取得
    ///
    /// `filters` の全ペアについて、フィールド値の文字列表現が一致するレコードだけを返す。
    /// `_` で始まるキー（`_sort` やキャッシュ回避の `_` 等）はフィルタとして扱わない。
    /// 単一リソースはフィルタを無視してそのまま返す。
    pub async fn list(&self, collection: &str, filters: &[(String, String)]) -> FixtureResult<Value> {
        let db = self.db.read().await;
        let resource = resource(&db, collection)?;

        let Some(records) = resource.as_array() else {
            return Ok(resource.clone());
        };

        let matched = records
            .iter()
            .filter(|record| {
                filters
                    .iter()
                    .filter(|(field, _)| !field.starts_with('_'))
                    .all(|(field, expected)| {
                        record.get(field).map(field_key).as_deref() == Some(expected.as_str())
                    })
            })
            .cloned()
            .collect();

        Ok(Value::Array(matched))
    }

    /// レコードをそのまま末尾に追加して書き戻す
    ///
    /// IDの重複チェックは行わない。コレクションが存在しなければ作成する。
    pub async fn push(&self, collection: &str, record: Map<String, Value>) -> FixtureResult<Value> {
        let mut db = self.db.write().await;
        let record = Value::Object(record);

        db.entry(collection)
            .or_insert_with(|| Value::Array(Vec::new()))
            .as_array_mut()
            .ok_or_else(|| {
                FixtureApiError::InvalidFixture(format!("{} is not a collection", collection))
            })?
            .push(record.clone());

        debug!(collection, "Record appended");
        self.persist(&db).await?;
        Ok(record)
    }

    /// 新しいレコードを登録して書き戻す
    ///
    /// `id` がなければ採番する。既存IDと重複する場合はエラー。
    pub async fn insert(
        &self,
        collection: &str,
        mut record: Map<String, Value>,
    ) -> FixtureResult<Value> {
        let mut db = self.db.write().await;
        let records = records_mut(&mut db, collection)?;

        match record.get("id").and_then(id_key) {
            Some(id) if records.iter().any(|existing| matches_id(existing, &id)) => {
                return Err(FixtureApiError::DuplicateId {
                    collection: collection.to_string(),
                    id,
                });
            }
            Some(_) => {}
            None if record.contains_key("id") => {}
            None => {
                record.insert("id".to_string(), next_id(records));
            }
        }

        let record = Value::Object(record);
        records.push(record.clone());

        debug!(collection, "Record inserted");
        self.persist(&db).await?;
        Ok(record)
    }

    /// レコードを置き換えて書き戻す（IDは維持）
    pub async fn replace(
        &self,
        collection: &str,
        id: &str,
        mut body: Map<String, Value>,
    ) -> FixtureResult<Value> {
        let mut db = self.db.write().await;
        let record = find_mut(&mut db, collection, id)?;

        if let Some(original) = record.get("id").cloned() {
            body.insert("id".to_string(), original);
        }
        *record = Value::Object(body);
        let record = record.clone();

        debug!(collection, id, "Record replaced");
        self.persist(&db).await?;
        Ok(record)
    }

    /// レコードにフィールドをマージして書き戻す（IDは維持）
    pub async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> FixtureResult<Value> {
        let mut db = self.db.write().await;
        let record = find_mut(&mut db, collection, id)?;

        if let Some(fields) = record.as_object_mut() {
            for (key, value) in patch {
                if key != "id" {
                    fields.insert(key, value);
                }
            }
        }
        let record = record.clone();

        debug!(collection, id, "Record updated");
        self.persist(&db).await?;
        Ok(record)
    }

    /// レコードを削除して書き戻す
    pub async fn remove(&self, collection: &str, id: &str) -> FixtureResult<()> {
        let mut db = self.db.write().await;
        let records = records_mut(&mut db, collection)?;
        let index = records
            .iter()
            .position(|record| matches_id(record, id))
            .ok_or_else(|| record_not_found(collection, id))?;
        records.remove(index);

        debug!(collection, id, "Record removed");
        self.persist(&db).await
    }

    async fn persist(&self, db: &Db) -> FixtureResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let json = serde_json::to_string_pretty(db)?;
        tokio::fs::write(path.as_path(), json).await.map_err(|err| {
            error!(path = %path.display(), "Failed to write fixture store: {}", err);
            FixtureApiError::Storage(format!("{}: {}", path.display(), err))
        })
    }
}

fn into_db(value: Value) -> FixtureResult<Db> {
    match value {
        Value::Object(db) => Ok(db),
        other => Err(FixtureApiError::InvalidFixture(format!(
            "fixture root must be a JSON object, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn resource<'a>(db: &'a Db, collection: &str) -> FixtureResult<&'a Value> {
    db.get(collection)
        .ok_or_else(|| FixtureApiError::CollectionNotFound(collection.to_string()))
}

fn records_mut<'a>(db: &'a mut Db, collection: &str) -> FixtureResult<&'a mut Vec<Value>> {
    // 単一リソースへの書き込みはサポートしない
    db.get_mut(collection)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| FixtureApiError::CollectionNotFound(collection.to_string()))
}

fn find_mut<'a>(db: &'a mut Db, collection: &str, id: &str) -> FixtureResult<&'a mut Value> {
    records_mut(db, collection)?
        .iter_mut()
        .find(|record| matches_id(record, id))
        .ok_or_else(|| record_not_found(collection, id))
}

fn matches_id(record: &Value, id: &str) -> bool {
    record.get("id").and_then(id_key).as_deref() == Some(id)
}

fn record_not_found(collection: &str, id: &str) -> FixtureApiError {
    FixtureApiError::RecordNotFound {
        collection: collection.to_string(),
        id: id.to_string(),
    }
}

/// 数値IDなら最大値+1、数値IDがなければランダムな文字列ID
fn next_id(records: &[Value]) -> Value {
    if records.is_empty() {
        return Value::from(1);
    }
    records
        .iter()
        .filter_map(|record| record.get("id").and_then(Value::as_i64))
        .max()
        .map(|max| Value::from(max + 1))
        .unwrap_or_else(|| Value::String(Uuid::new_v4().simple().to_string()))
}
