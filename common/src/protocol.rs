//! 通信プロトコル定義
//!
//! 本番の update job API と同じ形のレスポンスエンベロープ、
//! およびリクエストボディの解釈ルール

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// credentialsの種別タグ
pub const GIT_SOURCE: &str = "git_source";

/// credentialsのホスト
pub const GITHUB_HOST: &str = "github.com";

/// credentialsのユーザー名
pub const ACCESS_TOKEN_USERNAME: &str = "x-access-token";

/// レスポンスエンベロープ `{ "data": { "id"?, "attributes" } }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T = Value> {
    /// エンベロープ本体
    pub data: EnvelopeData<T>,
}

/// エンベロープの `data` 部分
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnvelopeData<T = Value> {
    /// レコードID（truthyなIDを持つレコードのみ）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// 元のレコード
    pub attributes: T,
}

impl Envelope<Value> {
    /// ルーターが解決したデータをエンベロープで包む
    ///
    /// `id` はデータがtruthyな `id` フィールドを持つ場合のみ設定される。
    /// 配列（コレクション全体）には `id` は付かない。
    pub fn wrap(data: Value) -> Self {
        let id = data.get("id").filter(|id| is_truthy(id)).cloned();
        Self {
            data: EnvelopeData {
                id,
                attributes: data,
            },
        }
    }

    /// 空オブジェクトを包んだエンベロープ（404時のボディ）
    pub fn empty() -> Self {
        Self::wrap(Value::Object(Map::new()))
    }
}

impl<T> Envelope<T> {
    /// IDなしで属性だけを包む
    pub fn attributes(attributes: T) -> Self {
        Self {
            data: EnvelopeData {
                id: None,
                attributes,
            },
        }
    }
}

/// git_source形式のcredentials
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GitSourceCredentials {
    /// 種別タグ（常に "git_source"）
    #[serde(rename = "type")]
    pub kind: String,
    /// ホスト名
    pub host: String,
    /// ユーザー名
    pub username: String,
    /// パスワード（未設定時はキーごと省略）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl GitSourceCredentials {
    /// github.com向けのアクセストークンcredentials
    pub fn github(password: Option<String>) -> Self {
        Self {
            kind: GIT_SOURCE.to_string(),
            host: GITHUB_HOST.to_string(),
            username: ACCESS_TOKEN_USERNAME.to_string(),
            password,
        }
    }
}

/// credentialsエンドポイントの `attributes`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CredentialsAttributes {
    /// credentials本体
    pub credentials: GitSourceCredentials,
}

/// JavaScriptの真偽値変換と同じ判定
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// リクエストボディのtruthyな `data` フィールド
pub fn truthy_data(body: &Value) -> Option<&Value> {
    body.get("data").filter(|data| is_truthy(data))
}

/// IDの文字列表現（パスパラメーターとの比較用）
///
/// falsyなIDや配列・オブジェクトのIDはどのパスとも一致しない。
pub fn id_key(id: &Value) -> Option<String> {
    if !is_truthy(id) {
        return None;
    }
    match id {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(number_key(n)),
        _ => None,
    }
}

/// レコードのフィールド値の文字列表現（クエリフィルタ用）
pub fn field_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_key(n),
        other => other.to_string(),
    }
}

fn number_key(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}
