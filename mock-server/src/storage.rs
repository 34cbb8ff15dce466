//! Stand-in for object storage: pre-signed PUTs and public GETs.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::store::Db;

#[derive(Deserialize)]
pub struct SignedQuery {
    pub signature: Option<String>,
}

/// Accept the body only with the signature issued for this path. Each
/// signature is good for one write. Answers are plain text, like a real
/// bucket.
pub async fn put_object(
    State(db): State<Db>,
    Path(path): Path<String>,
    Query(query): Query<SignedQuery>,
    body: Bytes,
) -> (StatusCode, String) {
    let mut store = db.write().await;
    let valid = match (store.signatures.get(&path), query.signature.as_deref()) {
        (Some(expected), Some(given)) => expected == given,
        _ => false,
    };
    if !valid {
        return (StatusCode::FORBIDDEN, "SignatureDoesNotMatch".to_string());
    }
    store.signatures.remove(&path);
    store.objects.insert(path, body.to_vec());
    (StatusCode::OK, String::new())
}

pub async fn get_object(
    State(db): State<Db>,
    Path(path): Path<String>,
) -> Result<Vec<u8>, StatusCode> {
    db.read()
        .await
        .objects
        .get(&path)
        .cloned()
        .ok_or(StatusCode::NOT_FOUND)
}
