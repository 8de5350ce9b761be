//! Token-cursor pagination over an ordered snapshot of a keyed collection.
//!
//! Every list operation calls [`paginate`] directly with the collection
//! snapshot, the caller-supplied token/limit and an extractor for the
//! item's unique attribute. The token is an opaque cursor naming the
//! unique attribute of the last item already returned; ordering is the
//! fixed iteration order of the backing `BTreeMap`, so an unchanged
//! collection always yields the same pages.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::errors::ServiceError;

/// Page through `items`, resuming after the cursor in `token`.
///
/// - `token` absent starts at the beginning; a token that does not decode
///   or that names a unique attribute no longer present fails with
///   `InvalidToken`.
/// - `limit` absent falls back to `default_limit`; zero or negative is a
///   `Validation` error.
/// - The second tuple element is the next cursor, absent once the
///   collection is exhausted.
pub fn paginate<T, K>(
    items: &[T],
    token: Option<&str>,
    limit: Option<i64>,
    default_limit: usize,
    unique_key: K,
) -> Result<(Vec<T>, Option<String>), ServiceError>
where
    T: Clone,
    K: Fn(&T) -> &str,
{
    let limit = resolve_limit(limit, default_limit)?;

    let start = match token {
        None => 0,
        Some(token) => {
            let key = decode_token(token)?;
            let pos = items
                .iter()
                .position(|item| unique_key(item) == key)
                .ok_or_else(|| {
                    ServiceError::InvalidToken(format!("token {token} no longer matches an item"))
                })?;
            pos + 1
        }
    };

    let end = usize::min(start + limit, items.len());
    let page: Vec<T> = items[start..end].to_vec();
    let next_token = if end < items.len() {
        Some(encode_token(unique_key(&items[end - 1])))
    } else {
        None
    };
    Ok((page, next_token))
}

fn resolve_limit(limit: Option<i64>, default_limit: usize) -> Result<usize, ServiceError> {
    match limit {
        None => Ok(default_limit),
        Some(l) if l <= 0 => Err(ServiceError::Validation(format!(
            "limit must be a positive integer, got {l}"
        ))),
        Some(l) => Ok(l as usize),
    }
}

pub fn encode_token(key: &str) -> String {
    URL_SAFE_NO_PAD.encode(key.as_bytes())
}

fn decode_token(token: &str) -> Result<String, ServiceError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token.as_bytes())
        .map_err(|_| ServiceError::InvalidToken(format!("token {token} is malformed")))?;
    String::from_utf8(bytes)
        .map_err(|_| ServiceError::InvalidToken(format!("token {token} is malformed")))
}
