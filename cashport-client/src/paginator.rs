//! The pagination/merge fetch protocol: run one named query until the
//! server runs out of pages and fold every page into a single data tree.

use anyhow::{Result, bail};
use serde_json::{Map, Value};

use cashport_core::merge::deep_merge;

use crate::queries::{PageStyle, QuerySpec};
use crate::transport::QueryTransport;

/// Extract the single meaningful subtree from a response envelope. Every
/// query wraps its payload in `data` under exactly one key; anything else
/// is a malformed or unexpected response.
pub fn unwrap_envelope(envelope: Value) -> Result<Value> {
    let Value::Object(mut body) = envelope else {
        bail!("response envelope is not an object");
    };
    let Some(Value::Object(data)) = body.remove("data") else {
        bail!("response envelope has no data object");
    };
    if data.len() != 1 {
        let keys: Vec<_> = data.keys().cloned().collect();
        bail!("expected exactly one top-level data key, got {:?}", keys);
    }
    match data.into_iter().next() {
        Some((_, value)) => Ok(value),
        None => bail!("response envelope data object is empty"),
    }
}

/// Fetch every page of `query` and return the merged, pagination-free data
/// tree. Two continuation dialects exist: an explicit `pageInfo` flag with
/// an end cursor, and an inferred one where a page as large as the request
/// `limit` means more may follow. The follow-up request that then returns
/// an empty page is deliberate: skipping it would truncate results
/// whenever the total count is an exact multiple of the limit.
pub async fn fetch_all<T: QueryTransport>(
    transport: &T,
    query: &QuerySpec,
    variables: Map<String, Value>,
) -> Result<Value> {
    let limit = variables.get("limit").and_then(Value::as_u64);
    let mut offset = variables.get("offset").and_then(Value::as_u64).unwrap_or(0);
    let mut cursor: Option<String> = None;
    let mut first_page = true;
    let mut merged: Option<Value> = None;

    loop {
        let mut vars = variables.clone();
        if !first_page {
            match (query.page, &cursor) {
                (PageStyle::Cursor(field), Some(c)) => {
                    vars.insert(field.to_string(), Value::from(c.clone()));
                    println!("Retrieving {} (next page: {c})", query.name);
                }
                (PageStyle::Offset, _) => {
                    vars.insert("offset".to_string(), Value::from(offset));
                    println!("Retrieving {} (next page: {offset})", query.name);
                }
                _ => {}
            }
        } else {
            println!("Retrieving {}", query.name);
        }

        let envelope = transport.send(query, &vars).await?;
        let data = unwrap_envelope(envelope)?;

        // Some queries return a bare list; pagination is not implemented
        // server-side for those.
        if data.is_array() {
            return Ok(data);
        }

        // Continuation is decided from the page just received, before it
        // is folded into the accumulator.
        let has_next = data
            .pointer("/pageInfo/hasNextPage")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let end_cursor = data
            .pointer("/pageInfo/endCursor")
            .and_then(Value::as_str)
            .map(str::to_string);
        let page_rows = results_len(&data);

        merged = Some(match merged {
            None => data,
            Some(acc) => deep_merge(acc, data),
        });
        first_page = false;

        if has_next {
            if let Some(c) = end_cursor {
                cursor = Some(c);
                continue;
            }
        } else if let (Some(limit), Some(rows)) = (limit, page_rows) {
            if rows as u64 == limit {
                offset += limit;
                continue;
            }
        }
        break;
    }

    let mut data = merged.unwrap_or(Value::Null);
    if let Value::Object(map) = &mut data {
        map.remove("pageInfo");
    }
    Ok(data)
}

/// Length of the result list, wherever the endpoint nests it.
fn results_len(data: &Value) -> Option<usize> {
    match data {
        Value::Object(map) => {
            if let Some(Value::Array(rows)) = map.get("results") {
                return Some(rows.len());
            }
            map.values().find_map(results_len)
        }
        _ => None,
    }
}
