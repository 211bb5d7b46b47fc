// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Header access helpers.
//!
//! [`HeaderMap`] is already an ordered, case-insensitive multi-map. The
//! helpers here add the `get`/`set` semantics signers rely on: `get` returns
//! the first value as text and `set` replaces every existing value with a
//! single one.

use std::borrow::Cow;

use http::header::HeaderName;
use http::HeaderMap;
use http::HeaderValue;

use crate::Result;

/// Read header octets as text.
///
/// Octets that form valid UTF-8 are taken as UTF-8, anything else is taken
/// as ISO-8859-1 with one character per octet.
pub fn header_value_to_text(value: &HeaderValue) -> Cow<'_, str> {
    let bs = value.as_bytes();
    match std::str::from_utf8(bs) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => Cow::Owned(bs.iter().map(|b| char::from(*b)).collect()),
    }
}

/// Build a header value carrying the UTF-8 octets of `text`, one octet per
/// ISO-8859-1 character on the wire.
pub fn header_value_from_text(text: &str) -> Result<HeaderValue> {
    Ok(HeaderValue::from_bytes(text.as_bytes())?)
}

/// HeaderAccess is the get/set view signers use over a header multi-map.
pub trait HeaderAccess {
    /// Get the first value of header `name`.
    ///
    /// Returns `None` if the header is absent or `name` is not a valid header name.
    fn header_get(&self, name: &str) -> Option<Cow<'_, str>>;

    /// Get all values of header `name` in insertion order.
    fn header_get_all(&self, name: &str) -> Vec<Cow<'_, str>>;

    /// Replace all values of header `name` with `value`.
    fn header_set(&mut self, name: &str, value: &str) -> Result<()>;
}

impl HeaderAccess for HeaderMap {
    fn header_get(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(header_value_to_text)
    }

    fn header_get_all(&self, name: &str) -> Vec<Cow<'_, str>> {
        self.get_all(name)
            .iter()
            .map(header_value_to_text)
            .collect()
    }

    fn header_set(&mut self, name: &str, value: &str) -> Result<()> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        // `insert` drops every previous value of this name.
        self.insert(name, header_value_from_text(value)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_get_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.header_set("X-Sdk-Date", "19700101T000001Z").unwrap();

        assert_eq!(
            headers.header_get("x-sdk-date").as_deref(),
            Some("19700101T000001Z")
        );
        assert_eq!(
            headers.header_get("X-SDK-DATE").as_deref(),
            Some("19700101T000001Z")
        );
        assert_eq!(headers.header_get("x-sdk-missing"), None);
        assert_eq!(headers.header_get("not a header"), None);
    }

    #[test]
    fn test_header_get_returns_first_value() {
        let mut headers = HeaderMap::new();
        headers.append("x-multi", HeaderValue::from_static("b"));
        headers.append("x-multi", HeaderValue::from_static("a"));

        assert_eq!(headers.header_get("X-Multi").as_deref(), Some("b"));
        assert_eq!(headers.header_get_all("x-multi"), vec!["b", "a"]);
    }

    #[test]
    fn test_header_set_replaces_all_values() {
        let mut headers = HeaderMap::new();
        headers.append("x-multi", HeaderValue::from_static("a"));
        headers.append("x-multi", HeaderValue::from_static("b"));

        headers.header_set("X-Multi", "c").unwrap();

        assert_eq!(headers.header_get_all("x-multi"), vec!["c"]);
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_header_set_rejects_invalid_name() {
        let mut headers = HeaderMap::new();
        assert!(headers.header_set("bad name", "v").is_err());
        assert!(headers.is_empty());
    }

    #[test]
    fn test_header_text_round_trips_utf8_octets() {
        let value = header_value_from_text("größe").unwrap();
        assert_eq!(value.as_bytes(), "größe".as_bytes());
        assert_eq!(header_value_to_text(&value), "größe");
    }

    #[test]
    fn test_header_text_reads_latin1_octets() {
        let value = HeaderValue::from_bytes(b"caf\xe9").unwrap();
        assert_eq!(header_value_to_text(&value), "café");
    }
}
