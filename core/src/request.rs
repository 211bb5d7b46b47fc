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

use std::borrow::Cow;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use http::header::HeaderName;
use http::HeaderMap;
use http::Method;

use crate::header::header_value_to_text;
use crate::header::HeaderAccess;
use crate::{Error, Result};

/// Signing context for request.
///
/// SigningRequest is a working copy of the parts a signer reads and writes.
/// Signers mutate the copy freely and call [`SigningRequest::apply`] once
/// every computation succeeded, so a failed signing never leaves the
/// original request half-mutated.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// Host of the request uri, without port.
    pub host: Option<String>,
    /// HTTP path as it will be sent, still percent encoded.
    pub path: String,
    /// Raw query string without the leading `?`.
    pub query: Option<String>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &http::request::Parts) -> Self {
        let path = match parts.uri.path() {
            "" => "/".to_string(),
            v => v.to_string(),
        };

        SigningRequest {
            method: parts.method.clone(),
            host: parts.uri.host().map(|v| v.to_string()),
            path,
            query: parts.uri.query().map(|v| v.to_string()),
            headers: parts.headers.clone(),
        }
    }

    /// Apply the signing context back to http::request::Parts.
    ///
    /// Only headers are written back: signers never rewrite method or uri.
    pub fn apply(self, parts: &mut http::request::Parts) {
        parts.headers = self.headers;
    }

    /// Get the path percent decoded.
    ///
    /// Returns an error if the decoded path is not valid UTF-8.
    pub fn path_percent_decoded(&self) -> Result<Cow<'_, str>> {
        percent_encoding::percent_decode_str(&self.path)
            .decode_utf8()
            .map_err(|e| {
                Error::request_invalid(format!("path is not valid utf-8: {}", self.path))
                    .with_source(e)
            })
    }

    /// Get query parameters form-urlencoded decoded and grouped by key.
    ///
    /// Keys are sorted by their bytes. Values of a repeated key are joined
    /// with `,` in the order they appear.
    pub fn query_to_map(&self) -> BTreeMap<String, String> {
        let mut m: BTreeMap<String, String> = BTreeMap::new();
        let Some(query) = &self.query else {
            return m;
        };

        for (k, v) in form_urlencoded::parse(query.as_bytes()) {
            match m.entry(k.into_owned()) {
                Entry::Occupied(mut entry) => {
                    let existing = entry.get_mut();
                    existing.push(',');
                    existing.push_str(&v);
                }
                Entry::Vacant(entry) => {
                    entry.insert(v.into_owned());
                }
            }
        }

        m
    }

    /// Get header value by name.
    ///
    /// Returns empty string if header not found.
    #[inline]
    pub fn header_get_or_default(&self, key: &str) -> Cow<'_, str> {
        self.headers.header_get(key).unwrap_or(Cow::Borrowed(""))
    }

    /// Get header names as lowercase sorted vector, skipping names in `excluded`.
    ///
    /// [`HeaderName`] is always stored in lowercase, so the names can be used as is.
    pub fn header_name_to_vec_sorted(&self, excluded: &[&str]) -> Vec<&str> {
        let mut h = self
            .headers
            .keys()
            .map(HeaderName::as_str)
            .filter(|k| !excluded.contains(k))
            .collect::<Vec<&str>>();
        h.sort_unstable();

        h
    }

    /// Get all values of header `key`, sorted by their bytes.
    pub fn header_values_sorted(&self, key: &str) -> Vec<Cow<'_, str>> {
        let mut values = self.headers.header_get_all(key);
        values.sort_unstable();
        values
    }

    /// Get `(name, first value)` of headers with given prefix.
    pub fn header_to_vec_with_prefix(&self, prefix: &str) -> Vec<(String, String)> {
        self.headers
            .keys()
            // Filter all header that starts with prefix
            .filter(|k| k.as_str().starts_with(prefix))
            .filter_map(|k| {
                self.headers
                    .get(k)
                    .map(|v| (k.as_str().to_string(), header_value_to_text(v).into_owned()))
            })
            .collect()
    }

    /// Convert sorted headers to string.
    ///
    /// ```shell
    /// [(a, b), (c, d)] => "a:b\nc:d\n"
    /// ```
    pub fn header_to_string(mut headers: Vec<(String, String)>, sep: &str, join: &str) -> String {
        let mut s = String::with_capacity(16);

        // Sort via header name.
        headers.sort();

        for (k, v) in headers {
            s.push_str(&k);
            s.push_str(sep);
            s.push_str(&v);
            s.push_str(join);
        }

        s
    }
}
