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

use std::fmt::Write;

use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE, DATE};
use http::request::Parts;
use http::HeaderValue;
use log::debug;

use crate::constants::*;
use cloudsign_core::hash::base64_hmac_sha1;
use cloudsign_core::header::HeaderAccess;
use cloudsign_core::time::{format_http_date, now, DateTime};
use cloudsign_core::{Credential, Result, SignRequest, SigningContext, SigningRequest};

/// RequestSigner that implements the legacy `AWS` HMAC-SHA1 signing protocol.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credential: Credential,
    context: SigningContext,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer for the given credential and signing context.
    ///
    /// Region and service are kept for callers but take no part in the signature.
    pub fn new(credential: Credential, context: SigningContext) -> Self {
        Self {
            credential,
            context,

            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    fn get_time(&self) -> DateTime {
        self.time.unwrap_or_else(now)
    }
}

impl SignRequest for RequestSigner {
    fn algorithm(&self) -> &'static str {
        ALGORITHM
    }

    fn credential(&self) -> &Credential {
        &self.credential
    }

    fn signing_context(&self) -> &SigningContext {
        &self.context
    }

    fn payload_required(&self, _: &Parts) -> bool {
        false
    }

    fn apply_signature(&self, parts: &mut Parts, _: Option<Bytes>) -> Result<()> {
        let mut req = SigningRequest::build(parts);
        let date = format_http_date(self.get_time());

        let string_to_sign = string_to_sign(&req, &date)?;
        debug!("calculated string to sign: {string_to_sign}");

        let signature = base64_hmac_sha1(
            ascii_lossy(self.secret()).as_bytes(),
            ascii_lossy(&string_to_sign).as_bytes(),
        );

        req.headers.insert(DATE, HeaderValue::from_str(&date)?);

        let mut authorization =
            HeaderValue::from_str(&format!("{} {}:{}", ALGORITHM, self.key(), signature))?;
        authorization.set_sensitive(true);
        req.headers.insert(AUTHORIZATION, authorization);

        req.apply(parts);
        Ok(())
    }
}

/// Build the message to sign:
///
/// ```text
/// METHOD
/// Content-MD5
/// media type of Content-Type
/// Thu, 01 Jan 1970 00:00:01 GMT
/// x-amz-a:first value
/// /path/as/sent
/// ```
fn string_to_sign(req: &SigningRequest, date: &str) -> Result<String> {
    let mut s = String::with_capacity(128);

    writeln!(s, "{}", req.method)?;
    writeln!(s, "{}", req.header_get_or_default(CONTENT_MD5))?;
    writeln!(s, "{}", media_type(req))?;
    writeln!(s, "{date}")?;
    s.write_str(&SigningRequest::header_to_string(
        req.header_to_vec_with_prefix(X_AMZ_PREFIX),
        ":",
        "\n",
    ))?;
    s.write_str(&req.path)?;

    Ok(s)
}

/// Content type without parameters, empty if absent.
fn media_type(req: &SigningRequest) -> String {
    req.headers
        .header_get(CONTENT_TYPE.as_str())
        .map(|v| match v.split_once(';') {
            Some((media, _)) => media.trim().to_string(),
            None => v.trim().to_string(),
        })
        .unwrap_or_default()
}

/// Take `s` as ASCII, replacing every other character with `?`.
fn ascii_lossy(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn build(req: http::request::Builder) -> SigningRequest {
        let parts = req.body(()).unwrap().into_parts().0;
        SigningRequest::build(&parts)
    }

    #[test]
    fn test_string_to_sign() {
        let req = build(
            http::Request::put("http://example.com/bucket/a%20b?acl")
                .header("Content-MD5", "1B2M2Y8AsgTpgAmY7PhCfg==")
                .header("Content-Type", "text/plain; charset=utf-8")
                .header("X-Amz-Meta-B", "2")
                .header("x-amz-acl", "private")
                .header("X-Other", "ignored"),
        );

        assert_eq!(
            string_to_sign(&req, "Thu, 01 Jan 1970 00:00:01 GMT").unwrap(),
            "PUT\n1B2M2Y8AsgTpgAmY7PhCfg==\ntext/plain\nThu, 01 Jan 1970 00:00:01 GMT\nx-amz-acl:private\nx-amz-meta-b:2\n/bucket/a%20b"
        );
    }

    #[test]
    fn test_string_to_sign_uses_first_amz_value() {
        let req = build(
            http::Request::get("http://example.com/")
                .header("x-amz-meta-multi", "b")
                .header("x-amz-meta-multi", "a"),
        );

        assert_eq!(
            string_to_sign(&req, "Thu, 01 Jan 1970 00:00:01 GMT").unwrap(),
            "GET\n\n\nThu, 01 Jan 1970 00:00:01 GMT\nx-amz-meta-multi:b\n/"
        );
    }

    #[test]
    fn test_media_type() {
        let cases = vec![
            (None, ""),
            (Some("application/json"), "application/json"),
            (Some("text/plain; charset=utf-8"), "text/plain"),
            (Some(" text/html ;q=1"), "text/html"),
        ];

        for (input, expected) in cases {
            let mut builder = http::Request::get("http://example.com/");
            if let Some(v) = input {
                builder = builder.header("Content-Type", v);
            }
            assert_eq!(media_type(&build(builder)), expected, "Failed on input: {input:?}");
        }
    }

    #[test]
    fn test_ascii_lossy() {
        assert_eq!(ascii_lossy("plain"), "plain");
        assert_eq!(ascii_lossy("café"), "caf?");
        assert_eq!(ascii_lossy("größe"), "gr??e");
        assert_eq!(ascii_lossy("🦀"), "?");
    }
}
