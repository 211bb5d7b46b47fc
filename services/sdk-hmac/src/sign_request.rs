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
use http::header::{HeaderName, AUTHORIZATION, HOST};
use http::request::Parts;
use http::{HeaderValue, Method};
use log::debug;
use percent_encoding::utf8_percent_encode;

use crate::constants::*;
use cloudsign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256, EMPTY_SHA256};
use cloudsign_core::header::{header_value_from_text, HeaderAccess};
use cloudsign_core::time::{format_basic_date, format_date, now, parse_basic_date, DateTime};
use cloudsign_core::{Credential, Error, Result, SignRequest, SigningContext, SigningRequest};

/// RequestSigner that implements the SDK-HMAC-SHA256 signing protocol.
///
/// The protocol follows the shape of AWS SigV4: a canonical request is
/// hashed into a string to sign, which is signed with a key derived from the
/// secret, the date, the region and the service.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credential: Credential,
    context: SigningContext,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer for the given credential and signing context.
    pub fn new(credential: Credential, context: SigningContext) -> Self {
        Self {
            credential,
            context,

            time: None,
        }
    }

    /// Specify the signing time used when the request has no valid `X-Sdk-Date`.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
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

    fn payload_required(&self, parts: &Parts) -> bool {
        !parts.headers.contains_key(X_SDK_CONTENT_SHA256)
            && (parts.method == Method::POST || parts.method == Method::PUT)
    }

    fn apply_signature(&self, parts: &mut Parts, payload: Option<Bytes>) -> Result<()> {
        let mut req = SigningRequest::build(parts);

        let now = canonicalize_date(&mut req, self.time)?;
        canonicalize_host(&mut req)?;

        // build canonical request and string to sign.
        let signed_headers = signed_headers(&req);
        let creq = canonical_request_string(&mut req, &signed_headers, payload)?;
        let encoded_req = hex_sha256(creq.as_bytes());

        let short_date = format_date(now);
        // Scope: "20220313/<region>/<service>/sdk_request"
        let scope = format!(
            "{}/{}/{}/{}",
            short_date,
            self.region(),
            self.service(),
            SDK_REQUEST
        );
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // SDK-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/sdk_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "{ALGORITHM}")?;
            writeln!(f, "{}", format_basic_date(now))?;
            writeln!(f, "{}", &scope)?;
            write!(f, "{}", &encoded_req)?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key =
            generate_signing_key(self.secret(), &short_date, self.region(), self.service());
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        let mut authorization = HeaderValue::from_str(&format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            ALGORITHM,
            self.key(),
            scope,
            signed_headers.join(";"),
            signature
        ))?;
        authorization.set_sensitive(true);
        req.headers.insert(AUTHORIZATION, authorization);

        // Apply to the request.
        req.apply(parts);
        Ok(())
    }
}

/// Take the signing time from `X-Sdk-Date`, or write the current time into it
/// if the header is absent or not a basic date.
fn canonicalize_date(req: &mut SigningRequest, time: Option<DateTime>) -> Result<DateTime> {
    let parsed = req
        .headers
        .header_get(X_SDK_DATE)
        .and_then(|v| parse_basic_date(&v).ok());

    match parsed {
        Some(t) => Ok(t),
        None => {
            let t = time.unwrap_or_else(now);
            req.headers.header_set(X_SDK_DATE, &format_basic_date(t))?;
            Ok(t)
        }
    }
}

fn canonicalize_host(req: &mut SigningRequest) -> Result<()> {
    if req.headers.contains_key(HOST) {
        return Ok(());
    }

    let host = req
        .host
        .as_deref()
        .ok_or_else(|| Error::request_invalid("request without host is invalid for signing"))?;
    req.headers.insert(HOST, HeaderValue::from_str(host)?);
    Ok(())
}

fn signed_headers(req: &SigningRequest) -> Vec<String> {
    req.header_name_to_vec_sorted(UNSIGNED_HEADERS)
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn canonical_request_string(
    req: &mut SigningRequest,
    signed_headers: &[String],
    payload: Option<Bytes>,
) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    // Insert method
    writeln!(f, "{}", req.method)?;
    // Insert encoded path
    writeln!(f, "{}", canonical_uri(req)?)?;
    // Insert query
    writeln!(f, "{}", canonical_query(req))?;
    // Insert signed headers
    writeln!(f, "{}", canonical_headers(req, signed_headers)?)?;
    writeln!(f, "{}", signed_headers.join(";"))?;
    // Insert payload hash
    write!(f, "{}", payload_hash(req, payload)?)?;

    debug!("calculated canonical request: {f}");
    Ok(f)
}

/// Percent decode the path, then encode every segment on its own.
///
/// The result always ends with `/`.
fn canonical_uri(req: &SigningRequest) -> Result<String> {
    let path = req.path_percent_decoded()?;

    let mut uri = path
        .split('/')
        .map(|seg| utf8_percent_encode(seg, &SDK_URI_ENCODE_SET).to_string())
        .collect::<Vec<_>>()
        .join("/");
    if !uri.ends_with('/') {
        uri.push('/');
    }

    Ok(uri)
}

/// Every value is split on `=` and each fragment is emitted as its own
/// `key=fragment` pair, fragments sorted per key.
///
/// Servers verify against exactly this form, so it must not be replaced by
/// the usual one-pair-per-value encoding.
fn canonical_query(req: &SigningRequest) -> String {
    let mut pairs = Vec::new();

    for (key, value) in req.query_to_map() {
        let key = utf8_percent_encode(&key, &SDK_URI_ENCODE_SET).to_string();

        let mut fragments = value.split('=').collect::<Vec<_>>();
        fragments.sort_unstable();
        for fragment in fragments {
            pairs.push(format!(
                "{key}={}",
                utf8_percent_encode(fragment, &SDK_URI_ENCODE_SET)
            ));
        }
    }

    pairs.join("&")
}

/// Build `name:value\n` lines for all signed headers.
///
/// Values of every signed header are written back in sorted order, as the
/// UTF-8 octets of their text.
fn canonical_headers(req: &mut SigningRequest, signed_headers: &[String]) -> Result<String> {
    let mut s = String::with_capacity(128);

    for name in signed_headers {
        let values = req
            .header_values_sorted(name)
            .into_iter()
            .map(|v| v.into_owned())
            .collect::<Vec<_>>();

        let header_name = HeaderName::from_bytes(name.as_bytes())?;
        req.headers.remove(&header_name);
        for value in values {
            writeln!(s, "{}:{}", name, value.trim())?;
            req.headers
                .append(header_name.clone(), header_value_from_text(&value)?);
        }
    }

    Ok(s)
}

fn payload_hash(req: &SigningRequest, payload: Option<Bytes>) -> Result<String> {
    if let Some(v) = req.headers.header_get(X_SDK_CONTENT_SHA256) {
        return Ok(v.into_owned());
    }

    if req.method != Method::POST && req.method != Method::PUT {
        return Ok(EMPTY_SHA256.to_string());
    }

    match payload {
        Some(bs) => Ok(hex_sha256(&bs)),
        None => Err(Error::request_invalid(format!(
            "{} request without body can't be signed, set {} or provide a body",
            req.method, X_SDK_CONTENT_SHA256
        ))),
    }
}

/// Derive the signing key:
///
/// ```text
/// k0 = "SDK" + secret
/// k1 = HMAC(k0, short_date)
/// k2 = HMAC(k1, region)
/// k3 = HMAC(k2, service)
/// signing_key = HMAC(k3, "sdk_request")
/// ```
fn generate_signing_key(secret: &str, short_date: &str, region: &str, service: &str) -> Vec<u8> {
    let secret = format!("SDK{secret}");
    let sign_date = hmac_sha256(secret.as_bytes(), short_date.as_bytes());
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    hmac_sha256(sign_service.as_slice(), SDK_REQUEST.as_bytes())
}
