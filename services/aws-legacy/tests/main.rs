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

use anyhow::Result;
use bytes::Bytes;
use chrono::{TimeZone, Utc};
use http::request::Parts;
use http::{HeaderValue, Request};
use pretty_assertions::assert_eq;

use cloudsign_aws_legacy::RequestSigner;
use cloudsign_core::{Credential, Error, ReadBody, SignRequest, SigningContext};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn signer() -> RequestSigner {
    RequestSigner::new(Credential::new("ak", "sk"), SigningContext::new("", "s3"))
        .with_time(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 1).unwrap())
}

fn authorization(parts: &Parts) -> &str {
    parts.headers["authorization"]
        .to_str()
        .expect("authorization must be visible ascii")
}

/// A body that must never be read.
struct UnreadableBody;

impl ReadBody for UnreadableBody {
    fn read_body(&self) -> cloudsign_core::Result<Option<Bytes>> {
        Err(Error::unexpected("body must not be read"))
    }
}

#[test]
fn test_sign_simple_get() -> Result<()> {
    init_logger();

    let mut parts = Request::get("http://example.com").body(())?.into_parts().0;
    signer().sign(&mut parts, &(), false)?;

    assert_eq!(authorization(&parts), "AWS ak:KupNwGe7E1GPKa0bUWJIogCW83A=");
    assert_eq!(parts.headers["date"], "Thu, 01 Jan 1970 00:00:01 GMT");
    Ok(())
}

#[test]
fn test_sign_with_amz_headers() -> Result<()> {
    init_logger();

    let mut parts = Request::put("http://example.com/bucket/a%20b?acl")
        .header("Content-MD5", "1B2M2Y8AsgTpgAmY7PhCfg==")
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("X-Amz-Meta-B", "2")
        .header("x-amz-acl", "private")
        .header("Date", "Mon, 01 Jan 2001 00:00:00 GMT")
        .body(())?
        .into_parts()
        .0;

    signer().sign(&mut parts, &UnreadableBody, false)?;

    assert_eq!(authorization(&parts), "AWS ak:fadAI1zPPbJ9aoEzq6VI9aHAH78=");
    assert_eq!(parts.headers.get_all("date").iter().count(), 1);
    assert_eq!(parts.headers["date"], "Thu, 01 Jan 1970 00:00:01 GMT");
    Ok(())
}

#[test]
fn test_sign_replaces_non_ascii_with_question_mark() -> Result<()> {
    let mut parts = Request::get("http://example.com/bucket/caf%C3%A9")
        .header("x-amz-meta-name", HeaderValue::from_bytes("café".as_bytes())?)
        .body(())?
        .into_parts()
        .0;

    signer()
        .with_time(Utc.with_ymd_and_hms(2022, 3, 13, 7, 20, 4).unwrap())
        .sign(&mut parts, &(), false)?;
    assert_eq!(authorization(&parts), "AWS ak:21USN/MHfZpNukjID1tqjhZQBAE=");
    assert_eq!(parts.headers["date"], "Sun, 13 Mar 2022 07:20:04 GMT");

    let mut parts = Request::get("http://example.com").body(())?.into_parts().0;
    RequestSigner::new(Credential::new("ak", "sé"), SigningContext::default())
        .with_time(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 1).unwrap())
        .sign(&mut parts, &(), false)?;
    assert_eq!(authorization(&parts), "AWS ak:Bt3GHcW7FbR7ggd4G5fEBLok9Hc=");
    Ok(())
}

#[test]
fn test_sign_is_idempotent() -> Result<()> {
    let mut parts = Request::get("http://example.com")
        .header("Authorization", "AWS ak:c2lnbmF0dXJl")
        .body(())?
        .into_parts()
        .0;
    let before = parts.headers.clone();

    signer().sign(&mut parts, &(), false)?;
    assert_eq!(parts.headers, before);

    signer().sign(&mut parts, &(), true)?;
    assert_eq!(authorization(&parts), "AWS ak:KupNwGe7E1GPKa0bUWJIogCW83A=");
    assert_eq!(parts.headers.get_all("authorization").iter().count(), 1);
    Ok(())
}

#[test]
fn test_sign_prefix_match_covers_aws4() -> Result<()> {
    let mut parts = Request::get("http://example.com")
        .header("Authorization", "AWS4-HMAC-SHA256 Credential=ak/20220313/eu-de/s3")
        .body(())?
        .into_parts()
        .0;

    assert!(signer().has_valid_authorization(&parts));
    signer().sign(&mut parts, &(), false)?;
    assert!(parts.headers.get("date").is_none());
    Ok(())
}

#[test]
fn test_sign_replaces_sdk_authorization() -> Result<()> {
    let mut parts = Request::get("http://example.com")
        .header("Authorization", "SDK-HMAC-SHA256 Credential=ak/19700101///sdk_request")
        .body(())?
        .into_parts()
        .0;

    assert!(!signer().has_valid_authorization(&parts));
    signer().sign(&mut parts, &(), false)?;
    assert_eq!(authorization(&parts), "AWS ak:KupNwGe7E1GPKa0bUWJIogCW83A=");
    Ok(())
}

#[tokio::test]
async fn test_sign_async_never_reads_body() -> Result<()> {
    init_logger();

    let build = || -> Result<Parts> {
        Ok(Request::post("http://example.com/bucket/object")
            .header("Content-Type", "application/octet-stream")
            .header("x-amz-meta-a", "1")
            .body(())?
            .into_parts()
            .0)
    };

    let mut blocking = build()?;
    signer().sign(&mut blocking, &UnreadableBody, false)?;
    let mut suspending = build()?;
    signer()
        .sign_async(&mut suspending, &UnreadableBody, false)
        .await?;

    assert_eq!(blocking.headers, suspending.headers);
    assert!(authorization(&blocking).starts_with("AWS ak:"));
    Ok(())
}
