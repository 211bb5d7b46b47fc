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

use std::sync::Arc;

use bytes::Bytes;
use log::debug;

use crate::{HttpSend, Result, SignRequest};

/// SigningHttpSend signs every request before handing it to the inner transport.
///
/// This is the single place requests get signed on the transport path. The
/// response of the inner transport is returned untouched.
///
/// ## Example
///
/// ```no_run
/// use std::sync::Arc;
/// use cloudsign_core::{Context, HttpSend, SignRequest, SigningHttpSend};
///
/// # fn example(signer: Arc<dyn SignRequest>, transport: impl HttpSend) {
/// let ctx = Context::new().with_http_send(SigningHttpSend::new(signer, transport));
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SigningHttpSend<S> {
    signer: Arc<dyn SignRequest>,
    inner: S,
}

impl<S: HttpSend> SigningHttpSend<S> {
    /// Wrap `inner` so that every request is signed by `signer` first.
    pub fn new(signer: Arc<dyn SignRequest>, inner: S) -> Self {
        Self { signer, inner }
    }
}

#[async_trait::async_trait]
impl<S: HttpSend> HttpSend for SigningHttpSend<S> {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (mut parts, body) = req.into_parts();

        if self.signer.has_valid_authorization(&parts) {
            debug!(
                "request {} {} already signed, forwarding as is",
                parts.method, parts.uri
            );
        } else {
            self.signer.sign_async(&mut parts, &body, false).await?;
        }

        self.inner
            .http_send(http::Request::from_parts(parts, body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use http::request::Parts;
    use http::StatusCode;

    use super::*;
    use crate::{Credential, Error, SigningContext};

    /// Writes `TEST {key}:{body length}` so tests can tell what was hashed.
    #[derive(Debug)]
    struct CountingSigner {
        cred: Credential,
        ctx: SigningContext,
        calls: AtomicUsize,
    }

    impl CountingSigner {
        fn new() -> Self {
            Self {
                cred: Credential::new("ak", "sk"),
                ctx: SigningContext::default(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl SignRequest for CountingSigner {
        fn algorithm(&self) -> &'static str {
            "TEST"
        }

        fn credential(&self) -> &Credential {
            &self.cred
        }

        fn signing_context(&self) -> &SigningContext {
            &self.ctx
        }

        fn payload_required(&self, _: &Parts) -> bool {
            true
        }

        fn apply_signature(&self, parts: &mut Parts, payload: Option<Bytes>) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let payload = payload.ok_or_else(|| Error::request_invalid("missing body"))?;
            parts.headers.insert(
                http::header::AUTHORIZATION,
                format!("TEST {}:{}", self.key(), payload.len()).parse()?,
            );
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct RecordingHttpSend {
        seen: Mutex<Vec<http::request::Parts>>,
    }

    #[async_trait::async_trait]
    impl HttpSend for Arc<RecordingHttpSend> {
        async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            let (parts, body) = req.into_parts();
            self.seen.lock().unwrap().push(parts);
            Ok(http::Response::builder()
                .status(StatusCode::ACCEPTED)
                .body(body)?)
        }
    }

    #[tokio::test]
    async fn test_sign_before_dispatch() -> Result<()> {
        let signer = Arc::new(CountingSigner::new());
        let transport = Arc::new(RecordingHttpSend::default());
        let client = SigningHttpSend::new(signer.clone(), transport.clone());

        let req = http::Request::post("http://example.com/v1/items")
            .body(Bytes::from_static(b"hello"))?;
        let resp = client.http_send(req).await?;

        assert_eq!(resp.status(), StatusCode::ACCEPTED);
        assert_eq!(resp.body().as_ref(), b"hello");
        assert_eq!(signer.calls.load(Ordering::SeqCst), 1);

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].headers["authorization"], "TEST ak:5");
        Ok(())
    }

    #[tokio::test]
    async fn test_already_signed_request_is_forwarded() -> Result<()> {
        let signer = Arc::new(CountingSigner::new());
        let transport = Arc::new(RecordingHttpSend::default());
        let client = SigningHttpSend::new(signer.clone(), transport.clone());

        let req = http::Request::get("http://example.com/")
            .header("Authorization", "TEST ak:42")
            .body(Bytes::new())?;
        client.http_send(req).await?;

        assert_eq!(signer.calls.load(Ordering::SeqCst), 0);
        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].headers["authorization"], "TEST ak:42");
        Ok(())
    }

    #[tokio::test]
    async fn test_foreign_authorization_is_replaced() -> Result<()> {
        let signer = Arc::new(CountingSigner::new());
        let transport = Arc::new(RecordingHttpSend::default());
        let client = SigningHttpSend::new(signer.clone(), transport.clone());

        let req = http::Request::put("http://example.com/")
            .header("Authorization", "Bearer token")
            .body(Bytes::from_static(b"abc"))?;
        client.http_send(req).await?;

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].headers["authorization"], "TEST ak:3");
        Ok(())
    }
}
