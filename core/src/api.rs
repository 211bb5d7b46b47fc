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

use std::fmt::Debug;

use bytes::Bytes;
use http::header::AUTHORIZATION;
use http::request::Parts;
use log::debug;

use crate::header::HeaderAccess;
use crate::{Credential, ReadBody, Result, SigningContext};

/// SignRequest is the contract shared by every signing strategy.
///
/// A strategy is created once per credential, region and service and is
/// reused for many requests. It keeps no per-request state, so one instance
/// can sign concurrently from many tasks.
///
/// Implementors only provide [`SignRequest::payload_required`] and
/// [`SignRequest::apply_signature`]. The provided [`SignRequest::sign`] and
/// [`SignRequest::sign_async`] differ only in how the body is read, so both
/// produce the same headers for the same request and signing time.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + 'static {
    /// Algorithm tag that prefixes the `Authorization` value written by this strategy.
    fn algorithm(&self) -> &'static str;

    /// Credential used by this strategy.
    fn credential(&self) -> &Credential;

    /// Region and service this strategy signs for.
    fn signing_context(&self) -> &SigningContext;

    /// Check whether signing `parts` needs the request body.
    fn payload_required(&self, parts: &Parts) -> bool;

    /// Compute the signature and write `Authorization` and any auxiliary headers.
    ///
    /// `payload` is the request body when [`SignRequest::payload_required`]
    /// returned true and the request has one, `None` otherwise.
    fn apply_signature(&self, parts: &mut Parts, payload: Option<Bytes>) -> Result<()>;

    /// Access key of this strategy.
    fn key(&self) -> &str {
        self.credential().key()
    }

    /// Secret key of this strategy.
    fn secret(&self) -> &str {
        self.credential().secret()
    }

    /// Region of this strategy, empty if not set.
    fn region(&self) -> &str {
        self.signing_context().region()
    }

    /// Service of this strategy, empty if not set.
    fn service(&self) -> &str {
        self.signing_context().service()
    }

    /// Check whether `parts` already carries an `Authorization` written by this strategy.
    fn has_valid_authorization(&self, parts: &Parts) -> bool {
        parts
            .headers
            .header_get(AUTHORIZATION.as_str())
            .is_some_and(|v| v.starts_with(self.algorithm()))
    }

    /// Sign the request, reading the body in a blocking way.
    ///
    /// Requests already signed by this strategy are left untouched unless
    /// `force_resign` is set.
    fn sign(&self, parts: &mut Parts, body: &dyn ReadBody, force_resign: bool) -> Result<()> {
        if !force_resign && self.has_valid_authorization(parts) {
            debug!("request already signed by {}, skipped", self.algorithm());
            return Ok(());
        }

        let payload = if self.payload_required(parts) {
            body.read_body()?
        } else {
            None
        };

        self.apply_signature(parts, payload)
    }

    /// Sign the request, reading the body without blocking.
    ///
    /// Requests already signed by this strategy are left untouched unless
    /// `force_resign` is set.
    async fn sign_async(
        &self,
        parts: &mut Parts,
        body: &dyn ReadBody,
        force_resign: bool,
    ) -> Result<()> {
        if !force_resign && self.has_valid_authorization(parts) {
            debug!("request already signed by {}, skipped", self.algorithm());
            return Ok(());
        }

        let payload = if self.payload_required(parts) {
            body.read_body_async().await?
        } else {
            None
        };

        self.apply_signature(parts, payload)
    }
}
