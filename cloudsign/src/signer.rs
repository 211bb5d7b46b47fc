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

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use bytes::Bytes;
use http::request::Parts;
use log::debug;

use crate::Config;
use cloudsign_core::{Credential, Error, Result, SignRequest, SigningContext};

/// Service that is signed with the legacy scheme when no algorithm is configured.
const LEGACY_SERVICE: &str = "obs";
/// Service name the legacy scheme signs `obs` requests with.
const LEGACY_SIGNING_SERVICE: &str = "s3";

/// SigningAlgorithm names a supported signing protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningAlgorithm {
    /// `SDK-HMAC-SHA256`
    SdkHmacSha256,
    /// `AWS` HMAC-SHA1
    AwsHmacSha1,
}

impl SigningAlgorithm {
    /// Tag of this algorithm as written in the `Authorization` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningAlgorithm::SdkHmacSha256 => cloudsign_sdk_hmac::ALGORITHM,
            SigningAlgorithm::AwsHmacSha1 => cloudsign_aws_legacy::ALGORITHM,
        }
    }
}

impl FromStr for SigningAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(cloudsign_sdk_hmac::ALGORITHM) {
            Ok(SigningAlgorithm::SdkHmacSha256)
        } else if s.eq_ignore_ascii_case(cloudsign_aws_legacy::ALGORITHM) {
            Ok(SigningAlgorithm::AwsHmacSha1)
        } else {
            Err(Error::config_invalid(format!(
                "unknown signing algorithm: {s}"
            )))
        }
    }
}

impl Display for SigningAlgorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signer is the signing strategy selected by configuration.
#[derive(Debug, Clone)]
pub enum Signer {
    /// `SDK-HMAC-SHA256` signer.
    SdkHmac(cloudsign_sdk_hmac::RequestSigner),
    /// Legacy `AWS` signer.
    AwsLegacy(cloudsign_aws_legacy::RequestSigner),
}

impl Signer {
    /// Build the signer described by `config`.
    ///
    /// Without an explicit algorithm, service `obs` is signed with the
    /// legacy scheme under service `s3` and every other service with
    /// `SDK-HMAC-SHA256`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let key = config
            .access_key
            .as_deref()
            .ok_or_else(|| Error::config_invalid("access key is required"))?;
        let secret = config
            .secret_key
            .as_deref()
            .ok_or_else(|| Error::config_invalid("secret key is required"))?;
        if key.is_empty() || secret.is_empty() {
            return Err(Error::credential_invalid(
                "access key and secret key must not be empty",
            ));
        }

        let region = config.region.as_deref().unwrap_or_default();
        let service = config.service.as_deref().unwrap_or_default();
        let (algorithm, service) = match config.algorithm.as_deref() {
            Some(v) => (v.parse::<SigningAlgorithm>()?, service),
            None if service == LEGACY_SERVICE => {
                (SigningAlgorithm::AwsHmacSha1, LEGACY_SIGNING_SERVICE)
            }
            None => (SigningAlgorithm::SdkHmacSha256, service),
        };
        debug!("selected {algorithm} signer for region {region:?} and service {service:?}");

        let credential = Credential::new(key, secret);
        let context = SigningContext::new(region, service);
        Ok(Signer::new(algorithm, credential, context))
    }

    /// Create a signer of `algorithm`.
    pub fn new(
        algorithm: SigningAlgorithm,
        credential: Credential,
        context: SigningContext,
    ) -> Self {
        match algorithm {
            SigningAlgorithm::SdkHmacSha256 => Signer::SdkHmac(
                cloudsign_sdk_hmac::RequestSigner::new(credential, context),
            ),
            SigningAlgorithm::AwsHmacSha1 => Signer::AwsLegacy(
                cloudsign_aws_legacy::RequestSigner::new(credential, context),
            ),
        }
    }

    /// Algorithm of this signer.
    pub fn signing_algorithm(&self) -> SigningAlgorithm {
        match self {
            Signer::SdkHmac(_) => SigningAlgorithm::SdkHmacSha256,
            Signer::AwsLegacy(_) => SigningAlgorithm::AwsHmacSha1,
        }
    }

    fn inner(&self) -> &dyn SignRequest {
        match self {
            Signer::SdkHmac(s) => s,
            Signer::AwsLegacy(s) => s,
        }
    }
}

impl From<cloudsign_sdk_hmac::RequestSigner> for Signer {
    fn from(s: cloudsign_sdk_hmac::RequestSigner) -> Self {
        Signer::SdkHmac(s)
    }
}

impl From<cloudsign_aws_legacy::RequestSigner> for Signer {
    fn from(s: cloudsign_aws_legacy::RequestSigner) -> Self {
        Signer::AwsLegacy(s)
    }
}

impl SignRequest for Signer {
    fn algorithm(&self) -> &'static str {
        self.inner().algorithm()
    }

    fn credential(&self) -> &Credential {
        self.inner().credential()
    }

    fn signing_context(&self) -> &SigningContext {
        self.inner().signing_context()
    }

    fn payload_required(&self, parts: &Parts) -> bool {
        self.inner().payload_required(parts)
    }

    fn apply_signature(&self, parts: &mut Parts, payload: Option<Bytes>) -> Result<()> {
        self.inner().apply_signature(parts, payload)
    }
}
