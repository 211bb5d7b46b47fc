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

use std::fmt::{Debug, Formatter};

use crate::utils::Redact;

/// Credential is the access key pair used to sign requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    key: String,
    secret: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Access key of this credential.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Secret key of this credential.
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("key", &Redact::from(&self.key))
            .field("secret", &Redact::from(&self.secret))
            .finish()
    }
}

/// SigningContext binds a signature to a region and a service.
///
/// Both default to the empty string, and empty values still take part in
/// the credential scope.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SigningContext {
    region: String,
    service: String,
}

impl SigningContext {
    /// Create a new signing context.
    pub fn new(region: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            service: service.into(),
        }
    }

    /// Region of this context.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Service of this context.
    pub fn service(&self) -> &str {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_debug_is_redacted() {
        let cred = Credential::new("AKIDEXAMPLE1234", "wJalrXUtnFEMI/K7MDENG");
        let s = format!("{cred:?}");
        assert!(!s.contains("wJalrXUtnFEMI/K7MDENG"));
        assert!(s.contains("AKI***234"));
    }

    #[test]
    fn test_signing_context_defaults_to_empty() {
        let ctx = SigningContext::default();
        assert_eq!(ctx.region(), "");
        assert_eq!(ctx.service(), "");
    }
}
