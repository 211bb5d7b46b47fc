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

//! Sign cloud API requests with `SDK-HMAC-SHA256` or the legacy `AWS` scheme.
//!
//! ```no_run
//! use cloudsign::{Config, Context, OsEnv, SignRequest, Signer};
//!
//! # fn main() -> cloudsign::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let config = Config::new().with_region("eu-de").with_service("ecs").from_env(&ctx);
//! let signer = Signer::from_config(&config)?;
//!
//! let (mut parts, body) = http::Request::get("https://ecs.eu-de.example.com/v1/servers")
//!     .body(())?
//!     .into_parts();
//! signer.sign(&mut parts, &body, false)?;
//! # Ok(())
//! # }
//! ```

pub use cloudsign_core::*;

mod constants;
pub use constants::*;

mod config;
pub use config::Config;

mod signer;
pub use signer::{Signer, SigningAlgorithm};

/// SDK-HMAC-SHA256 signing.
pub mod sdk_hmac {
    pub use cloudsign_sdk_hmac::*;
}

/// Legacy AWS-style HMAC-SHA1 signing.
pub mod aws_legacy {
    pub use cloudsign_aws_legacy::*;
}

#[cfg(feature = "default-context")]
pub use cloudsign_http_send_reqwest::ReqwestHttpSend;
