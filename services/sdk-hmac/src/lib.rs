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

//! SDK-HMAC-SHA256 signer.
//!
//! ```no_run
//! use cloudsign_core::{Credential, SignRequest, SigningContext};
//! use cloudsign_sdk_hmac::RequestSigner;
//!
//! # fn main() -> cloudsign_core::Result<()> {
//! let signer = RequestSigner::new(
//!     Credential::new("access_key", "secret_key"),
//!     SigningContext::new("eu-de", "ecs"),
//! );
//!
//! let (mut parts, body) = http::Request::get("https://ecs.eu-de.example.com/v1/servers")
//!     .body(())?
//!     .into_parts();
//! signer.sign(&mut parts, &body, false)?;
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{ALGORITHM, X_SDK_CONTENT_SHA256, X_SDK_DATE};

mod sign_request;
pub use sign_request::RequestSigner;
