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

//! Legacy AWS-style HMAC-SHA1 signer.
//!
//! Some services still verify the simplified `AWS {key}:{signature}` scheme.
//! The signer never reads the request body.
//!
//! ```no_run
//! use cloudsign_aws_legacy::RequestSigner;
//! use cloudsign_core::{Credential, SignRequest, SigningContext};
//!
//! # fn main() -> cloudsign_core::Result<()> {
//! let signer = RequestSigner::new(
//!     Credential::new("access_key", "secret_key"),
//!     SigningContext::new("eu-de", "s3"),
//! );
//!
//! let (mut parts, body) = http::Request::get("https://obs.eu-de.example.com/bucket/object")
//!     .body(())?
//!     .into_parts();
//! signer.sign(&mut parts, &body, false)?;
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::ALGORITHM;

mod sign_request;
pub use sign_request::RequestSigner;
