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

//! Core components for signing cloud API requests.
//!
//! This crate provides the foundational types and traits for the cloudsign ecosystem.
//!
//! ## Overview
//!
//! - **Strategy**: [`SignRequest`] is the contract every signing protocol implements.
//!   It exposes the credential and signing context, an idempotence predicate and the
//!   blocking and non-blocking `sign` operations.
//! - **Interceptor**: [`SigningHttpSend`] wraps a transport and signs each request
//!   right before dispatch.
//! - **Context**: A container that holds implementations for HTTP sending and environment access.
//!
//! ## Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use cloudsign_core::{Credential, Result, SignRequest, SigningContext};
//! use http::request::Parts;
//!
//! #[derive(Debug)]
//! struct MySigner {
//!     cred: Credential,
//!     ctx: SigningContext,
//! }
//!
//! impl SignRequest for MySigner {
//!     fn algorithm(&self) -> &'static str {
//!         "MY-ALGO"
//!     }
//!
//!     fn credential(&self) -> &Credential {
//!         &self.cred
//!     }
//!
//!     fn signing_context(&self) -> &SigningContext {
//!         &self.ctx
//!     }
//!
//!     fn payload_required(&self, _: &Parts) -> bool {
//!         false
//!     }
//!
//!     fn apply_signature(&self, parts: &mut Parts, _: Option<Bytes>) -> Result<()> {
//!         parts.headers.insert(
//!             http::header::AUTHORIZATION,
//!             format!("MY-ALGO {}", self.key()).parse()?,
//!         );
//!         Ok(())
//!     }
//! }
//!
//! # fn example() -> Result<()> {
//! let signer = MySigner {
//!     cred: Credential::new("my-access-key", "my-secret-key"),
//!     ctx: SigningContext::new("eu-de", "ecs"),
//! };
//!
//! let (mut parts, body) = http::Request::get("https://example.com")
//!     .body(())?
//!     .into_parts();
//! signer.sign(&mut parts, &body, false)?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod header;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};

mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};

mod credential;
pub use credential::{Credential, SigningContext};

mod body;
pub use body::ReadBody;

mod api;
pub use api::SignRequest;
mod request;
pub use request::SigningRequest;

mod interceptor;
pub use interceptor::SigningHttpSend;
