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

use bytes::Bytes;

use crate::Result;

/// ReadBody is used to read the request body entirely before hashing it.
///
/// Bodies must be fully buffered and readable more than once: a retried
/// request is signed again and its body is hashed again.
///
/// `Ok(None)` means the request has no body at all, which is different from
/// an empty body.
#[async_trait::async_trait]
pub trait ReadBody: Send + Sync {
    /// Read the whole body, blocking the current thread if needed.
    fn read_body(&self) -> Result<Option<Bytes>>;

    /// Read the whole body without blocking.
    ///
    /// Must return the same bytes as [`ReadBody::read_body`].
    async fn read_body_async(&self) -> Result<Option<Bytes>> {
        self.read_body()
    }
}

impl ReadBody for () {
    fn read_body(&self) -> Result<Option<Bytes>> {
        Ok(None)
    }
}

impl ReadBody for Bytes {
    fn read_body(&self) -> Result<Option<Bytes>> {
        Ok(Some(self.clone()))
    }
}

impl ReadBody for Vec<u8> {
    fn read_body(&self) -> Result<Option<Bytes>> {
        Ok(Some(Bytes::copy_from_slice(self)))
    }
}

impl ReadBody for String {
    fn read_body(&self) -> Result<Option<Bytes>> {
        Ok(Some(Bytes::copy_from_slice(self.as_bytes())))
    }
}

impl ReadBody for &'static str {
    fn read_body(&self) -> Result<Option<Bytes>> {
        Ok(Some(Bytes::from_static(self.as_bytes())))
    }
}

#[async_trait::async_trait]
impl<T: ReadBody> ReadBody for Option<T> {
    fn read_body(&self) -> Result<Option<Bytes>> {
        match self {
            Some(body) => body.read_body(),
            None => Ok(None),
        }
    }

    async fn read_body_async(&self) -> Result<Option<Bytes>> {
        match self {
            Some(body) => body.read_body_async().await,
            None => Ok(None),
        }
    }
}
