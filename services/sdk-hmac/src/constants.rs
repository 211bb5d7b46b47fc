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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// Algorithm tag, also the prefix of the `Authorization` value.
pub const ALGORITHM: &str = "SDK-HMAC-SHA256";
/// Terminator of the credential scope and last input of the key derivation.
pub const SDK_REQUEST: &str = "sdk_request";

// Headers used in sdk signing.
pub const X_SDK_DATE: &str = "x-sdk-date";
pub const X_SDK_CONTENT_SHA256: &str = "x-sdk-content-sha256";

/// Headers never included in the signed header list.
///
/// `authorization` is not in this list: an existing value is signed as is
/// and then replaced, so a forced re-sign covers the stale value.
pub const UNSIGNED_HEADERS: &[&str] = &["content-type"];

/// AsciiSet for canonical path segments and query components.
///
/// - URI encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static SDK_URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
