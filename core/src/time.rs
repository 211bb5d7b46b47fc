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

//! Time related utils.

use crate::Error;
use chrono::NaiveDateTime;
use chrono::Utc;

/// DateTime is the alias of chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Basic date format: "20220313T072004Z"
const BASIC_DATE: &str = "%Y%m%dT%H%M%SZ";

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into date: `20220301`
pub fn format_date(t: DateTime) -> String {
    t.format("%Y%m%d").to_string()
}

/// Format time into basic ISO 8601: `20220313T072004Z`
pub fn format_basic_date(t: DateTime) -> String {
    t.format(BASIC_DATE).to_string()
}

/// Format time into http date: `Sun, 06 Nov 1994 08:49:37 GMT`
///
/// ## Note
///
/// HTTP dates are always expressed in GMT, never in local time.
///
/// ## Reference
///
/// - [RFC 7231 Section 7.1.1.1](https://www.rfc-editor.org/rfc/rfc7231#section-7.1.1.1)
pub fn format_http_date(t: DateTime) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse basic ISO 8601 date like `20220313T072004Z`, always in UTC.
///
/// Every field must carry its full width: chrono alone accepts `1970011T000001Z`.
pub fn parse_basic_date(s: &str) -> crate::Result<DateTime> {
    let t = NaiveDateTime::parse_from_str(s, BASIC_DATE)
        .map_err(|e| Error::request_invalid(format!("invalid basic date: {s}")).with_source(e))?
        .and_utc();

    if format_basic_date(t) != s {
        return Err(Error::request_invalid(format!("invalid basic date: {s}")));
    }
    Ok(t)
}
