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

// Env values used by `Config::from_env`.
pub const CLOUDSIGN_ACCESS_KEY: &str = "CLOUDSIGN_ACCESS_KEY";
pub const CLOUDSIGN_SECRET_KEY: &str = "CLOUDSIGN_SECRET_KEY";
pub const CLOUDSIGN_REGION: &str = "CLOUDSIGN_REGION";
pub const CLOUDSIGN_SERVICE: &str = "CLOUDSIGN_SERVICE";
pub const CLOUDSIGN_ALGORITHM: &str = "CLOUDSIGN_ALGORITHM";
