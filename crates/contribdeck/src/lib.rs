// Copyright 2026 Contribdeck Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Contribdeck: a browsable catalog of open-source repositories and
//! good-first-issues. The `db` module retrieves the catalog from SurrealDB
//! (working around the backend's per-response row cap); the `catalog` module
//! reconciles the loaded cards with the active search/filter controls and
//! the per-view pagination strategy.

pub mod catalog;
pub mod db;
