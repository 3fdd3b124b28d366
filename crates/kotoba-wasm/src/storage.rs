// Copyright 2025 Fernando Borretti
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

//! Session summaries in the browser's localStorage.

use kotoba_core::error::ErrorReport;
use kotoba_core::error::Fallible;
use kotoba_core::store::SummaryStore;
use kotoba_core::summary::StoredSummary;
use wasm_bindgen::prelude::*;
use web_sys::Storage as WebStorage;

const PREFIX: &str = "kotoba_summary_";

/// Without localStorage (private browsing, no window) reads find nothing and
/// writes are dropped.
pub struct Storage {
    inner: Option<WebStorage>,
}

impl Storage {
    pub fn new() -> Self {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        Self { inner }
    }
}

fn js_error(value: JsValue) -> ErrorReport {
    ErrorReport::new(format!("localStorage error: {value:?}"))
}

impl SummaryStore for Storage {
    fn get(&self, key: &str) -> Fallible<Option<StoredSummary>> {
        let Some(storage) = &self.inner else {
            return Ok(None);
        };
        match storage.get_item(&format!("{PREFIX}{key}")).map_err(js_error)? {
            Some(doc) => Ok(Some(serde_json::from_str(&doc)?)),
            None => Ok(None),
        }
    }

    fn put(&mut self, key: &str, summary: &StoredSummary) -> Fallible<()> {
        let Some(storage) = &self.inner else {
            return Ok(());
        };
        let doc = serde_json::to_string(summary)?;
        storage
            .set_item(&format!("{PREFIX}{key}"), &doc)
            .map_err(js_error)
    }

    fn keys(&self) -> Fallible<Vec<String>> {
        let Some(storage) = &self.inner else {
            return Ok(Vec::new());
        };
        let len = storage.length().map_err(js_error)?;
        let mut keys = Vec::new();
        for i in 0..len {
            if let Some(name) = storage.key(i).map_err(js_error)? {
                if let Some(key) = name.strip_prefix(PREFIX) {
                    keys.push(key.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}
