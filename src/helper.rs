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

use std::fs::write;
use std::path::PathBuf;

use kotoba_core::error::Fallible;
use tempfile::TempDir;
use tempfile::tempdir;

pub const VERBS: &str = r#"kind = "vocabulary"
title = "N5 verbs"

[[cards]]
word = "食べる"
reading = "たべる"
meaning = "to eat"

[[cards]]
word = "飲む"
reading = "のむ"
meaning = "to drink"

[[cards]]
word = "見る"
reading = "みる"
meaning = "to see"
"#;

pub const PARTICLES: &str = r#"{
  "kind": "grammar",
  "title": "N5 particles",
  "cards": [
    {"sentence": "学校＿＿行きます。", "options": ["へ", "を", "が", "の"], "answer": "へ"}
  ]
}
"#;

/// A temporary collection with `verbs.toml` and `particles.json`. The
/// directory is removed when the returned guard is dropped.
pub fn create_tmp_collection() -> Fallible<(TempDir, PathBuf)> {
    let tmp = tempdir()?;
    let dir: PathBuf = tmp.path().canonicalize()?;
    write(dir.join("verbs.toml"), VERBS)?;
    write(dir.join("particles.json"), PARTICLES)?;
    Ok((tmp, dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmp_collection_is_removed_on_drop() -> Fallible<()> {
        let (tmp, dir) = create_tmp_collection()?;
        assert!(dir.join("verbs.toml").is_file());
        drop(tmp);
        assert!(!dir.exists());
        Ok(())
    }
}
