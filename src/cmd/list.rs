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

use std::io::Write;
use std::io::stdout;

use kotoba_core::error::Fallible;

use crate::collection::Collection;

pub fn list_quizzes(directory: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    write_list(&collection, &mut stdout().lock())
}

/// One line per quiz: path, kind, card count, title. Files that fail to
/// load are skipped with a warning; `check` reports them in full.
pub fn write_list(collection: &Collection, out: &mut impl Write) -> Fallible<()> {
    for path in collection.quiz_files()? {
        match collection.load_quiz(&path) {
            Ok(quiz) => writeln!(
                out,
                "{}\t{}\t{}\t{}",
                quiz.source_path,
                quiz.file.kind_name(),
                quiz.file.len(),
                quiz.file.title()
            )?,
            Err(e) => log::warn!("Skipping {}: {e}", collection.relative(&path)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use super::*;
    use crate::helper::create_tmp_collection;

    #[test]
    fn test_list() -> Fallible<()> {
        let (_tmp, dir) = create_tmp_collection()?;
        write(dir.join("broken.toml"), "title = 1\n")?;
        let collection = Collection::new(Some(dir.display().to_string()))?;
        let mut out: Vec<u8> = Vec::new();
        write_list(&collection, &mut out)?;
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "particles.json\tgrammar\t1\tN5 particles\nverbs.toml\tvocabulary\t3\tN5 verbs\n"
        );
        Ok(())
    }
}
