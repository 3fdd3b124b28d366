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

use std::env::current_dir;
use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use kotoba_core::config::CONFIG_FILE_NAME;
use kotoba_core::config::QuizConfig;
use kotoba_core::error::ErrorReport;
use kotoba_core::error::Fallible;
use kotoba_core::error::fail;
use kotoba_core::loader::LoadedQuiz;
use walkdir::DirEntry;
use walkdir::WalkDir;

use crate::db::Database;

const DB_FILE_NAME: &str = "kotoba.db";

/// A directory of quiz files, with its settings and summary database.
pub struct Collection {
    pub directory: PathBuf,
    pub config: QuizConfig,
    pub db: Database,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        if !directory.exists() {
            return fail("directory does not exist.");
        }
        let directory = directory.canonicalize()?;
        let config_path = directory.join(CONFIG_FILE_NAME);
        let config = if config_path.exists() {
            QuizConfig::from_toml(&read_to_string(&config_path)?)?
        } else {
            QuizConfig::default()
        };
        let db = Database::new(&directory.join(DB_FILE_NAME))?;
        Ok(Self {
            directory,
            config,
            db,
        })
    }

    /// Every `.toml` and `.json` file under the collection, except the
    /// settings file and hidden entries, sorted by path.
    pub fn quiz_files(&self) -> Fallible<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walk = WalkDir::new(&self.directory)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));
        for entry in walk {
            let entry = entry.map_err(|e| ErrorReport::new(format!("walk error: {e}")))?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            if path == self.directory.join(CONFIG_FILE_NAME) {
                continue;
            }
            let is_quiz = matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("toml") | Some("json")
            );
            if is_quiz {
                files.push(path.to_path_buf());
            }
        }
        Ok(files)
    }

    pub fn load_quiz(&self, path: &Path) -> Fallible<LoadedQuiz> {
        let text = read_to_string(path)?;
        let source_path = self.relative(path);
        Ok(LoadedQuiz::parse(&source_path, &text)?)
    }

    /// `path` relative to the collection root, for display.
    pub fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.directory)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

/// Dotfiles and dot-directories (`.git`, editor state) are not part of the
/// collection.
fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use std::fs::create_dir_all;
    use std::fs::write;

    use kotoba_core::config::InitialOrder;

    use super::*;
    use crate::helper::create_tmp_collection;

    #[test]
    fn test_missing_directory() {
        let result = Collection::new(Some("./derpherp".to_string()));
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: directory does not exist.");
    }

    #[test]
    fn test_quiz_files_skip_settings_and_other_files() -> Fallible<()> {
        let (_tmp, dir) = create_tmp_collection()?;
        write(dir.join(CONFIG_FILE_NAME), "distractors = 2\n")?;
        write(dir.join("notes.md"), "# notes\n")?;
        create_dir_all(dir.join("n4"))?;
        write(
            dir.join("n4/kanji.toml"),
            "kind = \"kanji\"\ntitle = \"N4 kanji\"\n",
        )?;
        let collection = Collection::new(Some(dir.display().to_string()))?;
        let files: Vec<String> = collection
            .quiz_files()?
            .iter()
            .map(|path| collection.relative(path))
            .collect();
        assert_eq!(files, vec!["n4/kanji.toml", "particles.json", "verbs.toml"]);
        assert_eq!(collection.config.distractors, 2);
        Ok(())
    }

    #[test]
    fn test_quiz_files_skip_hidden_entries() -> Fallible<()> {
        let (_tmp, dir) = create_tmp_collection()?;
        create_dir_all(dir.join(".git"))?;
        write(dir.join(".git/state.json"), "{}")?;
        write(dir.join(".draft.toml"), "kind = \"basic\"\n")?;
        let collection = Collection::new(Some(dir.display().to_string()))?;
        let files: Vec<String> = collection
            .quiz_files()?
            .iter()
            .map(|path| collection.relative(path))
            .collect();
        assert_eq!(files, vec!["particles.json", "verbs.toml"]);
        Ok(())
    }

    #[test]
    fn test_settings_file() -> Fallible<()> {
        let (_tmp, dir) = create_tmp_collection()?;
        write(dir.join(CONFIG_FILE_NAME), "initial-order = \"shuffled\"\n")?;
        let collection = Collection::new(Some(dir.display().to_string()))?;
        assert_eq!(
            collection.config.scheduler.initial_order,
            InitialOrder::Shuffled
        );
        assert_eq!(collection.config.distractors, 3);
        Ok(())
    }

    #[test]
    fn test_load_quiz() -> Fallible<()> {
        let (_tmp, dir) = create_tmp_collection()?;
        let collection = Collection::new(Some(dir.display().to_string()))?;
        let loaded = collection.load_quiz(&collection.directory.join("verbs.toml"))?;
        assert_eq!(loaded.source_path, "verbs.toml");
        assert_eq!(loaded.file.title(), "N5 verbs");
        Ok(())
    }
}
