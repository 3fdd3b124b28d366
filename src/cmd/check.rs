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
use kotoba_core::error::fail;

use crate::collection::Collection;

pub fn check_collection(directory: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    write_check(&collection, &mut stdout().lock())
}

/// Parse every quiz file and report load errors and data warnings. Fails if
/// any file could not be loaded.
pub fn write_check(collection: &Collection, out: &mut impl Write) -> Fallible<()> {
    let mut failed = 0;
    let mut checked = 0;
    for path in collection.quiz_files()? {
        checked += 1;
        match collection.load_quiz(&path) {
            Ok(quiz) => {
                for warning in quiz.file.validate() {
                    writeln!(out, "warning: {}: {warning}", quiz.source_path)?;
                }
            }
            Err(e) => {
                failed += 1;
                writeln!(out, "{e}")?;
            }
        }
    }
    if failed > 0 {
        return fail(format!("{failed} of {checked} quiz files failed to load."));
    }
    writeln!(out, "Checked {checked} quiz files.")?;
    Ok(())
}
