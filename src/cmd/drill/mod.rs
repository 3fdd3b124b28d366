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

mod prompt;

use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use kotoba_core::config::InitialOrder;
use kotoba_core::config::QuizConfig;
use kotoba_core::error::Fallible;
use kotoba_core::error::fail;
use kotoba_core::scheduler::Phase;
use kotoba_core::session::Drill;
use kotoba_core::store::SummaryStore;
use kotoba_core::summary::SessionSnapshot;
use kotoba_core::summary::StoredSummary;
use kotoba_core::types::quiz_key::QuizKey;
use kotoba_core::types::timestamp::Timestamp;

use crate::cmd::drill::prompt::Input;
use crate::cmd::drill::prompt::parse_input;
use crate::cmd::drill::prompt::write_first_pass;
use crate::cmd::drill::prompt::write_question;
use crate::cmd::drill::prompt::write_summary;
use crate::collection::Collection;

pub struct DrillConfig {
    /// Path to the quiz file.
    pub path: String,
    /// Collection directory. Defaults to the quiz file's directory.
    pub collection: Option<String>,
    pub shuffle: bool,
    pub append_misses: bool,
    pub distractors: Option<usize>,
    pub seed: Option<u64>,
}

pub fn drill(config: DrillConfig) -> Fallible<()> {
    let mut input = stdin().lock();
    let mut output = stdout().lock();
    run_drill(config, &mut input, &mut output)?;
    Ok(())
}

/// Run a session reading answers from `input` until every card is mastered,
/// the user quits, or input runs out. The summary is saved after each
/// answer.
pub fn run_drill(
    config: DrillConfig,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Fallible<SessionSnapshot> {
    let path = PathBuf::from(&config.path);
    if !path.is_file() {
        return fail(format!("quiz file does not exist: {}", config.path));
    }
    let path = path.canonicalize()?;
    let directory = match &config.collection {
        Some(dir) => Some(dir.clone()),
        None => path.parent().map(|p| p.display().to_string()),
    };
    let mut collection = Collection::new(directory)?;
    let quiz = collection.load_quiz(&path)?;
    for warning in quiz.file.validate() {
        log::warn!("{}: {warning}", quiz.source_path);
    }

    let quiz_config = merge_flags(collection.config, &config);
    let seed = config.seed.unwrap_or_else(clock_seed);
    log::debug!("Drilling {} with seed {seed}", quiz.source_path);

    let key = quiz.key;
    let title = quiz.file.title().to_string();
    let mut drill = quiz.file.into_drill(quiz_config, seed);
    if drill.deck_size() == 0 {
        writeln!(out, "No cards in this quiz.")?;
        return Ok(drill.snapshot());
    }

    let mut line = String::new();
    loop {
        if drill.phase() == Phase::FirstPassGate {
            if let Some(stats) = drill.first_pass() {
                write_first_pass(out, &stats)?;
            }
            line.clear();
            if input.read_line(&mut line)? == 0 || line.trim() == "q" {
                break;
            }
            drill.acknowledge_first_pass();
        }

        let Some(question) = drill.question() else {
            break;
        };
        write_question(out, &question, &drill.snapshot(), drill.deck_size())?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let choice = match parse_input(&line, &question.options) {
            Input::Quit => break,
            Input::Choice(choice) => choice,
        };
        let expected = drill.correct_answer();
        match drill.choose(&choice) {
            Ok(outcome) if outcome.correct => {
                writeln!(out, "Correct!")?;
                if outcome.newly_mastered {
                    writeln!(out, "Mastered.")?;
                }
            }
            Ok(_) => {
                writeln!(
                    out,
                    "Wrong. The answer is: {}",
                    expected.unwrap_or_default()
                )?;
            }
            Err(e) => {
                log::warn!("Ignoring answer: {e}");
                continue;
            }
        }
        save_summary(&mut collection.db, key, &title, drill.as_ref())?;
    }

    let snapshot = drill.snapshot();
    write_summary(out, &snapshot, drill.deck_size(), drill.is_complete())?;
    Ok(snapshot)
}

/// Command-line flags override the collection settings.
fn merge_flags(base: QuizConfig, flags: &DrillConfig) -> QuizConfig {
    let mut config = base;
    if flags.shuffle {
        config.scheduler.initial_order = InitialOrder::Shuffled;
    }
    if flags.append_misses {
        config.scheduler.reshuffle_on_miss = false;
    }
    if let Some(distractors) = flags.distractors {
        config.distractors = distractors;
    }
    config
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn save_summary(
    store: &mut impl SummaryStore,
    key: QuizKey,
    title: &str,
    drill: &dyn Drill,
) -> Fallible<()> {
    let summary = StoredSummary {
        quiz: key,
        title: title.to_string(),
        deck_size: drill.deck_size(),
        snapshot: drill.snapshot(),
        first_pass: drill.first_pass(),
        complete: drill.is_complete(),
        recorded_at: Timestamp::now(),
    };
    store.put(&key.to_hex(), &summary)
}

#[cfg(test)]
mod tests {
    use std::fs::write;
    use std::io::Cursor;

    use kotoba_core::summary::FirstPassStats;

    use super::*;
    use crate::helper::VERBS;
    use crate::helper::create_tmp_collection;

    fn config(path: String) -> DrillConfig {
        DrillConfig {
            path,
            collection: None,
            shuffle: false,
            append_misses: false,
            distractors: None,
            seed: Some(7),
        }
    }

    fn run(config: DrillConfig, input: &str) -> Fallible<(SessionSnapshot, String)> {
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut out: Vec<u8> = Vec::new();
        let snapshot = run_drill(config, &mut input, &mut out)?;
        Ok((snapshot, String::from_utf8(out).unwrap()))
    }

    #[test]
    fn test_missing_quiz_file() -> Fallible<()> {
        let (_tmp, dir) = create_tmp_collection()?;
        let result = run(config(dir.join("nope.toml").display().to_string()), "");
        let err = result.err().unwrap();
        assert!(err.to_string().contains("quiz file does not exist"));
        Ok(())
    }

    #[test]
    fn test_single_card_to_completion() -> Fallible<()> {
        let (_tmp, dir) = create_tmp_collection()?;
        let path = dir.join("one.toml");
        write(
            &path,
            "kind = \"basic\"\ntitle = \"One\"\n[[cards]]\nquestion = \"Q\"\nanswer = \"A\"\n",
        )?;
        // Answer by text, acknowledge the first pass, answer by number.
        let (snapshot, text) = run(config(path.display().to_string()), "A\n\n1\n")?;
        assert_eq!(snapshot.score, 2);
        assert_eq!(snapshot.mastered, 1);
        assert!(text.contains("First pass complete: 1/1 correct."));
        assert!(text.contains("Mastered."));
        assert!(text.contains("Session Completed: all 1 cards mastered."));

        let collection = Collection::new(Some(dir.display().to_string()))?;
        let stored = collection.db.keys()?;
        assert_eq!(stored.len(), 1);
        let summary = collection.db.get(&stored[0])?.unwrap();
        assert_eq!(summary.title, "One");
        assert!(summary.complete);
        assert_eq!(summary.first_pass, Some(FirstPassStats { score: 1, total: 1 }));
        Ok(())
    }

    #[test]
    fn test_wrong_answer_reveals_correct_one() -> Fallible<()> {
        let (_tmp, dir) = create_tmp_collection()?;
        let path = dir.join("verbs.toml");
        let (snapshot, text) = run(config(path.display().to_string()), "nope\nq\n")?;
        assert!(text.contains("食べる (たべる)"));
        assert!(text.contains("Wrong. The answer is: to eat"));
        assert!(text.contains("Session ended: 0/3 cards mastered."));
        assert_eq!(snapshot.total_incorrect, 1);

        let collection = Collection::new(Some(dir.display().to_string()))?;
        let summary = collection
            .db
            .get(&QuizKey::of_text(VERBS).to_hex())?
            .unwrap();
        assert_eq!(summary.snapshot.total_incorrect, 1);
        assert!(!summary.complete);
        Ok(())
    }

    #[test]
    fn test_end_of_input_ends_session() -> Fallible<()> {
        let (_tmp, dir) = create_tmp_collection()?;
        let path = dir.join("verbs.toml");
        let (snapshot, _) = run(config(path.display().to_string()), "to eat\n")?;
        assert_eq!(snapshot.score, 1);
        assert_eq!(snapshot.unseen, 1);
        Ok(())
    }

    #[test]
    fn test_quit_at_first_pass_gate() -> Fallible<()> {
        let (_tmp, dir) = create_tmp_collection()?;
        let path = dir.join("particles.json");
        let (snapshot, text) = run(config(path.display().to_string()), "へ\nq\n")?;
        assert!(text.contains("First pass complete: 1/1 correct."));
        assert!(text.contains("Session ended"));
        assert_eq!(snapshot.total, 1);
        Ok(())
    }

    #[test]
    fn test_empty_quiz() -> Fallible<()> {
        let (_tmp, dir) = create_tmp_collection()?;
        let path = dir.join("empty.toml");
        write(&path, "kind = \"kanji\"\ntitle = \"Nothing yet\"\n")?;
        let (snapshot, text) = run(config(path.display().to_string()), "")?;
        assert_eq!(text, "No cards in this quiz.\n");
        assert_eq!(snapshot, SessionSnapshot::default());
        Ok(())
    }

    #[test]
    fn test_merge_flags() {
        let mut flags = config(String::new());
        assert_eq!(merge_flags(QuizConfig::default(), &flags), QuizConfig::default());
        flags.shuffle = true;
        flags.append_misses = true;
        flags.distractors = Some(1);
        let merged = merge_flags(QuizConfig::default(), &flags);
        assert_eq!(merged.scheduler.initial_order, InitialOrder::Shuffled);
        assert!(!merged.scheduler.reshuffle_on_miss);
        assert_eq!(merged.distractors, 1);
    }
}
