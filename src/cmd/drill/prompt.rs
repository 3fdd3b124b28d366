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

//! Terminal text for a drill session.

use std::io::Write;

use kotoba_core::error::Fallible;
use kotoba_core::session::Question;
use kotoba_core::summary::FirstPassStats;
use kotoba_core::summary::SessionSnapshot;

/// What the user typed at the answer prompt.
#[derive(Debug, PartialEq)]
pub enum Input {
    Quit,
    Choice(String),
}

/// An option number picks that option; anything else is taken as the
/// answer text itself.
pub fn parse_input(line: &str, options: &[String]) -> Input {
    let line = line.trim();
    if line == "q" || line == ":q" {
        return Input::Quit;
    }
    if let Ok(n) = line.parse::<usize>() {
        if n >= 1 && n <= options.len() {
            return Input::Choice(options[n - 1].clone());
        }
    }
    Input::Choice(line.to_string())
}

pub fn write_question(
    out: &mut impl Write,
    question: &Question,
    snapshot: &SessionSnapshot,
    deck_size: usize,
) -> Fallible<()> {
    writeln!(out)?;
    writeln!(
        out,
        "[{}/{} mastered, {} unseen]",
        snapshot.mastered, deck_size, snapshot.unseen
    )?;
    writeln!(out, "{}", question.prompt)?;
    for (i, option) in question.options.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, option)?;
    }
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

pub fn write_first_pass(out: &mut impl Write, stats: &FirstPassStats) -> Fallible<()> {
    writeln!(out)?;
    writeln!(
        out,
        "First pass complete: {}/{} correct.",
        stats.score, stats.total
    )?;
    write!(out, "Press enter to review the cards you have not mastered (q to quit). ")?;
    out.flush()?;
    Ok(())
}

pub fn write_summary(
    out: &mut impl Write,
    snapshot: &SessionSnapshot,
    deck_size: usize,
    complete: bool,
) -> Fallible<()> {
    writeln!(out)?;
    if complete {
        writeln!(out, "Session Completed: all {deck_size} cards mastered.")?;
    } else {
        writeln!(
            out,
            "Session ended: {}/{} cards mastered.",
            snapshot.mastered, deck_size
        )?;
    }
    writeln!(
        out,
        "Answers: {} correct, {} incorrect.",
        snapshot.score, snapshot.total_incorrect
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use kotoba_core::types::card::CardId;

    use super::*;

    fn options() -> Vec<String> {
        vec!["to eat".to_string(), "to drink".to_string()]
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_input("2\n", &options()), Input::Choice("to drink".to_string()));
    }

    #[test]
    fn test_parse_out_of_range_number_is_text() {
        assert_eq!(parse_input("3", &options()), Input::Choice("3".to_string()));
        assert_eq!(parse_input("0", &options()), Input::Choice("0".to_string()));
    }

    #[test]
    fn test_parse_text_and_quit() {
        assert_eq!(
            parse_input("  to eat ", &options()),
            Input::Choice("to eat".to_string())
        );
        assert_eq!(parse_input("q", &options()), Input::Quit);
    }

    #[test]
    fn test_write_question() -> Fallible<()> {
        let question = Question {
            card: CardId::new(0),
            prompt: "食べる (たべる)".to_string(),
            options: options(),
        };
        let snapshot = SessionSnapshot {
            unseen: 2,
            ..SessionSnapshot::default()
        };
        let mut out: Vec<u8> = Vec::new();
        write_question(&mut out, &question, &snapshot, 3)?;
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "\n[0/3 mastered, 2 unseen]\n食べる (たべる)\n  1. to eat\n  2. to drink\n> "
        );
        Ok(())
    }
}
