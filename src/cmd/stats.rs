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

use std::fmt::Display;
use std::fmt::Formatter;
use std::io::Write;
use std::io::stdout;

use clap::ValueEnum;
use kotoba_core::error::Fallible;
use kotoba_core::store::SummaryStore;
use kotoba_core::summary::StoredSummary;

use crate::collection::Collection;

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub enum StatsFormat {
    /// One tab-separated line per quiz.
    Plain,
    /// A JSON array of stored summaries.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Plain => write!(f, "plain"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_stats(directory: Option<String>, format: StatsFormat) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    write_stats(&collection.db, format, &mut stdout().lock())
}

pub fn write_stats(
    store: &impl SummaryStore,
    format: StatsFormat,
    out: &mut impl Write,
) -> Fallible<()> {
    let mut summaries: Vec<StoredSummary> = Vec::new();
    for key in store.keys()? {
        if let Some(summary) = store.get(&key)? {
            summaries.push(summary);
        }
    }
    summaries.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
    match format {
        StatsFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&summaries)?)?;
        }
        StatsFormat::Plain => {
            if summaries.is_empty() {
                writeln!(out, "No sessions recorded.")?;
            }
            for summary in summaries.iter() {
                writeln!(out, "{}", plain_line(summary))?;
            }
        }
    }
    Ok(())
}

fn plain_line(summary: &StoredSummary) -> String {
    let snapshot = &summary.snapshot;
    let first_pass = match summary.first_pass {
        Some(stats) => format!("{}/{}", stats.score, stats.total),
        None => "-".to_string(),
    };
    let accuracy = match snapshot.accuracy() {
        Some(accuracy) => format!("{:.0}%", accuracy * 100.0),
        None => "-".to_string(),
    };
    let status = if summary.complete {
        "complete"
    } else {
        "in progress"
    };
    format!(
        "{}\t{}\tmastered {}/{}\tfirst pass {}\taccuracy {}\t{}\t{}",
        summary.quiz.short(),
        summary.title,
        snapshot.mastered,
        summary.deck_size,
        first_pass,
        accuracy,
        status,
        summary.recorded_at
    )
}
