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

use clap::Parser;
use kotoba_core::error::Fallible;

use crate::cmd::check::check_collection;
use crate::cmd::drill::DrillConfig;
use crate::cmd::drill::drill;
use crate::cmd::list::list_quizzes;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Drill a quiz in the terminal until every card is mastered.
    Drill {
        /// Path to the quiz file.
        file: String,
        /// Collection directory holding settings and the summary database. By default, the quiz file's directory is used.
        #[arg(long)]
        collection: Option<String>,
        /// Present never-seen cards in random order instead of file order.
        #[arg(long)]
        shuffle: bool,
        /// Queue missed cards at the back of the learning queue without reshuffling it.
        #[arg(long)]
        append_misses: bool,
        /// Number of wrong options shown next to the right one.
        #[arg(long)]
        distractors: Option<usize>,
        /// Seed for the random number generator. By default, the clock is used.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Check that every quiz file in a collection loads.
    Check {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// List the quizzes in a collection.
    List {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Print recorded session summaries.
    Stats {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Plain)]
        format: StatsFormat,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            file,
            collection,
            shuffle,
            append_misses,
            distractors,
            seed,
        } => drill(DrillConfig {
            path: file,
            collection,
            shuffle,
            append_misses,
            distractors,
            seed,
        }),
        Command::Check { directory } => check_collection(directory),
        Command::List { directory } => list_quizzes(directory),
        Command::Stats { directory, format } => print_stats(directory, format),
    }
}
