// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::{self, BufRead, Write};

use colored::Colorize;

/// Source of interactive answers
pub trait Prompter {
    /// Show a question and return the raw line the user typed
    ///
    /// End of input yields an empty string.
    fn ask(&self, question: &str) -> io::Result<String>;
}

/// Prompter reading answers from standard input
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask(&self, question: &str) -> io::Result<String> {
        println!("{}", question.white().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(input)
    }
}

/// Whether an answer confirms the question
///
/// Only a literal "y" counts; the line terminator is ignored.
pub fn is_confirmation(answer: &str) -> bool {
    answer.trim_end_matches(['\n', '\r']) == "y"
}
