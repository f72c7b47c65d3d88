//! Command line front end: one edit (or search) per invocation, text in on
//! stdin or from a file, result out on stdout.

use crate::config::{RcConfig, RcLoader};
use crate::edit::{EditAction, Operator, Transformation};
use crate::error::Result;
use crate::rstring::RString;
use crate::xtring::Xtring;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "xtring", version, about = "Edit around every match of a pattern in one pass")]
pub struct Cli {
    /// Read the text from FILE instead of standard input
    #[arg(short = 'f', long = "file", value_name = "FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Match patterns case-insensitively
    #[arg(short = 'i', long = "ignore-case", global = true)]
    pub ignore_case: bool,

    /// Let ^ and $ match at line boundaries
    #[arg(short = 'm', long = "multi-line", global = true)]
    pub multi_line: bool,

    /// Let . match newlines
    #[arg(short = 's', long = "dot-all", global = true)]
    pub dot_all: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Delete the text at OPERATOR of every match
    Delete {
        #[arg(value_enum)]
        operator: OperatorArg,
        pattern: String,
    },
    /// Insert TEXT at OPERATOR of every match
    Insert {
        text: String,
        #[arg(value_enum)]
        operator: OperatorArg,
        pattern: String,
    },
    /// Put BEFORE and AFTER around the text at OPERATOR of every match
    Wrap {
        before: String,
        after: String,
        #[arg(value_enum)]
        operator: OperatorArg,
        pattern: String,
    },
    /// Replace the text at OPERATOR of every match with TEXT
    Replace {
        text: String,
        #[arg(value_enum)]
        operator: OperatorArg,
        pattern: String,
    },
    /// Change the case of the text at OPERATOR of every match
    Case {
        #[arg(value_enum)]
        style: CaseStyle,
        #[arg(value_enum)]
        operator: OperatorArg,
        pattern: String,
    },
    /// Swap the text of every two consecutive spans at OPERATOR
    Swap {
        #[arg(value_enum)]
        operator: OperatorArg,
        pattern: String,
    },
    /// Keep only the matches of PATTERN
    Extract { pattern: String },
    /// Print the first match (or, with --all, every match) on its own line
    Find {
        #[arg(short, long)]
        all: bool,
        pattern: String,
    },
    /// Print a sample .xtringrc
    SampleRc,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OperatorArg {
    After,
    Before,
    Around,
    Inside,
    OnMatches,
    OnNoMatches,
}

impl From<OperatorArg> for Operator {
    fn from(arg: OperatorArg) -> Self {
        match arg {
            OperatorArg::After => Operator::After,
            OperatorArg::Before => Operator::Before,
            OperatorArg::Around => Operator::Around,
            OperatorArg::Inside => Operator::Inside,
            OperatorArg::OnMatches => Operator::OnMatches,
            OperatorArg::OnNoMatches => Operator::OnNoMatches,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CaseStyle {
    Lower,
    Upper,
    Capitalize,
    Decapitalize,
}

impl From<CaseStyle> for Transformation {
    fn from(style: CaseStyle) -> Self {
        match style {
            CaseStyle::Lower => Transformation::Lowercase,
            CaseStyle::Upper => Transformation::Uppercase,
            CaseStyle::Capitalize => Transformation::Capitalize,
            CaseStyle::Decapitalize => Transformation::Decapitalize,
        }
    }
}

impl Cli {
    /// Command line flags can only switch settings on; the rc file decides
    /// the rest.
    pub fn apply_overrides(&self, mut config: RcConfig) -> RcConfig {
        config.ignore_case |= self.ignore_case;
        config.multi_line |= self.multi_line;
        config.dot_all |= self.dot_all;
        config
    }
}

/// Runs `command` against `input` and returns what should be printed.
pub fn execute(command: &Command, input: &str, config: &RcConfig) -> Result<String> {
    let (action, operator, pattern) = match command {
        Command::Delete { operator, pattern } => (EditAction::Delete, *operator, pattern),
        Command::Insert {
            text,
            operator,
            pattern,
        } => (EditAction::InsertAt(Some(text.clone())), *operator, pattern),
        Command::Wrap {
            before,
            after,
            operator,
            pattern,
        } => (
            EditAction::InsertAround {
                before: Some(before.clone()),
                after: Some(after.clone()),
            },
            *operator,
            pattern,
        ),
        Command::Replace {
            text,
            operator,
            pattern,
        } => (EditAction::Replace(Some(text.clone())), *operator, pattern),
        Command::Case {
            style,
            operator,
            pattern,
        } => (EditAction::Transform((*style).into()), *operator, pattern),
        Command::Swap { operator, pattern } => (EditAction::Swap, *operator, pattern),
        Command::Extract { pattern } => {
            let mut text = RString::with_config(input, config.clone());
            text.extract(pattern)?;
            return Ok(text.into_string());
        }
        Command::Find { all, pattern } => {
            let text = Xtring::with_config(input, config.clone());
            let found = if *all {
                text.find_all(pattern)?
            } else {
                text.find(pattern)?.into_iter().collect()
            };
            log::debug!("found {} match(es) of `{pattern}`", found.len());
            return Ok(found.iter().map(|m| format!("{m}\n")).collect());
        }
        Command::SampleRc => return Ok(RcLoader::generate_sample_rc()),
    };

    let regex = config.compile(pattern)?;
    let mut text = RString::with_config(input, config.clone());
    text.edit(action).at(&regex, operator.into())?;
    Ok(text.into_string())
}
