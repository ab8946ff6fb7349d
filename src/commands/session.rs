//! Runs a script of commands against one in-memory ledger.

use crate::args::{Command, SessionArgs, SessionLine};
use crate::commands::{execute, plural, Out};
use crate::store::Ledger;
use crate::{Config, Result};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::Parser;
use serde::Serialize;
use std::io;
use std::io::{BufRead, BufReader};
use tracing::{error, trace};

/// What happened while running a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SessionReport {
    /// Number of commands that ran successfully.
    pub executed: usize,
    /// 1-based line numbers of commands that failed.
    pub failed: Vec<usize>,
}

/// Reads commands from the file in `args`, or stdin, and runs each against `ledger`.
///
/// A failing line is logged and skipped; later lines still run.
pub fn session(
    ledger: &mut Ledger,
    config: &Config,
    args: &SessionArgs,
    today: NaiveDate,
) -> Result<Out<SessionReport>> {
    let reader: Box<dyn BufRead> = match args.file() {
        None => Box::new(BufReader::new(io::stdin())),
        Some(path) => {
            let f = std::fs::File::open(path)
                .with_context(|| format!("Unable to open file {}", path.display()))?;
            Box::new(BufReader::new(f))
        }
    };
    run_script(ledger, config, reader, today)
}

pub(crate) fn run_script(
    ledger: &mut Ledger,
    config: &Config,
    reader: impl BufRead,
    today: NaiveDate,
) -> Result<Out<SessionReport>> {
    let mut report = SessionReport::default();
    for (ix, line) in reader.lines().enumerate() {
        let line_number = ix + 1;
        let line = line.with_context(|| format!("Unable to read line {line_number}"))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        trace!("Line {line_number}: {line}");
        match run_line(ledger, config, line, today) {
            Ok(()) => report.executed += 1,
            Err(e) => {
                error!("Line {line_number}: {e:#}");
                report.failed.push(line_number);
            }
        }
    }

    let mut message = format!("Ran {}", plural(report.executed, "command", "commands"));
    if !report.failed.is_empty() {
        message.push_str(&format!(", {} failed", report.failed.len()));
    }
    Ok(Out::new(message, report))
}

fn run_line(ledger: &mut Ledger, config: &Config, line: &str, today: NaiveDate) -> Result<()> {
    let words = shell_words::split(line).context("Unable to split the line into words")?;
    let parsed = SessionLine::try_parse_from(words)?;
    match parsed.command() {
        Command::Init => bail!("init cannot be used inside a session"),
        Command::Session(_) => bail!("A session cannot be started inside a session"),
        command => execute(ledger, config, command, today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate;
    use crate::model::Kind;
    use crate::test::{amount, date, TestEnv};
    use std::io::Cursor;

    fn run(ledger: &mut Ledger, env: &TestEnv, script: &str) -> SessionReport {
        let out = run_script(ledger, env.config(), Cursor::new(script), date("2025-11-02")).unwrap();
        out.structure().unwrap().clone()
    }

    #[test]
    fn test_mutations_are_visible_to_later_lines() {
        let env = TestEnv::new();
        let mut ledger = Ledger::sample();
        let script = r#"
            # a november expense
            add expenses --date 2025-11-01 --description "Evening snacks" --category Food --amount 1000
            update loans 1 --date 2025-01-01 --description "Home Loan" --category "Real Estate" --amount 3400000
            delete assets 2
            summary
            trend
        "#;
        let report = run(&mut ledger, &env, script);
        assert_eq!(report.executed, 5);
        assert!(report.failed.is_empty());

        let added = ledger.get(Kind::Expenses, 4).unwrap();
        assert_eq!(added.description(), "Evening snacks");
        assert_eq!(aggregate::monthly_expense_trend(&ledger).len(), 2);
        assert_eq!(ledger.get(Kind::Loans, 1).unwrap().amount(), amount(3400000));
        assert!(ledger.get(Kind::Assets, 2).is_none());
    }

    #[test]
    fn test_failures_are_counted_and_skipped() {
        let env = TestEnv::new();
        let mut ledger = Ledger::new();
        let script = "\
            list savings\n\
            export expenses\n\
            init\n\
            session\n\
            add income --date 2025-10-01 --description Salary --category Job --amount 75000\n\
            add income --date 2025-10-01 --description \"unterminated --category Job --amount 1\n";
        let report = run(&mut ledger, &env, script);
        assert_eq!(report.executed, 1);
        assert_eq!(report.failed, vec![1, 2, 3, 4, 6]);
        assert_eq!(ledger.list(Kind::Income).len(), 1);
    }

    #[test]
    fn test_oversized_and_blank_amounts_are_rejected() {
        let env = TestEnv::new();
        let mut ledger = Ledger::new();
        let script = "\
            add expenses --date 2025-10-01 --description a --category x --amount 50000000000000000000000000000\n\
            add expenses --date 2025-10-01 --description b --category x --amount 50000000000000000000000000000\n\
            add expenses --date 2025-10-01 --description c --category x --amount \"\"\n\
            summary\n\
            trend\n";
        let report = run(&mut ledger, &env, script);
        assert_eq!(report.failed, vec![1, 2, 3]);
        assert_eq!(report.executed, 2);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_missing_ids_do_not_fail() {
        let env = TestEnv::new();
        let mut ledger = Ledger::new();
        let script = "delete loans 7\nget assets 3\n\
            update income 9 --date 2025-10-01 --description x --category y --amount 1\n";
        let report = run(&mut ledger, &env, script);
        assert_eq!(report.executed, 3);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_export_inside_session() {
        let env = TestEnv::new();
        let mut ledger = Ledger::new();
        let script = "add assets --date 2025-01-01 --description Car --category Vehicle --amount 800000\n\
            export assets\n";
        let report = run(&mut ledger, &env, script);
        assert_eq!(report.executed, 2);
        let path = env.config().export_dir().join("assets-2025-11-02.csv");
        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(
            written,
            "Date,Description,Category,Amount\n2025-01-01,\"Car\",Vehicle,800000"
        );
    }

    #[test]
    fn test_session_from_file() {
        let env = TestEnv::new();
        let script = env.root().join("script.txt");
        std::fs::write(&script, "add loans --date 2025-02-01 --description Phone --category Gadgets --amount 20000\n").unwrap();
        let mut ledger = Ledger::new();
        let args = SessionArgs::new(Some(script));
        let out = session(&mut ledger, env.config(), &args, date("2025-11-02")).unwrap();
        assert_eq!(out.message(), "Ran 1 command");
        assert_eq!(ledger.list(Kind::Loans).len(), 1);
    }

    #[test]
    fn test_session_missing_file() {
        let env = TestEnv::new();
        let mut ledger = Ledger::new();
        let args = SessionArgs::new(Some(env.root().join("nope.txt")));
        assert!(session(&mut ledger, env.config(), &args, date("2025-11-02")).is_err());
    }
}
