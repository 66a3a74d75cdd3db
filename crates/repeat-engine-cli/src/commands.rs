//! One function per subcommand. Each returns both renderings of its result;
//! `main` picks one.

use repeat_engine::{
    complete, next_date, parse_rule, schedule_date, CalendarDate, Completion, EvaluationError,
};
use serde_json::{json, Value};

use crate::cli::{CheckArgs, CompleteArgs, NextArgs, ScheduleArgs};
use crate::config::Config;

#[derive(Debug)]
pub struct Output {
    pub text: String,
    pub json: Value,
}

/// `--now` if given, otherwise today in the configured timezone.
fn reference_date(now: Option<&str>, config: &Config) -> anyhow::Result<CalendarDate> {
    let reference = match now {
        Some(text) => {
            CalendarDate::parse_compact(text).map_err(EvaluationError::InvalidReferenceDate)?
        }
        None => config.today()?,
    };
    tracing::debug!(%reference, timezone = %config.timezone, "reference date resolved");
    Ok(reference)
}

pub fn next(args: &NextArgs, config: &Config) -> anyhow::Result<Output> {
    let reference = reference_date(args.now.as_deref(), config)?;
    let next = next_date(reference, &args.date, &args.repeat)?;
    tracing::info!(%reference, anchor = %args.date, rule = %args.repeat, %next, "next date computed");

    let date = CalendarDate::parse_compact(&next)?;
    Ok(Output {
        text: config.date_format.format(date),
        json: json!({
            "date": next,
            "reference": reference,
            "rule": args.repeat,
        }),
    })
}

pub fn schedule(args: &ScheduleArgs, config: &Config) -> anyhow::Result<Output> {
    let reference = reference_date(args.now.as_deref(), config)?;
    let date = schedule_date(reference, args.date.as_deref(), args.repeat.as_deref())?;
    tracing::info!(%reference, requested = ?args.date, %date, "task date scheduled");

    Ok(Output {
        text: config.date_format.format(date),
        json: json!({ "date": date }),
    })
}

pub fn complete_task(args: &CompleteArgs, config: &Config) -> anyhow::Result<Output> {
    let reference = reference_date(args.now.as_deref(), config)?;
    let completion = complete(reference, &args.date, args.repeat.as_deref())?;
    tracing::info!(%reference, date = %args.date, ?completion, "task completed");

    let text = match completion {
        Completion::Remove => "remove".to_string(),
        Completion::Reschedule(date) => config.date_format.format(date),
    };
    Ok(Output {
        text,
        json: serde_json::to_value(completion)?,
    })
}

pub fn check(args: &CheckArgs) -> anyhow::Result<Output> {
    let rule = parse_rule(&args.rule)?;
    let canonical = rule.to_string();
    tracing::debug!(input = %args.rule, %canonical, "rule parsed");

    Ok(Output {
        json: json!({ "rule": canonical, "parsed": rule }),
        text: canonical,
    })
}
