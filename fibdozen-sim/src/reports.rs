use anyhow::Result;
use colored::Colorize;
use fibdozen_engine::{RunSummary, SimulationConfig, SpinRecord, StopReason};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use crate::aggregate::BatchAggregate;
use crate::runner::RunOutcome;

const CSV_HEADER: &str = "run,seed,spin,balance_pre_spin,cycle,progression_index,multiplier,bet,number,result,winnings,balance_post_spin,profit,profit_pct,wins,losses,win_pct,loss_pct";

#[derive(Serialize)]
struct JsonRun<'a> {
    seed: u64,
    base_seed: u64,
    iteration: u64,
    config: &'a SimulationConfig,
    summary: &'a RunSummary,
    spins: &'a [SpinRecord],
}

#[derive(Serialize)]
struct JsonReport<'a> {
    runs: Vec<JsonRun<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aggregate: Option<&'a BatchAggregate>,
}

fn signed(value: Decimal) -> String {
    if value.is_sign_negative() && !value.is_zero() {
        format!("{value:.2}")
    } else {
        format!("+{value:.2}")
    }
}

fn stop_label(reason: StopReason) -> &'static str {
    match reason {
        StopReason::TargetReached => "Target reached",
        StopReason::Bankrupt => "Bankroll exhausted",
        StopReason::SpinLimit => "Spin limit reached",
    }
}

fn cap_label(cap: Option<Decimal>) -> String {
    cap.map_or_else(|| "none".to_string(), |cap| format!("{cap:.2}"))
}

fn limit_label(limit: Option<u64>) -> String {
    limit.map_or_else(|| "unlimited".to_string(), |limit| limit.to_string())
}

pub fn generate_console_report<W: Write + ?Sized>(
    out: &mut W,
    outcomes: &[RunOutcome],
    aggregate: Option<&BatchAggregate>,
    verbose: bool,
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "🎰 Simulation Results".bright_cyan().bold())?;
    writeln!(out, "{}", "=====================".cyan())?;

    if let Some(first) = outcomes.first() {
        let config = first.run.config();
        writeln!(
            out,
            "Start balance: {:.2} | Unit bet: {:.2} | Max bet: {} | Target profit: {:.2} | Max spins: {}",
            config.start_balance,
            config.unit_bet,
            cap_label(config.bet_cap()),
            config.target_profit,
            limit_label(config.max_spins)
        )?;
    }
    writeln!(out)?;

    for outcome in outcomes {
        let summary = &outcome.summary;
        let status = match summary.stop_reason {
            StopReason::TargetReached => "✅ TARGET".green(),
            StopReason::Bankrupt => "❌ BUST".red(),
            StopReason::SpinLimit => "⏹  LIMIT".yellow(),
        };
        writeln!(out, "{} {}", status, outcome.label().bold())?;
        write_console_summary(out, summary)?;
        writeln!(out, "   Run time: {:?}", outcome.duration)?;
        if verbose {
            write_console_spins(out, outcome.run.records())?;
        }
        writeln!(out)?;
    }

    if let Some(aggregate) = aggregate {
        writeln!(out, "{}", "📈 Batch Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "================".yellow())?;
        writeln!(out, "Runs: {}", aggregate.iterations)?;
        writeln!(
            out,
            "Net result: mean {:.2} (σ {:.2}), best {}, worst {}",
            aggregate.mean_net_result,
            aggregate.std_net_result,
            signed(aggregate.best_net_result),
            signed(aggregate.worst_net_result)
        )?;
        writeln!(
            out,
            "Spins: mean {:.1} (σ {:.1})",
            aggregate.mean_spins, aggregate.std_spins
        )?;
        writeln!(
            out,
            "Target reached: {} | Bust: {} | Spin limit: {}",
            format!("{:.1}%", aggregate.target_reached_pct).green(),
            format!("{:.1}%", aggregate.bankrupt_pct).red(),
            format!("{:.1}%", aggregate.spin_limit_pct).yellow()
        )?;
        writeln!(
            out,
            "Largest bet: {:.2} | Largest progression index: {}",
            aggregate.largest_bet, aggregate.largest_progression_index
        )?;
        writeln!(out)?;
    }

    writeln!(out, "Total time: {total_duration:?}")?;
    Ok(())
}

fn write_console_summary<W: Write + ?Sized>(out: &mut W, summary: &RunSummary) -> Result<()> {
    let net = signed(summary.net_result);
    let net = if summary.net_result >= Decimal::ZERO {
        net.green()
    } else {
        net.red()
    };
    writeln!(
        out,
        "   Result: {net} ({}) | Final balance: {:.2}",
        stop_label(summary.stop_reason),
        summary.final_balance
    )?;
    writeln!(
        out,
        "   Spins: {} | Wins: {} ({:.2}%) | Losses: {} ({:.2}%) | Cycles completed: {}",
        summary.total_spins,
        summary.wins,
        summary.win_pct,
        summary.losses,
        summary.loss_pct,
        summary.cycles_completed
    )?;
    writeln!(
        out,
        "   Largest bet: {:.2} | Largest progression index: {} (odds {:.4}%)",
        summary.largest_bet,
        summary.largest_progression_index,
        summary.streak_odds * 100.0
    )?;
    Ok(())
}

fn write_console_spins<W: Write + ?Sized>(out: &mut W, records: &[SpinRecord]) -> Result<()> {
    writeln!(
        out,
        "   {:>5} {:>12} {:>5} {:>5} {:>8} {:>10} {:>3} {:>5} {:>10} {:>12} {:>10} {:>8} {:>5} {:>5}",
        "spin",
        "pre",
        "cycle",
        "index",
        "fib",
        "bet",
        "num",
        "res",
        "winnings",
        "post",
        "profit",
        "profit%",
        "wins",
        "loss"
    )?;
    for record in records {
        let result = if record.won {
            record.result_label().green()
        } else {
            record.result_label().red()
        };
        writeln!(
            out,
            "   {:>5} {:>12.2} {:>5} {:>5} {:>8} {:>10.2} {:>3} {:>5} {:>10.2} {:>12.2} {:>10} {:>7.2}% {:>5} {:>5}",
            record.spin,
            record.balance_pre_spin,
            record.cycle,
            record.progression_index,
            record.multiplier,
            record.bet,
            record.number,
            result,
            record.winnings,
            record.balance_post_spin,
            signed(record.profit),
            record.profit_pct,
            record.wins,
            record.losses
        )?;
    }
    Ok(())
}

pub fn generate_json_report<W: Write + ?Sized>(
    out: &mut W,
    outcomes: &[RunOutcome],
    aggregate: Option<&BatchAggregate>,
) -> Result<()> {
    let report = JsonReport {
        runs: outcomes
            .iter()
            .map(|outcome| JsonRun {
                seed: outcome.seed,
                base_seed: outcome.base_seed,
                iteration: outcome.iteration,
                config: outcome.run.config(),
                summary: &outcome.summary,
                spins: outcome.run.records(),
            })
            .collect(),
        aggregate,
    };
    let json_output = serde_json::to_string_pretty(&report)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report<W: Write + ?Sized>(
    out: &mut W,
    outcomes: &[RunOutcome],
    aggregate: Option<&BatchAggregate>,
) -> Result<()> {
    writeln!(out, "# Fibonacci Dozens Simulation Results\n")?;

    if let Some(aggregate) = aggregate {
        writeln!(out, "## Batch Summary\n")?;
        writeln!(out, "- **Runs**: {}", aggregate.iterations)?;
        writeln!(
            out,
            "- **Mean net result**: {:.2} (σ {:.2})",
            aggregate.mean_net_result, aggregate.std_net_result
        )?;
        writeln!(
            out,
            "- **Target reached**: {:.1}%",
            aggregate.target_reached_pct
        )?;
        writeln!(out, "- **Bankroll exhausted**: {:.1}%", aggregate.bankrupt_pct)?;
        writeln!(out, "- **Spin limit**: {:.1}%", aggregate.spin_limit_pct)?;
        writeln!(
            out,
            "- **Largest bet**: {:.2}, **largest progression index**: {}\n",
            aggregate.largest_bet, aggregate.largest_progression_index
        )?;
    }

    writeln!(out, "## Runs\n")?;
    writeln!(
        out,
        "| Run | Outcome | Net result | Spins | Win % | Largest bet | Largest index | Odds |"
    )?;
    writeln!(out, "|---|---|---|---|---|---|---|---|")?;
    for outcome in outcomes {
        let summary = &outcome.summary;
        writeln!(
            out,
            "| {} | {} | {} | {} | {:.2}% | {:.2} | {} | {:.4}% |",
            outcome.label(),
            stop_label(summary.stop_reason),
            signed(summary.net_result),
            summary.total_spins,
            summary.win_pct,
            summary.largest_bet,
            summary.largest_progression_index,
            summary.streak_odds * 100.0
        )?;
    }
    Ok(())
}

/// One row per spin across every run.
pub fn generate_csv_report<W: Write + ?Sized>(out: &mut W, outcomes: &[RunOutcome]) -> Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for outcome in outcomes {
        let label = outcome.label();
        for record in outcome.run.records() {
            writeln!(
                out,
                "{label},{},{},{},{},{},{},{},{},{},{},{},{},{:.2},{},{},{:.2},{:.2}",
                outcome.seed,
                record.spin,
                record.balance_pre_spin,
                record.cycle,
                record.progression_index,
                record.multiplier,
                record.bet,
                record.number,
                record.result_label(),
                record.winnings,
                record.balance_post_spin,
                record.profit,
                record.profit_pct,
                record.wins,
                record.losses,
                record.win_pct,
                record.loss_pct
            )?;
        }
    }
    Ok(())
}
