//! Build a max tree from the command line and print range maxima.
//!
//! ```text
//! tourney 5 3 8 1 --set 1=9 --query 0:3 --query 2:3
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tourney_rs::{Sizing, TourneyTree};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Initial array contents, one leaf per value.
    #[arg(required = true, allow_negative_numbers = true)]
    values: Vec<i64>,

    /// Point update `IDX=VAL`, applied in order before any query.
    #[arg(short, long = "set", value_parser = parse_assignment)]
    sets: Vec<(usize, i64)>,

    /// Inclusive range `L:R` to query.
    ///
    /// If unset, prints the maximum of the whole array.
    #[arg(short, long = "query", value_parser = parse_range)]
    queries: Vec<(usize, usize)>,

    /// Slot allocation policy: `exact`, `reference` (5n) or `factor=<k>`.
    #[arg(long, default_value = "exact", value_parser = parse_sizing)]
    sizing: Sizing,
}

fn parse_range(s: &str) -> std::result::Result<(usize, usize), String> {
    let (l, r) = s
        .split_once(':')
        .ok_or_else(|| format!("expected L:R, got `{s}`"))?;
    let l = l.trim().parse().map_err(|e| format!("bad left bound `{l}`: {e}"))?;
    let r = r.trim().parse().map_err(|e| format!("bad right bound `{r}`: {e}"))?;
    Ok((l, r))
}

fn parse_assignment(s: &str) -> std::result::Result<(usize, i64), String> {
    let (idx, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected IDX=VAL, got `{s}`"))?;
    let idx = idx.trim().parse().map_err(|e| format!("bad index `{idx}`: {e}"))?;
    let value = value.trim().parse().map_err(|e| format!("bad value `{value}`: {e}"))?;
    Ok((idx, value))
}

fn parse_sizing(s: &str) -> std::result::Result<Sizing, String> {
    match s {
        "exact" => Ok(Sizing::Exact),
        "reference" => Ok(Sizing::REFERENCE),
        _ => match s.strip_prefix("factor=") {
            Some(k) => k
                .parse()
                .map(Sizing::Factor)
                .map_err(|e| format!("bad factor `{k}`: {e}")),
            None => Err(format!("unknown sizing `{s}`")),
        },
    }
}

/// Results in print order.
fn run(args: &Args) -> Result<Vec<i64>> {
    // Same discipline as a fresh zeroed store filled by point updates.
    let mut tree: TourneyTree = TourneyTree::build_sequential(&args.values, args.sizing)
        .with_context(|| format!("--sizing {:?}", args.sizing))?;

    for &(idx, value) in &args.sets {
        tree.set(idx, value)
            .with_context(|| format!("--set {idx}={value}"))?;
    }

    if args.queries.is_empty() {
        return Ok(tree.all().into_iter().collect());
    }

    args.queries
        .iter()
        .map(|&(l, r)| tree.query(l, r).with_context(|| format!("--query {l}:{r}")))
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();
    for value in run(&args)? {
        println!("{value}");
    }
    Ok(())
}
