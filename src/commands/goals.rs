// Copyright (c) 2025 Cha-Ching Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{open_tracker, required, required_id};
use crate::models::GoalDraft;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("contribute", sub)) => contribute(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let draft = GoalDraft {
        name: required(sub, "name")?.clone(),
        target: parse_decimal(required(sub, "target")?)?,
        current: sub
            .get_one::<String>("current")
            .map(|c| parse_decimal(c))
            .transpose()?,
        deadline: sub
            .get_one::<String>("deadline")
            .map(|d| parse_date(d))
            .transpose()?,
        notes: sub.get_one::<String>("notes").cloned(),
    };
    let (mut tracker, _) = open_tracker(conn)?;
    let goal = tracker.add_goal(draft)?;
    println!("Your financial goal \"{}\" has been created (#{})", goal.name, goal.id);
    Ok(())
}

fn contribute(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_id(sub)?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    let (mut tracker, currency) = open_tracker(conn)?;
    let goal = tracker.contribute(id, amount)?;
    println!(
        "{} has been added to your goal: {} of {} ({}% complete)",
        currency.format(amount)?,
        currency.format(goal.current)?,
        currency.format(goal.target)?,
        goal.percent_complete()
    );
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_id(sub)?;
    let (mut tracker, _) = open_tracker(conn)?;
    tracker.delete_goal(id)?;
    println!("Removed goal #{}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (tracker, currency) = open_tracker(conn)?;
    let goals = tracker.goals()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &goals)? {
        return Ok(());
    }
    let data = goals
        .iter()
        .map(|g| {
            Ok(vec![
                g.id.to_string(),
                g.name.clone(),
                currency.format(g.current)?,
                currency.format(g.target)?,
                format!("{}%", g.percent_complete()),
                g.deadline.map(|d| d.to_string()).unwrap_or_default(),
                g.notes.clone().unwrap_or_default(),
            ])
        })
        .collect::<crate::Result<Vec<_>>>()?;
    println!(
        "{}",
        pretty_table(
            &["ID", "Goal", "Saved", "Target", "Progress", "Target date", "Notes"],
            data
        )
    );
    Ok(())
}
