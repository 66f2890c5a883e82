//! Terminal prompts for the main route parameters.
//!
//! Every prompt shows the current value; an empty answer keeps it and an
//! unparseable one asks again.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::{Result, bail};

use bt_core::{ArrivalDistribution, Minute, RouteConfig, parse_hhmm};

/// Ask for headway, travel times, horizon, arrival interval bounds and bus
/// capacity, starting from `config`.
pub fn route_config(config: RouteConfig) -> Result<RouteConfig> {
    let stdin = io::stdin();
    route_config_from(&mut stdin.lock(), config)
}

fn route_config_from<R: BufRead>(input: &mut R, mut config: RouteConfig) -> Result<RouteConfig> {
    config.headway_mins = ask(input, "Time interval between buses (min)", config.headway_mins)?;
    config.normal_travel_mins =
        ask(input, "Normal travel time for a route (min)", config.normal_travel_mins)?;
    config.traffic_travel_mins =
        ask(input, "Travel time during traffic hours (min)", config.traffic_travel_mins)?;

    config.horizon = ask_clock(input, "Total simulation time (HH:MM or min)", config.horizon)?;

    // Bounds only make sense for uniform arrivals.
    match config.arrivals {
        ArrivalDistribution::Uniform { min, max } => {
            let min = ask(input, "Minimum passenger arrival interval (min)", min)?;
            let max = ask(input, "Maximum passenger arrival interval (min)", max.max(min))?;
            config.arrivals = ArrivalDistribution::Uniform { min, max };
        }
        ArrivalDistribution::Exponential { mean } => {
            println!("  keeping exponential passenger arrivals (mean {mean} min)");
        }
    }

    config.bus_capacity = ask(input, "Bus capacity", config.bus_capacity)?;
    Ok(config)
}

fn read_answer<R: BufRead>(input: &mut R, label: &str, current: &dyn Display) -> Result<Option<String>> {
    print!("{label} [{current}]: ");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed while asking for {label}");
    }
    let answer = line.trim();
    Ok((!answer.is_empty()).then(|| answer.to_owned()))
}

fn ask<R: BufRead, T: FromStr + Display>(input: &mut R, label: &str, current: T) -> Result<T> {
    loop {
        let Some(answer) = read_answer(input, label, &current)? else {
            return Ok(current);
        };
        match answer.parse() {
            Ok(value) => return Ok(value),
            Err(_) => println!("  not a valid value: {answer:?}"),
        }
    }
}

fn ask_clock<R: BufRead>(input: &mut R, label: &str, current: Minute) -> Result<Minute> {
    loop {
        let Some(answer) = read_answer(input, label, &current.0)? else {
            return Ok(current);
        };
        match parse_hhmm(&answer) {
            Ok(minutes) => return Ok(Minute(u64::from(minutes))),
            Err(e) => println!("  {e}"),
        }
    }
}
