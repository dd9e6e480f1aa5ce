//! Line loop: read, parse, apply, report.

use std::io::{BufRead, Write};

use log::debug;

use nr_graph::Router;
use nr_routes::RoadMap;

use crate::command::Command;
use crate::error::{LineError, TextResult};

/// Counters for one run.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct RunSummary {
    /// Physical lines read, comments and blank lines included.
    pub lines:    u64,
    /// Lines that carried a command, failed ones included.
    pub commands: u64,
    pub failures: u64,
}

/// Apply every command of `input` to `map`.
///
/// Route descriptions go to `out`, one per line.  A line that is malformed
/// or whose operation fails writes `ERROR <n>` to `err`, `n` being its
/// 1-based line number, and leaves the map unchanged.
///
/// # Errors
///
/// Only I/O failures of the three streams end the run early.
pub fn run_commands<Rt, R, W, E>(
    map:       &mut RoadMap<Rt>,
    mut input: R,
    out:       &mut W,
    err:       &mut E,
) -> TextResult<RunSummary>
where
    Rt: Router,
    R:  BufRead,
    W:  Write,
    E:  Write,
{
    let mut summary = RunSummary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        summary.lines += 1;
        let line_no = summary.lines;
        let bytes = buf.strip_suffix(b"\n").unwrap_or(&buf);

        let outcome = std::str::from_utf8(bytes)
            .map_err(|_| LineError::NotUtf8)
            .and_then(|line| apply_line(map, line));

        match outcome {
            Ok(None) => {}
            Ok(Some(printed)) => {
                summary.commands += 1;
                if let Some(text) = printed {
                    writeln!(out, "{text}")?;
                }
            }
            Err(e) => {
                summary.commands += 1;
                summary.failures += 1;
                debug!("line {line_no}: {e}");
                writeln!(err, "ERROR {line_no}")?;
            }
        }
    }

    out.flush()?;
    err.flush()?;
    Ok(summary)
}

/// `None` if the line carried no command; otherwise the text to print, if
/// the command prints anything.
fn apply_line<Rt: Router>(map: &mut RoadMap<Rt>, line: &str) -> Result<Option<Option<String>>, LineError> {
    let Some(command) = Command::parse(line)? else {
        return Ok(None);
    };
    Ok(Some(apply(map, command)?))
}

/// Apply one command; returns what it prints.
pub fn apply<Rt: Router>(map: &mut RoadMap<Rt>, command: Command<'_>) -> Result<Option<String>, LineError> {
    match command {
        Command::AddRoad { city1, city2, length, year } => map.add_road(city1, city2, length, year)?,
        Command::RepairRoad { city1, city2, year } => map.repair_road(city1, city2, year)?,
        Command::GetRouteDescription { route } => return Ok(Some(map.route_description(route))),
        Command::NewRoute { route, city1, city2 } => map.new_route(route, city1, city2)?,
        Command::ExtendRoute { route, city } => map.extend_route(route, city)?,
        Command::RemoveRoad { city1, city2 } => map.remove_road(city1, city2)?,
        Command::RemoveRoute { route } => map.remove_route(route)?,
        Command::DescribedRoute { route, start, hops } => {
            map.add_route_from_description(route, start, &hops)?
        }
    }
    Ok(None)
}
