//! One input line → one [`Command`].
//!
//! Fields are separated by `;`.  The first field names the command; a line
//! whose first field is a number is a route given hop by hop:
//!
//! ```text
//! addRoad;Kraków;Tarnów;80;1998
//! 3;Kraków;80;1998;Tarnów;70;2004;Rzeszów
//! ```

use std::str::FromStr;

use thiserror::Error;

use nr_core::name::SEPARATOR;
use nr_routes::Hop;

/// Why a line could not be turned into a command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("{command} takes {expected} fields, got {got}")]
    FieldCount {
        command:  &'static str,
        expected: usize,
        got:      usize,
    },

    #[error("{0:?} is not a number")]
    Number(String),

    #[error("route description with {0} fields")]
    Description(usize),
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    AddRoad { city1: &'a str, city2: &'a str, length: u32, year: i32 },
    RepairRoad { city1: &'a str, city2: &'a str, year: i32 },
    GetRouteDescription { route: u32 },
    NewRoute { route: u32, city1: &'a str, city2: &'a str },
    ExtendRoute { route: u32, city: &'a str },
    RemoveRoad { city1: &'a str, city2: &'a str },
    RemoveRoute { route: u32 },
    DescribedRoute { route: u32, start: &'a str, hops: Vec<Hop<'a>> },
}

impl<'a> Command<'a> {
    /// Parse one line without its terminator.
    ///
    /// `Ok(None)` for lines that carry no command: empty lines and `#`
    /// comments.
    pub fn parse(line: &'a str) -> Result<Option<Self>, SyntaxError> {
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let f: Vec<&'a str> = line.split(SEPARATOR).collect();

        let command = match f[0] {
            "addRoad" => {
                arity(&f, "addRoad", 5)?;
                Command::AddRoad {
                    city1:  f[1],
                    city2:  f[2],
                    length: number(f[3])?,
                    year:   number(f[4])?,
                }
            }
            "repairRoad" => {
                arity(&f, "repairRoad", 4)?;
                Command::RepairRoad { city1: f[1], city2: f[2], year: number(f[3])? }
            }
            "getRouteDescription" => {
                arity(&f, "getRouteDescription", 2)?;
                Command::GetRouteDescription { route: number(f[1])? }
            }
            "newRoute" => {
                arity(&f, "newRoute", 4)?;
                Command::NewRoute { route: number(f[1])?, city1: f[2], city2: f[3] }
            }
            "extendRoute" => {
                arity(&f, "extendRoute", 3)?;
                Command::ExtendRoute { route: number(f[1])?, city: f[2] }
            }
            "removeRoad" => {
                arity(&f, "removeRoad", 3)?;
                Command::RemoveRoad { city1: f[1], city2: f[2] }
            }
            "removeRoute" => {
                arity(&f, "removeRoute", 2)?;
                Command::RemoveRoute { route: number(f[1])? }
            }
            _ => described_route(&f)?,
        };
        Ok(Some(command))
    }
}

/// `id;city;length;year;city;...;city`: two leading fields, then whole hops.
fn described_route<'a>(f: &[&'a str]) -> Result<Command<'a>, SyntaxError> {
    if f.len() < 5 || (f.len() - 2) % 3 != 0 {
        return Err(SyntaxError::Description(f.len()));
    }
    let route = number(f[0])?;
    let hops = f[2..]
        .chunks_exact(3)
        .map(|hop| {
            Ok(Hop {
                length: number(hop[0])?,
                year:   number(hop[1])?,
                city:   hop[2],
            })
        })
        .collect::<Result<Vec<_>, SyntaxError>>()?;
    Ok(Command::DescribedRoute { route, start: f[1], hops })
}

fn arity(f: &[&str], command: &'static str, expected: usize) -> Result<(), SyntaxError> {
    if f.len() == expected {
        Ok(())
    } else {
        Err(SyntaxError::FieldCount { command, expected, got: f.len() })
    }
}

/// Plain decimal; an explicit `+` sign is not accepted.
fn number<T: FromStr>(field: &str) -> Result<T, SyntaxError> {
    if field.starts_with('+') {
        return Err(SyntaxError::Number(field.to_owned()));
    }
    field.parse().map_err(|_| SyntaxError::Number(field.to_owned()))
}
