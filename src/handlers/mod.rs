// src/handlers/mod.rs
// DOCUMENTATION: Command-line handlers
// PURPOSE: Parse arguments into commands and route them to the client

pub mod favorites;
pub mod search;

use crate::errors::PlacesError;
use crate::models::{PlaceCategory, SearchQuery};
use geo_types::Point;

pub const USAGE: &str = "\
Usage: find-places <command>

Commands:
  search <lat> <lng> [category] [radius] [--pages N]   Nearby places as cards
  details <place_id>                                   Full record for one place
  favorites                                            Liked places
  like <place_id>                                      Toggle a favorite
  categories                                           Supported categories
  geojson <lat> <lng> [category] [radius]              First page as GeoJSON";

/// One invocation of the binary
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search { query: SearchQuery, extra_pages: usize },
    Details { id: String },
    Favorites,
    Like { id: String },
    Categories,
    GeoJson { query: SearchQuery },
}

impl Command {
    /// Parse arguments (without the program name)
    /// DOCUMENTATION: Radius falls back to `default_radius` when omitted
    pub fn parse(args: &[String], default_radius: u32) -> Result<Self, PlacesError> {
        let (name, rest) = args
            .split_first()
            .ok_or_else(|| PlacesError::InvalidRequest("Missing command".to_string()))?;

        match name.as_str() {
            "search" => {
                let (positional, extra_pages) = split_pages_flag(rest)?;
                Ok(Command::Search {
                    query: parse_query(&positional, default_radius)?,
                    extra_pages,
                })
            }
            "geojson" => Ok(Command::GeoJson {
                query: parse_query(rest, default_radius)?,
            }),
            "details" => Ok(Command::Details {
                id: single_id(rest)?,
            }),
            "like" => Ok(Command::Like {
                id: single_id(rest)?,
            }),
            "favorites" => Ok(Command::Favorites),
            "categories" => Ok(Command::Categories),
            other => Err(PlacesError::InvalidRequest(format!(
                "Unknown command: {}",
                other
            ))),
        }
    }
}

// Pull "--pages N" out of the argument list
fn split_pages_flag(args: &[String]) -> Result<(Vec<String>, usize), PlacesError> {
    let mut positional = Vec::new();
    let mut pages = 0;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if arg == "--pages" {
            let value = iter
                .next()
                .ok_or_else(|| PlacesError::InvalidRequest("--pages needs a value".to_string()))?;
            pages = value
                .parse()
                .map_err(|_| PlacesError::InvalidRequest(format!("Invalid page count: {}", value)))?;
        } else {
            positional.push(arg.clone());
        }
    }

    Ok((positional, pages))
}

fn parse_query(args: &[String], default_radius: u32) -> Result<SearchQuery, PlacesError> {
    let (lat, lng) = match args {
        [lat, lng, ..] => (parse_number::<f64>(lat, "latitude")?, parse_number::<f64>(lng, "longitude")?),
        _ => {
            return Err(PlacesError::InvalidRequest(
                "Expected <lat> <lng>".to_string(),
            ))
        }
    };

    let category = match args.get(2) {
        Some(value) => value.parse::<PlaceCategory>().map_err(PlacesError::InvalidRequest)?,
        None => PlaceCategory::default(),
    };

    let radius = match args.get(3) {
        Some(value) => parse_number::<u32>(value, "radius")?,
        None => default_radius,
    };

    if args.len() > 4 {
        return Err(PlacesError::InvalidRequest(format!(
            "Unexpected argument: {}",
            args[4]
        )));
    }

    Ok(SearchQuery::new(Point::new(lng, lat), radius, category))
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str) -> Result<T, PlacesError> {
    value
        .parse()
        .map_err(|_| PlacesError::InvalidRequest(format!("Invalid {}: {}", what, value)))
}

fn single_id(args: &[String]) -> Result<String, PlacesError> {
    match args {
        [id] if !id.is_empty() => Ok(id.clone()),
        _ => Err(PlacesError::InvalidRequest("Expected one <place_id>".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_parse_search_with_defaults() {
        let command = Command::parse(&args("search 12.97 77.59"), 5000).unwrap();

        let Command::Search { query, extra_pages } = command else {
            panic!("expected a search command");
        };
        assert_eq!(query.latitude, 12.97);
        assert_eq!(query.longitude, 77.59);
        assert_eq!(query.radius_meters, 5000);
        assert_eq!(query.category, PlaceCategory::Restaurant);
        assert_eq!(extra_pages, 0);
    }

    #[test]
    fn test_parse_search_with_everything() {
        let command = Command::parse(&args("search 12.97 77.59 --pages 2 gas-station 1500"), 5000).unwrap();

        assert_eq!(
            command,
            Command::Search {
                query: SearchQuery::new(Point::new(77.59, 12.97), 1500, PlaceCategory::GasStation),
                extra_pages: 2,
            }
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse(&args("favorites"), 1).unwrap(), Command::Favorites);
        assert_eq!(Command::parse(&args("categories"), 1).unwrap(), Command::Categories);
        assert_eq!(
            Command::parse(&args("like abc"), 1).unwrap(),
            Command::Like { id: "abc".into() }
        );
        assert!(matches!(
            Command::parse(&args("geojson 1 2 pub"), 1).unwrap(),
            Command::GeoJson { .. }
        ));
    }

    #[test]
    fn test_parse_errors() {
        for line in [
            "",
            "teleport",
            "search 12.97",
            "search north 77.59",
            "search 12.97 77.59 spaceport",
            "search 12.97 77.59 pub -5",
            "search 12.97 77.59 --pages",
            "details",
            "details a b",
        ] {
            let err = Command::parse(&args(line), 5000).unwrap_err();
            assert_eq!(err.kind(), "INVALID_REQUEST", "line: {:?}", line);
        }
    }
}
