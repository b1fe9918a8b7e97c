use crate::geometry::Point;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventParseError {
    #[error("Unknown pointer event '{0}', expected down:x,y, move:x,y, up or cancel")]
    UnknownKind(String),
    #[error("Expected 'x,y' coordinates in '{0}'")]
    Coordinates(String),
}

/// Pointer input in widget coordinates.
#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    Cancel,
}

impl FromStr for PointerEvent {
    type Err = EventParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (kind, args) = s.split_once(':').unwrap_or((s, ""));

        match kind.to_ascii_lowercase().as_str() {
            "down" => parse_point(args, s).map(PointerEvent::Down),
            "move" => parse_point(args, s).map(PointerEvent::Move),
            "up" if args.is_empty() => Ok(PointerEvent::Up),
            "cancel" if args.is_empty() => Ok(PointerEvent::Cancel),
            _ => Err(EventParseError::UnknownKind(s.to_string())),
        }
    }
}

fn parse_point(args: &str, event: &str) -> Result<Point, EventParseError> {
    let err = || EventParseError::Coordinates(event.to_string());
    let (x, y) = args.split_once(',').ok_or_else(err)?;
    let x = x.trim().parse::<f64>().map_err(|_| err())?;
    let y = y.trim().parse::<f64>().map_err(|_| err())?;
    Ok(Point::new(x, y))
}

impl fmt::Display for PointerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerEvent::Down(p) => write!(f, "down:{},{}", p.x, p.y),
            PointerEvent::Move(p) => write!(f, "move:{},{}", p.x, p.y),
            PointerEvent::Up => f.write_str("up"),
            PointerEvent::Cancel => f.write_str("cancel"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_parsing() {
        let cases = vec![
            ("down:100,0", PointerEvent::Down(Point::new(100.0, 0.0))),
            ("move: -2.5 , 7", PointerEvent::Move(Point::new(-2.5, 7.0))),
            ("UP", PointerEvent::Up),
            (" cancel ", PointerEvent::Cancel),
        ];

        for (input, expected) in cases {
            assert_eq!(input.parse::<PointerEvent>().unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_event_parse_errors() {
        assert!(matches!(
            "tap:1,2".parse::<PointerEvent>(),
            Err(EventParseError::UnknownKind(_))
        ));
        assert!(matches!(
            "down:1".parse::<PointerEvent>(),
            Err(EventParseError::Coordinates(_))
        ));
        assert!(matches!(
            "move:a,b".parse::<PointerEvent>(),
            Err(EventParseError::Coordinates(_))
        ));
        assert!(matches!(
            "up:1,2".parse::<PointerEvent>(),
            Err(EventParseError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_event_display_parses_back() {
        let event = PointerEvent::Move(Point::new(12.5, -3.0));
        assert_eq!(event.to_string(), "move:12.5,-3");
        assert_eq!(event.to_string().parse::<PointerEvent>().unwrap(), event);
    }
}
