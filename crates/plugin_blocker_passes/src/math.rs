//! # Engine Vector Types
//!
//! Positions and orientations handed to the host engine. Prop definitions keep
//! both as space separated strings (`"-1600.46 -741.124 -172.965"`), so this
//! module also owns the lenient string parsing used at spawn time.
//!
//! Parsing never fails: anything that does not start with three numeric tokens
//! becomes the zero vector, and the prop is still spawned.

use std::fmt;
use tracing::debug;

/// World-space position or velocity, in engine units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a zero vector (0, 0, 0).
    pub fn zero() -> Self {
        Self::default()
    }

    /// Parses `"x y z"`, falling back to [`Vector::zero`] on malformed input.
    pub fn parse_or_zero(value: &str) -> Self {
        parse_triplet(value)
            .map(|(x, y, z)| Self::new(x, y, z))
            .unwrap_or_else(|| {
                debug!("🚧 BlockerPasses: Malformed vector '{}', using zero", value);
                Self::zero()
            })
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

/// Euler orientation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QAngle {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl QAngle {
    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Parses `"pitch yaw roll"`, falling back to [`QAngle::zero`] on malformed input.
    pub fn parse_or_zero(value: &str) -> Self {
        parse_triplet(value)
            .map(|(pitch, yaw, roll)| Self::new(pitch, yaw, roll))
            .unwrap_or_else(|| {
                debug!("🚧 BlockerPasses: Malformed angles '{}', using zero", value);
                Self::zero()
            })
    }
}

impl fmt::Display for QAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.pitch, self.yaw, self.roll)
    }
}

/// Reads the first three space separated tokens as floats.
///
/// Splits on single spaces, so doubled separators produce an empty token and
/// the whole value is rejected. Tokens after the third are ignored.
fn parse_triplet(value: &str) -> Option<(f32, f32, f32)> {
    let mut tokens = value.split(' ');
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    let z = tokens.next()?.parse().ok()?;
    Some((x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_tokens() {
        let origin = Vector::parse_or_zero("-1600.46 -741.124 -172.965");
        assert_eq!(origin, Vector::new(-1600.46, -741.124, -172.965));

        let angles = QAngle::parse_or_zero("0 270.256 0");
        assert_eq!(angles, QAngle::new(0.0, 270.256, 0.0));
    }

    #[test]
    fn test_parse_integers_and_exponents() {
        assert_eq!(Vector::parse_or_zero("1 2 3"), Vector::new(1.0, 2.0, 3.0));
        assert_eq!(Vector::parse_or_zero("1e2 -0 +4.5"), Vector::new(100.0, 0.0, 4.5));
    }

    #[test]
    fn test_extra_tokens_are_ignored() {
        assert_eq!(Vector::parse_or_zero("1 2 3 4"), Vector::new(1.0, 2.0, 3.0));
        assert_eq!(Vector::parse_or_zero("1 2 3 garbage"), Vector::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_too_few_tokens_yield_zero() {
        assert_eq!(Vector::parse_or_zero(""), Vector::zero());
        assert_eq!(Vector::parse_or_zero("1"), Vector::zero());
        assert_eq!(Vector::parse_or_zero("1 2"), Vector::zero());
        assert_eq!(QAngle::parse_or_zero("90 180"), QAngle::zero());
    }

    #[test]
    fn test_non_numeric_tokens_yield_zero() {
        assert_eq!(Vector::parse_or_zero("a b c"), Vector::zero());
        assert_eq!(Vector::parse_or_zero("1 two 3"), Vector::zero());
        assert_eq!(QAngle::parse_or_zero("0,180,0"), QAngle::zero());
    }

    #[test]
    fn test_double_space_is_malformed() {
        assert_eq!(Vector::parse_or_zero("1  2 3"), Vector::zero());
    }

    #[test]
    fn test_display_round_trips() {
        let origin = Vector::new(-961.146, -14.2419, -43.0083);
        assert_eq!(Vector::parse_or_zero(&origin.to_string()), origin);
    }
}
