// src/duration.rs

//! ISO-8601 durations for recipe cook times
//!
//! Accepts `P[nD][T[nH][nM][nS]]` with whole-number components and renders
//! the canonical form clients expect: days folded into hours, zero
//! components omitted, `PT0S` for an empty duration. `PT0H30M` parses and
//! prints back as `PT30M`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid duration '{input}': {reason}")]
pub struct DurationParseError {
    pub input: String,
    pub reason: &'static str,
}

/// A cook time, stored as whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct RecipeDuration {
    seconds: u64,
}

impl RecipeDuration {
    pub fn from_secs(seconds: u64) -> Self {
        Self { seconds }
    }

    pub fn as_secs(&self) -> u64 {
        self.seconds
    }

    pub fn parse(input: &str) -> Result<Self, DurationParseError> {
        let fail = |reason| DurationParseError {
            input: input.to_string(),
            reason,
        };

        let upper = input.trim().to_ascii_uppercase();
        let rest = upper.strip_prefix('P').ok_or_else(|| fail("must start with 'P'"))?;

        let (date_part, time_part) = match rest.split_once('T') {
            Some((date, time)) => {
                if time.is_empty() {
                    return Err(fail("'T' must be followed by a time component"));
                }
                (date, Some(time))
            }
            None => (rest, None),
        };

        let mut seconds: u64 = 0;
        let mut components = 0;

        for (value, unit) in components_of(date_part).map_err(fail)? {
            match unit {
                'D' => seconds = add_scaled(seconds, value, 86_400).ok_or_else(|| fail("too large"))?,
                _ => return Err(fail("only days are allowed before 'T'")),
            }
            components += 1;
        }

        if let Some(time) = time_part {
            let mut last_rank = 0;
            for (value, unit) in components_of(time).map_err(fail)? {
                let (rank, scale) = match unit {
                    'H' => (1, 3_600),
                    'M' => (2, 60),
                    'S' => (3, 1),
                    _ => return Err(fail("time components must be H, M or S")),
                };
                if rank <= last_rank {
                    return Err(fail("time components must appear once, in H, M, S order"));
                }
                last_rank = rank;
                seconds = add_scaled(seconds, value, scale).ok_or_else(|| fail("too large"))?;
                components += 1;
            }
        }

        if components == 0 {
            return Err(fail("no components"));
        }

        Ok(Self { seconds })
    }
}

fn add_scaled(total: u64, value: u64, scale: u64) -> Option<u64> {
    value.checked_mul(scale)?.checked_add(total)
}

/// Split `12H30M` into `[(12, 'H'), (30, 'M')]`
fn components_of(part: &str) -> Result<Vec<(u64, char)>, &'static str> {
    let mut out = Vec::new();
    let mut digits = String::new();

    for c in part.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            if digits.is_empty() {
                return Err("every unit needs a number in front of it");
            }
            let value = digits.parse::<u64>().map_err(|_| "component out of range")?;
            out.push((value, c));
            digits.clear();
        }
    }

    if !digits.is_empty() {
        return Err("number without a unit");
    }

    Ok(out)
}

impl fmt::Display for RecipeDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.seconds == 0 {
            return f.write_str("PT0S");
        }

        let hours = self.seconds / 3_600;
        let minutes = (self.seconds % 3_600) / 60;
        let seconds = self.seconds % 60;

        f.write_str("PT")?;
        if hours > 0 {
            write!(f, "{hours}H")?;
        }
        if minutes > 0 {
            write!(f, "{minutes}M")?;
        }
        if seconds > 0 {
            write!(f, "{seconds}S")?;
        }
        Ok(())
    }
}

impl FromStr for RecipeDuration {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RecipeDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecipeDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_common_forms() {
        assert_eq!(RecipeDuration::parse("PT30M").unwrap().as_secs(), 30 * 60);
        assert_eq!(RecipeDuration::parse("PT1H").unwrap().as_secs(), 3600);
        assert_eq!(RecipeDuration::parse("PT1H30M").unwrap().as_secs(), 5400);
        assert_eq!(RecipeDuration::parse("PT0H45M").unwrap().as_secs(), 45 * 60);
        assert_eq!(RecipeDuration::parse("P1DT2H").unwrap().as_secs(), 26 * 3600);
        assert_eq!(RecipeDuration::parse("P2D").unwrap().as_secs(), 2 * 86_400);
        assert_eq!(RecipeDuration::parse("pt90s").unwrap().as_secs(), 90);
    }

    #[test]
    fn test_canonical_display() {
        let cases = [
            ("PT30M", "PT30M"),
            ("PT0H30M", "PT30M"),
            ("PT1H0M", "PT1H"),
            ("PT90M", "PT1H30M"),
            ("P1DT2H", "PT26H"),
            ("PT0S", "PT0S"),
            ("PT1H2M3S", "PT1H2M3S"),
        ];
        for (input, expected) in cases {
            assert_eq!(RecipeDuration::parse(input).unwrap().to_string(), expected);
        }
    }

    #[test]
    fn test_rejects_garbage() {
        for input in ["", "P", "PT", "30M", "PT30", "PTM", "PT30M1H", "PT1H1H", "P1H", "PT1.5H", "1 hour"] {
            assert!(RecipeDuration::parse(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_rejects_overflow() {
        assert!(RecipeDuration::parse("P99999999999999999999D").is_err());
        assert!(RecipeDuration::parse(&format!("P{}D", u64::MAX / 86_400 + 1)).is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let duration: RecipeDuration = serde_json::from_str("\"PT0H30M\"").unwrap();
        assert_eq!(serde_json::to_string(&duration).unwrap(), "\"PT30M\"");
        assert!(serde_json::from_str::<RecipeDuration>("\"soon\"").is_err());
    }
}
