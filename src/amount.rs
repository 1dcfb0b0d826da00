use serde_with::{DeserializeFromStr, SerializeDisplay};

use std::{
    fmt::{Debug, Display},
    iter::Sum,
    ops::AddAssign,
    str::FromStr,
};

use crate::error::{Error, Result};

/// Represents a validated amount of money spent.
///
/// An `Amount` is always finite and never negative. There is no currency:
/// the [`Display`] implementation uses the plain default float format, so
/// `15.0` prints as `15` and `20.5` as `20.5`.
#[derive(Clone, Copy, Default, DeserializeFromStr, SerializeDisplay, PartialEq, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Debug for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Parses an amount, applying the validation rules in order:
///
/// * Surrounding whitespace is ignored; nothing left is [`Error::MissingAmount`]
/// * Anything that isn't a finite decimal number is [`Error::InvalidAmount`]
/// * A number below zero is [`Error::NegativeAmount`]
///
/// Zero is a valid amount.
///
/// # Examples
///
/// ```
/// # use spend::Amount;
/// let amount: Amount = " 20.5 ".parse().unwrap();
/// assert_eq!(amount.to_string(), "20.5");
/// assert!("-0.01".parse::<Amount>().is_err());
/// ```
impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let clean = s.trim();
        if clean.is_empty() {
            return Err(Error::MissingAmount);
        }
        let number: f64 = clean
            .parse()
            .map_err(|_| Error::InvalidAmount(clean.to_string()))?;
        if !number.is_finite() {
            return Err(Error::InvalidAmount(clean.to_string()));
        }
        if number < 0.0 {
            return Err(Error::NegativeAmount(clean.to_string()));
        }
        Ok(Self(number))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, a| {
            acc += a;
            acc
        })
    }
}

/// The outcome of validating an amount in lenient mode.
#[derive(Debug)]
pub enum Verdict {
    Accepted(Amount),
    /// The entry should be skipped; the error describes why.
    Rejected(Error),
}

/// Validates the raw amount text `raw`.
///
/// In strict mode any invalid amount is returned as an error, which ends
/// the run. Otherwise it comes back as [`Verdict::Rejected`], and the
/// caller skips the entry.
///
/// # Errors
///
/// In strict mode, returns the error from parsing `raw` as an [`Amount`].
pub fn validate(raw: &str, strict: bool) -> Result<Verdict> {
    match raw.parse() {
        Ok(amount) => Ok(Verdict::Accepted(amount)),
        Err(e) if strict => Err(e),
        Err(e) => Ok(Verdict::Rejected(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<Amount> {
        s.parse()
    }

    #[test]
    fn from_str_fn_accepts_plain_decimal_numbers() {
        assert_eq!(parse("10").unwrap().value(), 10.0);
        assert_eq!(parse(" 20.5\t").unwrap().value(), 20.5);
        assert_eq!(parse("+3").unwrap().value(), 3.0);
        assert_eq!(parse("1e2").unwrap().value(), 100.0);
        assert_eq!(parse(".5").unwrap().value(), 0.5);
    }

    #[test]
    fn from_str_fn_accepts_zero() {
        assert_eq!(parse("0").unwrap(), Amount::default());
        assert_eq!(parse("0.00").unwrap(), Amount::default());
    }

    #[test]
    fn from_str_fn_treats_blank_amount_as_missing() {
        assert!(matches!(parse(""), Err(Error::MissingAmount)));
        assert!(matches!(parse("   "), Err(Error::MissingAmount)));
    }

    #[test]
    fn from_str_fn_rejects_non_numeric_text() {
        match parse(" abc ") {
            Err(Error::InvalidAmount(raw)) => assert_eq!(raw, "abc"),
            other => panic!("expected InvalidAmount, got {other:?}"),
        }
        assert!(matches!(parse("1,000"), Err(Error::InvalidAmount(_))));
        assert!(matches!(parse("$5"), Err(Error::InvalidAmount(_))));
    }

    #[test]
    fn from_str_fn_rejects_non_finite_numbers() {
        assert!(matches!(parse("inf"), Err(Error::InvalidAmount(_))));
        assert!(matches!(parse("NaN"), Err(Error::InvalidAmount(_))));
    }

    #[test]
    fn from_str_fn_rejects_negative_amounts() {
        match parse("-0.01") {
            Err(Error::NegativeAmount(raw)) => assert_eq!(raw, "-0.01"),
            other => panic!("expected NegativeAmount, got {other:?}"),
        }
    }

    #[test]
    fn validate_fn_rejects_bad_amount_in_lenient_mode() {
        assert!(matches!(
            validate("-0.01", false),
            Ok(Verdict::Rejected(Error::NegativeAmount(_)))
        ));
        assert!(matches!(
            validate("abc", false),
            Ok(Verdict::Rejected(Error::InvalidAmount(_)))
        ));
    }

    #[test]
    fn validate_fn_fails_on_bad_amount_in_strict_mode() {
        assert!(matches!(
            validate("-0.01", true),
            Err(Error::NegativeAmount(_))
        ));
        assert!(matches!(validate("", true), Err(Error::MissingAmount)));
    }

    #[test]
    fn validate_fn_accepts_good_amount_in_either_mode() {
        for strict in [false, true] {
            match validate("5", strict) {
                Ok(Verdict::Accepted(a)) => assert_eq!(a.value(), 5.0),
                other => panic!("expected Accepted, got {other:?}"),
            }
        }
    }

    #[test]
    fn display_uses_default_float_format() {
        assert_eq!(parse("15.0").unwrap().to_string(), "15");
        assert_eq!(parse("35.5").unwrap().to_string(), "35.5");
    }

    #[test]
    fn sum_adds_all_amounts() {
        let total: Amount = ["10", "20.5", "5"]
            .into_iter()
            .map(|s| parse(s).unwrap())
            .sum();
        assert_eq!(total.value(), 35.5);
    }
}
