use super::{IsomerLevel, Isotope};
use crate::common::elements::{
    MAX_ATOMIC_NUMBER, atomic_number_for_name, atomic_number_for_symbol,
};
use crate::domain::{NucError, NucResult, ParserResult};
use serde_json::Value;

/// One loosely typed constructor argument.
#[derive(Debug, Clone, PartialEq)]
pub enum IsotopeArg {
    Absent,
    Text(String),
    Integer(i64),
    Float(f64),
}

impl IsotopeArg {
    pub fn from_json(value: &Value) -> NucResult<Self> {
        match value {
            Value::Null => Ok(Self::Absent),
            Value::String(text) => Ok(Self::Text(text.clone())),
            Value::Number(number) => Ok(number
                .as_i64()
                .map(Self::Integer)
                .unwrap_or_else(|| Self::Float(number.as_f64().unwrap_or(f64::NAN)))),
            other => Err(NucError::type_mismatch(
                "TYPE.ISOTOPE_ARG",
                format!("isotope argument must be a string or number, got {other}"),
            )),
        }
    }
}

impl From<&str> for IsotopeArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for IsotopeArg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for IsotopeArg {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for IsotopeArg {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for IsotopeArg {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for IsotopeArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<IsotopeArg>> From<Option<T>> for IsotopeArg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

pub(super) fn parse_args(args: &[IsotopeArg]) -> ParserResult<Isotope> {
    match args {
        [] => Err(NucError::isotope(
            "ISOTOPE.ARITY",
            "no isotope arguments given",
        )),
        [IsotopeArg::Text(text)] => parse_designator(text),
        [_] => Err(NucError::isotope(
            "ISOTOPE.ARITY",
            "a single isotope argument must be a string",
        )),
        [element, mass] => build(element, mass, &IsotopeArg::Absent),
        [element, mass, isomer] => build(element, mass, isomer),
        _ => Err(NucError::isotope(
            "ISOTOPE.ARITY",
            format!("expected at most 3 isotope arguments, got {}", args.len()),
        )),
    }
}

fn build(element: &IsotopeArg, mass: &IsotopeArg, isomer: &IsotopeArg) -> ParserResult<Isotope> {
    let atomic_number = element_arg(element)?;
    let mass_number = mass_arg(mass)?;
    let isomer = isomer_arg(isomer)?;
    Isotope::from_atomic_number(atomic_number, mass_number, isomer)
}

fn element_arg(arg: &IsotopeArg) -> ParserResult<usize> {
    let resolved = match arg {
        IsotopeArg::Text(text) => crate::common::elements::resolve_element(text),
        IsotopeArg::Integer(z) if *z >= 1 && *z as usize <= MAX_ATOMIC_NUMBER => Some(*z as usize),
        _ => None,
    };
    resolved.ok_or_else(|| {
        NucError::isotope("ISOTOPE.ELEMENT", format!("invalid element {arg:?}"))
    })
}

fn mass_arg(arg: &IsotopeArg) -> ParserResult<u32> {
    let parsed = match arg {
        IsotopeArg::Integer(a) => u32::try_from(*a).ok(),
        IsotopeArg::Text(text) => text.trim().parse::<u32>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        NucError::isotope("ISOTOPE.MASS_NUMBER", format!("invalid mass number {arg:?}"))
    })
}

fn isomer_arg(arg: &IsotopeArg) -> ParserResult<IsomerLevel> {
    match arg {
        IsotopeArg::Absent => Ok(IsomerLevel::GROUND),
        IsotopeArg::Integer(level) => u8::try_from(*level).map(IsomerLevel::new).map_err(|_| {
            NucError::isotope("ISOTOPE.ISOMER", format!("invalid isomer level {level}"))
        }),
        IsotopeArg::Text(text) if text.trim().is_empty() => Ok(IsomerLevel::GROUND),
        IsotopeArg::Text(text) => parse_isomer_suffix(text.trim()),
        IsotopeArg::Float(value) => Err(NucError::isotope(
            "ISOTOPE.ISOMER",
            format!("isomer level must be an integer, got {value}"),
        )),
    }
}

/// Parse `m`, `M`, `m2`, ...; `m` alone is the first isomer.
fn parse_isomer_suffix(suffix: &str) -> ParserResult<IsomerLevel> {
    let Some(digits) = suffix
        .strip_prefix('m')
        .or_else(|| suffix.strip_prefix('M'))
    else {
        return Err(NucError::isotope(
            "ISOTOPE.ISOMER",
            format!("isomer suffix '{suffix}' must start with 'm'"),
        ));
    };
    if digits.is_empty() {
        return Ok(IsomerLevel::FIRST);
    }
    if !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(NucError::isotope(
            "ISOTOPE.ISOMER",
            format!("invalid isomer suffix '{suffix}'"),
        ));
    }
    match digits.parse::<u8>() {
        Ok(level) if level > 0 => Ok(IsomerLevel::new(level)),
        _ => Err(NucError::isotope(
            "ISOTOPE.ISOMER",
            format!("invalid isomer level in '{suffix}'"),
        )),
    }
}

/// Split `99m2` into mass number and isomer level.
fn parse_mass_with_suffix(token: &str) -> ParserResult<(u32, IsomerLevel)> {
    let split = token
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(token.len());
    let (digits, suffix) = token.split_at(split);
    let mass_number = digits.parse::<u32>().map_err(|_| {
        NucError::isotope(
            "ISOTOPE.MASS_NUMBER",
            format!("invalid mass number in '{token}'"),
        )
    })?;
    let isomer = if suffix.is_empty() {
        IsomerLevel::GROUND
    } else {
        parse_isomer_suffix(suffix)?
    };
    Ok((mass_number, isomer))
}

/// Element half of a combined designator: a symbol or a name, letters only.
fn element_token(token: &str) -> Option<usize> {
    if token.is_empty() || !token.bytes().all(|byte| byte.is_ascii_alphabetic()) {
        return None;
    }
    atomic_number_for_symbol(token).or_else(|| atomic_number_for_name(token))
}

fn unknown_element(token: &str, text: &str) -> NucError {
    NucError::isotope(
        "ISOTOPE.ELEMENT",
        format!("invalid element '{token}' in '{text}'"),
    )
}

fn malformed(text: &str) -> NucError {
    NucError::isotope(
        "ISOTOPE.DESIGNATOR",
        format!("malformed isotope designator '{text}'"),
    )
}

/// Resolve a combined designator with an ordered rule list:
///
/// 1. `ELEMENT-A[m]` or `A[m]-ELEMENT`, the half starting with a digit
///    being the mass part;
/// 2. `ELEMENTA[m]`, split at the first digit;
/// 3. `A[m]ELEMENT`, where the letters after the digits are first read as a
///    whole element (`55mN` is Mn-55) and only then as isomer suffix plus
///    element (`55m2N` is N-55m2).
pub(super) fn parse_designator(text: &str) -> ParserResult<Isotope> {
    let normalized = text.trim();
    if normalized.is_empty()
        || !normalized
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-')
    {
        return Err(malformed(text));
    }

    let (atomic_number, mass_number, isomer) = match normalized.matches('-').count() {
        0 => split_unhyphenated(normalized)?,
        1 => split_hyphenated(normalized)?,
        _ => return Err(malformed(text)),
    };
    Isotope::from_atomic_number(atomic_number, mass_number, isomer)
}

fn split_hyphenated(text: &str) -> ParserResult<(usize, u32, IsomerLevel)> {
    let (left, right) = text.split_once('-').ok_or_else(|| malformed(text))?;
    let starts_with_digit = |part: &str| part.bytes().next().is_some_and(|b| b.is_ascii_digit());

    let (element_part, mass_part) = match (starts_with_digit(left), starts_with_digit(right)) {
        (false, true) => (left, right),
        (true, false) => (right, left),
        _ => return Err(malformed(text)),
    };
    let atomic_number =
        element_token(element_part).ok_or_else(|| unknown_element(element_part, text))?;
    let (mass_number, isomer) = parse_mass_with_suffix(mass_part)?;
    Ok((atomic_number, mass_number, isomer))
}

fn split_unhyphenated(text: &str) -> ParserResult<(usize, u32, IsomerLevel)> {
    let first_digit = text.find(|ch: char| ch.is_ascii_digit()).ok_or_else(|| malformed(text))?;

    if first_digit > 0 {
        let (element_part, mass_part) = text.split_at(first_digit);
        let atomic_number =
            element_token(element_part).ok_or_else(|| unknown_element(element_part, text))?;
        let (mass_number, isomer) = parse_mass_with_suffix(mass_part)?;
        return Ok((atomic_number, mass_number, isomer));
    }

    let letters_start = text
        .find(|ch: char| !ch.is_ascii_digit())
        .ok_or_else(|| malformed(text))?;
    let (digits, rest) = text.split_at(letters_start);
    let mass_number = digits.parse::<u32>().map_err(|_| malformed(text))?;

    if let Some(atomic_number) = element_token(rest) {
        return Ok((atomic_number, mass_number, IsomerLevel::GROUND));
    }

    let after_m = rest
        .strip_prefix('m')
        .or_else(|| rest.strip_prefix('M'))
        .ok_or_else(|| unknown_element(rest, text))?;
    let level_len = after_m
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(after_m.len());
    let (level_digits, element_part) = after_m.split_at(level_len);
    let isomer = parse_isomer_suffix(&rest[..1 + level_digits.len()])?;
    let atomic_number =
        element_token(element_part).ok_or_else(|| unknown_element(element_part, text))?;
    Ok((atomic_number, mass_number, isomer))
}
