use derive_more::{Display, From};

/// A symbol value. Tri-state symbols are numbers in `0..=2` (or the `"y"`/`"m"`/`"n"` spelling
/// they were assigned with); `int`/`hex` symbols hold numbers or the literal text of their
/// default; `string` symbols hold text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, From, Display)]
pub enum Value {
    Number(i64),
    String(String),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Tristate> for Value {
    fn from(value: Tristate) -> Self {
        Value::String(value.as_char().to_string())
    }
}

impl Value {
    /// Numeric interpretation used by the logical operators. Strings count as zero.
    pub fn as_number(&self) -> i64 {
        match self {
            Value::Number(n) => *n,
            Value::String(_) => 0,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Number(_) => None,
        }
    }

    /// Interpret as a base-10 integer, accepting numeric strings.
    pub fn to_int(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::String(s) => s.trim().parse().ok(),
        }
    }

    /// Interpret as a base-16 integer, accepting strings with or without a `0x` prefix.
    pub fn to_hex(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::String(s) => parse_hex(s),
        }
    }
}

pub(crate) fn parse_hex(text: &str) -> Option<i64> {
    let text = text.trim();
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    i64::from_str_radix(digits, 16).ok()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Tristate {
    #[default]
    No = 0,
    Module = 1,
    Yes = 2,
}

impl Tristate {
    pub fn from_number(n: i64) -> Tristate {
        match n {
            n if n <= 0 => Tristate::No,
            1 => Tristate::Module,
            _ => Tristate::Yes,
        }
    }

    /// Truth interpretation of an optional value: absent is `n`, `"y"`/`"m"` are recognised,
    /// any other string is `n`.
    pub fn from_value(value: Option<&Value>) -> Tristate {
        match value {
            None => Tristate::No,
            Some(Value::Number(n)) => Tristate::from_number(*n),
            Some(Value::String(s)) => match s.as_str() {
                "y" => Tristate::Yes,
                "m" => Tristate::Module,
                _ => Tristate::No,
            },
        }
    }

    pub fn as_number(&self) -> i64 {
        *self as i64
    }

    pub fn as_char(&self) -> char {
        match self {
            Tristate::No => 'n',
            Tristate::Module => 'm',
            Tristate::Yes => 'y',
        }
    }
}
