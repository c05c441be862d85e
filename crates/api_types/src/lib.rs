use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Signed monetary value represented as **integer cents**.
///
/// The service sends amounts as JSON decimals (`150.5`, `1234.56`) or, for
/// some serializers, as strings. Both are parsed without going through
/// floating-point arithmetic.
///
/// ```rust
/// use api_types::Amount;
///
/// let amount: Amount = "1234,5".parse().unwrap();
/// assert_eq!(amount.cents(), 123_450);
/// assert_eq!(amount.to_string(), "R$ 1.234,50");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Amount(i64);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,
    #[error("invalid amount: {0}")]
    Invalid(String),
    #[error("too many decimals: {0}")]
    TooManyDecimals(String),
    #[error("amount too large")]
    Overflow,
}

impl Amount {
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let reais = group_thousands(abs / 100);
        let cents = abs % 100;
        write!(f, "{sign}R$ {reais},{cents:02}")
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    /// At most two fractional digits are allowed; a trailing run of zeros
    /// beyond that (`150.000`) is tolerated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AmountError::Invalid(s.to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim().replace(',', ".");
        if rest.is_empty() {
            return Err(AmountError::Empty);
        }

        let mut parts = rest.split('.');
        let whole = parts.next().ok_or_else(invalid)?;
        let frac = parts.next().unwrap_or("");
        if parts.next().is_some() {
            return Err(invalid());
        }

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let frac = frac.trim_end_matches('0');
        let cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            2 => frac.parse::<i64>().map_err(|_| invalid())?,
            _ => return Err(AmountError::TooManyDecimals(s.to_string())),
        };

        let whole: i64 = whole.parse().map_err(|_| AmountError::Overflow)?;
        let total = whole
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or(AmountError::Overflow)?;

        Ok(Amount(if negative { -total } else { total }))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0 as f64 / 100.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(serde_json::Number),
            Text(String),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Number(number) => number.to_string(),
            Raw::Text(text) => text,
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// A choice in a selector. `value: None` is the blank "no filter" entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectOption<T> {
    pub value: Option<T>,
    pub label: &'static str,
}

const BLANK_LABEL: &str = "Selecione...";

const MONTH_LABELS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Months offered by the search form, blank choice first.
pub fn month_options() -> Vec<SelectOption<u32>> {
    let mut options = vec![SelectOption {
        value: None,
        label: BLANK_LABEL,
    }];
    options.extend(MONTH_LABELS.into_iter().zip(1u32..).map(|(label, value)| SelectOption {
        value: Some(value),
        label,
    }));
    options
}

/// Entry kinds offered by the search form, blank choice first.
pub fn kind_options() -> Vec<SelectOption<entry::EntryKind>> {
    vec![
        SelectOption {
            value: None,
            label: BLANK_LABEL,
        },
        SelectOption {
            value: Some(entry::EntryKind::Expense),
            label: entry::EntryKind::Expense.label(),
        },
        SelectOption {
            value: Some(entry::EntryKind::Income),
            label: entry::EntryKind::Income.label(),
        },
    ]
}

pub fn month_label(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    MONTH_LABELS.get(index).copied()
}

pub mod entry {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum EntryKind {
        #[serde(rename = "RECEITA")]
        Income,
        #[serde(rename = "DESPESA")]
        Expense,
    }

    impl EntryKind {
        pub fn label(self) -> &'static str {
            match self {
                Self::Income => "Receita",
                Self::Expense => "Despesa",
            }
        }
    }

    /// Lifecycle of an entry. Only `Pending` entries can be settled or
    /// cancelled from the query screen.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum EntryStatus {
        #[serde(rename = "PENDENTE")]
        Pending,
        #[serde(rename = "CANCELADO")]
        Cancelled,
        #[serde(rename = "EFETIVADO")]
        Settled,
    }

    impl EntryStatus {
        pub fn label(self) -> &'static str {
            match self {
                Self::Pending => "Pendente",
                Self::Cancelled => "Cancelado",
                Self::Settled => "Efetivado",
            }
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Entry {
        pub id: i64,
        #[serde(rename = "descricao", default)]
        pub description: String,
        #[serde(rename = "mes")]
        pub month: u32,
        #[serde(rename = "ano")]
        pub year: i32,
        #[serde(rename = "valor", default)]
        pub amount: Amount,
        #[serde(rename = "tipo")]
        pub kind: EntryKind,
        pub status: EntryStatus,
        /// Owner id; some service versions omit it from list responses.
        #[serde(rename = "usuario", default, skip_serializing_if = "Option::is_none")]
        pub user_id: Option<i64>,
    }

    /// Search criteria, sent as a query string.
    ///
    /// Empty optionals are omitted so the service treats them as "any".
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct EntryFilter {
        #[serde(rename = "ano")]
        pub year: String,
        #[serde(rename = "mes", skip_serializing_if = "Option::is_none")]
        pub month: Option<u32>,
        #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
        pub kind: Option<EntryKind>,
        #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        #[serde(rename = "usuario")]
        pub user_id: i64,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct StatusUpdate {
        pub status: EntryStatus,
    }
}

pub mod user {
    use super::*;

    /// The authenticated user, as returned by the service and persisted
    /// locally for the session.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct User {
        pub id: i64,
        #[serde(rename = "nome", default)]
        pub name: String,
        #[serde(default)]
        pub email: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Credentials {
        pub email: String,
        #[serde(rename = "senha")]
        pub password: String,
    }
}

#[cfg(test)]
mod tests {
    use super::entry::{Entry, EntryFilter, EntryKind, EntryStatus};
    use super::*;

    #[test]
    fn amount_display_groups_thousands() {
        assert_eq!(Amount::from_cents(0).to_string(), "R$ 0,00");
        assert_eq!(Amount::from_cents(5).to_string(), "R$ 0,05");
        assert_eq!(Amount::from_cents(15_050).to_string(), "R$ 150,50");
        assert_eq!(Amount::from_cents(123_456_789).to_string(), "R$ 1.234.567,89");
        assert_eq!(Amount::from_cents(-100_000).to_string(), "-R$ 1.000,00");
    }

    #[test]
    fn amount_parse_accepts_dot_or_comma() {
        assert_eq!("150".parse::<Amount>().unwrap().cents(), 15_000);
        assert_eq!("150.5".parse::<Amount>().unwrap().cents(), 15_050);
        assert_eq!("150,55".parse::<Amount>().unwrap().cents(), 15_055);
        assert_eq!("150.000".parse::<Amount>().unwrap().cents(), 15_000);
        assert_eq!("-0.01".parse::<Amount>().unwrap().cents(), -1);
    }

    #[test]
    fn amount_parse_rejects_garbage() {
        assert_eq!("".parse::<Amount>(), Err(AmountError::Empty));
        assert!("12.345".parse::<Amount>().is_err());
        assert!("1.2.3".parse::<Amount>().is_err());
        assert!("abc".parse::<Amount>().is_err());
    }

    #[test]
    fn entry_decodes_service_payload() {
        let json = r#"{
            "id": 7,
            "descricao": "Aluguel",
            "mes": 3,
            "ano": 2023,
            "valor": 1234.56,
            "tipo": "DESPESA",
            "status": "PENDENTE",
            "usuario": 1
        }"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.amount.cents(), 123_456);
        assert_eq!(entry.kind, EntryKind::Expense);
        assert_eq!(entry.status, EntryStatus::Pending);
        assert_eq!(entry.user_id, Some(1));
    }

    #[test]
    fn entry_accepts_string_amount_and_missing_owner() {
        let json = r#"{"id":1,"descricao":"Salário","mes":1,"ano":2023,
            "valor":"5000.00","tipo":"RECEITA","status":"EFETIVADO"}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.amount.cents(), 500_000);
        assert_eq!(entry.user_id, None);
    }

    #[test]
    fn filter_omits_blank_optionals() {
        let filter = EntryFilter {
            year: "2023".to_string(),
            month: None,
            kind: None,
            description: None,
            user_id: 3,
        };
        let value = serde_json::to_value(&filter).unwrap();
        assert_eq!(value, serde_json::json!({ "ano": "2023", "usuario": 3 }));
    }

    #[test]
    fn selector_lists_start_with_blank_choice() {
        let months = month_options();
        assert_eq!(months.len(), 13);
        assert_eq!(months[0].value, None);
        assert_eq!(months[12].value, Some(12));
        assert_eq!(months[12].label, "Dezembro");

        let kinds = kind_options();
        assert_eq!(kinds.len(), 3);
        assert_eq!(kinds[1].value, Some(EntryKind::Expense));
        assert_eq!(month_label(0), None);
        assert_eq!(month_label(3), Some("Março"));
    }
}
