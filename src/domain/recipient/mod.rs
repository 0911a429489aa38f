use std::str::FromStr;

use rust_decimal::{prelude::FromPrimitive, Decimal};
use serde::Serialize;

/// Number of hex digits following the `0x` prefix of a wallet address.
const ADDRESS_HEX_LEN: usize = 40;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    Valid,
    Invalid,
    Duplicate,
}

impl RowStatus {
    pub fn error_message(self) -> Option<&'static str> {
        match self {
            RowStatus::Valid => None,
            RowStatus::Invalid => Some("Invalid wallet address format"),
            RowStatus::Duplicate => Some("Duplicate wallet address"),
        }
    }
}

/// One classified data row of a recipient file.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ImportRow {
    pub wallet: String,
    pub allocation: Decimal,
    pub status: RowStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImportRow {
    pub fn new(wallet: String, allocation: Decimal, status: RowStatus) -> Self {
        Self {
            wallet,
            allocation,
            status,
            error: status.error_message().map(str::to_owned),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == RowStatus::Valid
    }
}

/// Checks the `0x` + 40 hex digits shape. Digits may be of either case, the
/// prefix may not.
pub fn is_wallet_address(candidate: &str) -> bool {
    candidate.strip_prefix("0x").is_some_and(|digits| {
        digits.len() == ADDRESS_HEX_LEN && hex::decode(digits).is_ok()
    })
}

/// Parses an allocation cell, falling back to zero when the cell holds no
/// number. Scientific notation (`1e3`) is accepted.
///
/// Numbers outside the range of [`Decimal`] saturate: huge magnitudes to
/// `Decimal::MAX`/`MIN`, tiny non-zero ones to the smallest step of the
/// same sign.
pub fn parse_allocation(cell: &str) -> Decimal {
    let cell = cell.trim();

    Decimal::from_str(cell)
        .or_else(|_| Decimal::from_scientific(cell))
        .ok()
        .or_else(|| f64::from_str(cell).ok().map(saturate))
        .unwrap_or(Decimal::ZERO)
}

fn saturate(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }

    match Decimal::from_f64(value) {
        Some(decimal) if !decimal.is_zero() || value == 0.0 => decimal,
        _ if value.abs() >= 1.0 => {
            if value.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        }
        _ => {
            let step = Decimal::new(1, Decimal::MAX_SCALE);
            if value.is_sign_negative() {
                -step
            } else {
                step
            }
        }
    }
}
