//! Partners, funding sources and payment modes
//!
//! Every cash movement records who put the money in (for income) or who
//! actually handed the money over (for expenses and labour payments). The
//! two named partners are a closed set; the shared project fund is a separate
//! variant rather than a third "partner".

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the named partners funding the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Partner {
    MasterMujahir,
    DrSalik,
}

impl Partner {
    /// The partners whose personal spending counts as implicit income
    pub const NAMED: [Partner; 2] = [Partner::MasterMujahir, Partner::DrSalik];

    pub fn name(&self) -> &'static str {
        match self {
            Self::MasterMujahir => "Master Mujahir",
            Self::DrSalik => "Dr. Salik",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "mastermujahir" | "mujahir" => Some(Self::MasterMujahir),
            "drsalik" | "salik" => Some(Self::DrSalik),
            _ => None,
        }
    }
}

impl fmt::Display for Partner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Where the money for a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FundingSource {
    /// The shared project balance
    Pool,
    /// Paid personally by a named partner
    Partner(Partner),
    /// Anyone else
    Other,
}

const POOL_LABEL: &str = "Project Balance";
const OTHER_LABEL: &str = "Other";

impl FundingSource {
    /// The named partner behind this record, if any.
    ///
    /// This is the single definition of the implicit-income rule: an outflow
    /// for which this returns `Some` is also that partner's contribution.
    pub fn named_partner(&self) -> Option<Partner> {
        match self {
            Self::Partner(p) => Some(*p),
            Self::Pool | Self::Other => None,
        }
    }

    pub fn is_partner(&self, partner: Partner) -> bool {
        self.named_partner() == Some(partner)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pool => POOL_LABEL,
            Self::Partner(p) => p.name(),
            Self::Other => OTHER_LABEL,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        if let Some(partner) = Partner::parse(s) {
            return Some(Self::Partner(partner));
        }
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "projectbalance" | "pool" | "project" | "balance" => Some(Self::Pool),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl Default for FundingSource {
    fn default() -> Self {
        Self::Pool
    }
}

impl From<Partner> for FundingSource {
    fn from(p: Partner) -> Self {
        Self::Partner(p)
    }
}

impl fmt::Display for FundingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl TryFrom<String> for FundingSource {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s).ok_or_else(|| format!("unknown funding source '{}'", s))
    }
}

impl From<FundingSource> for String {
    fn from(source: FundingSource) -> Self {
        source.label().to_string()
    }
}

/// How the money moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMode {
    #[default]
    Cash,
    Bank,
    #[serde(rename = "UPI")]
    Upi,
    Check,
}

impl PaymentMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Some(Self::Cash),
            "bank" | "bank transfer" | "neft" | "imps" => Some(Self::Bank),
            "upi" | "phonepe" | "gpay" => Some(Self::Upi),
            "check" | "cheque" => Some(Self::Check),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Cash => "Cash",
            Self::Bank => "Bank",
            Self::Upi => "UPI",
            Self::Check => "Check",
        };
        f.pad(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_partner_rule() {
        assert_eq!(
            FundingSource::Partner(Partner::DrSalik).named_partner(),
            Some(Partner::DrSalik)
        );
        assert_eq!(FundingSource::Pool.named_partner(), None);
        assert_eq!(FundingSource::Other.named_partner(), None);
    }

    #[test]
    fn test_wire_labels() {
        let json = serde_json::to_string(&FundingSource::Partner(Partner::MasterMujahir)).unwrap();
        assert_eq!(json, "\"Master Mujahir\"");

        let pool: FundingSource = serde_json::from_str("\"Project Balance\"").unwrap();
        assert_eq!(pool, FundingSource::Pool);

        let salik: FundingSource = serde_json::from_str("\"Dr. Salik\"").unwrap();
        assert_eq!(salik, FundingSource::Partner(Partner::DrSalik));

        assert!(serde_json::from_str::<FundingSource>("\"Someone\"").is_err());
    }

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!(Partner::parse("salik"), Some(Partner::DrSalik));
        assert_eq!(Partner::parse("Master-Mujahir"), Some(Partner::MasterMujahir));
        assert_eq!(FundingSource::parse("pool"), Some(FundingSource::Pool));
        assert_eq!(FundingSource::parse("other"), Some(FundingSource::Other));
    }

    #[test]
    fn test_payment_mode_wire() {
        assert_eq!(serde_json::to_string(&PaymentMode::Upi).unwrap(), "\"UPI\"");
        assert_eq!(PaymentMode::parse("cheque"), Some(PaymentMode::Check));
    }
}
