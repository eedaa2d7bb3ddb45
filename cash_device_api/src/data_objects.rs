use psg_common::{MajorUnits, MinorUnits};
use serde::{Serialize, Serializer};

/// Face values from this amount (in minor units) upwards are notes. Everything below is a coin.
pub const BANKNOTE_THRESHOLD: MinorUnits = MinorUnits::new(2000.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashKind {
    Banknote,
    Coin,
}

impl CashKind {
    pub fn for_face_value(fv: MinorUnits) -> Self {
        if fv >= BANKNOTE_THRESHOLD {
            Self::Banknote
        } else {
            Self::Coin
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::Banknote => 1,
            Self::Coin => 2,
        }
    }
}

impl Serialize for CashKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// One line of the generic balances response: how many of a given note or coin the terminal holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DenominationEntry {
    /// The face value as a two-decimal label, e.g. `"20.00"`
    pub denom: String,
    pub value: MajorUnits,
    /// Pieces that can be paid out as change
    pub qty: i64,
    /// Pieces held in the stacker
    #[serde(rename = "inStacker")]
    pub in_stacker: i64,
    #[serde(rename = "type")]
    pub kind: CashKind,
}

impl DenominationEntry {
    pub fn new(fv: MinorUnits) -> Self {
        let value = fv.to_major();
        Self { denom: value.label(), value, qty: 0, in_stacker: 0, kind: CashKind::for_face_value(fv) }
    }
}
