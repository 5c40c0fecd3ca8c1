//! Named encoding strategies (scenarios).
//!
//! Every scenario covers the same seven fields. Scenarios differ only in how
//! the calendar fields are represented and in the network head of the two
//! scaled numeric fields, so each one is a small declarative table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use txseq_model::{EncodingCode, Field, OneHotKind, TensorSpace};

use crate::error::{LayoutError, Result};
use crate::loss::{LossTable, loss_and_activation};
use crate::scheme::EncodingScheme;

/// Fields covered by every scenario.
pub const SCENARIO_FIELDS: [Field; 7] = [
    Field::Day,
    Field::Dtme,
    Field::Dow,
    Field::Month,
    Field::TdSc,
    Field::LogAmountSc,
    Field::TcodeNum,
];

/// Encoding scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EncodingStrategy {
    /// Clock input, clock-integer target, one-hot calendar head.
    #[default]
    Banksformer,
    /// [`EncodingStrategy::Banksformer`] with a plain `log_amount_sc` head.
    BanksformerV2,
    /// One-hot calendar input.
    DateOneHot,
    /// Radial-basis calendar input.
    DateRbf,
    /// Clock encoding in all three spaces.
    DateClock,
    /// [`EncodingStrategy::DateClock`] with its `log_amount_sc` head restated.
    DateClockV2,
}

#[derive(Debug, Clone, Copy)]
enum CalendarCode {
    Fixed(EncodingCode),
    /// One-hot over the field's own period.
    PerFieldOneHot,
}

impl CalendarCode {
    fn resolve(self, field: Field) -> Option<EncodingCode> {
        match self {
            CalendarCode::Fixed(code) => Some(code),
            CalendarCode::PerFieldOneHot => EncodingCode::calendar_one_hot(field),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct StrategyTable {
    calendar_input: CalendarCode,
    calendar_target: CalendarCode,
    calendar_net: CalendarCode,
    td_net: EncodingCode,
    log_amount_net: EncodingCode,
}

const BANKSFORMER: StrategyTable = StrategyTable {
    calendar_input: CalendarCode::Fixed(EncodingCode::Clock),
    calendar_target: CalendarCode::Fixed(EncodingCode::ClockInteger),
    calendar_net: CalendarCode::PerFieldOneHot,
    td_net: EncodingCode::DistCont,
    log_amount_net: EncodingCode::DistCont,
};

const DATE_CLOCK: StrategyTable = StrategyTable {
    calendar_input: CalendarCode::Fixed(EncodingCode::Clock),
    calendar_target: CalendarCode::Fixed(EncodingCode::Clock),
    calendar_net: CalendarCode::Fixed(EncodingCode::Clock),
    td_net: EncodingCode::DistCont,
    log_amount_net: EncodingCode::DistCont,
};

impl EncodingStrategy {
    pub const ALL: [EncodingStrategy; 6] = [
        EncodingStrategy::Banksformer,
        EncodingStrategy::BanksformerV2,
        EncodingStrategy::DateOneHot,
        EncodingStrategy::DateRbf,
        EncodingStrategy::DateClock,
        EncodingStrategy::DateClockV2,
    ];

    /// Scenario identifier.
    pub fn id(&self) -> &'static str {
        match self {
            EncodingStrategy::Banksformer => "banksformer",
            EncodingStrategy::BanksformerV2 => "banksformer_v2",
            EncodingStrategy::DateOneHot => "dateonehot",
            EncodingStrategy::DateRbf => "daterbf",
            EncodingStrategy::DateClock => "dateclock",
            EncodingStrategy::DateClockV2 => "dateclock_v2",
        }
    }

    /// Comma-separated list of every scenario id.
    pub fn known_ids() -> String {
        Self::ALL.map(|s| s.id()).join(", ")
    }

    fn table(&self) -> StrategyTable {
        match self {
            EncodingStrategy::Banksformer => BANKSFORMER,
            EncodingStrategy::BanksformerV2 => StrategyTable {
                log_amount_net: EncodingCode::Raw,
                ..BANKSFORMER
            },
            EncodingStrategy::DateOneHot => StrategyTable {
                calendar_input: CalendarCode::PerFieldOneHot,
                ..BANKSFORMER
            },
            EncodingStrategy::DateRbf => StrategyTable {
                calendar_input: CalendarCode::Fixed(EncodingCode::Rbf),
                ..BANKSFORMER
            },
            EncodingStrategy::DateClock => DATE_CLOCK,
            EncodingStrategy::DateClockV2 => StrategyTable {
                log_amount_net: EncodingCode::DistCont,
                ..DATE_CLOCK
            },
        }
    }

    /// Encoding map of one tensor space.
    pub fn encoding(&self, space: TensorSpace) -> EncodingScheme {
        let table = self.table();
        let calendar = match space {
            TensorSpace::Input => table.calendar_input,
            TensorSpace::Target => table.calendar_target,
            TensorSpace::Network => table.calendar_net,
        };
        SCENARIO_FIELDS
            .into_iter()
            .filter_map(|field| {
                let code = match (field, space) {
                    (Field::TcodeNum, TensorSpace::Target) => EncodingCode::Raw,
                    (Field::TcodeNum, _) => EncodingCode::OneHot(OneHotKind::Tcode),
                    (Field::TdSc, TensorSpace::Network) => table.td_net,
                    (Field::LogAmountSc, TensorSpace::Network) => table.log_amount_net,
                    (Field::TdSc | Field::LogAmountSc, _) => EncodingCode::Raw,
                    _ => calendar.resolve(field)?,
                };
                Some((field, code))
            })
            .collect()
    }

    pub fn input_encoding(&self) -> EncodingScheme {
        self.encoding(TensorSpace::Input)
    }

    pub fn target_encoding(&self) -> EncodingScheme {
        self.encoding(TensorSpace::Target)
    }

    pub fn net_encoding(&self) -> EncodingScheme {
        self.encoding(TensorSpace::Network)
    }

    /// Loss kinds and activations for `net`.
    pub fn loss_and_activation(&self, net: &EncodingScheme) -> Result<LossTable> {
        loss_and_activation(net)
    }
}

/// Resolves a scenario identifier.
pub fn select_strategy(id: &str) -> Result<EncodingStrategy> {
    let trimmed = id.trim();
    EncodingStrategy::ALL
        .into_iter()
        .find(|strategy| strategy.id() == trimmed)
        .ok_or_else(|| LayoutError::UnknownScenario {
            id: id.to_string(),
            known: EncodingStrategy::known_ids(),
        })
}

impl fmt::Display for EncodingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for EncodingStrategy {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        select_strategy(s)
    }
}

impl Serialize for EncodingStrategy {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for EncodingStrategy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        select_strategy(&s).map_err(serde::de::Error::custom)
    }
}
