//! Advisor slot value object

use serde::{Deserialize, Serialize};

/// One of the five advisor positions (Value Object)
///
/// Slot order is advisor identity: it decides which summarizer parameter an
/// advice is bound to and which generation record documents it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AdvisorSlot {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
}

impl AdvisorSlot {
    /// All slots in advisor order
    pub const ALL: [AdvisorSlot; 5] = [
        AdvisorSlot::First,
        AdvisorSlot::Second,
        AdvisorSlot::Third,
        AdvisorSlot::Fourth,
        AdvisorSlot::Fifth,
    ];

    /// Number of advisors in a run
    pub const COUNT: usize = 5;

    /// Zero-based position
    pub fn index(self) -> usize {
        match self {
            AdvisorSlot::First => 0,
            AdvisorSlot::Second => 1,
            AdvisorSlot::Third => 2,
            AdvisorSlot::Fourth => 3,
            AdvisorSlot::Fifth => 4,
        }
    }

    /// One-based position
    pub fn ordinal(self) -> usize {
        self.index() + 1
    }

    pub fn from_index(index: usize) -> Option<AdvisorSlot> {
        Self::ALL.get(index).copied()
    }

    /// Summarizer parameter carrying this advisor's output
    pub fn param_name(self) -> &'static str {
        match self {
            AdvisorSlot::First => "advice_manager_first",
            AdvisorSlot::Second => "advice_manager_second",
            AdvisorSlot::Third => "advice_manager_third",
            AdvisorSlot::Fourth => "advice_manager_fourth",
            AdvisorSlot::Fifth => "advice_manager_fifth",
        }
    }

    /// Name of the generation record documenting this advisor's call
    pub fn generation_name(self) -> String {
        format!("manager{}", self.ordinal())
    }
}

impl std::fmt::Display for AdvisorSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "manager{}", self.ordinal())
    }
}
