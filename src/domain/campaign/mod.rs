use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Active,
    Paused,
    Completed,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum IncentiveKind {
    Token { amount: Decimal },
    Nft { collection: String },
    Access { grant: String },
}

/// A reward handed out when `trigger` fires for a recipient.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Incentive {
    #[serde(flatten)]
    pub kind: IncentiveKind,
    pub trigger: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub status: CampaignStatus,
    pub segment_ids: Vec<Uuid>,
    pub incentives: Vec<Incentive>,
}

impl Campaign {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: CampaignStatus::default(),
            segment_ids: Vec::new(),
            incentives: Vec::new(),
        }
    }

    pub fn target(&mut self, segment: Uuid) {
        if !self.segment_ids.contains(&segment) {
            self.segment_ids.push(segment);
        }
    }

    /// Total token amount promised per recipient across token incentives.
    pub fn token_reward(&self) -> Decimal {
        self.incentives
            .iter()
            .filter_map(|incentive| match incentive.kind {
                IncentiveKind::Token { amount } => Some(amount),
                _ => None,
            })
            .sum()
    }
}
