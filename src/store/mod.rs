use std::collections::HashMap;

use itertools::Itertools;
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    campaign::Campaign,
    error::{Error, Result},
    segment::Segment,
};

pub trait CampaignStore {
    /// Stores a new campaign. Names are unique.
    fn insert_campaign(&mut self, campaign: Campaign) -> Result<Uuid>;
    fn campaign(&self, id: Uuid) -> Result<&Campaign>;
    fn campaign_mut(&mut self, id: Uuid) -> Result<&mut Campaign>;
    /// All campaigns, ordered by name.
    fn campaigns(&self) -> Vec<&Campaign>;
    fn remove_campaign(&mut self, id: Uuid) -> Result<Campaign>;
}

pub trait SegmentStore {
    /// Stores a new segment. Names are unique.
    fn insert_segment(&mut self, segment: Segment) -> Result<Uuid>;
    fn segment(&self, id: Uuid) -> Result<&Segment>;
    fn segment_mut(&mut self, id: Uuid) -> Result<&mut Segment>;
    /// All segments, ordered by name.
    fn segments(&self) -> Vec<&Segment>;
    fn remove_segment(&mut self, id: Uuid) -> Result<Segment>;
}

/// Keeps everything in process memory. Removing a segment also detaches it
/// from every campaign targeting it.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    campaigns: HashMap<Uuid, Campaign>,
    segments: HashMap<Uuid, Segment>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CampaignStore for InMemoryStore {
    fn insert_campaign(&mut self, campaign: Campaign) -> Result<Uuid> {
        if self.campaigns.values().any(|known| known.name == campaign.name) {
            return Err(Error::DuplicateName {
                name: campaign.name,
            });
        }

        let id = campaign.id;
        info!(%id, name = %campaign.name, "campaign created");
        self.campaigns.insert(id, campaign);
        Ok(id)
    }

    fn campaign(&self, id: Uuid) -> Result<&Campaign> {
        self.campaigns
            .get(&id)
            .ok_or(Error::CampaignNotFound { id })
    }

    fn campaign_mut(&mut self, id: Uuid) -> Result<&mut Campaign> {
        self.campaigns
            .get_mut(&id)
            .ok_or(Error::CampaignNotFound { id })
    }

    fn campaigns(&self) -> Vec<&Campaign> {
        self.campaigns
            .values()
            .sorted_by(|a, b| a.name.cmp(&b.name))
            .collect()
    }

    fn remove_campaign(&mut self, id: Uuid) -> Result<Campaign> {
        let campaign = self
            .campaigns
            .remove(&id)
            .ok_or(Error::CampaignNotFound { id })?;

        info!(%id, "campaign removed");
        Ok(campaign)
    }
}

impl SegmentStore for InMemoryStore {
    fn insert_segment(&mut self, segment: Segment) -> Result<Uuid> {
        if self.segments.values().any(|known| known.name == segment.name) {
            return Err(Error::DuplicateName { name: segment.name });
        }

        let id = segment.id;
        info!(%id, name = %segment.name, recipients = segment.len(), "segment created");
        self.segments.insert(id, segment);
        Ok(id)
    }

    fn segment(&self, id: Uuid) -> Result<&Segment> {
        self.segments.get(&id).ok_or(Error::SegmentNotFound { id })
    }

    fn segment_mut(&mut self, id: Uuid) -> Result<&mut Segment> {
        self.segments
            .get_mut(&id)
            .ok_or(Error::SegmentNotFound { id })
    }

    fn segments(&self) -> Vec<&Segment> {
        self.segments
            .values()
            .sorted_by(|a, b| a.name.cmp(&b.name))
            .collect()
    }

    fn remove_segment(&mut self, id: Uuid) -> Result<Segment> {
        let segment = self
            .segments
            .remove(&id)
            .ok_or(Error::SegmentNotFound { id })?;

        for campaign in self.campaigns.values_mut() {
            campaign.segment_ids.retain(|segment_id| *segment_id != id);
        }

        info!(%id, "segment removed");
        Ok(segment)
    }
}
