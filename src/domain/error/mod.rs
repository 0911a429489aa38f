use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no valid recipients to commit")]
    NothingToCommit,
    #[error("campaign {id} does not exist")]
    CampaignNotFound { id: Uuid },
    #[error("segment {id} does not exist")]
    SegmentNotFound { id: Uuid },
    #[error("name {name:?} is already taken")]
    DuplicateName { name: String },
}

pub type Result<T> = std::result::Result<T, Error>;
