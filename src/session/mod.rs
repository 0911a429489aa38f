//! Import flow for one recipient file at a time.
//!
//! A session moves from [`ImportState::AwaitingFile`] to
//! [`ImportState::Previewing`] once a file has been read and classified.
//! Reads are asynchronous on the caller's side, so every read is stamped
//! with a [`ReadTicket`]; a completion whose ticket is older than the most
//! recent read (or a cancel) is discarded instead of overwriting the newer
//! preview.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    domain::{
        error::{Error, Result},
        import::{ImportSummary, Importer},
        table::CsvTable,
    },
    store::SegmentStore,
};

/// Receives the outcome of a session. These are the only ways a preview
/// leaves the session.
pub trait ImportHandler {
    fn on_commit(&mut self, summary: ImportSummary) -> Result<()>;
    fn on_cancel(&mut self) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportState {
    AwaitingFile,
    Previewing(ImportSummary),
}

/// Identifies one file read. Only the ticket of the latest read is honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTicket {
    generation: u64,
}

#[derive(Debug)]
pub struct ImportSession {
    importer: Importer,
    generation: u64,
    state: ImportState,
}

impl ImportSession {
    pub fn new(importer: Importer) -> Self {
        Self {
            importer,
            generation: 0,
            state: ImportState::AwaitingFile,
        }
    }

    pub fn state(&self) -> &ImportState {
        &self.state
    }

    pub fn summary(&self) -> Option<&ImportSummary> {
        match &self.state {
            ImportState::Previewing(summary) => Some(summary),
            ImportState::AwaitingFile => None,
        }
    }

    /// Starts a new read, superseding any read still in flight.
    pub fn begin_read(&mut self) -> ReadTicket {
        self.generation += 1;
        debug!(generation = self.generation, "file read started");

        ReadTicket {
            generation: self.generation,
        }
    }

    /// Applies the text of a finished read. Returns `false` when the ticket
    /// is stale and the text was ignored.
    pub fn complete(&mut self, ticket: ReadTicket, text: &str) -> bool {
        self.complete_table(ticket, &CsvTable::parse(text))
    }

    pub fn complete_table(&mut self, ticket: ReadTicket, table: &CsvTable) -> bool {
        if ticket.generation != self.generation {
            warn!(
                stale = ticket.generation,
                current = self.generation,
                "discarding superseded file read"
            );
            return false;
        }

        self.state = ImportState::Previewing(self.importer.summarize_table(table));
        true
    }

    /// Drops the preview and any in-flight read.
    pub fn cancel(&mut self, handler: &mut impl ImportHandler) {
        self.generation += 1;
        self.state = ImportState::AwaitingFile;
        info!("import cancelled");
        handler.on_cancel();
    }

    /// Hands the preview to `handler`. The session goes back to waiting for
    /// a file once the handler accepts it.
    pub fn commit(&mut self, handler: &mut impl ImportHandler) -> Result<()> {
        let summary = match &self.state {
            ImportState::Previewing(summary) if summary.can_commit() => summary.clone(),
            _ => return Err(Error::NothingToCommit),
        };

        info!(valid = summary.valid_wallets, "committing import");
        handler.on_commit(summary)?;

        self.generation += 1;
        self.state = ImportState::AwaitingFile;
        Ok(())
    }
}

impl Default for ImportSession {
    fn default() -> Self {
        Self::new(Importer::default())
    }
}

/// Commits valid recipients into an existing segment.
pub struct SegmentImport<'a, S> {
    store: &'a mut S,
    segment: Uuid,
    added: usize,
}

impl<'a, S: SegmentStore> SegmentImport<'a, S> {
    pub fn new(store: &'a mut S, segment: Uuid) -> Self {
        Self {
            store,
            segment,
            added: 0,
        }
    }

    /// Wallets added by the last commit.
    pub fn added(&self) -> usize {
        self.added
    }
}

impl<S: SegmentStore> ImportHandler for SegmentImport<'_, S> {
    fn on_commit(&mut self, summary: ImportSummary) -> Result<()> {
        let segment = self.store.segment_mut(self.segment)?;
        self.added = segment.add_recipients(summary.valid_rows().map(|row| row.wallet.clone()));

        info!(segment = %self.segment, added = self.added, "recipients imported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::segment::Segment, store::InMemoryStore};

    const FIRST: &str = "wallet,allocation\n0x0000000000000000000000000000000000000001,1";
    const SECOND: &str = "wallet,allocation\n0x0000000000000000000000000000000000000002,2\n\
                          0x0000000000000000000000000000000000000003,3";

    #[derive(Default)]
    struct Recorder {
        committed: Vec<ImportSummary>,
        cancelled: usize,
    }

    impl ImportHandler for Recorder {
        fn on_commit(&mut self, summary: ImportSummary) -> Result<()> {
            self.committed.push(summary);
            Ok(())
        }

        fn on_cancel(&mut self) {
            self.cancelled += 1;
        }
    }

    #[test]
    fn starts_awaiting_file() {
        let session = ImportSession::default();

        assert_eq!(session.state(), &ImportState::AwaitingFile);
        assert!(session.summary().is_none());
    }

    #[test]
    fn completed_read_moves_to_previewing() {
        let mut session = ImportSession::default();
        let ticket = session.begin_read();

        assert!(session.complete(ticket, FIRST));
        assert_eq!(session.summary().unwrap().valid_wallets, 1);
    }

    #[test]
    fn stale_read_does_not_overwrite_newer_one() {
        let mut session = ImportSession::default();
        let slow = session.begin_read();
        let fast = session.begin_read();

        assert!(session.complete(fast, SECOND));
        assert!(!session.complete(slow, FIRST));
        assert_eq!(session.summary().unwrap().total_wallets, 2);
    }

    #[test]
    fn new_file_replaces_preview() {
        let mut session = ImportSession::default();
        let ticket = session.begin_read();
        session.complete(ticket, FIRST);
        let ticket = session.begin_read();
        session.complete(ticket, SECOND);

        assert_eq!(session.summary().unwrap().total_wallets, 2);
    }

    #[test]
    fn cancel_resets_and_invalidates_pending_reads() {
        let mut session = ImportSession::default();
        let mut handler = Recorder::default();
        let ticket = session.begin_read();

        session.cancel(&mut handler);

        assert!(!session.complete(ticket, FIRST));
        assert_eq!(session.state(), &ImportState::AwaitingFile);
        assert_eq!(handler.cancelled, 1);
    }

    #[test]
    fn commit_hands_summary_to_handler() {
        let mut session = ImportSession::default();
        let mut handler = Recorder::default();
        let ticket = session.begin_read();
        session.complete(ticket, SECOND);

        session.commit(&mut handler).unwrap();

        assert_eq!(handler.committed.len(), 1);
        assert_eq!(handler.committed[0].valid_wallets, 2);
        assert_eq!(session.state(), &ImportState::AwaitingFile);
    }

    #[test]
    fn commit_requires_valid_rows() {
        let mut session = ImportSession::default();
        let mut handler = Recorder::default();

        assert!(matches!(session.commit(&mut handler), Err(Error::NothingToCommit)));

        let ticket = session.begin_read();
        session.complete(ticket, "wallet,allocation\n0x123,5");

        assert!(matches!(session.commit(&mut handler), Err(Error::NothingToCommit)));
        assert!(handler.committed.is_empty());
        assert!(session.summary().is_some());
    }

    #[test]
    fn segment_import_appends_valid_wallets() {
        let mut store = InMemoryStore::new();
        let segment = store.insert_segment(Segment::new("holders")).unwrap();
        let mut session = ImportSession::default();
        let ticket = session.begin_read();
        session.complete(
            ticket,
            &format!("{SECOND}\n0xnope,1\n0x0000000000000000000000000000000000000002,9"),
        );

        let mut handler = SegmentImport::new(&mut store, segment);
        session.commit(&mut handler).unwrap();

        assert_eq!(handler.added(), 2);
        assert_eq!(store.segment(segment).unwrap().len(), 2);
    }

    #[test]
    fn segment_import_to_missing_segment_keeps_preview() {
        let mut store = InMemoryStore::new();
        let mut session = ImportSession::default();
        let ticket = session.begin_read();
        session.complete(ticket, FIRST);

        let mut handler = SegmentImport::new(&mut store, Uuid::new_v4());

        assert!(matches!(
            session.commit(&mut handler),
            Err(Error::SegmentNotFound { .. })
        ));
        assert!(session.summary().is_some());
    }
}
