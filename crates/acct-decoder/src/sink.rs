use acct_types::AcctEvent;

use crate::error::DecodeWarning;

/// Receiver for decoded records and warnings, in stream order.
///
/// This is the push-style counterpart to the pull iterators. Storage
/// layers, exporters and test harnesses implement it;
/// [`AcctDecoder::decode_into`](crate::AcctDecoder::decode_into) drives it.
pub trait EventSink {
    fn record(&mut self, event: AcctEvent);

    fn warning(&mut self, warning: DecodeWarning);
}

/// Everything decoded from one stream.
///
/// ```text
/// ┌──────────────────────────────────────────────────────┐
/// │ DecodedFile                                          │
/// │   events:   Vec<AcctEvent>     ← file order          │
/// │   warnings: Vec<DecodeWarning> ← file order          │
/// └──────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Default, PartialEq)]
pub struct DecodedFile {
    pub events: Vec<AcctEvent>,
    pub warnings: Vec<DecodeWarning>,
}

impl DecodedFile {
    /// No warnings were raised.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl EventSink for DecodedFile {
    fn record(&mut self, event: AcctEvent) {
        self.events.push(event);
    }

    fn warning(&mut self, warning: DecodeWarning) {
        self.warnings.push(warning);
    }
}
