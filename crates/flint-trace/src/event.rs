//! Decoded trace records and the visitor that receives them.
//!
//! Ownership of string payloads follows the wire encoding. UTF-8 payloads
//! (the init version, LSP bodies, histogram owners) are borrowed byte
//! views into the reader's buffer and are valid only for the duration of
//! the callback; a visitor that keeps them must copy. UTF-16 payloads
//! (editor document URIs, language ids, text) are decoded into owned
//! `Vec<u16>` code-unit buffers, because the unaligned little-endian wire
//! bytes cannot be lent out as `&[u16]`.

/// The once-per-stream packet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    /// Id of the producer thread that wrote this stream.
    pub thread_id: u64,
}

/// Event `0x01`: the traced process started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitEvent<'a> {
    pub timestamp: u64,
    /// flint version string, UTF-8, without the wire NUL terminator.
    pub version: &'a [u8],
}

/// Event `0x02`: the editor opened a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VscodeDocumentOpenedEvent {
    pub timestamp: u64,
    pub document_id: u64,
    pub uri: Vec<u16>,
    pub language_id: Vec<u16>,
    pub content: Vec<u16>,
}

/// Event `0x03`: the editor closed a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VscodeDocumentClosedEvent {
    pub timestamp: u64,
    pub document_id: u64,
    pub uri: Vec<u16>,
    pub language_id: Vec<u16>,
}

/// A zero-based line/character position in an editor document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VscodePosition {
    pub line: u64,
    pub character: u64,
}

/// A half-open position range in an editor document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VscodeRange {
    pub start: VscodePosition,
    pub end: VscodePosition,
}

/// One edit of a document-changed event.
///
/// All numeric fields are recorded as the editor reported them; the reader
/// treats them as opaque unsigned values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VscodeDocumentChange {
    pub range: VscodeRange,
    pub range_offset: u64,
    pub range_length: u64,
    pub text: Vec<u16>,
}

/// Event `0x04`: the editor edited a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VscodeDocumentChangedEvent {
    pub timestamp: u64,
    pub document_id: u64,
    pub changes: Vec<VscodeDocumentChange>,
}

/// Event `0x05`: full re-sync of a document's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VscodeDocumentSyncEvent {
    pub timestamp: u64,
    pub document_id: u64,
    pub uri: Vec<u16>,
    pub language_id: Vec<u16>,
    pub content: Vec<u16>,
}

/// Event `0x06`: a message the LSP client sent to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LspClientToServerMessageEvent<'a> {
    pub timestamp: u64,
    /// Raw UTF-8 message body (JSON-RPC).
    pub body: &'a [u8],
}

/// One `(max_size, count)` bucket of a vector-size histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorMaxSizeHistogramEntry {
    pub max_size: u64,
    pub count: u64,
}

/// The histogram buckets recorded for one vector owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorMaxSizeHistogramByOwnerEntry<'a> {
    /// UTF-8 name of the owning data structure.
    pub owner: &'a [u8],
    pub max_size_entries: Vec<VectorMaxSizeHistogramEntry>,
}

/// Event `0x07`: per-owner histograms of peak vector sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorMaxSizeHistogramByOwnerEvent<'a> {
    pub timestamp: u64,
    pub entries: Vec<VectorMaxSizeHistogramByOwnerEntry<'a>>,
}

/// Event `0x08`: the traced process reported its pid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessIdEvent {
    pub timestamp: u64,
    pub process_id: u64,
}

/// Receiver for decoded trace records and stream errors.
///
/// [`TraceStreamReader`](crate::TraceStreamReader) calls these methods
/// synchronously from inside `append_bytes`, in stream order. Exactly one
/// `visit_packet_header` precedes any event callback; at most one error
/// callback is made per stream, and nothing follows it.
pub trait TraceStreamVisitor {
    fn visit_packet_header(&mut self, header: PacketHeader);
    fn visit_init_event(&mut self, event: InitEvent<'_>);
    fn visit_vscode_document_opened_event(&mut self, event: VscodeDocumentOpenedEvent);
    fn visit_vscode_document_closed_event(&mut self, event: VscodeDocumentClosedEvent);
    fn visit_vscode_document_changed_event(&mut self, event: VscodeDocumentChangedEvent);
    fn visit_vscode_document_sync_event(&mut self, event: VscodeDocumentSyncEvent);
    fn visit_lsp_client_to_server_message_event(&mut self, event: LspClientToServerMessageEvent<'_>);
    fn visit_vector_max_size_histogram_by_owner_event(
        &mut self,
        event: VectorMaxSizeHistogramByOwnerEvent<'_>,
    );
    fn visit_process_id_event(&mut self, event: ProcessIdEvent);

    /// The stream did not start with the CTF magic bytes.
    fn visit_error_invalid_magic(&mut self);
    /// The stream's metadata UUID is not flint's.
    fn visit_error_invalid_uuid(&mut self);
    /// The header requested a compression mode this reader cannot decode.
    fn visit_error_unsupported_compression_mode(&mut self, mode: u8);
    /// An event record carried an id this reader does not know.
    fn visit_error_unknown_event_id(&mut self, event_id: u8);
}
