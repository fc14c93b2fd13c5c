//! The push-oriented trace stream decoder.
//!
//! ## Wire layout
//!
//! A stream is a fixed 29-byte packet header followed by event records:
//!
//! | offset | size | field            | required value                  |
//! |--------|------|------------------|---------------------------------|
//! | 0      | 4    | CTF magic        | `c1 1f fc c1`                   |
//! | 4      | 16   | metadata UUID    | [`TRACE_UUID`], literal match   |
//! | 20     | 8    | thread id        | u64 LE, recorded                |
//! | 28     | 1    | compression mode | only `0x00` accepted            |
//!
//! Every event record is a u64 LE timestamp, a one-byte event id, and an
//! id-specific payload whose length is embedded in the payload itself
//! (length-prefixed or NUL-terminated strings, counted sub-records). All
//! integers are little-endian.

use flint_common::{ByteReader, Incomplete};

use crate::event::{
    InitEvent, LspClientToServerMessageEvent, PacketHeader, ProcessIdEvent, TraceStreamVisitor,
    VectorMaxSizeHistogramByOwnerEntry, VectorMaxSizeHistogramByOwnerEvent,
    VectorMaxSizeHistogramEntry, VscodeDocumentChange, VscodeDocumentChangedEvent,
    VscodeDocumentClosedEvent, VscodeDocumentOpenedEvent, VscodeDocumentSyncEvent, VscodePosition,
    VscodeRange,
};

/// The four-byte sentinel opening every stream (Common Trace Format).
pub const CTF_MAGIC: [u8; 4] = [0xc1, 0x1f, 0xfc, 0xc1];

/// The sixteen-byte metadata UUID identifying a flint trace stream.
///
/// Validated as a literal byte sequence: the value is not a well-formed
/// RFC 4122 UUID, so no version/variant bits are masked before comparison.
pub const TRACE_UUID: [u8; 16] = [
    0x71, 0x75, 0x69, 0x63, 0x6b, 0x2d, 0x5f, 0x49, //
    0x3e, 0xb9, 0x6c, 0x69, 0x6e, 0x74, 0x6a, 0x73,
];

/// Total size of the packet header: magic + UUID + thread id + compression.
pub const PACKET_HEADER_SIZE: usize = 4 + 16 + 8 + 1;

// ── Event id constants ───────────────────────────────────────────────────

const EVENT_ID_INIT: u8 = 0x01;
const EVENT_ID_VSCODE_DOCUMENT_OPENED: u8 = 0x02;
const EVENT_ID_VSCODE_DOCUMENT_CLOSED: u8 = 0x03;
const EVENT_ID_VSCODE_DOCUMENT_CHANGED: u8 = 0x04;
const EVENT_ID_VSCODE_DOCUMENT_SYNC: u8 = 0x05;
const EVENT_ID_LSP_CLIENT_TO_SERVER_MESSAGE: u8 = 0x06;
const EVENT_ID_VECTOR_MAX_SIZE_HISTOGRAM_BY_OWNER: u8 = 0x07;
const EVENT_ID_PROCESS_ID: u8 = 0x08;

/// Decoder state. `Errored` is terminal.
enum ReaderState {
    AwaitHeader,
    AwaitEvent,
    Errored,
}

/// Why an event record could not be decoded.
enum EventParseError {
    /// The record is not fully buffered yet; retry after more input.
    Incomplete,
    /// The record's event id is not in the known set. Fatal.
    UnknownEventId(u8),
}

impl From<Incomplete> for EventParseError {
    fn from(_: Incomplete) -> Self {
        EventParseError::Incomplete
    }
}

/// Incremental decoder for one trace stream.
///
/// Feed bytes with [`append_bytes`](Self::append_bytes) in chunks of any
/// size — down to one byte at a time across every field boundary — and the
/// visitor sees the identical callback sequence. The reader buffers
/// unconsumed input and drops each record's bytes once its callback
/// returns, so memory stays bounded by the largest in-flight record.
pub struct TraceStreamReader<V> {
    visitor: V,
    buffer: Vec<u8>,
    state: ReaderState,
}

impl<V: TraceStreamVisitor> TraceStreamReader<V> {
    /// Create a reader that delivers records to `visitor`.
    pub fn new(visitor: V) -> Self {
        Self {
            visitor,
            buffer: Vec::new(),
            state: ReaderState::AwaitHeader,
        }
    }

    /// The wrapped visitor.
    pub fn visitor(&self) -> &V {
        &self.visitor
    }

    /// Consume the reader and hand back its visitor.
    pub fn into_visitor(self) -> V {
        self.visitor
    }

    /// Push the next chunk of the stream.
    ///
    /// Parses every complete record now buffered, invoking the visitor
    /// synchronously for each, and returns once no complete record
    /// remains. After a structural error the reader is terminal and this
    /// method discards its input.
    pub fn append_bytes(&mut self, data: &[u8]) {
        if matches!(self.state, ReaderState::Errored) {
            return;
        }
        self.buffer.extend_from_slice(data);

        // Move the buffer out so record parsing can lend byte views to the
        // visitor while it borrows `self.visitor` mutably.
        let buffer = std::mem::take(&mut self.buffer);
        let mut cursor = 0;
        loop {
            match self.state {
                ReaderState::AwaitHeader => {
                    if buffer.len() - cursor < PACKET_HEADER_SIZE {
                        break;
                    }
                    let header = &buffer[cursor..cursor + PACKET_HEADER_SIZE];
                    if self.parse_packet_header(header).is_err() {
                        self.state = ReaderState::Errored;
                        break;
                    }
                    cursor += PACKET_HEADER_SIZE;
                }
                ReaderState::AwaitEvent => {
                    let mut reader = ByteReader::new(&buffer[cursor..]);
                    match Self::parse_event(&mut reader, &mut self.visitor) {
                        Ok(()) => cursor += reader.position(),
                        Err(EventParseError::Incomplete) => break,
                        Err(EventParseError::UnknownEventId(event_id)) => {
                            self.visitor.visit_error_unknown_event_id(event_id);
                            self.state = ReaderState::Errored;
                            break;
                        }
                    }
                }
                ReaderState::Errored => break,
            }
        }

        if !matches!(self.state, ReaderState::Errored) {
            // Keep only the unconsumed suffix.
            self.buffer = buffer;
            self.buffer.drain(..cursor);
        }
    }

    /// Validate the 29-byte packet header and emit the header callback.
    ///
    /// On a mismatch, emits the corresponding error callback and returns
    /// `Err`; the caller makes the error state sticky.
    fn parse_packet_header(&mut self, header: &[u8]) -> Result<(), ()> {
        if header[0..4] != CTF_MAGIC {
            self.visitor.visit_error_invalid_magic();
            return Err(());
        }
        if header[4..20] != TRACE_UUID {
            self.visitor.visit_error_invalid_uuid();
            return Err(());
        }
        let mut thread_id_raw = [0u8; 8];
        thread_id_raw.copy_from_slice(&header[20..28]);
        let thread_id = u64::from_le_bytes(thread_id_raw);
        let compression_mode = header[28];
        if compression_mode != 0x00 {
            self.visitor
                .visit_error_unsupported_compression_mode(compression_mode);
            return Err(());
        }
        self.visitor.visit_packet_header(PacketHeader { thread_id });
        self.state = ReaderState::AwaitEvent;
        Ok(())
    }

    /// Decode one event record and deliver it.
    ///
    /// The visitor is only invoked once the whole record has decoded; an
    /// `Incomplete` result consumes nothing (the caller discards the
    /// reader's position) and the record is re-attempted on the next
    /// append.
    fn parse_event(
        reader: &mut ByteReader<'_>,
        visitor: &mut V,
    ) -> Result<(), EventParseError> {
        let timestamp = reader.u64_le()?;
        let event_id = reader.u8()?;
        match event_id {
            EVENT_ID_INIT => {
                let version = reader.c_string()?;
                visitor.visit_init_event(InitEvent { timestamp, version });
            }
            EVENT_ID_VSCODE_DOCUMENT_OPENED => {
                let document_id = reader.u64_le()?;
                let uri = reader.utf16_len8()?;
                let language_id = reader.utf16_len8()?;
                let content = reader.utf16_len8()?;
                visitor.visit_vscode_document_opened_event(VscodeDocumentOpenedEvent {
                    timestamp,
                    document_id,
                    uri,
                    language_id,
                    content,
                });
            }
            EVENT_ID_VSCODE_DOCUMENT_CLOSED => {
                let document_id = reader.u64_le()?;
                let uri = reader.utf16_len8()?;
                let language_id = reader.utf16_len8()?;
                visitor.visit_vscode_document_closed_event(VscodeDocumentClosedEvent {
                    timestamp,
                    document_id,
                    uri,
                    language_id,
                });
            }
            EVENT_ID_VSCODE_DOCUMENT_CHANGED => {
                let document_id = reader.u64_le()?;
                let change_count = reader.u64_le()?;
                let mut changes = Vec::new();
                for _ in 0..change_count {
                    let start_line = reader.u64_le()?;
                    let start_character = reader.u64_le()?;
                    let end_line = reader.u64_le()?;
                    let end_character = reader.u64_le()?;
                    let range_offset = reader.u64_le()?;
                    let range_length = reader.u64_le()?;
                    let text = reader.utf16_len8()?;
                    changes.push(VscodeDocumentChange {
                        range: VscodeRange {
                            start: VscodePosition {
                                line: start_line,
                                character: start_character,
                            },
                            end: VscodePosition {
                                line: end_line,
                                character: end_character,
                            },
                        },
                        range_offset,
                        range_length,
                        text,
                    });
                }
                visitor.visit_vscode_document_changed_event(VscodeDocumentChangedEvent {
                    timestamp,
                    document_id,
                    changes,
                });
            }
            EVENT_ID_VSCODE_DOCUMENT_SYNC => {
                let document_id = reader.u64_le()?;
                let uri = reader.utf16_len8()?;
                let language_id = reader.utf16_len8()?;
                let content = reader.utf16_len8()?;
                visitor.visit_vscode_document_sync_event(VscodeDocumentSyncEvent {
                    timestamp,
                    document_id,
                    uri,
                    language_id,
                    content,
                });
            }
            EVENT_ID_LSP_CLIENT_TO_SERVER_MESSAGE => {
                let body = reader.utf8_len8()?;
                visitor.visit_lsp_client_to_server_message_event(LspClientToServerMessageEvent {
                    timestamp,
                    body,
                });
            }
            EVENT_ID_VECTOR_MAX_SIZE_HISTOGRAM_BY_OWNER => {
                let entry_count = reader.u64_le()?;
                let mut entries = Vec::new();
                for _ in 0..entry_count {
                    let owner = reader.c_string()?;
                    let max_size_count = reader.u64_le()?;
                    let mut max_size_entries = Vec::new();
                    for _ in 0..max_size_count {
                        let max_size = reader.u64_le()?;
                        let count = reader.u64_le()?;
                        max_size_entries.push(VectorMaxSizeHistogramEntry { max_size, count });
                    }
                    entries.push(VectorMaxSizeHistogramByOwnerEntry {
                        owner,
                        max_size_entries,
                    });
                }
                visitor.visit_vector_max_size_histogram_by_owner_event(
                    VectorMaxSizeHistogramByOwnerEvent { timestamp, entries },
                );
            }
            EVENT_ID_PROCESS_ID => {
                let process_id = reader.u64_le()?;
                visitor.visit_process_id_event(ProcessIdEvent {
                    timestamp,
                    process_id,
                });
            }
            unknown => return Err(EventParseError::UnknownEventId(unknown)),
        }
        Ok(())
    }
}
