//! Incremental reader for flint's binary diagnostic trace streams.
//!
//! A traced flint process writes one stream per thread: a fixed packet
//! header followed by variable-length event records (editor document
//! activity, LSP traffic, allocation histograms). This crate decodes such
//! a stream as it arrives: the producer pushes byte chunks of any size
//! into [`TraceStreamReader::append_bytes`], and the reader synchronously
//! invokes one [`TraceStreamVisitor`] callback per complete record,
//! buffering partial records across chunk boundaries.
//!
//! Structural problems (wrong magic, wrong stream UUID, an unsupported
//! compression mode, an unknown event id) are reported through dedicated
//! visitor callbacks, at most once per stream; after an error the reader
//! discards all further input.

pub mod event;
pub mod reader;

pub use event::{
    InitEvent, LspClientToServerMessageEvent, PacketHeader, ProcessIdEvent, TraceStreamVisitor,
    VectorMaxSizeHistogramByOwnerEntry, VectorMaxSizeHistogramByOwnerEvent,
    VectorMaxSizeHistogramEntry, VscodeDocumentChange, VscodeDocumentChangedEvent,
    VscodeDocumentClosedEvent, VscodeDocumentOpenedEvent, VscodeDocumentSyncEvent, VscodePosition,
    VscodeRange,
};
pub use reader::{TraceStreamReader, CTF_MAGIC, PACKET_HEADER_SIZE, TRACE_UUID};
