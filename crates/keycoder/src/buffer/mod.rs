//! Byte buffers used by the codec.
//!
//! - [`Writer`] - growable, append-only accumulator that is finalized into an
//!   immutable byte sequence
//! - [`Reader`] - forward-only cursor over borrowed bytes
//!
//! Both are created per operation. A writer is passed by `&mut` to the
//! encoding helpers, so no view of its storage can survive an append that
//! might reallocate it.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;
