//! meetnote: meeting notes as files.
//!
//! Notes live in a directory tree under a single store root, grouped either
//! by topic domain or by date. The identity of a note (name, date,
//! dot-separated domain) is derived entirely from its path, so the path
//! codec is bidirectional and the two layouts are interchangeable through a
//! crash-safe migration. Checklist lines inside notes are queryable as
//! tasks.
//!
//! # Architecture
//!
//! - [`core::meeting`]: identity, grouping strategy, path codec, queries
//! - [`core::store`]: open/list/remove over the root, persisted metadata
//! - [`core::migration`]: rename/backup migration between layouts
//! - [`core::task`]: checklist extraction with parallel scans
//! - [`core::pool`]: fixed-capacity job gate
//! - [`core::driver`], [`core::template`], [`core::config`]: the edges —
//!   editor invocation, note templates, configuration
//!
//! Mutating operations assume a single writer; callers serialize concurrent
//! mutations of the same store root themselves.

pub mod core;
