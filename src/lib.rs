//! # CloudSweep
//!
//! A multi-criteria duplicate finder and file manager for storage backends.
//!
//! CloudSweep scans a storage namespace for duplicate files and exposes
//! list/copy/upload/delete operations over the same backend. It features:
//!
//! - **Multi-Criteria Detection**: content hash, filename, size-with-tolerance,
//!   image dimensions, and a combined intersection of all requested criteria
//! - **Pluggable Backends**: any object store that can list, fetch, and delete
//!   keys; local-directory and in-memory backends ship in-tree
//! - **Deletion Strategies**: keep the newest, oldest, largest, or smallest
//!   member of a duplicate group and drop the rest
//! - **CLI as Unix Citizen**: JSON output, pipe-friendly, cron-schedulable
//! - **Request-Scoped**: no index, no daemon — every scan is fresh

pub mod api;
pub mod cli;
pub mod common;
pub mod duplicates;
pub mod imaging;
pub mod storage;
