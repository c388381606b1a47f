//! Library side of the md2doc command-line tool.
//!
//! Holds the inspect transforms so they can be unit tested without spawning
//! the binary.

pub mod transforms;
