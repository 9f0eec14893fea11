//! Recipebox application crate: the `recipebox` CLI and the
//! `recipebox-server` document service.

pub mod server;
