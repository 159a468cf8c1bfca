//! Repository trait implementations for the SQLite database.
//!
//! This module contains the implementations of the repository traits defined in
//! `hts-core` for the SQLite database backend.

use crate::{
    Db,
    types::{DateTime, DocumentId},
};
use hts_core::ports::Repository;

mod document;

impl Repository for Db {
    type Error = sqlx::Error;
    type DateTime = DateTime;
    type DocumentId = DocumentId;
}
