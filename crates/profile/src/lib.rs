//! Candidate and slot records, and their canonical text representations.
//!
//! This crate is the entry boundary of the allocation pipeline: the storage
//! collaborator hands over [`CandidateRecord`] and [`SlotRecord`] values, and
//! [`candidate_text`] / [`slot_text`] turn them into the single string that
//! gets embedded downstream.
//!
//! The field order and labels inside the rendered text are a compatibility
//! contract: changing either changes the embeddings of every record, so any
//! such change must be treated as a breaking change of the matching pipeline.
//!
//! An entity whose attributes are all absent renders to an empty string.
//! That is not an error; callers must treat it as "no embeddable content"
//! and exclude the entity from indexing and scoring.

pub mod record;
pub mod text;

pub use crate::record::{CandidateRecord, SlotRecord};
pub use crate::text::{candidate_text, slot_text, FIELD_SEPARATOR};
