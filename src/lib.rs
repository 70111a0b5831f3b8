//! regsim - A terminal client for course-registration simulation
//!
//! Students keep "buckets" of lectures in priority order, rehearse the
//! registration rush with a reaction-time test and read back the results
//! of simulated registration runs. Reads fall back to bundled demo data
//! when the backend cannot be reached.

pub mod domain;
pub mod api;
pub mod sync;
pub mod storage;
pub mod cli;

pub use api::{ApiError, Backend};
pub use domain::{Bucket, BucketElement, Lecture, Student, TestDetail, TestSummary};
pub use sync::{BucketSync, Source};
