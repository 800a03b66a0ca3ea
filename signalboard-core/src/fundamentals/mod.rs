//! Fundamental panels: indices, company profile, shareholders, valuation, volume.
//!
//! Each reader works on one sheet and fails on its own; the session decides
//! how a failure is shown.

pub mod indices;
pub mod profile;
pub mod shareholders;
pub mod valuation;
pub mod volume;

pub use indices::{compare_with_indices, index_history, index_list, IndexComparison};
pub use profile::{read_informations, read_profile, CompanyProfile, Field, Informations};
pub use shareholders::{
    normalize_percentage, read_shareholders, Shareholder, ShareholderBreakdown,
};
pub use valuation::{classify_estimates, read_estimates};
pub use volume::read_volume;
