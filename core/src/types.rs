//! Shared primitive types used across the entire staffing core.

/// A stable, unique identifier for a person on the roster.
pub type PersonId = String;

/// A stable identifier for a work area on the line.
pub type AreaId = String;

/// A stable key for a lead role (e.g. "line_lead", "quality_lead").
pub type LeadRoleId = String;
