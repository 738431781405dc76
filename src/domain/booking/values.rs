//! Booking value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{PhotoId, ProfessionalId, Timestamp, UserId};

/// Classification of a professional, gating project-only features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfessionalType {
    /// Handyman-style services booked by the hour.
    GeneralService,
    /// Artist-style commissions with project details and progress photos.
    ProjectBased,
}

impl ProfessionalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfessionalType::GeneralService => "general_service",
            ProfessionalType::ProjectBased => "project_based",
        }
    }

    pub fn is_project_based(&self) -> bool {
        matches!(self, ProfessionalType::ProjectBased)
    }
}

impl fmt::Display for ProfessionalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment state tracked alongside the booking. Payment processing is external.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
}

/// Brief for a project-based booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetails {
    pub title: String,
    pub scope: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Timestamp>,
}

/// Photo documenting work on a project-based booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressPhoto {
    pub id: PhotoId,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub uploaded_at: Timestamp,
    pub uploaded_by: ProfessionalId,
}

/// Photo supplied by a caller, before it is stamped and attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUpload {
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

impl PhotoUpload {
    pub fn new(url: impl Into<String>, caption: Option<String>) -> Self {
        Self {
            url: url.into(),
            caption,
        }
    }
}

/// The professional as seen by booking creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalProfile {
    pub id: ProfessionalId,
    /// Account that owns the profile; receives messages and notifications.
    pub user_id: UserId,
    pub professional_type: ProfessionalType,
    pub is_available: bool,
}
