//! Domain identifier types
//!
//! Newtype wrappers over UUIDs so gene, variant, report and patient
//! identifiers cannot be mixed up at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random (v4) identifier
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID
            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Parses an identifier, rejecting anything that is not a UUID
            pub fn parse(id: &str) -> Result<Self, String> {
                Uuid::parse_str(id.trim())
                    .map(Self)
                    .map_err(|_| format!("{} '{}' is not a valid UUID", $label, id))
            }

            /// Returns the inner UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Consumes self and returns the inner UUID
            pub fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

uuid_id!(
    /// Gene identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use genosentinel::domain::ids::GeneId;
    ///
    /// let id = GeneId::parse("7d44b88c-4199-4bad-97dc-d78268e01398").unwrap();
    /// assert_eq!(id.to_string(), "7d44b88c-4199-4bad-97dc-d78268e01398");
    /// ```
    GeneId,
    "gene_id"
);

uuid_id!(
    /// Genetic variant identifier
    VariantId,
    "variant_id"
);

uuid_id!(
    /// Patient variant report identifier
    ReportId,
    "report_id"
);

uuid_id!(
    /// External patient identifier, owned by the clinical service
    PatientId,
    "patient_id"
);
