//! Static pincode-to-address lookup table.

use serde::Serialize;

use seva_core::Pincode;

/// City and state resolved from a pincode.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PincodeRecord {
    pub city: &'static str,
    pub state: &'static str,
}

/// Known pincodes, metro head post offices only.
const PINCODES: &[(&str, PincodeRecord)] = &[
    (
        "110001",
        PincodeRecord {
            city: "New Delhi",
            state: "Delhi",
        },
    ),
    (
        "400001",
        PincodeRecord {
            city: "Mumbai",
            state: "Maharashtra",
        },
    ),
    (
        "600001",
        PincodeRecord {
            city: "Chennai",
            state: "Tamil Nadu",
        },
    ),
    (
        "700001",
        PincodeRecord {
            city: "Kolkata",
            state: "West Bengal",
        },
    ),
    (
        "560001",
        PincodeRecord {
            city: "Bengaluru",
            state: "Karnataka",
        },
    ),
];

/// Read-only pincode directory.
#[derive(Debug, Default)]
pub struct PincodeDirectory;

impl PincodeDirectory {
    /// Create the directory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolve a pincode to its city and state.
    #[must_use]
    pub fn lookup(&self, pincode: &Pincode) -> Option<&'static PincodeRecord> {
        PINCODES
            .iter()
            .find(|(code, _)| *code == pincode.as_str())
            .map(|(_, record)| record)
    }
}
