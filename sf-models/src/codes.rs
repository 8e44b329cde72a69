//! Numeric code tables used by device and message records.
//!
//! The API reports link quality, device state and communication state as
//! small integers. Unknown codes are preserved rather than rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! code_table {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident = $code:literal => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "i64", into = "i64")]
        pub enum $name {
            $($variant,)+
            /// A code not listed in the API documentation.
            Unknown(i64),
        }

        impl $name {
            /// Decode a wire code.
            pub fn from_code(code: i64) -> Self {
                match code {
                    $($code => Self::$variant,)+
                    other => Self::Unknown(other),
                }
            }

            /// The wire code.
            pub fn code(&self) -> i64 {
                match self {
                    $(Self::$variant => $code,)+
                    Self::Unknown(code) => *code,
                }
            }

            /// Label as printed by the API documentation.
            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                    Self::Unknown(_) => "UNKNOWN",
                }
            }
        }

        impl From<i64> for $name {
            fn from(code: i64) -> Self {
                Self::from_code(code)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.code()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

code_table! {
    /// Link quality indicator.
    Lqi {
        Limit = 0 => "LIMIT",
        Average = 1 => "AVERAGE",
        Good = 2 => "GOOD",
        Excellent = 3 => "EXCELLENT",
        NotAvailable = 4 => "NA",
    }
}

code_table! {
    /// Device lifecycle state.
    DeviceState {
        Ok = 0 => "OK",
        Dead = 1 => "DEAD",
        OffContract = 2 => "OFF_CONTRACT",
        Disabled = 3 => "DISABLED",
        Warn = 4 => "WARN",
        Deleted = 5 => "DELETED",
        Suspended = 6 => "SUSPENDED",
        NotActivable = 7 => "NOT_ACTIVABLE",
    }
}

code_table! {
    /// Communication state of a device.
    ComState {
        No = 0 => "NO",
        Ok = 1 => "OK",
        Warn = 2 => "WARN",
        Ko = 3 => "KO",
        NotAvailable = 4 => "(na)",
        NotSeen = 5 => "NOT_SEEN",
    }
}
