use serde::Serialize;

/// Macro to generate a unit enum with as_str + Display.
/// Variant order is declaration order, so `Ord` follows the list.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(RiskLevel {
    None => "NONE",
    Borderline => "BORDERLINE",
    InDanger => "IN_DANGER",
    EarlyOnset => "EARLY_ONSET",
});

/// Patient gender as used by the risk thresholds.
///
/// Only the tokens `"m"` and `"f"` (any case) are recognized. Every other
/// value maps to `Other`, which the decision table treats as neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Parse a gender token. Total: unknown tokens become `Other`.
    pub fn from_token(token: &str) -> Self {
        match token.to_lowercase().as_str() {
            "m" => Self::Male,
            "f" => Self::Female,
            _ => Self::Other,
        }
    }
}
