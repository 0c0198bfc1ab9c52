/// Define a closed enumeration stored as a `TEXT` column.
///
/// Generates `as_str`, `Display`, `FromStr` and `TryFrom<String>` (the latter
/// is what `#[sqlx(try_from = "String")]` uses when decoding rows). Unknown
/// values are rejected with [`CoreError::Validation`](crate::error::CoreError).
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $val)] $variant ),+
        }

        impl $name {
            /// Every accepted column value, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$($val),+];

            /// Return the value stored in the database column.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $val ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $val => Ok(Self::$variant), )+
                    other => Err($crate::error::CoreError::Validation(format!(
                        "Invalid {} '{other}'. Must be one of: {}",
                        $label,
                        Self::VALUES.join(", ")
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::error::CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}
