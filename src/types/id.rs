use std::fmt::Display;
use std::str::FromStr;

macro_rules! newtypes {
    {
        $( $(#[$meta:meta])* $Ident:ident: $ty:ty, )*
    } => {$(
        $(#[$meta])*
        #[derive(Debug, serde::Deserialize, serde::Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, sqlx::Type)]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $Ident(pub $ty);

        impl From<$ty> for $Ident {
            fn from(value: $ty) -> Self {
                Self(value)
            }
        }

        impl Display for $Ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $Ident {
            type Err = <$ty as FromStr>::Err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    )*};
}

newtypes! {
    /// Server-assigned identifier of a user, handed out once the
    /// user is persisted for the first time.
    UserId: i64,
}
