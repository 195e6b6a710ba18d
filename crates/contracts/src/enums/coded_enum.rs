/// Объявляет перечисление над числовыми кодами сервисов RS.ge.
///
/// У каждого перечисления есть `code`, `from_code`, `from_code_lossy`, `all`
/// и `display_name`, а serde работает с голым целым. Неизвестные коды,
/// пришедшие от сервиса, хранятся в варианте `Unknown`, и запись переживает
/// цикл чтение-изменение-сохранение без потерь.
#[macro_export]
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $code:literal => $label:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
            /// Код, отсутствующий в документации сервиса
            Unknown(i32),
        }

        impl $name {
            /// Числовой код для API
            pub fn code(&self) -> i32 {
                match self {
                    $( Self::$variant => $code, )+
                    Self::Unknown(code) => *code,
                }
            }

            pub fn from_code(code: i32) -> Option<Self> {
                match code {
                    $( $code => Some(Self::$variant), )+
                    _ => None,
                }
            }

            pub fn from_code_lossy(code: i32) -> Self {
                Self::from_code(code).unwrap_or(Self::Unknown(code))
            }

            pub fn all() -> Vec<Self> {
                vec![$( Self::$variant, )+]
            }

            /// Название на грузинском, как в документации RS.ge
            pub fn display_name(&self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                    Self::Unknown(_) => "უცნობი",
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Unknown(_))
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{} ({})", self.display_name(), self.code())
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> i32 {
                value.code()
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_i32(self.code())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let code = $crate::shared::lenient::int32(deserializer)?;
                Ok(Self::from_code_lossy(code))
            }
        }
    };
}
